//! Graph utility functions and helpers.

use chrono::{DateTime, Utc};

/// Axis bounds of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRanges {
    /// Lowest x value shown.
    pub x_min: f64,
    /// Highest x value shown.
    pub x_max: f64,
    /// Lowest y value shown.
    pub y_min: f64,
    /// Highest y value shown.
    pub y_max: f64,
}

/// Seconds of padding around a single date.
const SINGLE_X_PADDING: f64 = 86_400.0;

/// Utility functions for graph generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Seconds since the epoch, as plotted on the x axis.
    #[allow(clippy::cast_precision_loss)]
    pub fn x_value(date: DateTime<Utc>) -> f64 {
        date.timestamp() as f64 + f64::from(date.timestamp_subsec_millis()) / 1000.0
    }

    /// Inverse of [`GraphUtils::x_value`], for axis labels.
    #[allow(clippy::cast_possible_truncation)]
    pub fn x_date(x: f64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(x.floor() as i64, 0)
    }

    /// Calculates padded axis ranges for `points`.
    ///
    /// The y axis always includes zero since the series are counts. Empty
    /// input gets the unit square; a single x value gets a day either side.
    pub fn axis_ranges(points: &[(f64, f64)]) -> AxisRanges {
        if points.is_empty() {
            return AxisRanges {
                x_min: 0.0,
                x_max: 1.0,
                y_min: 0.0,
                y_max: 1.0,
            };
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (0.0_f64, f64::NEG_INFINITY);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        let x_padding = if x_max > x_min {
            (x_max - x_min) * 0.05
        } else {
            SINGLE_X_PADDING
        };
        let y_padding = if y_max > y_min { (y_max - y_min) * 0.05 } else { 1.0 };

        AxisRanges {
            x_min: x_min - x_padding,
            x_max: x_max + x_padding,
            y_min: if y_min < 0.0 { y_min - y_padding } else { 0.0 },
            y_max: y_max + y_padding,
        }
    }
}
