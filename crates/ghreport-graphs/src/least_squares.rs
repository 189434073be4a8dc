//! Ordinary least-squares trend line.

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquares {
    /// Change in y per unit of x.
    pub slope: f64,
    /// Value of y at x = 0.
    pub intercept: f64,
}

impl LeastSquares {
    /// Fits a line through `points`.
    ///
    /// Returns `None` for fewer than two points, or when every point shares
    /// the same x (the slope is undefined).
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        // Sums are taken around the means; raw timestamp sums lose precision.
        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (dx.mul_add(y - mean_y, sxy), dx.mul_add(dx, sxx))
        });

        if sxx == 0.0 || !sxx.is_finite() {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Value of the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}
