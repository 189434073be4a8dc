//! Test utilities and shared test helpers.
//!
//! Fixtures for time series records and small assertion helpers that the
//! other crates use in their unit and integration tests.

use chrono::{DateTime, TimeZone, Utc};
use std::io;
use std::sync::{Arc, Mutex, Once, PoisonError};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{Metric, SeriesRecord};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Runs `f` under a debug level subscriber and returns its result with
/// everything it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || CaptureWriter(Arc::clone(&sink)))
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.lock().unwrap_or_else(PoisonError::into_inner)).into_owned();
    (value, logs)
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Test fixture for creating a timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Time series fixtures shaped like GHData API responses.
pub mod series_fixtures {
    use super::*;

    /// Formats a timestamp the way the API serves it.
    pub fn api_date(timestamp: DateTime<Utc>) -> String {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// A single record for `metric` at `date` (already in API format).
    pub fn record(metric: Metric, date: &str, value: f64) -> SeriesRecord {
        SeriesRecord::new(date, metric.value_field(), value)
    }

    /// `values.len()` weekly records for `metric` starting at `start`.
    pub fn weekly_series(metric: Metric, start: DateTime<Utc>, values: &[f64]) -> Vec<SeriesRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let date = start + chrono::Duration::weeks(i64::try_from(i).unwrap());
                record(metric, &api_date(date), value)
            })
            .collect()
    }

    /// A short, gently rising series for `metric`.
    pub fn sample_series(metric: Metric) -> Vec<SeriesRecord> {
        weekly_series(
            metric,
            mock_timestamp(2020, 1, 6, 0, 0, 0),
            &[3.0, 5.0, 4.0, 8.0, 7.0, 10.0],
        )
    }
}

/// Proptest strategies for query string testing.
#[cfg(feature = "proptest")]
pub mod strategies {
    use proptest::prelude::*;

    /// Parameter names: letters, digits and a few punctuation characters that
    /// are special in regular expressions.
    pub fn parameter_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_\\[\\].*]{0,8}"
    }

    /// Arbitrary printable values, including characters that need encoding.
    pub fn parameter_value() -> impl Strategy<Value = String> {
        "[ -~äé✓]{0,16}"
    }
}
