use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Formatter handle a chart keeps per axis. Closures of the form
/// `Fn(f64, usize) -> String` coerce into it.
pub type SharedAxisValueFormatter = Arc<dyn AxisValueFormatter + Send + Sync + 'static>;

/// Turns an axis value into label text.
///
/// `decimals` is the precision the tick planner derived from the tick
/// interval; formatters are free to ignore it.
pub trait AxisValueFormatter {
    fn format(&self, value: f64, decimals: usize) -> String;
}

impl<F> AxisValueFormatter for F
where
    F: Fn(f64, usize) -> String,
{
    fn format(&self, value: f64, decimals: usize) -> String {
        self(value, decimals)
    }
}

/// Fixed-point formatter. Uses the planner's decimals unless a precision
/// override is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAxisValueFormatter {
    pub precision: Option<usize>,
}

impl DefaultAxisValueFormatter {
    #[must_use]
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
        }
    }
}

impl AxisValueFormatter for DefaultAxisValueFormatter {
    fn format(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        let precision = self.precision.unwrap_or(decimals);
        let text = format!("{value:.precision$}");
        // "-0.0" and friends read as noise on an axis.
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text[1..].to_owned()
        } else {
            text
        }
    }
}

/// Formats x values holding unix seconds as UTC date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnixTimeAxisFormatter {
    pub pattern: &'static str,
}

impl Default for UnixTimeAxisFormatter {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d %H:%M",
        }
    }
}

impl AxisValueFormatter for UnixTimeAxisFormatter {
    fn format(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        let millis = (value * 1_000.0).round();
        if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
            return DefaultAxisValueFormatter::default().format(value, decimals);
        }
        match DateTime::<Utc>::from_timestamp_millis(millis as i64) {
            Some(time) => time.format(self.pattern).to_string(),
            None => DefaultAxisValueFormatter::default().format(value, decimals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisValueFormatter, DefaultAxisValueFormatter, UnixTimeAxisFormatter};

    #[test]
    fn default_formatter_uses_planner_decimals() {
        let formatter = DefaultAxisValueFormatter::default();
        assert_eq!(formatter.format(20.0, 0), "20");
        assert_eq!(formatter.format(0.25, 2), "0.25");
        assert_eq!(formatter.format(-0.0001, 1), "0.0");
        assert_eq!(DefaultAxisValueFormatter::with_precision(3).format(1.0, 0), "1.000");
    }

    #[test]
    fn closures_are_formatters() {
        let percent = |value: f64, _decimals: usize| format!("{value:.0}%");
        assert_eq!(percent.format(42.0, 3), "42%");
    }

    #[test]
    fn unix_time_formatter_renders_utc() {
        let formatter = UnixTimeAxisFormatter::default();
        assert_eq!(formatter.format(0.0, 0), "1970-01-01 00:00");
        assert_eq!(formatter.format(86_400.0, 0), "1970-01-02 00:00");
    }
}
