//! Number formatting for rendered reports.

/// Format a ratio as a percentage with up to two decimals.
///
/// `0.156` becomes `15.6%`, `1.0` becomes `100%`.
pub fn percent(ratio: f64) -> String {
    format!("{}%", trim_decimals(ratio * 100.0, 2))
}

/// Format a signed percent-change value that is already in percent units.
pub fn signed_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{}%", sign, trim_decimals(value, 2))
}

const COMPACT_UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// Format a count in compact notation: `1000` becomes `1K`, `1250000` becomes `1.3M`.
///
/// A value that rounds up to 1000 of one unit is shown in the next one,
/// so `999950` becomes `1M`.
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    let mut tier = COMPACT_UNITS.iter().rposition(|(divisor, _)| abs >= *divisor);

    loop {
        let Some(index) = tier else {
            if round_to(abs, 1) >= 1000.0 {
                tier = Some(0);
                continue;
            }
            return trim_decimals(value, 1);
        };

        let (divisor, suffix) = COMPACT_UNITS[index];
        let scaled = value / divisor;
        let digits = if scaled.abs() < 100.0 { 1 } else { 0 };
        if round_to(scaled.abs(), digits) >= 1000.0 && index + 1 < COMPACT_UNITS.len() {
            tier = Some(index + 1);
            continue;
        }
        return format!("{}{}", trim_decimals(scaled, digits), suffix);
    }
}

fn round_to(value: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

fn trim_decimals(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*}", digits, value);
    if formatted.contains('.') {
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.156), "15.6%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.033), "3.3%");
        assert_eq!(percent(0.1493), "14.93%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(12.4), "+12.4%");
        assert_eq!(signed_percent(-4.1), "-4.1%");
        assert_eq!(signed_percent(0.0), "0%");
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(1000.0), "1K");
        assert_eq!(compact(1_000_000.0), "1M");
        assert_eq!(compact(1_000_000_000.0), "1B");
        assert_eq!(compact(128_450.0), "128K");
        assert_eq!(compact(1_260.0), "1.3K");
        assert_eq!(compact(212.5), "212.5");
        assert_eq!(compact(42.0), "42");
    }

    #[test]
    fn test_compact_rounds_into_next_unit() {
        assert_eq!(compact(999_950.0), "1M");
        assert_eq!(compact(999_999_999.0), "1B");
        assert_eq!(compact(999.96), "1K");
        assert_eq!(compact(-999_950.0), "-1M");
        assert_eq!(compact(999_499.0), "999K");
        assert_eq!(compact(999_999_999_999_999.0), "1000T");
    }
}
