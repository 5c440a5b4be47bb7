//! Shared utility functions for HydroAI crates.

/// Guards and rounding helpers applied to every consumer-facing number.
pub mod numbers {
    /// Return `value` if it is finite, otherwise 0.
    pub fn finite_or_zero(value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Divide `numerator` by `denominator`, yielding 0 instead of NaN or
    /// an infinity when either input is non-finite or the divisor is 0.
    pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
        if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
            return 0.0;
        }
        finite_or_zero(numerator / denominator)
    }

    /// `numerator / denominator * 100`, with the same guard as [`safe_ratio`].
    pub fn safe_percentage(numerator: f64, denominator: f64) -> f64 {
        finite_or_zero(safe_ratio(numerator, denominator) * 100.0)
    }

    /// Round half toward positive infinity, matching JavaScript `Math.round`.
    pub fn round_half_up(value: f64) -> f64 {
        (value + 0.5).floor()
    }

    /// Round to `places` decimal places using [`round_half_up`].
    pub fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        round_half_up(value * factor) / factor
    }

    /// Clamp that maps NaN to `min` instead of propagating it.
    pub fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
        if value.is_nan() {
            return min;
        }
        value.clamp(min, max)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_ratio_guards() {
            assert_eq!(safe_ratio(10.0, 0.0), 0.0);
            assert_eq!(safe_ratio(f64::NAN, 5.0), 0.0);
            assert_eq!(safe_ratio(5.0, f64::INFINITY), 0.0);
            assert_eq!(safe_ratio(5.0, 2.0), 2.5);
        }

        #[test]
        fn test_safe_percentage() {
            assert_eq!(safe_percentage(56.0, 0.0), 0.0);
            assert_eq!(safe_percentage(25.0, 50.0), 50.0);
        }

        #[test]
        fn test_round_half_up_matches_math_round() {
            assert_eq!(round_half_up(2.5), 3.0);
            assert_eq!(round_half_up(-2.5), -2.0);
            assert_eq!(round_half_up(55.8), 56.0);
            assert_eq!(round_to(9.12, 1), 9.1);
            assert_eq!(round_to(9.032258, 2), 9.03);
        }

        #[test]
        fn test_clamp_finite() {
            assert_eq!(clamp_finite(f64::NAN, 10.0, 100.0), 10.0);
            assert_eq!(clamp_finite(140.0, 10.0, 100.0), 100.0);
            assert_eq!(clamp_finite(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
        }
    }
}

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Mid-month date for `year`/`month`, or Jan 1 of the year when the
    /// month is out of range.
    pub fn mid_month(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 15)
            .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_mid_month() {
            assert_eq!(format_date(&mid_month(2022, 11)), "2022-11-15");
            assert_eq!(format_date(&mid_month(2022, 13)), "2022-01-01");
        }
    }
}
