//! Number formatting for table cells and summary cards.

use num_format::{Locale, ToFormattedString};

/// Formats a value with thousands separators and exactly two decimals, e.g. `1,234.50`.
pub fn grouped_two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_owned();
    }

    // Round before grouping so a carry reaches the integer part.
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = match int_part.parse::<u64>() {
        Ok(int_value) => int_value.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_owned(),
    };

    let negative = value < 0.0 && fixed.bytes().any(|byte| byte.is_ascii_digit() && byte != b'0');
    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Formats a summary card value as `"<value:.2f> <unit>"`.
pub fn card_value(value: f64, unit: &str) -> String {
    format!("{value:.2} {unit}")
}

/// Parses a number that may carry thousands separators or surrounding spaces.
pub fn parse_lenient_f64(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    text.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(grouped_two_decimals(1234.5), "1,234.50");
        assert_eq!(grouped_two_decimals(0.0), "0.00");
        assert_eq!(grouped_two_decimals(12.0), "12.00");
        assert_eq!(grouped_two_decimals(1_234_567.891), "1,234,567.89");
        assert_eq!(grouped_two_decimals(999.999), "1,000.00");
    }

    #[test]
    fn keeps_sign_of_negative_values() {
        assert_eq!(grouped_two_decimals(-9876.1), "-9,876.10");
        assert_eq!(grouped_two_decimals(-0.001), "0.00");
    }

    #[test]
    fn non_finite_values_render_as_zero() {
        assert_eq!(grouped_two_decimals(f64::NAN), "0.00");
        assert_eq!(grouped_two_decimals(f64::INFINITY), "0.00");
    }

    #[test]
    fn card_values_are_not_grouped() {
        assert_eq!(card_value(1234.5, "tons"), "1234.50 tons");
    }

    #[test]
    fn lenient_parse_strips_separators() {
        assert_eq!(parse_lenient_f64(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_lenient_f64("12kg"), None);
        assert_eq!(parse_lenient_f64(""), None);
    }
}
