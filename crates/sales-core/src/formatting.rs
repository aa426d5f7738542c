use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal with thousands separators and a fixed number of decimal
/// places. Midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_number;
///
/// assert_eq!(format_number(Decimal::new(12345, 1), 1), "1,234.5");
/// assert_eq!(format_number(Decimal::new(1234567, 0), 0), "1,234,567");
/// assert_eq!(format_number(Decimal::ZERO, 2), "0.00");
/// assert_eq!(format_number(Decimal::new(-98765, 1), 1), "-9,876.5");
/// ```
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let digits = format!("{:.prec$}", rounded.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "$1,234.56");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// assert_eq!(format_currency(Decimal::new(-999, 2)), "$-9.99");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_number(amount, 2))
}

/// Format a percentage with an explicit sign and two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_percent;
///
/// assert_eq!(format_percent(Decimal::new(-40, 0)), "-40.00%");
/// assert_eq!(format_percent(Decimal::new(125, 1)), "+12.50%");
/// assert_eq!(format_percent(Decimal::ZERO), "0.00%");
/// ```
pub fn format_percent(value: Decimal) -> String {
    let body = format_number(value, 2);
    if value.round_dp(2).is_sign_positive() && !value.round_dp(2).is_zero() {
        format!("+{}%", body)
    } else {
        format!("{}%", body)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(Decimal::ZERO, 0), "0");
        assert_eq!(format_number(Decimal::ZERO, 2), "0.00");
    }

    #[test]
    fn test_format_number_pads_decimals() {
        assert_eq!(format_number(d("7"), 2), "7.00");
        assert_eq!(format_number(d("2.5"), 2), "2.50");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(d("1234.5"), 1), "1,234.5");
        assert_eq!(format_number(d("1000"), 0), "1,000");
        assert_eq!(format_number(d("1234567.891"), 2), "1,234,567.89");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(d("-9876.5"), 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_midpoint_up() {
        assert_eq!(format_number(d("1.005"), 2), "1.01");
        assert_eq!(format_number(d("-1.005"), 2), "-1.01");
    }

    #[test]
    fn test_format_number_negative_zero_after_rounding() {
        assert_eq!(format_number(d("-0.001"), 2), "0.00");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency(d("1000000")), "$1,000,000.00");
    }

    #[test]
    fn test_format_percent_signs() {
        assert_eq!(format_percent(d("33.333")), "+33.33%");
        assert_eq!(format_percent(d("-0.001")), "0.00%");
        assert_eq!(format_percent(d("-12.5")), "-12.50%");
    }
}
