//! Currency formatting

use rust_decimal::Decimal;

use super::round_vnd;

/// `1250000` → `1.250.000 ₫`
pub fn format_vnd(amount: Decimal) -> String {
    let rounded = round_vnd(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_grouping() {
        assert_eq!(format_vnd(Decimal::from(1_250_000)), "1.250.000 ₫");
        assert_eq!(format_vnd(Decimal::from(999)), "999 ₫");
        assert_eq!(format_vnd(Decimal::ZERO), "0 ₫");
        assert_eq!(format_vnd(Decimal::from(-15_000)), "-15.000 ₫");
    }

    #[test]
    fn test_rounds_before_grouping() {
        assert_eq!(format_vnd(Decimal::from_str("1999.5").unwrap()), "2.000 ₫");
    }
}
