use rust_decimal::Decimal;

use crate::types::{Currency, Money, Percent};

/// Render a monetary amount with currency symbol, thousands separators,
/// and two decimal places, e.g. `format_currency(dec!(2187.5), &Currency::USD)`
/// => `"$2,187.50"`.
pub fn format_currency(amount: Money, currency: &Currency) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (digits, "00".to_string()),
    };

    let sign = if negative { "-" } else { "" };
    format!(
        "{}{}{}.{}",
        sign,
        symbol(currency),
        group_thousands(&int_part),
        frac_part
    )
}

/// Render a 0–100 scale percentage to one decimal place, trailing zeros
/// trimmed, e.g. `"35%"`, `"12.5%"`.
pub fn format_percentage(value: Percent) -> String {
    format!("{}%", value.round_dp(1).normalize())
}

fn symbol(currency: &Currency) -> String {
    match currency {
        Currency::USD | Currency::CAD | Currency::AUD | Currency::HKD | Currency::SGD => {
            "$".to_string()
        }
        Currency::GBP => "\u{a3}".to_string(),
        Currency::EUR => "\u{20ac}".to_string(),
        Currency::JPY => "\u{a5}".to_string(),
        Currency::CHF => "CHF ".to_string(),
        Currency::Other(code) => format!("{} ", code),
    }
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping_and_padding() {
        assert_eq!(
            format_currency(dec!(2187.5), &Currency::USD),
            "$2,187.50"
        );
        assert_eq!(
            format_currency(dec!(26250), &Currency::USD),
            "$26,250.00"
        );
        assert_eq!(
            format_currency(dec!(1000000), &Currency::USD),
            "$1,000,000.00"
        );
    }

    #[test]
    fn test_currency_small_amounts() {
        assert_eq!(format_currency(dec!(0), &Currency::USD), "$0.00");
        assert_eq!(format_currency(dec!(0.875), &Currency::USD), "$0.88");
        assert_eq!(format_currency(dec!(999), &Currency::USD), "$999.00");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(dec!(-499), &Currency::USD), "-$499.00");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(format_currency(dec!(199), &Currency::GBP), "\u{a3}199.00");
        assert_eq!(format_currency(dec!(199), &Currency::EUR), "\u{20ac}199.00");
        assert_eq!(
            format_currency(dec!(199), &Currency::Other("NOK".to_string())),
            "NOK 199.00"
        );
    }

    #[test]
    fn test_percentage_trimming() {
        assert_eq!(format_percentage(dec!(35)), "35%");
        assert_eq!(format_percentage(dec!(12.50)), "12.5%");
        assert_eq!(format_percentage(dec!(0.26)), "0.3%");
        assert_eq!(format_percentage(dec!(0)), "0%");
    }
}
