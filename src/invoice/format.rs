use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format an amount of money as `$1,234.50`.
///
/// Values are rounded half-to-even at two decimal places, grouped with commas
/// and always show exactly two fractional digits.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}.{fraction}")
}

/// Format a date as `March 05, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn can_format_currency() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(12)), "$12.00");
        assert_eq!(format_currency(dec!(123456.7)), "$123,456.70");
    }

    #[test]
    fn currency_rounds_half_to_even() {
        assert_eq!(format_currency(dec!(0.125)), "$0.12");
        assert_eq!(format_currency(dec!(0.135)), "$0.14");
        assert_eq!(format_currency(dec!(2.5050)), "$2.50");
    }

    #[test]
    fn negative_currency_keeps_its_sign() {
        assert_eq!(format_currency(dec!(-1500)), "-$1,500.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn can_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!(format_date(date), "March 05, 2024");
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).expect("valid date");
        assert_eq!(format_date(date), "December 31, 1999");
    }
}
