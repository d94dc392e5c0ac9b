//! Number and date formatting for form boxes

use crate::{FillError, Result};
use chrono::{Datelike, NaiveDate};

/// Whole number as plain decimal, no separators
pub fn whole(n: i64) -> String {
    n.to_string()
}

/// Amount with exactly two fractional digits
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Right-justify `n` in a field of `digits` characters, padding with spaces
///
/// Wider numbers are not truncated.
pub fn right_justify(n: i64, digits: usize) -> String {
    format!("{n:>digits$}")
}

/// Left-pad `n` with zeros to `digits` characters (sign included)
pub fn zero_pad(n: i64, digits: usize) -> String {
    format!("{n:0digits$}")
}

/// Pence part of an amount, as printed in the pence boxes
///
/// Half a penny is added before rounding half to even. An exact .5 after the
/// bias therefore goes to the even neighbour, and amounts whose fraction is
/// at least 0.995 produce "100".
pub fn pence(amount: f64) -> String {
    let fraction = amount - amount.trunc();
    let pence = (100.0 * fraction + 0.5).round_ties_even() as i64;
    format!("{pence:02}")
}

/// Parse an ISO `YYYY-MM-DD` date
///
/// The year must be four digits and the month and day one or two digits;
/// signs and whitespace are refused.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let invalid =
        |reason: String| FillError::Format(format!("{text:?} is not a YYYY-MM-DD date: {reason}"));

    let fields: Vec<&str> = text.split('-').collect();
    let well_formed = match fields.as_slice() {
        [year, month, day] => {
            year.len() == 4
                && (1..=2).contains(&month.len())
                && (1..=2).contains(&day.len())
                && fields.iter().all(|f| f.bytes().all(|b| b.is_ascii_digit()))
        }
        _ => false,
    };
    if !well_formed {
        return Err(invalid("expected digits only".to_string()));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))
}

/// Day, month and year fields of a date: "dd", "mm", "yyyy"
pub fn date_fields(date: NaiveDate) -> [String; 3] {
    [
        format!("{:02}", date.day()),
        format!("{:02}", date.month()),
        format!("{:04}", date.year()),
    ]
}

/// Split a sort code into its three two-character groups
///
/// The code must be exactly six characters long.
pub fn sort_code_groups(code: &str) -> Result<[String; 3]> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 6 {
        return Err(FillError::Format(format!(
            "sort code {code:?} must be 6 characters, got {}",
            chars.len()
        )));
    }

    Ok([
        chars[0..2].iter().collect(),
        chars[2..4].iter().collect(),
        chars[4..6].iter().collect(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_whole() {
        assert_eq!(whole(123), "123");
        assert_eq!(whole(-45), "-45");
        assert_eq!(whole(1000000), "1000000");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(50.0), "50.00");
        assert_eq!(money(142.1), "142.10");
        assert_eq!(money(99.9), "99.90");
        assert_eq!(money(-3.0), "-3.00");
    }

    #[test]
    fn test_right_justify() {
        assert_eq!(right_justify(748, 6), "   748");
        assert_eq!(right_justify(11218, 6), " 11218");
        assert_eq!(right_justify(100, 4), " 100");
        assert_eq!(right_justify(-5, 4), "  -5");
        assert_eq!(right_justify(123456, 3), "123456");
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad(6, 4), "0006");
        assert_eq!(zero_pad(42, 2), "42");
        assert_eq!(zero_pad(-6, 4), "-006");
    }

    #[test]
    fn test_pence() {
        assert_eq!(pence(100.0), "00");
        assert_eq!(pence(99.5), "50");
        // 142.12 - 142 is slightly above 0.12, so the biased value rounds up
        assert_eq!(pence(142.12), "13");
        // 0.25 * 100 + 0.5 is exactly 25.5, which rounds to even
        assert_eq!(pence(1.25), "26");
        assert_eq!(pence(2.75), "76");
        assert_eq!(pence(3.995), "100");
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2020-03-25").unwrap();
        assert_eq!(date_fields(date), ["25", "03", "2020"].map(String::from));
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(matches!(parse_date(""), Err(FillError::Format(_))));
        assert!(matches!(parse_date("25/03/2020"), Err(FillError::Format(_))));
        assert!(matches!(parse_date("2020-02-30"), Err(FillError::Format(_))));
        assert!(matches!(parse_date(" 2020-03-25"), Err(FillError::Format(_))));
        assert!(matches!(parse_date("+2020-03-25"), Err(FillError::Format(_))));
        assert!(matches!(parse_date("2020-03-25 "), Err(FillError::Format(_))));
        assert!(matches!(parse_date("20-03-25"), Err(FillError::Format(_))));
    }

    #[test]
    fn test_parse_date_single_digit_fields() {
        let date = parse_date("2020-3-5").unwrap();
        assert_eq!(date_fields(date), ["05", "03", "2020"].map(String::from));
    }

    #[test]
    fn test_date_fields_pad_small_years() {
        let date = NaiveDate::from_ymd_opt(999, 1, 2).unwrap();
        assert_eq!(date_fields(date), ["02", "01", "0999"].map(String::from));
    }

    #[test]
    fn test_sort_code_groups() {
        assert_eq!(
            sort_code_groups("123465").unwrap(),
            ["12", "34", "65"].map(String::from)
        );
        assert!(matches!(sort_code_groups("1234"), Err(FillError::Format(_))));
        assert!(matches!(
            sort_code_groups("12-34-65"),
            Err(FillError::Format(_))
        ));
    }
}
