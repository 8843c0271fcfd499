//! Pure input validation for registration numbers and model years.

use chrono::{Datelike, Utc};

/// Check a registration number against the two accepted shapes.
///
/// The number is 8 or 9 characters long: a letter, three digits, two
/// letters, two digits, and (for the 9-character shape) a final digit.
/// Classification is Unicode-aware, so Cyrillic plates validate the same way
/// as Latin ones.
pub fn validate_reg_num(reg_num: &str) -> bool {
    let chars: Vec<char> = reg_num.chars().collect();
    let body: &[char] = match (chars.len(), chars.last()) {
        (8, _) => &chars,
        (9, Some(last)) if last.is_numeric() => &chars[..8],
        _ => return false,
    };

    matches!(
        body,
        [a, b, c, d, e, f, g, h]
            if a.is_alphabetic()
                && b.is_numeric()
                && c.is_numeric()
                && d.is_numeric()
                && e.is_alphabetic()
                && f.is_alphabetic()
                && g.is_numeric()
                && h.is_numeric()
    )
}

/// Check that a model year falls between 1900 and the current UTC year.
///
/// Reads the wall clock on every call; the upper bound moves with it.
pub fn validate_year(year: i32) -> bool {
    (1900..=Utc::now().year()).contains(&year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::eight_chars("A123BC77")]
    #[case::nine_chars("A123BC777")]
    #[case::cyrillic("А123ВС77")]
    fn accepts_valid_registration_numbers(#[case] reg_num: &str) {
        assert!(validate_reg_num(reg_num), "{reg_num} should validate");
    }

    #[rstest]
    #[case::letter_in_digit_position("A123BC7X")]
    #[case::digit_in_letter_position("1123BC77")]
    #[case::too_short("A123BC7")]
    #[case::too_long("A123BC7777")]
    #[case::ninth_char_not_digit("A123BC77X")]
    #[case::empty("")]
    fn rejects_invalid_registration_numbers(#[case] reg_num: &str) {
        assert!(!validate_reg_num(reg_num), "{reg_num} should not validate");
    }

    #[test]
    fn accepts_year_range_boundaries() {
        let current = Utc::now().year();
        assert!(validate_year(1900));
        assert!(validate_year(current));
    }

    #[test]
    fn rejects_years_outside_range() {
        let current = Utc::now().year();
        assert!(!validate_year(1899));
        assert!(!validate_year(current + 1));
    }
}
