//! Validation functions for CPR numbers
//!
//! Both checks run on the normalized form: exactly 10 ASCII digits,
//! `DDMMYY` followed by a 4-digit serial.

use chrono::NaiveDate;

use crate::error::{CprError, Result};

/// Modulo 11 weights for CPR, first digit to last
pub const WEIGHTS: [u32; 10] = [4, 3, 2, 7, 6, 5, 4, 3, 2, 1];

/// Birth dates for which the registry ran out of modulo 11 compliant serials.
/// Numbers starting with one of these are valid whatever their check digit.
/// See <https://cpr.dk/cpr-systemet/personnumre-uden-kontrolciffer-modulus-11-kontrol/>
pub const NO_MODULO_CHECK_PREFIXES: [&str; 18] = [
    "010160", "010164", "010165", "010166", "010169", "010170", "010174", "010180", "010182",
    "010184", "010185", "010186", "010187", "010188", "010189", "010190", "010191", "010192",
];

/// Strip space and dash separators from a candidate
pub fn normalize(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect()
}

/// Split a normalized number into digits; `None` unless exactly 10 ASCII digits
fn digits(number: &str) -> Option<[u32; 10]> {
    let bytes = number.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let mut out = [0u32; 10];
    for (slot, &b) in out.iter_mut().zip(bytes) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = u32::from(b - b'0');
    }
    Some(out)
}

/// Expand a two-digit birth year: 00-20 is 2000-2020, 21-99 is 1921-1999
pub fn expand_year(yy: u32) -> i32 {
    let century = if yy < 21 { 2000 } else { 1900 };
    century + yy as i32
}

fn date_of(d: &[u32; 10]) -> Result<NaiveDate> {
    let day = d[0] * 10 + d[1];
    let month = d[2] * 10 + d[3];
    let year = expand_year(d[4] * 10 + d[5]);

    NaiveDate::from_ymd_opt(year, month, day).ok_or(CprError::InvalidDate { day, month, year })
}

fn weighted_sum(d: &[u32; 10]) -> u32 {
    d.iter().zip(WEIGHTS).map(|(&digit, w)| digit * w).sum()
}

/// Birth date encoded in the first six digits, if it is a real calendar date
pub fn birth_date(number: &str) -> Option<NaiveDate> {
    digits(number).and_then(|d| date_of(&d).ok())
}

/// Whether the date prefix is one of the checksum-exempt birth dates
pub fn is_checksum_exempt(number: &str) -> bool {
    number
        .get(..6)
        .is_some_and(|prefix| NO_MODULO_CHECK_PREFIXES.contains(&prefix))
}

fn checksum(number: &str, d: &[u32; 10]) -> Result<()> {
    if is_checksum_exempt(number) {
        return Ok(());
    }
    let sum = weighted_sum(d);
    if sum % 11 != 0 {
        return Err(CprError::ChecksumMismatch { sum });
    }
    Ok(())
}

/// Modulo 11 check, waived for exempt prefixes
pub fn mod11(number: &str) -> bool {
    digits(number).is_some_and(|d| checksum(number, &d).is_ok())
}

/// Full validation of a normalized number, returning its birth date.
///
/// Format is checked first, then the date, then the checksum. The error
/// names the first stage that failed.
pub fn check(number: &str) -> Result<NaiveDate> {
    let d = digits(number).ok_or(CprError::InvalidFormat)?;
    let date = date_of(&d)?;
    checksum(number, &d)?;
    Ok(date)
}

/// Validate a normalized CPR number (date and checksum)
pub fn cpr(number: &str) -> bool {
    check(number).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("010160-1234"), "0101601234");
        assert_eq!(normalize("010160 1234"), "0101601234");
        assert_eq!(normalize("0-1 0160-12 34"), "0101601234");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_cpr_valid() {
        assert!(cpr("1202065518"));
        assert!(cpr("2310450637"));
        assert!(cpr("0101601234")); // Exempt prefix
    }

    #[test]
    fn test_cpr_invalid() {
        assert!(!cpr("1202065513")); // Wrong check digit
        assert!(!cpr("0102811234")); // Wrong check digit
        assert!(!cpr("1234567890")); // Month 34
        assert!(!cpr("010160123")); // Too short
        assert!(!cpr("80101601234")); // Too long
        assert!(!cpr("010160-1234")); // Not normalized
        assert!(!cpr("abcdefghij"));
        assert!(!cpr(""));
    }

    #[test]
    fn test_century_boundary() {
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(20), 2020);
        assert_eq!(expand_year(21), 1921);
        assert_eq!(expand_year(99), 1999);

        // 2020 is a leap year, 1921 is not
        assert_eq!(birth_date("2902200000"), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(birth_date("2902210000"), None);
        assert_eq!(birth_date("2902000000"), NaiveDate::from_ymd_opt(2000, 2, 29));
    }

    #[test]
    fn test_impossible_dates() {
        assert_eq!(birth_date("3104801234"), None);
        assert_eq!(birth_date("0013801234"), None);
        assert_eq!(birth_date("0001801234"), None);
        assert_eq!(birth_date("3112991234"), NaiveDate::from_ymd_opt(1999, 12, 31));
    }

    #[test]
    fn test_exempt_prefixes_ignore_serial() {
        for prefix in NO_MODULO_CHECK_PREFIXES {
            for serial in ["0000", "1234", "9999"] {
                let number = format!("{prefix}{serial}");
                assert!(mod11(&number), "{number}");
                assert!(cpr(&number), "{number}");
            }
        }
        assert!(!is_checksum_exempt("0101611234"));
        assert!(!is_checksum_exempt("01016"));
    }

    #[test]
    fn test_mod11_agrees_with_check() {
        // Valid dates, so check fails only on the checksum
        for number in ["1202065518", "1202065513", "0102811234", "0101601234", "0101891111"] {
            let by_check = !matches!(check(number), Err(CprError::ChecksumMismatch { .. }));
            assert_eq!(mod11(number), by_check, "{number}");
        }
        assert!(!mod11("12020655"));
    }

    #[test]
    fn test_check_reports_stage() {
        assert_eq!(check("horse"), Err(CprError::InvalidFormat));
        assert_eq!(
            check("1234567890"),
            Err(CprError::InvalidDate {
                day: 12,
                month: 34,
                year: 1956
            })
        );
        assert_eq!(
            check("1202065513"),
            Err(CprError::ChecksumMismatch { sum: 94 })
        );
        assert_eq!(check("1202065518"), Ok(NaiveDate::from_ymd_opt(2006, 2, 12).unwrap()));
    }
}
