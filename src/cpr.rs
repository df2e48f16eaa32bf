//! Parsed CPR number
//!
//! [`Cpr`] can only be built from a token that passes format, date and
//! checksum validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{CprError, Result};
use crate::{matcher, validators};

/// A CPR number that passed format, date and checksum validation.
///
/// Holds the normalized digits; the separators of the parsed input are
/// not kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpr {
    digits: String,
    birth_date: NaiveDate,
}

impl Cpr {
    /// Parse a single token such as `0101601234`, `010160-1234` or
    /// `010160 1234`. Surrounding text is rejected.
    pub fn parse(candidate: &str) -> Result<Self> {
        if !matcher::is_token(candidate) {
            return Err(CprError::InvalidFormat);
        }
        let digits = validators::normalize(candidate);
        let birth_date = validators::check(&digits)?;
        Ok(Cpr { digits, birth_date })
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// `DDMMYY`
    pub fn date_prefix(&self) -> &str {
        &self.digits[..6]
    }

    /// The four digits after the date
    pub fn serial(&self) -> &str {
        &self.digits[6..]
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// True if this number was accepted without a modulo 11 check
    pub fn is_checksum_exempt(&self) -> bool {
        validators::is_checksum_exempt(&self.digits)
    }
}

impl FromStr for Cpr {
    type Err = CprError;

    fn from_str(s: &str) -> Result<Self> {
        Cpr::parse(s)
    }
}

impl AsRef<str> for Cpr {
    fn as_ref(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for Cpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_separators() {
        let cpr: Cpr = "231045-0637".parse().unwrap();
        assert_eq!(cpr.as_str(), "2310450637");
        assert_eq!(cpr.to_string(), "2310450637");
        assert_eq!(cpr.date_prefix(), "231045");
        assert_eq!(cpr.serial(), "0637");
        assert_eq!(cpr.birth_date(), NaiveDate::from_ymd_opt(1945, 10, 23).unwrap());
        assert!(!cpr.is_checksum_exempt());
    }

    #[test]
    fn parse_exempt() {
        let cpr = Cpr::parse("010189 1234").unwrap();
        assert!(cpr.is_checksum_exempt());
        assert_eq!(cpr.birth_date(), NaiveDate::from_ymd_opt(1989, 1, 1).unwrap());
    }

    #[test]
    fn parse_rejects_with_reason() {
        assert_eq!(Cpr::parse("horse"), Err(CprError::InvalidFormat));
        assert_eq!(Cpr::parse("cpr: 0101601234"), Err(CprError::InvalidFormat));
        assert_eq!(Cpr::parse("010160--1234"), Err(CprError::InvalidFormat));
        assert!(matches!(
            Cpr::parse("1-888799-97-8"),
            Err(CprError::InvalidDate { day: 18, month: 88, .. })
        ));
        assert!(matches!(
            Cpr::parse("010281-1234"),
            Err(CprError::ChecksumMismatch { .. })
        ));
    }
}
