use thiserror::Error;

/// Reason a candidate was rejected as a CPR number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CprError {
    #[error("not a 10-digit token")]
    InvalidFormat,

    #[error("no such birth date: {day:02}-{month:02}-{year}")]
    InvalidDate { day: u32, month: u32, year: i32 },

    #[error("modulo 11 check failed (weighted sum {sum})")]
    ChecksumMismatch { sum: u32 },
}

pub type Result<T> = std::result::Result<T, CprError>;
