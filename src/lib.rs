//! CPR Sniffer Native Rust Extension
//!
//! Finds and validates Danish CPR numbers in free text using Rust's regex crate.
//! A CPR number is a birth date (`DDMMYY`) plus four digits, checked against the
//! calendar and a modulo 11 control sum with a fixed list of exempt dates.
//! With the `python` feature the crate builds as a Python extension module that
//! releases the GIL while scanning.

pub mod cpr;
pub mod error;
pub mod matcher;
pub mod sniffer;
pub mod validators;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logger;

pub use cpr::Cpr;
pub use error::{CprError, Result};
pub use matcher::{CprMatcher, RawMatch};
pub use sniffer::{
    contains_cpr, contains_cpr_batch, extract_cpr, extract_cpr_batch, find_cpr, is_cpr, parse_cpr,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// CPR sniffer native extension module
#[cfg(feature = "python")]
#[pymodule]
fn cpr_sniffer(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CprMatcher>()?;
    m.add_class::<RawMatch>()?;
    m.add_function(wrap_pyfunction!(py_contains_cpr, m)?)?;
    m.add_function(wrap_pyfunction!(py_extract_cpr, m)?)?;
    m.add_function(wrap_pyfunction!(py_is_cpr, m)?)?;
    m.add_function(wrap_pyfunction!(validate_mod11, m)?)?;
    m.add_function(wrap_pyfunction!(is_native_available, m)?)?;
    Ok(())
}

/// Check if text contains a valid CPR number
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "contains_cpr")]
fn py_contains_cpr(py: Python<'_>, text: &str) -> bool {
    py.allow_threads(|| sniffer::contains_cpr(text))
}

/// Extract valid CPR numbers as written in the text
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "extract_cpr")]
fn py_extract_cpr(py: Python<'_>, text: &str) -> Vec<String> {
    py.allow_threads(|| {
        sniffer::extract_cpr(text)
            .into_iter()
            .map(str::to_string)
            .collect()
    })
}

/// Validate a single CPR token
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "is_cpr")]
fn py_is_cpr(candidate: &str) -> bool {
    sniffer::is_cpr(candidate)
}

/// Modulo 11 check of a normalized 10-digit number (exempt dates pass)
#[cfg(feature = "python")]
#[pyfunction]
fn validate_mod11(number: &str) -> bool {
    validators::mod11(number)
}

/// Check if native extension is working
#[cfg(feature = "python")]
#[pyfunction]
fn is_native_available() -> bool {
    true
}
