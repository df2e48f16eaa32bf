//! Candidate scanning
//!
//! The regex crate has no lookaround, so the digit boundary around each hit
//! is checked by hand. A hit with a digit on either side is dropped and the
//! search restarts one byte later, which yields the same matches as
//! `(?<!\d)\d(?:[ -]?\d){9}(?!\d)` would.

use once_cell::sync::Lazy;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use rayon::prelude::*;
use regex::{Match, Regex};
use tracing::{debug, trace};

use crate::validators;

/// Ten digits, a single space or dash allowed between any two of them
static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9](?:[ -]?[0-9]){9}").expect("candidate pattern compiles"));

/// The same shape, spanning the whole input
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9](?:[ -]?[0-9]){9}$").expect("token pattern compiles"));

/// Whether `candidate` is exactly one CPR-shaped token with nothing around it
pub fn is_token(candidate: &str) -> bool {
    TOKEN.is_match(candidate)
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before = start == 0 || !bytes[start - 1].is_ascii_digit();
    let after = end == bytes.len() || !bytes[end].is_ascii_digit();
    before && after
}

/// Iterator over digit-bounded candidates in a text, left to right
pub struct Candidates<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Candidates<'t> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        while self.pos <= self.text.len() {
            let m = CANDIDATE.find_at(self.text, self.pos)?;
            if is_bounded(self.text, m.start(), m.end()) {
                self.pos = m.end();
                return Some(m);
            }
            // Hits start on an ASCII digit, so one byte on is a char boundary
            self.pos = m.start() + 1;
        }
        None
    }
}

/// Scan `text` for syntactic candidates, valid or not
pub fn candidates(text: &str) -> Candidates<'_> {
    Candidates { text, pos: 0 }
}

/// A located match
#[cfg_attr(feature = "python", pyclass(get_all, frozen))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Matched text as it appears in the input, separators included
    pub text: String,
    /// Byte offset of the first digit
    pub start: usize,
    /// Byte offset just past the last digit
    pub end: usize,
}

impl From<Match<'_>> for RawMatch {
    fn from(m: Match<'_>) -> Self {
        RawMatch {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        }
    }
}

/// Keep only candidates that pass validation, logging the rest
pub(crate) fn accepted(text: &str) -> impl Iterator<Item = Match<'_>> {
    candidates(text).filter(|m| match validators::check(&validators::normalize(m.as_str())) {
        Ok(_) => true,
        Err(reason) => {
            trace!(start = m.start(), end = m.end(), %reason, "rejected candidate");
            false
        }
    })
}

/// Stateless CPR matcher
#[cfg_attr(feature = "python", pyclass(frozen))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CprMatcher;

impl CprMatcher {
    pub fn new() -> Self {
        CprMatcher
    }

    /// Every digit-bounded candidate, including ones that fail validation
    pub fn find_candidates(&self, text: &str) -> Vec<RawMatch> {
        candidates(text).map(RawMatch::from).collect()
    }

    /// Candidates that pass date and checksum validation
    pub fn find_all(&self, text: &str) -> Vec<RawMatch> {
        let found: Vec<RawMatch> = accepted(text).map(RawMatch::from).collect();
        debug!(bytes = text.len(), matches = found.len(), "scanned text");
        found
    }

    /// Scan many texts in parallel; results keep input order
    pub fn find_batch<S>(&self, texts: &[S]) -> Vec<Vec<RawMatch>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(texts = texts.len(), "scanning batch");
        texts
            .par_iter()
            .map(|text| self.find_all(text.as_ref()))
            .collect()
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl CprMatcher {
    #[new]
    fn py_new() -> Self {
        CprMatcher
    }

    /// Find valid CPR numbers (releases the GIL)
    #[pyo3(name = "find_all")]
    fn py_find_all(&self, py: Python<'_>, text: &str) -> Vec<RawMatch> {
        py.allow_threads(|| self.find_all(text))
    }

    /// Find CPR-shaped candidates without validating them
    #[pyo3(name = "find_candidates")]
    fn py_find_candidates(&self, py: Python<'_>, text: &str) -> Vec<RawMatch> {
        py.allow_threads(|| self.find_candidates(text))
    }

    /// Scan a list of texts in parallel
    #[pyo3(name = "find_batch")]
    fn py_find_batch(&self, py: Python<'_>, texts: Vec<String>) -> Vec<Vec<RawMatch>> {
        py.allow_threads(|| self.find_batch(&texts))
    }
}
