//! Text-level operations: does a text hold a CPR number, and which ones

use rayon::prelude::*;
use tracing::debug;

use crate::cpr::Cpr;
use crate::error::Result;
use crate::matcher::{self, CprMatcher, RawMatch};
use crate::validators;

/// True if `text` contains at least one valid CPR number
pub fn contains_cpr(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    matcher::accepted(text).next().is_some()
}

/// All valid CPR numbers in `text`, as written, in order of appearance
pub fn extract_cpr(text: &str) -> Vec<&str> {
    let found: Vec<&str> = matcher::accepted(text).map(|m| m.as_str()).collect();
    debug!(bytes = text.len(), matches = found.len(), "extracted CPR numbers");
    found
}

/// Like [`extract_cpr`], with byte offsets
pub fn find_cpr(text: &str) -> Vec<RawMatch> {
    CprMatcher::new().find_all(text)
}

/// True if `candidate` as a whole is one valid CPR number
pub fn is_cpr(candidate: &str) -> bool {
    matcher::is_token(candidate) && validators::cpr(&validators::normalize(candidate))
}

/// Parse `candidate` as a single CPR number, reporting why it was rejected.
///
/// The whole input must be the number. Use [`find_cpr`] or [`extract_cpr`]
/// to pick numbers out of surrounding text.
pub fn parse_cpr(candidate: &str) -> Result<Cpr> {
    Cpr::parse(candidate)
}

/// [`contains_cpr`] over many texts in parallel
pub fn contains_cpr_batch<S>(texts: &[S]) -> Vec<bool>
where
    S: AsRef<str> + Sync,
{
    debug!(texts = texts.len(), "checking batch");
    texts.par_iter().map(|t| contains_cpr(t.as_ref())).collect()
}

/// [`extract_cpr`] over many texts in parallel
pub fn extract_cpr_batch<S>(texts: &[S]) -> Vec<Vec<&str>>
where
    S: AsRef<str> + Sync,
{
    debug!(texts = texts.len(), "extracting batch");
    texts.par_iter().map(|t| extract_cpr(t.as_ref())).collect()
}
