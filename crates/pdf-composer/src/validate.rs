//! Post-merge structural validation.

use crate::ComposerError;
use lopdf::Document;

/// What a merged document must still look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectations {
    pub page_count: usize,
    /// Exact byte length, required when the merge patched bytes in place.
    pub byte_len: Option<usize>,
}

/// Parses template bytes and returns the number of pages.
pub fn page_count(bytes: &[u8]) -> Result<usize, ComposerError> {
    Ok(Document::load_mem(bytes)?.get_pages().len())
}

/// Re-parses merged output and checks it against `expected`.
///
/// Every failure is reported as [`ComposerError::Corruption`]; a merge must
/// never hand out bytes that fail this check.
pub fn validate_structure(output: &[u8], expected: Expectations) -> Result<(), ComposerError> {
    if let Some(len) = expected.byte_len
        && output.len() != len
    {
        return Err(ComposerError::Corruption(format!(
            "output is {} bytes but the template is {} bytes",
            output.len(),
            len
        )));
    }

    let doc = Document::load_mem(output)
        .map_err(|e| ComposerError::Corruption(format!("output does not parse: {}", e)))?;

    let pages = doc.get_pages().len();
    if pages != expected.page_count {
        return Err(ComposerError::Corruption(format!(
            "output has {} pages, expected {}",
            pages, expected.page_count
        )));
    }

    log::debug!("Output validated: {} pages, {} bytes", pages, output.len());
    Ok(())
}
