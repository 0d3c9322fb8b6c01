//! Checks a template against a profile before it is used for merging.

use crate::CareformError;
use careform_core::{Section, TemplateProfile};
use careform_pdf_composer::{locate, pages_containing};
use lopdf::Document;
use serde::Serialize;
use std::path::Path;

/// Where one placeholder shows up in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderSighting {
    pub section: Section,
    /// Offsets of the token in the raw file bytes. Only these can be patched.
    pub raw_offsets: Vec<usize>,
    /// Pages whose decoded content contains the token.
    pub pages: Vec<u32>,
}

impl PlaceholderSighting {
    /// The token is on a page but hidden inside a compressed stream.
    pub fn is_compressed_only(&self) -> bool {
        self.raw_offsets.is_empty() && !self.pages.is_empty()
    }
}

/// Reports, for each placeholder of `profile`, where it occurs in `template`.
pub fn inspect_placeholders(
    template: &[u8],
    profile: &TemplateProfile,
) -> Result<Vec<PlaceholderSighting>, CareformError> {
    let doc = Document::load_mem(template)?;
    Ok(profile
        .placeholders
        .iter()
        .map(|spec| PlaceholderSighting {
            section: spec.section(),
            raw_offsets: locate(template, spec.token()).collect(),
            pages: pages_containing(&doc, spec.token()),
        })
        .collect())
}

/// Resolves a profile argument: a built-in name, or a path to a JSON profile.
pub fn load_profile(name_or_path: &str) -> Result<TemplateProfile, CareformError> {
    let path = Path::new(name_or_path);
    if path.extension().is_some_and(|ext| ext == "json") {
        let json = std::fs::read_to_string(path)?;
        return Ok(TemplateProfile::from_json(&json)?);
    }
    Ok(TemplateProfile::builtin(name_or_path)?)
}
