//! Length validation of user-authored sections.
//!
//! Runs at the boundary closest to user input. Its only output the merge
//! pipeline accepts is [`ValidatedSections`], so an over-long section can never
//! reach a strategy.

use careform_types::{MAX_SECTION_CHARS, Section, SectionTexts};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Section length in the unit the limit is expressed in: Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// A text longer than its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overage {
    pub length: usize,
    pub limit: usize,
}

impl Overage {
    pub fn over_by(&self) -> usize {
        self.length.saturating_sub(self.limit)
    }

    pub fn in_section(self, section: Section) -> SectionOverage {
        SectionOverage {
            section,
            length: self.length,
            limit: self.limit,
        }
    }
}

/// A section longer than its limit, with enough detail for a precise message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionOverage {
    pub section: Section,
    pub length: usize,
    pub limit: usize,
}

impl SectionOverage {
    pub fn over_by(&self) -> usize {
        self.length.saturating_sub(self.limit)
    }
}

impl fmt::Display for SectionOverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} characters over the limit",
            self.section,
            self.over_by()
        )
    }
}

fn overage_lines(overages: &[SectionOverage]) -> String {
    overages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn section_list(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Input the user has to fix before anything is merged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Please shorten your input:\n\n{}\n\nMaximum allowed: {} characters per section.",
        overage_lines(.0),
        .0.first().map_or(MAX_SECTION_CHARS, |o| o.limit)
    )]
    TooLong(Vec<SectionOverage>),

    #[error("All sections are required (missing: {})", section_list(.0))]
    MissingSections(Vec<Section>),
}

/// Checks `text` against `max_chars` without altering it.
pub fn normalize(text: &str, max_chars: usize) -> Result<&str, Overage> {
    let length = char_len(text);
    if length > max_chars {
        return Err(Overage {
            length,
            limit: max_chars,
        });
    }
    Ok(text)
}

/// Like [`normalize`], then pads with trailing spaces to exactly `max_chars`.
pub fn normalize_padded(text: &str, max_chars: usize) -> Result<String, Overage> {
    let text = normalize(text, max_chars)?;
    let padding = max_chars - char_len(text);
    let mut padded = String::with_capacity(text.len() + padding);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', padding));
    Ok(padded)
}

/// Characters left before `text` reaches `max_chars`; negative when over.
pub fn remaining(text: &str, max_chars: usize) -> isize {
    max_chars as isize - char_len(text) as isize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub max_chars: usize,
    /// Reject sections that are empty after trimming whitespace.
    pub require_all_sections: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_chars: MAX_SECTION_CHARS,
            require_all_sections: false,
        }
    }
}

/// Section texts that passed [`validate_sections`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSections {
    texts: SectionTexts,
    max_chars: usize,
}

impl ValidatedSections {
    pub fn texts(&self) -> &SectionTexts {
        &self.texts
    }

    pub fn get(&self, section: Section) -> &str {
        self.texts.get(section)
    }

    /// The limit the texts were validated against.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn into_inner(self) -> SectionTexts {
        self.texts
    }
}

/// Validates all three sections, reporting every problem at once.
pub fn validate_sections(
    texts: &SectionTexts,
    config: &NormalizerConfig,
) -> Result<ValidatedSections, ValidationError> {
    if config.require_all_sections {
        let missing: Vec<Section> = texts
            .iter()
            .filter(|(_, text)| text.trim().is_empty())
            .map(|(section, _)| section)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingSections(missing));
        }
    }

    let overages: Vec<SectionOverage> = texts
        .iter()
        .filter_map(|(section, text)| {
            normalize(text, config.max_chars)
                .err()
                .map(|o| o.in_section(section))
        })
        .collect();
    if !overages.is_empty() {
        return Err(ValidationError::TooLong(overages));
    }

    Ok(ValidatedSections {
        texts: texts.clone(),
        max_chars: config.max_chars,
    })
}
