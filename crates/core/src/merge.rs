//! The top-level merge: fetch the template, run the profile's strategy,
//! hand back validated bytes.

use crate::normalize::{NormalizerConfig, ValidatedSections, ValidationError, validate_sections};
use crate::profile::{StrategyKind, TemplateProfile};
use crate::MergeError;
use careform_pdf_composer::Truncation;
use careform_traits::{SharedTemplateData, TemplateSource};
use careform_types::{Section, SectionTexts};
use serde::Serialize;
use std::time::Instant;

/// File name offered for the merged document.
pub const OUTPUT_FILENAME: &str = "my-advanced-care-plan.pdf";

pub const CONTENT_TYPE: &str = "application/pdf";

/// What a merge did besides producing bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    /// Sections written into the template.
    pub filled: Vec<Section>,
    /// Byte-substitution regions that were too small for their text.
    pub truncations: Vec<Truncation>,
    /// Sections whose placeholder was absent and left untouched.
    pub missing: Vec<Section>,
    /// Lines drawn per section by the annotation strategy.
    pub lines: Vec<(Section, usize)>,
    /// Sections whose annotated text ran off the page.
    pub overflowed: Vec<Section>,
}

impl MergeReport {
    /// True when every section landed in the document in full.
    pub fn is_lossless(&self) -> bool {
        self.truncations.is_empty() && self.missing.is_empty() && self.overflowed.is_empty()
    }

    /// Sections that reached the document only in part, in section order.
    pub fn truncated_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| {
                self.truncations.iter().any(|t| t.section == *section)
                    || self.overflowed.contains(section)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub bytes: Vec<u8>,
    pub strategy: StrategyKind,
    pub page_count: usize,
    pub report: MergeReport,
}

/// Merges sections into an in-memory template.
pub fn merge(
    template: &[u8],
    profile: &TemplateProfile,
    sections: &ValidatedSections,
) -> Result<MergeOutput, MergeError> {
    let strategy = profile.strategy()?;
    let started = Instant::now();
    let output = strategy.apply(template, sections)?;
    log::info!(
        "Merged '{}' with {} in {:.2?}: {} pages, {} bytes",
        profile.name,
        output.strategy,
        started.elapsed(),
        output.page_count,
        output.bytes.len()
    );
    if !output.report.is_lossless() {
        log::warn!("Merge of '{}' was lossy: {:?}", profile.name, output.report);
    }
    Ok(output)
}

/// Loads the profile's template from `source`, then merges into a copy of it.
pub fn merge_from_source(
    source: &dyn TemplateSource,
    profile: &TemplateProfile,
    sections: &ValidatedSections,
) -> Result<MergeOutput, MergeError> {
    let template = load_template(source, profile)?;
    merge(&template, profile, sections)
}

fn load_template(
    source: &dyn TemplateSource,
    profile: &TemplateProfile,
) -> Result<SharedTemplateData, MergeError> {
    log::debug!(
        "Loading template '{}' from {} source",
        profile.template,
        source.name()
    );
    source
        .load(&profile.template)
        .map_err(|source| MergeError::TemplateFetch {
            template: profile.template.clone(),
            source,
        })
}

/// A template source paired with the validation rules applied to its input.
#[derive(Debug)]
pub struct MergeEngine<S> {
    source: S,
    normalizer: NormalizerConfig,
}

impl<S: TemplateSource> MergeEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            normalizer: NormalizerConfig::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn validate(&self, texts: &SectionTexts) -> Result<ValidatedSections, ValidationError> {
        validate_sections(texts, &self.normalizer)
    }

    /// Fetches the profile's template without merging; fails like a merge would.
    pub fn template(&self, profile: &TemplateProfile) -> Result<SharedTemplateData, MergeError> {
        load_template(&self.source, profile)
    }

    pub fn merge_from_source(
        &self,
        profile: &TemplateProfile,
        sections: &ValidatedSections,
    ) -> Result<MergeOutput, MergeError> {
        merge_from_source(&self.source, profile, sections)
    }
}
