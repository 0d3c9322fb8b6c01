//! The three merge strategies as one tagged enum.

use crate::merge::{MergeOutput, MergeReport};
use crate::normalize::ValidatedSections;
use crate::profile::{FieldBinding, StrategyKind, TemplateProfile};
use crate::MergeError;
use careform_pdf_composer::{
    Expectations, MissingPlaceholderPolicy, PlaceholderPatcher, PlaceholderSpec,
    validate_structure,
};
use careform_render_lopdf::{AnnotationRegion, PageAnnotator, fill_fields};
use lopdf::Document;

/// A strategy bound to the profile data it needs.
#[derive(Debug, Clone, Copy)]
pub enum MergeStrategy<'p> {
    FieldFill(&'p [FieldBinding]),
    ByteSubstitute {
        placeholders: &'p [PlaceholderSpec],
        policy: MissingPlaceholderPolicy,
    },
    AnnotateLayout(&'p [AnnotationRegion]),
}

impl TemplateProfile {
    /// Binds the profile's selected strategy to its declarations.
    pub fn strategy(&self) -> Result<MergeStrategy<'_>, MergeError> {
        Ok(match self.strategy_kind()? {
            StrategyKind::FieldFill => MergeStrategy::FieldFill(&self.fields),
            StrategyKind::ByteSubstitute => MergeStrategy::ByteSubstitute {
                placeholders: &self.placeholders,
                policy: self.missing_placeholders,
            },
            StrategyKind::AnnotateLayout => MergeStrategy::AnnotateLayout(&self.annotations),
        })
    }
}

fn save(mut doc: Document) -> Result<Vec<u8>, MergeError> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| MergeError::Serialize(e.to_string()))?;
    Ok(bytes)
}

impl MergeStrategy<'_> {
    pub fn kind(&self) -> StrategyKind {
        match self {
            MergeStrategy::FieldFill(_) => StrategyKind::FieldFill,
            MergeStrategy::ByteSubstitute { .. } => StrategyKind::ByteSubstitute,
            MergeStrategy::AnnotateLayout(_) => StrategyKind::AnnotateLayout,
        }
    }

    /// Merges validated sections into a copy of `template`.
    ///
    /// `template` itself is never modified. The output is re-parsed before it
    /// is returned and must have the template's page count; byte substitution
    /// must also leave the length unchanged.
    pub fn apply(
        &self,
        template: &[u8],
        sections: &ValidatedSections,
    ) -> Result<MergeOutput, MergeError> {
        let doc = Document::load_mem(template).map_err(MergeError::TemplateParse)?;
        let page_count = doc.get_pages().len();
        let mut report = MergeReport::default();

        let (bytes, byte_len) = match *self {
            MergeStrategy::FieldFill(bindings) => {
                let values = bindings
                    .iter()
                    .map(|b| (b.field.as_str(), sections.get(b.section)));
                let doc = fill_fields(doc, values)?;
                report.filled = bindings.iter().map(|b| b.section).collect();
                (save(doc)?, None)
            }
            MergeStrategy::ByteSubstitute {
                placeholders,
                policy,
            } => {
                drop(doc);
                let mut buffer = template.to_vec();
                let patch = PlaceholderPatcher::new(placeholders)
                    .with_policy(policy)
                    .apply(&mut buffer, sections.texts())
                    .map_err(MergeError::Substitution)?;
                report.filled = patch.patched.iter().map(|(s, _)| *s).collect();
                report.filled.sort_unstable();
                report.filled.dedup();
                report.truncations = patch.truncations;
                report.missing = patch.missing;
                (buffer, Some(template.len()))
            }
            MergeStrategy::AnnotateLayout(regions) => {
                let (doc, annotation) =
                    PageAnnotator::new(regions).annotate(doc, sections.texts())?;
                report.filled = annotation.lines.iter().map(|(s, _)| *s).collect();
                report.lines = annotation.lines;
                report.overflowed = annotation.overflowed;
                (save(doc)?, None)
            }
        };

        validate_structure(
            &bytes,
            Expectations {
                page_count,
                byte_len,
            },
        )
        .map_err(MergeError::Corruption)?;

        Ok(MergeOutput {
            bytes,
            strategy: self.kind(),
            page_count,
            report,
        })
    }
}
