//! Template profiles: which template file a merge uses and how sections map
//! onto it.

use crate::MergeError;
use careform_pdf_composer::{MissingPlaceholderPolicy, PlaceholderSpec};
use careform_render_lopdf::{AnnotationRegion, MaskSpec};
use careform_types::{MAX_SECTION_CHARS, Section};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three ways a section can be merged into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    FieldFill,
    ByteSubstitute,
    AnnotateLayout,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::FieldFill => "field_fill",
            StrategyKind::ByteSubstitute => "byte_substitute",
            StrategyKind::AnnotateLayout => "annotate_layout",
        })
    }
}

/// Binds a section to a fully qualified AcroForm field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub section: Section,
    pub field: String,
}

/// Everything a merge needs to know about one template.
///
/// Loaded from JSON or TOML. A profile may declare more than one capability;
/// [`TemplateProfile::strategy`] picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateProfile {
    pub name: String,
    /// Template file name, resolved by a `TemplateSource`.
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<PlaceholderSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationRegion>,
    #[serde(default)]
    pub missing_placeholders: MissingPlaceholderPolicy,
}

pub const FILLABLE_TEMPLATE: &str = "myvoice-advancecareplanningguide-fillable.pdf";
pub const PLACEHOLDER_TEMPLATE: &str = "myvoice-advancecareplanningguide.pdf";
pub const ANNOTATED_TEMPLATE: &str = "myvoice-advancecareplanningguide-annotated.pdf";

impl TemplateProfile {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            strategy: None,
            fields: Vec::new(),
            placeholders: Vec::new(),
            annotations: Vec::new(),
            missing_placeholders: MissingPlaceholderPolicy::default(),
        }
    }

    /// The guide with AcroForm text fields `MyBeliefsTxt`, `MyValuesTxt` and
    /// `MyWishesTxt`.
    pub fn fillable() -> Self {
        let mut profile = Self::new("fillable", FILLABLE_TEMPLATE);
        profile.fields = [
            (Section::Beliefs, "MyBeliefsTxt"),
            (Section::Values, "MyValuesTxt"),
            (Section::Wishes, "MyWishesTxt"),
        ]
        .into_iter()
        .map(|(section, field)| FieldBinding {
            section,
            field: field.to_string(),
        })
        .collect();
        profile
    }

    /// The guide whose answer boxes hold runs of `a`, `b` and `c`, one run of
    /// [`MAX_SECTION_CHARS`] bytes per section.
    pub fn placeholders() -> Result<Self, MergeError> {
        let mut profile = Self::new("placeholders", PLACEHOLDER_TEMPLATE);
        profile.placeholders = [
            (Section::Beliefs, b'a'),
            (Section::Values, b'b'),
            (Section::Wishes, b'c'),
        ]
        .into_iter()
        .map(|(section, fill)| PlaceholderSpec::repeated(section, fill, MAX_SECTION_CHARS))
        .collect::<Result<_, _>>()
        .map_err(|e| MergeError::InvalidProfile(e.to_string()))?;
        Ok(profile)
    }

    /// The plain guide, written over on pages 33 and 34 (indices 32 and 33).
    pub fn annotated() -> Self {
        let region = |section, page, top, mask| AnnotationRegion {
            section,
            page,
            x: 70.0,
            top,
            max_width: None,
            right_margin: 50.0,
            font_size: 10.0,
            line_height: 12.0,
            mask,
        };
        let mut profile = Self::new("annotated", ANNOTATED_TEMPLATE);
        profile.annotations = vec![
            region(
                Section::Beliefs,
                32,
                250.0,
                Some(MaskSpec {
                    left: 50.0,
                    right: 50.0,
                    top: 200.0,
                    bottom: 0.0,
                    height: Some(500.0),
                }),
            ),
            region(
                Section::Values,
                33,
                250.0,
                Some(MaskSpec {
                    left: 50.0,
                    right: 50.0,
                    top: 50.0,
                    bottom: 50.0,
                    height: None,
                }),
            ),
            region(Section::Wishes, 33, 550.0, None),
        ];
        profile
    }

    /// Looks up a built-in profile by name.
    pub fn builtin(name: &str) -> Result<Self, MergeError> {
        match name {
            "fillable" => Ok(Self::fillable()),
            "placeholders" => Self::placeholders(),
            "annotated" => Ok(Self::annotated()),
            other => Err(MergeError::UnknownProfile(other.to_string())),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MergeError> {
        serde_json::from_str(json).map_err(|e| MergeError::InvalidProfile(e.to_string()))
    }

    /// Strategies this profile declares something for, in preference order.
    pub fn capabilities(&self) -> Vec<StrategyKind> {
        let mut kinds = Vec::new();
        if !self.fields.is_empty() {
            kinds.push(StrategyKind::FieldFill);
        }
        if !self.placeholders.is_empty() {
            kinds.push(StrategyKind::ByteSubstitute);
        }
        if !self.annotations.is_empty() {
            kinds.push(StrategyKind::AnnotateLayout);
        }
        kinds
    }

    /// Chooses the strategy once: the explicit override if set, otherwise the
    /// first declared capability.
    pub fn strategy_kind(&self) -> Result<StrategyKind, MergeError> {
        let capabilities = self.capabilities();
        match self.strategy {
            Some(kind) if capabilities.contains(&kind) => Ok(kind),
            Some(kind) => Err(MergeError::StrategyUnavailable {
                profile: self.name.clone(),
                strategy: kind,
            }),
            None => capabilities
                .first()
                .copied()
                .ok_or_else(|| MergeError::NoStrategy(self.name.clone())),
        }
    }
}
