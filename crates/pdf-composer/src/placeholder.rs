use crate::ComposerError;
use careform_types::Section;
use serde::{Deserialize, Serialize};

/// Where a section's text lives in the raw bytes of a template.
///
/// The token is searched for verbatim. The patched region starts at the
/// match and spans `fixed_length` bytes; when the token is a short marker,
/// the bytes between the end of the token and the end of the region must be
/// spaces in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaceholderDef", into = "PlaceholderDef")]
pub struct PlaceholderSpec {
    section: Section,
    token: Vec<u8>,
    fixed_length: usize,
}

impl PlaceholderSpec {
    pub fn new(
        section: Section,
        token: impl Into<Vec<u8>>,
        fixed_length: usize,
    ) -> Result<Self, ComposerError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ComposerError::InvalidPlaceholder {
                section,
                reason: "token is empty".to_string(),
            });
        }
        if token.len() > fixed_length {
            return Err(ComposerError::InvalidPlaceholder {
                section,
                reason: format!(
                    "token of {} bytes is longer than its fixed length of {}",
                    token.len(),
                    fixed_length
                ),
            });
        }
        Ok(Self {
            section,
            token,
            fixed_length,
        })
    }

    /// A token made of `length` repetitions of one filler byte.
    pub fn repeated(section: Section, fill: u8, length: usize) -> Result<Self, ComposerError> {
        Self::new(section, vec![fill; length], length)
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn token(&self) -> &[u8] {
        &self.token
    }

    pub fn fixed_length(&self) -> usize {
        self.fixed_length
    }

    /// The filler byte, when the token is one byte repeated.
    pub fn fill_byte(&self) -> Option<u8> {
        let first = *self.token.first()?;
        self.token.iter().all(|b| *b == first).then_some(first)
    }

    /// Number of space bytes expected after the token inside the region.
    pub fn padding_len(&self) -> usize {
        self.fixed_length - self.token.len()
    }
}

/// Serialized form of a [`PlaceholderSpec`].
///
/// Either `token` or `fill` + `repeat` describes the token. `fixed_length`
/// defaults to the token length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderDef {
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_length: Option<usize>,
}

impl TryFrom<PlaceholderDef> for PlaceholderSpec {
    type Error = ComposerError;

    fn try_from(def: PlaceholderDef) -> Result<Self, Self::Error> {
        let section = def.section;
        let invalid = |reason: &str| ComposerError::InvalidPlaceholder {
            section,
            reason: reason.to_string(),
        };
        let token = match (def.token, def.fill, def.repeat) {
            (Some(token), None, None) => token.into_bytes(),
            (None, Some(fill), Some(repeat)) => {
                if !fill.is_ascii() {
                    return Err(invalid("fill must be an ASCII character"));
                }
                vec![fill as u8; repeat]
            }
            _ => return Err(invalid("give either `token` or both `fill` and `repeat`")),
        };
        let fixed_length = def.fixed_length.unwrap_or(token.len());
        PlaceholderSpec::new(section, token, fixed_length)
    }
}

impl From<PlaceholderSpec> for PlaceholderDef {
    fn from(spec: PlaceholderSpec) -> Self {
        let uniform = spec
            .token
            .first()
            .filter(|first| first.is_ascii() && spec.token.iter().all(|b| b == *first));
        let (token, fill, repeat) = match uniform {
            Some(&fill) => (None, Some(char::from(fill)), Some(spec.token.len())),
            None => (
                Some(String::from_utf8_lossy(&spec.token).into_owned()),
                None,
                None,
            ),
        };
        let fixed_length = (spec.fixed_length != spec.token.len()).then_some(spec.fixed_length);
        PlaceholderDef {
            section: spec.section,
            token,
            fill,
            repeat,
            fixed_length,
        }
    }
}
