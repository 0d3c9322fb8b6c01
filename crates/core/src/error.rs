//! The consolidated error of a merge.

use careform_pdf_composer::ComposerError;
use careform_render_lopdf::RenderError;
use careform_traits::TemplateError;
use thiserror::Error;

use crate::profile::StrategyKind;

/// A failed merge, reported once with its underlying cause.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Failed to fetch template '{template}'")]
    TemplateFetch {
        template: String,
        #[source]
        source: TemplateError,
    },

    #[error("Template profile '{0}' declares no fields, placeholders or annotations")]
    NoStrategy(String),

    #[error("Template profile '{profile}' selects {strategy} but declares nothing for it")]
    StrategyUnavailable {
        profile: String,
        strategy: StrategyKind,
    },

    #[error("Template could not be parsed")]
    TemplateParse(#[source] lopdf::Error),

    #[error("Byte substitution failed")]
    Substitution(#[source] ComposerError),

    #[error("Merged document failed validation")]
    Corruption(#[source] ComposerError),

    #[error("Rendering into the template failed")]
    Render(#[from] RenderError),

    #[error("Failed to serialize the merged document: {0}")]
    Serialize(String),

    #[error("Unknown template profile '{0}'")]
    UnknownProfile(String),

    #[error("Invalid template profile: {0}")]
    InvalidProfile(String),
}

impl MergeError {
    /// The full cause chain joined into one line.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            current = cause.source();
        }
        message
    }
}
