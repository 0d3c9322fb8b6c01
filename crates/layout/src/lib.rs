//! Text layout for drawing section text directly onto template pages.
//!
//! Layout is a pure function of the text, the available width and a width
//! measure: [`wrap_lines`] produces the lines lazily and [`TextBlock`]
//! turns them into baseline positions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Maximum line width must be positive and finite, got {0}")]
    InvalidWidth(f32),
    #[error("Font size must be positive and finite, got {0}")]
    InvalidFontSize(f32),
    #[error("Line height must be positive and finite, got {0}")]
    InvalidLineHeight(f32),
}

pub mod fonts;
pub mod text;

pub use self::fonts::{FontMetrics, HELVETICA};
pub use self::text::{PositionedLine, TextBlock, WrappedLines, position_lines, wrap_lines};
