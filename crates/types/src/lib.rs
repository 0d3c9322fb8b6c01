pub mod color;
pub mod encoding;
pub mod geometry;
pub mod section;

pub use color::Color;
pub use encoding::{
    REPLACEMENT_BYTE, decode_text_string, encode_text_string, encode_win_ansi, is_utf16_text_string,
    win_ansi_byte,
};
pub use geometry::{Point, Rect, Size};
pub use section::{MAX_SECTION_CHARS, Section, SectionTexts};
