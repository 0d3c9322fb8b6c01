//! Character metrics for the standard Type 1 fonts the annotation path draws with.
//!
//! Standard 14 fonts are never embedded, so their advance widths come from
//! the published AFM files rather than from font data.

/// Advance widths in 1/1000 em for a non-embedded font.
#[derive(Debug)]
pub struct FontMetrics {
    /// PostScript name, written as `/BaseFont`.
    pub base_font: &'static str,
    ascii_widths: [u16; 95],
    default_width: u16,
}

/// Helvetica AFM widths for printable ASCII (0x20..=0x7E).
pub static HELVETICA: FontMetrics = FontMetrics {
    base_font: "Helvetica",
    ascii_widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
        278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
        278, 278, 278, 469, 556, 333, // '['..'`'
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
        334, 260, 334, 584, // '{'..'~'
    ],
    default_width: 556,
};

impl FontMetrics {
    /// Advance width of one character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        match ch {
            ' '..='~' => self.ascii_widths[ch as usize - 0x20],
            '\u{2018}' | '\u{2019}' | '\u{201A}' => 222,
            '\u{201C}' | '\u{201D}' | '\u{201E}' => 333,
            '\u{2022}' => 350,
            '\u{2026}' | '\u{2014}' | '\u{2030}' => 1000,
            '\u{00A0}' => 278,
            _ => self.default_width,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * font_size / 1000.0
    }

    /// A width measure bound to one font size, suitable for [`crate::wrap_lines`].
    pub fn measure_at(&self, font_size: f32) -> impl Fn(&str) -> f32 + Clone + '_ {
        move |text| self.text_width(text, font_size)
    }
}
