//! Text encodings used when writing section text into PDF objects.
//!
//! Content streams drawn with the standard Helvetica font use
//! `WinAnsiEncoding`, a single-byte code page. Form field values use PDF
//! text strings, which are either PDFDocEncoding (written here only for the
//! characters it shares with Latin-1) or UTF-16BE prefixed with a byte order
//! mark.

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Byte substituted for characters the code page cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Maps a character to its WinAnsi code, if it has one.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encodes text as WinAnsi bytes, one byte per character.
///
/// Line breaks and tabs become spaces; anything else without a code becomes
/// [`REPLACEMENT_BYTE`]. The output always has exactly `text.chars().count()` bytes.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\r' | '\n' | '\t' => b' ',
            _ => win_ansi_byte(ch).unwrap_or(REPLACEMENT_BYTE),
        })
        .collect()
}

/// Whether `ch` has the same single-byte code in PDFDocEncoding as in Latin-1.
///
/// The C0/C1 control ranges, DEL, `0xA0` and `0xAD` differ or are undefined
/// in PDFDocEncoding; only tab, line feed and carriage return are kept.
fn pdf_doc_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        code @ (0x09 | 0x0A | 0x0D | 0x20..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF) => Some(code as u8),
        _ => None,
    }
}

/// Encodes a PDF text string.
///
/// Text whose every character reads back identically from PDFDocEncoding is
/// written as single bytes; anything else, including text whose bytes would
/// begin with the UTF-16 byte order mark (`þÿ`), is written as UTF-16BE with
/// a leading byte order mark.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    let single: Option<Vec<u8>> = text.chars().map(pdf_doc_byte).collect();
    if let Some(bytes) = single
        && !bytes.starts_with(&UTF16_BOM)
    {
        return bytes;
    }
    let mut bytes = UTF16_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Whether bytes produced by [`encode_text_string`] are UTF-16.
pub fn is_utf16_text_string(bytes: &[u8]) -> bool {
    bytes.starts_with(&UTF16_BOM)
}

/// Decodes a PDF text string written either as UTF-16BE with BOM or single bytes.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if is_utf16_text_string(bytes) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
