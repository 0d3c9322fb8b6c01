//! Fixed-length, in-place overwriting of placeholder regions.
//!
//! Every patch writes exactly as many bytes as it replaces. Stream `/Length`
//! entries and the cross-reference table hold absolute byte counts and
//! offsets, so inserting or removing a single byte would corrupt the file.

use crate::ComposerError;
use careform_types::encode_win_ansi;

const SPACE: u8 = b' ';

/// Encodes section text for placement inside a PDF literal string.
///
/// The text is mapped to WinAnsi bytes and the string delimiters `(`, `)`
/// and `\` are backslash-escaped, so the result may be longer than the text.
pub fn encode_replacement(text: &str) -> Vec<u8> {
    let raw = encode_win_ansi(text);
    let mut escaped = Vec::with_capacity(raw.len());
    for byte in raw {
        if matches!(byte, b'(' | b')' | b'\\') {
            escaped.push(b'\\');
        }
        escaped.push(byte);
    }
    escaped
}

/// Replacement bytes fitted to a region length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fitted {
    pub bytes: Vec<u8>,
    /// Length of the replacement before fitting.
    pub encoded_len: usize,
    /// Replacement bytes kept, before space padding.
    pub kept_len: usize,
}

impl Fitted {
    pub fn truncated(&self) -> bool {
        self.kept_len < self.encoded_len
    }
}

/// Pads `encoded` with spaces or truncates it to exactly `len` bytes.
///
/// Truncation never separates a backslash from the byte it escapes; if the
/// cut would land inside an escape pair the whole pair is dropped and the
/// gap padded.
pub fn fit_replacement(encoded: &[u8], len: usize) -> Fitted {
    let kept_len = if encoded.len() <= len {
        encoded.len()
    } else {
        let mut cut = 0;
        while cut < len {
            let step = if encoded[cut] == b'\\' { 2 } else { 1 };
            if cut + step > len {
                break;
            }
            cut += step;
        }
        cut
    };

    let mut bytes = Vec::with_capacity(len);
    bytes.extend_from_slice(&encoded[..kept_len]);
    bytes.resize(len, SPACE);

    Fitted {
        bytes,
        encoded_len: encoded.len(),
        kept_len,
    }
}

/// Overwrites `buffer[offset..offset + region_len]` with the fitted replacement.
///
/// The buffer length never changes. Returns the fitting details so the
/// caller can surface truncation.
pub fn substitute(
    buffer: &mut [u8],
    offset: usize,
    region_len: usize,
    replacement: &[u8],
) -> Result<Fitted, ComposerError> {
    let end = offset
        .checked_add(region_len)
        .filter(|end| *end <= buffer.len())
        .ok_or(ComposerError::OutOfBounds {
            offset,
            end: offset.saturating_add(region_len),
            len: buffer.len(),
        })?;

    let fitted = fit_replacement(replacement, region_len);
    buffer[offset..end].copy_from_slice(&fitted.bytes);
    Ok(fitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escapes_string_delimiters() {
        assert_eq!(encode_replacement(r"a(b)c\d"), br"a\(b\)c\\d".to_vec());
    }

    #[test]
    fn replacement_one_byte_too_long_is_truncated() {
        let mut buffer = vec![b'a'; 20];
        let replacement = vec![b'x'; 21];
        let fitted = substitute(&mut buffer, 0, 20, &replacement).unwrap();

        assert!(fitted.truncated());
        assert_eq!(fitted.kept_len, 20);
        assert_eq!(fitted.encoded_len, 21);
        assert_eq!(buffer, vec![b'x'; 20]);
    }

    #[test]
    fn replacement_of_exact_length_is_not_truncated() {
        let mut buffer = vec![b'a'; 20];
        let fitted = substitute(&mut buffer, 0, 20, &[b'x'; 20]).unwrap();
        assert!(!fitted.truncated());
        assert_eq!(buffer, vec![b'x'; 20]);
    }

    #[test]
    fn empty_replacement_pads_the_whole_region() {
        let mut buffer = b"(aaaaaaaa) Tj".to_vec();
        let fitted = substitute(&mut buffer, 1, 8, b"").unwrap();
        assert!(!fitted.truncated());
        assert_eq!(&buffer, b"(        ) Tj");
    }

    #[test]
    fn short_replacement_is_space_padded() {
        let mut buffer = b"[bbbbbb]".to_vec();
        substitute(&mut buffer, 1, 6, b"hi").unwrap();
        assert_eq!(&buffer, b"[hi    ]");
    }

    #[test]
    fn truncation_keeps_escape_pairs_whole() {
        let encoded = encode_replacement("abc(");
        assert_eq!(encoded, b"abc\\(".to_vec());
        let fitted = fit_replacement(&encoded, 4);
        assert_eq!(fitted.bytes, b"abc ".to_vec());
        assert_eq!(fitted.kept_len, 3);
        assert!(fitted.truncated());
    }

    #[test]
    fn region_past_the_end_is_rejected() {
        let mut buffer = vec![0u8; 10];
        let err = substitute(&mut buffer, 8, 5, b"x").unwrap_err();
        assert!(matches!(err, ComposerError::OutOfBounds { offset: 8, end: 13, len: 10 }));
        assert_eq!(buffer, vec![0u8; 10]);
    }

    proptest! {
        #[test]
        fn substitution_never_changes_buffer_length(
            prefix in prop::collection::vec(any::<u8>(), 0..64),
            region_len in 0usize..128,
            suffix in prop::collection::vec(any::<u8>(), 0..64),
            text in "\\PC{0,200}",
        ) {
            let mut buffer = prefix.clone();
            buffer.extend(std::iter::repeat_n(b'a', region_len));
            buffer.extend_from_slice(&suffix);
            let original_len = buffer.len();

            let fitted = substitute(&mut buffer, prefix.len(), region_len, &encode_replacement(&text)).unwrap();

            prop_assert_eq!(buffer.len(), original_len);
            prop_assert_eq!(&buffer[..prefix.len()], &prefix[..]);
            prop_assert_eq!(&buffer[prefix.len() + region_len..], &suffix[..]);
            prop_assert!(fitted.kept_len <= region_len);
        }
    }
}
