//! Exact byte-pattern search over raw document bytes.

use lopdf::Document;
use memchr::memmem::Finder;

/// Ascending, non-overlapping offsets of a token in a buffer.
///
/// The search resumes after the end of each match. The sequence is lazy and
/// finite; cloning it gives an independent cursor over the same buffer.
#[derive(Clone)]
pub struct Occurrences<'a> {
    haystack: &'a [u8],
    finder: Finder<'a>,
    position: usize,
    exhausted: bool,
}

/// Finds every non-overlapping occurrence of `token` in `buffer`.
///
/// An empty token never matches. Finding nothing is not an error; callers
/// decide whether an empty result is fatal.
pub fn locate<'a>(buffer: &'a [u8], token: &'a [u8]) -> Occurrences<'a> {
    Occurrences {
        haystack: buffer,
        finder: Finder::new(token),
        position: 0,
        exhausted: token.is_empty(),
    }
}

impl Iterator for Occurrences<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        match self.finder.find(&self.haystack[self.position..]) {
            Some(relative) => {
                let offset = self.position + relative;
                self.position = offset + self.finder.needle().len();
                Some(offset)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Occurrences<'_> {}

/// Page numbers (1-based) whose decoded content streams contain `token`.
///
/// Unlike [`locate`], this sees through stream compression, so it can tell a
/// template that carries a placeholder in a compressed stream (which cannot
/// be patched in place) from one that lacks the placeholder entirely.
pub fn pages_containing(doc: &Document, token: &[u8]) -> Vec<u32> {
    if token.is_empty() {
        return Vec::new();
    }
    let finder = Finder::new(token);
    doc.get_pages()
        .into_iter()
        .filter(|(_, page_id)| {
            doc.get_page_contents(*page_id).into_iter().any(|content_id| {
                doc.get_object(content_id)
                    .and_then(|obj| obj.as_stream())
                    .map(|stream| {
                        let content = stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone());
                        finder.find(&content).is_some()
                    })
                    .unwrap_or(false)
            })
        })
        .map(|(page_number, _)| page_number)
        .collect()
}
