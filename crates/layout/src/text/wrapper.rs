use crate::{FontMetrics, LayoutError};
use careform_types::Point;
use std::iter::FusedIterator;
use std::str::SplitWhitespace;

/// Lazily wraps text into lines no wider than `max_width`.
///
/// Words are separated by any whitespace and rejoined with single spaces.
/// A word that is wider than `max_width` on its own is emitted as an
/// overflowing line; words are never split. A clone continues independently
/// from the same position, so a fresh call replays the whole text.
#[derive(Clone)]
pub struct WrappedLines<'a, M> {
    words: SplitWhitespace<'a>,
    pending: Option<&'a str>,
    max_width: f32,
    measure: M,
}

/// Greedy word wrap of `text` using `measure` to size candidate lines.
///
/// Empty or whitespace-only text produces no lines.
pub fn wrap_lines<M>(text: &str, max_width: f32, measure: M) -> WrappedLines<'_, M>
where
    M: Fn(&str) -> f32,
{
    WrappedLines {
        words: text.split_whitespace(),
        pending: None,
        max_width,
        measure,
    }
}

impl<M> Iterator for WrappedLines<'_, M>
where
    M: Fn(&str) -> f32,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.pending.take().or_else(|| self.words.next())?;
        let mut line = String::from(first);

        for word in self.words.by_ref() {
            let accepted_len = line.len();
            line.push(' ');
            line.push_str(word);
            if (self.measure)(&line) > self.max_width {
                line.truncate(accepted_len);
                self.pending = Some(word);
                break;
            }
        }

        Some(line)
    }
}

impl<M> FusedIterator for WrappedLines<'_, M> where M: Fn(&str) -> f32 {}

/// A wrapped line with its baseline origin in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Places line `i` at `(origin.x, origin.y - i * line_height)`.
pub fn position_lines<I>(
    lines: I,
    origin: Point,
    line_height: f32,
) -> impl Iterator<Item = PositionedLine>
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .enumerate()
        .map(move |(i, text)| PositionedLine {
            text,
            x: origin.x,
            y: origin.y - i as f32 * line_height,
        })
}

/// A rectangular text area: first baseline, wrap width and type size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlock {
    origin: Point,
    max_width: f32,
    font_size: f32,
    line_height: f32,
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl TextBlock {
    pub fn new(
        origin: Point,
        max_width: f32,
        font_size: f32,
        line_height: f32,
    ) -> Result<Self, LayoutError> {
        if !positive(max_width) {
            return Err(LayoutError::InvalidWidth(max_width));
        }
        if !positive(font_size) {
            return Err(LayoutError::InvalidFontSize(font_size));
        }
        if !positive(line_height) {
            return Err(LayoutError::InvalidLineHeight(line_height));
        }
        Ok(Self {
            origin,
            max_width,
            font_size,
            line_height,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Wraps and positions `text`. Calling it again yields the same lines.
    pub fn layout<'a>(
        &self,
        text: &'a str,
        metrics: &'a FontMetrics,
    ) -> impl Iterator<Item = PositionedLine> + 'a {
        let lines = wrap_lines(text, self.max_width, metrics.measure_at(self.font_size));
        position_lines(lines, self.origin, self.line_height)
    }

    /// Vertical space taken by `line_count` lines.
    pub fn extent(&self, line_count: usize) -> f32 {
        line_count as f32 * self.line_height
    }
}
