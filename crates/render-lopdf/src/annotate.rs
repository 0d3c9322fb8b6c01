//! Drawing section text onto template pages.
//!
//! Each page gets one overlay content stream: opaque masks first, so they hide
//! whatever the template printed there, then the wrapped text on top.

use crate::RenderError;
use careform_layout::{FontMetrics, HELVETICA, TextBlock};
use careform_pdf_composer::{
    isolate_page_content, overlay_content, page_id_at, page_size, register_standard_font,
};
use careform_types::{Color, Point, Rect, Section, SectionTexts, Size, encode_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, StringFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource name the overlay font is registered under.
pub const OVERLAY_FONT_KEY: &str = "FCareHelv";

/// Whole numbers are written as integers to keep the content stream compact.
fn number(value: f32) -> Object {
    if value.fract() == 0.0 && value.abs() < i32::MAX as f32 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value)
    }
}

fn default_right_margin() -> f32 {
    50.0
}

fn default_font_size() -> f32 {
    10.0
}

fn default_line_height() -> f32 {
    12.0
}

/// An opaque rectangle painted before the text, in page-relative terms.
///
/// Distances are measured from the page edges so one mask fits any page size.
/// Without an explicit `height` the mask runs down to `bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskSpec {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub height: Option<f32>,
}

impl MaskSpec {
    pub fn resolve(&self, page: Size) -> Rect {
        let height = self.height.unwrap_or(page.height - self.top - self.bottom);
        Rect::new(
            self.left,
            page.height - self.top - height,
            page.width - self.left - self.right,
            height,
        )
    }
}

/// Where one section's text goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRegion {
    pub section: Section,
    /// Zero-based page index.
    pub page: usize,
    pub x: f32,
    /// Baseline of the first line, measured down from the top edge.
    pub top: f32,
    /// Fixed wrap width; otherwise the width left of `right_margin`.
    #[serde(default)]
    pub max_width: Option<f32>,
    #[serde(default = "default_right_margin")]
    pub right_margin: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default)]
    pub mask: Option<MaskSpec>,
}

impl AnnotationRegion {
    pub fn text_block(&self, page: Size) -> Result<TextBlock, RenderError> {
        let max_width = self
            .max_width
            .unwrap_or(page.width - self.x - self.right_margin);
        Ok(TextBlock::new(
            Point::new(self.x, page.height - self.top),
            max_width,
            self.font_size,
            self.line_height,
        )?)
    }
}

/// Lines drawn per section, and whether any of them fell outside the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationReport {
    pub lines: Vec<(Section, usize)>,
    pub overflowed: Vec<Section>,
}

/// Draws sections onto pages according to a list of regions.
#[derive(Debug, Clone)]
pub struct PageAnnotator<'a> {
    regions: &'a [AnnotationRegion],
    metrics: &'static FontMetrics,
    text_color: Color,
    mask_color: Color,
}

impl<'a> PageAnnotator<'a> {
    pub fn new(regions: &'a [AnnotationRegion]) -> Self {
        Self {
            regions,
            metrics: &HELVETICA,
            text_color: Color::BLACK,
            mask_color: Color::WHITE,
        }
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Draws every region, consuming and returning the document.
    ///
    /// All regions are checked against the page count before anything is drawn.
    pub fn annotate(
        &self,
        mut doc: Document,
        texts: &SectionTexts,
    ) -> Result<(Document, AnnotationReport), RenderError> {
        let page_count = doc.get_pages().len();
        let mut by_page: BTreeMap<usize, Vec<&AnnotationRegion>> = BTreeMap::new();
        for region in self.regions {
            if region.page >= page_count {
                return Err(RenderError::PageNotFound {
                    section: region.section,
                    page: region.page + 1,
                    page_count,
                });
            }
            by_page.entry(region.page).or_default().push(region);
        }

        let mut report = AnnotationReport::default();
        for (index, regions) in by_page {
            let page_id = page_id_at(&doc, index).ok_or_else(|| {
                RenderError::Other(format!("page {} has no object id", index + 1))
            })?;
            let size = page_size(&doc, page_id);

            let mut operations = Vec::new();
            for mask in regions.iter().filter_map(|r| r.mask) {
                self.push_mask(&mut operations, mask.resolve(size));
            }
            for region in &regions {
                let block = region.text_block(size)?;
                let lines: Vec<_> = block.layout(texts.get(region.section), self.metrics).collect();
                if lines.is_empty() {
                    report.lines.push((region.section, 0));
                    continue;
                }
                if lines.last().is_some_and(|l| l.y < 0.0) {
                    log::warn!(
                        "{} text runs past the bottom of page {}",
                        region.section,
                        index + 1
                    );
                    report.overflowed.push(region.section);
                }

                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(OVERLAY_FONT_KEY.as_bytes().to_vec()),
                        number(region.font_size),
                    ],
                ));
                let [r, g, b] = self.text_color.to_unit_rgb();
                operations.push(Operation::new("rg", vec![number(r), number(g), number(b)]));
                for line in &lines {
                    operations.push(Operation::new(
                        "Tm",
                        vec![
                            1.into(),
                            0.into(),
                            0.into(),
                            1.into(),
                            number(line.x),
                            number(line.y),
                        ],
                    ));
                    operations.push(Operation::new(
                        "Tj",
                        vec![Object::String(
                            encode_win_ansi(&line.text),
                            StringFormat::Literal,
                        )],
                    ));
                }
                operations.push(Operation::new("ET", vec![]));
                report.lines.push((region.section, lines.len()));
            }

            let stream = Content { operations }.encode()?;
            isolate_page_content(&mut doc, page_id)?;
            register_standard_font(&mut doc, page_id, OVERLAY_FONT_KEY, self.metrics.base_font)?;
            overlay_content(&mut doc, page_id, stream)?;
            log::debug!("Annotated page {} with {} region(s)", index + 1, regions.len());
        }

        Ok((doc, report))
    }

    fn push_mask(&self, operations: &mut Vec<Operation>, rect: Rect) {
        let [r, g, b] = self.mask_color.to_unit_rgb();
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new("rg", vec![number(r), number(g), number(b)]));
        operations.push(Operation::new(
            "re",
            vec![
                number(rect.x),
                number(rect.y),
                number(rect.width),
                number(rect.height),
            ],
        ));
        operations.push(Operation::new("f", vec![]));
        operations.push(Operation::new("Q", vec![]));
    }
}
