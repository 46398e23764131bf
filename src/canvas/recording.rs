use crate::error::ReportError;
use crate::fonts::FontWeight;
use crate::images::{ImageAsset, ImageKind};
use crate::layout::{PageGeometry, Point, Rect};
use crate::theme::Color;

use super::{Canvas, Stroke};

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        points: Vec<Point>,
        color: Color,
    },
    Stroke {
        points: Vec<Point>,
        closed: bool,
        stroke: Stroke,
    },
    Text {
        text: String,
        origin: Point,
        weight: FontWeight,
        size: f64,
        color: Color,
    },
    Image {
        kind: ImageKind,
        frame: Rect,
    },
}

/// Operations drawn on one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedPage {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    /// Recorded text runs equal to `text`.
    pub fn text_runs<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a DrawOp> + 'a {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }

    pub fn images(&self) -> impl Iterator<Item = ImageKind> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image { kind, .. } => Some(*kind),
            _ => None,
        })
    }
}

/// A canvas that keeps every operation in memory, page by page.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pages: Vec<RecordedPage>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&RecordedPage> {
        self.pages.get(index)
    }

    /// Zero-based indices of the pages showing `needle`.
    pub fn pages_containing(&self, needle: &str) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.contains_text(needle))
            .map(|(index, _)| index)
            .collect()
    }

    fn current(&mut self) -> &mut RecordedPage {
        if self.pages.is_empty() {
            self.pages.push(RecordedPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Canvas for RecordingCanvas {
    fn begin_page(&mut self, geometry: &PageGeometry) -> Result<(), ReportError> {
        self.pages.push(RecordedPage {
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        self.current().ops.push(DrawOp::Fill {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke) {
        self.current().ops.push(DrawOp::Stroke {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, weight: FontWeight, size: f64, color: Color) {
        self.current().ops.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            weight,
            size,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageAsset, frame: Rect) {
        self.current().ops.push(DrawOp::Image {
            kind: image.kind(),
            frame,
        });
    }
}
