//! Drawing surfaces.
//!
//! Page drawers talk to a [`Canvas`]: a page-oriented sink for filled and
//! stroked paths, left-anchored text runs and images. [`PdfCanvas`] writes a
//! PDF document through `printpdf`; [`RecordingCanvas`] keeps the operations
//! in memory so page layout can be inspected without parsing PDF bytes.

mod pdf;
mod recording;

use std::f64::consts::PI;

use crate::error::ReportError;
use crate::fonts::FontWeight;
use crate::images::ImageAsset;
use crate::layout::{PageGeometry, Point, Rect};
use crate::theme::Color;

pub use pdf::PdfCanvas;
pub use recording::{DrawOp, RecordedPage, RecordingCanvas};

/// Outline settings for stroked paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in points.
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A page-oriented drawing surface.
pub trait Canvas {
    /// Starts a new page; following operations draw on it.
    fn begin_page(&mut self, geometry: &PageGeometry) -> Result<(), ReportError>;

    /// Number of pages begun so far.
    fn page_count(&self) -> usize;

    /// Fills the closed polygon through `points`.
    fn fill_path(&mut self, points: &[Point], color: Color);

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke);

    /// Draws `text` with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, weight: FontWeight, size: f64, color: Color);

    /// Places `image` stretched over `frame`.
    fn draw_image(&mut self, image: &ImageAsset, frame: Rect);
}

/// Segments used to approximate a quarter circle.
const ARC_SEGMENTS: usize = 6;

fn arc(center: Point, radius: f64, start: f64, points: &mut Vec<Point>) {
    for step in 0..=ARC_SEGMENTS {
        let angle = start + (PI / 2.0) * (step as f64 / ARC_SEGMENTS as f64);
        points.push(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
}

/// Outline of `rect` with corners rounded by `radius`, counter-clockwise.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> Vec<Point> {
    let radius = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    if radius <= f64::EPSILON {
        return vec![
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.y),
            Point::new(rect.right(), rect.top()),
            Point::new(rect.x, rect.top()),
        ];
    }

    let mut points = Vec::with_capacity(4 * (ARC_SEGMENTS + 1));
    arc(
        Point::new(rect.right() - radius, rect.y + radius),
        radius,
        -PI / 2.0,
        &mut points,
    );
    arc(
        Point::new(rect.right() - radius, rect.top() - radius),
        radius,
        0.0,
        &mut points,
    );
    arc(
        Point::new(rect.x + radius, rect.top() - radius),
        radius,
        PI / 2.0,
        &mut points,
    );
    arc(
        Point::new(rect.x + radius, rect.y + radius),
        radius,
        PI,
        &mut points,
    );
    points
}

/// Polygon approximating a circle.
pub fn circle_path(center: Point, radius: f64) -> Vec<Point> {
    const SEGMENTS: usize = 32;
    (0..SEGMENTS)
        .map(|step| {
            let angle = 2.0 * PI * step as f64 / SEGMENTS as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}
