//! Drawing state shared by the page drawers of one render call.

use crate::assets::Assets;
use crate::canvas::{circle_path, rounded_rect_path, Canvas, Stroke};
use crate::config::ReportConfig;
use crate::decorator;
use crate::error::ReportError;
use crate::fonts::{FontSet, FontWeight};
use crate::images::ImageKind;
use crate::layout::{PageGeometry, Point, Rect};
use crate::theme::Color;

/// Face, size and colour of a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(weight: FontWeight, size: f64, color: Color) -> Self {
        Self {
            weight,
            size,
            color,
        }
    }
}

/// Horizontal anchoring of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A canvas together with the assets, configuration and geometry of one report.
pub struct RenderContext<'a> {
    canvas: &'a mut dyn Canvas,
    assets: &'a Assets,
    config: &'a ReportConfig,
    geometry: PageGeometry,
    year: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        canvas: &'a mut dyn Canvas,
        assets: &'a Assets,
        config: &'a ReportConfig,
        geometry: PageGeometry,
        year: &'a str,
    ) -> Self {
        Self {
            canvas,
            assets,
            config,
            geometry,
            year,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &'a ReportConfig {
        self.config
    }

    /// Year printed in the header, footer and cover.
    pub fn year(&self) -> &'a str {
        self.year
    }

    pub fn fonts(&self) -> &'a FontSet {
        &self.assets.fonts
    }

    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    /// Starts an undecorated page.
    pub fn begin_page(&mut self) -> Result<(), ReportError> {
        self.canvas.begin_page(&self.geometry)
    }

    /// Starts a content page and draws its report header.
    ///
    /// Returns the top of the area left below the header.
    pub fn begin_content_page(&mut self) -> Result<f64, ReportError> {
        self.begin_page()?;
        decorator::draw_report_header(self);
        Ok(self.geometry.body_top())
    }

    /// Finalises a content page by drawing its footer.
    pub fn finish_content_page(&mut self) {
        decorator::draw_footer(self);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_round_rect(rect, 0.0, color);
    }

    pub fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.canvas
            .fill_path(&rounded_rect_path(rect, radius), color);
    }

    pub fn stroke_round_rect(&mut self, rect: Rect, radius: f64, stroke: Stroke) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.canvas
            .stroke_path(&rounded_rect_path(rect, radius), true, stroke);
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.canvas.stroke_path(&[from, to], false, stroke);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.canvas.fill_path(&circle_path(center, radius), color);
    }

    /// Draws `text` anchored at `x` according to `align`, on `baseline`.
    pub fn text(&mut self, text: &str, x: f64, baseline: f64, align: Align, style: TextStyle) {
        let width = self.text_width(text, style);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.canvas.draw_text(
            text,
            Point::new(left, baseline),
            style.weight,
            style.size,
            style.color,
        );
    }

    /// Like [`RenderContext::text`], shortening `text` to `max_width` first.
    pub fn fitted_text(
        &mut self,
        text: &str,
        x: f64,
        baseline: f64,
        max_width: f64,
        align: Align,
        style: TextStyle,
    ) {
        let fonts = self.fonts();
        let fitted = fonts.fit_text(text, style.weight, style.size, max_width);
        self.text(&fitted, x, baseline, align, style);
    }

    pub fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        self.fonts().text_width(text, style.weight, style.size)
    }

    /// Baseline that vertically centres a line of `style` text in `rect`.
    pub fn centered_baseline(rect: Rect, style: TextStyle) -> f64 {
        rect.center().y - style.size * 0.35
    }

    /// Places the image of `kind` inside `frame`, keeping its aspect ratio.
    ///
    /// Returns `false` and draws nothing when the image was not loaded.
    pub fn image(&mut self, kind: ImageKind, frame: Rect) -> bool {
        match self.assets.images.get(kind) {
            Some(image) => {
                let fitted = image.fit_within(frame);
                self.canvas.draw_image(image, fitted);
                true
            }
            None => false,
        }
    }
}
