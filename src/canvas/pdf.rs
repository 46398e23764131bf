use std::io::{BufWriter, Write};

use log::warn;
use printpdf::{
    BuiltinFont, Image, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::error::ReportError;
use crate::fonts::{to_builtin_text, BuiltinFace, FontFace, FontSet, FontWeight};
use crate::images::ImageAsset;
use crate::layout::{PageGeometry, Point, Rect, POINTS_PER_INCH};
use crate::theme::Color;

use super::{Canvas, Stroke};

const MM_PER_INCH: f64 = 25.4;
const LAYER_NAME: &str = "Layer 1";
/// Resolution at which an image's natural size is computed before scaling.
const IMAGE_DPI: f64 = 300.0;

fn mm(points: f64) -> Mm {
    Mm(points * MM_PER_INCH / POINTS_PER_INCH)
}

fn pdf_point(point: Point) -> printpdf::Point {
    printpdf::Point::new(mm(point.x), mm(point.y))
}

fn pdf_color(color: Color) -> printpdf::Color {
    let (r, g, b) = color.unit();
    printpdf::Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn builtin_font(face: BuiltinFace) -> BuiltinFont {
    match face {
        BuiltinFace::Helvetica => BuiltinFont::Helvetica,
        BuiltinFace::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

struct RegisteredFont {
    reference: IndirectFontRef,
    builtin: bool,
}

/// A canvas writing a PDF document with `printpdf`.
pub struct PdfCanvas {
    document: PdfDocumentReference,
    fonts: Vec<RegisteredFont>,
    layer: PdfLayerReference,
    pages: usize,
}

impl PdfCanvas {
    /// Creates a document and registers one PDF font per weight of `fonts`.
    ///
    /// A font file `printpdf` refuses is replaced by its built-in fallback.
    pub fn new(
        title: &str,
        geometry: &PageGeometry,
        fonts: &FontSet,
    ) -> Result<Self, ReportError> {
        let (document, page, layer) = PdfDocument::new(
            title,
            mm(geometry.width),
            mm(geometry.height),
            LAYER_NAME,
        );
        let layer = document.get_page(page).get_layer(layer);

        let mut registered = Vec::with_capacity(FontWeight::ALL.len());
        for weight in FontWeight::ALL {
            let font = match fonts.face(weight) {
                FontFace::Embedded(font) => match document.add_external_font(font.data()) {
                    Ok(reference) => RegisteredFont {
                        reference,
                        builtin: false,
                    },
                    Err(err) => {
                        warn!(
                            "Embedding {} failed ({}); falling back to {}.",
                            font.path().display(),
                            err,
                            weight.fallback().name()
                        );
                        RegisteredFont {
                            reference: document
                                .add_builtin_font(builtin_font(weight.fallback()))?,
                            builtin: true,
                        }
                    }
                },
                FontFace::Builtin(face) => RegisteredFont {
                    reference: document.add_builtin_font(builtin_font(*face))?,
                    builtin: true,
                },
            };
            registered.push(font);
        }

        Ok(Self {
            document,
            fonts: registered,
            layer,
            pages: 0,
        })
    }

    /// Serialises the document.
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut bytes = Vec::new();
        {
            let mut writer = BufWriter::new(&mut bytes);
            self.document.save(&mut writer)?;
            writer.flush()?;
        }
        Ok(bytes)
    }

    fn font(&self, weight: FontWeight) -> &RegisteredFont {
        &self.fonts[weight.index()]
    }
}

impl Canvas for PdfCanvas {
    fn begin_page(&mut self, geometry: &PageGeometry) -> Result<(), ReportError> {
        // The document is created with its first page already in place.
        if self.pages > 0 {
            let (page, layer) =
                self.document
                    .add_page(mm(geometry.width), mm(geometry.height), LAYER_NAME);
            self.layer = self.document.get_page(page).get_layer(layer);
        }
        self.pages += 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_shape(Line {
            points: points.iter().map(|&p| (pdf_point(p), false)).collect(),
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(pdf_color(stroke.color));
        self.layer.set_outline_thickness(stroke.width);
        self.layer.add_shape(Line {
            points: points.iter().map(|&p| (pdf_point(p), false)).collect(),
            is_closed: closed,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, weight: FontWeight, size: f64, color: Color) {
        if text.is_empty() {
            return;
        }
        let font = self.font(weight);
        let text = if font.builtin {
            to_builtin_text(text).into_owned()
        } else {
            text.to_owned()
        };
        self.layer.set_fill_color(pdf_color(color));
        self.layer
            .use_text(text, size, mm(origin.x), mm(origin.y), &font.reference);
    }

    fn draw_image(&mut self, image: &ImageAsset, frame: Rect) {
        let (px_width, px_height) = image.dimensions();
        if px_width == 0 || px_height == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
            return;
        }

        let natural_width = f64::from(px_width) * POINTS_PER_INCH / IMAGE_DPI;
        let natural_height = f64::from(px_height) * POINTS_PER_INCH / IMAGE_DPI;
        Image::from_dynamic_image(image.image()).add_to_layer(
            self.layer.clone(),
            Some(mm(frame.x)),
            Some(mm(frame.y)),
            None,
            Some(frame.width / natural_width),
            Some(frame.height / natural_height),
            Some(IMAGE_DPI),
        );
    }
}
