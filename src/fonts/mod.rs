//! Font loading and text measurement.
//!
//! The report uses seven weights of a Thai-capable family read from
//! `<assets>/fonts`. Each weight loads independently; a weight whose file is
//! missing or unreadable is replaced by the built-in Helvetica face of the same
//! boldness, so a report always renders.

mod helvetica;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::AssetError;

pub use helvetica::{to_builtin_text, BuiltinFace};

/// Name of the bundled font family.
pub const FONT_FAMILY_NAME: &str = "Kanit";

/// Sub-directory of the asset directory holding the font files.
pub const FONT_SUBDIRECTORY: &str = "fonts";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontWeight {
    ExtraLight,
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 7] = [
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn file_name(self) -> &'static str {
        match self {
            FontWeight::ExtraLight => "Kanit-ExtraLight.ttf",
            FontWeight::Light => "Kanit-Light.ttf",
            FontWeight::Regular => "Kanit-Regular.ttf",
            FontWeight::Medium => "Kanit-Medium.ttf",
            FontWeight::SemiBold => "Kanit-SemiBold.ttf",
            FontWeight::Bold => "Kanit-Bold.ttf",
            FontWeight::ExtraBold => "Kanit-ExtraBold.ttf",
        }
    }

    /// The built-in face standing in for this weight.
    pub fn fallback(self) -> BuiltinFace {
        if self >= FontWeight::SemiBold {
            BuiltinFace::HelveticaBold
        } else {
            BuiltinFace::Helvetica
        }
    }
}

/// A TrueType font read from disk.
///
/// Horizontal advances of every mapped character are read once at load time.
#[derive(Clone, Debug)]
pub struct EmbeddedFont {
    path: PathBuf,
    data: Vec<u8>,
    units_per_em: u16,
    advances: HashMap<char, u16>,
    /// Advance of the `.notdef` glyph, used for unmapped characters.
    fallback_advance: u16,
}

impl EmbeddedFont {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font program, embedded into the PDF as-is.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| self.advances.get(&c).copied().unwrap_or(self.fallback_advance))
            .map(u32::from)
            .sum();
        f64::from(units) * size / f64::from(self.units_per_em)
    }
}

/// Advance widths of every character mapped by the Unicode cmap subtables.
fn read_advances(face: &ttf_parser::Face<'_>) -> HashMap<char, u16> {
    let mut advances = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return advances;
    };

    for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
        let mut codepoints = Vec::new();
        subtable.codepoints(|codepoint| codepoints.push(codepoint));
        for codepoint in codepoints {
            let Some(c) = char::from_u32(codepoint) else {
                continue;
            };
            if advances.contains_key(&c) {
                continue;
            }
            if let Some(advance) = subtable
                .glyph_index(codepoint)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
            {
                advances.insert(c, advance);
            }
        }
    }
    advances
}

/// Loads and validates one font file.
pub fn load_font(path: &Path) -> Result<EmbeddedFont, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let data = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let face = ttf_parser::Face::parse(&data, 0).map_err(|err| AssetError::InvalidFont {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let units_per_em = face.units_per_em();
    if units_per_em == 0 {
        return Err(AssetError::InvalidFont {
            path: path.to_path_buf(),
            reason: "units per em is zero".to_owned(),
        });
    }
    let advances = read_advances(&face);
    let fallback_advance = face
        .glyph_hor_advance(ttf_parser::GlyphId(0))
        .unwrap_or(units_per_em / 2);

    Ok(EmbeddedFont {
        path: path.to_path_buf(),
        data,
        units_per_em,
        advances,
        fallback_advance,
    })
}

/// Face actually used for a weight.
#[derive(Clone, Debug)]
pub enum FontFace {
    Embedded(EmbeddedFont),
    Builtin(BuiltinFace),
}

/// The seven faces used by the report, one per [`FontWeight`].
#[derive(Clone, Debug)]
pub struct FontSet {
    faces: Vec<FontFace>,
}

impl Default for FontSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontSet {
    /// A set made only of built-in faces.
    pub fn builtin() -> Self {
        Self {
            faces: FontWeight::ALL
                .iter()
                .map(|weight| FontFace::Builtin(weight.fallback()))
                .collect(),
        }
    }

    /// Loads every weight from `<asset_dir>/fonts`, falling back per weight.
    pub fn load(asset_dir: Option<&Path>) -> Self {
        let Some(asset_dir) = asset_dir else {
            warn!(
                "No asset directory available; using built-in fonts instead of '{}'.",
                FONT_FAMILY_NAME
            );
            return Self::builtin();
        };

        let directory = asset_dir.join(FONT_SUBDIRECTORY);
        let faces = FontWeight::ALL
            .iter()
            .map(|&weight| match load_font(&directory.join(weight.file_name())) {
                Ok(font) => FontFace::Embedded(font),
                Err(err) => {
                    warn!(
                        "Font {:?} unavailable ({}); falling back to {}.",
                        weight,
                        err,
                        weight.fallback().name()
                    );
                    FontFace::Builtin(weight.fallback())
                }
            })
            .collect();

        Self { faces }
    }

    pub fn face(&self, weight: FontWeight) -> &FontFace {
        &self.faces[weight.index()]
    }

    /// Number of weights served by a built-in face.
    pub fn fallback_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|face| matches!(face, FontFace::Builtin(_)))
            .count()
    }

    /// Text as it will be drawn with the face of `weight`.
    pub fn display_text<'a>(&self, text: &'a str, weight: FontWeight) -> Cow<'a, str> {
        match self.face(weight) {
            FontFace::Embedded(_) => Cow::Borrowed(text),
            FontFace::Builtin(_) => to_builtin_text(text),
        }
    }

    /// Width of `text` in points.
    pub fn text_width(&self, text: &str, weight: FontWeight, size: f64) -> f64 {
        match self.face(weight) {
            FontFace::Embedded(font) => font.text_width(text, size),
            FontFace::Builtin(face) => face.text_width(text, size),
        }
    }

    /// Shortens `text` with an ellipsis until it fits `max_width`.
    pub fn fit_text<'a>(
        &self,
        text: &'a str,
        weight: FontWeight,
        size: f64,
        max_width: f64,
    ) -> Cow<'a, str> {
        if self.text_width(text, weight, size) <= max_width {
            return Cow::Borrowed(text);
        }

        let chars: Vec<char> = text.chars().collect();
        let mut keep = chars.len();
        while keep > 0 {
            keep -= 1;
            let candidate: String = chars[..keep].iter().collect::<String>() + "...";
            if self.text_width(&candidate, weight, size) <= max_width {
                return Cow::Owned(candidate);
            }
        }
        Cow::Owned("...".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_falls_back_to_helvetica() {
        let fonts = FontSet::load(Some(Path::new("/nonexistent/gri-report-assets")));
        assert_eq!(fonts.fallback_count(), FontWeight::ALL.len());
        assert!(matches!(
            fonts.face(FontWeight::SemiBold),
            FontFace::Builtin(BuiltinFace::HelveticaBold)
        ));
        assert!(matches!(
            fonts.face(FontWeight::Light),
            FontFace::Builtin(BuiltinFace::Helvetica)
        ));
    }

    #[test]
    fn corrupt_font_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").expect("write font");

        assert!(matches!(
            load_font(&path),
            Err(AssetError::InvalidFont { .. })
        ));
        assert!(matches!(
            load_font(&dir.path().join("absent.ttf")),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn embedded_widths_come_from_loaded_advances() {
        let font = EmbeddedFont {
            path: PathBuf::from("Kanit-Regular.ttf"),
            data: Vec::new(),
            units_per_em: 1000,
            advances: HashMap::from([('A', 600), ('\u{0E01}', 550)]),
            fallback_advance: 500,
        };

        // Measured without the font program: the data is empty.
        assert!((font.text_width("AA", 10.0) - 12.0).abs() < 1e-9);
        assert!((font.text_width("\u{0E01}A", 20.0) - 23.0).abs() < 1e-9);
        assert!((font.text_width("A?", 10.0) - 11.0).abs() < 1e-9);

        let mut fonts = FontSet::builtin();
        fonts.faces[FontWeight::Regular.index()] = FontFace::Embedded(font);
        assert!((fonts.text_width("AA", FontWeight::Regular, 10.0) - 12.0).abs() < 1e-9);
        assert_eq!(fonts.display_text("\u{00A9}", FontWeight::Regular), "\u{00A9}");
    }

    #[test]
    fn builtin_faces_replace_unsupported_text() {
        let fonts = FontSet::builtin();
        assert_eq!(
            fonts.display_text("\u{00A9} 2024", FontWeight::Regular),
            "(c) 2024"
        );
    }

    #[test]
    fn long_labels_are_shortened() {
        let fonts = FontSet::builtin();
        let label = "Construction and demolition debris from site clearing";
        let max_width = 100.0;
        let fitted = fonts.fit_text(label, FontWeight::Regular, 10.0, max_width);

        assert!(fitted.ends_with("..."));
        assert!(fonts.text_width(&fitted, FontWeight::Regular, 10.0) <= max_width);
        assert_eq!(
            fonts.fit_text("Paper", FontWeight::Regular, 10.0, max_width),
            "Paper"
        );
    }
}
