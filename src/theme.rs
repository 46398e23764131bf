//! Colour palette shared by every page.

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

pub const PRIMARY: Color = Color::hex(0x0F766E);
pub const PRIMARY_DARK: Color = Color::hex(0x115E59);
pub const PRIMARY_TINT: Color = Color::hex(0xE6F4F1);
pub const ACCENT: Color = Color::hex(0x84CC16);
pub const TEXT: Color = Color::hex(0x1F2937);
pub const MUTED_TEXT: Color = Color::hex(0x6B7280);
pub const BORDER: Color = Color::hex(0xD1D5DB);
pub const CARD_BACKGROUND: Color = Color::hex(0xF8FAFC);
pub const BADGE_BACKGROUND: Color = Color::hex(0xCCFBF1);
pub const TOTALS_BACKGROUND: Color = Color::hex(0xECFDF5);
pub const LABEL_ROW_BACKGROUND: Color = Color::hex(0xF3F4F6);
pub const COVER_BACKGROUND: Color = Color::hex(0xF0FDFA);
pub const WHITE: Color = Color::rgb(255, 255, 255);
