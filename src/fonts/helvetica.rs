//! Metrics of the built-in Helvetica faces used when no font file is available.
//!
//! Widths are the AFM advance widths (1/1000 em) of the printable ASCII range.

use std::borrow::Cow;

const FIRST_CHAR: u32 = 32;

#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

/// One of the two standard faces the renderer falls back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinFace {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFace {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinFace::Helvetica => "Helvetica",
            BuiltinFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            BuiltinFace::Helvetica => &REGULAR,
            BuiltinFace::HelveticaBold => &BOLD,
        }
    }

    /// Width of `text` in points at `size`, after [`to_builtin_text`].
    pub fn text_width(self, text: &str, size: f64) -> f64 {
        let widths = self.widths();
        let units: u32 = to_builtin_text(text)
            .chars()
            .map(|c| {
                let code = c as u32;
                if (FIRST_CHAR..FIRST_CHAR + 95).contains(&code) {
                    u32::from(widths[(code - FIRST_CHAR) as usize])
                } else {
                    u32::from(DEFAULT_WIDTH)
                }
            })
            .sum();
        f64::from(units) * size / 1000.0
    }
}

/// Replaces characters the standard faces cannot show with ASCII stand-ins.
pub fn to_builtin_text(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut converted = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if c.is_ascii() => converted.push(c),
            '\u{2022}' | '\u{00B7}' => converted.push('-'),
            '\u{2013}' | '\u{2014}' => converted.push('-'),
            '\u{00A9}' => converted.push_str("(c)"),
            '\u{00B3}' => converted.push('3'),
            '\u{2018}' | '\u{2019}' => converted.push('\''),
            '\u{201C}' | '\u{201D}' => converted.push('"'),
            '\u{2026}' => converted.push_str("..."),
            _ => converted.push('?'),
        }
    }
    Cow::Owned(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_with_afm_widths() {
        // "Hi" = 722 + 222 units.
        let width = BuiltinFace::Helvetica.text_width("Hi", 10.0);
        assert!((width - 9.44).abs() < 1e-9);
        assert!(
            BuiltinFace::HelveticaBold.text_width("Total", 12.0)
                > BuiltinFace::Helvetica.text_width("Total", 12.0)
        );
    }

    #[test]
    fn replaces_unsupported_characters() {
        assert_eq!(
            to_builtin_text("All Location \u{2022} Jan 1 \u{2013} Dec 31"),
            "All Location - Jan 1 - Dec 31"
        );
        assert_eq!(to_builtin_text("\u{00A9} 2024"), "(c) 2024");
        assert_eq!(to_builtin_text("\u{0E02}\u{0E22}\u{0E30}"), "???");
        assert!(matches!(to_builtin_text("plain"), Cow::Borrowed("plain")));
    }
}
