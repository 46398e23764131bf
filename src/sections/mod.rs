//! Page drawers for the parts of the report.

pub mod cards;
pub mod cover;
pub mod disposal;
pub mod outro;
pub mod spills;
pub mod waste;

use crate::context::{Align, RenderContext, TextStyle};
use crate::fonts::FontWeight;
use crate::layout::{Rect, Region};
use crate::theme::PRIMARY_DARK;

pub(crate) const SECTION_HEADING: &str = "Full Disclosure";

const HEADING_STYLE: TextStyle = TextStyle::new(FontWeight::Bold, 18.0, PRIMARY_DARK);

/// Cell text of a running row number.
pub(crate) fn row_number(number: Option<usize>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

/// Draws the section heading band below `top` and returns the top of what follows.
pub(crate) fn draw_section_heading(ctx: &mut RenderContext<'_>, top: f64) -> f64 {
    let content = ctx.geometry().content_box();
    let band = Rect::from_top(content.x, top, content.width, Region::SectionHeading.height());
    ctx.text(
        SECTION_HEADING,
        band.x,
        RenderContext::centered_baseline(band, HEADING_STYLE),
        Align::Left,
        HEADING_STYLE,
    );
    top - band.height
}
