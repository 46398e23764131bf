//! Cover page.

use crate::context::{Align, RenderContext, TextStyle};
use crate::decorator::reporting_period;
use crate::error::ReportError;
use crate::fonts::FontWeight;
use crate::images::ImageKind;
use crate::layout::{inch, Rect};
use crate::theme::{ACCENT, COVER_BACKGROUND, MUTED_TEXT, PRIMARY_DARK, TEXT};

const TITLE_STYLE: TextStyle = TextStyle::new(FontWeight::Bold, 30.0, PRIMARY_DARK);
const SUBTITLE_STYLE: TextStyle = TextStyle::new(FontWeight::Medium, 18.0, TEXT);
const PERIOD_STYLE: TextStyle = TextStyle::new(FontWeight::Light, 12.0, MUTED_TEXT);
const ORGANIZATION_STYLE: TextStyle = TextStyle::new(FontWeight::Regular, 11.0, TEXT);

pub fn subtitle(year: &str) -> String {
    format!("Waste Management Report {year}")
}

pub fn draw_cover(ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
    ctx.begin_page()?;

    let geometry = *ctx.geometry();
    let config = ctx.config();
    let year = ctx.year();
    let content = geometry.content_box();
    ctx.fill_rect(geometry.page_box(), COVER_BACKGROUND);

    ctx.image(
        ImageKind::Logo,
        Rect::from_top(content.x, content.top(), inch(1.6), inch(0.6)),
    );

    let half = geometry.width / 2.0;
    ctx.image(
        ImageKind::CoverIllustration,
        Rect::new(half, content.y, content.right() - half, content.height),
    );

    let text_width = half - content.x - inch(0.3);
    let mut baseline = geometry.height * 0.58;
    ctx.fitted_text(
        &config.report_title,
        content.x,
        baseline,
        text_width,
        Align::Left,
        TITLE_STYLE,
    );

    baseline -= inch(0.3);
    ctx.fill_rect(Rect::new(content.x, baseline, inch(1.2), inch(0.08)), ACCENT);

    baseline -= inch(0.45);
    ctx.fitted_text(
        &subtitle(year),
        content.x,
        baseline,
        text_width,
        Align::Left,
        SUBTITLE_STYLE,
    );

    baseline -= inch(0.35);
    ctx.fitted_text(
        &reporting_period(config, year),
        content.x,
        baseline,
        text_width,
        Align::Left,
        PERIOD_STYLE,
    );

    ctx.fitted_text(
        &config.organization,
        content.x,
        content.y,
        text_width,
        Align::Left,
        ORGANIZATION_STYLE,
    );
    Ok(())
}
