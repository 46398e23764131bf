//! Closing page with the contact block.

use crate::context::{Align, RenderContext, TextStyle};
use crate::error::ReportError;
use crate::fonts::FontWeight;
use crate::images::ImageKind;
use crate::layout::{inch, Rect};
use crate::theme::{PRIMARY, WHITE};

pub const HEADING: &str = "Thank You";
pub const CLOSING_LINE: &str = "For more information about this report, please contact us.";

const HEADING_STYLE: TextStyle = TextStyle::new(FontWeight::Bold, 40.0, WHITE);
const CLOSING_STYLE: TextStyle = TextStyle::new(FontWeight::Light, 14.0, WHITE);
const CONTACT_STYLE: TextStyle = TextStyle::new(FontWeight::Regular, 13.0, WHITE);

const ICON_SIZE_IN: f64 = 0.3;
const CONTACT_ROW_IN: f64 = 0.5;

pub fn draw_outro(ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
    ctx.begin_page()?;

    let geometry = *ctx.geometry();
    let contact = &ctx.config().contact;
    let content = geometry.content_box();
    ctx.fill_rect(geometry.page_box(), PRIMARY);

    ctx.image(
        ImageKind::LogoWhite,
        Rect::from_top(content.x, content.top(), inch(1.6), inch(0.6)),
    );

    let mut baseline = geometry.height * 0.62;
    ctx.text(HEADING, content.x, baseline, Align::Left, HEADING_STYLE);
    baseline -= inch(0.5);
    ctx.fitted_text(
        CLOSING_LINE,
        content.x,
        baseline,
        content.width,
        Align::Left,
        CLOSING_STYLE,
    );

    let rows = [
        (ImageKind::PhoneIcon, contact.phone.as_str()),
        (ImageKind::EmailIcon, contact.email.as_str()),
        (ImageKind::WebIcon, contact.website.as_str()),
        (ImageKind::LocationIcon, contact.address.as_str()),
    ];
    let mut row_top = baseline - inch(0.5);
    let text_x = content.x + inch(ICON_SIZE_IN + 0.15);
    for (icon, text) in rows {
        let row = Rect::from_top(content.x, row_top, content.width, inch(CONTACT_ROW_IN));
        let icon_frame = Rect::new(
            row.x,
            row.center().y - inch(ICON_SIZE_IN) / 2.0,
            inch(ICON_SIZE_IN),
            inch(ICON_SIZE_IN),
        );
        ctx.image(icon, icon_frame);
        ctx.fitted_text(
            text,
            text_x,
            RenderContext::centered_baseline(row, CONTACT_STYLE),
            content.right() - text_x,
            Align::Left,
            CONTACT_STYLE,
        );
        row_top -= inch(CONTACT_ROW_IN);
    }
    Ok(())
}
