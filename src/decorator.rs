//! Report header and footer repeated on every content page.

use crate::config::ReportConfig;
use crate::context::{Align, RenderContext, TextStyle};
use crate::fonts::FontWeight;
use crate::images::ImageKind;
use crate::layout::{inch, Rect, REPORT_BANNER_HEIGHT_IN};
use crate::theme::{MUTED_TEXT, PRIMARY, WHITE};

const BANNER_RADIUS: f64 = 9.0;
const TITLE_STYLE: TextStyle = TextStyle::new(FontWeight::Bold, 16.0, WHITE);
const SUBTITLE_STYLE: TextStyle = TextStyle::new(FontWeight::Light, 10.0, WHITE);
const FOOTER_STYLE: TextStyle = TextStyle::new(FontWeight::Light, 8.0, MUTED_TEXT);

/// `All Location • Jan 1 – Dec 31, 2024`
pub fn reporting_period(config: &ReportConfig, year: &str) -> String {
    format!("{} \u{2022} Jan 1 \u{2013} Dec 31, {}", config.location_label, year)
}

/// `© 2024 <organisation>. All rights reserved.`
pub fn copyright_line(config: &ReportConfig, year: &str) -> String {
    format!("\u{00A9} {} {}. All rights reserved.", year, config.organization)
}

/// Rectangle of the banner at the top of a content page.
pub fn banner_rect(ctx: &RenderContext<'_>) -> Rect {
    let content = ctx.geometry().content_box();
    Rect::from_top(
        content.x,
        content.top(),
        content.width,
        inch(REPORT_BANNER_HEIGHT_IN),
    )
}

pub fn draw_report_header(ctx: &mut RenderContext<'_>) {
    let config = ctx.config();
    let year = ctx.year();
    let banner = banner_rect(ctx);
    ctx.fill_round_rect(banner, BANNER_RADIUS, PRIMARY);

    let mut title_x = banner.x + inch(0.2);
    let logo_frame = Rect::new(title_x, banner.y + inch(0.1), inch(0.9), banner.height - inch(0.2));
    if ctx.image(ImageKind::LogoWhite, logo_frame) {
        title_x = logo_frame.right() + inch(0.2);
    }

    let subtitle = reporting_period(config, year);
    let subtitle_right = banner.right() - inch(0.2);
    let subtitle_width = ctx.text_width(&subtitle, SUBTITLE_STYLE);
    ctx.text(
        &subtitle,
        subtitle_right,
        RenderContext::centered_baseline(banner, SUBTITLE_STYLE),
        Align::Right,
        SUBTITLE_STYLE,
    );

    let title_room = (subtitle_right - subtitle_width - inch(0.3) - title_x).max(0.0);
    ctx.fitted_text(
        &config.report_title,
        title_x,
        RenderContext::centered_baseline(banner, TITLE_STYLE),
        title_room,
        Align::Left,
        TITLE_STYLE,
    );
}

pub fn draw_footer(ctx: &mut RenderContext<'_>) {
    let line = copyright_line(ctx.config(), ctx.year());
    let geometry = *ctx.geometry();
    ctx.text(
        &line,
        geometry.width / 2.0,
        geometry.footer_baseline(),
        Align::Center,
        FOOTER_STYLE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::layout::PageGeometry;

    #[test]
    fn texts_carry_location_and_year() {
        let config = ReportConfig::default();
        assert_eq!(
            reporting_period(&config, "2023"),
            "All Location \u{2022} Jan 1 \u{2013} Dec 31, 2023"
        );
        assert_eq!(
            copyright_line(&config, "2023"),
            "\u{00A9} 2023 Waste Management Platform. All rights reserved."
        );
    }

    #[test]
    fn footer_is_centred_on_its_baseline() {
        let assets = Assets::fallback();
        let config = ReportConfig::default();
        let geometry = PageGeometry::landscape();
        let mut canvas = RecordingCanvas::new();
        {
            let mut ctx = RenderContext::new(&mut canvas, &assets, &config, geometry, "2024");
            ctx.begin_content_page().expect("page");
            ctx.finish_content_page();
        }

        let page = canvas.page(0).expect("page recorded");
        let footer = copyright_line(&config, "2024");
        let Some(DrawOp::Text { origin, size, weight, .. }) = page.text_runs(&footer).next() else {
            panic!("footer not drawn");
        };
        assert!((origin.y - geometry.footer_baseline()).abs() < 1e-9);

        let width = assets.fonts.text_width(&footer, *weight, *size);
        assert!((origin.x + width / 2.0 - geometry.width / 2.0).abs() < 1e-6);
        assert!(page.contains_text("GRI 306: Waste 2020"));
        assert!(page.contains_text("Dec 31, 2024"));
    }
}
