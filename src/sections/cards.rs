//! Summary cards on the full-disclosure page.

use crate::canvas::Stroke;
use crate::context::{Align, RenderContext, TextStyle};
use crate::fonts::FontWeight;
use crate::format::card_value;
use crate::layout::{inch, Point, Rect, Region};
use crate::payload::TableSummary;
use crate::theme::{
    BADGE_BACKGROUND, BORDER, CARD_BACKGROUND, MUTED_TEXT, PRIMARY, PRIMARY_DARK, PRIMARY_TINT,
    TEXT,
};

const CARD_GAP_IN: f64 = 0.25;
const CARD_RADIUS: f64 = 10.0;
const PADDING_IN: f64 = 0.2;

const BADGE_STYLE: TextStyle = TextStyle::new(FontWeight::Medium, 8.0, PRIMARY_DARK);
const LABEL_STYLE: TextStyle = TextStyle::new(FontWeight::Regular, 10.0, MUTED_TEXT);
const VALUE_STYLE: TextStyle = TextStyle::new(FontWeight::Bold, 18.0, TEXT);

/// One of the four headline figures.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryCard {
    /// GRI disclosure the figure belongs to.
    pub badge: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl SummaryCard {
    pub fn value_text(&self) -> String {
        card_value(self.value, self.unit)
    }
}

pub fn summary_cards(summary: &TableSummary) -> [SummaryCard; 4] {
    [
        SummaryCard {
            badge: "306-3",
            label: "Total Waste Generated",
            value: summary.waste_generated,
            unit: "t",
        },
        SummaryCard {
            badge: "306-4",
            label: "Diverted from Disposal",
            value: summary.waste_diverted,
            unit: "t",
        },
        SummaryCard {
            badge: "306-5",
            label: "Directed to Disposal",
            value: summary.waste_directed,
            unit: "t",
        },
        SummaryCard {
            badge: "306-3",
            label: "Spill Volume",
            value: summary.spills,
            unit: "L",
        },
    ]
}

/// Frames of `count` equal cards spread over `band` with a fixed gap.
pub fn card_frames(band: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gap = inch(CARD_GAP_IN);
    let width = ((band.width - gap * (count - 1) as f64) / count as f64).max(0.0);
    (0..count)
        .map(|index| Rect::new(band.x + index as f64 * (width + gap), band.y, width, band.height))
        .collect()
}

/// Draws the cards in the band below `top` and returns the top of what follows,
/// including the gap under the cards.
pub fn draw_summary_cards(ctx: &mut RenderContext<'_>, summary: &TableSummary, top: f64) -> f64 {
    let content = ctx.geometry().content_box();
    let band = Rect::from_top(content.x, top, content.width, Region::SummaryCards.height());
    let cards = summary_cards(summary);

    for (card, frame) in cards.iter().zip(card_frames(band, cards.len())) {
        draw_card(ctx, card, frame);
    }

    top - Region::SummaryCards.height() - Region::CardGap.height()
}

fn draw_card(ctx: &mut RenderContext<'_>, card: &SummaryCard, frame: Rect) {
    ctx.fill_round_rect(frame, CARD_RADIUS, CARD_BACKGROUND);
    ctx.stroke_round_rect(frame, CARD_RADIUS, Stroke::new(BORDER, 0.75));

    let padding = inch(PADDING_IN);
    let icon_center = Point::new(frame.x + padding + inch(0.22), frame.top() - padding - inch(0.22));
    ctx.fill_circle(icon_center, inch(0.22), PRIMARY_TINT);
    ctx.fill_circle(icon_center, inch(0.09), PRIMARY);

    let badge_width = ctx.text_width(card.badge, BADGE_STYLE) + inch(0.24);
    let badge = Rect::from_top(
        frame.right() - padding - badge_width,
        frame.top() - padding,
        badge_width,
        inch(0.26),
    );
    ctx.fill_round_rect(badge, badge.height / 2.0, BADGE_BACKGROUND);
    ctx.text(
        card.badge,
        badge.center().x,
        RenderContext::centered_baseline(badge, BADGE_STYLE),
        Align::Center,
        BADGE_STYLE,
    );

    let text_width = frame.width - 2.0 * padding;
    ctx.fitted_text(
        card.label,
        frame.x + padding,
        frame.top() - inch(0.95),
        text_width,
        Align::Left,
        LABEL_STYLE,
    );
    ctx.fitted_text(
        &card.value_text(),
        frame.x + padding,
        frame.y + inch(0.25),
        text_width,
        Align::Left,
        VALUE_STYLE,
    );
}
