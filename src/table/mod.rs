//! Generic paginated table.
//!
//! A [`PaginatedTable`] splits its rows into page groups according to a
//! [`PageBudget`], draws each group inside a rounded container sized to that
//! group's rows, and places an optional totals row once, right after the last
//! data row. Between groups it finalises the current content page and begins a
//! new one. What a row looks like is left to callbacks supplied by the section.

mod pagination;

use std::ops::Range;

use log::debug;

use crate::canvas::Stroke;
use crate::context::{Align, RenderContext, TextStyle};
use crate::error::ReportError;
use crate::fonts::FontWeight;
use crate::layout::{inch, Point, Rect, Region, TableFrame, HEADER_ROW_HEIGHT_IN, ROW_HEIGHT_IN};
use crate::theme::{
    BORDER, CARD_BACKGROUND, MUTED_TEXT, PRIMARY, PRIMARY_DARK, TEXT, TOTALS_BACKGROUND, WHITE,
};

pub use pagination::{page_count, paginate, PageBudget, RowBorders};

/// Distance between the container edge and the table rows.
pub const TABLE_INSET_IN: f64 = 0.2;
/// Horizontal padding inside a cell.
const CELL_PADDING: f64 = 6.0;
const CONTAINER_RADIUS: f64 = 10.0;

const TITLE_STYLE: TextStyle = TextStyle::new(FontWeight::SemiBold, 13.0, PRIMARY_DARK);
const NOTE_STYLE: TextStyle = TextStyle::new(FontWeight::Light, 9.0, MUTED_TEXT);
const HEADER_STYLE: TextStyle = TextStyle::new(FontWeight::Medium, 10.0, WHITE);
/// Text style of ordinary data cells.
pub const CELL_STYLE: TextStyle = TextStyle::new(FontWeight::Regular, 10.0, TEXT);
/// Text style of the totals row.
pub const TOTALS_STYLE: TextStyle = TextStyle::new(FontWeight::SemiBold, 10.0, TEXT);

/// A fixed column, positioned in inches from the table's left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub offset: f64,
    pub width: f64,
    pub align: Align,
}

impl Column {
    pub const fn left(title: &'static str, offset: f64, width: f64) -> Self {
        Self {
            title,
            offset,
            width,
            align: Align::Left,
        }
    }

    pub const fn right(title: &'static str, offset: f64, width: f64) -> Self {
        Self {
            title,
            offset,
            width,
            align: Align::Right,
        }
    }

    /// Text anchor and maximum text width of this column in a row starting at `table_x`.
    fn anchor(&self, table_x: f64) -> (f64, f64) {
        let left = table_x + inch(self.offset);
        let width = inch(self.width);
        let max_width = (width - 2.0 * CELL_PADDING).max(0.0);
        let x = match self.align {
            Align::Left => left + CELL_PADDING,
            Align::Center => left + width / 2.0,
            Align::Right => left + width - CELL_PADDING,
        };
        (x, max_width)
    }
}

/// Where a row is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowFrame {
    pub rect: Rect,
    pub borders: RowBorders,
}

/// Draws one text per column, vertically centred in `rect`.
///
/// Cells beyond the number of columns are ignored; missing cells stay empty.
pub fn draw_cells<S: AsRef<str>>(
    ctx: &mut RenderContext<'_>,
    rect: Rect,
    columns: &[Column],
    cells: &[S],
    style: TextStyle,
) {
    let baseline = RenderContext::centered_baseline(rect, style);
    for (column, cell) in columns.iter().zip(cells) {
        let (x, max_width) = column.anchor(rect.x);
        ctx.fitted_text(cell.as_ref(), x, baseline, max_width, column.align, style);
    }
}

/// Which page of a table a plan describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TablePage {
    /// The page the table starts on: title band, optional note, column header.
    First,
    /// Later pages: top padding, column header only when repeated.
    Continuation,
}

/// Layout of one page group, computed before anything is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    pub page: TablePage,
    pub rows: Range<usize>,
    /// Whether the totals row closes this page.
    pub totals: bool,
    /// Height of the rounded container: bands, exact row heights and totals.
    pub container_height: f64,
}

/// What a rendered table occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableOutcome {
    /// Pages spanned, including the one the table started on.
    pub pages: usize,
    /// Zero-based page index holding the totals row, if one was drawn.
    pub totals_page: Option<usize>,
}

type RowHeight<'r, T> = dyn Fn(&T) -> f64 + 'r;
type RowDrawer<'r, T> = dyn Fn(&mut RenderContext<'_>, &T, &RowFrame) + 'r;
type TotalsDrawer<'r> = dyn Fn(&mut RenderContext<'_>, &RowFrame) + 'r;

/// A table of `T` rows spread over as many pages as its budget requires.
pub struct PaginatedTable<'r, T> {
    title: String,
    note: Option<String>,
    columns: Vec<Column>,
    frame: TableFrame,
    budget: PageBudget,
    rows: &'r [T],
    row_height: Box<RowHeight<'r, T>>,
    draw_row: Box<RowDrawer<'r, T>>,
    draw_totals: Option<Box<TotalsDrawer<'r>>>,
}

impl<'r, T> PaginatedTable<'r, T> {
    /// Creates a table whose rows are all of the standard row height and drawn by `draw_row`.
    pub fn new<F>(
        title: impl Into<String>,
        columns: Vec<Column>,
        budget: PageBudget,
        rows: &'r [T],
        draw_row: F,
    ) -> Self
    where
        F: Fn(&mut RenderContext<'_>, &T, &RowFrame) + 'r,
    {
        Self {
            title: title.into(),
            note: None,
            columns,
            frame: TableFrame {
                note: false,
                repeat_column_header: true,
            },
            budget,
            rows,
            row_height: Box::new(|_: &T| inch(ROW_HEIGHT_IN)),
            draw_row: Box::new(draw_row),
            draw_totals: None,
        }
    }

    /// Adds the explanatory note printed under the title on the first page.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self.frame.note = true;
        self
    }

    pub fn with_frame(mut self, frame: TableFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Sets the height of each row, in points.
    pub fn with_row_height<F>(mut self, row_height: F) -> Self
    where
        F: Fn(&T) -> f64 + 'r,
    {
        self.row_height = Box::new(row_height);
        self
    }

    /// Sets the callback drawing the totals row after the last data row.
    pub fn with_totals<F>(mut self, draw_totals: F) -> Self
    where
        F: Fn(&mut RenderContext<'_>, &RowFrame) + 'r,
    {
        self.draw_totals = Some(Box::new(draw_totals));
        self
    }

    /// Computes the page groups and container heights without drawing.
    pub fn plan(&self) -> Vec<PagePlan> {
        let groups = paginate(self.rows.len(), self.budget);
        let last = groups.len().saturating_sub(1);

        groups
            .into_iter()
            .enumerate()
            .map(|(index, rows)| {
                let page = if index == 0 {
                    TablePage::First
                } else {
                    TablePage::Continuation
                };
                let totals = index == last && self.draw_totals.is_some();

                let bands: f64 = self
                    .frame
                    .head_regions(page == TablePage::First)
                    .iter()
                    .map(|region| region.height())
                    .sum();
                let row_heights: f64 = self.rows[rows.clone()]
                    .iter()
                    .map(|row| (self.row_height)(row))
                    .sum();
                let totals_height = if totals {
                    inch(HEADER_ROW_HEIGHT_IN)
                } else {
                    0.0
                };

                PagePlan {
                    page,
                    rows,
                    totals,
                    container_height: bands
                        + row_heights
                        + totals_height
                        + Region::BottomPadding.height(),
                }
            })
            .collect()
    }

    /// Draws the table starting at `top` on the current content page.
    ///
    /// The last page the table occupies is left open for the caller to finish.
    pub fn render(
        &self,
        ctx: &mut RenderContext<'_>,
        top: f64,
    ) -> Result<TableOutcome, ReportError> {
        let plans = self.plan();
        let mut outcome = TableOutcome {
            pages: 0,
            totals_page: None,
        };
        let mut top = top;

        for plan in &plans {
            if plan.page == TablePage::Continuation {
                ctx.finish_content_page();
                top = ctx.begin_content_page()?;
                debug!(
                    "'{}' continues on page {} with rows {:?}",
                    self.title,
                    ctx.page_count(),
                    plan.rows
                );
            }
            outcome.pages += 1;

            self.draw_page(ctx, plan, top);
            if plan.totals {
                outcome.totals_page = Some(ctx.page_count().saturating_sub(1));
            }
        }

        Ok(outcome)
    }

    fn draw_page(&self, ctx: &mut RenderContext<'_>, plan: &PagePlan, top: f64) {
        let content = ctx.geometry().content_box();
        let container = Rect::from_top(content.x, top, content.width, plan.container_height);
        ctx.fill_round_rect(container, CONTAINER_RADIUS, CARD_BACKGROUND);
        ctx.stroke_round_rect(container, CONTAINER_RADIUS, Stroke::new(BORDER, 0.75));

        let table_x = container.x + inch(TABLE_INSET_IN);
        let table_width = container.width - 2.0 * inch(TABLE_INSET_IN);
        let mut cursor = top;

        for region in self.frame.head_regions(plan.page == TablePage::First) {
            let band = Rect::from_top(table_x, cursor, table_width, region.height());
            match region {
                Region::TableTitle => ctx.fitted_text(
                    &self.title,
                    table_x,
                    RenderContext::centered_baseline(band, TITLE_STYLE) - 2.0,
                    table_width,
                    Align::Left,
                    TITLE_STYLE,
                ),
                Region::TableNote => {
                    if let Some(note) = &self.note {
                        ctx.fitted_text(
                            note,
                            table_x,
                            RenderContext::centered_baseline(band, NOTE_STYLE),
                            table_width,
                            Align::Left,
                            NOTE_STYLE,
                        );
                    }
                }
                Region::ColumnHeader => self.draw_column_header(ctx, band),
                _ => {}
            }
            cursor -= region.height();
        }

        let group = &self.rows[plan.rows.clone()];
        let last = group.len().saturating_sub(1);
        for (position, row) in group.iter().enumerate() {
            let height = (self.row_height)(row);
            let frame = RowFrame {
                rect: Rect::from_top(table_x, cursor, table_width, height),
                borders: RowBorders::for_position(position == 0, position == last),
            };
            draw_borders(ctx, &frame);
            (self.draw_row)(ctx, row, &frame);
            cursor -= height;
        }

        if plan.totals {
            if let Some(draw_totals) = &self.draw_totals {
                let frame = RowFrame {
                    rect: Rect::from_top(table_x, cursor, table_width, inch(HEADER_ROW_HEIGHT_IN)),
                    borders: RowBorders::SIDES,
                };
                ctx.fill_rect(frame.rect, TOTALS_BACKGROUND);
                draw_borders(ctx, &frame);
                draw_totals(ctx, &frame);
            }
        }
    }

    fn draw_column_header(&self, ctx: &mut RenderContext<'_>, band: Rect) {
        ctx.fill_round_rect(band, 4.0, PRIMARY);
        let titles: Vec<&str> = self.columns.iter().map(|column| column.title).collect();
        draw_cells(ctx, band, &self.columns, &titles, HEADER_STYLE);
    }
}

fn draw_borders(ctx: &mut RenderContext<'_>, frame: &RowFrame) {
    let stroke = Stroke::new(BORDER, 0.5);
    let rect = frame.rect;
    let bottom_left = Point::new(rect.x, rect.y);
    let bottom_right = Point::new(rect.right(), rect.y);
    let top_left = Point::new(rect.x, rect.top());
    let top_right = Point::new(rect.right(), rect.top());

    if frame.borders.top {
        ctx.line(top_left, top_right, stroke);
    }
    if frame.borders.bottom {
        ctx.line(bottom_left, bottom_right, stroke);
    }
    if frame.borders.left {
        ctx.line(bottom_left, top_left, stroke);
    }
    if frame.borders.right {
        ctx.line(bottom_right, top_right, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::canvas::{Canvas, DrawOp, RecordedPage, RecordingCanvas};
    use crate::config::ReportConfig;
    use crate::layout::PageGeometry;

    const COLUMNS: [Column; 2] = [Column::left("Name", 0.0, 4.0), Column::right("Value", 4.8, 1.6)];

    fn numbers(count: usize) -> Vec<usize> {
        (1..=count).collect()
    }

    fn budget() -> PageBudget {
        PageBudget {
            first: 3,
            continuation: 8,
        }
    }

    fn render_rows(rows: &[usize], totals: bool) -> (RecordingCanvas, TableOutcome) {
        let assets = Assets::fallback();
        let config = ReportConfig::default();
        let mut canvas = RecordingCanvas::new();
        let outcome = {
            let mut ctx = RenderContext::new(
                &mut canvas,
                &assets,
                &config,
                PageGeometry::landscape(),
                "2024",
            );
            let top = ctx.begin_content_page().expect("page");
            let mut table = PaginatedTable::new(
                "Numbers",
                COLUMNS.to_vec(),
                budget(),
                rows,
                |ctx: &mut RenderContext<'_>, row: &usize, frame: &RowFrame| {
                    draw_cells(
                        ctx,
                        frame.rect,
                        &COLUMNS,
                        &[format!("row {row}"), row.to_string()],
                        CELL_STYLE,
                    );
                },
            );
            if totals {
                table = table.with_totals(|ctx: &mut RenderContext<'_>, frame: &RowFrame| {
                    draw_cells(ctx, frame.rect, &COLUMNS, &["Total", "999"], TOTALS_STYLE);
                });
            }
            let outcome = table.render(&mut ctx, top).expect("render");
            ctx.finish_content_page();
            outcome
        };
        (canvas, outcome)
    }

    #[test]
    fn totals_land_once_after_the_last_row() {
        let rows = numbers(11);
        let (canvas, outcome) = render_rows(&rows, true);

        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.totals_page, Some(1));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.pages_containing("Total"), [1]);
        assert_eq!(canvas.pages_containing("row 3"), [0]);
        assert_eq!(canvas.pages_containing("row 4"), [1]);
        assert_eq!(canvas.pages_containing("Numbers"), [0]);
        // The column header repeats on the continuation page.
        assert_eq!(canvas.pages_containing("Value"), [0, 1]);
    }

    #[test]
    fn totals_share_the_data_column_offsets() {
        let rows = numbers(2);
        let (canvas, _) = render_rows(&rows, true);
        let page = canvas.page(0).expect("page");

        let right_edge = |text: &str| match page.text_runs(text).next() {
            Some(DrawOp::Text {
                text,
                origin,
                weight,
                size,
                ..
            }) => origin.x + Assets::fallback().fonts.text_width(text, *weight, *size),
            _ => panic!("{text} not drawn"),
        };
        assert!((right_edge("2") - right_edge("999")).abs() < 1e-6);
    }

    #[test]
    fn container_fits_the_rows_of_each_page() {
        let rows = numbers(5);
        let table = PaginatedTable::new(
            "Numbers",
            COLUMNS.to_vec(),
            budget(),
            &rows,
            |_: &mut RenderContext<'_>, _: &usize, _: &RowFrame| {},
        )
        .with_totals(|_: &mut RenderContext<'_>, _: &RowFrame| {});

        let plans = table.plan();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].page, TablePage::First);
        assert_eq!(plans[0].rows, 0..3);
        assert!(!plans[0].totals);
        assert!(plans[1].totals);

        let first = Region::TableTitle.height()
            + Region::ColumnHeader.height()
            + 3.0 * inch(ROW_HEIGHT_IN)
            + Region::BottomPadding.height();
        assert!((plans[0].container_height - first).abs() < 1e-9);

        let second = Region::TopPadding.height()
            + Region::ColumnHeader.height()
            + 2.0 * inch(ROW_HEIGHT_IN)
            + inch(HEADER_ROW_HEIGHT_IN)
            + Region::BottomPadding.height();
        assert!((plans[1].container_height - second).abs() < 1e-9);
    }

    /// Recovers the edges drawn for each row cell on `page`, in drawing order.
    ///
    /// Cell edges are the only open two-point strokes and every cell ends with
    /// its two side edges.
    fn drawn_borders(page: &RecordedPage) -> Vec<RowBorders> {
        let segments: Vec<(Point, Point)> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { points, closed: false, .. } if points.len() == 2 => {
                    Some((points[0], points[1]))
                }
                _ => None,
            })
            .collect();

        let is_vertical = |(from, to): &(Point, Point)| (from.x - to.x).abs() < 1e-9;
        let mut cells = Vec::new();
        let mut pending: Vec<(Point, Point)> = Vec::new();
        for segment in segments {
            pending.push(segment);
            if pending.iter().filter(|s| is_vertical(*s)).count() < 2 {
                continue;
            }

            let (from, to) = segment;
            let (y_min, y_max) = (from.y.min(to.y), from.y.max(to.y));
            let edge_at = |y: f64| {
                pending
                    .iter()
                    .any(|s| !is_vertical(s) && (s.0.y - y).abs() < 1e-9)
            };
            cells.push(RowBorders {
                top: edge_at(y_max),
                bottom: edge_at(y_min),
                left: true,
                right: true,
            });
            pending.clear();
        }
        assert!(pending.is_empty(), "every cell has both side edges");
        cells
    }

    #[test]
    fn borders_follow_row_position_within_each_page() {
        let no_top = RowBorders {
            top: false,
            ..RowBorders::ALL
        };
        let no_bottom = RowBorders {
            bottom: false,
            ..RowBorders::ALL
        };

        let rows = numbers(4);
        let (canvas, _) = render_rows(&rows, true);
        assert_eq!(canvas.page_count(), 2);
        let first = drawn_borders(canvas.page(0).expect("page"));
        assert_eq!(first, [no_top, RowBorders::ALL, no_bottom]);
        // A lone row on a page draws only its sides, and so does the totals row.
        let second = drawn_borders(canvas.page(1).expect("page"));
        assert_eq!(second, [RowBorders::SIDES, RowBorders::SIDES]);

        let rows = numbers(11);
        let (canvas, _) = render_rows(&rows, true);
        let continuation = drawn_borders(canvas.page(1).expect("page"));
        assert_eq!(continuation.len(), 9);
        assert_eq!(continuation[0], no_top);
        assert!(continuation[1..7].iter().all(|b| *b == RowBorders::ALL));
        assert_eq!(continuation[7], no_bottom);
        assert_eq!(continuation[8], RowBorders::SIDES);
    }

    #[test]
    fn tables_without_totals_draw_none() {
        let rows = numbers(4);
        let (canvas, outcome) = render_rows(&rows, false);
        assert_eq!(outcome.totals_page, None);
        assert!(canvas.pages_containing("Total").is_empty());
    }
}
