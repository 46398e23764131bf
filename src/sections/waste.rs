//! Waste composition table (GRI 306-3).

use crate::context::RenderContext;
use crate::error::ReportError;
use crate::format::grouped_two_decimals;
use crate::layout::{PageGeometry, TableFrame, DISCLOSURE_INTRO};
use crate::payload::{WasteCategory, WasteComposition};
use crate::table::{
    draw_cells, Column, PageBudget, PaginatedTable, RowFrame, TableOutcome, CELL_STYLE,
    TOTALS_STYLE,
};

use super::row_number;

pub const TITLE: &str = "Waste Composition";

const FRAME: TableFrame = TableFrame {
    note: false,
    repeat_column_header: true,
};

const COLUMNS: [Column; 5] = [
    Column::left("No.", 0.0, 0.5),
    Column::left("Waste Category", 0.6, 4.0),
    Column::right("Generated (t)", 4.8, 1.6),
    Column::right("Diverted (t)", 6.4, 1.6),
    Column::right("Directed (t)", 8.0, 1.6),
];

struct WasteRow<'p> {
    number: usize,
    category: &'p WasteCategory,
}

/// The table shares its first page with the section heading and summary cards.
pub fn budget(geometry: &PageGeometry) -> Result<PageBudget, ReportError> {
    FRAME.budget(geometry, DISCLOSURE_INTRO)
}

pub fn render(
    ctx: &mut RenderContext<'_>,
    composition: &WasteComposition,
    top: f64,
) -> Result<TableOutcome, ReportError> {
    let budget = budget(ctx.geometry())?;
    let rows: Vec<WasteRow<'_>> = composition
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| WasteRow {
            number: index + 1,
            category,
        })
        .collect();

    let mut table = PaginatedTable::new(
        TITLE,
        COLUMNS.to_vec(),
        budget,
        &rows,
        |ctx: &mut RenderContext<'_>, row: &WasteRow<'_>, frame: &RowFrame| {
            let category = row.category;
            draw_cells(
                ctx,
                frame.rect,
                &COLUMNS,
                &[
                    row_number(Some(row.number)),
                    category.name.clone(),
                    grouped_two_decimals(category.generated),
                    grouped_two_decimals(category.diverted),
                    grouped_two_decimals(category.directed),
                ],
                CELL_STYLE,
            );
        },
    )
    .with_frame(FRAME);

    if let Some(totals) = composition.totals {
        table = table.with_totals(move |ctx: &mut RenderContext<'_>, frame: &RowFrame| {
            draw_cells(
                ctx,
                frame.rect,
                &COLUMNS,
                &[
                    String::new(),
                    "Total".to_owned(),
                    grouped_two_decimals(totals.generated),
                    grouped_two_decimals(totals.diverted),
                    grouped_two_decimals(totals.directed),
                ],
                TOTALS_STYLE,
            );
        });
    }

    table.render(ctx, top)
}
