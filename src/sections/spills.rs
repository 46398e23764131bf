//! Significant spills table.

use crate::context::RenderContext;
use crate::error::ReportError;
use crate::format::grouped_two_decimals;
use crate::layout::{PageGeometry, TableFrame};
use crate::payload::{SpillData, SpillRecord};
use crate::table::{
    draw_cells, Column, PageBudget, PaginatedTable, RowFrame, TableOutcome, CELL_STYLE,
    TOTALS_STYLE,
};

use super::row_number;

pub const TITLE: &str = "Significant Spills";
pub const NOTE: &str =
    "Spills recorded during the reporting period. Volumes in litres, clean-up costs in THB.";

/// Continuation pages go straight into rows without repeating the column header.
const FRAME: TableFrame = TableFrame {
    note: true,
    repeat_column_header: false,
};

const COLUMNS: [Column; 6] = [
    Column::left("No.", 0.0, 0.5),
    Column::left("Spill Type", 0.6, 1.9),
    Column::left("Surface", 2.6, 1.9),
    Column::left("Location", 4.6, 2.0),
    Column::right("Volume (L)", 6.7, 1.3),
    Column::right("Clean-up Cost", 8.0, 1.6),
];

struct SpillRow<'p> {
    number: usize,
    record: &'p SpillRecord,
}

pub fn budget(geometry: &PageGeometry) -> Result<PageBudget, ReportError> {
    FRAME.budget(geometry, &[])
}

pub fn render(
    ctx: &mut RenderContext<'_>,
    spills: &SpillData,
    top: f64,
) -> Result<TableOutcome, ReportError> {
    let budget = budget(ctx.geometry())?;
    let rows: Vec<SpillRow<'_>> = spills
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| SpillRow {
            number: index + 1,
            record,
        })
        .collect();

    let mut table = PaginatedTable::new(
        TITLE,
        COLUMNS.to_vec(),
        budget,
        &rows,
        |ctx: &mut RenderContext<'_>, row: &SpillRow<'_>, frame: &RowFrame| {
            let record = row.record;
            draw_cells(
                ctx,
                frame.rect,
                &COLUMNS,
                &[
                    row_number(Some(row.number)),
                    record.spill_type.clone(),
                    record.surface_type.clone(),
                    record.location.clone(),
                    grouped_two_decimals(record.volume),
                    grouped_two_decimals(record.cleanup_cost),
                ],
                CELL_STYLE,
            );
        },
    )
    .with_note(NOTE)
    .with_frame(FRAME);

    if let Some(totals) = spills.totals {
        table = table.with_totals(move |ctx: &mut RenderContext<'_>, frame: &RowFrame| {
            draw_cells(
                ctx,
                frame.rect,
                &COLUMNS,
                &[
                    String::new(),
                    "Total".to_owned(),
                    String::new(),
                    String::new(),
                    grouped_two_decimals(totals.total_volume),
                    grouped_two_decimals(totals.total_cleanup_cost),
                ],
                TOTALS_STYLE,
            );
        });
    }

    table.render(ctx, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_loses_rows_to_the_note() {
        let budget = budget(&PageGeometry::landscape()).expect("budget");
        assert_eq!(budget.first, 7);
        assert_eq!(budget.continuation, 9);
    }
}
