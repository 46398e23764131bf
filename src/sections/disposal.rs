//! Waste diverted from disposal (GRI 306-4) and directed to disposal (GRI 306-5).
//!
//! Both tables list every method twice, once under a "Hazardous" label row and
//! once under a "Non-Hazardous" one. Label rows are shorter than data rows but
//! count toward the page budget like any other row.

use crate::context::RenderContext;
use crate::error::ReportError;
use crate::format::grouped_two_decimals;
use crate::layout::{inch, PageGeometry, TableFrame, HEADER_ROW_HEIGHT_IN, ROW_HEIGHT_IN};
use crate::payload::{DisposalBreakdown, MethodFigures};
use crate::table::{
    draw_cells, Column, PageBudget, PaginatedTable, RowFrame, TableOutcome, CELL_STYLE,
    TOTALS_STYLE,
};
use crate::theme::LABEL_ROW_BACKGROUND;

use super::row_number;

pub const HAZARDOUS_LABEL: &str = "Hazardous";
pub const NON_HAZARDOUS_LABEL: &str = "Non-Hazardous";

const FRAME: TableFrame = TableFrame {
    note: false,
    repeat_column_header: true,
};

/// Which of the two disposal tables is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisposalKind {
    Diverted,
    Directed,
}

impl DisposalKind {
    pub fn title(self) -> &'static str {
        match self {
            DisposalKind::Diverted => "Waste Diverted from Disposal",
            DisposalKind::Directed => "Waste Directed to Disposal",
        }
    }

    fn method_heading(self) -> &'static str {
        match self {
            DisposalKind::Diverted => "Recovery Operation",
            DisposalKind::Directed => "Disposal Operation",
        }
    }

    fn columns(self) -> [Column; 5] {
        [
            Column::left("No.", 0.0, 0.5),
            Column::left(self.method_heading(), 0.6, 4.0),
            Column::right("Onsite (t)", 4.8, 1.6),
            Column::right("Offsite (t)", 6.4, 1.6),
            Column::right("Total (t)", 8.0, 1.6),
        ]
    }
}

/// A row of a disposal table.
#[derive(Clone, Debug, PartialEq)]
pub enum DisposalRow<'p> {
    Label(&'static str),
    Method {
        number: usize,
        figures: &'p MethodFigures,
    },
}

impl DisposalRow<'_> {
    pub fn height(&self) -> f64 {
        match self {
            DisposalRow::Label(_) => inch(HEADER_ROW_HEIGHT_IN),
            DisposalRow::Method { .. } => inch(ROW_HEIGHT_IN),
        }
    }
}

/// Label and method rows in display order, numbered with one running counter.
pub fn rows(breakdown: &DisposalBreakdown) -> Vec<DisposalRow<'_>> {
    let mut rows =
        Vec::with_capacity(breakdown.hazardous.len() + breakdown.non_hazardous.len() + 2);
    let mut number = 0;
    for (label, group) in [
        (HAZARDOUS_LABEL, &breakdown.hazardous),
        (NON_HAZARDOUS_LABEL, &breakdown.non_hazardous),
    ] {
        rows.push(DisposalRow::Label(label));
        for figures in group {
            number += 1;
            rows.push(DisposalRow::Method { number, figures });
        }
    }
    rows
}

pub fn budget(geometry: &PageGeometry) -> Result<PageBudget, ReportError> {
    FRAME.budget(geometry, &[])
}

fn figure_cells(number: Option<usize>, label: &str, figures: &MethodFigures) -> [String; 5] {
    [
        row_number(number),
        label.to_owned(),
        grouped_two_decimals(figures.onsite),
        grouped_two_decimals(figures.offsite),
        grouped_two_decimals(figures.total),
    ]
}

pub fn render(
    ctx: &mut RenderContext<'_>,
    kind: DisposalKind,
    breakdown: &DisposalBreakdown,
    top: f64,
) -> Result<TableOutcome, ReportError> {
    let budget = budget(ctx.geometry())?;
    let columns = kind.columns();
    let rows = rows(breakdown);
    let totals = breakdown.totals();

    let table = PaginatedTable::new(
        kind.title(),
        columns.to_vec(),
        budget,
        &rows,
        move |ctx: &mut RenderContext<'_>, row: &DisposalRow<'_>, frame: &RowFrame| match row {
            DisposalRow::Label(label) => {
                ctx.fill_rect(frame.rect, LABEL_ROW_BACKGROUND);
                let label_column = &columns[1..2];
                draw_cells(ctx, frame.rect, label_column, &[*label], TOTALS_STYLE);
            }
            DisposalRow::Method { number, figures } => {
                let cells = figure_cells(Some(*number), &figures.method, figures);
                draw_cells(ctx, frame.rect, &columns, &cells, CELL_STYLE);
            }
        },
    )
    .with_frame(FRAME)
    .with_row_height(DisposalRow::height)
    .with_totals(move |ctx: &mut RenderContext<'_>, frame: &RowFrame| {
        let cells = figure_cells(None, "Total", &totals);
        draw_cells(ctx, frame.rect, &columns, &cells, TOTALS_STYLE);
    });

    table.render(ctx, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figures(method: &str, total: f64) -> MethodFigures {
        MethodFigures {
            method: method.to_owned(),
            onsite: total / 2.0,
            offsite: total / 2.0,
            total,
        }
    }

    #[test]
    fn label_rows_are_unnumbered_and_shorter() {
        let breakdown = DisposalBreakdown {
            methods: vec!["Recycling".to_owned(), "Composting".to_owned()],
            hazardous: vec![figures("Recycling", 4.0), figures("Composting", 0.0)],
            non_hazardous: vec![figures("Recycling", 10.0), figures("Composting", 6.0)],
        };
        let rows = rows(&breakdown);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], DisposalRow::Label(HAZARDOUS_LABEL));
        assert_eq!(rows[3], DisposalRow::Label(NON_HAZARDOUS_LABEL));
        let numbers: Vec<usize> = rows
            .iter()
            .filter_map(|row| match row {
                DisposalRow::Method { number, .. } => Some(*number),
                DisposalRow::Label(_) => None,
            })
            .collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        assert!(rows[0].height() < rows[1].height());
        assert_eq!(breakdown.totals().total, 20.0);
    }

    #[test]
    fn budget_is_eight_rows_per_page() {
        let budget = budget(&PageGeometry::landscape()).expect("budget");
        assert_eq!(
            budget,
            PageBudget {
                first: 8,
                continuation: 8
            }
        );
    }
}
