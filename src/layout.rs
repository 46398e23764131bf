//! Page geometry and the layout-box model.
//!
//! Coordinates are PDF points with the origin in the bottom-left corner of the
//! page. Every vertical position of a content page is derived from a stack of
//! fixed-height [`Region`]s placed below the top of the content box, and the
//! row budget of a table page is whatever room that stack leaves for rows.

use crate::error::ReportError;
use crate::table::PageBudget;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

pub const PAGE_WIDTH_IN: f64 = 11.69;
pub const PAGE_HEIGHT_IN: f64 = 8.27;
pub const MARGIN_IN: f64 = 0.75;
/// Height of a data row.
pub const ROW_HEIGHT_IN: f64 = 0.6;
/// Height of column header, label and totals rows.
pub const HEADER_ROW_HEIGHT_IN: f64 = 0.4;

/// Converts inches to points.
pub fn inch(value: f64) -> f64 {
    value * POINTS_PER_INCH
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle hanging below `top`.
    pub fn from_top(x: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(x, top - height, width, height)
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Page size and margin of the report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::landscape()
    }
}

impl PageGeometry {
    /// The 11.69in × 8.27in landscape page with 0.75in margins.
    pub fn landscape() -> Self {
        Self {
            width: inch(PAGE_WIDTH_IN),
            height: inch(PAGE_HEIGHT_IN),
            margin: inch(MARGIN_IN),
        }
    }

    /// Rejects geometry that leaves no content box.
    pub fn validate(&self) -> Result<(), ReportError> {
        let finite = [self.width, self.height, self.margin]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ReportError::InvalidGeometry(format!(
                "page size must be positive, got {} × {} pt",
                self.width, self.height
            )));
        }
        if self.margin < 0.0 {
            return Err(ReportError::InvalidGeometry(format!(
                "margin must not be negative, got {} pt",
                self.margin
            )));
        }
        if 2.0 * self.margin >= self.width || 2.0 * self.margin >= self.height {
            return Err(ReportError::InvalidGeometry(format!(
                "margin of {} pt leaves no room on a {} × {} pt page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn page_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn content_box(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }

    /// Top edge of the area below the report header of a content page.
    pub fn body_top(&self) -> f64 {
        self.content_box().top() - Region::ReportHeader.height()
    }

    /// Height available below the report header of a content page.
    pub fn body_height(&self) -> f64 {
        self.content_box().height - Region::ReportHeader.height()
    }

    /// Baseline of the copyright footer, inside the bottom margin band.
    pub fn footer_baseline(&self) -> f64 {
        (self.margin - inch(0.25)).max(0.0)
    }
}

/// Fixed-height bands stacked from the top of a content page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Report banner plus the gap below it; present on every content page.
    ReportHeader,
    /// "Full disclosure" heading on the first disclosure page.
    SectionHeading,
    SummaryCards,
    CardGap,
    /// Table title band, first page of a table only.
    TableTitle,
    TableNote,
    ColumnHeader,
    /// Container padding on pages without a title band.
    TopPadding,
    BottomPadding,
    /// Room held back on every page for the totals row.
    TotalsSlot,
}

impl Region {
    pub fn height(self) -> f64 {
        inch(match self {
            Region::ReportHeader => REPORT_BANNER_HEIGHT_IN + 0.15,
            Region::SectionHeading => 0.45,
            Region::SummaryCards => 1.65,
            Region::CardGap => 0.4,
            Region::TableTitle => 0.35,
            Region::TableNote => 0.3,
            Region::ColumnHeader => HEADER_ROW_HEIGHT_IN,
            Region::TopPadding | Region::BottomPadding => 0.1,
            Region::TotalsSlot => HEADER_ROW_HEIGHT_IN,
        })
    }
}

/// Height of the drawn report banner.
pub const REPORT_BANNER_HEIGHT_IN: f64 = 0.55;

/// Regions the disclosure section places above the waste composition table.
pub const DISCLOSURE_INTRO: &[Region] = &[
    Region::SectionHeading,
    Region::SummaryCards,
    Region::CardGap,
];

/// Sum of the heights of `regions`.
pub fn stack_height(regions: &[Region]) -> f64 {
    regions.iter().map(|region| region.height()).sum()
}

/// Which optional bands a table draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableFrame {
    /// Explanatory note under the title on the first page.
    pub note: bool,
    /// Whether continuation pages repeat the column header.
    pub repeat_column_header: bool,
}

impl TableFrame {
    /// Container bands above the rows of a page, in drawing order.
    pub fn head_regions(&self, first_page: bool) -> Vec<Region> {
        let mut regions = Vec::with_capacity(3);
        if first_page {
            regions.push(Region::TableTitle);
            if self.note {
                regions.push(Region::TableNote);
            }
            regions.push(Region::ColumnHeader);
        } else {
            regions.push(Region::TopPadding);
            if self.repeat_column_header {
                regions.push(Region::ColumnHeader);
            }
        }
        regions
    }

    /// Bands a page reserves besides its rows.
    pub fn reserved_regions(&self, first_page: bool) -> Vec<Region> {
        let mut regions = self.head_regions(first_page);
        regions.push(Region::BottomPadding);
        regions.push(Region::TotalsSlot);
        regions
    }

    /// Derives the row budget from the space each page leaves for rows.
    ///
    /// `first_page_intro` lists the bands stacked above the table on its first page.
    pub fn budget(
        &self,
        geometry: &PageGeometry,
        first_page_intro: &[Region],
    ) -> Result<PageBudget, ReportError> {
        let body = geometry.body_height();
        let row_height = inch(ROW_HEIGHT_IN);

        let first_space =
            body - stack_height(first_page_intro) - stack_height(&self.reserved_regions(true));
        let continuation_space = body - stack_height(&self.reserved_regions(false));

        let budget = PageBudget {
            first: rows_fitting(first_space, row_height),
            continuation: rows_fitting(continuation_space, row_height),
        };

        if budget.continuation == 0 {
            return Err(ReportError::InvalidGeometry(format!(
                "a continuation page leaves {:.1} pt for rows, less than one {:.1} pt row",
                continuation_space, row_height
            )));
        }
        Ok(budget)
    }
}

fn rows_fitting(space: f64, row_height: f64) -> usize {
    if space <= 0.0 {
        return 0;
    }
    // Tolerate rounding when the space is an exact multiple of the row height.
    (space / row_height + 1e-9).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn landscape_content_box() {
        let geometry = PageGeometry::landscape();
        let content = geometry.content_box();
        assert!(approx(content.x, 54.0));
        assert!(approx(content.width, inch(10.19)));
        assert!(approx(content.height, inch(6.77)));
        assert!(approx(geometry.footer_baseline(), 36.0));
    }

    #[test]
    fn default_budgets_match_tuned_layout() {
        let geometry = PageGeometry::landscape();

        let waste = TableFrame {
            note: false,
            repeat_column_header: true,
        };
        assert_eq!(
            waste.budget(&geometry, DISCLOSURE_INTRO).expect("budget"),
            PageBudget {
                first: 3,
                continuation: 8
            }
        );
        assert_eq!(
            waste.budget(&geometry, &[]).expect("budget"),
            PageBudget {
                first: 8,
                continuation: 8
            }
        );

        let spills = TableFrame {
            note: true,
            repeat_column_header: false,
        };
        assert_eq!(
            spills.budget(&geometry, &[]).expect("budget"),
            PageBudget {
                first: 7,
                continuation: 9
            }
        );
    }

    #[test]
    fn taller_pages_hold_more_rows() {
        let geometry = PageGeometry {
            height: inch(PAGE_HEIGHT_IN + 1.2),
            ..PageGeometry::landscape()
        };
        let frame = TableFrame {
            note: false,
            repeat_column_header: true,
        };
        let budget = frame.budget(&geometry, DISCLOSURE_INTRO).expect("budget");
        assert_eq!(budget.first, 5);
        assert_eq!(budget.continuation, 10);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let negative = PageGeometry {
            width: -10.0,
            ..PageGeometry::landscape()
        };
        assert!(matches!(
            negative.validate(),
            Err(ReportError::InvalidGeometry(_))
        ));

        let swallowed = PageGeometry {
            margin: inch(5.0),
            ..PageGeometry::landscape()
        };
        assert!(swallowed.validate().is_err());
        assert!(PageGeometry::landscape().validate().is_ok());
    }

    #[test]
    fn tiny_pages_cannot_paginate() {
        let geometry = PageGeometry {
            height: inch(3.0),
            ..PageGeometry::landscape()
        };
        let frame = TableFrame::default();
        assert!(frame.budget(&geometry, &[]).is_err());
    }
}
