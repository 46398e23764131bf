use std::ops::Range;

/// Maximum number of rows a table may place on each of its pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageBudget {
    /// Rows on the page the table starts on.
    pub first: usize,
    /// Rows on every continuation page.
    pub continuation: usize,
}

impl PageBudget {
    pub fn max_rows(&self, page_index: usize) -> usize {
        if page_index == 0 {
            self.first
        } else {
            self.continuation
        }
    }
}

/// Splits `row_count` rows into consecutive page groups.
///
/// The first group always exists, even when it is empty because the first page
/// has no room for rows. Returns no groups when there are no rows.
pub fn paginate(row_count: usize, budget: PageBudget) -> Vec<Range<usize>> {
    if row_count == 0 {
        return Vec::new();
    }

    let mut groups = Vec::new();
    let mut start = 0;
    let mut page_index = 0;
    while start < row_count || page_index == 0 {
        let capacity = budget.max_rows(page_index);
        if capacity == 0 && page_index > 0 {
            // A zero continuation budget would never terminate.
            groups.push(start..row_count);
            break;
        }
        let end = (start + capacity).min(row_count);
        groups.push(start..end);
        start = end;
        page_index += 1;
    }
    groups
}

/// Number of pages needed for `row_count` rows.
pub fn page_count(row_count: usize, budget: PageBudget) -> usize {
    if row_count <= budget.first {
        return 1;
    }
    if budget.continuation == 0 {
        return 2;
    }
    let remaining = row_count - budget.first;
    1 + (remaining + budget.continuation - 1) / budget.continuation
}

/// Which edges of a row cell are outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBorders {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl RowBorders {
    pub const ALL: RowBorders = RowBorders {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    pub const SIDES: RowBorders = RowBorders {
        top: false,
        bottom: false,
        left: true,
        right: true,
    };

    /// Borders of a row from its position within its page group.
    pub fn for_position(first_on_page: bool, last_in_group: bool) -> Self {
        match (first_on_page, last_in_group) {
            (false, false) => Self::ALL,
            (true, false) => RowBorders {
                top: false,
                ..Self::ALL
            },
            (false, true) => RowBorders {
                bottom: false,
                ..Self::ALL
            },
            (true, true) => Self::SIDES,
        }
    }
}
