//! Sheet layout and the translation of row updates into range writes.

use crate::range::{Column, SheetRange};
use crate::rsvp::RowUpdate;
use crate::store::RangeWrite;

/// Column A holds the guest name, column B the companions.
const NAME_COLUMN: Column = Column::new(0);
const COMPANIONS_COLUMN: Column = Column::new(1);
/// Columns C..G hold status, dietary, accommodation, date, submitted by.
const FIRST_RSVP_COLUMN: Column = Column::new(2);
const RSVP_COLUMNS: u32 = 5;

/// Where the guest table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet: String,
}

impl SheetLayout {
    pub fn new(sheet: impl Into<String>) -> Self {
        SheetLayout { sheet: sheet.into() }
    }

    /// The name and companions columns, header included.
    pub fn guest_range(&self) -> SheetRange {
        SheetRange::columns(&self.sheet, NAME_COLUMN, COMPANIONS_COLUMN)
    }

    /// The five RSVP cells of one row.
    pub fn rsvp_range(&self, row: u32) -> SheetRange {
        SheetRange::row_span(
            &self.sheet,
            FIRST_RSVP_COLUMN,
            FIRST_RSVP_COLUMN.offset(RSVP_COLUMNS - 1),
            row,
        )
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::new("Sheet1")
    }
}

/// One range write per update, in update order.
pub fn build_batch(layout: &SheetLayout, updates: &[RowUpdate]) -> Vec<RangeWrite> {
    updates
        .iter()
        .map(|update| RangeWrite {
            range: layout.rsvp_range(update.row.get()),
            values: vec![update.cells()],
        })
        .collect()
}
