//! Guest rows as read from the sheet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based position of a row within the full read range. The header is row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowPosition(u32);

impl RowPosition {
    pub const fn new(position: u32) -> Self {
        RowPosition(position)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn from_index(index: usize) -> Self {
        RowPosition(index as u32 + 1)
    }
}

impl fmt::Display for RowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One data row of the guest table: the invitee's name and the raw
/// comma-separated companions cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRow<'a> {
    pub name: &'a str,
    pub companions: Option<&'a str>,
    pub position: RowPosition,
}

/// Walk the data rows of a guest table, skipping the header and any row
/// without a name.
///
/// Party grouping and the row index are both built from this walk, so the
/// positions they report always agree.
pub fn guest_rows(rows: &[Vec<String>]) -> impl Iterator<Item = GuestRow<'_>> {
    rows.iter().enumerate().skip(1).filter_map(|(i, row)| {
        let name = row.first().map(String::as_str).filter(|n| !n.is_empty())?;
        Some(GuestRow {
            name,
            companions: row.get(1).map(String::as_str),
            position: RowPosition::from_index(i),
        })
    })
}
