//! A1-notation range references (`Sheet1!C2:G2`, `'Guest List'!A:B`).

use std::fmt;

/// A sheet column, zero-based (`A` is 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    pub const fn new(index: u32) -> Self {
        Column(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The column `n` places to the right.
    pub fn offset(self, n: u32) -> Self {
        Column(self.0 + n)
    }

    pub fn letters(self) -> String {
        let mut n = self.0 + 1;
        let mut out = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            out.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        out.iter().rev().collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

/// One end of a range. A missing row means the whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub column: Column,
    pub row: Option<u32>,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "{}{}", self.column, row),
            None => write!(f, "{}", self.column),
        }
    }
}

/// A rectangular range on a named sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub start: CellRef,
    pub end: CellRef,
}

impl SheetRange {
    /// Whole columns, e.g. `Sheet1!A:B`.
    pub fn columns(sheet: &str, first: Column, last: Column) -> Self {
        SheetRange {
            sheet: sheet.to_string(),
            start: CellRef { column: first, row: None },
            end: CellRef { column: last, row: None },
        }
    }

    /// A span of columns on a single row, e.g. `Sheet1!C2:G2`.
    pub fn row_span(sheet: &str, first: Column, last: Column, row: u32) -> Self {
        SheetRange {
            sheet: sheet.to_string(),
            start: CellRef { column: first, row: Some(row) },
            end: CellRef { column: last, row: Some(row) },
        }
    }

    pub fn width(&self) -> usize {
        self.end.column.index() - self.start.column.index() + 1
    }
}

fn needs_quotes(sheet: &str) -> bool {
    !sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quotes(&self.sheet) {
            write!(f, "'{}'", self.sheet.replace('\'', "''"))?;
        } else {
            f.write_str(&self.sheet)?;
        }
        write!(f, "!{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(Column::new(0).letters(), "A");
        assert_eq!(Column::new(6).letters(), "G");
        assert_eq!(Column::new(25).letters(), "Z");
        assert_eq!(Column::new(26).letters(), "AA");
        assert_eq!(Column::new(701).letters(), "ZZ");
    }

    #[test]
    fn test_display_plain_and_quoted_sheets() {
        let range = SheetRange::row_span("Sheet1", Column::new(2), Column::new(6), 2);
        assert_eq!(range.to_string(), "Sheet1!C2:G2");

        let range = SheetRange::columns("Guest List", Column::new(0), Column::new(1));
        assert_eq!(range.to_string(), "'Guest List'!A:B");

        let range = SheetRange::columns("Bob's", Column::new(0), Column::new(0));
        assert_eq!(range.to_string(), "'Bob''s'!A:A");
    }

    #[test]
    fn test_width() {
        let range = SheetRange::row_span("Sheet1", Column::new(2), Column::new(6), 9);
        assert_eq!(range.width(), 5);
    }
}
