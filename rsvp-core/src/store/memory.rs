//! In-memory sheet store for local runs and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{RsvpError, RsvpResult};
use crate::range::SheetRange;
use crate::store::{RangeWrite, SheetStore};

/// Sheets held as plain grids, with a log of every batch written.
///
/// Reads behave like the Google values API: trailing empty cells and rows
/// are left out of the result.
#[derive(Default)]
pub struct MemorySheet {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    batches: Mutex<Vec<Vec<RangeWrite>>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with one sheet holding `rows`.
    pub fn with_sheet(name: &str, rows: Vec<Vec<String>>) -> Self {
        let store = Self::new();
        lock(&store.sheets).insert(name.to_string(), rows);
        store
    }

    /// Current contents of a sheet.
    pub fn rows(&self, sheet: &str) -> Option<Vec<Vec<String>>> {
        lock(&self.sheets).get(sheet).cloned()
    }

    /// Text of one cell, `None` when outside the stored grid.
    pub fn cell(&self, sheet: &str, row: u32, column: usize) -> Option<String> {
        let sheets = lock(&self.sheets);
        let grid = sheets.get(sheet)?;
        grid.get(row.checked_sub(1)? as usize)?.get(column).cloned()
    }

    /// Every batch passed to `batch_write`, oldest first.
    pub fn batches(&self) -> Vec<Vec<RangeWrite>> {
        lock(&self.batches).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn unknown_sheet(range: &SheetRange) -> RsvpError {
    RsvpError::Store(format!("Unable to parse range: {range}"))
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn read_range(&self, range: &SheetRange) -> RsvpResult<Vec<Vec<String>>> {
        let sheets = lock(&self.sheets);
        let grid = sheets.get(&range.sheet).ok_or_else(|| unknown_sheet(range))?;

        let first_row = range.start.row.unwrap_or(1) as usize - 1;
        let last_row = range
            .end
            .row
            .map(|r| r as usize)
            .unwrap_or(grid.len())
            .min(grid.len());
        let (first_col, last_col) = (range.start.column.index(), range.end.column.index());

        let mut out: Vec<Vec<String>> = (first_row..last_row)
            .map(|r| {
                let row = &grid[r];
                let mut cells: Vec<String> = (first_col..=last_col)
                    .map(|c| row.get(c).cloned().unwrap_or_default())
                    .collect();
                while cells.last().is_some_and(|c| c.is_empty()) {
                    cells.pop();
                }
                cells
            })
            .collect();

        while out.last().is_some_and(|r| r.is_empty()) {
            out.pop();
        }

        Ok(out)
    }

    async fn batch_write(&self, writes: &[RangeWrite]) -> RsvpResult<()> {
        let mut sheets = lock(&self.sheets);

        // Validate everything before touching any cell so a bad write leaves
        // the sheet unchanged.
        for write in writes {
            if !sheets.contains_key(&write.range.sheet) {
                return Err(unknown_sheet(&write.range));
            }
            if write.values.iter().any(|row| row.len() > write.range.width()) {
                return Err(RsvpError::Store(format!(
                    "Too many values for range {}",
                    write.range
                )));
            }
            if let (Some(start), Some(end)) = (write.range.start.row, write.range.end.row) {
                if write.values.len() > (end.saturating_sub(start) + 1) as usize {
                    return Err(RsvpError::Store(format!(
                        "Too many rows for range {}",
                        write.range
                    )));
                }
            }
        }

        for write in writes {
            let Some(grid) = sheets.get_mut(&write.range.sheet) else {
                continue;
            };
            let first_row = write.range.start.row.unwrap_or(1) as usize - 1;
            let first_col = write.range.start.column.index();

            for (dr, values) in write.values.iter().enumerate() {
                let r = first_row + dr;
                if grid.len() <= r {
                    grid.resize_with(r + 1, Vec::new);
                }
                let row = &mut grid[r];
                for (dc, value) in values.iter().enumerate() {
                    let c = first_col + dc;
                    if row.len() <= c {
                        row.resize(c + 1, String::new());
                    }
                    row[c] = value.clone();
                }
            }
        }

        lock(&self.batches).push(writes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Column;

    fn sheet() -> MemorySheet {
        MemorySheet::with_sheet(
            "Sheet1",
            vec![
                vec!["Name".into(), "Companions".into(), "Status".into()],
                vec!["Alice".into(), "".into(), "".into()],
                vec!["".into(), "".into()],
            ],
        )
    }

    #[tokio::test]
    async fn test_read_trims_trailing_cells_and_rows() {
        let store = sheet();
        let rows = store
            .read_range(&SheetRange::columns("Sheet1", Column::new(0), Column::new(1)))
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![vec!["Name".to_string(), "Companions".to_string()], vec!["Alice".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_read_unknown_sheet_fails() {
        let store = sheet();
        let result = store
            .read_range(&SheetRange::columns("Other", Column::new(0), Column::new(1)))
            .await;
        assert!(matches!(result, Err(RsvpError::Store(_))));
    }

    #[tokio::test]
    async fn test_write_extends_rows_and_is_logged() {
        let store = sheet();
        let write = RangeWrite {
            range: SheetRange::row_span("Sheet1", Column::new(2), Column::new(4), 2),
            values: vec![vec!["Attending".into(), "Vegan".into(), "".into()]],
        };
        store.batch_write(&[write.clone()]).await.unwrap();

        assert_eq!(store.cell("Sheet1", 2, 2).as_deref(), Some("Attending"));
        assert_eq!(store.cell("Sheet1", 2, 3).as_deref(), Some("Vegan"));
        assert_eq!(store.cell("Sheet1", 2, 0).as_deref(), Some("Alice"));
        assert_eq!(store.batches(), vec![vec![write]]);
    }

    #[tokio::test]
    async fn test_oversized_write_leaves_sheet_untouched() {
        let store = sheet();
        let ok = RangeWrite {
            range: SheetRange::row_span("Sheet1", Column::new(2), Column::new(2), 2),
            values: vec![vec!["Attending".into()]],
        };
        let too_wide = RangeWrite {
            range: SheetRange::row_span("Sheet1", Column::new(2), Column::new(2), 3),
            values: vec![vec!["a".into(), "b".into()]],
        };

        assert!(store.batch_write(&[ok, too_wide]).await.is_err());
        assert_eq!(store.cell("Sheet1", 2, 2).as_deref(), Some(""));
        assert!(store.batches().is_empty());
    }
}
