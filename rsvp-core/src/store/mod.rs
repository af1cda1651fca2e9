//! Spreadsheet access.
//!
//! The service only needs two calls from a backing store: read one
//! rectangular range, and write several ranges in a single batch.

mod memory;

pub use memory::MemorySheet;

use async_trait::async_trait;

use crate::error::RsvpResult;
use crate::range::SheetRange;

/// One range in a batch write. `values` is row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWrite {
    pub range: SheetRange,
    pub values: Vec<Vec<String>>,
}

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Read a range as rows of cell text. Trailing empty cells and rows may
    /// be omitted.
    async fn read_range(&self, range: &SheetRange) -> RsvpResult<Vec<Vec<String>>>;

    /// Apply all writes in one call. Atomicity is whatever the store offers.
    async fn batch_write(&self, writes: &[RangeWrite]) -> RsvpResult<()>;
}
