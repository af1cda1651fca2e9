//! Name to row-position index used when writing RSVPs back.

use std::collections::HashMap;

use crate::guest::{RowPosition, guest_rows};

/// Maps each guest name to the row it lives on.
///
/// Built from a fresh read on every submission and dropped afterwards, so it
/// never outlives the request that read it.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    positions: HashMap<String, RowPosition>,
}

impl RowIndex {
    /// Index every named data row. When a name repeats, the later row wins.
    pub fn build(rows: &[Vec<String>]) -> Self {
        let mut positions = HashMap::new();

        for guest in guest_rows(rows) {
            if let Some(previous) = positions.insert(guest.name.to_string(), guest.position) {
                log::warn!(
                    "Duplicate guest name '{}' on rows {} and {}; using row {}",
                    guest.name,
                    previous,
                    guest.position,
                    guest.position
                );
            }
        }

        RowIndex { positions }
    }

    pub fn get(&self, name: &str) -> Option<RowPosition> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_positions_count_the_header() {
        let sheet = rows(&[&["Name", "Companions"], &["Alice", "Bob, Carol"], &["Dave", ""]]);
        let index = RowIndex::build(&sheet);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Alice"), Some(RowPosition::new(2)));
        assert_eq!(index.get("Dave"), Some(RowPosition::new(3)));
        assert_eq!(index.get("Name"), None);
    }

    #[test]
    fn test_lookup_is_exact() {
        let sheet = rows(&[&["Name"], &["Alice"]]);
        let index = RowIndex::build(&sheet);

        assert_eq!(index.get("alice"), None);
        assert_eq!(index.get(" Alice"), None);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let sheet = rows(&[&["Name"], &["Alice"], &["Bob"], &["Alice"]]);
        let index = RowIndex::build(&sheet);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Alice"), Some(RowPosition::new(4)));
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let index = RowIndex::build(&rows(&[&["Name", "Companions"]]));
        assert!(index.is_empty());
    }
}
