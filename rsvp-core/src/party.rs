//! Grouping guest rows into parties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::guest::{RowPosition, guest_rows};

/// A guest and the people they are answering for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Never empty: a guest without companions is their own party.
    pub members: Vec<String>,
    pub row_index: RowPosition,
}

/// Parties keyed by the primary guest's name.
pub type Parties = BTreeMap<String, Party>;

/// Split a companions cell on commas, trimming and dropping empty pieces.
/// Falls back to `[name]` when nothing is left.
pub fn party_members(name: &str, companions: Option<&str>) -> Vec<String> {
    let members: Vec<String> = companions
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    if members.is_empty() {
        vec![name.to_string()]
    } else {
        members
    }
}

/// Group every named data row into a party. A later row with the same name
/// replaces the earlier one.
pub fn group_parties(rows: &[Vec<String>]) -> Parties {
    let mut parties = Parties::new();

    for guest in guest_rows(rows) {
        parties.insert(
            guest.name.to_string(),
            Party {
                members: party_members(guest.name, guest.companions),
                row_index: guest.position,
            },
        );
    }

    parties
}
