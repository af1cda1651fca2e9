//! RSVP submissions and their mapping onto sheet rows.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::guest::RowPosition;
use crate::row_index::RowIndex;

/// One guest's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpResponse {
    pub name: String,
    pub attending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
}

/// A full submission: who is answering, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub submitted_by: String,
    pub responses: Vec<RsvpResponse>,
}

impl RsvpSubmission {
    /// Reject submissions that could never be written meaningfully.
    pub fn validate(&self) -> RsvpResult<()> {
        if self.submitted_by.trim().is_empty() {
            return Err(RsvpError::InvalidSubmission(
                "submittedBy must not be empty".into(),
            ));
        }

        if let Some(i) = self.responses.iter().position(|r| r.name.is_empty()) {
            return Err(RsvpError::InvalidSubmission(format!(
                "responses[{i}].name must not be empty"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Attending,
    NotAttending,
}

impl From<bool> for AttendanceStatus {
    fn from(attending: bool) -> Self {
        if attending {
            AttendanceStatus::Attending
        } else {
            AttendanceStatus::NotAttending
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Attending => f.write_str("Attending"),
            AttendanceStatus::NotAttending => f.write_str("Not Attending"),
        }
    }
}

/// Who submitted a batch and when. Applied to every row in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub date: NaiveDate,
    pub submitted_by: String,
}

/// The cells to write for one matched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub row: RowPosition,
    pub status: AttendanceStatus,
    pub dietary: String,
    pub accommodation: String,
    pub date: NaiveDate,
    pub submitted_by: String,
}

impl RowUpdate {
    /// Cell values in sheet order: status, dietary, accommodation, date, submitted by.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.status.to_string(),
            self.dietary.clone(),
            self.accommodation.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.submitted_by.clone(),
        ]
    }
}

/// Outcome of matching a batch of responses against the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// In submission order.
    pub updates: Vec<RowUpdate>,
    /// Names that were not found in the sheet, in submission order.
    pub unmatched: Vec<String>,
}

impl Reconciliation {
    /// Map each response to its row. Unknown names are skipped and reported,
    /// never failing the rest of the batch.
    pub fn build(index: &RowIndex, responses: &[RsvpResponse], stamp: &Stamp) -> Self {
        let mut reconciliation = Reconciliation::default();

        for response in responses {
            let Some(row) = index.get(&response.name) else {
                log::warn!("No row found for guest: {}", response.name);
                reconciliation.unmatched.push(response.name.clone());
                continue;
            };

            reconciliation.updates.push(RowUpdate {
                row,
                status: response.attending.into(),
                dietary: response.dietary.clone().unwrap_or_default(),
                accommodation: response.accommodation.clone().unwrap_or_default(),
                date: stamp.date,
                submitted_by: stamp.submitted_by.clone(),
            });
        }

        reconciliation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RowIndex {
        let rows: Vec<Vec<String>> = [
            vec!["Name", "Companions"],
            vec!["Alice", "Bob, Carol"],
            vec!["Dave", ""],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect();
        RowIndex::build(&rows)
    }

    fn stamp() -> Stamp {
        Stamp {
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            submitted_by: "X".into(),
        }
    }

    fn response(name: &str, attending: bool) -> RsvpResponse {
        RsvpResponse {
            name: name.into(),
            attending,
            dietary: None,
            accommodation: None,
        }
    }

    #[test]
    fn test_matched_response_becomes_row_update() {
        let mut alice = response("Alice", true);
        alice.dietary = Some("Vegan".into());

        let result = Reconciliation::build(&index(), &[alice, response("Ghost", false)], &stamp());

        assert_eq!(result.updates.len(), 1);
        assert_eq!(result.unmatched, vec!["Ghost"]);

        let update = &result.updates[0];
        assert_eq!(update.row, RowPosition::new(2));
        assert_eq!(
            update.cells(),
            vec!["Attending", "Vegan", "", "2026-06-01", "X"]
        );
    }

    #[test]
    fn test_input_order_is_preserved() {
        let responses = [
            response("Dave", false),
            response("Nobody", true),
            response("Alice", true),
        ];
        let result = Reconciliation::build(&index(), &responses, &stamp());

        let rows: Vec<u32> = result.updates.iter().map(|u| u.row.get()).collect();
        assert_eq!(rows, vec![3, 2]);
        assert_eq!(result.updates[0].status, AttendanceStatus::NotAttending);
        assert_eq!(result.updates[0].cells()[0], "Not Attending");
    }

    #[test]
    fn test_all_unmatched_yields_no_updates() {
        let result = Reconciliation::build(&index(), &[response("alice", true)], &stamp());
        assert!(result.updates.is_empty());
        assert_eq!(result.unmatched, vec!["alice"]);
    }

    #[test]
    fn test_submission_parses_camel_case_with_optional_fields() {
        let json = r#"{
            "submittedBy": "X",
            "responses": [
                {"name": "Alice", "attending": true, "dietary": "Vegan"},
                {"name": "Ghost", "attending": false}
            ]
        }"#;
        let submission: RsvpSubmission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.submitted_by, "X");
        assert_eq!(submission.responses.len(), 2);
        assert_eq!(submission.responses[0].dietary.as_deref(), Some("Vegan"));
        assert_eq!(submission.responses[1].accommodation, None);
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_submission_missing_attending_fails_to_parse() {
        let json = r#"{"submittedBy": "X", "responses": [{"name": "Alice"}]}"#;
        assert!(serde_json::from_str::<RsvpSubmission>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_submitter_and_nameless_responses() {
        let blank = RsvpSubmission {
            submitted_by: "  ".into(),
            responses: vec![response("Alice", true)],
        };
        assert!(matches!(blank.validate(), Err(RsvpError::InvalidSubmission(_))));

        let nameless = RsvpSubmission {
            submitted_by: "X".into(),
            responses: vec![response("Alice", true), response("", true)],
        };
        let err = nameless.validate().unwrap_err();
        assert!(err.to_string().contains("responses[1].name"));
    }
}
