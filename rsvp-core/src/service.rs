//! The two request pipelines: resolving parties and submitting RSVPs.

use chrono::NaiveDate;

use crate::batch::{SheetLayout, build_batch};
use crate::error::{RsvpError, RsvpResult};
use crate::party::{Parties, group_parties};
use crate::row_index::RowIndex;
use crate::rsvp::{Reconciliation, RsvpSubmission, Stamp};
use crate::store::SheetStore;

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Rows actually written. Less than the number of responses when some
    /// names were not found.
    pub count: usize,
    pub unmatched: Vec<String>,
}

/// Read the guest table and group it into parties.
pub async fn resolve_parties(store: &dyn SheetStore, layout: &SheetLayout) -> RsvpResult<Parties> {
    let rows = store.read_range(&layout.guest_range()).await?;

    if rows.is_empty() {
        return Err(RsvpError::EmptySheet);
    }

    let parties = group_parties(&rows);
    log::debug!("Resolved {} parties from {} rows", parties.len(), rows.len());
    Ok(parties)
}

/// Write a submission back to the sheet.
///
/// Runs as two ordered stages: read the guest names to find each row, then
/// write every matched row in one batch. Nothing holds the sheet between the
/// two stages, so rows inserted or removed in that window can shift the
/// positions used by the write.
pub async fn submit_rsvp(
    store: &dyn SheetStore,
    layout: &SheetLayout,
    submission: &RsvpSubmission,
    date: NaiveDate,
) -> RsvpResult<SubmitOutcome> {
    submission.validate()?;

    let rows = store.read_range(&layout.guest_range()).await?;
    let index = RowIndex::build(&rows);

    let stamp = Stamp {
        date,
        submitted_by: submission.submitted_by.clone(),
    };
    let Reconciliation { updates, unmatched } =
        Reconciliation::build(&index, &submission.responses, &stamp);

    let batch = build_batch(layout, &updates);
    if !batch.is_empty() {
        store.batch_write(&batch).await?;
    }

    log::info!(
        "Recorded {} of {} responses from {}",
        batch.len(),
        submission.responses.len(),
        submission.submitted_by
    );

    Ok(SubmitOutcome {
        count: batch.len(),
        unmatched,
    })
}
