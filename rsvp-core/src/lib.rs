//! Core types for the RSVP service.
//!
//! This crate holds everything that does not depend on a particular
//! spreadsheet provider or HTTP stack:
//! - `guest` / `party` / `row_index` for turning raw sheet rows into parties
//! - `rsvp` for mapping submitted responses onto sheet rows
//! - `batch` for turning matched responses into range writes
//! - `store` for the spreadsheet access trait and an in-memory implementation
//! - `service` for the two request pipelines built on top of them

pub mod batch;
pub mod error;
pub mod guest;
pub mod party;
pub mod range;
pub mod row_index;
pub mod rsvp;
pub mod service;
pub mod store;

pub use batch::{SheetLayout, build_batch};
pub use error::{RsvpError, RsvpResult};
pub use guest::{GuestRow, RowPosition, guest_rows};
pub use party::{Parties, Party, group_parties};
pub use range::{Column, SheetRange};
pub use row_index::RowIndex;
pub use rsvp::{AttendanceStatus, Reconciliation, RowUpdate, RsvpResponse, RsvpSubmission, Stamp};
pub use service::{SubmitOutcome, resolve_parties, submit_rsvp};
pub use store::{RangeWrite, SheetStore};
