//! rsvp-provider-google - Google Sheets backing store for the RSVP service.
//!
//! Authenticates either with a service account key (JWT bearer grant, a new
//! access token per request) or with a pre-issued access token, and talks to
//! the Sheets v4 values API.

mod credentials;
mod session;
mod sheets;
mod types;

pub use credentials::{Credentials, ServiceAccountKey};
pub use session::{SCOPES, Session};
pub use sheets::{DEFAULT_API_URL, GoogleSheets};
