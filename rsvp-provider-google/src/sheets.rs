//! Sheets v4 values API client.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rsvp_core::{RangeWrite, RsvpError, RsvpResult, SheetRange, SheetStore};
use url::Url;

use crate::credentials::Credentials;
use crate::session::Session;
use crate::types::{ApiErrorBody, BatchUpdateRequest, BatchUpdateResponse, ValueRange, WriteRange};

pub const DEFAULT_API_URL: &str = "https://sheets.googleapis.com";

/// A single spreadsheet accessed through the Sheets API.
#[derive(Clone)]
pub struct GoogleSheets {
    http: reqwest::Client,
    api_url: Url,
    spreadsheet_id: String,
    credentials: Credentials,
}

impl GoogleSheets {
    pub fn new(spreadsheet_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            // expect safe: constant URL
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        }
    }

    /// Point the client at another API host (a proxy or a test server).
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = Url::parse(api_url).with_context(|| format!("Invalid API URL: {api_url}"))?;
        Ok(self)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(tail);
        Ok(url)
    }

    async fn session(&self) -> RsvpResult<Session> {
        Session::create(&self.http, &self.credentials)
            .await
            .map_err(|e| RsvpError::Auth(format!("{e:#}")))
    }

    /// `GET /v4/spreadsheets/{id}/values/{range}`
    pub async fn get_values(&self, session: &Session, range: &SheetRange) -> Result<Vec<Vec<String>>> {
        let range_ref = range.to_string();
        let url = self.endpoint(&["values", range_ref.as_str()])?;
        log::debug!("Reading {range_ref} from {}", self.spreadsheet_id);

        let response = self
            .http
            .get(url)
            .bearer_auth(session.access_token())
            .send()
            .await
            .with_context(|| format!("Failed to read {range_ref}"))?;

        let response = check_status(response, "Read").await?;
        let value_range: ValueRange = response
            .json()
            .await
            .with_context(|| format!("Failed to parse values for {range_ref}"))?;

        Ok(value_range.into_rows())
    }

    /// `POST /v4/spreadsheets/{id}/values:batchUpdate` with raw value input.
    pub async fn batch_update(&self, session: &Session, writes: &[RangeWrite]) -> Result<BatchUpdateResponse> {
        let url = self.endpoint(&["values:batchUpdate"])?;
        let body = BatchUpdateRequest {
            value_input_option: "RAW",
            data: writes
                .iter()
                .map(|w| WriteRange {
                    range: w.range.to_string(),
                    major_dimension: "ROWS",
                    values: &w.values,
                })
                .collect(),
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(session.access_token())
            .json(&body)
            .send()
            .await
            .context("Failed to send batch update")?;

        let response = check_status(response, "Batch update").await?;
        let summary: BatchUpdateResponse = response
            .json()
            .await
            .context("Failed to parse batch update response")?;

        log::debug!(
            "Batch update wrote {} cells across {} rows in {}",
            summary.total_updated_cells,
            summary.total_updated_rows,
            self.spreadsheet_id
        );

        Ok(summary)
    }
}

async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body);

    anyhow::bail!("{what} failed ({status}): {message}")
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn read_range(&self, range: &SheetRange) -> RsvpResult<Vec<Vec<String>>> {
        let session = self.session().await?;
        self.get_values(&session, range)
            .await
            .map_err(|e| RsvpError::Store(format!("{e:#}")))
    }

    async fn batch_write(&self, writes: &[RangeWrite]) -> RsvpResult<()> {
        let session = self.session().await?;
        self.batch_update(&session, writes)
            .await
            .map(|_| ())
            .map_err(|e| RsvpError::Store(format!("{e:#}")))
    }
}
