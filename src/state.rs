use std::sync::Arc;

use anyhow::Result;
use rsvp_core::{SheetLayout, SheetStore};
use rsvp_provider_google::GoogleSheets;

use crate::config::ServerConfig;

/// Shared application state. Immutable: every request reads the sheet
/// fresh, so nothing here needs a lock.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl AppState {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        AppState { store, layout }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let sheets = GoogleSheets::new(config.spreadsheet_id.clone(), config.credentials()?)
            .with_api_url(&config.sheets_api_url)?;

        log::info!(
            "Using spreadsheet {} (sheet '{}')",
            sheets.spreadsheet_id(),
            config.sheet_name
        );

        Ok(AppState::new(Arc::new(sheets), config.layout()))
    }

    pub fn store(&self) -> &dyn SheetStore {
        self.store.as_ref()
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }
}
