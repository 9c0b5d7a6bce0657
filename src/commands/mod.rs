pub mod add;
pub mod dishes;
pub mod edit;
pub mod list;
pub mod remove;

use std::sync::Arc;

use anyhow::Result;
use apptbook_core::config::AppConfig;
use apptbook_core::storage::FileStore;
use apptbook_core::{AppointmentStore, StoreError};

pub type Store = AppointmentStore<FileStore>;

/// Appointment fields given on the command line.
pub struct Fields {
    pub client: Option<String>,
    pub vehicle: Option<String>,
    pub at: Option<String>,
    pub description: Option<String>,
}

impl Fields {
    /// True if nothing was given, so the command should prompt.
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.vehicle.is_none()
            && self.at.is_none()
            && self.description.is_none()
    }
}

/// Open the store, run a command against it, then wait for the write-back
/// to finish so nothing is lost when the process exits.
pub async fn with_store<F>(config: &AppConfig, command: F) -> Result<()>
where
    F: FnOnce(&mut Store) -> Result<()>,
{
    let data_path = config.data_path();
    tracing::debug!(data_dir = %data_path.display(), key = %config.storage_key, "Opening store");

    let storage = Arc::new(FileStore::new(data_path));
    let mut store = AppointmentStore::open(storage, config.storage_key.clone()).await;

    let result = command(&mut store);
    store.shutdown().await;
    result
}

/// Turn a store rejection into a user-facing error.
pub fn submit_error(err: StoreError) -> anyhow::Error {
    match err {
        StoreError::Invalid(reason) => anyhow::anyhow!("Validation failed: {}", reason),
        StoreError::NotFound(id) => anyhow::anyhow!("Appointment '{}' not found", id),
    }
}
