//! Snapshot persistence: the startup read and the background write-back queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::appointment::Appointment;
use crate::storage::KeyValueStore;

/// Read the persisted collection. Missing, unreadable or corrupt data
/// degrades to an empty collection.
pub async fn load_snapshot<S: KeyValueStore>(storage: &S, key: &str) -> Vec<Appointment> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted appointments, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Error loading appointments");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Appointment>>(&raw) {
        Ok(items) => {
            debug!(key, count = items.len(), "Loaded appointments");
            items
        }
        Err(e) => {
            warn!(key, error = %e, "Persisted appointments are corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Serialize and write a full snapshot. Failures are logged and dropped.
pub async fn write_snapshot<S: KeyValueStore>(storage: &S, key: &str, items: &[Appointment]) {
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "Error serializing appointments");
            return;
        }
    };

    match storage.set(key, json).await {
        Ok(()) => debug!(key, count = items.len(), "Saved appointments"),
        Err(e) => warn!(key, error = %e, "Error saving appointments"),
    }
}

/// Fire-and-forget writer. Snapshots are handed to a background task;
/// callers never wait on the write.
///
/// The task writes snapshots in the order they were queued and skips any
/// that were superseded while it was busy, so the last snapshot queued is
/// always the last one written.
pub struct WriteBack {
    sender: mpsc::UnboundedSender<Vec<Appointment>>,
    handle: JoinHandle<()>,
}

impl WriteBack {
    /// Start the writer task. Must be called from within a tokio runtime.
    pub fn spawn<S: KeyValueStore>(storage: Arc<S>, key: String) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(storage, key, receiver));
        WriteBack { sender, handle }
    }

    pub fn enqueue(&self, snapshot: Vec<Appointment>) {
        if self.sender.send(snapshot).is_err() {
            warn!("Write-back task is gone, snapshot dropped");
        }
    }

    /// Close the queue and wait until every pending snapshot is written.
    pub async fn shutdown(self) {
        drop(self.sender);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Write-back task failed");
        }
    }
}

async fn run_writer<S: KeyValueStore>(
    storage: Arc<S>,
    key: String,
    mut receiver: mpsc::UnboundedReceiver<Vec<Appointment>>,
) {
    while let Some(mut snapshot) = receiver.recv().await {
        while let Ok(newer) = receiver.try_recv() {
            snapshot = newer;
        }
        write_snapshot(storage.as_ref(), &key, &snapshot).await;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    const KEY: &str = "@appointments_v1";

    fn appointment(id: &str, model: &str) -> Appointment {
        Appointment {
            id: id.into(),
            client_name: "Ana García".into(),
            vehicle_model: model.into(),
            date_time: Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap(),
            description: Some("Brake check".into()),
        }
    }

    #[tokio::test]
    async fn write_then_load_round_trips() {
        let storage = MemoryStore::new();
        let items = vec![appointment("2", "Honda Civic"), appointment("1", "Toyota Corolla")];

        write_snapshot(&storage, KEY, &items).await;
        assert_eq!(load_snapshot(&storage, KEY).await, items);
    }

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let storage = MemoryStore::new();
        assert!(load_snapshot(&storage, KEY).await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_data_loads_empty() {
        let storage = MemoryStore::new();
        storage.insert(KEY, "{not json").unwrap();

        assert!(load_snapshot(&storage, KEY).await.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_loads_empty() {
        let storage = MemoryStore::new();
        storage.insert(KEY, r#"{"items": []}"#).unwrap();

        assert!(load_snapshot(&storage, KEY).await.is_empty());
    }

    #[tokio::test]
    async fn last_enqueued_snapshot_wins() {
        let storage = Arc::new(MemoryStore::new());
        let writer = WriteBack::spawn(storage.clone(), KEY.to_string());

        writer.enqueue(vec![appointment("1", "Toyota Corolla")]);
        writer.enqueue(vec![]);
        writer.enqueue(vec![appointment("3", "Kia Rio"), appointment("1", "Toyota Corolla")]);
        writer.shutdown().await;

        let stored = load_snapshot(storage.as_ref(), KEY).await;
        let ids: Vec<_> = stored.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }
}
