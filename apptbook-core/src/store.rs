//! The appointment store: a reducer over an ordered collection, with
//! background write-back to durable storage.

use std::sync::Arc;

use crate::appointment::{Appointment, AppointmentDraft, new_id};
use crate::clock::Clock;
use crate::error::StoreError;
use crate::persist::{WriteBack, load_snapshot};
use crate::storage::KeyValueStore;
use crate::validate::validate;

/// Fixed storage key for the appointment collection.
pub const DEFAULT_STORAGE_KEY: &str = "@appointments_v1";

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the collection wholesale and mark the store initialized.
    Load(Vec<Appointment>),
    /// Prepend a record.
    Add(Appointment),
    /// Replace the record with the same id. No-op if absent.
    Update(Appointment),
    /// Drop the record with this id. No-op if absent.
    Remove(String),
}

/// Snapshot of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentState {
    pub items: Vec<Appointment>,
    /// Set once the persisted collection has been read.
    pub loaded: bool,
}

impl AppointmentState {
    /// Apply an action, producing the next snapshot.
    pub fn reduce(self, action: Action) -> AppointmentState {
        match action {
            Action::Load(items) => AppointmentState {
                items,
                loaded: true,
            },
            Action::Add(appointment) => {
                let mut items = Vec::with_capacity(self.items.len() + 1);
                items.push(appointment);
                items.extend(self.items);
                AppointmentState {
                    items,
                    loaded: self.loaded,
                }
            }
            Action::Update(appointment) => {
                let items = self
                    .items
                    .into_iter()
                    .map(|it| {
                        if it.id == appointment.id {
                            appointment.clone()
                        } else {
                            it
                        }
                    })
                    .collect();
                AppointmentState {
                    items,
                    loaded: self.loaded,
                }
            }
            Action::Remove(id) => {
                let items = self.items.into_iter().filter(|it| it.id != id).collect();
                AppointmentState {
                    items,
                    loaded: self.loaded,
                }
            }
        }
    }
}

/// Owns the in-memory collection and persists it after every change.
///
/// The in-memory state is the source of truth for the running process.
/// Writes are queued in the background and never block or undo a mutation.
pub struct AppointmentStore<S: KeyValueStore> {
    state: AppointmentState,
    storage: Arc<S>,
    key: String,
    writer: WriteBack,
}

impl<S: KeyValueStore> AppointmentStore<S> {
    /// Create an uninitialized store. Must be called from within a tokio runtime.
    ///
    /// Until [`load`](Self::load) runs, mutations apply in memory only and
    /// are never written, so an empty initial value cannot overwrite what
    /// is on disk.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let writer = WriteBack::spawn(storage.clone(), key.clone());

        AppointmentStore {
            state: AppointmentState::default(),
            storage,
            key,
            writer,
        }
    }

    /// Create a store and load the persisted collection.
    pub async fn open(storage: Arc<S>, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        store.load().await;
        store
    }

    pub async fn load(&mut self) {
        let items = load_snapshot(self.storage.as_ref(), &self.key).await;
        self.dispatch(Action::Load(items));
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_loaded(&self) -> bool {
        self.state.loaded
    }

    pub fn state(&self) -> &AppointmentState {
        &self.state
    }

    pub fn items(&self) -> &[Appointment] {
        &self.state.items
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.state.items.iter().find(|it| it.id == id)
    }

    /// Apply an action. If the store is initialized and the collection
    /// changed, the new snapshot is queued for write-back.
    pub fn dispatch(&mut self, action: Action) {
        let persist = !matches!(action, Action::Load(_));
        let next = self.state.clone().reduce(action);
        let changed = next.items != self.state.items;
        self.state = next;

        if persist && changed && self.state.loaded {
            self.writer.enqueue(self.state.items.clone());
        }
    }

    /// Validate a new appointment and add it with a fresh id.
    pub fn submit_new(
        &mut self,
        draft: AppointmentDraft,
        clock: &impl Clock,
    ) -> Result<Appointment, StoreError> {
        let date_time = validate(&draft, self.items(), None, clock.now())?;
        let appointment = draft.into_appointment(new_id(), date_time);

        self.dispatch(Action::Add(appointment.clone()));
        Ok(appointment)
    }

    /// Validate a replacement for an existing appointment and store it.
    ///
    /// Unlike [`Action::Update`], an unknown id is an error here.
    pub fn submit_edit(
        &mut self,
        id: &str,
        draft: AppointmentDraft,
        clock: &impl Clock,
    ) -> Result<Appointment, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let date_time = validate(&draft, self.items(), Some(id), clock.now())?;
        let appointment = draft.into_appointment(id.to_string(), date_time);

        self.dispatch(Action::Update(appointment.clone()));
        Ok(appointment)
    }

    /// Remove an appointment. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let existed = self.get(id).is_some();
        self.dispatch(Action::Remove(id.to_string()));
        existed
    }

    /// Wait for queued writes to finish. Call before the process exits.
    pub async fn shutdown(self) {
        self.writer.shutdown().await;
    }
}

// =============================================================================
// Tests
// =============================================================================
