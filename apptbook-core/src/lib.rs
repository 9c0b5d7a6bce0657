//! Core of apptbook: appointment records, the rules they must pass,
//! and the store that keeps them on disk.
//!
//! - `appointment` and `validate` hold the data model and business rules
//! - `store` is the reducer-based collection with background write-back
//! - `storage` is the key-value port (file-backed and in-memory)
//! - `catalog` is the read-only dish list

pub mod appointment;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod persist;
pub mod storage;
pub mod store;
pub mod validate;

pub use appointment::{Appointment, AppointmentDraft};
pub use error::{AppError, AppResult, StoreError, ValidationError};
pub use store::{Action, AppointmentState, AppointmentStore, DEFAULT_STORAGE_KEY};
