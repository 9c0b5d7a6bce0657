//! Business rules a candidate appointment must pass before entering the store.

use chrono::{DateTime, Utc};

use crate::appointment::{Appointment, AppointmentDraft, normalize_vehicle_model, parse_date_time};
use crate::error::ValidationError;

pub const MIN_CLIENT_NAME_LEN: usize = 3;

/// Check a draft against the current collection.
///
/// Rules run in order and the first failure wins:
/// 1. trimmed client name has at least `MIN_CLIENT_NAME_LEN` characters
/// 2. the date/time parses to an instant
/// 3. that instant is strictly after `now`
/// 4. no other record has the same normalized vehicle model in the same
///    calendar minute (`editing_id`, if given, is skipped)
///
/// On acceptance, returns the parsed instant.
pub fn validate(
    draft: &AppointmentDraft,
    existing: &[Appointment],
    editing_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    if draft.client_name.trim().chars().count() < MIN_CLIENT_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }

    let date_time = parse_date_time(&draft.date_time).ok_or(ValidationError::InvalidDateTime)?;

    if date_time <= now {
        return Err(ValidationError::NotInFuture);
    }

    let model = normalize_vehicle_model(&draft.vehicle_model);
    let duplicate = existing
        .iter()
        .filter(|it| Some(it.id.as_str()) != editing_id)
        .any(|it| it.occupies_slot(&model, &date_time));

    if duplicate {
        return Err(ValidationError::Duplicate);
    }

    Ok(date_time)
}

// =============================================================================
// Tests
// =============================================================================
