//! Appointment records and the helpers used to compare them.

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Wall-clock formats accepted in addition to RFC 3339.
/// These are interpreted in the machine's local time zone.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A scheduled service appointment.
///
/// Serialized with camelCase field names so snapshots written by earlier
/// versions of the app load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub vehicle_model: String,
    pub date_time: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub description: Option<String>,
}

impl Appointment {
    pub fn normalized_vehicle_model(&self) -> String {
        normalize_vehicle_model(&self.vehicle_model)
    }

    /// True if this appointment occupies the same vehicle slot:
    /// same normalized model and same calendar minute.
    pub fn occupies_slot(&self, normalized_model: &str, at: &DateTime<Utc>) -> bool {
        self.normalized_vehicle_model() == normalized_model && same_minute(&self.date_time, at)
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.client_name)
    }
}

/// Raw form input for an appointment, before validation.
///
/// `date_time` is kept as text because the date must be checked for
/// validity as part of validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub vehicle_model: String,
    pub date_time: String,
    pub description: String,
}

impl AppointmentDraft {
    /// Prefill a draft from an existing record, for editing.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        AppointmentDraft {
            client_name: appointment.client_name.clone(),
            vehicle_model: appointment.vehicle_model.clone(),
            date_time: appointment.date_time.to_rfc3339(),
            description: appointment.description.clone().unwrap_or_default(),
        }
    }

    /// Build the stored record. Text fields are trimmed and an empty
    /// description is dropped.
    pub(crate) fn into_appointment(self, id: String, date_time: DateTime<Utc>) -> Appointment {
        let description = self.description.trim();

        Appointment {
            id,
            client_name: self.client_name.trim().to_string(),
            vehicle_model: self.vehicle_model.trim().to_string(),
            date_time,
            description: (!description.is_empty()).then(|| description.to_string()),
        }
    }
}

/// Generate a fresh appointment id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trim and case-fold a vehicle model for duplicate comparison.
pub fn normalize_vehicle_model(model: &str) -> String {
    model.trim().to_lowercase()
}

/// Calendar-minute equality: year, month, day, hour and minute match.
pub fn same_minute(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    (a.year(), a.month(), a.day(), a.hour(), a.minute())
        == (b.year(), b.month(), b.day(), b.hour(), b.minute())
}

/// Parse user-supplied date/time text into an instant.
///
/// Accepts RFC 3339, or a local wall-clock time in one of `LOCAL_FORMATS`.
/// Local times that fall in a DST gap are rejected; ambiguous ones resolve
/// to the earlier instant.
pub fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, h, m, s).unwrap()
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_vehicle_model("  Toyota Corolla "), "toyota corolla");
        assert_eq!(normalize_vehicle_model("MAZDA 3"), "mazda 3");
    }

    #[test]
    fn same_minute_ignores_seconds() {
        assert!(same_minute(&at(15, 0, 0), &at(15, 0, 59)));
        assert!(!same_minute(&at(15, 0, 59), &at(15, 1, 0)));
        assert!(!same_minute(&at(15, 0, 0), &at(16, 0, 0)));
    }

    #[test]
    fn parse_rfc3339_with_offset() {
        let parsed = parse_date_time("2026-03-20T10:00:00-05:00").unwrap();
        assert_eq!(parsed, at(15, 0, 0));
    }

    #[test]
    fn parse_rfc3339_with_millis() {
        let parsed = parse_date_time("2026-03-20T15:00:00.000Z").unwrap();
        assert_eq!(parsed, at(15, 0, 0));
    }

    #[test]
    fn parse_local_wall_clock() {
        let naive = NaiveDateTime::parse_from_str("2026-03-20 15:30", "%Y-%m-%d %H:%M").unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));

        assert_eq!(parse_date_time("2026-03-20 15:30"), expected);
        assert_eq!(parse_date_time("2026-03-20T15:30"), expected);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_date_time("").is_none());
        assert!(parse_date_time("next tuesday-ish").is_none());
        assert!(parse_date_time("2026-13-40 25:00").is_none());
    }

    #[test]
    fn draft_into_appointment_trims_fields() {
        let draft = AppointmentDraft {
            client_name: "  Ana García ".into(),
            vehicle_model: " Toyota Corolla ".into(),
            date_time: String::new(),
            description: "   ".into(),
        };

        let appt = draft.into_appointment("a1".into(), at(15, 0, 0));
        assert_eq!(appt.client_name, "Ana García");
        assert_eq!(appt.vehicle_model, "Toyota Corolla");
        assert_eq!(appt.description, None);
    }

    #[test]
    fn draft_prefill_round_trips_through_parse() {
        let appt = Appointment {
            id: "a1".into(),
            client_name: "Juan Pérez".into(),
            vehicle_model: "Nissan Sentra".into(),
            date_time: at(9, 45, 0),
            description: Some("Oil change".into()),
        };

        let draft = AppointmentDraft::from_appointment(&appt);
        assert_eq!(parse_date_time(&draft.date_time), Some(appt.date_time));
        assert_eq!(draft.description, "Oil change");
    }

    #[test]
    fn serializes_camel_case() {
        let appt = Appointment {
            id: "a1".into(),
            client_name: "Juan Pérez".into(),
            vehicle_model: "Nissan Sentra".into(),
            date_time: at(9, 45, 0),
            description: None,
        };

        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["clientName"], "Juan Pérez");
        assert_eq!(json["vehicleModel"], "Nissan Sentra");
        assert_eq!(json["dateTime"], "2026-03-20T09:45:00Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn deserializes_legacy_snapshot_entry() {
        let raw = r#"{
            "id": "1742482800000-k3j9x2",
            "clientName": "Juan Pérez",
            "vehicleModel": "Toyota Corolla 2016",
            "description": "",
            "dateTime": "2026-03-20T15:00:00.000Z"
        }"#;

        let appt: Appointment = serde_json::from_str(raw).unwrap();
        assert_eq!(appt.id, "1742482800000-k3j9x2");
        assert_eq!(appt.date_time, at(15, 0, 0));
        assert_eq!(appt.description, None);
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
