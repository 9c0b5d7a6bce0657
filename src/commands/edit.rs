use anyhow::Result;
use apptbook_core::AppointmentDraft;
use apptbook_core::clock::SystemClock;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{Fields, Store, submit_error};
use crate::input::{format_when, resolve_when};
use crate::render::Render;

/// Replace an appointment. With no flags, prompts for every field with the
/// current value as the default; otherwise unspecified fields are kept.
pub fn run(store: &mut Store, id: &str, fields: Fields) -> Result<()> {
    let Some(existing) = store.get(id) else {
        anyhow::bail!("Appointment '{}' not found", id);
    };

    let current = AppointmentDraft::from_appointment(existing);
    let current_when = format_when(&existing.date_time);
    let interactive = fields.is_empty();

    let draft = if interactive {
        AppointmentDraft {
            client_name: prompt("  Client name", current.client_name)?,
            vehicle_model: prompt("  Vehicle model", current.vehicle_model)?,
            date_time: resolve_when(&prompt("  When?", current_when)?),
            description: prompt("  Description", current.description)?,
        }
    } else {
        AppointmentDraft {
            client_name: fields.client.unwrap_or(current.client_name),
            vehicle_model: fields.vehicle.unwrap_or(current.vehicle_model),
            date_time: fields
                .at
                .map(|w| resolve_when(&w))
                .unwrap_or(current.date_time),
            description: fields.description.unwrap_or(current.description),
        }
    };

    let appointment = store
        .submit_edit(id, draft, &SystemClock)
        .map_err(submit_error)?;

    if interactive {
        println!();
    }
    println!("{}", "  Updated:".yellow());
    println!("{}", appointment.render());

    Ok(())
}

fn prompt(label: &str, current: String) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .default(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
