use anyhow::Result;
use apptbook_core::AppointmentDraft;
use apptbook_core::clock::SystemClock;
use chrono::{Duration, Local};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{Fields, Store, submit_error};
use crate::input::{WHEN_FORMAT, resolve_when};
use crate::render::Render;

/// New appointments default to five minutes from now.
const DEFAULT_LEAD_MINUTES: i64 = 5;

pub fn run(store: &mut Store, fields: Fields) -> Result<()> {
    let interactive =
        fields.client.is_none() || fields.vehicle.is_none() || fields.at.is_none();

    // --- Client ---
    let client_name = match fields.client {
        Some(c) => c,
        None => Input::<String>::new()
            .with_prompt("  Client name")
            .interact_text()?,
    };

    // --- Vehicle ---
    let vehicle_model = match fields.vehicle {
        Some(v) => v,
        None => Input::<String>::new()
            .with_prompt("  Vehicle model")
            .interact_text()?,
    };

    // --- When ---
    let when = match fields.at {
        Some(w) => w,
        None => {
            let default = (Local::now() + Duration::minutes(DEFAULT_LEAD_MINUTES))
                .format(WHEN_FORMAT)
                .to_string();
            Input::<String>::new()
                .with_prompt("  When?")
                .default(default)
                .interact_text()?
        }
    };

    // --- Description ---
    let description = match fields.description {
        Some(d) => d,
        None if interactive => Input::new()
            .with_prompt("  Description (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    let draft = AppointmentDraft {
        client_name,
        vehicle_model,
        date_time: resolve_when(&when),
        description,
    };

    let appointment = store
        .submit_new(draft, &SystemClock)
        .map_err(submit_error)?;

    if interactive {
        println!();
    }
    println!("{}", "  Booked:".green());
    println!("{}", appointment.render());

    Ok(())
}
