use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::Store;
use crate::render::Render;

pub fn run(store: &mut Store, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(store.items())
            .context("Failed to serialize appointments")?;
        println!("{}", out);
        return Ok(());
    }

    if store.items().is_empty() {
        println!(
            "{}",
            "No appointments yet. Book the first one with `apptbook add`.".dimmed()
        );
        return Ok(());
    }

    for appointment in store.items() {
        println!("{}", appointment.render());
        println!();
    }

    Ok(())
}
