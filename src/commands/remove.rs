use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::Store;
use crate::render::Render;

pub fn run(store: &mut Store, id: &str, yes: bool) -> Result<()> {
    let Some(existing) = store.get(id) else {
        anyhow::bail!("Appointment '{}' not found", id);
    };

    println!("{}", existing.render());

    let confirmed = yes
        || Confirm::new()
            .with_prompt("  Remove this appointment?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    }

    store.remove(id);
    println!("{}", "  Removed".red());

    Ok(())
}
