use anyhow::Result;
use apptbook_core::catalog::Catalog;
use apptbook_core::config::AppConfig;

use crate::render::{Render, render_dish_detail};

pub fn list(config: &AppConfig) -> Result<()> {
    let catalog = Catalog::load(config)?;

    for dish in catalog.dishes() {
        println!("{}", dish.render());
    }

    Ok(())
}

pub fn show(config: &AppConfig, id: &str) -> Result<()> {
    let catalog = Catalog::load(config)?;

    let Some(dish) = catalog.get(id) else {
        let available: Vec<_> = catalog.dishes().iter().map(|d| d.id.as_str()).collect();
        anyhow::bail!(
            "Dish '{}' not found. Available: {}",
            id,
            available.join(", ")
        );
    };

    println!("{}", render_dish_detail(dish));
    Ok(())
}
