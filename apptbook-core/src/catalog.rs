//! Read-only dish catalog.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub region: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Dish {
    /// Price with a currency sign and two decimals, e.g. `$1.25`.
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// The catalog bundled with apptbook.
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let dishes: Vec<Dish> =
            serde_json::from_str(raw).map_err(|e| AppError::Catalog(e.to_string()))?;

        let mut seen = HashSet::new();
        if let Some(dup) = dishes.iter().find(|d| !seen.insert(d.id.as_str())) {
            return Err(AppError::Catalog(format!("Duplicate dish id '{}'", dup.id)));
        }

        Ok(Catalog { dishes })
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Could not read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Use the configured catalog file if there is one, else the built-in list.
    pub fn load(config: &AppConfig) -> AppResult<Self> {
        match config.catalog_path() {
            Some(path) => Self::from_file(&path),
            None => Self::builtin(),
        }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn get(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
