//! Terminal rendering for apptbook types using owo_colors.

use apptbook_core::Appointment;
use apptbook_core::catalog::Dish;
use owo_colors::OwoColorize;

use crate::input::format_when;

/// Longest dish description shown in the catalog list.
const SUMMARY_WIDTH: usize = 60;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Appointment {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("🔧 {}", self.client_name.bold()),
            format!("   Vehicle: {}", self.vehicle_model),
            format!("   When:    {}", format_when(&self.date_time)),
        ];

        if let Some(description) = &self.description {
            lines.push(format!("   {}", description.italic().dimmed()));
        }

        lines.push(format!("   {}", self.id.dimmed()));
        lines.join("\n")
    }
}

impl Render for Dish {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}\n   {}",
            format!("[{}]", self.id).dimmed(),
            self.name.bold(),
            self.formatted_price().green(),
            self.category.dimmed(),
            truncate(&self.description, SUMMARY_WIDTH)
        )
    }
}

pub fn render_dish_detail(dish: &Dish) -> String {
    let mut lines = vec![
        dish.name.bold().to_string(),
        format!("Region:   {}", dish.region),
        format!("Category: {}", dish.category),
        format!("Price:    {}", dish.formatted_price().green()),
        String::new(),
        "Description".bold().to_string(),
        dish.description.clone(),
        String::new(),
        "Ingredients".bold().to_string(),
    ];

    lines.extend(dish.ingredients.iter().map(|i| format!("  • {}", i)));

    if let Some(photo) = &dish.photo {
        lines.push(String::new());
        lines.push(format!("Photo: {}", photo.dimmed()));
    }

    lines.join("\n")
}

/// Cut text to at most `width` characters, ending with an ellipsis if cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_untouched() {
        assert_eq!(truncate("Sopa de pata", 60), "Sopa de pata");
    }

    #[test]
    fn long_text_cut_with_ellipsis() {
        let cut = truncate("Tortillas gruesas de maíz rellenas", 10);
        assert_eq!(cut, "Tortillas…");
        assert!(cut.chars().count() <= 10);
    }

    #[test]
    fn appointment_render_includes_fields() {
        use chrono::{TimeZone, Utc};

        let appt = Appointment {
            id: "a1".into(),
            client_name: "Ana García".into(),
            vehicle_model: "Mazda 3".into(),
            date_time: Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap(),
            description: Some("Brake noise".into()),
        };

        let out = appt.render();
        assert!(out.contains("Ana García"));
        assert!(out.contains("Mazda 3"));
        assert!(out.contains("Brake noise"));
        assert!(out.contains("a1"));
    }
}
