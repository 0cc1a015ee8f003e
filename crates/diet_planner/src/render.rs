//! Plain-text rendering of service results and the stored profile.
//!
//! All functions here produce strings and perform no I/O, so every display
//! rule is unit-testable.

use crate::recipes::Recipe;
use diet_service_client::profile::{Period, Profile};
use diet_service_client::{CalorieEstimate, DietEntry, DietResult, Product};

/// Placeholder for absent optional values.
const MISSING: &str = "—";

pub fn render_diet(result: &DietResult) -> String {
    let mut out = String::new();
    let heading = match result.period {
        Period::Week => "Suggested ration (g/day, for a week)",
        Period::Day => "Suggested ration (g/day)",
    };
    out.push_str(heading);
    out.push('\n');

    let entries = result.entries();
    if entries.is_empty() {
        out.push_str("The ration is empty; try adjusting the profile.\n");
    } else if entries.iter().any(DietEntry::has_details) {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    format_number(e.grams),
                    format_optional(e.kcal),
                    format_optional(e.protein),
                    format_optional(e.fat),
                    format_optional(e.carbs),
                    format_optional(e.cost),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Product", "Grams", "Kcal", "Protein", "Fat", "Carbs", "Cost"],
            &rows,
        ));
    } else {
        for entry in entries {
            out.push_str(&format!(
                "  {}: {} g\n",
                entry.name,
                format_number(entry.grams)
            ));
        }
    }

    out.push_str(&format!(
        "Total cost: {}\n",
        format_number(result.total_cost)
    ));
    out.push_str(&format!("Solver status: {}\n", result.status));

    // The summary needs both sides of the comparison; with either missing
    // the whole section is omitted.
    if let (Some(totals), Some(norms)) = (&result.nutrient_totals, &result.norms) {
        out.push_str("Nutrient totals:\n");
        out.push_str(&format!(
            "  kcal: {} / norm {}\n",
            format_number(totals.kcal),
            format_number(norms.kcal)
        ));
        out.push_str(&format!(
            "  protein: {} g / >= {} g\n",
            format_number(totals.protein),
            format_number(norms.protein)
        ));
        out.push_str(&format!(
            "  fat: {} g / >= {} g\n",
            format_number(totals.fat),
            format_number(norms.fat)
        ));
        out.push_str(&format!(
            "  carbs: {} g / >= {} g\n",
            format_number(totals.carbs),
            format_number(norms.carbs)
        ));
    }
    out
}

pub fn render_estimate(estimate: &CalorieEstimate) -> String {
    let mut out = format!("Daily calorie norm: {} kcal\n", format_number(estimate.kcal));
    if let Some(bmr) = estimate.bmr {
        let mut detail = format!("  BMR {}", format_number(bmr));
        if let Some(factor) = estimate.activity_factor {
            detail.push_str(&format!(", activity factor {}", format_number(factor)));
        }
        if let Some(method) = &estimate.method {
            detail.push_str(&format!(" ({method})"));
        }
        detail.push('\n');
        out.push_str(&detail);
    }
    out
}

pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products available.\n".to_string();
    }
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.price.map(format_number).unwrap_or_else(|| MISSING.into()),
            ]
        })
        .collect();
    render_table(&["Id", "Product", "Price/100g"], &rows)
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str(&format!("Gender: {}\n", profile.gender));
    out.push_str(&format!(
        "Age: {}\n",
        profile
            .age
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING.into())
    ));
    out.push_str(&format!(
        "Weight: {} kg\n",
        profile
            .weight
            .map(format_number)
            .unwrap_or_else(|| MISSING.into())
    ));
    out.push_str(&format!(
        "Height: {} cm\n",
        profile
            .height
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING.into())
    ));
    out.push_str(&format!("Activity: {}\n", profile.activity));
    out.push_str(&format!("Period: {}\n", profile.period));
    out.push_str(&format!("Allergens: {}\n", join_or_none(&profile.allergens)));
    out.push_str(&format!("Dislikes: {}\n", join_or_none(&profile.dislikes)));
    out
}

pub fn render_recipes(recipes: &[&Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes match the current restrictions.\n".to_string();
    }
    let mut out = String::new();
    for recipe in recipes {
        out.push_str(&format!(
            "  {}: {}\n",
            recipe.title,
            recipe.ingredients.join(", ")
        ));
    }
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| MISSING.into())
}

/// Left-aligned columns, two spaces between them, widths fit the content.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = render_row(&header_cells, &widths);
    for row in rows {
        out.push_str(&render_row(row, &widths));
    }
    out
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("  ");
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use diet_service_client::MacroSummary;

    fn empty_result() -> DietResult {
        DietResult {
            diet: Vec::new(),
            items: None,
            total_cost: 0.0,
            status: "empty".into(),
            period: Period::Day,
            nutrient_totals: None,
            norms: None,
        }
    }

    #[test]
    fn empty_diet_shows_empty_state_with_cost_and_status() {
        let output = render_diet(&empty_result());
        assert!(output.contains("The ration is empty"));
        assert!(!output.contains("Product"));
        assert!(output.contains("Total cost: 0"));
        assert!(output.contains("Solver status: empty"));
    }

    #[test]
    fn plain_entries_render_as_flat_list() {
        let mut result = empty_result();
        result.diet = vec![
            DietEntry::new("Oat groats", 210.0),
            DietEntry::new("Sardines", 120.5),
        ];
        result.status = "Optimal".into();
        let output = render_diet(&result);
        assert!(output.contains("  Oat groats: 210 g\n"));
        assert!(output.contains("  Sardines: 120.5 g\n"));
        assert!(!output.contains("Kcal"));
    }

    #[test]
    fn detailed_entries_render_as_table_with_placeholders() {
        let mut result = empty_result();
        let mut entry = DietEntry::new("Potatoes", 500.0);
        entry.kcal = Some(470.0);
        entry.cost = Some(0.5);
        result.items = Some(vec![entry]);
        result.status = "Optimal".into();
        let output = render_diet(&result);
        assert!(output.contains("Product"));
        assert!(output.contains("Potatoes"));
        assert!(output.contains(MISSING));
    }

    #[test]
    fn nutrient_summary_requires_both_totals_and_norms() {
        let mut result = empty_result();
        result.nutrient_totals = Some(MacroSummary {
            kcal: 2210.4,
            protein: 62.2,
            fat: 49.1,
            carbs: 248.6,
        });
        let output = render_diet(&result);
        assert!(!output.contains("Nutrient totals"));

        result.norms = Some(MacroSummary {
            kcal: 2100.0,
            protein: 58.1,
            fat: 46.7,
            carbs: 236.3,
        });
        let output = render_diet(&result);
        assert!(output.contains("Nutrient totals:"));
        assert!(output.contains("kcal: 2210.4 / norm 2100"));
        assert!(output.contains("protein: 62.2 g / >= 58.1 g"));
    }

    #[test]
    fn week_period_changes_the_heading() {
        let mut result = empty_result();
        result.period = Period::Week;
        assert!(render_diet(&result).contains("for a week"));
        result.period = Period::Day;
        assert!(!render_diet(&result).contains("for a week"));
    }

    #[test]
    fn products_without_price_show_placeholder() {
        let products = vec![
            Product {
                id: 1,
                name: "Oat groats".into(),
                price: Some(0.2),
            },
            Product {
                id: 3,
                name: "Potatoes".into(),
                price: None,
            },
        ];
        let output = render_products(&products);
        assert!(output.contains("Oat groats"));
        assert!(output.contains("0.2"));
        assert!(output.contains(MISSING));
    }

    #[test]
    fn estimate_detail_line_is_optional() {
        let bare = CalorieEstimate {
            kcal: 1800.0,
            bmr: None,
            activity_factor: None,
            method: None,
        };
        assert_eq!(render_estimate(&bare), "Daily calorie norm: 1800 kcal\n");

        let detailed = CalorieEstimate {
            kcal: 3204.0,
            bmr: Some(1780.0),
            activity_factor: Some(1.8),
            method: Some("mifflin-st-jeor".into()),
        };
        let output = render_estimate(&detailed);
        assert!(output.contains("BMR 1780, activity factor 1.8 (mifflin-st-jeor)"));
    }

    #[test]
    fn profile_shows_placeholders_for_missing_numbers() {
        let output = render_profile(&Profile::default());
        assert!(output.contains(&format!("Age: {MISSING}")));
        assert!(output.contains("Allergens: (none)"));
    }
}
