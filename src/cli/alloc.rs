use super::ui;
use crate::core::{Allocation, PortfolioReport};
use anyhow::{Result, bail};
use comfy_table::Cell;

/// Renders an allocation sorted by category value, largest first.
fn display_allocation_table(title: &str, allocation: &Allocation, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Value ({currency})")),
        ui::header_cell("Allocation"),
    ]);

    let weights = allocation.weights();
    let mut categories: Vec<_> = allocation.per_category.iter().collect();
    categories.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    for (category, value) in categories {
        table.add_row(vec![
            Cell::new(category.name()),
            ui::number_cell(*value),
            ui::percentage_cell(weights.get(category).copied().unwrap_or(0.0)),
        ]);
    }

    format!(
        "{}\n\n{table}\n\nTotal Value ({}): {}",
        ui::style_text(title, ui::StyleType::Title),
        ui::style_text(currency, ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2}", allocation.total_value),
            ui::StyleType::TotalValue
        )
    )
}

/// Shows the current allocation, or the historical one at `at` (epoch seconds).
pub fn run(report: &PortfolioReport, at: Option<i64>, json: bool) -> Result<()> {
    let (title, allocation) = match at {
        None => ("Current Allocation".to_string(), report.allocation.clone()),
        Some(timestamp) => {
            let Some(snapshot) = report.snapshot_at(timestamp) else {
                bail!(
                    "No history at or before {}",
                    ui::format_timestamp(timestamp)
                );
            };
            (
                format!("Allocation at {}", ui::format_timestamp(snapshot.timestamp)),
                Allocation::from_snapshot(snapshot),
            )
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&allocation)?);
        return Ok(());
    }

    if allocation.is_empty() {
        println!("Nothing allocated.");
        return Ok(());
    }
    println!(
        "{}",
        display_allocation_table(&title, &allocation, &report.display_currency)
    );
    Ok(())
}
