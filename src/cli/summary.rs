use super::ui;
use crate::core::PortfolioReport;
use anyhow::Result;
use comfy_table::Cell;

impl PortfolioReport {
    pub fn display_as_table(&self) -> String {
        let currency = &self.display_currency;
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Holding"),
            ui::header_cell("Category"),
            ui::header_cell("Amount"),
            ui::header_cell(&format!("Price ({currency})")),
            ui::header_cell(&format!("Value ({currency})")),
            ui::header_cell("Day Change"),
            ui::header_cell("Day (%)"),
            ui::header_cell("Weight (%)"),
        ]);

        for valued in &self.holdings {
            let weight = self.weight(&valued.holding.id).unwrap_or(0.0);
            table.add_row(vec![
                Cell::new(valued.holding.display_name()),
                Cell::new(valued.holding.category.name()),
                ui::number_cell(valued.holding.amount),
                ui::number_cell(valued.price),
                ui::number_cell(valued.value),
                ui::change_cell(valued.day_change, ""),
                ui::change_cell(valued.day_change_percent, "%"),
                ui::percentage_cell(weight),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Portfolio Summary", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal Value ({}): {}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.2}", self.allocation.total_value),
                ui::StyleType::TotalValue
            )
        ));
        output.push_str(&format!(
            "\nDay Change ({}): {:+.2}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            self.total_day_change()
        ));
        output
    }
}

pub fn run(report: &PortfolioReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.holdings)?);
        return Ok(());
    }

    if report.holdings.is_empty() {
        println!("No holdings configured.");
        return Ok(());
    }
    println!("{}", report.display_as_table());
    Ok(())
}
