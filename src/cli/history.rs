use super::ui;
use crate::core::{AssetCategory, PortfolioReport, Snapshot};
use anyhow::Result;
use comfy_table::Cell;
use std::collections::BTreeSet;

fn display_history_table(history: &[Snapshot], currency: &str) -> String {
    // Columns cover every category seen anywhere in the history.
    let categories: BTreeSet<&AssetCategory> = history
        .iter()
        .flat_map(|snapshot| snapshot.per_category.keys())
        .collect();

    let mut header = vec![ui::header_cell("Date (UTC)")];
    header.extend(categories.iter().map(|c| ui::header_cell(c.name())));
    header.push(ui::header_cell(&format!("Total ({currency})")));
    header.push(ui::header_cell("Change"));

    let mut table = ui::new_styled_table();
    table.set_header(header);

    let mut previous: Option<f64> = None;
    for snapshot in history {
        let mut row = vec![Cell::new(ui::format_timestamp(snapshot.timestamp))];
        row.extend(categories.iter().map(|category| {
            ui::number_cell(snapshot.per_category.get(*category).copied().unwrap_or(0.0))
        }));
        row.push(ui::number_cell(snapshot.total_value));
        row.push(match previous {
            Some(prev) => ui::change_cell(snapshot.total_value - prev, ""),
            None => Cell::new(ui::style_text("-", ui::StyleType::Subtle)),
        });
        table.add_row(row);
        previous = Some(snapshot.total_value);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Portfolio History", ui::StyleType::Title)
    )
}

pub fn run(report: &PortfolioReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.history)?);
        return Ok(());
    }

    if report.history.is_empty() {
        println!("No history available.");
        return Ok(());
    }
    println!(
        "{}",
        display_history_table(&report.history, &report.display_currency)
    );
    ui::print_separator();
    println!(
        "{} snapshots, latest total {:.2} {}",
        report.history.len(),
        report.history.last().map_or(0.0, |s| s.total_value),
        report.display_currency
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Holding, MarketData, Quote, TimelinePoint};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_display_history_table() {
        let acquired = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let holdings = vec![
            Holding::new("a", AssetCategory::Equity, 2.0, "USD", acquired),
            Holding::new("s", AssetCategory::Savings, 10.0, "USD", acquired),
        ];
        let market = MarketData {
            quotes: HashMap::from([("a".to_string(), Quote::new(7.0, "USD"))]),
            timeline: vec![
                TimelinePoint::new(1_704_067_200).with_sample("a", 6.0),
                TimelinePoint::new(1_704_153_600),
                TimelinePoint::new(1_704_240_000).with_sample("a", 7.0),
            ],
            ..MarketData::default()
        };
        let report = PortfolioReport::evaluate(&holdings, &market, "USD").unwrap();
        let output = display_history_table(&report.history, "USD");

        assert!(output.contains("2024-01-01 00:00"));
        assert!(output.contains("2024-01-03 00:00"));
        assert!(output.contains("Savings"));
        assert!(output.contains("22.00"));
        assert!(output.contains("24.00"));
        assert!(output.contains("+2.00"));
    }
}
