use super::ui;
use crate::core::{DistributionFrequency, Overview};
use comfy_table::{Cell, CellAlignment};

const BAR_WIDTH: usize = 20;

impl Overview {
    /// Per-asset table with derived value, share and distribution.
    pub fn display_assets_table(&self, symbol: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Id"),
            ui::header_cell("Asset"),
            ui::header_cell("Units"),
            ui::header_cell("Price"),
            ui::header_cell("CPU (%)"),
            ui::header_cell("Frequency"),
            ui::header_cell("Value"),
            ui::header_cell("% of Investment"),
            ui::header_cell("Distribution"),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(ui::style_text(&row.id.short(), ui::StyleType::Subtle)),
                Cell::new(&row.name),
                ui::format_optional_cell(row.units, |u| format!("{u:.2}")),
                ui::format_optional_cell(row.price, |p| ui::format_money(p, symbol)),
                ui::format_optional_cell(row.yield_rate, |c| format!("{c:.2}")),
                Cell::new(row.frequency.to_string()),
                ui::format_optional_cell(row.value, |v| ui::format_money(v, symbol)),
                ui::allocation_cell(row.percentage_of_investment),
                Cell::new(ui::format_money(row.distribution, symbol))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        table.to_string()
    }

    /// Allocation of the current value across assets.
    pub fn display_allocation_table(&self, symbol: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Asset"),
            ui::header_cell("Value"),
            ui::header_cell("Allocation"),
        ]);

        let total: f64 = self.slices.iter().map(|s| s.value).sum();
        for slice in &self.slices {
            let fraction = if total > 0.0 { slice.value / total } else { 0.0 };
            table.add_row(vec![
                Cell::new(&slice.name),
                Cell::new(ui::format_money(slice.value, symbol)).set_alignment(CellAlignment::Right),
                Cell::new(format!(
                    "{} {}",
                    ui::bar(fraction, BAR_WIDTH),
                    ui::format_percent(fraction * 100.0)
                )),
            ]);
        }

        table.to_string()
    }

    /// Totals, allocation progress and projected distributions.
    pub fn display_totals(&self, symbol: &str) -> String {
        let allocation_style = if self.is_over_allocated() {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };

        let mut output = format!(
            "{}: {}\n",
            ui::style_text("Total value of assets", ui::StyleType::TotalLabel),
            ui::format_money(self.total_value, symbol)
        );
        output.push_str(&format!(
            "{}: {}\n",
            ui::style_text("Portfolio %", ui::StyleType::TotalLabel),
            ui::style_text(&ui::format_percent(self.allocation_percentage), allocation_style)
        ));
        if let Some(remaining) = self.remaining {
            output.push_str(&format!(
                "{}\n",
                ui::style_text(
                    &format!(
                        "Remaining {} to allocate or {}",
                        ui::format_percent(remaining.percentage),
                        ui::format_money(remaining.amount, symbol)
                    ),
                    ui::StyleType::Subtle
                )
            ));
        }
        let lines: Vec<String> = [DistributionFrequency::Quarterly, DistributionFrequency::Monthly]
            .into_iter()
            .map(|freq| {
                format!(
                    "{}: {}",
                    ui::style_text(&format!("{freq} Distributions"), ui::StyleType::TotalLabel),
                    ui::format_money(self.distributions.for_frequency(freq), symbol)
                )
            })
            .collect();
        output.push_str(&lines.join("\n"));

        output
    }

    pub fn display(&self, symbol: &str) -> String {
        let mut output = format!(
            "I want to invest {}\n\n",
            ui::style_text(
                &ui::format_money(self.total_investment, symbol),
                ui::StyleType::TotalValue
            )
        );

        output.push_str(&format!(
            "{}\n\n",
            ui::style_text("My Investments", ui::StyleType::Title)
        ));
        if self.rows.is_empty() {
            output.push_str("No assets yet. Add one with `etfalloc add <NAME> --frequency monthly`.\n");
        } else {
            output.push_str(&self.display_assets_table(symbol));
            output.push_str("\n\n");
            output.push_str(&format!(
                "{}\n\n",
                ui::style_text("Investment Allocation", ui::StyleType::Title)
            ));
            output.push_str(&self.display_allocation_table(symbol));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{}\n\n",
            ui::style_text("Portfolio Overview", ui::StyleType::Title)
        ));
        output.push_str(&self.display_totals(symbol));
        output
    }
}

/// Prints the full overview.
pub fn run(overview: &Overview, symbol: &str) {
    println!("{}", overview.display(symbol));
    ui::print_separator();
}
