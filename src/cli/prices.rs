use super::ui;
use crate::core::{Currency, PriceSnapshot, Quote};
use comfy_table::Cell;

impl PriceSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Currency"),
            ui::header_cell("Price"),
        ]);

        for (currency, quote) in self.iter() {
            let price = match quote {
                Quote::Price(p) => ui::price_cell(*p),
                Quote::Missing => ui::na_cell(false),
                Quote::Malformed(_) => ui::na_cell(true),
            };
            table.add_row(vec![Cell::new(currency.code), Cell::new(currency.name), price]);
        }

        let available = self.iter().filter(|(_, q)| q.price().is_some()).count();
        let malformed = self
            .iter()
            .filter(|(_, q)| matches!(q, Quote::Malformed(_)))
            .count();
        let mut footer = ui::style_text(
            &format!("{available} of {} prices available", self.len()),
            ui::StyleType::Subtle,
        );
        if malformed > 0 {
            footer.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!("{malformed} malformed on the upstream page"),
                    ui::StyleType::Error
                )
            ));
        }

        format!(
            "{}\n\n{}\n\n{}",
            ui::style_text("Currency Prices", ui::StyleType::Title),
            table,
            footer
        )
    }
}

pub fn display_currencies(currencies: &[Currency]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for currency in currencies {
        table.add_row(vec![Cell::new(currency.code), Cell::new(currency.name)]);
    }
    table.to_string()
}

pub fn display_rate(from: &Currency, to: &Currency, rate: f64) -> String {
    format!(
        "1 {} = {} {}",
        from.code,
        ui::style_text(&rate.to_string(), ui::StyleType::Value),
        to.code
    )
}
