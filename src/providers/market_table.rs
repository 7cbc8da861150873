//! Price extraction from the upstream market table.
//!
//! The page lists one `<tr data-market-row="...">` per instrument, with the
//! live price in a `<td class="nf">` cell. Prices are grouped with commas and
//! quoted at ten times the unit we report, e.g. `300,000` means `30000`.
//! Nothing outside this module knows about the markup.
//!
//! Rows are found whether or not they sit inside a `<table>`. The tree
//! builder drops stray `<tr>`s, so a page without surviving rows is read a
//! second time in table context.
//!
//! Prices are `rust_decimal::Decimal`, so a cell with more than 28
//! significant digits is reported as malformed.

use rust_decimal::Decimal;
use scraper::{Html, Selector};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::core::MalformedPrice;

const MARKET_ROW_ATTR: &str = "data-market-row";

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr[data-market-row]").expect("valid row selector"));
static PRICE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.nf").expect("valid price cell selector"));

/// Parsed upstream page.
///
/// Wraps `scraper::Html`, which is not `Send`, so a `MarketTable` must not be
/// held across an `.await`.
pub struct MarketTable {
    document: Html,
}

impl MarketTable {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        if document.select(&ROW_SELECTOR).next().is_some() || !html.contains(MARKET_ROW_ATTR) {
            return Self { document };
        }

        debug!("No market rows inside a table, parsing in table context");
        Self {
            document: Html::parse_fragment(&format!("<table>{html}</table>")),
        }
    }

    /// Scaled price for the row keyed `market_row`.
    ///
    /// `Ok(None)` when the row or its price cell is missing, `Err` when the
    /// cell exists but doesn't hold a number.
    pub fn extract_price(&self, market_row: &str) -> Result<Option<Decimal>, MalformedPrice> {
        let Some(row) = self
            .document
            .select(&ROW_SELECTOR)
            .find(|row| row.value().attr(MARKET_ROW_ATTR) == Some(market_row))
        else {
            debug!(market_row, "Row not found");
            return Ok(None);
        };

        let Some(cell) = row.select(&PRICE_CELL_SELECTOR).next() else {
            debug!(market_row, "Price cell not found");
            return Ok(None);
        };

        let text = cell.text().collect::<String>();
        parse_price(market_row, &text).map(Some)
    }
}

/// Parses a grouped price string like `" 1,234,500 "` and applies the
/// page's 10x scale.
pub fn parse_price(market_row: &str, text: &str) -> Result<Decimal, MalformedPrice> {
    let cleaned = text.trim().replace(',', "");
    Decimal::from_str(&cleaned)
        .map(|value| value / Decimal::TEN)
        .map_err(|_| MalformedPrice {
            market_row: market_row.to_string(),
            text: text.trim().to_string(),
        })
}
