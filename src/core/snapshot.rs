//! Price snapshot types

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::registry::Currency;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed price text {text:?} in row {market_row}")]
pub struct MalformedPrice {
    pub market_row: String,
    pub text: String,
}

/// Outcome of looking up one currency on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Quote {
    Price(f64),
    /// Row or price cell not present.
    Missing,
    /// Cell present but its text is not a number.
    Malformed(MalformedPrice),
}

impl Quote {
    pub fn price(&self) -> Option<f64> {
        match self {
            Quote::Price(p) => Some(*p),
            _ => None,
        }
    }
}

/// Prices for every registry currency, taken from a single page fetch.
///
/// Serializes as a JSON object keyed by display name, in registry order,
/// with `null` for anything that isn't a usable price.
#[derive(Debug, Clone, Default)]
pub struct PriceSnapshot {
    entries: Vec<(&'static Currency, Quote)>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: &'static Currency, quote: Quote) {
        self.entries.push((currency, quote));
    }

    pub fn quote(&self, currency: &Currency) -> Option<&Quote> {
        self.entries
            .iter()
            .find(|(c, _)| c.code == currency.code)
            .map(|(_, q)| q)
    }

    /// Price by display name.
    pub fn price(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c.name == name)
            .and_then(|(_, q)| q.price())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static Currency, &Quote)> + '_ {
        self.entries.iter().map(|(c, q)| (*c, q))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PriceSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (currency, quote) in &self.entries {
            map.serialize_entry(currency.name, &quote.price())?;
        }
        map.end()
    }
}
