//! Fixed table of tracked currencies.
//!
//! Each entry ties an ISO-style code and a display name to the row
//! identifier the upstream page uses for that currency.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(skip)]
    pub market_row: &'static str,
}

const fn currency(code: &'static str, name: &'static str, market_row: &'static str) -> Currency {
    Currency {
        code,
        name,
        market_row,
    }
}

pub static CURRENCIES: [Currency; 36] = [
    currency("USD", "USD (US Dollar)", "price_dollar_rl"),
    currency("EUR", "EUR (Euro)", "price_eur"),
    currency("AED", "AED (UAE Dirham)", "price_aed"),
    currency("GBP", "GBP (British Pound)", "price_gbp"),
    currency("TRY", "TRY (Turkish Lira)", "price_try"),
    currency("CHF", "CHF (Swiss Franc)", "price_chf"),
    currency("CNY", "CNY (Chinese Yuan)", "price_cny"),
    currency("JPY", "JPY (Japanese Yen)", "price_jpy"),
    currency("KRW", "KRW (South Korean Won)", "price_krw"),
    currency("CAD", "CAD (Canadian Dollar)", "price_cad"),
    currency("AUD", "AUD (Australian Dollar)", "price_aud"),
    currency("NZD", "NZD (New Zealand Dollar)", "price_nzd"),
    currency("SGD", "SGD (Singapore Dollar)", "price_sgd"),
    currency("INR", "INR (Indian Rupee)", "price_inr"),
    currency("PKR", "PKR (Pakistani Rupee)", "price_pkr"),
    currency("IQD", "IQD (Iraqi Dinar)", "price_iqd"),
    currency("SYP", "SYP (Syrian Pound)", "price_syp"),
    currency("AFN", "AFN (Afghan Afghani)", "price_afn"),
    currency("DKK", "DKK (Danish Krone)", "price_dkk"),
    currency("SEK", "SEK (Swedish Krona)", "price_sek"),
    currency("NOK", "NOK (Norwegian Krone)", "price_nok"),
    currency("SAR", "SAR (Saudi Riyal)", "price_sar"),
    currency("QAR", "QAR (Qatari Riyal)", "price_qar"),
    currency("OMR", "OMR (Omani Rial)", "price_omr"),
    currency("KWD", "KWD (Kuwaiti Dinar)", "price_kwd"),
    currency("BHD", "BHD (Bahraini Dinar)", "price_bhd"),
    currency("MYR", "MYR (Malaysian Ringgit)", "price_myr"),
    currency("THB", "THB (Thai Baht)", "price_thb"),
    currency("HKD", "HKD (Hong Kong Dollar)", "price_hkd"),
    currency("RUB", "RUB (Russian Ruble)", "price_rub"),
    currency("AZN", "AZN (Azerbaijani Manat)", "price_azn"),
    currency("AMD", "AMD (Armenian Dram)", "price_amd"),
    currency("GEL", "GEL (Georgian Lari)", "price_gel"),
    currency("KGS", "KGS (Kyrgyzstani Som)", "price_kgs"),
    currency("TJS", "TJS (Tajikistani Somoni)", "price_tjs"),
    currency("TMT", "TMT (Turkmenistani Manat)", "price_tmt"),
];

/// All tracked currencies in registry order.
pub fn all() -> &'static [Currency] {
    &CURRENCIES
}

pub fn by_code(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code == code)
}

pub fn by_name(name: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.name == name)
}

/// Resolves either a code (`"EUR"`) or a display name (`"EUR (Euro)"`).
///
/// Codes take precedence, then display names. Matching is exact.
pub fn resolve(identifier: &str) -> Option<&'static Currency> {
    by_code(identifier).or_else(|| by_name(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_by_code_and_name_agree() {
        for currency in all() {
            assert_eq!(resolve(currency.code), resolve(currency.name));
            assert_eq!(resolve(currency.code), Some(currency));
        }
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve("INVALID").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("usd").is_none());
        assert!(resolve("US Dollar").is_none());
    }

    #[test]
    fn test_registry_entries_are_unique() {
        let codes: HashSet<_> = all().iter().map(|c| c.code).collect();
        let names: HashSet<_> = all().iter().map(|c| c.name).collect();
        let rows: HashSet<_> = all().iter().map(|c| c.market_row).collect();
        assert_eq!(codes.len(), CURRENCIES.len());
        assert_eq!(names.len(), CURRENCIES.len());
        assert_eq!(rows.len(), CURRENCIES.len());
    }

    #[test]
    fn test_display_names_start_with_code() {
        for currency in all() {
            assert_eq!(currency.code.len(), 3);
            assert!(currency.name.starts_with(&format!("{} (", currency.code)));
        }
    }

    #[test]
    fn test_market_rows() {
        assert_eq!(by_code("USD").unwrap().market_row, "price_dollar_rl");
        for currency in all().iter().filter(|c| c.code != "USD") {
            assert_eq!(
                currency.market_row,
                format!("price_{}", currency.code.to_lowercase())
            );
        }
    }
}
