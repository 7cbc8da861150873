//! Price snapshots and exchange rates built from one page fetch.

use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::core::{Currency, DocumentSource, PriceSnapshot, Quote, RateError, registry};
use crate::providers::market_table::MarketTable;

#[derive(Clone)]
pub struct RateService {
    source: Arc<dyn DocumentSource>,
}

impl RateService {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        RateService { source }
    }

    /// Fetches the page once and looks up every registry currency in it.
    #[instrument(name = "PriceSnapshot", skip(self))]
    pub async fn get_price_snapshot(&self) -> Result<PriceSnapshot, RateError> {
        let html = self.source.fetch_document().await.inspect_err(|e| {
            error!(error = %e, "Error fetching currency data");
        })?;

        // HTML parsing is CPU-bound and scraper types are not Send
        let snapshot = tokio::task::spawn_blocking(move || build_snapshot(&html))
            .await
            .inspect_err(|e| error!(error = %e, "Price extraction task failed"))?;
        Ok(snapshot)
    }

    /// Ratio `price(currency1) / price(currency2)`.
    ///
    /// Identifiers may be codes or display names. Both are resolved before
    /// any upstream request is made.
    #[instrument(name = "ExchangeRate", skip(self))]
    pub async fn get_exchange_rate(
        &self,
        currency1: &str,
        currency2: &str,
    ) -> Result<f64, RateError> {
        let from = resolve(currency1)?;
        let to = resolve(currency2)?;

        let snapshot = self.get_price_snapshot().await?;
        let price1 = usable_price(&snapshot, from)?;
        let price2 = usable_price(&snapshot, to)?;

        let rate = price1 / price2;
        debug!(price1, price2, rate, "Computed exchange rate");
        Ok(rate)
    }
}

fn resolve(identifier: &str) -> Result<&'static Currency, RateError> {
    registry::resolve(identifier).ok_or_else(|| RateError::UnknownCurrency(identifier.to_string()))
}

fn usable_price(snapshot: &PriceSnapshot, currency: &Currency) -> Result<f64, RateError> {
    match snapshot.quote(currency) {
        Some(Quote::Price(p)) if *p != 0.0 => Ok(*p),
        Some(Quote::Malformed(e)) => Err(RateError::MalformedPrice(e.clone())),
        _ => Err(RateError::PriceUnavailable(currency.name.to_string())),
    }
}

/// Extracts a quote for every registry currency from raw page HTML.
///
/// The parsed document lives only inside this call.
pub fn build_snapshot(html: &str) -> PriceSnapshot {
    let table = MarketTable::parse(html);
    let mut snapshot = PriceSnapshot::new();

    for currency in registry::all() {
        let quote = match table.extract_price(currency.market_row) {
            Ok(Some(price)) => price.to_f64().map_or(Quote::Missing, Quote::Price),
            Ok(None) => Quote::Missing,
            Err(e) => {
                warn!(currency = currency.code, error = %e, "Skipping malformed price");
                Quote::Malformed(e)
            }
        };
        snapshot.insert(currency, quote);
    }

    debug!(
        found = snapshot.iter().filter(|(_, q)| q.price().is_some()).count(),
        total = snapshot.len(),
        "Built price snapshot"
    );
    snapshot
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::FetchFailure;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const TWO_ROW_PAGE: &str = r#"
        <html>
        <body>
        <tr data-market-row="price_dollar_rl"><td class="nf">300,000</td></tr>
        <tr data-market-row="price_eur"><td class="nf">320,000</td></tr>
        </body>
        </html>
    "#;

    /// Serves a canned page, or fails like an upstream 500 when `page` is `None`.
    pub struct StaticSource {
        page: Option<String>,
        pub calls: AtomicUsize,
    }

    impl StaticSource {
        pub fn page(html: &str) -> Self {
            Self {
                page: Some(html.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                page: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for StaticSource {
        async fn fetch_document(&self) -> Result<String, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.page.clone().ok_or_else(|| FetchFailure::Status {
                url: "http://upstream.test/currency".to_string(),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }

    fn service(source: StaticSource) -> (RateService, Arc<StaticSource>) {
        let source = Arc::new(source);
        (RateService::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_snapshot_prices() {
        let (service, source) = service(StaticSource::page(TWO_ROW_PAGE));
        let snapshot = service.get_price_snapshot().await.unwrap();

        assert_eq!(snapshot.len(), registry::all().len());
        assert_eq!(snapshot.price("USD (US Dollar)"), Some(30000.0));
        assert_eq!(snapshot.price("EUR (Euro)"), Some(32000.0));
        assert_eq!(snapshot.price("GBP (British Pound)"), None);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_snapshot_from_tabled_page() {
        let page = r#"
            <html><body>
            <table><tbody>
            <tr data-market-row="price_dollar_rl"><td>Dollar</td><td class="nf">300,000</td></tr>
            </tbody></table>
            <table>
            <tr data-market-row="price_eur"><td class="nf">320,000</td></tr>
            </table>
            </body></html>
        "#;
        let (service, _) = service(StaticSource::page(page));
        let snapshot = service.get_price_snapshot().await.unwrap();
        assert_eq!(snapshot.price("USD (US Dollar)"), Some(30000.0));
        assert_eq!(snapshot.price("EUR (Euro)"), Some(32000.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_snapshot_of_every_currency() {
        let rows: String = registry::all()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    r#"<tr data-market-row="{}"><td class="nf">{},000</td></tr>"#,
                    c.market_row,
                    i + 1
                )
            })
            .collect();
        let page = format!("<html><body><table>{rows}</table></body></html>");

        let (service, _) = service(StaticSource::page(&page));
        let snapshot = service.get_price_snapshot().await.unwrap();
        for (i, (_, quote)) in snapshot.iter().enumerate() {
            assert_eq!(quote.price(), Some((i as f64 + 1.0) * 100.0));
        }
    }

    #[tokio::test]
    async fn test_snapshot_follows_registry_order() {
        let (service, _) = service(StaticSource::page(TWO_ROW_PAGE));
        let snapshot = service.get_price_snapshot().await.unwrap();
        let codes: Vec<_> = snapshot.iter().map(|(c, _)| c.code).collect();
        let expected: Vec<_> = registry::all().iter().map(|c| c.code).collect();
        assert_eq!(codes, expected);
    }

    #[tokio::test]
    async fn test_snapshot_fetch_failure() {
        let (service, _) = service(StaticSource::failing());
        let err = service.get_price_snapshot().await.unwrap_err();
        assert!(matches!(err, RateError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_exchange_rate_by_code_and_name() {
        let (service, source) = service(StaticSource::page(TWO_ROW_PAGE));
        let by_code = service.get_exchange_rate("USD", "EUR").await.unwrap();
        let by_name = service
            .get_exchange_rate("USD (US Dollar)", "EUR (Euro)")
            .await
            .unwrap();
        assert_eq!(by_code, 30000.0 / 32000.0);
        assert!((by_code - 0.9375).abs() < 1e-12);
        assert_eq!(by_code, by_name);
        // No reuse across calls
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exchange_rate_unknown_currency_skips_fetch() {
        let (service, source) = service(StaticSource::page(TWO_ROW_PAGE));
        let err = service.get_exchange_rate("INVALID", "USD").await.unwrap_err();
        assert!(matches!(err, RateError::UnknownCurrency(ref id) if id == "INVALID"));
        let err = service.get_exchange_rate("USD", "XXX").await.unwrap_err();
        assert!(matches!(err, RateError::UnknownCurrency(ref id) if id == "XXX"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exchange_rate_missing_row() {
        let (service, _) = service(StaticSource::page(TWO_ROW_PAGE));
        let err = service.get_exchange_rate("USD", "GBP").await.unwrap_err();
        assert!(matches!(err, RateError::PriceUnavailable(ref name) if name == "GBP (British Pound)"));
    }

    #[tokio::test]
    async fn test_exchange_rate_zero_divisor_is_unavailable() {
        let page = r#"
            <table>
            <tr data-market-row="price_dollar_rl"><td class="nf">300,000</td></tr>
            <tr data-market-row="price_eur"><td class="nf">0</td></tr>
            </table>
        "#;
        let (service, _) = service(StaticSource::page(page));
        let err = service.get_exchange_rate("USD", "EUR").await.unwrap_err();
        assert!(matches!(err, RateError::PriceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_exchange_rate_malformed_price() {
        let page = r#"
            <table>
            <tr data-market-row="price_dollar_rl"><td class="nf">300,000</td></tr>
            <tr data-market-row="price_eur"><td class="nf">n/a</td></tr>
            </table>
        "#;
        let (service, _) = service(StaticSource::page(page));
        let err = service.get_exchange_rate("USD", "EUR").await.unwrap_err();
        assert!(matches!(err, RateError::MalformedPrice(ref e) if e.market_row == "price_eur"));

        // The malformed cell doesn't affect other lookups in the snapshot
        let snapshot = service.get_price_snapshot().await.unwrap();
        assert_eq!(snapshot.price("USD (US Dollar)"), Some(30000.0));
        assert_eq!(snapshot.price("EUR (Euro)"), None);
    }

    #[tokio::test]
    async fn test_exchange_rate_fetch_failure() {
        let (service, _) = service(StaticSource::failing());
        let err = service.get_exchange_rate("USD", "EUR").await.unwrap_err();
        assert!(matches!(err, RateError::UpstreamUnavailable(_)));
    }
}
