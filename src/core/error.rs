use thiserror::Error;

use super::snapshot::MalformedPrice;
use super::source::FetchFailure;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Error fetching currency data: {0}")]
    UpstreamUnavailable(#[from] FetchFailure),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("No price available for {0}")]
    PriceUnavailable(String),

    #[error(transparent)]
    MalformedPrice(#[from] MalformedPrice),

    #[error("Price extraction failed: {0}")]
    Extraction(#[from] tokio::task::JoinError),
}
