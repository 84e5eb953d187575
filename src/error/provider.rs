use thiserror::Error;

/// Errors raised by upstream contest providers.
///
/// Providers raise these out of their fetch path so the retry layer can re-attempt;
/// the sync engine catches whatever survives retry exhaustion per-provider, so none
/// of these can fail a sync run on their own.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Upstream responded with a non-success HTTP status.
    #[error("{platform} returned HTTP {status}")]
    UpstreamStatus {
        platform: &'static str,
        status: reqwest::StatusCode,
    },
    /// Upstream responded 2xx but the payload was not usable.
    #[error("{platform} returned an unexpected payload: {reason}")]
    UnexpectedPayload {
        platform: &'static str,
        reason: String,
    },
    /// Network-level failure, including the per-fetch timeout.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
