use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry after a backoff delay (transient failures)
    Retry,
    /// Failed permanently (bad request, programming error)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // Upstream provider errors - timeouts, non-2xx statuses, and malformed
            // payloads are all transient from the sync engine's point of view; the
            // provider is retried and degrades to an empty list once exhausted.
            Self::ProviderError(_) => ErrorRetryStrategy::Retry,

            Self::DbErr(db_err) => {
                match db_err {
                    // Connection acquisition errors - transient, should retry
                    DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                    // Connection errors - transient, should retry
                    DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                    // All other database errors are permanent failures:
                    // - Query errors (constraint violations, syntax errors, etc.)
                    // - Type conversion errors
                    // - Record not found/inserted/updated
                    // These indicate programming bugs or data issues that won't
                    // resolve with retry
                    _ => ErrorRetryStrategy::Fail,
                }
            }

            // Notification errors - delivery is fire-and-forget once attempted,
            // never re-driven through the retry layer
            Self::NotifyError(_) => ErrorRetryStrategy::Fail,

            // Configuration errors - permanent failures, won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Missing rows - permanent failures (bad references)
            Self::ContestNotFound(_) => ErrorRetryStrategy::Fail,
            Self::UserNotFound(_) => ErrorRetryStrategy::Fail,

            // Parse errors - permanent failures (bad data format)
            Self::ParseError(_) => ErrorRetryStrategy::Fail,

            // InternalError - permanent failures (internal error within AlgoBell's code)
            Self::InternalError(_) => ErrorRetryStrategy::Fail,

            // I/O errors surface only from the server harness, never inside a retry
            Self::Io(_) => ErrorRetryStrategy::Fail,
        }
    }
}
