use thiserror::Error;

/// Failures surfaced by the property gateway.
///
/// Listing fetches and the favorite toggle propagate these to the caller.
/// Single-record lookups and the facet helpers instead degrade to safe
/// defaults; see `PropertyGateway` for which operation does which.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The store answered, but reported the request as failed.
    #[error("{0}")]
    Store(String),

    /// The store could not be reached, or returned a payload we could not
    /// decode.
    #[error("record store unreachable: {0}")]
    Transport(anyhow::Error),

    /// The property targeted by a favorite toggle does not exist.
    #[error("Property {0} not found")]
    NotFound(i64),

    /// First field-level error reported by a failed record update.
    #[error("{field_label}: {message}")]
    Validation { field_label: String, message: String },
}
