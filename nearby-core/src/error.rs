//! Errors raised while retrieving nearby places.

use thiserror::Error;

/// Errors from [`crate::PlaceQueryService::fetch_nearby`] and the retrieval
/// controller.
///
/// Input errors fail fast before any network call. Service errors are surfaced
/// as-is; nothing in this crate retries them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The category label is not one of the supported categories.
    #[error("unsupported category: {label}")]
    InvalidCategory {
        /// Label supplied by the caller.
        label: String,
    },
    /// The search radius was zero, negative or not finite.
    #[error("search radius must be a positive number of miles, got {radius_miles}")]
    InvalidRadius {
        /// Radius supplied by the caller.
        radius_miles: f64,
    },
    /// The data source could not be reached.
    #[error("request to {url} failed: {message}")]
    NetworkFailure {
        /// Endpoint that was contacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The data source answered with a non-success status or an unreadable
    /// body.
    #[error("bad response from {url}: {message}")]
    BadResponse {
        /// Endpoint that was contacted.
        url: String,
        /// HTTP status, when one was received.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },
    /// Address resolution produced no usable coordinate.
    #[error("no location found for '{address}'")]
    NoLocation {
        /// Free-text address that failed to resolve.
        address: String,
    },
}

impl QueryError {
    /// Return `true` when the error stems from caller input rather than the
    /// data source.
    ///
    /// # Examples
    /// ```
    /// use nearby_core::QueryError;
    ///
    /// let err = QueryError::InvalidCategory { label: "museum".into() };
    /// assert!(err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCategory { .. } | Self::InvalidRadius { .. } | Self::NoLocation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(QueryError::NetworkFailure { url: "http://x".into(), message: "refused".into() })]
    #[case(QueryError::BadResponse { url: "http://x".into(), status: Some(504), message: "gateway".into() })]
    fn service_errors_are_not_input_errors(#[case] err: QueryError) {
        assert!(!err.is_input_error());
    }

    #[rstest]
    fn messages_carry_context() {
        let err = QueryError::InvalidCategory {
            label: "museum".into(),
        };
        assert_eq!(err.to_string(), "unsupported category: museum");
    }
}
