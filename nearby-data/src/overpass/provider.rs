//! HTTP-based `PlaceSource` backed by the Overpass API.
//!
//! The [`PlaceSource`] trait is synchronous so the core stays embeddable in
//! synchronous contexts. This source bridges the async HTTP call to the sync
//! interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use nearby_core::{PlaceQueryService, QueryError};
//! use nearby_data::overpass::OverpassPlaceSource;
//!
//! let source = OverpassPlaceSource::new("https://overpass-api.de/api/interpreter")?;
//! let service = PlaceQueryService::new(source);
//! let parks = service.fetch_nearby(Coord { x: -87.6298, y: 41.8781 }, "park", 10.0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use log::{debug, warn};
use nearby_core::{NearbyQuery, PlaceSource, QueryError, RawFeature};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::dto::OverpassResponse;
use super::query::{DEFAULT_SERVER_TIMEOUT_SECS, build_overpass_ql};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "nearby-places/0.1";

/// Errors raised while constructing an [`OverpassPlaceSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The endpoint is not a valid absolute URL.
    #[error("invalid Overpass endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`OverpassPlaceSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassPlaceSourceConfig {
    /// Interpreter URL requests are POSTed to.
    pub endpoint: String,
    /// Client-side request timeout. `None` waits for the service.
    pub timeout: Option<Duration>,
    /// User agent string for requests.
    pub user_agent: String,
    /// Server-side query timeout written into the QL header.
    pub server_timeout_secs: u32,
}

impl Default for OverpassPlaceSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            server_timeout_secs: DEFAULT_SERVER_TIMEOUT_SECS,
        }
    }
}

impl OverpassPlaceSourceConfig {
    /// Create a configuration for the given interpreter endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Bound each request by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the server-side query timeout.
    #[must_use]
    pub fn with_server_timeout_secs(mut self, secs: u32) -> Self {
        self.server_timeout_secs = secs;
        self
    }
}

/// Place source querying an Overpass interpreter over HTTP.
///
/// Each call issues exactly one POST; failures are reported, never retried.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the source blocks on its own stored runtime.
/// Inside a multi-threaded runtime it uses that runtime's handle with
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it falls
/// back to its own runtime, which may deadlock if the caller's runtime drives
/// IO this request depends on.
pub struct OverpassPlaceSource {
    client: Client,
    endpoint: Url,
    config: OverpassPlaceSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OverpassPlaceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassPlaceSource")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OverpassPlaceSource {
    /// Create a source for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a URL or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(OverpassPlaceSourceConfig::new(endpoint))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`OverpassPlaceSource::new`].
    pub fn with_config(config: OverpassPlaceSourceConfig) -> Result<Self, SourceBuildError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|source| SourceBuildError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            endpoint,
            config,
            runtime,
        })
    }

    /// Configuration the source was built with.
    #[must_use]
    pub const fn config(&self) -> &OverpassPlaceSourceConfig {
        &self.config
    }

    async fn fetch_async(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        let ql = build_overpass_ql(query, self.config.server_timeout_secs);
        debug!("POST {} ({} bytes of QL)", self.endpoint, ql.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", ql.as_str())])
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let decoded = decode_response(&body).map_err(|err| QueryError::BadResponse {
            url: self.endpoint.to_string(),
            status: Some(status),
            message: err.to_string(),
        })?;

        if let Some(remark) = &decoded.remark {
            warn!("Overpass remark: {remark}");
        }
        Ok(decoded.into_features())
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> QueryError {
        let url = self.endpoint.to_string();
        if let Some(status) = error.status() {
            return QueryError::BadResponse {
                url,
                status: Some(status.as_u16()),
                message: error.to_string(),
            };
        }
        if error.is_decode() {
            return QueryError::BadResponse {
                url,
                status: None,
                message: error.to_string(),
            };
        }
        let message = match self.config.timeout {
            Some(timeout) if error.is_timeout() => {
                format!("timed out after {}s", timeout.as_secs_f64())
            }
            _ => error.to_string(),
        };
        QueryError::NetworkFailure { url, message }
    }
}

fn decode_response(body: &[u8]) -> Result<OverpassResponse, serde_json::Error> {
    serde_json::from_slice(body)
}

impl PlaceSource for OverpassPlaceSource {
    /// Fetch features matching `query`.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime must be multi-threaded;
    /// see the type-level documentation.
    fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        let future = self.fetch_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
