//! Error types emitted by the nearby CLI.

use std::sync::Arc;

use nearby_core::{CoordinateError, QueryError};
use nearby_data::SourceBuildError;
use thiserror::Error;

/// Errors emitted by the nearby CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The search location is outside the valid coordinate ranges.
    #[error("invalid search location: {0}")]
    InvalidLocation(#[from] CoordinateError),
    /// The search radius is not a positive number of miles.
    #[error("--radius-miles must be positive, got {radius_miles}")]
    InvalidRadius { radius_miles: f64 },
    /// Constructing the place source failed.
    #[error("failed to build place source for {endpoint:?}: {source}")]
    BuildPlaceSource {
        endpoint: String,
        #[source]
        source: SourceBuildError,
    },
    /// The retrieval finished in the failed state.
    #[error("search failed: {0}")]
    Retrieval(#[source] QueryError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
