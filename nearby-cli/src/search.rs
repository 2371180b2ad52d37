//! Search command implementation for the nearby CLI.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use geo::Coord;
use log::debug;
use nearby_core::{
    Category, ClusterGroup, PlaceQueryService, PlaceRecord, PlaceSource, RetrievalController,
    SearchInputs, cluster, lat_lon,
};
use nearby_data::{OverpassPlaceSource, OverpassPlaceSourceConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATEGORY, ARG_ENDPOINT, ARG_LATITUDE, ARG_LONGITUDE, ARG_RADIUS_MILES, ARG_TIMEOUT_SECS,
    ARG_ZOOM, CliError, ENV_CATEGORY,
};

/// Latitude used when none is configured (Chicago).
pub(crate) const DEFAULT_LATITUDE: f64 = 41.8781;
/// Longitude used when none is configured (Chicago).
pub(crate) const DEFAULT_LONGITUDE: f64 = -87.6298;
/// Radius used when none is configured.
pub(crate) const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "search",
    long_about = "Query the Overpass API for places of one category around a \
                 location. Options can come from CLI flags, configuration \
                 files, or environment variables. Results are printed as JSON, \
                 nearest first, or as marker groups when --zoom is given.",
    about = "Search for nearby places"
)]
#[ortho_config(prefix = "NEARBY")]
pub(crate) struct SearchArgs {
    /// Latitude of the search centre in decimal degrees.
    #[arg(long = ARG_LATITUDE, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the search centre in decimal degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Category to search for (park, hospital, restaurant, school, sports,
    /// cafe, library, bank).
    #[arg(long = ARG_CATEGORY, value_name = "name")]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Search radius in miles.
    #[arg(long = ARG_RADIUS_MILES, value_name = "miles")]
    #[serde(default)]
    pub(crate) radius_miles: Option<f64>,
    /// Group nearby places as a map would at this zoom level.
    #[arg(long = ARG_ZOOM, value_name = "level")]
    #[serde(default)]
    pub(crate) zoom: Option<u8>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// Abort requests that take longer than this many seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    /// Search centre (`x = longitude`, `y = latitude`).
    pub(crate) centre: Coord<f64>,
    /// Category label, validated by the query service.
    pub(crate) category: String,
    /// Search radius in miles.
    pub(crate) radius_miles: f64,
    /// Zoom level for marker grouping, if requested.
    pub(crate) zoom: Option<u8>,
    /// Overpass interpreter URL.
    pub(crate) endpoint: String,
    /// Client-side request timeout.
    pub(crate) timeout: Option<Duration>,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let category = args
            .category
            .filter(|label| !label.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_CATEGORY,
                env: ENV_CATEGORY,
            })?;
        let centre = lat_lon(
            args.latitude.unwrap_or(DEFAULT_LATITUDE),
            args.longitude.unwrap_or(DEFAULT_LONGITUDE),
        )?;
        let radius_miles = args.radius_miles.unwrap_or(DEFAULT_RADIUS_MILES);
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(CliError::InvalidRadius { radius_miles });
        }
        let endpoint = args
            .endpoint
            .unwrap_or_else(|| OverpassPlaceSourceConfig::default().endpoint);

        Ok(Self {
            centre,
            category,
            radius_miles,
            zoom: args.zoom,
            endpoint,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Builds the place source for the current search invocation.
pub(super) trait PlaceSourceBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn PlaceSource>, CliError>;
}

pub(super) struct OverpassSourceBuilder;

impl PlaceSourceBuilder for OverpassSourceBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn PlaceSource>, CliError> {
        let mut source_config = OverpassPlaceSourceConfig::new(config.endpoint.clone());
        if let Some(timeout) = config.timeout {
            source_config = source_config.with_timeout(timeout);
        }
        let source = OverpassPlaceSource::with_config(source_config).map_err(|source| {
            CliError::BuildPlaceSource {
                endpoint: config.endpoint.clone(),
                source,
            }
        })?;
        Ok(Box::new(source))
    }
}

pub(super) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &OverpassSourceBuilder, &mut stdout)
}

pub(super) fn run_search_with(
    args: SearchArgs,
    builder: &dyn PlaceSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_search(&config, builder, writer)
}

pub(super) fn execute_search(
    config: &SearchConfig,
    builder: &dyn PlaceSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    debug!(
        "Searching for {} within {} mi of ({}, {}) via {}",
        config.category, config.radius_miles, config.centre.y, config.centre.x, config.endpoint
    );
    let service = PlaceQueryService::new(builder.build(config)?);
    let mut controller = RetrievalController::new();
    let inputs = SearchInputs::new(
        Some(config.centre),
        config.category.clone(),
        config.radius_miles,
    );
    let state = controller.run(&service, inputs);
    if let Some(err) = &state.error {
        return Err(CliError::Retrieval(err.clone()));
    }

    match config.zoom {
        Some(zoom) => {
            let groups = cluster(&state.places, zoom);
            let output: Vec<GroupOutput<'_>> = groups.iter().map(GroupOutput::from).collect();
            write_json(writer, &output)
        }
        None => {
            let places: Vec<PlaceOutput<'_>> =
                state.places.iter().map(PlaceOutput::from).collect();
            write_json(writer, &places)
        }
    }
}

/// JSON shape of one place.
#[derive(Debug, Serialize)]
pub(crate) struct PlaceOutput<'a> {
    pub(crate) id: u64,
    pub(crate) label: &'a str,
    pub(crate) category: Category,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) distance_miles: f64,
}

impl<'a> From<&'a PlaceRecord> for PlaceOutput<'a> {
    fn from(place: &'a PlaceRecord) -> Self {
        Self {
            id: place.id,
            label: &place.label,
            category: place.category,
            latitude: place.position.y,
            longitude: place.position.x,
            distance_miles: place.distance_miles,
        }
    }
}

/// JSON shape of one marker group.
#[derive(Debug, Serialize)]
pub(crate) struct GroupOutput<'a> {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) count: usize,
    pub(crate) places: Vec<PlaceOutput<'a>>,
}

impl<'a> From<&ClusterGroup<'a>> for GroupOutput<'a> {
    fn from(group: &ClusterGroup<'a>) -> Self {
        Self {
            latitude: group.centre.y,
            longitude: group.centre.x,
            count: group.len(),
            places: group.members.iter().map(|p| PlaceOutput::from(*p)).collect(),
        }
    }
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
