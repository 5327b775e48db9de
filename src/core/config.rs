//! Runtime configuration for the viewer.
//!
//! Everything has a default except the Mapbox access token, which the caller
//! must supply either directly or through `MAPBOX_ACCESS_TOKEN`.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PLATES_PATH,
            DEFAULT_TILE_CACHE_SIZE, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, USGS_ALL_WEEK_URL,
        },
        geo::LatLng,
    },
    feeds::source::FeedSource,
    tiles::source::{MapboxStyle, MAPBOX_URL_TEMPLATE},
    MapError, Result,
};
use std::time::Duration;

pub const ENV_ACCESS_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";
pub const ENV_EARTHQUAKE_FEED: &str = "QUAKEMAP_EARTHQUAKE_FEED";
pub const ENV_PLATES_FEED: &str = "QUAKEMAP_PLATES_FEED";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "QUAKEMAP_FETCH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct QuakeMapConfig {
    /// Mapbox token substituted into every tile URL.
    pub access_token: String,
    pub earthquake_feed: FeedSource,
    pub plate_feed: FeedSource,
    pub center: LatLng,
    pub zoom: f64,
    /// Applied to each feed request separately.
    pub fetch_timeout: Duration,
    pub tile_url_template: String,
    /// Number of tiles kept in memory across all base layers.
    pub tile_cache_size: usize,
    /// Base layer shown on load.
    pub default_base_layer: MapboxStyle,
}

impl Default for QuakeMapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            earthquake_feed: FeedSource::Url(USGS_ALL_WEEK_URL.to_string()),
            plate_feed: FeedSource::parse(DEFAULT_PLATES_PATH),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            tile_url_template: MAPBOX_URL_TEMPLATE.to_string(),
            tile_cache_size: DEFAULT_TILE_CACHE_SIZE,
            default_base_layer: MapboxStyle::Streets,
        }
    }
}

impl QuakeMapConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(ENV_ACCESS_TOKEN).ok_or_else(|| {
            MapError::Config(format!("{} is not set", ENV_ACCESS_TOKEN))
        })?;
        let mut config = Self::new(access_token.trim());

        if let Some(feed) = get(ENV_EARTHQUAKE_FEED) {
            config.earthquake_feed = FeedSource::parse(&feed);
        }
        if let Some(feed) = get(ENV_PLATES_FEED) {
            config.plate_feed = FeedSource::parse(&feed);
        }
        if let Some(secs) = get(ENV_FETCH_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                MapError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_FETCH_TIMEOUT_SECS, secs
                ))
            })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_earthquake_feed(mut self, source: FeedSource) -> Self {
        self.earthquake_feed = source;
        self
    }

    pub fn with_plate_feed(mut self, source: FeedSource) -> Self {
        self.plate_feed = source;
        self
    }

    pub fn with_view(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_tile_url_template(mut self, template: impl Into<String>) -> Self {
        self.tile_url_template = template.into();
        self
    }

    pub fn with_tile_cache_size(mut self, size: usize) -> Self {
        self.tile_cache_size = size;
        self
    }

    pub fn with_default_base_layer(mut self, style: MapboxStyle) -> Self {
        self.default_base_layer = style;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(MapError::Config("Mapbox access token is empty".to_string()));
        }
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "initial center ({}, {}) is not a valid coordinate",
                self.center.lat, self.center.lng
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MapError::Config(format!(
                "initial zoom {} is outside {}..={}",
                self.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if self.fetch_timeout.is_zero() {
            return Err(MapError::Config("fetch timeout must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuakeMapConfig::new("pk.test");
        assert_eq!(config.center, LatLng::new(37.09, -95.71));
        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!(config.earthquake_feed.is_remote());
        assert_eq!(
            config.plate_feed,
            FeedSource::File(PathBuf::from("static/js/PB2002_plates.json"))
        );
        assert_eq!(config.default_base_layer, MapboxStyle::Streets);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token() {
        let err = QuakeMapConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, MapError::Config(ref msg) if msg.contains("MAPBOX_ACCESS_TOKEN")));

        let err = QuakeMapConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "  ")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = QuakeMapConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "pk.abc"),
            (ENV_EARTHQUAKE_FEED, "fixtures/quakes.geojson"),
            (ENV_PLATES_FEED, "https://example.com/plates.json"),
            (ENV_FETCH_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.access_token, "pk.abc");
        assert_eq!(
            config.earthquake_feed,
            FeedSource::File(PathBuf::from("fixtures/quakes.geojson"))
        );
        assert!(config.plate_feed.is_remote());
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout() {
        let err = QuakeMapConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "pk.abc"),
            (ENV_FETCH_TIMEOUT_SECS, "soon"),
        ]));
        assert!(matches!(err, Err(MapError::Config(_))));

        let err = QuakeMapConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "pk.abc"),
            (ENV_FETCH_TIMEOUT_SECS, "0"),
        ]));
        assert!(matches!(err, Err(MapError::Config(_))));
    }

    #[test]
    fn test_validate_view() {
        let config = QuakeMapConfig::new("pk").with_view(LatLng::new(95.0, 0.0), 3.0);
        assert!(config.validate().is_err());
        let config = QuakeMapConfig::new("pk").with_view(LatLng::new(0.0, 0.0), 19.0);
        assert!(config.validate().is_err());
    }
}
