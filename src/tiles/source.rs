use crate::core::{constants::MAX_ZOOM, geo::TileCoord};
use std::fmt;

/// Mapbox v4 raster tile endpoint.
pub const MAPBOX_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

pub const MAPBOX_ATTRIBUTION: &str =
    "Map data © OpenStreetMap contributors, CC-BY-SA, Imagery © Mapbox";

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    fn attribution(&self) -> &str;

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM as u8
    }
}

/// The four Mapbox styles offered as base layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapboxStyle {
    Streets,
    Dark,
    Outdoors,
    Satellite,
}

impl MapboxStyle {
    /// Order in which the base layers are listed in the layer control.
    pub const ALL: [MapboxStyle; 4] = [
        MapboxStyle::Dark,
        MapboxStyle::Outdoors,
        MapboxStyle::Satellite,
        MapboxStyle::Streets,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MapboxStyle::Streets => "mapbox.streets",
            MapboxStyle::Dark => "mapbox.dark",
            MapboxStyle::Outdoors => "mapbox.outdoors",
            MapboxStyle::Satellite => "mapbox.satellite",
        }
    }

    /// Name shown in the layer control.
    pub fn display_name(&self) -> &'static str {
        match self {
            MapboxStyle::Streets => "Street Map",
            MapboxStyle::Dark => "Dark Map",
            MapboxStyle::Outdoors => "Outdoor Map",
            MapboxStyle::Satellite => "Satellite",
        }
    }
}

impl fmt::Display for MapboxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Tiles from one Mapbox style, authenticated with an access token.
#[derive(Debug, Clone)]
pub struct MapboxSource {
    url_template: String,
    style: MapboxStyle,
    access_token: String,
}

impl MapboxSource {
    pub fn new(style: MapboxStyle, access_token: impl Into<String>) -> Self {
        Self {
            url_template: MAPBOX_URL_TEMPLATE.to_string(),
            style,
            access_token: access_token.into(),
        }
    }

    /// Overrides the endpoint template. Placeholders: `{id}`, `{z}`, `{x}`,
    /// `{y}` and `{accessToken}`.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn style(&self) -> MapboxStyle {
        self.style
    }
}

impl TileSource for MapboxSource {
    fn url(&self, coord: TileCoord) -> String {
        self.url_template
            .replace("{id}", self.style.id())
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{accessToken}", &self.access_token)
    }

    fn attribution(&self) -> &str {
        MAPBOX_ATTRIBUTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapbox_url() {
        let source = MapboxSource::new(MapboxStyle::Dark, "pk.test");
        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "https://api.tiles.mapbox.com/v4/mapbox.dark/3/1/2.png?access_token=pk.test"
        );
        assert_eq!(source.max_zoom(), 18);
    }

    #[test]
    fn test_custom_template() {
        let source = MapboxSource::new(MapboxStyle::Streets, "abc")
            .with_url_template("http://localhost/{id}/{z}/{x}/{y}?t={accessToken}");
        assert_eq!(
            source.url(TileCoord::new(0, 0, 0)),
            "http://localhost/mapbox.streets/0/0/0?t=abc"
        );
    }

    #[test]
    fn test_style_order_and_names() {
        let names: Vec<_> = MapboxStyle::ALL.iter().map(|s| s.display_name()).collect();
        assert_eq!(names, ["Dark Map", "Outdoor Map", "Satellite", "Street Map"]);
        assert_eq!(MapboxStyle::Satellite.id(), "mapbox.satellite");
    }
}
