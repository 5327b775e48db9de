//! Loading of the earthquake and plate feeds.

#[cfg(feature = "tokio-runtime")]
pub mod loader;
pub mod source;

use crate::data::geojson::GeoJson;

#[cfg(feature = "tokio-runtime")]
pub use loader::FeedLoader;
pub use source::FeedSource;

/// Both feeds, delivered together once each has been fetched and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBundle {
    pub earthquakes: GeoJson,
    pub plates: GeoJson,
}

impl FeedBundle {
    pub fn new(earthquakes: GeoJson, plates: GeoJson) -> Self {
        Self {
            earthquakes,
            plates,
        }
    }
}
