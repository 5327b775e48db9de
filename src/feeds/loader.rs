use super::{source::FeedSource, FeedBundle};
use crate::{core::config::QuakeMapConfig, data::geojson::GeoJson, MapError, Result};
use crossbeam_channel::Receiver;
use tokio::runtime::Handle;

/// Fetches the earthquake and plate feeds concurrently and hands them over
/// together.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    earthquakes: FeedSource,
    plates: FeedSource,
}

impl FeedLoader {
    pub fn new(config: &QuakeMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| MapError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            earthquakes: config.earthquake_feed.clone(),
            plates: config.plate_feed.clone(),
        })
    }

    /// Fetches and parses one feed. A document that is not a
    /// FeatureCollection is rejected.
    pub async fn fetch(&self, source: &FeedSource) -> Result<GeoJson> {
        log::debug!("fetching feed {}", source);
        let bytes = match source {
            FeedSource::Url(url) => {
                let response = self.client.get(url).send().await?.error_for_status()?;
                response.bytes().await?.to_vec()
            }
            FeedSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| MapError::Fetch(format!("{}: {}", path.display(), e)))?,
        };

        let geojson = GeoJson::from_slice(&bytes)?;
        if !matches!(geojson, GeoJson::FeatureCollection { .. }) {
            return Err(MapError::Parse(format!(
                "{} is not a FeatureCollection",
                source
            )));
        }
        log::info!("loaded {} features from {}", geojson.len(), source);
        Ok(geojson)
    }

    /// Issues both requests at once. The first failure wins and the other
    /// result is dropped.
    pub async fn load(&self) -> Result<FeedBundle> {
        let (earthquakes, plates) =
            tokio::try_join!(self.fetch(&self.earthquakes), self.fetch(&self.plates))?;
        Ok(FeedBundle::new(earthquakes, plates))
    }

    /// Runs [`FeedLoader::load`] on `handle` and reports the outcome exactly
    /// once on the returned channel.
    pub fn spawn(self, handle: &Handle) -> Receiver<Result<FeedBundle>> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        handle.spawn(async move {
            let result = self.load().await;
            if let Err(err) = &result {
                log::error!("failed to load feeds: {}", err);
            }
            let _ = tx.send(result);
        });
        rx
    }
}
