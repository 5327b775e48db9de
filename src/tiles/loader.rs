use super::source::TileSource;
use crate::core::geo::TileCoord;
use crate::{MapError, Result};
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::thread;
use std::time::Duration;

const MAX_ATTEMPTS: usize = 2;

/// Shared blocking HTTP client, built once so every tile reuses the TLS
/// session and connection pool.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap_or_else(|err| {
            log::warn!("falling back to default tile client: {}", err);
            Client::new()
        })
});

/// Outcome of one tile download.
#[derive(Debug)]
pub struct TileResponse {
    /// Style id of the source the tile was requested from.
    pub style: String,
    pub coord: TileCoord,
    pub data: Result<Vec<u8>>,
}

/// Fetches tiles on detached threads and reports every outcome, success or
/// failure, over a channel.
#[derive(Debug, Clone)]
pub struct TileLoader {
    tx: Sender<TileResponse>,
}

impl TileLoader {
    pub fn new(tx: Sender<TileResponse>) -> Self {
        Self { tx }
    }

    /// Start downloading `coord` from `source`. Does not block.
    pub fn start_download(&self, style: &str, source: &dyn TileSource, coord: TileCoord) {
        let url = source.url(coord);
        let style = style.to_string();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let mut last_error = MapError::Tile(format!("tile {:?} not attempted", coord));
            for attempt in 1..=MAX_ATTEMPTS {
                log::debug!("fetch tile {} {:?} attempt {}", style, coord, attempt);
                match fetch(&url) {
                    Ok(data) => {
                        log::debug!("downloaded tile {:?} ({} bytes)", coord, data.len());
                        let _ = tx.send(TileResponse {
                            style,
                            coord,
                            data: Ok(data),
                        });
                        return;
                    }
                    Err(e) => {
                        log::warn!("tile {:?} download failed on attempt {}: {}", coord, attempt, e);
                        last_error = e;
                        if attempt < MAX_ATTEMPTS {
                            thread::sleep(Duration::from_millis(100));
                        }
                    }
                }
            }
            log::error!("giving up on tile {:?}", coord);
            let _ = tx.send(TileResponse {
                style,
                coord,
                data: Err(last_error),
            });
        });
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let resp = HTTP_CLIENT
        .get(url)
        .send()
        .map_err(|e| MapError::Tile(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(MapError::Tile(format!("HTTP {}", resp.status())));
    }
    let bytes = resp.bytes().map_err(|e| MapError::Tile(e.to_string()))?;
    Ok(bytes.to_vec())
}
