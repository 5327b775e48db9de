use crate::core::{constants::DEFAULT_TILE_CACHE_SIZE, geo::TileCoord};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// In-memory LRU cache of downloaded tile bytes, keyed by tile style and
/// coordinate. Clones share the same storage.
#[derive(Debug)]
pub struct TileCache {
    cache: Arc<Mutex<LruCache<(String, TileCoord), Arc<Vec<u8>>>>>,
}

impl TileCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub fn get(&self, style: &str, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        self.cache
            .lock()
            .ok()?
            .get(&(style.to_string(), *coord))
            .cloned()
    }

    pub fn insert(&self, style: &str, coord: TileCoord, data: Vec<u8>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put((style.to_string(), coord), Arc::new(data));
        }
    }

    pub fn contains(&self, style: &str, coord: &TileCoord) -> bool {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.contains(&(style.to_string(), *coord)))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().ok().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }
}

impl Clone for TileCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_CACHE_SIZE)
    }
}
