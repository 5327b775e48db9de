//! Feed loading from local files through the async loader.

#![cfg(feature = "tokio-runtime")]

use quakemap::{FeedLoader, FeedSource, MapError, QuakeMap, QuakeMapConfig};
use std::path::PathBuf;
use std::time::Duration;

fn temp_feed(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "quakemap-{}-{}.geojson",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

fn config(earthquakes: FeedSource, plates: FeedSource) -> QuakeMapConfig {
    QuakeMapConfig::new("pk.test")
        .with_earthquake_feed(earthquakes)
        .with_plate_feed(plates)
        .with_fetch_timeout(Duration::from_secs(5))
}

const QUAKES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "id": "a",
     "properties": {"mag": 2.3, "place": "5km S of Somewhere", "time": 1700000000000},
     "geometry": {"type": "Point", "coordinates": [140.0, 35.0, 12.0]}}
]}"#;

const PLATES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "properties": {"PlateName": "Okhotsk"},
     "geometry": {"type": "LineString", "coordinates": [[140.0, 40.0], [150.0, 50.0]]}}
]}"#;

#[tokio::test]
async fn test_load_both_feeds() {
    let quakes = temp_feed("quakes-ok", QUAKES);
    let plates = temp_feed("plates-ok", PLATES);
    let config = config(FeedSource::File(quakes.clone()), FeedSource::File(plates.clone()));

    let bundle = FeedLoader::new(&config).unwrap().load().await.unwrap();
    assert_eq!(bundle.earthquakes.len(), 1);
    assert_eq!(bundle.plates.len(), 1);

    let map = QuakeMap::assemble(&config, &bundle).unwrap();
    assert_eq!(map.earthquakes().unwrap().markers().len(), 1);
    assert!(map.status().is_empty());

    let _ = std::fs::remove_file(quakes);
    let _ = std::fs::remove_file(plates);
}

#[tokio::test]
async fn test_missing_file_fails_whole_load() {
    let plates = temp_feed("plates-missing", PLATES);
    let config = config(
        FeedSource::File(std::env::temp_dir().join("quakemap-does-not-exist.geojson")),
        FeedSource::File(plates.clone()),
    );

    let err = FeedLoader::new(&config).unwrap().load().await.unwrap_err();
    assert!(matches!(err, MapError::Fetch(ref msg) if msg.contains("quakemap-does-not-exist")));

    let _ = std::fs::remove_file(plates);
}

#[tokio::test]
async fn test_malformed_and_non_collection_documents() {
    let broken = temp_feed("broken", "{\"type\": \"FeatureCollection\", ");
    let single = temp_feed(
        "single",
        r#"{"type": "Feature", "properties": {}, "geometry": null}"#,
    );
    let loader = FeedLoader::new(&QuakeMapConfig::new("pk.test")).unwrap();

    let err = loader.fetch(&FeedSource::File(broken.clone())).await.unwrap_err();
    assert!(matches!(err, MapError::Parse(_)));

    let err = loader.fetch(&FeedSource::File(single.clone())).await.unwrap_err();
    assert!(matches!(err, MapError::Parse(ref msg) if msg.contains("FeatureCollection")));

    let _ = std::fs::remove_file(broken);
    let _ = std::fs::remove_file(single);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_spawned_load_reports_once() {
    let quakes = temp_feed("quakes-spawn", QUAKES);
    let plates = temp_feed("plates-spawn", PLATES);
    let config = config(FeedSource::File(quakes.clone()), FeedSource::File(plates.clone()));

    let rx = FeedLoader::new(&config)
        .unwrap()
        .spawn(&tokio::runtime::Handle::current());
    let result = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());

    let _ = std::fs::remove_file(quakes);
    let _ = std::fs::remove_file(plates);
}
