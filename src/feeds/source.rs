use std::fmt;
use std::path::PathBuf;

/// Where a GeoJSON feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedSource::Url(trimmed.to_string())
        } else {
            FeedSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, FeedSource::Url(_))
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for FeedSource {
    fn from(location: &str) -> Self {
        FeedSource::parse(location)
    }
}
