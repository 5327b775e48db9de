use serde::{Deserialize, Serialize};

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// A geographical coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate from a GeoJSON position (`[lng, lat, ...]`).
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped == -180.0 && lng > 0.0 {
            180.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the range the projection can represent.
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in screen or projected pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Shortest distance from this point to the segment `a`–`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;

        if len_sq == 0.0 {
            return self.distance_to(a);
        }

        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A tile coordinate in the slippy map tile system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    pub fn tiles_per_axis(zoom: u8) -> u32 {
        1u32 << zoom.min(31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_ignores_depth() {
        let ll = LatLng::from_position(&[-117.5, 35.7, 8.2]).unwrap();
        assert_eq!(ll, LatLng::new(35.7, -117.5));
        assert!(LatLng::from_position(&[1.0]).is_none());
    }

    #[test]
    fn test_validity() {
        assert!(LatLng::new(37.09, -95.71).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_wrap_lng() {
        assert_eq!(LatLng::wrap_lng(190.0), -170.0);
        assert_eq!(LatLng::wrap_lng(-190.0), 170.0);
        assert_eq!(LatLng::wrap_lng(180.0), 180.0);
        assert_eq!(LatLng::wrap_lng(45.0), 45.0);
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(Point::new(5.0, 3.0).distance_to_segment(&a, &b), 3.0);
        assert_eq!(Point::new(-4.0, 3.0).distance_to_segment(&a, &b), 5.0);
        assert_eq!(Point::new(3.0, 4.0).distance_to_segment(&a, &a), 5.0);
    }

    #[test]
    fn test_tiles_per_axis() {
        assert_eq!(TileCoord::tiles_per_axis(0), 1);
        assert_eq!(TileCoord::tiles_per_axis(3), 8);
    }
}
