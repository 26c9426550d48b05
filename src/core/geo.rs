use crate::constants::METERS_PER_DEGREE;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from the (longitude, latitude) order the map APIs use
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Approximate ground distance in metres, see [`ground_distance_meters`]
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        ground_distance_meters(self, other)
    }

    /// Formats as `"lng,lat"`, the form used in `ll` and `pt` query parameters
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }

    /// Parses a geocoder `Point.pos` value: longitude and latitude separated
    /// by whitespace, e.g. `"30.315868 59.939095"`.
    pub fn parse_pos(pos: &str) -> Result<Self> {
        let mut parts = pos.split_whitespace();
        let (Some(lng), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MapError::InvalidCoordinates(pos.to_string()));
        };

        let lng = lng
            .parse::<f64>()
            .map_err(|_| MapError::InvalidCoordinates(pos.to_string()))?;
        let lat = lat
            .parse::<f64>()
            .map_err(|_| MapError::InvalidCoordinates(pos.to_string()))?;

        Ok(Self::from_lng_lat(lng, lat))
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lng, self.lat)
    }
}

/// Represents a point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Approximate distance in metres between two coordinates.
///
/// Equirectangular approximation: one degree is taken as 111 km and the
/// longitude offset is scaled by the cosine of the mean latitude. Good for
/// tens of metres up to a few kilometres; there is no antimeridian or pole
/// handling.
pub fn ground_distance_meters(a: &LatLng, b: &LatLng) -> f64 {
    let mean_lat_rad = ((a.lat + b.lat) / 2.0).to_radians();
    let lat_lng_factor = mean_lat_rad.cos();

    let dx = (a.lng - b.lng).abs() * METERS_PER_DEGREE * lat_lng_factor;
    let dy = (a.lat - b.lat).abs() * METERS_PER_DEGREE;

    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::from_lng_lat(30.3, 59.9);
        assert_eq!(coord.lat, 59.9);
        assert_eq!(coord.lng, 30.3);
        assert_eq!(coord, LatLng::new(59.9, 30.3));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = LatLng::from_lng_lat(30.0, 60.0);
        assert_eq!(ground_distance_meters(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_along_longitude() {
        let a = LatLng::from_lng_lat(30.0, 60.0);
        let b = LatLng::from_lng_lat(30.001, 60.0);
        let expected = 0.001 * 111_000.0 * 60.0_f64.to_radians().cos();

        assert!((a.distance_to(&b) - expected).abs() < 1e-6);
        // ~55.5 m at this latitude
        assert!((a.distance_to(&b) - 55.5).abs() < 0.01);
    }

    #[test]
    fn test_distance_along_latitude() {
        let a = LatLng::from_lng_lat(30.0, 60.0);
        let b = LatLng::from_lng_lat(30.0, 60.0004);
        assert!((ground_distance_meters(&a, &b) - 44.4).abs() < 1e-6);
        assert_eq!(ground_distance_meters(&a, &b), ground_distance_meters(&b, &a));
    }

    #[test]
    fn test_parse_pos() {
        let coord = LatLng::parse_pos("30.315868 59.939095").unwrap();
        assert_eq!(coord.lng, 30.315868);
        assert_eq!(coord.lat, 59.939095);

        assert!(LatLng::parse_pos("30.3").is_err());
        assert!(LatLng::parse_pos("30.3 north").is_err());
        assert!(LatLng::parse_pos("1 2 3").is_err());
    }

    #[test]
    fn test_query_formatting() {
        let coord = LatLng::from_lng_lat(30.5, 60.25);
        assert_eq!(coord.to_query(), "30.5,60.25");
    }
}
