//! Great-circle geometry on a spherical Earth.
//!
//! Distances use the haversine formula with a mean Earth radius of 6371 km,
//! which stays within ~0.5% of the ellipsoidal distance for any pair of points.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const DEG: f64 = PI / 180.0;

/// A coordinate pair in degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`. Nothing
/// here enforces it; [`crate::query::parse_location`] checks input ranges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const ORIGIN: GeoPoint = GeoPoint { latitude: 0.0, longitude: 0.0 };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance to `other`, in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * DEG
}

/// Haversine distance between two points, in kilometers.
///
/// Returns a value in `[0, π·R]` for finite input. Non-finite coordinates
/// yield NaN.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = degrees_to_radians(to.latitude - from.latitude);
    let d_lon = degrees_to_radians(to.longitude - from.longitude);

    let a = (d_lat / 2.0).sin().powi(2)
        + degrees_to_radians(from.latitude).cos()
            * degrees_to_radians(to.latitude).cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Format coordinates for display: "59.3293°N, 18.0686°E".
pub fn format_coords(point: &GeoPoint) -> String {
    let lat_dir = if point.latitude >= 0.0 { 'N' } else { 'S' };
    let lon_dir = if point.longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
        point.latitude.abs(),
        lat_dir,
        point.longitude.abs(),
        lon_dir
    )
}
