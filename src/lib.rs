//! Proximity ranking over geographic coordinates, plus the query, response
//! and helper plumbing a search API needs around it.

pub mod geo;
pub mod merge;
pub mod places;
pub mod query;
pub mod ranker;
pub mod response;
pub mod session;
pub mod text;

pub use geo::{degrees_to_radians, haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use ranker::{rank_by_proximity, rank_by_proximity_with, Locatable, MissingCoordinates, RankOptions, Ranked};
