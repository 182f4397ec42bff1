//! Proximity ranking: order entities by great-circle distance to a reference point.
//!
//! Ranking is a pure transform. The input slice is only read; every call builds
//! a fresh `Vec<Ranked<T>>`.
//!
//! Ordering contract:
//! - ascending by distance, using a stable sort, so entities at equal distance
//!   keep their input order;
//! - non-finite distances (NaN from non-finite coordinates) are ordered as
//!   `+∞` and therefore land after every finite distance;
//! - an entity without a latitude or longitude is placed at `0` for the missing
//!   component by default (see [`MissingCoordinates`]).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::geo::{haversine_km, GeoPoint};

/// Anything that may carry a position.
pub trait Locatable {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;

    /// The point used for ranking, with missing components set to `0`.
    fn position_or_origin(&self) -> GeoPoint {
        GeoPoint::new(self.latitude().unwrap_or(0.0), self.longitude().unwrap_or(0.0))
    }

    fn has_position(&self) -> bool {
        self.latitude().is_some() && self.longitude().is_some()
    }
}

impl Locatable for GeoPoint {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }
}

/// Records decoded from arbitrary JSON: numeric `latitude` / `longitude`
/// members count; anything else (absent, `null`, strings) is missing.
impl Locatable for serde_json::Value {
    fn latitude(&self) -> Option<f64> {
        self.get("latitude").and_then(serde_json::Value::as_f64)
    }

    fn longitude(&self) -> Option<f64> {
        self.get("longitude").and_then(serde_json::Value::as_f64)
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn latitude(&self) -> Option<f64> {
        (**self).latitude()
    }

    fn longitude(&self) -> Option<f64> {
        (**self).longitude()
    }
}

/// An entity annotated with its distance from the reference point.
///
/// Serializes as the entity's own fields plus `distance` (km).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub entity: T,
    pub distance: f64,
}

/// What to do with entities that lack a latitude or longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCoordinates {
    /// Treat the missing component as `0`. Such entities are ranked as if
    /// they sat on the equator / prime meridian, which can put them near the
    /// top for references in the Gulf of Guinea.
    #[default]
    Origin,
    /// Leave them out of the result.
    Exclude,
    /// Distance is computed as for `Origin`, but they follow every entity
    /// that has both coordinates.
    Last,
}

impl fmt::Display for MissingCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Exclude => write!(f, "exclude"),
            Self::Last => write!(f, "last"),
        }
    }
}

impl std::str::FromStr for MissingCoordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "origin" | "zero" => Ok(Self::Origin),
            "exclude" | "skip" => Ok(Self::Exclude),
            "last" => Ok(Self::Last),
            _ => Err(format!(
                "Unknown missing-coordinate policy '{}'. Use 'origin', 'exclude' or 'last'.",
                s
            )),
        }
    }
}

/// Ranking options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    pub missing: MissingCoordinates,
}

impl RankOptions {
    pub fn with_missing(mut self, missing: MissingCoordinates) -> Self {
        self.missing = missing;
        self
    }
}

/// Rank `entities` by distance to (`reference_latitude`, `reference_longitude`).
///
/// Missing coordinates are treated as `0`, so an entity without any
/// location data is ranked as if it were at `(0, 0)`. Use
/// [`rank_by_proximity_with`] to exclude or demote such entities instead.
///
/// The output has the same length as the input and is sorted by ascending
/// distance; ties keep their input order.
pub fn rank_by_proximity<T>(
    entities: &[T],
    reference_latitude: f64,
    reference_longitude: f64,
) -> Vec<Ranked<T>>
where
    T: Locatable + Clone,
{
    rank_by_proximity_with(
        entities,
        reference_latitude,
        reference_longitude,
        &RankOptions::default(),
    )
}

/// [`rank_by_proximity`] with an explicit missing-coordinate policy.
pub fn rank_by_proximity_with<T>(
    entities: &[T],
    reference_latitude: f64,
    reference_longitude: f64,
    opts: &RankOptions,
) -> Vec<Ranked<T>>
where
    T: Locatable + Clone,
{
    let reference = GeoPoint::new(reference_latitude, reference_longitude);

    let mut ranked: Vec<(bool, Ranked<T>)> = entities
        .iter()
        .filter(|e| opts.missing != MissingCoordinates::Exclude || e.has_position())
        .map(|e| {
            let distance = haversine_km(reference, e.position_or_origin());
            (
                e.has_position(),
                Ranked {
                    entity: e.clone(),
                    distance,
                },
            )
        })
        .collect();

    // `sort_by` is stable; equal keys keep input order.
    match opts.missing {
        MissingCoordinates::Last => ranked.sort_by(|(a_located, a), (b_located, b)| {
            b_located
                .cmp(a_located)
                .then_with(|| compare_distance(a.distance, b.distance))
        }),
        _ => ranked.sort_by(|(_, a), (_, b)| compare_distance(a.distance, b.distance)),
    }

    let unlocated = ranked.iter().filter(|(located, _)| !located).count();
    tracing::debug!(
        total = ranked.len(),
        unlocated,
        policy = %opts.missing,
        "ranked entities by proximity"
    );

    ranked.into_iter().map(|(_, r)| r).collect()
}

/// Total order over distances with NaN treated as `+∞`.
pub fn compare_distance(a: f64, b: f64) -> Ordering {
    sort_key(a).total_cmp(&sort_key(b))
}

fn sort_key(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}
