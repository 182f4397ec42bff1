//! Core types for places and search results.

use serde::{Deserialize, Serialize};

use crate::geo::{format_coords, GeoPoint};
use crate::query::SearchQuery;
use crate::ranker::{Locatable, Ranked};

/// A named place with an optional position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "SE", "US")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country_code: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    pub fn display_line(&self) -> String {
        let country = match &self.country_code {
            Some(cc) => format!(" ({})", cc),
            None => String::new(),
        };
        let coords = match self.point() {
            Some(p) => format_coords(&p),
            None => "no location".to_string(),
        };
        format!("{}{} \u{2014} {}", self.name, country, coords)
    }
}

impl Locatable for Place {
    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }
}

/// One search result: the entity, plus its distance when the search was
/// anchored at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl<T> Hit<T> {
    pub fn plain(entity: T) -> Self {
        Self { entity, distance: None }
    }
}

impl<T> From<Ranked<T>> for Hit<T> {
    fn from(r: Ranked<T>) -> Self {
        Self {
            entity: r.entity,
            distance: Some(r.distance),
        }
    }
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    pub items: Vec<Hit<T>>,
    pub page: u32,
    pub per_page: u32,
    /// Matches before pagination.
    pub total: usize,
}

impl<T> SearchPage<T> {
    /// Cut the page described by `query` out of the full, ordered hit list.
    pub fn from_hits(hits: Vec<Hit<T>>, query: &SearchQuery) -> Self {
        let total = hits.len();
        let items = hits
            .into_iter()
            .skip(query.offset())
            .take(query.per_page as usize)
            .collect();
        Self {
            items,
            page: query.page,
            per_page: query.per_page,
            total,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SearchPage<U> {
        SearchPage {
            items: self
                .items
                .into_iter()
                .map(|h| Hit {
                    entity: f(h.entity),
                    distance: h.distance,
                })
                .collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
