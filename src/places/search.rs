//! Paginated search: text filter, then proximity ranking when a location is
//! given, or field ordering otherwise.
//!
//! Works over anything [`Searchable`]: built-in [`Place`]s and arbitrary JSON
//! records go through the same pipeline.

use serde_json::Value;
use std::cmp::Ordering;

use super::types::{Hit, Place, SearchPage};
use crate::query::{Order, QueryError, SearchQuery, DEFAULT_ORDER_BY};
use crate::ranker::{rank_by_proximity_with, Locatable, RankOptions};

/// A field value used for ordering. `Missing` sorts before numbers, numbers
/// before text.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }

    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Entities that can be filtered by text and ordered by a named field.
pub trait Searchable: Locatable + Clone {
    /// Whether the entity matches `needle` (already trimmed and lowercased,
    /// never empty).
    fn matches(&self, needle: &str) -> bool;

    /// Ordering key for `field`, or `None` when the entity has no such field.
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

impl Searchable for Place {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.to_lowercase())),
            "country" => Some(match &self.country_code {
                Some(cc) => SortKey::Text(cc.clone()),
                None => SortKey::Missing,
            }),
            _ => None,
        }
    }
}

/// JSON records match on their `name` or `title` string and order by any
/// member; `null` counts as absent.
impl Searchable for Value {
    fn matches(&self, needle: &str) -> bool {
        ["name", "title"].iter().any(|key| {
            self.get(*key)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(needle))
        })
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match self.get(field)? {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().map_or(SortKey::Missing, SortKey::Number)),
            Value::String(s) => Some(SortKey::Text(s.to_lowercase())),
            Value::Bool(b) => Some(SortKey::Text(b.to_string())),
            Value::Array(_) | Value::Object(_) => Some(SortKey::Missing),
        }
    }
}

/// Apply `query` to `entities`.
///
/// With `query.location` set, results are ranked by distance and `order` /
/// `order_by` are ignored. Otherwise entities are ordered by `order_by`:
/// `createdAt` falls back to input order for entities without that field;
/// any other field must exist on at least one entity, or the query fails
/// with [`QueryError::UnknownOrderField`].
pub fn search<T: Searchable>(
    entities: &[T],
    query: &SearchQuery,
    opts: &RankOptions,
) -> Result<SearchPage<T>, QueryError> {
    let needle = query.search.trim().to_lowercase();
    let matched: Vec<&T> = entities
        .iter()
        .filter(|e| needle.is_empty() || e.matches(&needle))
        .collect();

    let hits: Vec<Hit<&T>> = match query.location {
        Some(at) => rank_by_proximity_with(&matched, at.latitude, at.longitude, opts)
            .into_iter()
            .map(Hit::from)
            .collect(),
        None => {
            let field = query.order_by.as_str();
            if field != DEFAULT_ORDER_BY && !entities.iter().any(|e| e.sort_key(field).is_some()) {
                return Err(QueryError::UnknownOrderField(field.to_string()));
            }
            order_by_field(matched, field, query.order)
                .into_iter()
                .map(Hit::plain)
                .collect()
        }
    };

    let page = SearchPage::from_hits(hits, query).map(T::clone);

    tracing::debug!(
        search = %query.search,
        total = page.total,
        page = query.page,
        per_page = query.per_page,
        "searched entities"
    );

    Ok(page)
}

/// [`search`] over places.
pub fn search_places(
    places: &[Place],
    query: &SearchQuery,
    opts: &RankOptions,
) -> Result<SearchPage<Place>, QueryError> {
    search(places, query, opts)
}

fn order_by_field<'a, T: Searchable>(mut entities: Vec<&'a T>, field: &str, order: Order) -> Vec<&'a T> {
    let key = |e: &T| e.sort_key(field).unwrap_or(SortKey::Missing);
    entities.sort_by(|a, b| key(*a).compare(&key(*b)));
    if order == Order::Desc {
        entities.reverse();
    }
    entities
}
