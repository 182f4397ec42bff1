//! Search query parameters: raw strings in, a validated [`SearchQuery`] out.
//!
//! Defaults: `perPage=20`, `page=1`, `search=""`, `order=desc`,
//! `orderBy=createdAt`, no location.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::GeoPoint;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_ORDER_BY: &str = "createdAt";

const LOCATION_FORMAT_MSG: &str =
    "Invalid location format. Correct format is 'latitude,longitude'.";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Query parameters exactly as received, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchQuery {
    pub per_page: Option<String>,
    pub page: Option<String>,
    pub search: Option<String>,
    pub order: Option<String>,
    pub order_by: Option<String>,
    pub location: Option<String>,
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub per_page: u32,
    pub page: u32,
    pub search: String,
    pub order: Order,
    pub order_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            search: String::new(),
            order: Order::Desc,
            order_by: DEFAULT_ORDER_BY.to_string(),
            location: None,
        }
    }
}

impl SearchQuery {
    /// Number of items to skip for the current page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

/// Query validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    InvalidNumber { field: &'static str, value: String },
    OutOfRange { field: &'static str, value: u64, min: u32, max: u32 },
    InvalidOrder(String),
    UnknownOrderField(String),
    InvalidLocation(String),
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value } => {
                write!(f, "Invalid '{}': expected a whole number, got '{}'", field, value)
            }
            Self::OutOfRange { field, value, min, .. } if *value < *min as u64 => {
                write!(f, "Invalid '{}': {} is below the minimum of {}", field, value, min)
            }
            Self::OutOfRange { field, value, max, .. } => {
                write!(f, "Invalid '{}': {} is above the maximum of {}", field, value, max)
            }
            Self::InvalidOrder(o) => write!(f, "Invalid 'order' '{}'. Use 'asc' or 'desc'.", o),
            Self::UnknownOrderField(o) => write!(f, "Cannot order by '{}'", o),
            Self::InvalidLocation(_) => write!(f, "{}", LOCATION_FORMAT_MSG),
            Self::CoordinateOutOfRange { latitude, longitude } => write!(
                f,
                "Invalid coordinates ({}, {}). Lat: -90..90, Lon: -180..180",
                latitude, longitude
            ),
        }
    }
}

impl std::error::Error for QueryError {}

impl RawSearchQuery {
    pub fn validate(&self) -> Result<SearchQuery, QueryError> {
        let per_page = parse_count("perPage", self.per_page.as_deref(), DEFAULT_PER_PAGE)?;
        check_range("perPage", per_page, 1, MAX_PER_PAGE)?;

        let page = parse_count("page", self.page.as_deref(), 1)?;
        check_range("page", page, 1, u32::MAX)?;

        let order = match self.order.as_deref() {
            None => Order::default(),
            Some("desc") => Order::Desc,
            Some("asc") => Order::Asc,
            Some(other) => return Err(QueryError::InvalidOrder(other.to_string())),
        };

        let location = self.location.as_deref().map(parse_location).transpose()?;

        Ok(SearchQuery {
            per_page: per_page as u32,
            page: page as u32,
            search: self.search.clone().unwrap_or_default(),
            order,
            order_by: self
                .order_by
                .clone()
                .unwrap_or_else(|| DEFAULT_ORDER_BY.to_string()),
            location,
        })
    }
}

fn parse_count(field: &'static str, raw: Option<&str>, default: u32) -> Result<u64, QueryError> {
    match raw {
        None => Ok(default as u64),
        Some(s) => s.trim().parse::<u64>().map_err(|_| QueryError::InvalidNumber {
            field,
            value: s.to_string(),
        }),
    }
}

fn check_range(field: &'static str, value: u64, min: u32, max: u32) -> Result<(), QueryError> {
    if value < min as u64 || value > max as u64 {
        return Err(QueryError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

/// Parse `"latitude,longitude"` into a range-checked point.
pub fn parse_location(raw: &str) -> Result<GeoPoint, QueryError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(QueryError::InvalidLocation(raw.to_string()));
    }

    let mut values = [0.0f64; 2];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| QueryError::InvalidLocation(raw.to_string()))?;
    }

    let [latitude, longitude] = values;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(QueryError::CoordinateOutOfRange { latitude, longitude });
    }
    Ok(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSearchQuery {
        RawSearchQuery::default()
    }

    #[test]
    fn test_defaults() {
        let q = raw().validate().unwrap();
        assert_eq!(q, SearchQuery::default());
        assert_eq!(q.per_page, 20);
        assert_eq!(q.page, 1);
        assert_eq!(q.order, Order::Desc);
        assert_eq!(q.order_by, "createdAt");
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_from_query_map() {
        let q: RawSearchQuery = serde_json::from_value(serde_json::json!({
            "perPage": "50",
            "page": "3",
            "search": "sto",
            "order": "asc",
            "orderBy": "name",
            "location": "59.3293,18.0686"
        }))
        .unwrap();
        let q = q.validate().unwrap();
        assert_eq!(q.per_page, 50);
        assert_eq!(q.page, 3);
        assert_eq!(q.offset(), 100);
        assert_eq!(q.search, "sto");
        assert_eq!(q.order, Order::Asc);
        assert_eq!(q.order_by, "name");
        assert_eq!(q.location, Some(GeoPoint::new(59.3293, 18.0686)));
    }

    #[test]
    fn test_per_page_bounds() {
        for bad in ["0", "101"] {
            let q = RawSearchQuery { per_page: Some(bad.into()), ..raw() };
            assert!(matches!(q.validate(), Err(QueryError::OutOfRange { field: "perPage", .. })));
        }
        let q = RawSearchQuery { per_page: Some("100".into()), ..raw() };
        assert_eq!(q.validate().unwrap().per_page, 100);
    }

    #[test]
    fn test_page_above_u32_is_too_large() {
        let q = RawSearchQuery { page: Some("5000000000".into()), ..raw() };
        let err = q.validate().unwrap_err();
        assert_eq!(
            err,
            QueryError::OutOfRange { field: "page", value: 5_000_000_000, min: 1, max: u32::MAX }
        );
        assert_eq!(err.to_string(), "Invalid 'page': 5000000000 is above the maximum of 4294967295");
    }

    #[test]
    fn test_range_messages() {
        let q = RawSearchQuery { per_page: Some("0".into()), ..raw() };
        assert_eq!(q.validate().unwrap_err().to_string(), "Invalid 'perPage': 0 is below the minimum of 1");
        let q = RawSearchQuery { per_page: Some("101".into()), ..raw() };
        assert_eq!(q.validate().unwrap_err().to_string(), "Invalid 'perPage': 101 is above the maximum of 100");
    }

    #[test]
    fn test_page_rejects_garbage() {
        let q = RawSearchQuery { page: Some("two".into()), ..raw() };
        assert!(matches!(q.validate(), Err(QueryError::InvalidNumber { field: "page", .. })));
        let q = RawSearchQuery { page: Some("0".into()), ..raw() };
        assert!(matches!(q.validate(), Err(QueryError::OutOfRange { field: "page", .. })));
        let q = RawSearchQuery { page: Some("".into()), ..raw() };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_order_values() {
        let q = RawSearchQuery { order: Some("DESC".into()), ..raw() };
        assert_eq!(q.validate(), Err(QueryError::InvalidOrder("DESC".into())));
    }

    #[test]
    fn test_location_latitude_first() {
        let p = parse_location("40.7128,-74.0060").unwrap();
        assert_eq!(p.latitude, 40.7128);
        assert_eq!(p.longitude, -74.0060);
        let p = parse_location(" 1.5 , 2.5 ").unwrap();
        assert_eq!(p, GeoPoint::new(1.5, 2.5));
    }

    #[test]
    fn test_location_malformed() {
        for bad in ["", "1", "1,2,3", "a,b", "1,", "12abc,3", "NaN,1", "inf,0"] {
            assert!(
                matches!(parse_location(bad), Err(QueryError::InvalidLocation(_))),
                "accepted {bad:?}"
            );
        }
        let err = parse_location("x,y").unwrap_err();
        assert_eq!(err.to_string(), LOCATION_FORMAT_MSG);
    }

    #[test]
    fn test_location_out_of_range() {
        assert!(matches!(
            parse_location("91,0"),
            Err(QueryError::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            parse_location("0,-180.5"),
            Err(QueryError::CoordinateOutOfRange { .. })
        ));
        assert!(parse_location("-90,180").is_ok());
    }
}
