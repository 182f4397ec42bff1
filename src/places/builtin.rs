//! Built-in world city dataset with alias and fuzzy lookup.

use super::types::Place;
use crate::text::capitalize;

struct BuiltinCity {
    names: &'static [&'static str], // canonical + aliases
    lat: f64,
    lon: f64,
    country_code: &'static str,
}

const BUILTIN_CITIES: &[BuiltinCity] = &[
    BuiltinCity { names: &["mecca", "makkah", "mekka"], lat: 21.4225, lon: 39.8262, country_code: "SA" },
    BuiltinCity { names: &["medina", "madinah", "al-madinah"], lat: 24.4686, lon: 39.6142, country_code: "SA" },
    BuiltinCity { names: &["stockholm", "stokholm"], lat: 59.3293, lon: 18.0686, country_code: "SE" },
    BuiltinCity { names: &["tromso", "tromsø", "tromsoe"], lat: 69.6492, lon: 18.9553, country_code: "NO" },
    BuiltinCity { names: &["svalbard", "longyearbyen"], lat: 78.2232, lon: 15.6267, country_code: "NO" },
    BuiltinCity { names: &["new york", "newyork", "nyc"], lat: 40.7128, lon: -74.0060, country_code: "US" },
    BuiltinCity { names: &["tokyo"], lat: 35.6762, lon: 139.6503, country_code: "JP" },
    BuiltinCity { names: &["london"], lat: 51.5074, lon: -0.1278, country_code: "GB" },
    BuiltinCity { names: &["cairo", "al-qahirah"], lat: 30.0444, lon: 31.2357, country_code: "EG" },
    BuiltinCity { names: &["istanbul"], lat: 41.0082, lon: 28.9784, country_code: "TR" },
    BuiltinCity { names: &["jakarta"], lat: -6.2088, lon: 106.8456, country_code: "ID" },
    BuiltinCity { names: &["kuala lumpur", "kl"], lat: 3.1390, lon: 101.6869, country_code: "MY" },
    BuiltinCity { names: &["riyadh"], lat: 24.7136, lon: 46.6753, country_code: "SA" },
    BuiltinCity { names: &["dubai"], lat: 25.2048, lon: 55.2708, country_code: "AE" },
    BuiltinCity { names: &["oslo"], lat: 59.9139, lon: 10.7522, country_code: "NO" },
    BuiltinCity { names: &["paris"], lat: 48.8566, lon: 2.3522, country_code: "FR" },
    BuiltinCity { names: &["berlin"], lat: 52.5200, lon: 13.4050, country_code: "DE" },
    BuiltinCity { names: &["moscow", "moskva"], lat: 55.7558, lon: 37.6173, country_code: "RU" },
    BuiltinCity { names: &["sydney"], lat: -33.8688, lon: 151.2093, country_code: "AU" },
    BuiltinCity { names: &["los angeles", "la"], lat: 34.0522, lon: -118.2437, country_code: "US" },
    BuiltinCity { names: &["dhaka", "dacca"], lat: 23.8103, lon: 90.4125, country_code: "BD" },
    BuiltinCity { names: &["casablanca", "dar el beida"], lat: 33.5731, lon: -7.5898, country_code: "MA" },
    BuiltinCity { names: &["mumbai", "bombay"], lat: 19.0760, lon: 72.8777, country_code: "IN" },
    BuiltinCity { names: &["delhi", "new delhi"], lat: 28.6139, lon: 77.2090, country_code: "IN" },
    BuiltinCity { names: &["karachi"], lat: 24.8607, lon: 67.0011, country_code: "PK" },
    BuiltinCity { names: &["tehran"], lat: 35.6892, lon: 51.3890, country_code: "IR" },
    BuiltinCity { names: &["baghdad"], lat: 33.3152, lon: 44.3661, country_code: "IQ" },
    BuiltinCity { names: &["jerusalem", "al-quds"], lat: 31.7683, lon: 35.2137, country_code: "IL" },
    BuiltinCity { names: &["nairobi"], lat: -1.2921, lon: 36.8219, country_code: "KE" },
    BuiltinCity { names: &["lagos"], lat: 6.5244, lon: 3.3792, country_code: "NG" },
];

const MAX_FUZZY_DISTANCE: usize = 2;

/// Levenshtein distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

fn to_place(city: &BuiltinCity) -> Place {
    Place::new(capitalize(city.names[0]), city.lat, city.lon).with_country(city.country_code)
}

/// All built-in cities, in dataset order.
pub fn builtin_places() -> Vec<Place> {
    BUILTIN_CITIES.iter().map(to_place).collect()
}

/// Look up a built-in city by name or alias, case-insensitively.
///
/// Falls back to the closest name within an edit distance of 2; on equal
/// distance the earlier dataset entry wins.
pub fn find_builtin(query: &str) -> Option<Place> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    if let Some(city) = BUILTIN_CITIES.iter().find(|c| c.names.contains(&q.as_str())) {
        return Some(to_place(city));
    }

    let mut best: Option<(&BuiltinCity, usize)> = None;
    for city in BUILTIN_CITIES {
        for name in city.names {
            let dist = edit_distance(&q, name);
            if dist <= MAX_FUZZY_DISTANCE && best.map_or(true, |(_, d)| dist < d) {
                best = Some((city, dist));
            }
        }
    }

    best.map(|(city, _)| to_place(city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_exact() {
        let p = find_builtin("Mecca").unwrap();
        assert_eq!(p.name, "Mecca");
        assert!((p.latitude.unwrap() - 21.4225).abs() < 0.01);
        assert_eq!(p.country_code, Some("SA".to_string()));
    }

    #[test]
    fn test_builtin_case_insensitive() {
        assert_eq!(find_builtin("STOCKHOLM").unwrap().name, "Stockholm");
    }

    #[test]
    fn test_builtin_alias() {
        assert_eq!(find_builtin("mekka").unwrap().name, "Mecca");
        assert_eq!(find_builtin("NYC").unwrap().name, "New York");
    }

    #[test]
    fn test_builtin_fuzzy() {
        // "stokholm" is an alias; "stockhom" is one edit away
        assert_eq!(find_builtin("stockhom").unwrap().name, "Stockholm");
        assert_eq!(find_builtin("berlinn").unwrap().name, "Berlin");
    }

    #[test]
    fn test_builtin_not_found() {
        assert!(find_builtin("xyznonexistent").is_none());
        assert!(find_builtin("   ").is_none());
    }

    #[test]
    fn test_builtin_places_capitalized() {
        let places = builtin_places();
        assert_eq!(places.len(), BUILTIN_CITIES.len());
        assert!(places.iter().any(|p| p.name == "Kuala Lumpur"));
        assert!(places.iter().all(|p| p.latitude.is_some() && p.longitude.is_some()));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("stockholm", "stokholm"), 1);
        assert_eq!(edit_distance("mecca", "mekka"), 2);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
    }
}
