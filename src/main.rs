use clap::Parser;
use georank::geo::{format_coords, GeoPoint};
use georank::places::{builtin_places, find_builtin, load_records, search, search_places, SearchPage};
use georank::query::RawSearchQuery;
use georank::ranker::{MissingCoordinates, RankOptions};
use georank::response::ApiResponse;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// georank — sort places by great-circle distance.
///
/// Ranks the built-in world cities, or the records of a JSON file, by
/// distance from a reference point.
///
/// Examples:
///   georank 59.3293,18.0686
///   georank --near Stockholm --per-page 5
///   georank --location "40.7128,-74.0060" --input shops.json --missing last
///   georank --search o --order asc --order-by name
#[derive(Parser)]
#[command(name = "georank", version, about, long_about = None)]
struct Cli {
    /// Reference point as "latitude,longitude" (positional).
    #[arg(index = 1, allow_hyphen_values = true)]
    location_positional: Option<String>,

    /// Reference point as "latitude,longitude".
    #[arg(long, short = 'l', allow_hyphen_values = true)]
    location: Option<String>,

    /// Use a built-in city as the reference point. Example: --near Oslo
    #[arg(long)]
    near: Option<String>,

    /// JSON file with an array of records carrying optional
    /// "latitude"/"longitude". Defaults to the built-in cities.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Case-insensitive filter on the name (or, for --input records, the
    /// "name"/"title" member).
    #[arg(long, short = 's')]
    search: Option<String>,

    /// Page number, starting at 1.
    #[arg(long, short = 'p')]
    page: Option<String>,

    /// Results per page (1-100).
    #[arg(long)]
    per_page: Option<String>,

    /// Sort direction when no reference point is given: "asc" or "desc".
    #[arg(long)]
    order: Option<String>,

    /// Sort field when no reference point is given. Built-in cities: createdAt,
    /// name, country. --input records: createdAt or any member they carry.
    #[arg(long)]
    order_by: Option<String>,

    /// Records without coordinates: "origin" (treat as 0,0), "exclude", "last".
    #[arg(long, default_value = "origin")]
    missing: MissingCoordinates,

    /// Skip the table on stderr.
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // ── Validate query ──────────────────────────────────────────

    let raw = RawSearchQuery {
        per_page: cli.per_page.clone(),
        page: cli.page.clone(),
        search: cli.search.clone(),
        order: cli.order.clone(),
        order_by: cli.order_by.clone(),
        location: cli.location.clone().or_else(|| cli.location_positional.clone()),
    };

    let mut query = raw.validate().unwrap_or_else(|e| {
        fail(ApiResponse::from_error(&e));
    });

    if let Some(ref near) = cli.near {
        if query.location.is_some() {
            fail(ApiResponse::new(400, "Use either a location or --near, not both"));
        }
        let place = find_builtin(near).unwrap_or_else(|| {
            fail(ApiResponse::new(404, format!("Unknown city '{}'", near)));
        });
        query.location = place.point();
        if !cli.quiet {
            eprintln!("  \u{1F4CD} {}", place.display_line());
        }
    }

    let opts = RankOptions::default().with_missing(cli.missing);

    // ── Rank ────────────────────────────────────────────────────

    match cli.input {
        Some(ref path) => {
            let records = load_records(path).unwrap_or_else(|e| {
                fail(ApiResponse::new(400, e.to_string()));
            });
            let page = search(&records, &query, &opts).unwrap_or_else(|e| {
                fail(ApiResponse::from_error(&e));
            });
            if !cli.quiet {
                eprint!("{}", render_table(&page, query.location, record_label));
            }
            print_json(&ApiResponse::ok(page));
        }
        None => {
            let places = builtin_places();
            let page = search_places(&places, &query, &opts).unwrap_or_else(|e| {
                fail(ApiResponse::from_error(&e));
            });
            if !cli.quiet {
                eprint!("{}", render_table(&page, query.location, |p| p.display_line()));
            }
            print_json(&ApiResponse::ok(page));
        }
    }
}

fn record_label(record: &Value) -> String {
    ["name", "title", "id"]
        .iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "(unnamed)".to_string())
}

fn render_table<T>(page: &SearchPage<T>, origin: Option<GeoPoint>, label: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    match origin {
        Some(p) => out.push_str(&format!("  Nearest to {}\n", format_coords(&p))),
        None => out.push_str("  No reference point; listing in requested order\n"),
    }
    out.push_str(&format!(
        "  Page {} \u{00B7} {} of {} result(s)\n",
        page.page,
        page.items.len(),
        page.total
    ));

    let first = (page.page as usize - 1) * page.per_page as usize + 1;
    for (i, hit) in page.items.iter().enumerate() {
        let distance = match hit.distance {
            Some(d) if d.is_finite() => format!("{:>9.1} km", d),
            Some(_) => format!("{:>12}", "?"),
            None => String::new(),
        };
        out.push_str(&format!("  {:>3}. {} {}\n", first + i, distance, label(&hit.entity)));
    }
    out
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize response: {}", e);
            std::process::exit(1);
        }
    }
}

fn fail(resp: ApiResponse<()>) -> ! {
    eprintln!("Error: {}", resp.message);
    print_json(&resp);
    std::process::exit(1);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use georank::query::{parse_location, SearchQuery};
    use serde_json::json;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["georank", "-33.86,151.2", "--missing", "last", "--per-page", "5"]).unwrap();
        assert_eq!(cli.location_positional.as_deref(), Some("-33.86,151.2"));
        assert_eq!(cli.missing, MissingCoordinates::Last);
        assert_eq!(cli.per_page.as_deref(), Some("5"));
        assert!(parse_location(cli.location_positional.as_deref().unwrap()).is_ok());
    }

    #[test]
    fn test_cli_order_flags_apply_to_input_records() {
        let cli = Cli::try_parse_from(["georank", "--input", "r.json", "--order-by", "population", "--search", "zzz"]).unwrap();
        let raw = RawSearchQuery {
            search: cli.search.clone(),
            order_by: cli.order_by.clone(),
            ..RawSearchQuery::default()
        };
        let query = raw.validate().unwrap();
        let records = vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})];
        let err = search(&records, &query, &RankOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot order by 'population'");
    }

    #[test]
    fn test_input_records_default_desc() {
        let records = vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})];
        let query = RawSearchQuery::default().validate().unwrap();
        let page = search(&records, &query, &RankOptions::default()).unwrap();
        let labels: Vec<String> = page.items.iter().map(|h| record_label(&h.entity)).collect();
        assert_eq!(labels, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_input_records_ranked_and_paginated() {
        let records = vec![
            json!({"name": "far", "latitude": 50.0, "longitude": 50.0}),
            json!({"name": "near", "latitude": 1.0, "longitude": 1.0}),
            json!({"name": "nowhere"}),
        ];
        let query = RawSearchQuery {
            per_page: Some("2".into()),
            location: Some("2,2".into()),
            ..RawSearchQuery::default()
        };
        let query = query.validate().unwrap();
        let opts = RankOptions::default().with_missing(MissingCoordinates::Last);
        let page = search(&records, &query, &opts).unwrap();
        assert_eq!(page.total, 3);
        let labels: Vec<String> = page.items.iter().map(|h| record_label(&h.entity)).collect();
        assert_eq!(labels, vec!["near", "far"]);
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label(&json!({"id": 4})), "4");
        assert_eq!(record_label(&json!({"title": "T", "id": 4})), "T");
        assert_eq!(record_label(&json!({})), "(unnamed)");
    }

    #[test]
    fn test_render_table() {
        let places = builtin_places();
        let query = SearchQuery {
            per_page: 2,
            location: Some(GeoPoint::new(59.3293, 18.0686)),
            ..SearchQuery::default()
        };
        let page = search_places(&places, &query, &RankOptions::default()).unwrap();
        let table = render_table(&page, query.location, |p| p.name.clone());
        assert!(table.contains("1.       0.0 km Stockholm"));
        assert!(table.contains("2."));
        assert!(table.contains("Oslo"));
    }
}
