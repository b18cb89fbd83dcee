//! Integration tests for reading collection counts out of listing responses.

use gmp_filter::{CollectionCounts, Filter, RawCounts};
use serde_json::json;

fn listing_response() -> serde_json::Value {
    json!({
        "_status": "200",
        "filters": {
            "_id": "",
            "term": "name~scan rows=10 first=11 sort=name",
        },
        "tasks": {"_start": "11", "_max": "10"},
        "task_count": {"page": "10", "filtered": "37", "__text": "50"},
        "task": [],
    })
}

#[test]
fn test_counts_from_listing_response() {
    let counts = CollectionCounts::from_response(&listing_response(), "task");

    assert_eq!(counts.first, 11);
    assert_eq!(counts.rows, 10);
    assert_eq!(counts.length, 10);
    assert_eq!(counts.filtered, 37);
    assert_eq!(counts.all, 50);
    assert!(counts.has_more());
    assert_eq!(counts.page_count(), 4);
}

#[test]
fn test_counts_and_filter_from_same_response() {
    let response = listing_response();
    let term = response["filters"]["term"].as_str().unwrap();

    let filter = Filter::parse(term);
    let counts = CollectionCounts::from_response(&response, "task");

    assert_eq!(filter.first() as u64, counts.first);
    assert_eq!(filter.rows().map(|r| r as u64), Some(counts.rows));
}

#[test]
fn test_counts_for_wrong_entity_name_are_zero() {
    let counts = CollectionCounts::from_response(&listing_response(), "report");
    assert_eq!(counts, CollectionCounts::default());
    assert_eq!(counts.page_count(), 1);
}

#[test]
fn test_raw_counts_from_partial_json() {
    let raw: RawCounts = serde_json::from_str(r#"{"first": 1, "length": "4"}"#).unwrap();
    let counts = CollectionCounts::from_raw(&raw);
    assert_eq!(counts, CollectionCounts::new(1, 0, 4, 0, 0));
}
