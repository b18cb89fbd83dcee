//! Integration tests for the filter engine's public contract.
//!
//! These follow the way a listing view uses filters: restore a filter string,
//! edit it in response to clicks, merge saved filters into it and send the
//! canonical string to the backend.

use gmp_filter::filter::{FilterParser, SINGLETON_KEYWORDS};
use gmp_filter::{CollectionCounts, Filter, Relation, SortOrder, TermValue};

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_of_typical_filters() {
    let inputs = [
        "name~scan and rows=10 first=1 sort=name",
        "apply_overrides=0 min_qod=70 first=1 rows=100 sort-reverse=severity",
        "severity>6.9 and not host~192.168 or tag:\"critical asset\"",
        "uuid=dc51a40a-c022-11e9-b02d-3f7ca5bdcb11 and active=1 and trust=1",
        "~web =\"exact name\" free text",
    ];

    for input in inputs {
        let filter = Filter::parse(input);
        let reparsed = Filter::parse(&filter.to_string());
        assert_eq!(reparsed.terms(), filter.terms(), "input: {input}");
        assert_eq!(reparsed, filter);
    }
}

#[test]
fn test_canonical_string_usable_as_key() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    assert!(seen.insert(Filter::parse("rows=10 name~x")));
    assert!(!seen.insert(Filter::parse("  rows>10   name~\"x\"")));
    assert!(seen.insert(Filter::parse("name~x rows=10")));
}

// ============================================================================
// Parsing properties
// ============================================================================

#[test]
fn test_singleton_collapsing() {
    let filter = Filter::parse("rows=5 rows=10");
    assert_eq!(filter.get("rows"), Some(&TermValue::Integer(10)));
    assert_eq!(
        filter.terms().iter().filter(|t| t.has_keyword("rows")).count(),
        1
    );
}

#[test]
fn test_every_singleton_keyword_collapses() {
    for keyword in SINGLETON_KEYWORDS {
        let filter = Filter::parse(&format!("{keyword}=3 name~x {keyword}=4"));
        assert_eq!(filter.get_terms(keyword).len(), 1, "keyword: {keyword}");
        assert_eq!(filter.terms().last().unwrap().keyword(), keyword);
    }
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_merge_with_paging_preservation() {
    let f1 = Filter::parse("rows=10 first=3 name~foo");
    let f2 = Filter::parse("rows=25 first=1 name~bar");

    let merged = f1.merge(&f2, true);
    assert_eq!(merged.rows(), Some(10));
    assert_eq!(merged.first(), 3);
    assert!(merged
        .get_terms("name")
        .iter()
        .any(|t| t.relation == Relation::Approx && t.value.as_text() == Some("bar")));
}

#[test]
fn test_sort_column_click_flow() {
    let filter = Filter::parse("name~scan rows=10 first=21 sort=name");

    let (field, order) = filter.sort().unwrap();
    assert_eq!((field, order), ("name", SortOrder::Ascending));

    // Clicking the same column again reverses the order and returns to page 1.
    let clicked = filter
        .with_sort("name", SortOrder::Descending)
        .first_page();
    assert_eq!(clicked.to_string(), "name~scan rows=10 first=1 sort-reverse=name");
}

#[test]
fn test_page_size_change_flow() {
    let filter = Filter::parse("rows=10 first=31");
    let resized = filter.set("rows", 50, None).first_page();
    assert_eq!(resized.to_string(), "rows=50 first=1");
}

#[test]
fn test_pagination_follows_counts() {
    let mut filter = Filter::parse("rows=10 first=1");
    let filtered = 37;
    let mut pages = 0;

    loop {
        let length = (filtered - (filter.first() - 1)).min(10) as u64;
        let counts = CollectionCounts::new(filter.first() as u64, 10, length, 37, 50);
        pages += 1;
        assert_eq!(counts.current_page(), pages);
        if !counts.has_more() {
            break;
        }
        filter = filter.next_page();
    }

    assert_eq!(pages, 4);
    assert_eq!(filter.first(), 31);
}

#[test]
fn test_filters_shared_across_threads() {
    let filter = Filter::parse("name~scan rows=10");
    let handles: Vec<_> = (1..=4)
        .map(|page| {
            let filter = filter.clone();
            std::thread::spawn(move || filter.set("first", page * 10 + 1, None).to_string())
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], "name~scan rows=10 first=11");
    assert_eq!(filter.to_string(), "name~scan rows=10");
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_diagnostics_are_opt_in() {
    let input = "rows=ten sort= nmae~scan";

    let filter = Filter::parse(input);
    assert_eq!(filter.to_string(), "rows=NaN nmae~scan");

    let codes: Vec<&str> = FilterParser::diagnose(input)
        .iter()
        .map(|e| e.code())
        .collect();
    assert_eq!(codes, vec!["MALFORMED_TERM", "INVALID_NUMERIC", "UNKNOWN_KEYWORD"]);

    assert!(FilterParser::parse_strict(input).is_err());
}
