//! Keyword tables.

use strsim::levenshtein;

/// Keywords a filter holds at most one term for. Setting one replaces the
/// previous term instead of appending.
pub const SINGLETON_KEYWORDS: [&str; 6] =
    ["first", "rows", "sort", "sort-reverse", "min_qod", "autofp"];

/// Keywords controlling paging.
pub(crate) const PAGING_KEYWORDS: [&str; 2] = ["first", "rows"];

/// Keywords controlling sort order.
pub(crate) const SORT_KEYWORDS: [&str; 2] = ["sort", "sort-reverse"];

/// Keywords understood by the backend across entity types.
const KNOWN_KEYWORDS: &[&str] = &[
    "active",
    "apply_overrides",
    "autofp",
    "comment",
    "created",
    "cve",
    "delta_states",
    "first",
    "host",
    "hostname",
    "ip",
    "last",
    "levels",
    "location",
    "min_qod",
    "modified",
    "name",
    "notes",
    "nvt",
    "os",
    "overrides",
    "owner",
    "port",
    "qod",
    "report",
    "result_hosts_only",
    "rows",
    "severity",
    "sort",
    "sort-reverse",
    "status",
    "tag",
    "task",
    "timezone",
    "trend",
    "trust",
    "type",
    "uuid",
    "vulnerability",
];

/// Maximum Levenshtein distance to consider a keyword as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Returns true if `keyword` holds at most one term per filter.
pub fn is_singleton(keyword: &str) -> bool {
    SINGLETON_KEYWORDS.contains(&keyword)
}

/// Returns true if `keyword` is known to the backend.
pub fn is_known_keyword(keyword: &str) -> bool {
    KNOWN_KEYWORDS.contains(&keyword)
}

/// Finds the closest known keyword for a misspelled one.
///
/// Returns `None` for known keywords and when nothing is close enough.
///
/// # Example
///
/// ```
/// use gmp_filter::filter::suggest_keyword;
///
/// assert_eq!(suggest_keyword("sevrity"), Some("severity"));
/// assert_eq!(suggest_keyword("name"), None);
/// assert_eq!(suggest_keyword("xyzzy"), None);
/// ```
pub fn suggest_keyword(keyword: &str) -> Option<&'static str> {
    let lower = keyword.to_lowercase();

    let (best_match, best_distance) = KNOWN_KEYWORDS
        .iter()
        .map(|known| (*known, levenshtein(&lower, known)))
        .min_by_key(|(_, distance)| *distance)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else if best_distance == 0 && lower != keyword {
        // Keywords are case sensitive; "Name" should become "name".
        Some(best_match)
    } else {
        None
    }
}
