//! Paging counts reported with a filtered listing.
//!
//! A listing response carries five numbers: the offset of the returned page,
//! the requested page size, how many entities were returned, how many match
//! the filter and how many exist at all. [`CollectionCounts`] holds them and
//! derives what pagination controls need.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw count fields as extracted from a response, before parsing.
///
/// Every field is optional and may be a string or a number.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCounts {
    /// Offset of the returned page.
    #[serde(default)]
    pub first: Option<Value>,
    /// Requested page size.
    #[serde(default)]
    pub rows: Option<Value>,
    /// Number of entities returned.
    #[serde(default)]
    pub length: Option<Value>,
    /// Number of entities matching the filter, ignoring paging.
    #[serde(default)]
    pub filtered: Option<Value>,
    /// Number of entities ignoring the filter.
    #[serde(default)]
    pub all: Option<Value>,
}

/// Paging summary of a filtered listing.
///
/// Created once per response and never changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CollectionCounts {
    /// 1-based offset of the returned page. Meaningless when `length` is 0.
    pub first: u64,
    /// Requested page size.
    pub rows: u64,
    /// Number of entities on this page.
    pub length: u64,
    /// Number of entities matching the filter.
    pub filtered: u64,
    /// Number of entities of this type.
    pub all: u64,
}

/// Parses a count: non-negative integers as numbers or strings, else 0.
fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl CollectionCounts {
    /// Creates counts from already parsed numbers.
    pub fn new(first: u64, rows: u64, length: u64, filtered: u64, all: u64) -> Self {
        Self {
            first,
            rows,
            length,
            filtered,
            all,
        }
    }

    /// Parses raw count fields. Absent or unparsable fields are 0.
    pub fn from_raw(raw: &RawCounts) -> Self {
        let counts = Self::new(
            parse_count(raw.first.as_ref()),
            parse_count(raw.rows.as_ref()),
            parse_count(raw.length.as_ref()),
            parse_count(raw.filtered.as_ref()),
            parse_count(raw.all.as_ref()),
        );

        if counts.rows > 0 && counts.length > counts.rows {
            tracing::debug!(?counts, "page is longer than the page size");
        }
        if counts.filtered > counts.all {
            tracing::debug!(?counts, "more filtered entities than entities");
        }

        counts
    }

    /// Extracts counts from a listing response envelope.
    ///
    /// For entity `name` the envelope holds the page bounds in
    /// `<name>s._start` / `<name>s._max` and the counts in
    /// `<name>_count.page`, `<name>_count.filtered` and
    /// `<name>_count.__text`. Missing parts count as 0.
    ///
    /// # Example
    ///
    /// ```
    /// use gmp_filter::CollectionCounts;
    /// use serde_json::json;
    ///
    /// let response = json!({
    ///     "tasks": {"_start": "11", "_max": "10"},
    ///     "task_count": {"page": "10", "filtered": "37", "__text": "50"},
    /// });
    /// let counts = CollectionCounts::from_response(&response, "task");
    /// assert_eq!(counts, CollectionCounts::new(11, 10, 10, 37, 50));
    /// ```
    pub fn from_response(response: &Value, name: &str) -> Self {
        let entities = response.get(format!("{name}s"));
        let count = response.get(format!("{name}_count"));

        let raw = RawCounts {
            first: entities.and_then(|e| e.get("_start")).cloned(),
            rows: entities.and_then(|e| e.get("_max")).cloned(),
            length: count.and_then(|c| c.get("page")).cloned(),
            filtered: count.and_then(|c| c.get("filtered")).cloned(),
            all: count.and_then(|c| c.get("__text")).cloned(),
        };

        Self::from_raw(&raw)
    }

    /// Returns true if more matching entities follow this page.
    pub fn has_more(&self) -> bool {
        self.first.saturating_add(self.length) < self.filtered
    }

    /// Returns the number of pages for the filtered entities (1 without a
    /// page size).
    pub fn page_count(&self) -> u64 {
        if self.rows == 0 {
            return 1;
        }
        self.filtered.div_ceil(self.rows)
    }

    /// Returns the 1-based position of the last entity on this page (0 when
    /// the page is empty).
    pub fn last(&self) -> u64 {
        if self.length == 0 {
            return 0;
        }
        self.first.saturating_add(self.length - 1)
    }

    /// Returns the 1-based number of this page (1 without a page size).
    pub fn current_page(&self) -> u64 {
        if self.rows == 0 {
            return 1;
        }
        self.first.saturating_sub(1) / self.rows + 1
    }

    /// Returns true if this is the first page.
    pub fn is_first_page(&self) -> bool {
        self.first <= 1
    }

    /// Returns true if no page follows this one.
    pub fn is_last_page(&self) -> bool {
        !self.has_more()
    }
}
