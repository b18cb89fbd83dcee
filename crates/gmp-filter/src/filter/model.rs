//! The filter aggregate.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::keywords::{is_singleton, PAGING_KEYWORDS, SORT_KEYWORDS};
use super::parser::FilterParser;
use super::term::{Relation, Term, TermValue};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// `sort=field`
    Ascending,
    /// `sort-reverse=field`
    Descending,
}

impl SortOrder {
    /// Returns the keyword carrying this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "sort",
            SortOrder::Descending => "sort-reverse",
        }
    }
}

/// An ordered list of normalized terms.
///
/// A `Filter` is a value: every operation that changes it returns a new
/// filter and leaves the receiver untouched, so a filter can be shared by
/// many readers without coordination.
///
/// Term order is significant. It decides the order of the rendered string
/// and, for sort terms, the sort priority. Singleton keywords (see
/// [`SINGLETON_KEYWORDS`](super::SINGLETON_KEYWORDS)) appear at most once.
///
/// Two filters are equal when their canonical strings are equal.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<Term>,
}

/// Replaces the term with the same keyword, or appends.
pub(super) fn replace_or_push(terms: &mut Vec<Term>, term: Term) {
    let existing = terms
        .iter()
        .position(|t| t.keyword.is_some() && t.keyword == term.keyword);
    match existing {
        Some(index) => terms[index] = term,
        None => terms.push(term),
    }
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a filter string. Never fails; see [`FilterParser`].
    pub fn parse(input: &str) -> Self {
        FilterParser::parse(input)
    }

    /// Builds a filter from terms, keeping the last term of every singleton
    /// keyword.
    ///
    /// # Example
    ///
    /// ```
    /// use gmp_filter::filter::{Filter, Term};
    ///
    /// let filter = Filter::from_terms([
    ///     Term::new("rows", "5", "="),
    ///     Term::new("name", "scan", "~"),
    ///     Term::new("rows", "10", "="),
    /// ]);
    /// assert_eq!(filter.to_string(), "name~scan rows=10");
    /// ```
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut collected: Vec<Term> = Vec::new();
        for term in terms {
            if let Some(keyword) = term.keyword.as_deref().filter(|k| is_singleton(k)) {
                collected.retain(|t| !t.has_keyword(keyword));
            }
            collected.push(term);
        }
        Self { terms: collected }
    }

    /// A filter listing every entity on one page: `first=1 rows=-1`.
    pub fn all_entities() -> Self {
        Self::from_terms([Term::new("first", "1", "="), Term::new("rows", "-1", "=")])
    }

    /// A filter that only resets paging: `first=1`.
    pub fn reset() -> Self {
        Self::from_terms([Term::new("first", "1", "=")])
    }

    /// Returns the terms in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the filter has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if any term has the given keyword.
    pub fn has(&self, keyword: &str) -> bool {
        self.terms.iter().any(|t| t.has_keyword(keyword))
    }

    /// Returns the effective term for a keyword (the last one).
    pub fn get_term(&self, keyword: &str) -> Option<&Term> {
        self.terms.iter().rev().find(|t| t.has_keyword(keyword))
    }

    /// Returns the effective value for a keyword.
    pub fn get(&self, keyword: &str) -> Option<&TermValue> {
        self.get_term(keyword).map(|t| &t.value)
    }

    /// Returns every term with the given keyword, in order.
    pub fn get_terms(&self, keyword: &str) -> Vec<&Term> {
        self.terms.iter().filter(|t| t.has_keyword(keyword)).collect()
    }

    /// Returns a filter with `keyword` set to `value`.
    ///
    /// The value goes through the converter. Singleton keywords replace their
    /// existing term in place; other keywords are appended. `relation`
    /// defaults to [`Relation::Equal`].
    ///
    /// # Example
    ///
    /// ```
    /// use gmp_filter::filter::{Filter, Relation};
    ///
    /// let filter = Filter::parse("rows=10 first=21 name~scan");
    /// let filter = filter.set("rows", 50, None).set("severity", "5", Some(Relation::Above));
    /// assert_eq!(filter.to_string(), "rows=50 first=21 name~scan severity>5");
    /// ```
    pub fn set(&self, keyword: &str, value: impl ToString, relation: Option<Relation>) -> Self {
        let relation = relation.unwrap_or(Relation::Equal);
        let term = Term::new(keyword, &value.to_string(), relation.symbol());
        self.with_term(term)
    }

    /// Returns a filter with `term` added, replacing a singleton keyword's
    /// existing term.
    pub fn with_term(&self, term: Term) -> Self {
        let mut terms = self.terms.clone();
        match term.keyword.as_deref() {
            Some(keyword) if is_singleton(keyword) => replace_or_push(&mut terms, term),
            _ => terms.push(term),
        }
        Self { terms }
    }

    /// Returns a filter without any term for `keyword`.
    ///
    /// Only keyword terms match, so bare words and combinators are kept
    /// even for an empty `keyword`.
    pub fn remove(&self, keyword: &str) -> Self {
        self.without(&[keyword])
    }

    fn without(&self, keywords: &[&str]) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|t| !t.keyword.as_deref().is_some_and(|k| keywords.contains(&k)))
            .cloned()
            .collect();
        Self { terms }
    }

    // ==================== Paging ====================

    /// Returns the 1-based offset of the page (1 when unset).
    pub fn first(&self) -> i64 {
        self.get("first").and_then(TermValue::as_integer).unwrap_or(1)
    }

    /// Returns the page size, if set to a number.
    pub fn rows(&self) -> Option<i64> {
        self.get("rows").and_then(TermValue::as_integer)
    }

    /// Returns a filter pointing at the first page.
    pub fn first_page(&self) -> Self {
        self.set("first", 1, None)
    }

    /// Returns a filter pointing at the next page.
    ///
    /// Unchanged when there is no positive page size.
    pub fn next_page(&self) -> Self {
        match self.rows() {
            Some(rows) if rows > 0 => self.set("first", self.first().saturating_add(rows), None),
            _ => self.clone(),
        }
    }

    /// Returns a filter pointing at the previous page, never before the
    /// first one.
    pub fn previous_page(&self) -> Self {
        match self.rows() {
            Some(rows) if rows > 0 => self.set("first", (self.first() - rows).max(1), None),
            _ => self.clone(),
        }
    }

    /// Returns a filter listing all entities on a single page.
    pub fn all(&self) -> Self {
        self.set("first", 1, None).set("rows", -1, None)
    }

    // ==================== Sorting ====================

    /// Returns the sort field and direction of the latest sort term.
    pub fn sort(&self) -> Option<(&str, SortOrder)> {
        self.terms.iter().rev().find_map(|t| {
            let order = match t.keyword.as_deref()? {
                "sort" => SortOrder::Ascending,
                "sort-reverse" => SortOrder::Descending,
                _ => return None,
            };
            Some((t.value.as_text()?, order))
        })
    }

    /// Returns a filter sorted by `field`, replacing any previous sort term.
    pub fn with_sort(&self, field: &str, order: SortOrder) -> Self {
        let term = Term::new(order.keyword(), field, "=");
        let mut terms = Vec::with_capacity(self.terms.len() + 1);
        let mut placed = false;
        for t in &self.terms {
            if SORT_KEYWORDS.contains(&t.keyword()) {
                if !placed {
                    terms.push(term.clone());
                    placed = true;
                }
            } else {
                terms.push(t.clone());
            }
        }
        if !placed {
            terms.push(term);
        }
        Self { terms }
    }

    // ==================== Flags ====================

    /// Returns the minimum quality of detection, if set to a number.
    pub fn min_qod(&self) -> Option<i64> {
        self.get("min_qod").and_then(TermValue::as_integer)
    }

    /// Returns true if overrides are applied.
    pub fn apply_overrides(&self) -> bool {
        self.get("apply_overrides") == Some(&TermValue::Integer(1))
    }

    // ==================== Criteria ====================

    /// Returns the filter without paging and sort terms.
    ///
    /// Two filters selecting the same entities have equal criteria, whatever
    /// page they show.
    pub fn criteria(&self) -> Self {
        let mut keywords: Vec<&str> = PAGING_KEYWORDS.to_vec();
        keywords.extend(SORT_KEYWORDS);
        self.without(&keywords)
    }

    /// Returns the canonical string of [`criteria`](Filter::criteria).
    pub fn criteria_string(&self) -> String {
        self.criteria().to_string()
    }
}

impl fmt::Display for Filter {
    /// Writes the canonical string: terms in order, separated by one space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl FromIterator<Term> for Filter {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
