//! Merging one filter into another.
//!
//! Used when a saved filter or a user edit is applied on top of the filter a
//! view is currently showing.

use super::keywords::{is_singleton, PAGING_KEYWORDS};
use super::model::{replace_or_push, Filter};

impl Filter {
    /// Returns a filter combining `self` with `other`.
    ///
    /// - singleton keywords from `other` replace the receiver's term in place
    ///   (or are appended when the receiver has none)
    /// - every other term of `other` is appended, duplicates included
    /// - with `keep_own_paging`, the receiver's `first` and `rows` survive even
    ///   if `other` sets them; `other`'s paging is only taken for keywords the
    ///   receiver does not set
    ///
    /// # Example
    ///
    /// ```
    /// use gmp_filter::filter::Filter;
    ///
    /// let current = Filter::parse("rows=10 first=3 name~foo");
    /// let saved = Filter::parse("rows=25 first=1 name~bar");
    ///
    /// let merged = current.merge(&saved, true);
    /// assert_eq!(merged.to_string(), "rows=10 first=3 name~foo name~bar");
    ///
    /// let merged = current.merge(&saved, false);
    /// assert_eq!(merged.to_string(), "rows=25 first=1 name~foo name~bar");
    /// ```
    pub fn merge(&self, other: &Filter, keep_own_paging: bool) -> Filter {
        let mut terms = self.terms().to_vec();

        for term in other.terms() {
            match term.keyword.as_deref() {
                Some(keyword) if keep_own_paging && PAGING_KEYWORDS.contains(&keyword) => {
                    if !self.has(keyword) {
                        terms.push(term.clone());
                    }
                }
                Some(keyword) if is_singleton(keyword) => {
                    replace_or_push(&mut terms, term.clone());
                }
                _ => terms.push(term.clone()),
            }
        }

        Filter::from_terms(terms)
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::{Filter, TermValue};

    #[test]
    fn test_merge_keeps_own_paging() {
        let f1 = Filter::parse("rows=10 first=3 name~foo");
        let f2 = Filter::parse("rows=25 first=1 name~bar");

        let merged = f1.merge(&f2, true);
        assert_eq!(merged.rows(), Some(10));
        assert_eq!(merged.first(), 3);
        assert_eq!(merged.get("name"), Some(&TermValue::Text("bar".to_string())));
    }

    #[test]
    fn test_merge_takes_other_paging() {
        let f1 = Filter::parse("rows=10 first=3 name~foo");
        let f2 = Filter::parse("rows=25 first=1 name~bar");

        let merged = f1.merge(&f2, false);
        assert_eq!(merged.rows(), Some(25));
        assert_eq!(merged.first(), 1);
    }

    #[test]
    fn test_merge_keep_paging_fills_missing_paging() {
        let f1 = Filter::parse("name~foo");
        let f2 = Filter::parse("rows=25 first=51");

        let merged = f1.merge(&f2, true);
        assert_eq!(merged.to_string(), "name~foo rows=25 first=51");
    }

    #[test]
    fn test_merge_replaces_singletons_in_place() {
        let f1 = Filter::parse("sort=name min_qod=70 owner=admin");
        let f2 = Filter::parse("min_qod=30 sort=severity");

        let merged = f1.merge(&f2, true);
        assert_eq!(merged.to_string(), "sort=severity min_qod=30 owner=admin");
    }

    #[test]
    fn test_merge_concatenates_combinators_and_free_text() {
        let f1 = Filter::parse("a=1 and b=2");
        let f2 = Filter::parse("or scan");

        let merged = f1.merge(&f2, false);
        assert_eq!(merged.to_string(), "a=1 and b=2 or scan");
    }

    #[test]
    fn test_merge_does_not_deduplicate() {
        let f1 = Filter::parse("owner=admin");
        let merged = f1.merge(&f1, false);
        assert_eq!(merged.to_string(), "owner=admin owner=admin");
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let f1 = Filter::parse("rows=10");
        let f2 = Filter::parse("rows=20");
        let _ = f1.merge(&f2, false);
        assert_eq!(f1.rows(), Some(10));
        assert_eq!(f2.rows(), Some(20));
    }

    #[test]
    fn test_merge_with_empty() {
        let f1 = Filter::parse("name~foo rows=10");
        assert_eq!(f1.merge(&Filter::new(), true), f1);
        assert_eq!(Filter::new().merge(&f1, true), f1);
    }
}
