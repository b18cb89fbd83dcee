//! Parser turning filter strings into terms.

use super::convert::{convert, is_integer_keyword, parse_int};
use super::error::{FilterError, FilterResult};
use super::keywords::{is_known_keyword, suggest_keyword};
use super::lexer::{Lexer, PositionedTerm};
use super::model::Filter;
use super::term::{Term, TermValue};
use super::xml;

/// Parser for GMP filter expressions.
///
/// The language is a flat list of terms, so parsing is a single pass: the
/// lexer splits the input into raw `(keyword, relation, value)` triples and
/// every triple is run through the value converter.
///
/// # Grammar
///
/// ```text
/// filter   ::= term*
/// term     ::= keyword relation value | relation value | value
/// relation ::= "=" | "~" | ">" | "<" | ":"
/// value    ::= quoted | word
/// quoted   ::= '"' ( '\"' | '\\' | any )* '"'
/// ```
///
/// `and`, `or` and `not` are values like any other; the converter turns
/// them into combinator terms. There is no grouping.
///
/// # Example
///
/// ```
/// use gmp_filter::filter::FilterParser;
///
/// let filter = FilterParser::parse("a=1 and b=2");
/// assert_eq!(filter.len(), 3);
/// assert!(filter.terms()[1].is_combinator());
///
/// // Broken input still yields a filter...
/// let filter = FilterParser::parse("name~scan sort=");
/// assert_eq!(filter.to_string(), "name~scan");
///
/// // ...but strict parsing reports what was dropped.
/// assert!(FilterParser::parse_strict("name~scan sort=").is_err());
/// ```
pub struct FilterParser;

impl FilterParser {
    /// Parses a filter expression. Never fails.
    ///
    /// Singleton keywords (`first`, `rows`, `sort`, ...) keep their last
    /// occurrence.
    pub fn parse(input: &str) -> Filter {
        Filter::from_terms(Self::parse_terms(input))
    }

    /// Parses a filter expression into its terms, in input order, without
    /// collapsing singleton keywords.
    pub fn parse_terms(input: &str) -> Vec<Term> {
        Lexer::new(input)
            .tokenize_with_errors()
            .terms
            .iter()
            .map(convert_raw)
            .collect()
    }

    /// Parses a filter expression, failing on the first problem that changes
    /// its meaning.
    ///
    /// # Errors
    ///
    /// Returns the first degrading [`FilterError`] found by [`diagnose`].
    /// Unknown keywords are not errors.
    ///
    /// [`diagnose`]: FilterParser::diagnose
    pub fn parse_strict(input: &str) -> FilterResult<Filter> {
        if let Some(error) = Self::diagnose(input)
            .into_iter()
            .find(FilterError::is_degrading)
        {
            return Err(error);
        }
        Ok(Self::parse(input))
    }

    /// Reports every problem in a filter expression.
    ///
    /// This is a separate validation pass; [`parse`](FilterParser::parse)
    /// silently degrades instead.
    pub fn diagnose(input: &str) -> Vec<FilterError> {
        let result = Lexer::new(input).tokenize_with_errors();
        let mut problems = result.errors;

        for positioned in &result.terms {
            let raw = &positioned.term;
            if raw.keyword.is_empty() {
                continue;
            }

            if is_integer_keyword(&raw.keyword)
                && parse_int(&xml::decode(&raw.value)) == TermValue::NotANumber
            {
                problems.push(FilterError::invalid_numeric(&raw.keyword, &raw.value));
            }

            if !is_known_keyword(&raw.keyword) {
                let suggestion = suggest_keyword(&raw.keyword).map(str::to_string);
                problems.push(FilterError::unknown_keyword(&raw.keyword, suggestion));
            }
        }

        problems
    }
}

fn convert_raw(positioned: &PositionedTerm) -> Term {
    let raw = &positioned.term;
    let term = convert(&raw.keyword, &raw.value, &raw.relation);
    if raw.quoted && term.is_combinator() {
        // Quoting does not protect and/or/not from being combinators.
        tracing::debug!(
            value = %term.value,
            position = positioned.position,
            "quoted value read as combinator"
        );
    }
    term
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms_keeps_duplicates() {
        let terms = FilterParser::parse_terms("rows=5 rows=10");
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_diagnose_clean_filter() {
        assert!(FilterParser::diagnose("name~scan and rows=10 first=1 sort=name").is_empty());
    }

    #[test]
    fn test_diagnose_invalid_numeric() {
        assert_eq!(
            FilterParser::diagnose("rows=ten"),
            vec![FilterError::invalid_numeric("rows", "ten")]
        );
    }

    #[test]
    fn test_diagnose_accepts_clamped_first() {
        // Clamping is not a parse failure.
        assert!(FilterParser::diagnose("first=-3").is_empty());
    }

    #[test]
    fn test_diagnose_unknown_keyword() {
        assert_eq!(
            FilterParser::diagnose("nmae~scan"),
            vec![FilterError::unknown_keyword("nmae", Some("name".to_string()))]
        );
    }

    #[test]
    fn test_diagnose_collects_lexer_errors() {
        let problems = FilterParser::diagnose("sort= severity>=5");
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].code(), "MALFORMED_TERM");
        assert_eq!(problems[1].code(), "UNKNOWN_RELATION");
    }

    #[test]
    fn test_parse_strict_ok() {
        let filter = FilterParser::parse_strict("name~scan rows=10").unwrap();
        assert_eq!(filter.rows(), Some(10));
    }

    #[test]
    fn test_parse_strict_ignores_unknown_keyword() {
        assert!(FilterParser::parse_strict("vendor=acme").is_ok());
    }

    #[test]
    fn test_parse_strict_rejects_degraded() {
        assert_eq!(
            FilterParser::parse_strict("min_qod=high"),
            Err(FilterError::invalid_numeric("min_qod", "high"))
        );
    }
}
