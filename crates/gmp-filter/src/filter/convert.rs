//! Conversion of raw `(keyword, value, relation)` text into normalized terms.
//!
//! Dispatch order, first match wins:
//!
//! 1. a rule indexed by keyword ([`KEYWORD_CONVERTERS`])
//! 2. a rule indexed by value ([`VALUE_CONVERTERS`])
//! 3. the generic rule
//!
//! Conversion never fails. Garbage degrades to safe defaults.

use super::term::{Relation, Term, TermValue};
use super::xml;

type Converter = fn(&str, &str, &str) -> Term;

/// Keyword-indexed rules.
const KEYWORD_CONVERTERS: &[(&str, Converter)] = &[
    ("apply_overrides", convert_boolean_int),
    ("autofp", convert_int),
    ("first", convert_first),
    ("min_qod", convert_int),
    ("notes", convert_boolean_int),
    ("overrides", convert_boolean_int),
    ("result_hosts_only", convert_boolean_int),
    ("rows", convert_rows),
];

/// Value-indexed rules, consulted when no keyword rule matched.
const VALUE_CONVERTERS: &[(&str, Converter)] = &[
    ("and", convert_no_relation_and_keyword),
    ("or", convert_no_relation_and_keyword),
    ("not", convert_no_relation_and_keyword),
    ("re", convert_no_relation),
    ("regexp", convert_no_relation),
    ("", convert_no_relation),
];

/// Parses an integer the way the backend does.
///
/// Accepts surrounding whitespace, an optional sign and decimal digits,
/// optionally followed by a fractional part that is truncated. Everything
/// else is [`TermValue::NotANumber`].
///
/// # Example
///
/// ```
/// use gmp_filter::filter::{parse_int, TermValue};
///
/// assert_eq!(parse_int("42"), TermValue::Integer(42));
/// assert_eq!(parse_int(" -3 "), TermValue::Integer(-3));
/// assert_eq!(parse_int("5.9"), TermValue::Integer(5));
/// assert_eq!(parse_int("5abc"), TermValue::NotANumber);
/// ```
pub fn parse_int(value: &str) -> TermValue {
    let trimmed = value.trim();
    let (integral, fraction) = match trimmed.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (trimmed, None),
    };

    let digits = integral.strip_prefix(['+', '-']).unwrap_or(integral);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return TermValue::NotANumber;
    }
    if fraction.is_some_and(|f| !f.bytes().all(|b| b.is_ascii_digit())) {
        return TermValue::NotANumber;
    }

    integral
        .parse::<i64>()
        .map(TermValue::Integer)
        .unwrap_or(TermValue::NotANumber)
}

fn keyword_of(keyword: &str) -> Option<String> {
    (!keyword.is_empty()).then(|| keyword.to_string())
}

fn convert_boolean_int(keyword: &str, value: &str, relation: &str) -> Term {
    let flag = match parse_int(value) {
        TermValue::Integer(n) if n >= 1 => 1,
        _ => 0,
    };
    Term {
        keyword: keyword_of(keyword),
        relation: Relation::from_symbol(relation),
        value: TermValue::Integer(flag),
    }
}

fn convert_int(keyword: &str, value: &str, relation: &str) -> Term {
    Term {
        keyword: keyword_of(keyword),
        relation: Relation::from_symbol(relation),
        value: parse_int(value),
    }
}

fn convert_first(keyword: &str, value: &str, _relation: &str) -> Term {
    let first = match parse_int(value) {
        TermValue::Integer(n) if n > 0 => n,
        _ => 1,
    };
    Term {
        keyword: keyword_of(keyword),
        relation: Relation::Equal,
        value: TermValue::Integer(first),
    }
}

fn convert_rows(keyword: &str, value: &str, _relation: &str) -> Term {
    convert_int(keyword, value, "=")
}

fn convert_no_relation(keyword: &str, value: &str, _relation: &str) -> Term {
    Term {
        keyword: keyword_of(keyword),
        relation: Relation::None,
        value: TermValue::Text(value.to_string()),
    }
}

fn convert_no_relation_and_keyword(_keyword: &str, value: &str, _relation: &str) -> Term {
    Term::text(value)
}

fn convert_generic(keyword: &str, value: &str, relation: &str) -> Term {
    Term {
        keyword: keyword_of(keyword),
        relation: Relation::from_symbol(relation),
        value: TermValue::Text(value.to_string()),
    }
}

fn lookup(table: &[(&str, Converter)], key: &str) -> Option<Converter> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, converter)| *converter)
}

/// Returns true if `keyword` has a keyword-specific integer rule.
pub(crate) fn is_integer_keyword(keyword: &str) -> bool {
    lookup(KEYWORD_CONVERTERS, keyword).is_some()
}

/// Converts raw text into a normalized [`Term`].
///
/// `value` and `relation` are XML-decoded exactly once, before any rule
/// looks at them.
///
/// # Example
///
/// ```
/// use gmp_filter::filter::{convert, Relation, TermValue};
///
/// let term = convert("first", "-3", "<");
/// assert_eq!(term.value, TermValue::Integer(1));
/// assert_eq!(term.relation, Relation::Equal);
///
/// let term = convert("severity", "&#55;", "&gt;");
/// assert_eq!(term.value, TermValue::Text("7".to_string()));
/// assert_eq!(term.relation, Relation::Above);
/// ```
pub fn convert(keyword: &str, value: &str, relation: &str) -> Term {
    let value = xml::decode(value);
    let relation = xml::decode(relation);

    if let Some(converter) = lookup(KEYWORD_CONVERTERS, keyword) {
        return converter(keyword, &value, &relation);
    }

    if let Some(converter) = lookup(VALUE_CONVERTERS, &value) {
        return converter(keyword, &value, &relation);
    }

    convert_generic(keyword, &value, &relation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> TermValue {
        TermValue::Integer(n)
    }

    fn text(s: &str) -> TermValue {
        TermValue::Text(s.to_string())
    }

    // ==================== parse_int ====================

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("0"), int(0));
        assert_eq!(parse_int("17"), int(17));
        assert_eq!(parse_int("+4"), int(4));
        assert_eq!(parse_int("-1"), int(-1));
    }

    #[test]
    fn test_parse_int_truncates_fraction() {
        assert_eq!(parse_int("3.99"), int(3));
        assert_eq!(parse_int("-2.5"), int(-2));
        assert_eq!(parse_int("7."), int(7));
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert_eq!(parse_int(""), TermValue::NotANumber);
        assert_eq!(parse_int("   "), TermValue::NotANumber);
        assert_eq!(parse_int("abc"), TermValue::NotANumber);
        assert_eq!(parse_int("12abc"), TermValue::NotANumber);
        assert_eq!(parse_int("-"), TermValue::NotANumber);
        assert_eq!(parse_int(".5"), TermValue::NotANumber);
        assert_eq!(parse_int("1.2.3"), TermValue::NotANumber);
        assert_eq!(parse_int("99999999999999999999"), TermValue::NotANumber);
    }

    // ==================== Keyword rules ====================

    #[test]
    fn test_boolean_keywords() {
        for keyword in ["apply_overrides", "notes", "overrides", "result_hosts_only"] {
            assert_eq!(convert(keyword, "0", "=").value, int(0));
            assert_eq!(convert(keyword, "1", "=").value, int(1));
            assert_eq!(convert(keyword, "5", "=").value, int(1));
            assert_eq!(convert(keyword, "-2", "=").value, int(0));
            assert_eq!(convert(keyword, "yes", "=").value, int(0));
        }
    }

    #[test]
    fn test_boolean_keyword_keeps_relation() {
        let term = convert("notes", "1", ">");
        assert_eq!(term.relation, Relation::Above);
        assert_eq!(term.keyword.as_deref(), Some("notes"));
    }

    #[test]
    fn test_int_keywords_keep_sentinel() {
        assert_eq!(convert("min_qod", "70", "=").value, int(70));
        assert_eq!(convert("min_qod", "-5", "=").value, int(-5));
        assert_eq!(convert("autofp", "2", "=").value, int(2));
        assert_eq!(convert("min_qod", "high", "=").value, TermValue::NotANumber);
        assert_eq!(convert("autofp", "", "=").value, TermValue::NotANumber);
    }

    #[test]
    fn test_int_keyword_keeps_relation() {
        assert_eq!(convert("min_qod", "70", ">").relation, Relation::Above);
    }

    #[test]
    fn test_first_is_floored_at_one() {
        assert_eq!(convert("first", "7", "=").value, int(7));
        assert_eq!(convert("first", "0", "=").value, int(1));
        assert_eq!(convert("first", "-3", "=").value, int(1));
        assert_eq!(convert("first", "abc", "=").value, int(1));
    }

    #[test]
    fn test_first_forces_equal() {
        assert_eq!(convert("first", "7", "~").relation, Relation::Equal);
        assert_eq!(convert("first", "7", "").relation, Relation::Equal);
    }

    #[test]
    fn test_rows_forces_equal_without_clamping() {
        let term = convert("rows", "5", ">");
        assert_eq!(term.value, int(5));
        assert_eq!(term.relation, Relation::Equal);

        assert_eq!(convert("rows", "-1", "=").value, int(-1));
        assert_eq!(convert("rows", "0", "=").value, int(0));
        assert_eq!(convert("rows", "many", "=").value, TermValue::NotANumber);
    }

    #[test]
    fn test_keyword_rule_wins_over_value_rule() {
        // "and" as a rows value is still a rows term.
        let term = convert("rows", "and", "=");
        assert_eq!(term.keyword.as_deref(), Some("rows"));
        assert_eq!(term.value, TermValue::NotANumber);
    }

    // ==================== Value rules ====================

    #[test]
    fn test_logical_values_drop_keyword_and_relation() {
        for value in ["and", "or", "not"] {
            let term = convert("name", value, "=");
            assert_eq!(term.keyword, None);
            assert_eq!(term.relation, Relation::None);
            assert_eq!(term.value, text(value));
            assert!(term.is_combinator());
        }
    }

    #[test]
    fn test_regexp_values_drop_relation() {
        for value in ["re", "regexp", ""] {
            let term = convert("name", value, "~");
            assert_eq!(term.keyword.as_deref(), Some("name"));
            assert_eq!(term.relation, Relation::None);
            assert_eq!(term.value, text(value));
        }
    }

    #[test]
    fn test_logical_values_are_case_sensitive() {
        let term = convert("", "AND", "");
        assert!(!term.is_combinator());
    }

    // ==================== Generic rule ====================

    #[test]
    fn test_generic_keyword_term() {
        let term = convert("name", "scan", "~");
        assert_eq!(term.keyword.as_deref(), Some("name"));
        assert_eq!(term.relation, Relation::Approx);
        assert_eq!(term.value, text("scan"));
    }

    #[test]
    fn test_generic_bare_term() {
        let term = convert("", "scan", "");
        assert_eq!(term.keyword, None);
        assert_eq!(term.relation, Relation::None);
        assert_eq!(term.value, text("scan"));

        let term = convert("", "scan", "~");
        assert_eq!(term.keyword, None);
        assert_eq!(term.relation, Relation::Approx);
    }

    #[test]
    fn test_unknown_relation_is_none() {
        assert_eq!(convert("name", "x", "!=").relation, Relation::None);
    }

    // ==================== XML decoding ====================

    #[test]
    fn test_xml_decoded_before_integer_parsing() {
        assert_eq!(convert("rows", "&#49;&#48;", "=").value, int(10));
        assert_eq!(convert("first", "&#x35;", "=").value, int(5));
    }

    #[test]
    fn test_xml_decoded_relation() {
        assert_eq!(convert("severity", "5", "&gt;").relation, Relation::Above);
        assert_eq!(convert("severity", "5", "&lt;").relation, Relation::Below);
    }

    #[test]
    fn test_xml_decoded_value_selects_value_rule() {
        let term = convert("name", "&#97;nd", "=");
        assert!(term.is_combinator());
    }

    #[test]
    fn test_xml_decoded_once() {
        let term = convert("name", "&amp;lt;", "=");
        assert_eq!(term.value, text("&lt;"));
    }

    #[test]
    fn test_is_integer_keyword() {
        assert!(is_integer_keyword("rows"));
        assert!(is_integer_keyword("notes"));
        assert!(!is_integer_keyword("name"));
        assert!(!is_integer_keyword("sort"));
    }
}
