//! Terms: the atomic units of a filter.

use std::fmt;

use super::convert::convert;
use super::xml;

/// Comparator between a keyword and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// `=`
    Equal,
    /// `~`
    Approx,
    /// `>`
    Above,
    /// `<`
    Below,
    /// `:`
    Colon,
    /// No relation: bare values, combinators and relation-less keyword terms.
    #[default]
    None,
}

impl Relation {
    /// Maps a relation symbol to a relation.
    ///
    /// Only the five single-character symbols are recognized. Anything else,
    /// including multi-character runs like `<=` or `!=`, is `Relation::None`.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => Relation::Equal,
            "~" => Relation::Approx,
            ">" => Relation::Above,
            "<" => Relation::Below,
            ":" => Relation::Colon,
            _ => Relation::None,
        }
    }

    /// Returns the symbol for this relation (empty for `None`).
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "=",
            Relation::Approx => "~",
            Relation::Above => ">",
            Relation::Below => "<",
            Relation::Colon => ":",
            Relation::None => "",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The normalized value of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermValue {
    /// Free text (also used for combinators).
    Text(String),
    /// A validated integer (paging, boolean flags, thresholds).
    Integer(i64),
    /// An integer keyword whose value could not be parsed.
    NotANumber,
}

impl TermValue {
    /// Returns the integer, if this is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TermValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TermValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for `and`, `or` and `not`.
    pub fn is_logical(&self) -> bool {
        matches!(self.as_text(), Some("and" | "or" | "not"))
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Text(s) => f.write_str(s),
            TermValue::Integer(n) => write!(f, "{n}"),
            TermValue::NotANumber => f.write_str("NaN"),
        }
    }
}

impl From<i64> for TermValue {
    fn from(n: i64) -> Self {
        TermValue::Integer(n)
    }
}

impl From<&str> for TermValue {
    fn from(s: &str) -> Self {
        TermValue::Text(s.to_string())
    }
}

impl From<String> for TermValue {
    fn from(s: String) -> Self {
        TermValue::Text(s)
    }
}

/// One `(keyword, relation, value)` unit of a filter.
///
/// Terms are normally built through [`Term::new`], which applies the
/// keyword- and value-specific conversion rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    /// The keyword, absent for free text and combinators.
    pub keyword: Option<String>,
    /// The relation between keyword and value.
    pub relation: Relation,
    /// The normalized value.
    pub value: TermValue,
}

impl Term {
    /// Builds a normalized term from raw text.
    ///
    /// # Example
    ///
    /// ```
    /// use gmp_filter::filter::{Relation, Term, TermValue};
    ///
    /// let term = Term::new("rows", "25", ">");
    /// assert_eq!(term.value, TermValue::Integer(25));
    /// assert_eq!(term.relation, Relation::Equal);
    ///
    /// let and = Term::new("", "and", "");
    /// assert!(and.is_combinator());
    /// ```
    pub fn new(keyword: &str, value: &str, relation: &str) -> Self {
        convert(keyword, value, relation)
    }

    /// A free-text term with no keyword and no relation.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            keyword: None,
            relation: Relation::None,
            value: TermValue::Text(value.into()),
        }
    }

    /// Returns the keyword, or `""` for keyword-less terms.
    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or("")
    }

    /// Returns true if this term has the given keyword.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword.as_deref() == Some(keyword)
    }

    /// Returns true for the logical combinators `and`, `or` and `not`.
    pub fn is_combinator(&self) -> bool {
        self.keyword.is_none() && self.value.is_logical()
    }
}

/// Relation characters; a bare value containing one must be quoted.
const RELATION_CHARS: [char; 5] = ['=', '~', '>', '<', ':'];

fn needs_quotes(value: &str, bare: bool) -> bool {
    value.is_empty()
        || value.contains(|c: char| c.is_whitespace() || c == '"')
        || value.starts_with(RELATION_CHARS)
        || (bare && value.contains(RELATION_CHARS))
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str, bare: bool) -> fmt::Result {
    let value = xml::protect(value);
    if !needs_quotes(&value, bare) {
        return f.write_str(&value);
    }

    f.write_str("\"")?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

impl fmt::Display for Term {
    /// Renders the term so that parsing the output yields the same term.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.keyword, &self.value) {
            (Some(keyword), TermValue::Text(text)) => {
                f.write_str(keyword)?;
                f.write_str(self.relation_symbol())?;
                write_value(f, text, false)
            }
            (Some(keyword), value) => {
                write!(f, "{keyword}{}{value}", self.relation_symbol())
            }
            (None, TermValue::Text(text)) => {
                f.write_str(self.relation.symbol())?;
                if self.is_combinator() {
                    return f.write_str(text);
                }
                write_value(f, text, self.relation == Relation::None)
            }
            (None, value) => write!(f, "{}{value}", self.relation.symbol()),
        }
    }
}

impl Term {
    /// Keyword terms without a relation are written with `=`.
    fn relation_symbol(&self) -> &'static str {
        match self.relation {
            Relation::None => "=",
            other => other.symbol(),
        }
    }
}
