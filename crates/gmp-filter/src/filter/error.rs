//! Diagnostics for filter expressions.
//!
//! Parsing itself never fails. These errors are only produced by the opt-in
//! validation pass ([`FilterParser::diagnose`](super::FilterParser::diagnose)
//! and [`FilterParser::parse_strict`](super::FilterParser::parse_strict)).

use thiserror::Error;

/// A specialized Result type for strict filter parsing.
pub type FilterResult<T> = Result<T, FilterError>;

/// Problems found in a filter expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A fragment could not be turned into a term and was dropped.
    #[error("malformed term '{fragment}' at position {position}")]
    MalformedTerm {
        /// The dropped fragment.
        fragment: String,
        /// The byte position where the fragment starts (0-indexed).
        position: usize,
    },

    /// A run of relation characters that is not a known relation.
    #[error("unknown relation '{relation}' at position {position}")]
    UnknownRelation {
        /// The relation characters as typed.
        relation: String,
        /// The byte position of the relation (0-indexed).
        position: usize,
    },

    /// A double quote was opened but never closed.
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote {
        /// The byte position of the opening quote (0-indexed).
        position: usize,
    },

    /// An integer keyword was given a value that is not a number.
    #[error("invalid numeric value for '{keyword}': {value}")]
    InvalidNumeric {
        /// The integer keyword.
        keyword: String,
        /// The raw value as typed.
        value: String,
    },

    /// A keyword that the backend does not know. Passed through unchanged.
    #[error("unknown filter keyword: {keyword}{}", suggestion_hint(.suggestion))]
    UnknownKeyword {
        /// The unrecognized keyword.
        keyword: String,
        /// A close known keyword, if any.
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates a malformed term error.
    pub fn malformed_term(fragment: impl Into<String>, position: usize) -> Self {
        FilterError::MalformedTerm {
            fragment: fragment.into(),
            position,
        }
    }

    /// Creates an invalid numeric error.
    pub fn invalid_numeric(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        FilterError::InvalidNumeric {
            keyword: keyword.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown keyword error.
    pub fn unknown_keyword(keyword: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownKeyword {
            keyword: keyword.into(),
            suggestion,
        }
    }

    /// Returns true if the problem changes the meaning of the filter.
    ///
    /// Unknown keywords are passed to the backend as typed, so they are
    /// reported but do not degrade the filter.
    pub fn is_degrading(&self) -> bool {
        !matches!(self, FilterError::UnknownKeyword { .. })
    }

    /// Returns a stable machine-readable code for the problem.
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::MalformedTerm { .. } => "MALFORMED_TERM",
            FilterError::UnknownRelation { .. } => "UNKNOWN_RELATION",
            FilterError::UnterminatedQuote { .. } => "UNTERMINATED_QUOTE",
            FilterError::InvalidNumeric { .. } => "INVALID_NUMERIC",
            FilterError::UnknownKeyword { .. } => "UNKNOWN_KEYWORD",
        }
    }
}
