//! The GMP filter language.
//!
//! A filter string is a flat, whitespace separated list of terms. Each term is
//! either a keyword comparison, a bare free-text value, or one of the logical
//! combinators `and`, `or` and `not`.
//!
//! # Supported Syntax
//!
//! ## Keyword Terms
//! - `name=value` - equal
//! - `name~value` - contains (approximate)
//! - `severity>5` / `severity<5` - above / below
//! - `tag:value` - colon relation
//! - `name="two words"` - double quotes admit whitespace
//!
//! ## Control Keywords
//! - `first=N` - 1-based offset of the page (never below 1)
//! - `rows=N` - page size (`-1` lists everything)
//! - `sort=field` / `sort-reverse=field` - sort order
//! - `min_qod`, `autofp` - integers
//! - `apply_overrides`, `notes`, `overrides`, `result_hosts_only` - `0` or `1`
//!
//! ## Combinators
//! - `and`, `or`, `not` - kept in order; there is no grouping
//!
//! Parsing never fails: unrecoverable fragments are dropped so that a filter
//! box always shows something close to what was typed. Use
//! [`FilterParser::diagnose`] to find out what was dropped.
//!
//! # Example
//!
//! ```
//! use gmp_filter::filter::{Filter, Relation, TermValue};
//!
//! let filter = Filter::parse("rows=5 name~foo rows=10 first=-3");
//! assert_eq!(filter.get("rows"), Some(&TermValue::Integer(10)));
//! assert_eq!(filter.first(), 1);
//! assert_eq!(filter.to_string(), "name~foo rows=10 first=1");
//!
//! let merged = filter.merge(&Filter::parse("name~bar rows=25"), true);
//! assert_eq!(merged.rows(), Some(10));
//! assert_eq!(merged.get_terms("name")[1].relation, Relation::Approx);
//! ```

mod convert;
mod error;
mod keywords;
mod lexer;
mod merge;
mod model;
mod parser;
mod term;
mod xml;

pub use convert::{convert, parse_int};
pub use error::{FilterError, FilterResult};
pub use keywords::{is_known_keyword, is_singleton, suggest_keyword, SINGLETON_KEYWORDS};
pub use model::{Filter, SortOrder};
pub use parser::FilterParser;
pub use term::{Relation, Term, TermValue};
