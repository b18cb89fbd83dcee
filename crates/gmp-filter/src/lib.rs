//! Filter expression engine for Greenbone Management Protocol listings.
//!
//! This crate parses, normalizes, merges and re-serializes the compact filter
//! language used to select, sort and paginate entity collections (tasks,
//! reports, hosts, audits, ...), and models the paging counts a backend
//! reports alongside a filtered listing.
//!
//! - [`filter`] - the filter language: terms, parser and the [`Filter`] value
//! - [`counts`] - [`CollectionCounts`] derived from a listing response
//!
//! # Example
//!
//! ```
//! use gmp_filter::{CollectionCounts, Filter};
//!
//! let filter = Filter::parse("name~scan and rows=10 first=1 sort=name");
//! assert_eq!(filter.rows(), Some(10));
//!
//! let next = filter.next_page();
//! assert_eq!(next.to_string(), "name~scan and rows=10 first=11 sort=name");
//!
//! let counts = CollectionCounts::new(11, 10, 10, 37, 50);
//! assert!(counts.has_more());
//! assert_eq!(counts.page_count(), 4);
//! ```

pub mod counts;
pub mod filter;

pub use counts::{CollectionCounts, RawCounts};
pub use filter::{Filter, FilterError, FilterParser, Relation, SortOrder, Term, TermValue};
