//! Output formatting utilities for the gmpf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is printed:
//!
//! - [`filter`] - Filters, terms, keyword lookups and diagnostics
//! - [`counts`] - Collection counts and derived pagination

mod counts;
mod filter;

pub use counts::{format_counts_json, format_counts_table};
pub use filter::{
    format_diagnostics_json, format_diagnostics_table, format_filter_json, format_lookup_json,
    format_lookup_text,
};
