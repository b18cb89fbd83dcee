//! Collection counts output formatting.

use gmp_filter::CollectionCounts;
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the counts command.
#[derive(Serialize)]
pub struct CountsOutput {
    #[serde(flatten)]
    pub counts: CollectionCounts,
    pub last: u64,
    pub has_more: bool,
    pub page_count: u64,
    pub current_page: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl From<CollectionCounts> for CountsOutput {
    fn from(counts: CollectionCounts) -> Self {
        Self {
            counts,
            last: counts.last(),
            has_more: counts.has_more(),
            page_count: counts.page_count(),
            current_page: counts.current_page(),
            is_first_page: counts.is_first_page(),
            is_last_page: counts.is_last_page(),
        }
    }
}

/// Formats counts and derived pagination as JSON.
pub fn format_counts_json(counts: CollectionCounts) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CountsOutput::from(counts))
}

/// Formats counts as a short summary, e.g. `11 - 20 of 37 (50 total)`.
pub fn format_counts_table(counts: CollectionCounts, use_colors: bool) -> String {
    let mut output = String::new();

    let range = if counts.length == 0 {
        "No entities".to_string()
    } else {
        format!("{} - {} of {}", counts.first, counts.last(), counts.filtered)
    };
    let total = format!("({} total)", counts.all);
    if use_colors {
        output.push_str(&format!("{} {}\n", range.bold(), total.dimmed()));
    } else {
        output.push_str(&format!("{range} {total}\n"));
    }

    output.push_str(&format!(
        "Page {} of {}\n",
        counts.current_page(),
        counts.page_count().max(1)
    ));

    let more = if counts.has_more() {
        "More entities follow."
    } else {
        "Last page."
    };
    output.push_str(more);
    output.push('\n');

    output
}
