//! Filter output formatting.

use gmp_filter::{Filter, FilterError, Relation, Term, TermValue};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for a filter.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub filter: String,
    pub terms: Vec<TermOutput<'a>>,
}

/// JSON output structure for a single term.
#[derive(Serialize)]
pub struct TermOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub relation: &'static str,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub combinator: bool,
}

/// Converts a term value to JSON: integers as numbers, the rest as strings.
fn value_json(value: &TermValue) -> serde_json::Value {
    match value {
        TermValue::Integer(n) => serde_json::Value::from(*n),
        other => serde_json::Value::from(other.to_string()),
    }
}

impl<'a> From<&'a Term> for TermOutput<'a> {
    fn from(term: &'a Term) -> Self {
        Self {
            keyword: term.keyword.as_deref(),
            relation: term.relation.symbol(),
            value: value_json(&term.value),
            combinator: term.is_combinator(),
        }
    }
}

/// Formats a filter and its terms as JSON.
pub fn format_filter_json(filter: &Filter) -> Result<String, serde_json::Error> {
    let output = FilterOutput {
        filter: filter.to_string(),
        terms: filter.terms().iter().map(TermOutput::from).collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// JSON output structure for a keyword lookup (get command).
#[derive(Serialize)]
pub struct LookupOutput<'a> {
    pub keyword: &'a str,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Formats a keyword lookup as JSON.
pub fn format_lookup_json(keyword: &str, term: Option<&Term>) -> Result<String, serde_json::Error> {
    let output = LookupOutput {
        keyword,
        found: term.is_some(),
        relation: term.map(|t| t.relation.symbol()),
        value: term.map(|t| value_json(&t.value)),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a keyword lookup as a single line: the value, or nothing.
pub fn format_lookup_text(term: Option<&Term>) -> String {
    match term {
        Some(term) => format!("{}\n", term.value),
        None => String::new(),
    }
}

/// JSON output structure for one diagnostic.
#[derive(Serialize)]
pub struct IssueOutput {
    pub code: &'static str,
    pub message: String,
    pub degrading: bool,
}

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct DiagnosticsOutput {
    pub filter: String,
    pub valid: bool,
    pub issues: Vec<IssueOutput>,
}

/// Formats diagnostics as JSON.
pub fn format_diagnostics_json(
    filter: &Filter,
    issues: &[FilterError],
) -> Result<String, serde_json::Error> {
    let output = DiagnosticsOutput {
        filter: filter.to_string(),
        valid: !issues.iter().any(FilterError::is_degrading),
        issues: issues
            .iter()
            .map(|e| IssueOutput {
                code: e.code(),
                message: e.to_string(),
                degrading: e.is_degrading(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the normalized filter as a term table followed by diagnostics.
pub fn format_diagnostics_table(filter: &Filter, issues: &[FilterError], use_colors: bool) -> String {
    let mut output = String::new();

    if filter.is_empty() {
        output.push_str("Empty filter.\n");
    } else {
        let header = format!("{:<16} {:<4} {}", "Keyword", "Rel", "Value");
        if use_colors {
            output.push_str(&format!("{}\n", header.dimmed()));
        } else {
            output.push_str(&header);
            output.push('\n');
        }

        for term in filter.terms() {
            let keyword = term.keyword.as_deref().unwrap_or("");
            let relation = match term.relation {
                Relation::None if term.keyword.is_some() => "=",
                other => other.symbol(),
            };
            let value = term.value.to_string();
            let value = if term.is_combinator() && use_colors {
                value.cyan().to_string()
            } else {
                value
            };
            output.push_str(&format!("{:<16} {:<4} {}\n", keyword, relation, value));
        }
    }

    output.push('\n');
    if issues.is_empty() {
        let line = "No issues found.";
        if use_colors {
            output.push_str(&format!("{}\n", line.green()));
        } else {
            output.push_str(line);
            output.push('\n');
        }
        return output;
    }

    for issue in issues {
        let label = if issue.is_degrading() { "error" } else { "warning" };
        let label = if use_colors {
            if issue.is_degrading() {
                label.red().to_string()
            } else {
                label.yellow().to_string()
            }
        } else {
            label.to_string()
        };
        output.push_str(&format!("{label}: {issue}\n"));
    }

    output
}
