//! Filter command implementations.
//!
//! Every command parses its input leniently, like the backend does, and
//! prints the resulting canonical filter string.

use gmp_filter::{Filter, FilterParser, Relation};

use super::{CommandContext, CommandError, Result};
use crate::cli::PageTarget;
use crate::output::{
    format_diagnostics_json, format_diagnostics_table, format_filter_json, format_lookup_json,
    format_lookup_text,
};

/// Prints a filter as its canonical string, or as JSON with its terms.
fn print_filter(ctx: &CommandContext, filter: &Filter) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_filter_json(filter)?);
    } else {
        println!("{filter}");
    }
    Ok(())
}

/// Executes the normalize command.
///
/// With `strict`, the first problem that changes the filter's meaning is
/// returned as an error instead of being dropped.
pub fn execute_normalize(ctx: &CommandContext, input: &str, strict: bool) -> Result<()> {
    let filter = if strict {
        FilterParser::parse_strict(input)?
    } else {
        Filter::parse(input)
    };
    tracing::debug!(input, normalized = %filter, "normalized filter");
    print_filter(ctx, &filter)
}

/// Executes the get command.
///
/// Prints nothing (and succeeds) when the keyword is absent.
pub fn execute_get(ctx: &CommandContext, input: &str, keyword: &str) -> Result<()> {
    let filter = Filter::parse(input);
    let term = filter.get_term(keyword);

    if ctx.json_output {
        println!("{}", format_lookup_json(keyword, term)?);
    } else {
        print!("{}", format_lookup_text(term));
    }
    Ok(())
}

/// Options for the set command.
pub struct SetOptions<'a> {
    pub keyword: &'a str,
    pub value: &'a str,
    pub relation: &'a str,
}

/// Parses a relation argument, accepting exactly one relation symbol.
fn parse_relation(symbol: &str) -> Result<Relation> {
    match Relation::from_symbol(symbol) {
        Relation::None => Err(CommandError::Argument(format!(
            "unknown relation '{}'. Use one of =, ~, >, <, :",
            symbol
        ))),
        relation => Ok(relation),
    }
}

/// Rejects blank keyword arguments.
fn check_keyword(keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        return Err(CommandError::Argument("keyword must not be empty".to_string()));
    }
    Ok(())
}

/// Applies a set command to a filter.
fn set_term(filter: &Filter, opts: &SetOptions) -> Result<Filter> {
    check_keyword(opts.keyword)?;
    let relation = parse_relation(opts.relation)?;
    Ok(filter.set(opts.keyword, opts.value, Some(relation)))
}

/// Executes the set command.
pub fn execute_set(ctx: &CommandContext, input: &str, opts: &SetOptions) -> Result<()> {
    let filter = set_term(&Filter::parse(input), opts)?;
    print_filter(ctx, &filter)
}

/// Executes the remove command.
pub fn execute_remove(ctx: &CommandContext, input: &str, keyword: &str) -> Result<()> {
    check_keyword(keyword)?;
    let filter = Filter::parse(input).remove(keyword);
    print_filter(ctx, &filter)
}

/// Executes the merge command.
pub fn execute_merge(
    ctx: &CommandContext,
    base: &str,
    other: &str,
    keep_paging: bool,
) -> Result<()> {
    let merged = Filter::parse(base).merge(&Filter::parse(other), keep_paging);
    print_filter(ctx, &merged)
}

/// Moves a filter to the requested page.
///
/// `default_rows` is applied when going to the first page of a filter
/// without a page size.
fn turn_page(filter: &Filter, target: &PageTarget, default_rows: Option<u32>) -> Filter {
    if target.next {
        filter.next_page()
    } else if target.previous {
        filter.previous_page()
    } else if target.all {
        filter.all()
    } else {
        let filter = match default_rows {
            Some(rows) if !filter.has("rows") => filter.set("rows", rows, None),
            _ => filter.clone(),
        };
        filter.first_page()
    }
}

/// Executes the page command.
pub fn execute_page(
    ctx: &CommandContext,
    input: &str,
    target: &PageTarget,
    default_rows: Option<u32>,
) -> Result<()> {
    let filter = turn_page(&Filter::parse(input), target, default_rows);
    print_filter(ctx, &filter)
}

/// Executes the check command.
///
/// Returns false if the filter has problems that change its meaning.
pub fn execute_check(ctx: &CommandContext, input: &str) -> Result<bool> {
    let filter = Filter::parse(input);
    let issues = FilterParser::diagnose(input);
    let valid = !issues.iter().any(|e| e.is_degrading());

    if ctx.json_output {
        println!("{}", format_diagnostics_json(&filter, &issues)?);
    } else if !ctx.quiet {
        print!("{}", format_diagnostics_table(&filter, &issues, ctx.use_colors));
    }

    Ok(valid)
}
