//! Counts command implementation.
//!
//! Computes pagination from the counts reported with a listing, given as
//! flags or read from a JSON listing response.

use std::fs;

use gmp_filter::{CollectionCounts, RawCounts};

use super::{CommandContext, CommandError, Result};
use crate::cli::CountsArgs;
use crate::output::{format_counts_json, format_counts_table};

/// Builds counts from the command arguments.
fn counts_from_args(args: &CountsArgs) -> Result<CollectionCounts> {
    if let Some(path) = &args.response {
        let entity = args.entity.as_deref().ok_or_else(|| {
            CommandError::Argument("--entity is required with --response".to_string())
        })?;
        let content = fs::read_to_string(path)?;
        let response: serde_json::Value = serde_json::from_str(&content)?;
        return Ok(CollectionCounts::from_response(&response, entity));
    }

    let raw = RawCounts {
        first: args.first.clone().map(serde_json::Value::from),
        rows: args.rows.clone().map(serde_json::Value::from),
        length: args.length.clone().map(serde_json::Value::from),
        filtered: args.filtered.clone().map(serde_json::Value::from),
        all: args.all.clone().map(serde_json::Value::from),
    };
    Ok(CollectionCounts::from_raw(&raw))
}

/// Executes the counts command.
pub fn execute(ctx: &CommandContext, args: &CountsArgs) -> Result<()> {
    let counts = counts_from_args(args)?;

    if ctx.json_output {
        println!("{}", format_counts_json(counts)?);
    } else if !ctx.quiet {
        print!("{}", format_counts_table(counts, ctx.use_colors));
    }

    Ok(())
}
