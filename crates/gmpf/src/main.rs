use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};

/// Environment variable holding the log filter directives.
const ENV_LOG: &str = "GMPF_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `--verbose` and `--quiet` win over `GMPF_LOG` / `RUST_LOG`.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "debug".to_string()
    } else if cli.quiet {
        "error".to_string()
    } else {
        std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string())
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!cli.no_color)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn run(cli: &Cli) -> commands::Result<ExitCode> {
    // Commands that must work without a readable config file.
    match &cli.command {
        Commands::Completions { shell } => {
            commands::completions::execute(*shell)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config {
            command: Some(ConfigCommands::Path),
        } => {
            let ctx = CommandContext::from_cli(cli, &Config::default());
            commands::config::execute_path(&ctx)?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);

    match &cli.command {
        Commands::Normalize { filter, strict } => {
            commands::filter::execute_normalize(&ctx, filter, *strict)?
        }
        Commands::Get { filter, keyword } => commands::filter::execute_get(&ctx, filter, keyword)?,
        Commands::Set {
            filter,
            keyword,
            value,
            relation,
        } => {
            let opts = commands::filter::SetOptions {
                keyword,
                value,
                relation,
            };
            commands::filter::execute_set(&ctx, filter, &opts)?;
        }
        Commands::Remove { filter, keyword } => {
            commands::filter::execute_remove(&ctx, filter, keyword)?
        }
        Commands::Merge {
            base,
            other,
            keep_paging,
            reset_paging,
        } => {
            let keep_paging = resolve_keep_paging(*keep_paging, *reset_paging, &config);
            commands::filter::execute_merge(&ctx, base, other, keep_paging)?;
        }
        Commands::Page { filter, target } => {
            commands::filter::execute_page(&ctx, filter, target, config.filter.rows)?
        }
        Commands::Check { filter } => {
            if !commands::filter::execute_check(&ctx, filter)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Counts(args) => commands::counts::execute(&ctx, args)?,
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx, &config)?,
            Some(ConfigCommands::Set { key, value }) => {
                let opts = commands::config::ConfigSetOptions {
                    key: key.clone(),
                    value: value.clone(),
                };
                commands::config::execute_set(&ctx, &opts)?;
            }
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx)?,
        },
        Commands::Completions { shell } => commands::completions::execute(*shell)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolves paging preservation for merge: flags first, then config.
fn resolve_keep_paging(keep_paging: bool, reset_paging: bool, config: &Config) -> bool {
    if keep_paging {
        true
    } else if reset_paging {
        false
    } else {
        config.filter.keep_paging.unwrap_or(false)
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Argument(_) => "INVALID_ARGUMENT",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) => 1,
        CommandError::Json(_) => 1,
        CommandError::Argument(_) => 2,
        CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::config::FilterConfig;

    fn config_with_keep_paging(keep_paging: Option<bool>) -> Config {
        Config {
            filter: FilterConfig {
                keep_paging,
                rows: None,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_resolve_keep_paging_flags_win() {
        let config = config_with_keep_paging(Some(false));
        assert!(resolve_keep_paging(true, false, &config));

        let config = config_with_keep_paging(Some(true));
        assert!(!resolve_keep_paging(false, true, &config));
    }

    #[test]
    fn test_resolve_keep_paging_from_config() {
        assert!(resolve_keep_paging(false, false, &config_with_keep_paging(Some(true))));
        assert!(!resolve_keep_paging(false, false, &config_with_keep_paging(None)));
    }

    #[test]
    fn test_error_codes() {
        let filter_err = CommandError::Filter(gmp_filter::FilterError::UnterminatedQuote {
            position: 3,
        });
        assert_eq!(error_code(&filter_err), "FILTER_ERROR");
        assert_eq!(exit_status(&filter_err), 1);

        let arg_err = CommandError::Argument("bad".to_string());
        assert_eq!(error_code(&arg_err), "INVALID_ARGUMENT");
        assert_eq!(exit_status(&arg_err), 2);

        let config_err = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config_err), "CONFIG_ERROR");
        assert_eq!(exit_status(&config_err), 5);

        let io_err = CommandError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(error_code(&io_err), "IO_ERROR");
        assert_eq!(exit_status(&io_err), 3);
    }
}
