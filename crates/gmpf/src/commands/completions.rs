//! Shell completions command implementation.
//!
//! Generate shell completions for bash, zsh, fish, and powershell.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};

use crate::cli::{Cli, Shell};

/// Maps the CLI shell choice to the clap_complete shell.
fn clap_shell(shell: Shell) -> ClapShell {
    match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::Powershell => ClapShell::PowerShell,
    }
}

/// Generate shell completions for the given shell and write to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(clap_shell(shell), &mut cmd, "gmpf", out);
}

/// Generate shell completions for the given shell and write to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn execute(shell: Shell) -> io::Result<()> {
    let mut stdout = io::stdout();
    write_completions(shell, &mut stdout);
    io::Write::flush(&mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_shell_mapping() {
        assert!(matches!(clap_shell(Shell::Bash), ClapShell::Bash));
        assert!(matches!(clap_shell(Shell::Zsh), ClapShell::Zsh));
        assert!(matches!(clap_shell(Shell::Fish), ClapShell::Fish));
        assert!(matches!(clap_shell(Shell::Powershell), ClapShell::PowerShell));
    }

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let script = completions(Shell::Bash);
        assert!(script.contains("gmpf"));
        assert!(script.contains("normalize"));
        assert!(script.contains("merge"));
    }

    #[test]
    fn test_fish_completions() {
        let script = completions(Shell::Fish);
        assert!(script.contains("complete -c gmpf"));
    }
}
