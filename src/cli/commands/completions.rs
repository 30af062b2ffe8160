//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StudyError;

const BIN_NAME: &str = "smartstudy";

/// Execute the completions command.
///
/// # Errors
///
/// Returns `Validation` for an unsupported shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, StudyError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        StudyError::Validation(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(install_instructions(shell_type))
    } else {
        generate(shell_type)
    }
}

fn generate(shell: Shell) -> Result<String, StudyError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| StudyError::Validation(format!("completion script is not UTF-8: {e}")))
}

fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:
source <(smartstudy completions bash)
"
        .to_string(),
        Shell::Zsh => "# Save to a directory on your fpath:
smartstudy completions zsh > ~/.zfunc/_smartstudy
# Then in ~/.zshrc (before compinit):
fpath=(~/.zfunc $fpath)
"
        .to_string(),
        Shell::Fish => "smartstudy completions fish > ~/.config/fish/completions/smartstudy.fish
"
        .to_string(),
        Shell::PowerShell => "# Add to your PowerShell profile ($PROFILE):
smartstudy completions powershell | Out-String | Invoke-Expression
"
        .to_string(),
        Shell::Elvish => "smartstudy completions elvish > ~/.elvish/lib/smartstudy.elv
# Then add `use smartstudy` to ~/.elvish/rc.elv
"
        .to_string(),
        _ => format!("No instructions for {shell}"),
    }
}
