use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_ADAPTER_ID, DEFAULT_TABLE, StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring snowcr.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt(
        "ServiceNow instance URL (e.g., https://dev12345.service-now.com)",
        &mut cfg.url,
        false,
    )?;
    apply_prompt("ServiceNow username", &mut cfg.username, false)?;
    apply_prompt("ServiceNow password", &mut cfg.password, true)?;
    apply_prompt(
        &format!("Change request table (default {DEFAULT_TABLE})"),
        &mut cfg.table,
        false,
    )?;
    apply_prompt(
        &format!("Adapter id (default {DEFAULT_ADAPTER_ID})"),
        &mut cfg.adapter_id,
        false,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Instance URL: {}", display_value(cfg.url.as_deref()));
    println!("Username: {}", display_value(cfg.username.as_deref()));
    println!("Password: {}", mask_secret(cfg.password.as_deref()));
    println!("Table: {}", display_value(cfg.table.as_deref()));
    println!("Adapter id: {}", display_value(cfg.adapter_id.as_deref()));

    Ok(())
}

const NOT_SET: &str = "<not set>";
const MASK: &str = "***";
const MASK_EDGE: usize = 3;

/// What the user asked for at a single wizard prompt.
#[derive(Debug, PartialEq, Eq)]
enum PromptAnswer {
    Keep,
    Clear,
    Replace(String),
}

impl PromptAnswer {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => PromptAnswer::Keep,
            "-" => PromptAnswer::Clear,
            value => PromptAnswer::Replace(value.to_string()),
        }
    }

    fn apply(self, target: &mut Option<String>) {
        match self {
            PromptAnswer::Keep => {}
            PromptAnswer::Clear => *target = None,
            PromptAnswer::Replace(value) => *target = Some(value),
        }
    }
}

fn apply_prompt(label: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    let hint = match target.as_deref() {
        Some(_) if secret => format!("{label} [{MASK}] (Enter to keep, '-' to clear): "),
        Some(current) => format!("{label} [{current}] (Enter to keep, '-' to clear): "),
        None => format!("{label} (Enter to skip): "),
    };

    let mut stdout = io::stdout();
    stdout.write_all(hint.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    PromptAnswer::parse(&line).apply(target);
    Ok(())
}

fn display_value(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_SET)
}

/// Keeps the first and last few characters of long secrets so they can be
/// recognised without being revealed.
fn mask_secret(value: Option<&str>) -> String {
    let Some(secret) = value.filter(|v| !v.is_empty()) else {
        return NOT_SET.to_string();
    };

    let chars = secret.chars().collect::<Vec<_>>();
    if chars.len() <= MASK_EDGE * 2 {
        return MASK.to_string();
    }

    let head = chars[..MASK_EDGE].iter().collect::<String>();
    let tail = chars[chars.len() - MASK_EDGE..].iter().collect::<String>();
    format!("{head}{MASK}{tail}")
}
