//! Configuration management for the form checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - Policy directory configuration

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::core::FormValues;

/// Command-line arguments for the form checker
#[derive(Debug, Parser)]
#[command(name = "siapu-check")]
#[command(about = "Validate SIAPU form inputs against form policies")]
#[command(version)]
pub struct Args {
    /// Form policy to validate against
    #[arg(long, help = "Form policy name (e.g., 'login', 'password_reset')")]
    pub form: Option<String>,

    /// Field values
    #[arg(long = "set", value_name = "KEY=VALUE", help = "Field value, repeatable")]
    pub values: Vec<String>,

    /// Extra directory searched for policy files
    #[arg(long, help = "Directory containing policy TOML files")]
    pub policy_dir: Option<PathBuf>,

    /// Date used for age checks
    #[arg(long, value_name = "YYYY-MM-DD", help = "Reference date (defaults to today)")]
    pub today: Option<NaiveDate>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List available policies and exit
    #[arg(long)]
    pub list: bool,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub form: Option<String>,
    pub values: FormValues,
    /// Per-user policy directory
    pub user_policy_dir: Option<PathBuf>,
    /// Workspace and explicitly requested directories, in override order
    pub workspace_policy_dirs: Vec<PathBuf>,
    pub today: NaiveDate,
    pub json: bool,
    pub list: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let values = parse_values(&args.values)?;

        // Default user config directory
        let user_policy_dir = dirs::config_dir().map(|dir| dir.join("siapu").join("policies"));

        // Workspace directory first, explicit directory last so it wins
        let mut workspace_policy_dirs = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            workspace_policy_dirs.push(cwd.join(".siapu").join("policies"));
        }
        if let Some(custom_dir) = args.policy_dir {
            workspace_policy_dirs.push(custom_dir);
        }

        Ok(Config {
            form: args.form,
            values,
            user_policy_dir,
            workspace_policy_dirs,
            today: args
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            json: args.json,
            list: args.list,
            log_level: args.log_level,
        })
    }
}

/// Parse repeated `KEY=VALUE` arguments
fn parse_values(raw: &[String]) -> Result<FormValues> {
    let mut values = FormValues::new();
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            bail!("Invalid --set value '{}': expected KEY=VALUE", item);
        };
        if key.trim().is_empty() {
            bail!("Invalid --set value '{}': empty field name", item);
        }
        values.set(key.trim(), value);
    }
    Ok(values)
}
