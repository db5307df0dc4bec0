//! Form Checker CLI
//!
//! Validates `KEY=VALUE` inputs against a named policy and reports the
//! result as text or JSON.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Config;
use crate::core::{ErrorKind, FormValues};
use crate::policy::{FormPolicy, PolicyLoader, PolicyRegistry};
use crate::stats;
use crate::validation::validate_form;

/// One invalid field in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthEntry {
    pub field: String,
    pub score: u8,
    pub label: &'static str,
    pub missing: Vec<String>,
}

/// Validation outcome for one form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormReport {
    pub form: String,
    pub valid: bool,
    pub errors: Vec<ErrorEntry>,
    pub password_strength: Option<StrengthEntry>,
}

/// Entry point used by the `siapu-check` binary
pub async fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    let registry = PolicyLoader::new(&config).load_registry().await?;
    let mut stdout = std::io::stdout().lock();
    let valid = execute(&config, &registry, &mut stdout)?;

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run the configured command, returning whether the input was valid
pub fn execute(config: &Config, registry: &PolicyRegistry, out: &mut impl Write) -> Result<bool> {
    if config.list {
        for name in registry.list_policies() {
            let description = registry
                .get(name)
                .and_then(|p| p.description.as_deref())
                .unwrap_or("");
            writeln!(out, "{:<24} {}", name, description)?;
        }
        return Ok(true);
    }

    let form = config
        .form
        .as_deref()
        .ok_or_else(|| anyhow!("No form given; use --form NAME or --list"))?;
    let policy = registry.get(form).ok_or_else(|| {
        anyhow!(
            "Unknown form '{}'; available: {}",
            form,
            registry.list_policies().join(", ")
        )
    })?;

    let report = build_report(policy, &config.values, config.today);
    if config.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        writeln!(out, "{}", json)?;
    } else {
        write_text_report(&report, out)?;
    }

    Ok(report.valid)
}

/// Validate values against a policy
pub fn build_report(policy: &FormPolicy, values: &FormValues, today: NaiveDate) -> FormReport {
    let errors = validate_form(values, policy, today);

    let password_strength = policy.password_field().map(|field| {
        let strength = stats::password_strength(values.value(&field.name), &policy.password);
        StrengthEntry {
            field: field.name.clone(),
            score: strength.score,
            label: strength.label(),
            missing: strength.missing,
        }
    });

    // Report in policy order rather than alphabetically
    let errors: Vec<ErrorEntry> = policy
        .fields
        .iter()
        .filter_map(|field| {
            errors.get(&field.name).map(|error| ErrorEntry {
                field: field.name.clone(),
                kind: error.kind(),
                message: error.message().to_string(),
            })
        })
        .collect();

    FormReport {
        form: policy.name.clone(),
        valid: errors.is_empty(),
        errors,
        password_strength,
    }
}

fn write_text_report(report: &FormReport, out: &mut impl Write) -> Result<()> {
    if report.valid {
        writeln!(out, "{}: ok", report.form)?;
    } else {
        writeln!(out, "{}: {} error(s)", report.form, report.errors.len())?;
        for entry in &report.errors {
            writeln!(out, "  {}: {}", entry.field, entry.message)?;
        }
    }

    if let Some(strength) = &report.password_strength {
        writeln!(
            out,
            "  {} strength: {} ({}/5)",
            strength.field, strength.label, strength.score
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(form: Option<&str>, values: FormValues) -> Config {
        Config {
            form: form.map(str::to_string),
            values,
            user_policy_dir: None,
            workspace_policy_dirs: Vec::<PathBuf>::new(),
            today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            json: false,
            list: false,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_text_report_lists_errors_in_policy_order() {
        let registry = PolicyRegistry::with_embedded_policies();
        let config = config(
            Some("login"),
            FormValues::new().with("correo_institucional", "alumno"),
        );

        let mut out = Vec::new();
        let valid = execute(&config, &registry, &mut out).expect("execute");
        let text = String::from_utf8(out).unwrap();

        assert!(!valid);
        assert_eq!(
            text,
            "login: 2 error(s)\n  correo_institucional: Ingresa un correo válido\n  contrasena: La contraseña es obligatoria\n  contrasena strength: Débil (0/5)\n"
        );
    }

    #[test]
    fn test_json_report() {
        let registry = PolicyRegistry::with_embedded_policies();
        let mut config = config(
            Some("password_recovery"),
            FormValues::new().with("correo", "a@gmail.com"),
        );
        config.json = true;

        let mut out = Vec::new();
        assert!(!execute(&config, &registry, &mut out).expect("execute"));

        let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(json["form"], "password_recovery");
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["kind"], "policy_violation");
        assert!(json["password_strength"].is_null());
    }

    #[test]
    fn test_list_policies() {
        let registry = PolicyRegistry::with_embedded_policies();
        let mut config = config(None, FormValues::new());
        config.list = true;

        let mut out = Vec::new();
        assert!(execute(&config, &registry, &mut out).expect("execute"));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), registry.len());
        assert!(text.starts_with("login "));
    }

    #[test]
    fn test_unknown_form_is_an_error() {
        let registry = PolicyRegistry::with_embedded_policies();
        let config = config(Some("calendario"), FormValues::new());
        let err = execute(&config, &registry, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Unknown form 'calendario'"));
    }
}
