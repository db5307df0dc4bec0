//! Policy loading from directories
use std::fs;

use siapu_core::policy::{PolicyLoader, PolicyPriority};
use siapu_core::{validate_form, FormValues};
use tempfile::TempDir;

const CUSTOM_LOGIN: &str = r#"
[form]
name = "login"
description = "Login local"

[[fields]]
name = "matricula"
kind = "text"
constraints = { min_length = 8 }
"#;

#[tokio::test]
async fn test_builtin_policies_without_directories() {
    let loader = PolicyLoader::with_dirs(Vec::new());
    let policies = loader.load_all().await.expect("load");

    let login = policies.get("login").expect("login policy");
    assert_eq!(login.priority, PolicyPriority::BuiltIn);
    assert!(login.source_path.is_none());
    assert_eq!(policies.len(), 6);
}

#[tokio::test]
async fn test_directory_policy_overrides_builtin() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("login.toml");
    fs::write(&path, CUSTOM_LOGIN).expect("write policy");

    let loader = PolicyLoader::with_dirs(vec![dir.path().to_path_buf()]);
    let policies = loader.load_all().await.expect("load");

    let login = &policies["login"];
    assert_eq!(login.priority, PolicyPriority::Workspace);
    assert_eq!(login.source_path.as_deref(), Some(path.as_path()));
    assert_eq!(login.policy.description.as_deref(), Some("Login local"));

    let registry = loader.load_registry().await.expect("registry");
    let errors = validate_form(
        &FormValues::new().with("matricula", "1234"),
        registry.get("login").unwrap(),
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );
    assert_eq!(
        errors.message("matricula"),
        Some("Debe tener al menos 8 caracteres")
    );
}

#[tokio::test]
async fn test_broken_files_are_skipped() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("broken.toml"), "[form\nname = ").expect("write");
    fs::write(
        dir.path().join("dangling.toml"),
        r#"
[form]
name = "dangling"

[[fields]]
name = "confirmar"
kind = "confirmation"
constraints = { matches = "nada" }
"#,
    )
    .expect("write");
    fs::write(dir.path().join("notes.txt"), "not a policy").expect("write");
    fs::write(
        dir.path().join("tutorias.toml"),
        r#"
[form]
name = "tutorias"

[[fields]]
name = "tema"
kind = "text"
"#,
    )
    .expect("write");

    let loader = PolicyLoader::with_dirs(vec![dir.path().to_path_buf()]);
    let registry = loader.load_registry().await.expect("registry");

    assert!(registry.get("tutorias").is_some());
    assert!(registry.get("dangling").is_none());
    assert_eq!(registry.len(), 7);
}

#[tokio::test]
async fn test_later_directory_wins_at_same_priority() {
    let first = TempDir::new().expect("temp dir");
    let second = TempDir::new().expect("temp dir");
    fs::write(first.path().join("login.toml"), CUSTOM_LOGIN).expect("write");
    fs::write(
        second.path().join("login.toml"),
        CUSTOM_LOGIN.replace("Login local", "Login del proyecto"),
    )
    .expect("write");

    let loader = PolicyLoader::with_dirs(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    let registry = loader.load_registry().await.expect("registry");
    assert_eq!(
        registry.get("login").unwrap().description.as_deref(),
        Some("Login del proyecto")
    );
}

#[tokio::test]
async fn test_missing_directory_is_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let loader = PolicyLoader::with_dirs(vec![dir.path().join("does-not-exist")]);
    assert_eq!(loader.load_all().await.expect("load").len(), 6);
}
