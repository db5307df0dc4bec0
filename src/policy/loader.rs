//! Policy loading from disk.
//!
//! This module handles:
//! - Loading policy definitions from TOML files
//! - Loading priority: built-in < user-global < workspace
//! - Error handling: broken files are logged and skipped

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::registry::PolicyRegistry;
use super::schema::{FormPolicy, PolicyFile};
use crate::config::Config;

/// Represents the loading priority of policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PolicyPriority {
    BuiltIn = 0,
    UserGlobal = 1,
    Workspace = 2,
}

/// A loaded policy with its source and priority
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    pub policy: FormPolicy,
    pub priority: PolicyPriority,
    pub source_path: Option<PathBuf>,
}

/// Collects policies from the embedded set and policy directories
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    sources: Vec<(PathBuf, PolicyPriority)>,
}

impl PolicyLoader {
    /// Create a loader for the directories named in the configuration
    pub fn new(config: &Config) -> Self {
        let mut sources = Vec::new();
        if let Some(dir) = &config.user_policy_dir {
            sources.push((dir.clone(), PolicyPriority::UserGlobal));
        }
        for dir in &config.workspace_policy_dirs {
            sources.push((dir.clone(), PolicyPriority::Workspace));
        }
        Self { sources }
    }

    /// Loader over explicit directories, all at workspace priority
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            sources: dirs
                .into_iter()
                .map(|dir| (dir, PolicyPriority::Workspace))
                .collect(),
        }
    }

    /// Load built-in policies, then every configured directory
    pub async fn load_all(&self) -> Result<HashMap<String, LoadedPolicy>> {
        let mut policies = HashMap::new();

        let builtin = PolicyRegistry::with_embedded_policies();
        for name in builtin.list_policies() {
            if let Some(policy) = builtin.get(name) {
                insert_by_priority(
                    &mut policies,
                    LoadedPolicy {
                        policy: policy.clone(),
                        priority: PolicyPriority::BuiltIn,
                        source_path: None,
                    },
                );
            }
        }

        for (dir, priority) in &self.sources {
            self.load_from_directory(dir, *priority, &mut policies)
                .await?;
        }

        log::info!("Loaded {} form policies", policies.len());
        Ok(policies)
    }

    /// Load everything into a registry
    pub async fn load_registry(&self) -> Result<PolicyRegistry> {
        let mut registry = PolicyRegistry::new();
        for (_, loaded) in self.load_all().await? {
            registry.add_policy(loaded.policy);
        }
        Ok(registry)
    }

    async fn load_from_directory(
        &self,
        dir: &Path,
        priority: PolicyPriority,
        policies: &mut HashMap<String, LoadedPolicy>,
    ) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read policy directory: {}", dir.display()))?;

        // Sorted so that overrides within one directory are deterministic
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            match load_policy_file(&path).await {
                Ok(policy) => {
                    log::debug!("Loaded policy '{}' from {}", policy.name, path.display());
                    insert_by_priority(
                        policies,
                        LoadedPolicy {
                            policy,
                            priority,
                            source_path: Some(path),
                        },
                    );
                }
                Err(e) => {
                    log::error!("Failed to load policy file {}: {:#}", path.display(), e);
                }
            }
        }

        Ok(())
    }
}

/// Load a single policy file
pub async fn load_policy_file(path: &Path) -> Result<FormPolicy> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
    parse_policy_content(&content)
        .with_context(|| format!("Invalid policy file: {}", path.display()))
}

/// Parse policy TOML
pub fn parse_policy_content(content: &str) -> Result<FormPolicy> {
    let file: PolicyFile = toml::from_str(content).context("Failed to parse policy TOML")?;
    let policy = FormPolicy::try_from(file)?;
    Ok(policy)
}

fn insert_by_priority(policies: &mut HashMap<String, LoadedPolicy>, loaded: LoadedPolicy) {
    let replace = policies
        .get(&loaded.policy.name)
        .is_none_or(|existing| loaded.priority >= existing.priority);
    if replace {
        policies.insert(loaded.policy.name.clone(), loaded);
    }
}
