//! Policy Registry
//!
//! In-memory lookup of form policies by name.

use super::schema::{FieldDef, FieldKind, FormPolicy, PolicyFile};
use std::collections::HashMap;

/// Policies shipped inside the binary
const EMBEDDED_POLICIES: &[(&str, &str)] = &[
    ("login", include_str!("../../resources/policies/login.toml")),
    ("register", include_str!("../../resources/policies/register.toml")),
    (
        "student_registration",
        include_str!("../../resources/policies/student_registration.toml"),
    ),
    (
        "password_recovery",
        include_str!("../../resources/policies/password_recovery.toml"),
    ),
    (
        "password_reset",
        include_str!("../../resources/policies/password_reset.toml"),
    ),
    (
        "report_student",
        include_str!("../../resources/policies/report_student.toml"),
    ),
];

/// Simple in-memory policy registry
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, FormPolicy>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Registry preloaded with every embedded policy
    pub fn with_embedded_policies() -> Self {
        let mut registry = Self::new();
        registry.add_embedded_policies();
        registry
    }

    /// Add a policy, replacing any policy with the same name
    pub fn add_policy(&mut self, policy: FormPolicy) {
        self.policies.insert(policy.name.clone(), policy);
    }

    pub fn get(&self, name: &str) -> Option<&FormPolicy> {
        self.policies.get(name)
    }

    /// List all available policy names, sorted
    pub fn list_policies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Parse and add the policies embedded in the binary
    pub fn add_embedded_policies(&mut self) {
        for (name, content) in EMBEDDED_POLICIES {
            let parsed = toml::from_str::<PolicyFile>(content)
                .map_err(|e| e.to_string())
                .and_then(|file| FormPolicy::try_from(file).map_err(|e| e.to_string()));

            match parsed {
                Ok(policy) => self.add_policy(policy),
                Err(e) if *name == "login" => {
                    log::warn!(
                        "Failed to parse embedded login policy: {}. Using minimal fallback.",
                        e
                    );
                    self.add_minimal_login_policy();
                }
                Err(e) => {
                    log::warn!("Failed to parse embedded policy '{}': {}", name, e);
                }
            }
        }
    }

    /// Minimal login policy used when the embedded one cannot be parsed
    fn add_minimal_login_policy(&mut self) {
        let policy = FormPolicy::new("login")
            .with_description("Minimal fallback login policy")
            .with_field(FieldDef::new("correo_institucional", FieldKind::Email))
            .with_field(FieldDef::new("contrasena", FieldKind::Password));
        self.add_policy(policy);
    }
}
