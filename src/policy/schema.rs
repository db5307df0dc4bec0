//! Policy Schema Types
//!
//! Form policies as written in TOML: which fields a form has, which validator
//! each one uses, and the parameters of those validators.

use serde::Deserialize;
use thiserror::Error;

/// Root policy file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PolicyFile {
    pub form: FormMeta,
    #[serde(default)]
    pub password: PasswordPolicy,
    pub fields: Vec<FieldDef>,
}

/// Form metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FormMeta {
    pub name: String,
    pub description: Option<String>,
}

/// Runtime policy handed to validators and controllers
#[derive(Debug, Clone, PartialEq)]
pub struct FormPolicy {
    pub name: String,
    pub description: Option<String>,
    pub password: PasswordPolicy,
    /// Field definitions in display order
    pub fields: Vec<FieldDef>,
}

/// Password requirements
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_upper: bool,
    pub require_lower: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_upper: false,
            require_lower: false,
            require_digit: false,
            require_special: false,
        }
    }
}

impl PasswordPolicy {
    /// Eight characters with every character class required
    pub fn strict() -> Self {
        Self {
            min_length: 8,
            require_upper: true,
            require_lower: true,
            require_digit: true,
            require_special: true,
        }
    }
}

/// Validator applied to a field
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    InstitutionalEmail,
    Password,
    Confirmation,
    Phone,
    Date,
}

/// Field definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
    pub label: Option<String>,
    #[serde(default)]
    pub constraints: FieldConstraints,
    #[serde(default)]
    pub messages: FieldMessages,
}

fn default_required() -> bool {
    true
}

/// Per-field validator parameters
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FieldConstraints {
    pub min_length: Option<usize>,
    pub domain: Option<String>,
    pub matches: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

/// Message overrides, by error kind
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FieldMessages {
    pub required: Option<String>,
    pub invalid: Option<String>,
    pub mismatch: Option<String>,
    pub policy: Option<String>,
}

/// Inconsistent policy definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Field '{field}' of kind {kind:?} requires constraint '{constraint}'")]
    MissingConstraint {
        field: String,
        kind: FieldKind,
        constraint: &'static str,
    },

    #[error("Field '{field}' refers to unknown field '{target}'")]
    UnknownReference { field: String, target: String },

    #[error("Field '{0}' is defined more than once")]
    DuplicateField(String),

    #[error("Field '{field}' has min_age {min_age} above max_age {max_age}")]
    InvalidAgeRange {
        field: String,
        min_age: i32,
        max_age: i32,
    },
}

impl TryFrom<PolicyFile> for FormPolicy {
    type Error = PolicyError;

    fn try_from(file: PolicyFile) -> Result<Self, Self::Error> {
        let policy = Self {
            name: file.form.name,
            description: file.form.description,
            password: file.password,
            fields: file.fields,
        };
        policy.check()?;
        Ok(policy)
    }
}

impl FormPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            password: PasswordPolicy::default(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_password_policy(mut self, password: PasswordPolicy) -> Self {
        self.password = password;
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get required fields
    pub fn required_fields(&self) -> Vec<&FieldDef> {
        self.fields.iter().filter(|f| f.required).collect()
    }

    /// First password field, if the form has one
    pub fn password_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.kind == FieldKind::Password)
    }

    /// Check that every field has the constraints its kind needs
    pub fn check(&self) -> Result<(), PolicyError> {
        for (idx, field) in self.fields.iter().enumerate() {
            if self.fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(PolicyError::DuplicateField(field.name.clone()));
            }

            match field.kind {
                FieldKind::InstitutionalEmail if field.constraints.domain.is_none() => {
                    return Err(field.missing("domain"));
                }
                FieldKind::Confirmation => {
                    let target = field
                        .constraints
                        .matches
                        .as_ref()
                        .ok_or_else(|| field.missing("matches"))?;
                    if self.field(target).is_none() {
                        return Err(PolicyError::UnknownReference {
                            field: field.name.clone(),
                            target: target.clone(),
                        });
                    }
                }
                FieldKind::Date => {
                    let (min_age, max_age) = field.age_range();
                    if min_age > max_age {
                        return Err(PolicyError::InvalidAgeRange {
                            field: field.name.clone(),
                            min_age,
                            max_age,
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            label: None,
            constraints: FieldConstraints::default(),
            messages: FieldMessages::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.constraints.min_length = Some(min_length);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.constraints.domain = Some(domain.into());
        self
    }

    pub fn matching(mut self, other: impl Into<String>) -> Self {
        self.constraints.matches = Some(other.into());
        self
    }

    pub fn with_age_range(mut self, min_age: i32, max_age: i32) -> Self {
        self.constraints.min_age = Some(min_age);
        self.constraints.max_age = Some(max_age);
        self
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.messages.required = Some(message.into());
        self
    }

    pub fn with_invalid_message(mut self, message: impl Into<String>) -> Self {
        self.messages.invalid = Some(message.into());
        self
    }

    /// Age bounds for date fields, 16 to 100 unless configured
    pub fn age_range(&self) -> (i32, i32) {
        (
            self.constraints.min_age.unwrap_or(16),
            self.constraints.max_age.unwrap_or(100),
        )
    }

    fn missing(&self, constraint: &'static str) -> PolicyError {
        PolicyError::MissingConstraint {
            field: self.name.clone(),
            kind: self.kind,
            constraint,
        }
    }
}
