//! Validation Engine
//!
//! Applies a [`FormPolicy`] to a set of form values and collects one error per
//! invalid field.

use chrono::NaiveDate;

use super::rules::{
    is_blank, validate_confirmation, validate_date, validate_domain_restricted_email,
    validate_email, validate_password, validate_phone, validate_required_text,
};
use crate::core::{ErrorMap, FieldError, FormValues};
use crate::policy::{FieldDef, FieldKind, FormPolicy, PasswordPolicy};

/// Everything a rule may look at besides the field's own value
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub values: &'a FormValues,
    pub password: &'a PasswordPolicy,
    pub today: NaiveDate,
}

/// A rule maps a value to zero or one error
pub type ValidationRule = fn(&str, &FieldDef, &ValidationContext<'_>) -> Option<FieldError>;

impl<'a> ValidationContext<'a> {
    pub fn new(values: &'a FormValues, password: &'a PasswordPolicy, today: NaiveDate) -> Self {
        Self {
            values,
            password,
            today,
        }
    }
}

/// Pick the rule implementing a field kind
pub fn rule_for(kind: FieldKind) -> ValidationRule {
    match kind {
        FieldKind::Text => text_rule,
        FieldKind::Email => email_rule,
        FieldKind::InstitutionalEmail => institutional_email_rule,
        FieldKind::Password => password_rule,
        FieldKind::Confirmation => confirmation_rule,
        FieldKind::Phone => phone_rule,
        FieldKind::Date => date_rule,
    }
}

fn text_rule(value: &str, field: &FieldDef, _: &ValidationContext<'_>) -> Option<FieldError> {
    validate_required_text(value, field.constraints.min_length).err()
}

fn email_rule(value: &str, _: &FieldDef, _: &ValidationContext<'_>) -> Option<FieldError> {
    validate_email(value).err()
}

fn institutional_email_rule(
    value: &str,
    field: &FieldDef,
    _: &ValidationContext<'_>,
) -> Option<FieldError> {
    let domain = field.constraints.domain.as_deref().unwrap_or("");
    validate_domain_restricted_email(value, domain).err()
}

fn password_rule(value: &str, _: &FieldDef, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    validate_password(value, ctx.password).err()
}

fn confirmation_rule(
    value: &str,
    field: &FieldDef,
    ctx: &ValidationContext<'_>,
) -> Option<FieldError> {
    let original = field
        .constraints
        .matches
        .as_deref()
        .map(|name| ctx.values.value(name))
        .unwrap_or("");
    validate_confirmation(value, original).err()
}

fn phone_rule(value: &str, _: &FieldDef, _: &ValidationContext<'_>) -> Option<FieldError> {
    validate_phone(value).err()
}

fn date_rule(value: &str, field: &FieldDef, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    let (min_age, max_age) = field.age_range();
    validate_date(value, ctx.today, min_age, max_age).err()
}

/// Validate one field, applying the policy's message overrides
pub fn validate_field(field: &FieldDef, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    let value = ctx.values.value(&field.name);

    // Optional fields are only checked once something was typed
    if !field.required && is_blank(value) {
        return None;
    }

    let error = rule_for(field.kind)(value, field, ctx)?;
    let messages = &field.messages;
    let custom = match &error {
        FieldError::RequiredFieldMissing(_) => messages.required.as_ref(),
        FieldError::InvalidFormat(_) => messages.invalid.as_ref(),
        FieldError::Mismatch(_) => messages.mismatch.as_ref(),
        FieldError::PolicyViolation(_) => messages.policy.as_ref(),
    };
    Some(match custom {
        Some(message) => error.with_message(message.clone()),
        None => error,
    })
}

/// Validate an entire form
pub fn validate_form(values: &FormValues, policy: &FormPolicy, today: NaiveDate) -> ErrorMap {
    let ctx = ValidationContext::new(values, &policy.password, today);
    let mut errors = ErrorMap::new();

    for field in &policy.fields {
        if let Some(error) = validate_field(field, &ctx) {
            errors.add_error(field.name.clone(), error);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn login_policy() -> FormPolicy {
        FormPolicy::new("login")
            .with_field(
                FieldDef::new("correo", FieldKind::Email)
                    .with_required_message("El correo institucional es obligatorio"),
            )
            .with_field(FieldDef::new("contrasena", FieldKind::Password))
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let values = FormValues::new()
            .with("correo", "alumno@universidad.edu")
            .with("contrasena", "passwordAlumno");
        assert!(validate_form(&values, &login_policy(), today()).is_valid());
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let values = FormValues::new().with("correo", "alumno@universidad");
        let errors = validate_form(&values, &login_policy(), today());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("correo").unwrap().kind(), ErrorKind::InvalidFormat);
        assert_eq!(
            errors.get("contrasena").unwrap().kind(),
            ErrorKind::RequiredFieldMissing
        );
    }

    #[test]
    fn test_custom_message_replaces_default() {
        let errors = validate_form(&FormValues::new(), &login_policy(), today());
        assert_eq!(
            errors.message("correo"),
            Some("El correo institucional es obligatorio")
        );
        assert_eq!(errors.message("contrasena"), Some("La contraseña es obligatoria"));
    }

    #[test]
    fn test_optional_field_skipped_when_blank() {
        let policy = FormPolicy::new("perfil")
            .with_field(FieldDef::new("correo_personal", FieldKind::Email).optional());

        let errors = validate_form(&FormValues::new(), &policy, today());
        assert!(errors.is_valid());

        let values = FormValues::new().with("correo_personal", "no-es-correo");
        let errors = validate_form(&values, &policy, today());
        assert_eq!(
            errors.get("correo_personal").map(|e| e.kind()),
            Some(ErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn test_confirmation_reads_other_field() {
        let policy = FormPolicy::new("reset")
            .with_password_policy(PasswordPolicy::strict())
            .with_field(FieldDef::new("nueva", FieldKind::Password))
            .with_field(FieldDef::new("confirmar", FieldKind::Confirmation).matching("nueva"));

        let values = FormValues::new()
            .with("nueva", "Secreto1!")
            .with("confirmar", "Secreto2!");
        let errors = validate_form(&values, &policy, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirmar").unwrap().kind(), ErrorKind::Mismatch);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let values = FormValues::new().with("correo", "bad");
        let first = validate_form(&values, &login_policy(), today());
        let second = validate_form(&values, &login_policy(), today());
        assert_eq!(first, second);
    }
}
