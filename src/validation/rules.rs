//! Field Validators
//!
//! Total, deterministic checks for single field values. Each returns the
//! first problem found; whitespace-only input counts as empty.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::core::FieldError;
use crate::policy::PasswordPolicy;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"));

static PHONE_SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("phone separator pattern"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern"));

/// Characters that count as "special" in a password
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required(message: &str) -> FieldError {
    FieldError::RequiredFieldMissing(message.to_string())
}

/// Does the value look like `local@domain.tld`
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("El correo electrónico es obligatorio"));
    }
    if !is_email(value) {
        return Err(FieldError::InvalidFormat(
            "Ingresa un correo electrónico válido".to_string(),
        ));
    }
    Ok(())
}

/// Email whose domain must be exactly `allowed_domain`
pub fn validate_domain_restricted_email(
    value: &str,
    allowed_domain: &str,
) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("El correo electrónico es obligatorio"));
    }
    if !is_email(value) {
        return Err(FieldError::InvalidFormat(
            "Por favor ingresa un correo válido".to_string(),
        ));
    }

    let domain = value.split_once('@').map(|(_, d)| d).unwrap_or("");
    if domain != allowed_domain {
        return Err(FieldError::PolicyViolation(format!(
            "Solo se permiten correos institucionales @{}",
            allowed_domain
        )));
    }
    Ok(())
}

/// A single password requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl PasswordRule {
    /// All rules, in the order they are reported
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::MinLength,
        PasswordRule::Lowercase,
        PasswordRule::Uppercase,
        PasswordRule::Digit,
        PasswordRule::Special,
    ];

    pub fn is_satisfied(self, value: &str, min_length: usize) -> bool {
        match self {
            PasswordRule::MinLength => value.chars().count() >= min_length,
            PasswordRule::Lowercase => value.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::Uppercase => value.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::Digit => value.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::Special => value.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// Whether the policy enforces this rule at validation time
    pub fn is_enforced(self, policy: &PasswordPolicy) -> bool {
        match self {
            PasswordRule::MinLength => true,
            PasswordRule::Lowercase => policy.require_lower,
            PasswordRule::Uppercase => policy.require_upper,
            PasswordRule::Digit => policy.require_digit,
            PasswordRule::Special => policy.require_special,
        }
    }

    /// Short hint shown next to a strength meter
    pub fn hint(self, min_length: usize) -> String {
        match self {
            PasswordRule::MinLength => format!("Al menos {} caracteres", min_length),
            PasswordRule::Lowercase => "Una letra minúscula".to_string(),
            PasswordRule::Uppercase => "Una letra mayúscula".to_string(),
            PasswordRule::Digit => "Un número".to_string(),
            PasswordRule::Special => "Un carácter especial".to_string(),
        }
    }

    fn violation(self, min_length: usize) -> String {
        match self {
            PasswordRule::MinLength => format!(
                "La contraseña debe tener al menos {} caracteres",
                min_length
            ),
            PasswordRule::Lowercase => "La contraseña debe incluir una letra minúscula".to_string(),
            PasswordRule::Uppercase => "La contraseña debe incluir una letra mayúscula".to_string(),
            PasswordRule::Digit => "La contraseña debe incluir un número".to_string(),
            PasswordRule::Special => "La contraseña debe incluir un carácter especial".to_string(),
        }
    }
}

pub fn validate_password(value: &str, policy: &PasswordPolicy) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("La contraseña es obligatoria"));
    }

    PasswordRule::ALL
        .into_iter()
        .filter(|rule| rule.is_enforced(policy))
        .find(|rule| !rule.is_satisfied(value, policy.min_length))
        .map_or(Ok(()), |rule| {
            Err(FieldError::PolicyViolation(rule.violation(policy.min_length)))
        })
}

pub fn validate_confirmation(value: &str, original: &str) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("Debes confirmar la contraseña"));
    }
    if value != original {
        return Err(FieldError::Mismatch(
            "Las contraseñas no coinciden".to_string(),
        ));
    }
    Ok(())
}

/// Phone number; spaces, dashes and parentheses are ignored
pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("El teléfono es obligatorio"));
    }
    let cleaned = PHONE_SEPARATORS_RE.replace_all(value, "");
    if !PHONE_RE.is_match(&cleaned) {
        return Err(FieldError::InvalidFormat(
            "Ingresa un número de teléfono válido".to_string(),
        ));
    }
    Ok(())
}

/// Birth date as `DD/MM/YYYY`, with the age bounded by `min_age..=max_age`
///
/// Age is the difference of calendar years, matching how the registration
/// screens have always computed it.
pub fn validate_date(
    value: &str,
    today: NaiveDate,
    min_age: i32,
    max_age: i32,
) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("La fecha de nacimiento es obligatoria"));
    }

    let invalid = || FieldError::InvalidFormat("Formato de fecha inválido (DD/MM/AAAA)".to_string());
    if !DATE_RE.is_match(value) {
        return Err(invalid());
    }
    let birth = NaiveDate::parse_from_str(value, "%d/%m/%Y").map_err(|_| invalid())?;

    let age = today.year() - birth.year();
    if age < min_age || age > max_age {
        return Err(FieldError::PolicyViolation(format!(
            "La edad debe estar entre {} y {} años",
            min_age, max_age
        )));
    }
    Ok(())
}

/// Free text that must be present, optionally with a minimum trimmed length
pub fn validate_required_text(value: &str, min_length: Option<usize>) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(required("Este campo es obligatorio"));
    }
    if let Some(min) = min_length {
        if value.trim().chars().count() < min {
            return Err(FieldError::PolicyViolation(format!(
                "Debe tener al menos {} caracteres",
                min
            )));
        }
    }
    Ok(())
}
