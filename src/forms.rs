//! Typed Form Records
//!
//! One explicit record per application form, convertible to and from the
//! untyped [`FormValues`] the controller works with. Field names match the
//! embedded policies.

use crate::core::FormValues;
use crate::stats;

/// A typed view of one form's values
pub trait FormRecord: Sized {
    /// Name of the policy validating this form
    const POLICY: &'static str;

    fn to_values(&self) -> FormValues;
    fn from_values(values: &FormValues) -> Self;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormData {
    pub correo_institucional: String,
    pub contrasena: String,
}

impl FormRecord for LoginFormData {
    const POLICY: &'static str = "login";

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("correo_institucional", &self.correo_institucional)
            .with("contrasena", &self.contrasena)
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            correo_institucional: values.value("correo_institucional").to_string(),
            contrasena: values.value("contrasena").to_string(),
        }
    }
}

/// Account registration from the register screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFormData {
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub grupo: String,
    pub telefono: String,
    pub facebook: String,
    pub instagram: String,
    pub correo_institucional: String,
    pub correo_personal: String,
    pub direccion: String,
    pub calle: String,
    pub estado: String,
    pub municipio: String,
    pub colonia: String,
    /// Picked image URI, empty until chosen
    pub foto: String,
    pub contrasena: String,
    pub confirmar_contrasena: String,
}

impl RegisterFormData {
    const FIELDS: [&'static str; 17] = [
        "nombre",
        "apellido_paterno",
        "apellido_materno",
        "grupo",
        "telefono",
        "facebook",
        "instagram",
        "correo_institucional",
        "correo_personal",
        "direccion",
        "calle",
        "estado",
        "municipio",
        "colonia",
        "foto",
        "contrasena",
        "confirmar_contrasena",
    ];

    fn fields(&self) -> [&String; 17] {
        [
            &self.nombre,
            &self.apellido_paterno,
            &self.apellido_materno,
            &self.grupo,
            &self.telefono,
            &self.facebook,
            &self.instagram,
            &self.correo_institucional,
            &self.correo_personal,
            &self.direccion,
            &self.calle,
            &self.estado,
            &self.municipio,
            &self.colonia,
            &self.foto,
            &self.contrasena,
            &self.confirmar_contrasena,
        ]
    }
}

impl FormRecord for RegisterFormData {
    const POLICY: &'static str = "register";

    fn to_values(&self) -> FormValues {
        Self::FIELDS.into_iter().zip(self.fields()).collect()
    }

    fn from_values(values: &FormValues) -> Self {
        let get = |name: &str| values.value(name).to_string();
        Self {
            nombre: get("nombre"),
            apellido_paterno: get("apellido_paterno"),
            apellido_materno: get("apellido_materno"),
            grupo: get("grupo"),
            telefono: get("telefono"),
            facebook: get("facebook"),
            instagram: get("instagram"),
            correo_institucional: get("correo_institucional"),
            correo_personal: get("correo_personal"),
            direccion: get("direccion"),
            calle: get("calle"),
            estado: get("estado"),
            municipio: get("municipio"),
            colonia: get("colonia"),
            foto: get("foto"),
            contrasena: get("contrasena"),
            confirmar_contrasena: get("confirmar_contrasena"),
        }
    }
}

/// Enrollment record for a student
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
    /// `DD/MM/YYYY`
    pub birth_date: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    /// Photo URI, empty until chosen
    pub photo: String,
}

impl FormRecord for StudentFormData {
    const POLICY: &'static str = "student_registration";

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("first_name", &self.first_name)
            .with("last_name", &self.last_name)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("student_id", &self.student_id)
            .with("birth_date", &self.birth_date)
            .with("address", &self.address)
            .with("emergency_contact", &self.emergency_contact)
            .with("emergency_phone", &self.emergency_phone)
            .with("photo", &self.photo)
    }

    fn from_values(values: &FormValues) -> Self {
        let get = |name: &str| values.value(name).to_string();
        Self {
            first_name: get("first_name"),
            last_name: get("last_name"),
            email: get("email"),
            phone: get("phone"),
            student_id: get("student_id"),
            birth_date: get("birth_date"),
            address: get("address"),
            emergency_contact: get("emergency_contact"),
            emergency_phone: get("emergency_phone"),
            photo: get("photo"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordRecoveryData {
    pub correo: String,
}

impl FormRecord for PasswordRecoveryData {
    const POLICY: &'static str = "password_recovery";

    fn to_values(&self) -> FormValues {
        FormValues::new().with("correo", &self.correo)
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            correo: values.value("correo").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetData {
    pub nueva_contrasena: String,
    pub confirmar_contrasena: String,
}

impl FormRecord for PasswordResetData {
    const POLICY: &'static str = "password_reset";

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("nueva_contrasena", &self.nueva_contrasena)
            .with("confirmar_contrasena", &self.confirmar_contrasena)
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            nueva_contrasena: values.value("nueva_contrasena").to_string(),
            confirmar_contrasena: values.value("confirmar_contrasena").to_string(),
        }
    }
}

/// Absence report sent to the student's director, tutor and teacher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFormData {
    pub director_email: String,
    pub tutor_email: String,
    pub teacher_email: String,
    pub additional_reason: String,
}

impl FormRecord for ReportFormData {
    const POLICY: &'static str = "report_student";

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("director_email", &self.director_email)
            .with("tutor_email", &self.tutor_email)
            .with("teacher_email", &self.teacher_email)
            .with("additional_reason", &self.additional_reason)
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            director_email: values.value("director_email").to_string(),
            tutor_email: values.value("tutor_email").to_string(),
            teacher_email: values.value("teacher_email").to_string(),
            additional_reason: values.value("additional_reason").to_string(),
        }
    }
}

/// Star ratings (0 = unrated, 1..=5) given to a teacher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFormData {
    pub teaching_quality: u8,
    pub attitude_and_treatment: u8,
    pub punctuality: u8,
    pub course_organization: u8,
    pub availability: u8,
    pub course_difficulty: u8,
    pub additional_comments: String,
}

impl ReviewFormData {
    pub fn ratings(&self) -> [u8; 6] {
        [
            self.teaching_quality,
            self.attitude_and_treatment,
            self.punctuality,
            self.course_organization,
            self.availability,
            self.course_difficulty,
        ]
    }

    /// Average over rated categories, `None` while nothing is rated
    pub fn average(&self) -> Option<f64> {
        stats::review_average(&self.ratings())
    }
}
