//! Form validation
//!
//! Each form holds the raw text of its inputs, exactly as typed. Validation
//! either yields the typed request body sent to the backend, or a
//! [`FormErrors`] map with one message per failing field.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::{Credentials, Gender, Prescription, PrescriptionRequest, Registration};
use crate::utils::dates::{format_date, parse_date};
use crate::utils::validation::{
    parse_age, validate_age, validate_date_format, validate_email, validate_password,
    validate_prescription_date_at, validate_required,
};

pub const MAX_PATIENT_NAME_LEN: usize = 100;
pub const MIN_PATIENT_NAME_LEN: usize = 2;
pub const MAX_NOTES_LEN: usize = 2000;
pub const MIN_USERNAME_LEN: usize = 3;

/// Field-level validation failures, keyed by the form's field name.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Invalid input data: {} field(s) failed validation", .errors.len())]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// One `field: message` line per failing field, ordered by field name.
    pub fn messages(&self) -> Vec<String> {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect()
    }

    fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, FormErrors> {
        if !self.is_empty() {
            log::warn!("Form rejected: {}", self.messages().join("; "));
            return Err(self);
        }
        // Only reached once every field passed its check.
        value().ok_or(self)
    }
}

fn optional_text(value: &str) -> Option<String> {
    if validate_required(value) {
        Some(value.to_string())
    } else {
        None
    }
}

/// Raw state of the create/edit prescription form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionForm {
    pub prescription_date: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_gender: String,
    pub diagnosis: String,
    pub medicines: String,
    pub next_visit_date: String,
}

impl PrescriptionForm {
    /// A blank form with the prescription date pre-filled to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            prescription_date: format_date(today),
            ..Self::default()
        }
    }

    /// Loads an existing record for editing.
    pub fn from_prescription(prescription: &Prescription) -> Self {
        Self {
            prescription_date: format_date(prescription.prescription_date),
            patient_name: prescription.patient_name.clone(),
            patient_age: prescription.patient_age.to_string(),
            patient_gender: prescription.patient_gender.to_string(),
            diagnosis: prescription.diagnosis.clone().unwrap_or_default(),
            medicines: prescription.medicines.clone().unwrap_or_default(),
            next_visit_date: prescription
                .next_visit_date
                .map(format_date)
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<PrescriptionRequest, FormErrors> {
        self.validate_at(Local::now().naive_local())
    }

    /// Validates against an explicit local clock.
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<PrescriptionRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let prescription_date = parse_date(&self.prescription_date);
        if !validate_required(&self.prescription_date) {
            errors.insert("prescriptionDate", "Prescription date is required");
        } else if prescription_date.is_none() {
            errors.insert("prescriptionDate", "Prescription date is invalid");
        } else if !validate_prescription_date_at(&self.prescription_date, now) {
            errors.insert("prescriptionDate", "Prescription date cannot be in the future");
        }

        if !validate_required(&self.patient_name) {
            errors.insert("patientName", "Patient name is required");
        } else if self.patient_name.trim().chars().count() < MIN_PATIENT_NAME_LEN {
            errors.insert("patientName", "Patient name must be at least 2 characters");
        } else if self.patient_name.chars().count() > MAX_PATIENT_NAME_LEN {
            errors.insert("patientName", "Patient name must not exceed 100 characters");
        }

        if !validate_required(&self.patient_age) {
            errors.insert("patientAge", "Patient age is required");
        } else if !validate_age(&self.patient_age) {
            errors.insert("patientAge", "Patient age must be between 0 and 150");
        }

        let gender = self.patient_gender.parse::<Gender>();
        if !validate_required(&self.patient_gender) {
            errors.insert("patientGender", "Patient gender is required");
        } else if let Err(message) = gender {
            errors.insert("patientGender", message);
        }

        if self.diagnosis.chars().count() > MAX_NOTES_LEN {
            errors.insert("diagnosis", "Diagnosis must not exceed 2000 characters");
        }
        if self.medicines.chars().count() > MAX_NOTES_LEN {
            errors.insert("medicines", "Medicines must not exceed 2000 characters");
        }

        let next_visit_raw = self.next_visit_date.trim();
        let next_visit_date = parse_date(next_visit_raw);
        if !next_visit_raw.is_empty() {
            if !validate_date_format(next_visit_raw) || next_visit_date.is_none() {
                errors.insert("nextVisitDate", "Next visit date must be in YYYY-MM-DD format");
            } else if let (Some(next_visit), Some(prescribed)) = (next_visit_date, prescription_date)
            {
                if next_visit < prescribed {
                    errors.insert(
                        "nextVisitDate",
                        "Next visit date cannot be before prescription date",
                    );
                }
            }
        }

        errors.into_result(|| {
            Some(PrescriptionRequest {
                prescription_date: prescription_date?,
                patient_name: self.patient_name.clone(),
                patient_age: u8::try_from(parse_age(&self.patient_age)?).ok()?,
                patient_gender: gender.ok()?,
                diagnosis: optional_text(&self.diagnosis),
                medicines: optional_text(&self.medicines),
                next_visit_date,
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::default();

        if !validate_required(&self.username) {
            errors.insert("username", "Username is required");
        }
        if !validate_required(&self.password) {
            errors.insert("password", "Password is required");
        }

        errors.into_result(|| {
            Some(Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// The confirmation field is checked here and never sent.
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();

        if !validate_required(&self.username) {
            errors.insert("username", "Username is required");
        } else if self.username.chars().count() < MIN_USERNAME_LEN {
            errors.insert("username", "Username must be at least 3 characters");
        }

        if !validate_required(&self.full_name) {
            errors.insert("fullName", "Full name is required");
        }

        if !validate_required(&self.email) {
            errors.insert("email", "Email is required");
        } else if !validate_email(&self.email) {
            errors.insert("email", "Invalid email format");
        }

        if !validate_required(&self.password) {
            errors.insert("password", "Password is required");
        } else if !validate_password(&self.password) {
            errors.insert("password", "Password must be at least 6 characters");
        }

        if !validate_required(&self.confirm_password) {
            errors.insert("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        errors.into_result(|| {
            Some(Registration {
                username: self.username.clone(),
                password: self.password.clone(),
                full_name: self.full_name.clone(),
                email: self.email.clone(),
            })
        })
    }
}
