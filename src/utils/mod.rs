//! Pure helpers for form input: field validators and date formatting.

pub mod dates;
pub mod validation;
