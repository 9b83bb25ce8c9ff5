//! Client-side logic of a clinic prescription record system: form
//! validation, date helpers, list filtering and report aggregation over
//! records fetched from the backend.

pub mod commands;
pub mod config;
pub mod filter;
pub mod forms;
pub mod models;
pub mod reports;
pub mod store;
pub mod utils;
