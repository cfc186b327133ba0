//! Shared utilities: input limits and upload validation.

pub mod validation;
