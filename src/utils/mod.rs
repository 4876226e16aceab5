//! Shared helpers used across handlers.
//!
//! # Modules
//!
//! - [`api_response`] - the uniform JSON response envelope and
//!   validation-error formatting

pub mod api_response;
