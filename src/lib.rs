//! Crowdfunding backend user API.
//!
//! A thin HTTP layer over a user-management service: registration, login,
//! email-availability checks and avatar uploads. Every reply uses the
//! same JSON envelope (`{message, code, status, data}`).
//!
//! # Architecture
//!
//! ```text
//! routes → handlers → services → repositories → MongoDB
//! ```
//!
//! Handlers depend only on capability traits ([`services::users::UserService`],
//! [`auth::IdentityProvider`]) injected as actix app data, so tests swap
//! in in-memory implementations.

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
