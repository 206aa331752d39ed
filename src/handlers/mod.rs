//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, session)
//! 2. Calls into a service for validation, encryption and storage
//! 3. Returns an HTTP response (JSON, status code)

/// Login, logout and session status
pub mod auth;
/// Hackathon CRUD
pub mod hackathons;
/// Service health probe
pub mod health;
/// API key CRUD
pub mod keys;
