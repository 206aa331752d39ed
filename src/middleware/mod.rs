//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can short-circuit requests (reject unauthenticated ones) before a handler runs.

/// Session guard for the record routes
pub mod auth;
