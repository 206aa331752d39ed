//! Personal vault - API keys encrypted at rest and hackathon notes behind a single
//! operator login.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: PostgreSQL with sqlx, or in memory (see [`store`])
//! - **Sessions**: tower-sessions, cookie-bound
//! - **Encryption**: AES-256-GCM with one configured key (see [`crypto`])
//! - **Format**: JSON requests/responses
//!
//! The [`client`] module is a typed client for the same HTTP API, used by the
//! `vaultctl` binary.

pub mod app;
pub mod client;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
