//! Business logic services.
//!
//! Services sit between HTTP handlers and the record store. They validate input,
//! encrypt and decrypt secrets, and log what changed.

pub mod api_key_service;
pub mod auth_service;
pub mod hackathon_service;
