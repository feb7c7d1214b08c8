//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate conversion, statistics and storage into host-facing calls.
//! - Keep UI layers decoupled from storage details.

pub mod gradebook_service;
