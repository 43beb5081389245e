//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and history calls into use-case level APIs.
//! - Keep CLI/front-end layers decoupled from storage details.

pub mod task_service;
