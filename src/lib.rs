//! flowdeck — terminal dashboard for server-side workflows.
//!
//! Lists workflows from the backend, triggers runs, and submits prompts to
//! the backend's text-generation endpoint.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod tui;
