//! Terminal dashboard — ratatui presentation layer.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (message handler) + View (render).
//! Immediate mode, no retained widget state. Network calls never run
//! inside update: update queues an `Effect`, the runner spawns it, and the
//! completion comes back as a `TuiMessage`.

pub mod app;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
