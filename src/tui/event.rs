//! TUI messages — everything that drives the update loop.
//!
//! Keyboard input comes from a blocking reader thread; request completions
//! come from spawned tokio tasks. Both flow through one mpsc channel as
//! `TuiMessage`s, so the model is only ever touched by the UI loop.

use crossterm::event::KeyEvent;

use crate::api::{ApiError, GenerationResult, RunResult, Workflow};
use crate::dashboard::{LoadTicket, RunTicket};

/// Messages that drive the TUI update loop.
#[derive(Debug)]
pub enum TuiMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Workflow listing settled.
    WorkflowsLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Workflow>, ApiError>,
    },
    /// A run request settled.
    RunFinished {
        ticket: RunTicket,
        result: Result<RunResult, ApiError>,
    },
    /// The generation request settled.
    GenerationFinished(Result<GenerationResult, ApiError>),
    /// Quit the TUI.
    Quit,
}
