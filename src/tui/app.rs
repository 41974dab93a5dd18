//! TuiApp — the TEA model.
//!
//! All state lives here. Update receives TuiMessages, mutates state, and
//! queues effects (network requests) for the runner to spawn. View reads
//! state to produce ratatui widgets. No side effects in view.

use tracing::{debug, info};

use crate::api::GenerationRequest;
use crate::dashboard::{
    edit_target, DashboardController, LoadTicket, RunTicket, NEW_WORKFLOW_TARGET,
};

use super::event::TuiMessage;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Workflows,
    Generate,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Workflows => Focus::Generate,
            Focus::Generate => Focus::Workflows,
        }
    }
}

/// Work the runner must start on the app's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadWorkflows(LoadTicket),
    RunWorkflow(RunTicket),
    Generate(GenerationRequest),
}

/// The main TUI application state (TEA model).
pub struct TuiApp {
    /// Dashboard view model.
    pub controller: DashboardController,
    /// Backend root, used to turn edit targets into links.
    pub base_url: String,
    /// Which pane has focus.
    pub focus: Focus,
    /// Selected card index in the workflow pane.
    pub selected: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Last navigation link produced by an edit/new action.
    pub last_link: Option<String>,
    /// Effects pending spawn (drained by the runner after each update).
    pub effects: Vec<Effect>,
}

impl TuiApp {
    pub fn new(controller: DashboardController, base_url: &str) -> Self {
        Self {
            controller,
            base_url: base_url.trim_end_matches('/').to_string(),
            focus: Focus::Workflows,
            selected: 0,
            should_quit: false,
            last_link: None,
            effects: Vec::new(),
        }
    }

    /// Handle a TUI message (TEA update).
    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            TuiMessage::WorkflowsLoaded { ticket, result } => {
                self.controller.finish_load(ticket, result);
                self.clamp_selection();
            }
            TuiMessage::RunFinished { ticket, result } => {
                self.controller.finish_run(ticket, result);
            }
            TuiMessage::GenerationFinished(result) => {
                self.controller.finish_generate(result);
            }
            TuiMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Take queued effects.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Reload the workflow list.
    pub fn reload(&mut self) {
        let ticket = self.controller.begin_load();
        self.selected = 0;
        self.effects.push(Effect::LoadWorkflows(ticket));
    }

    /// Run the selected workflow. Ignored while that card is busy.
    pub fn run_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        match self.controller.begin_run(&id) {
            Ok(ticket) => self.effects.push(Effect::RunWorkflow(ticket)),
            Err(e) => debug!("run not started: {e}"),
        }
    }

    /// Submit the generation form.
    pub fn generate(&mut self) {
        match self.controller.begin_generate() {
            Ok(request) => self.effects.push(Effect::Generate(request)),
            Err(e) => debug!("generation not started: {e}"),
        }
    }

    /// Produce the edit link for the selected workflow.
    pub fn edit_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        self.navigate(&edit_target(&id));
    }

    /// Produce the link for creating a new workflow.
    pub fn new_workflow(&mut self) {
        self.navigate(NEW_WORKFLOW_TARGET);
    }

    fn navigate(&mut self, target: &str) {
        let link = format!("{}{target}", self.base_url);
        info!("navigate: {link}");
        self.last_link = Some(link);
    }

    fn selected_id(&self) -> Option<String> {
        self.controller
            .cards()
            .get(self.selected)
            .map(|c| c.workflow.id.clone())
    }

    pub fn move_down(&mut self) {
        let len = self.controller.cards().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.cards().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
