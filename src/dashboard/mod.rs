//! DashboardController — the workflow list, run triggers, and generation form.
//!
//! Every operation is split into a synchronous `begin_*` (validate, flip the
//! trigger to in-progress, show progress text) and a synchronous `finish_*`
//! (apply the outcome, settle the trigger). The network call in between is
//! the caller's business: the TUI spawns it and feeds the result back as a
//! message, the CLI and tests just await it via the `async` wrappers.
//!
//! `finish_*` always settles the trigger it was handed, so a control can
//! only stay disabled while its request is genuinely outstanding.

pub mod controls;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{
    ApiError, DashboardApi, GenerationRequest, GenerationResult, Model, ResponseStatus, RunResult,
    Workflow,
};

pub use controls::{
    ControlState, StatusKind, StatusMessage, StatusRegion, TemperatureSlider, TriggerControl,
};

/// Navigation target for the "new workflow" action.
pub const NEW_WORKFLOW_TARGET: &str = "/edit/new";

/// Navigation target for a workflow's "edit" action. The id is
/// percent-encoded as a single path segment.
pub fn edit_target(workflow_id: &str) -> String {
    format!("/edit/{}", urlencoding::encode(workflow_id))
}

/// Precondition failures from `begin_*`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("no rendered workflow with id '{0}'")]
    UnknownWorkflow(String),

    #[error("workflow '{0}' is already running")]
    RunInProgress(String),

    #[error("a generation request is already in progress")]
    GenerationInProgress,

    #[error("prompt is empty")]
    EmptyPrompt,
}

/// One rendered workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCard {
    pub workflow: Workflow,
    pub run: TriggerControl,
    pub status: StatusRegion,
}

impl WorkflowCard {
    fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            run: TriggerControl::new("Run Workflow", "Running..."),
            status: StatusRegion::default(),
        }
    }

    pub fn edit_target(&self) -> String {
        edit_target(&self.workflow.id)
    }
}

/// What the workflow area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowList {
    Loading,
    Empty,
    Loaded(Vec<WorkflowCard>),
    Failed(String),
}

/// Identifies the listing a request was issued against. Listings carrying a
/// stale ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// An outstanding run. Runs are keyed by workflow id and outlive reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub workflow_id: String,
}

/// The content-generation form.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationForm {
    pub prompt: String,
    pub model: Model,
    pub temperature: TemperatureSlider,
    pub trigger: TriggerControl,
    pub output: String,
    pub status: StatusRegion,
}

impl GenerationForm {
    fn new(model: Model, temperature: f64) -> Self {
        Self {
            prompt: String::new(),
            model,
            temperature: TemperatureSlider::new(temperature),
            trigger: TriggerControl::new("Generate Content", "Generating..."),
            output: String::new(),
            status: StatusRegion::default(),
        }
    }
}

/// Owns the view model for the whole dashboard.
#[derive(Debug, Clone)]
pub struct DashboardController {
    list: WorkflowList,
    epoch: u64,
    /// Workflow ids with a run request outstanding.
    running: HashSet<String>,
    form: GenerationForm,
}

impl DashboardController {
    pub fn new(model: Model, temperature: f64) -> Self {
        Self {
            list: WorkflowList::Loading,
            epoch: 0,
            running: HashSet::new(),
            form: GenerationForm::new(model, temperature),
        }
    }

    pub fn list(&self) -> &WorkflowList {
        &self.list
    }

    /// Rendered cards, in server order. Empty unless the list is loaded.
    pub fn cards(&self) -> &[WorkflowCard] {
        match &self.list {
            WorkflowList::Loaded(cards) => cards,
            _ => &[],
        }
    }

    pub fn card(&self, workflow_id: &str) -> Option<&WorkflowCard> {
        self.cards().iter().find(|c| c.workflow.id == workflow_id)
    }

    fn card_mut(&mut self, workflow_id: &str) -> Option<&mut WorkflowCard> {
        match &mut self.list {
            WorkflowList::Loaded(cards) => cards.iter_mut().find(|c| c.workflow.id == workflow_id),
            _ => None,
        }
    }

    pub fn form(&self) -> &GenerationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut GenerationForm {
        &mut self.form
    }

    /// Number of requests currently in flight (runs + generation).
    pub fn in_flight(&self) -> usize {
        self.running.len() + usize::from(!self.form.trigger.is_enabled())
    }

    pub fn is_running(&self, workflow_id: &str) -> bool {
        self.running.contains(workflow_id)
    }

    // ── Workflow list ──

    /// Show the loading state and drop whatever was rendered. Outstanding
    /// runs are kept; their cards come back busy.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.epoch += 1;
        self.list = WorkflowList::Loading;
        LoadTicket(self.epoch)
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Workflow>, ApiError>) {
        if ticket.0 != self.epoch {
            debug!("dropping stale workflow listing");
            return;
        }
        self.list = match result {
            Ok(workflows) if workflows.is_empty() => {
                info!("no workflows available");
                WorkflowList::Empty
            }
            Ok(workflows) => {
                info!(count = workflows.len(), "workflows loaded");
                let cards = workflows
                    .into_iter()
                    .map(|workflow| {
                        let busy = self.running.contains(&workflow.id);
                        let mut card = WorkflowCard::new(workflow);
                        if busy {
                            card.run.begin();
                            let notice = format!("Starting workflow '{}'...", card.workflow.id);
                            card.status.info(notice);
                        }
                        card
                    })
                    .collect();
                WorkflowList::Loaded(cards)
            }
            Err(e) => {
                warn!("failed to load workflows: {e}");
                WorkflowList::Failed(format!("Error loading workflows: {e}"))
            }
        };
    }

    pub async fn load_workflows(&mut self, api: &dyn DashboardApi) {
        let ticket = self.begin_load();
        let result = api.list_workflows().await;
        self.finish_load(ticket, result);
    }

    // ── Runs ──

    /// Disable the card's trigger and show the optimistic "starting" notice.
    pub fn begin_run(&mut self, workflow_id: &str) -> Result<RunTicket, DashboardError> {
        if self.running.contains(workflow_id) {
            return Err(DashboardError::RunInProgress(workflow_id.to_string()));
        }
        let card = self
            .card_mut(workflow_id)
            .ok_or_else(|| DashboardError::UnknownWorkflow(workflow_id.to_string()))?;
        if !card.run.begin() {
            return Err(DashboardError::RunInProgress(workflow_id.to_string()));
        }
        card.status.clear();
        card.status.info(format!("Starting workflow '{workflow_id}'..."));
        self.running.insert(workflow_id.to_string());
        Ok(RunTicket {
            workflow_id: workflow_id.to_string(),
        })
    }

    /// Apply a run outcome to whichever card currently shows the workflow,
    /// including one rebuilt by a reload since the run began.
    pub fn finish_run(&mut self, ticket: RunTicket, result: Result<RunResult, ApiError>) {
        self.running.remove(&ticket.workflow_id);
        let Some(card) = self.card_mut(&ticket.workflow_id) else {
            debug!(workflow = %ticket.workflow_id, "run finished for a workflow no longer listed");
            return;
        };
        match result {
            Ok(RunResult {
                status: ResponseStatus::Success,
                message,
            }) => {
                info!(workflow = %ticket.workflow_id, "run accepted: {message}");
                card.status.success(message);
            }
            Ok(RunResult {
                status: ResponseStatus::Error,
                message,
            }) => {
                warn!(workflow = %ticket.workflow_id, "run rejected: {message}");
                card.status.error(message);
            }
            Err(e) => {
                warn!(workflow = %ticket.workflow_id, "run request failed: {e}");
                card.status.error(format!("Network error: {e}"));
            }
        }
        card.run.settle();
    }

    pub async fn run_workflow(
        &mut self,
        api: &dyn DashboardApi,
        workflow_id: &str,
    ) -> Result<(), DashboardError> {
        let ticket = self.begin_run(workflow_id)?;
        let result = api.run_workflow(workflow_id).await;
        self.finish_run(ticket, result);
        Ok(())
    }

    // ── Generation ──

    /// Validate the form and build the request. An empty prompt shows a
    /// validation error and issues nothing.
    pub fn begin_generate(&mut self) -> Result<GenerationRequest, DashboardError> {
        if !self.form.trigger.is_enabled() {
            return Err(DashboardError::GenerationInProgress);
        }
        let prompt = self.form.prompt.trim();
        if prompt.is_empty() {
            self.form.status.error("Please enter a prompt.");
            return Err(DashboardError::EmptyPrompt);
        }
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            model: self.form.model,
            temperature: self.form.temperature.value(),
        };

        self.form.trigger.begin();
        self.form.output.clear();
        self.form.status.clear();
        self.form
            .status
            .info(format!("Requesting content from {} model...", request.model));
        Ok(request)
    }

    pub fn finish_generate(&mut self, result: Result<GenerationResult, ApiError>) {
        let form = &mut self.form;
        match result {
            Ok(GenerationResult::Success { generated_text }) => {
                info!(chars = generated_text.len(), "content generated");
                form.output = generated_text;
                form.status.success("Content generated successfully!");
            }
            Ok(GenerationResult::Error { message }) => {
                warn!("generation rejected: {message}");
                form.output = format!("Error: {message}");
                form.status.error(message);
            }
            Err(e) => {
                warn!("generation request failed: {e}");
                let text = format!("Network error: {e}");
                form.output = text.clone();
                form.status.error(text);
            }
        }
        form.trigger.settle();
    }

    pub async fn generate_content(&mut self, api: &dyn DashboardApi) -> Result<(), DashboardError> {
        let request = self.begin_generate()?;
        let result = api.generate_content(&request).await;
        self.finish_generate(result);
        Ok(())
    }

    // ── Form editing ──

    pub fn cycle_model(&mut self) {
        self.form.model = self.form.model.next();
    }

    /// Slider input: the readout follows the slider's value text.
    pub fn set_temperature(&mut self, text: &str) -> Result<(), String> {
        self.form.temperature.set_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflows(n: usize) -> Vec<Workflow> {
        (0..n)
            .map(|i| Workflow::new(&format!("wf-{i}"), &format!("Workflow {i}"), "desc"))
            .collect()
    }

    fn loaded(n: usize) -> DashboardController {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        let ticket = c.begin_load();
        c.finish_load(ticket, Ok(workflows(n)));
        c
    }

    fn network_error() -> ApiError {
        ApiError::InvalidResponse("connection reset".into())
    }

    #[test]
    fn list_renders_exactly_n_cards_in_order() {
        for n in [1, 2, 7] {
            let c = loaded(n);
            let ids: Vec<&str> = c.cards().iter().map(|c| c.workflow.id.as_str()).collect();
            let expected: Vec<String> = (0..n).map(|i| format!("wf-{i}")).collect();
            assert_eq!(ids, expected);
            assert!(c.cards().iter().all(|c| !c.status.is_visible() && c.run.is_enabled()));
        }
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let c = loaded(0);
        assert_eq!(c.list(), &WorkflowList::Empty);
        assert!(c.cards().is_empty());
    }

    #[test]
    fn load_shows_loading_and_clears_cards() {
        let mut c = loaded(3);
        let _ticket = c.begin_load();
        assert_eq!(c.list(), &WorkflowList::Loading);
        assert!(c.cards().is_empty());
    }

    #[test]
    fn load_failure_shows_error_in_place_of_list() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        let ticket = c.begin_load();
        c.finish_load(ticket, Err(network_error()));
        match c.list() {
            WorkflowList::Failed(msg) => {
                assert!(msg.starts_with("Error loading workflows: "));
                assert!(msg.contains("connection reset"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn stale_listing_is_dropped() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        let first = c.begin_load();
        let second = c.begin_load();
        c.finish_load(second, Ok(workflows(2)));
        c.finish_load(first, Ok(workflows(5)));
        assert_eq!(c.cards().len(), 2);
    }

    #[test]
    fn edit_targets() {
        let c = loaded(1);
        assert_eq!(c.cards()[0].edit_target(), "/edit/wf-0");
        assert_eq!(NEW_WORKFLOW_TARGET, "/edit/new");
    }

    #[test]
    fn run_disables_trigger_and_shows_starting() {
        let mut c = loaded(2);
        let ticket = c.begin_run("wf-1").unwrap();
        assert_eq!(ticket.workflow_id, "wf-1");

        let card = c.card("wf-1").unwrap();
        assert!(!card.run.is_enabled());
        assert_eq!(card.run.label(), "Running...");
        assert_eq!(card.status.text(), Some("Starting workflow 'wf-1'..."));
        assert_eq!(card.status.kind(), Some(StatusKind::Info));

        // The other card is untouched.
        assert!(c.card("wf-0").unwrap().run.is_enabled());
        assert_eq!(c.in_flight(), 1);
    }

    #[test]
    fn run_trigger_restored_after_every_outcome() {
        let outcomes: Vec<(Result<RunResult, ApiError>, StatusKind)> = vec![
            (Ok(RunResult::success("Workflow 'wf-0' started.")), StatusKind::Success),
            (Ok(RunResult::error("workflow is disabled")), StatusKind::Error),
            (Err(network_error()), StatusKind::Error),
        ];
        for (result, kind) in outcomes {
            let mut c = loaded(1);
            let ticket = c.begin_run("wf-0").unwrap();
            c.finish_run(ticket, result);
            let card = c.card("wf-0").unwrap();
            assert!(card.run.is_enabled());
            assert_eq!(card.run.label(), "Run Workflow");
            assert_eq!(card.status.kind(), Some(kind));
            assert_eq!(c.in_flight(), 0);
        }
    }

    #[test]
    fn run_messages() {
        let mut c = loaded(1);
        let ticket = c.begin_run("wf-0").unwrap();
        c.finish_run(ticket, Ok(RunResult::error("workflow is disabled")));
        assert_eq!(c.card("wf-0").unwrap().status.text(), Some("workflow is disabled"));

        let ticket = c.begin_run("wf-0").unwrap();
        c.finish_run(ticket, Err(network_error()));
        let text = c.card("wf-0").unwrap().status.text().unwrap();
        assert!(text.starts_with("Network error: "));
    }

    #[test]
    fn run_rejects_unknown_and_duplicate() {
        let mut c = loaded(1);
        assert_eq!(
            c.begin_run("nope"),
            Err(DashboardError::UnknownWorkflow("nope".into()))
        );
        c.begin_run("wf-0").unwrap();
        assert_eq!(
            c.begin_run("wf-0"),
            Err(DashboardError::RunInProgress("wf-0".into()))
        );
    }

    #[test]
    fn concurrent_runs_are_independent() {
        let mut c = loaded(3);
        let t0 = c.begin_run("wf-0").unwrap();
        let t2 = c.begin_run("wf-2").unwrap();
        assert_eq!(c.in_flight(), 2);

        c.finish_run(t2, Ok(RunResult::success("two")));
        assert!(c.card("wf-2").unwrap().run.is_enabled());
        assert!(!c.card("wf-0").unwrap().run.is_enabled());

        c.finish_run(t0, Ok(RunResult::success("zero")));
        assert_eq!(c.card("wf-0").unwrap().status.text(), Some("zero"));
        assert_eq!(c.card("wf-2").unwrap().status.text(), Some("two"));
    }

    #[test]
    fn reload_keeps_outstanding_run_busy() {
        let mut c = loaded(2);
        let ticket = c.begin_run("wf-0").unwrap();
        let reload = c.begin_load();
        c.finish_load(reload, Ok(workflows(2)));

        let card = c.card("wf-0").unwrap();
        assert!(!card.run.is_enabled());
        assert_eq!(card.run.label(), "Running...");
        assert_eq!(card.status.text(), Some("Starting workflow 'wf-0'..."));
        assert!(c.card("wf-1").unwrap().run.is_enabled());
        assert_eq!(
            c.begin_run("wf-0"),
            Err(DashboardError::RunInProgress("wf-0".into()))
        );
        assert_eq!(c.in_flight(), 1);

        c.finish_run(ticket, Ok(RunResult::success("done")));
        let card = c.card("wf-0").unwrap();
        assert!(card.run.is_enabled());
        assert_eq!(card.status.text(), Some("done"));
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn run_stays_outstanding_while_list_reloads() {
        let mut c = loaded(1);
        let ticket = c.begin_run("wf-0").unwrap();
        let _reload = c.begin_load();
        assert_eq!(
            c.begin_run("wf-0"),
            Err(DashboardError::RunInProgress("wf-0".into()))
        );
        assert!(c.is_running("wf-0"));
        assert_eq!(c.in_flight(), 1);

        // The listing has not come back yet.
        c.finish_run(ticket, Ok(RunResult::success("done")));
        assert!(!c.is_running("wf-0"));
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn edit_target_encodes_id() {
        assert_eq!(edit_target("a b"), "/edit/a%20b");
        assert_eq!(edit_target("x/y"), "/edit/x%2Fy");
    }

    #[test]
    fn empty_prompt_is_rejected_without_request() {
        for prompt in ["", "   ", "\n\t"] {
            let mut c = DashboardController::new(Model::OpenAi, 0.7);
            c.form_mut().prompt = prompt.into();
            assert_eq!(c.begin_generate(), Err(DashboardError::EmptyPrompt));
            assert_eq!(c.form().status.text(), Some("Please enter a prompt."));
            assert_eq!(c.form().status.kind(), Some(StatusKind::Error));
            assert!(c.form().trigger.is_enabled());
        }
    }

    #[test]
    fn generate_builds_trimmed_request() {
        let mut c = DashboardController::new(Model::DeepSeek, 0.3);
        c.form_mut().prompt = "  write a haiku \n".into();
        c.form_mut().output = "previous".into();
        let req = c.begin_generate().unwrap();
        assert_eq!(req.prompt, "write a haiku");
        assert_eq!(req.model, Model::DeepSeek);
        assert!((req.temperature - 0.3).abs() < 1e-9);

        let form = c.form();
        assert!(!form.trigger.is_enabled());
        assert_eq!(form.trigger.label(), "Generating...");
        assert!(form.output.is_empty());
        assert_eq!(form.status.text(), Some("Requesting content from deepseek model..."));
        assert_eq!(c.begin_generate(), Err(DashboardError::GenerationInProgress));
    }

    #[test]
    fn generate_success_sets_output_exactly() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        c.form_mut().prompt = "p".into();
        c.begin_generate().unwrap();
        c.finish_generate(Ok(GenerationResult::Success {
            generated_text: "X".into(),
        }));
        assert_eq!(c.form().output, "X");
        assert_eq!(c.form().status.text(), Some("Content generated successfully!"));
        assert_eq!(c.form().status.kind(), Some(StatusKind::Success));
        assert!(c.form().trigger.is_enabled());
    }

    #[test]
    fn generate_app_error_prefixes_output() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        c.form_mut().prompt = "p".into();
        c.begin_generate().unwrap();
        c.finish_generate(Ok(GenerationResult::Error { message: "M".into() }));
        assert_eq!(c.form().output, "Error: M");
        assert_eq!(c.form().status.text(), Some("M"));
        assert_eq!(c.form().status.kind(), Some(StatusKind::Error));
        assert!(c.form().trigger.is_enabled());
        assert_eq!(c.form().trigger.label(), "Generate Content");
    }

    #[test]
    fn generate_network_error_fills_both() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        c.form_mut().prompt = "p".into();
        c.begin_generate().unwrap();
        c.finish_generate(Err(network_error()));
        assert!(c.form().output.starts_with("Network error: "));
        assert_eq!(c.form().status.text(), Some(c.form().output.as_str()));
        assert!(c.form().trigger.is_enabled());
    }

    #[test]
    fn slider_sync_has_no_staleness() {
        let mut c = DashboardController::new(Model::OpenAi, 0.2);
        assert_eq!(c.form().temperature.readout(), "0.2");
        c.set_temperature("0.9").unwrap();
        assert_eq!(c.form().temperature.readout(), "0.9");
    }

    #[test]
    fn model_cycles() {
        let mut c = DashboardController::new(Model::OpenAi, 0.7);
        c.cycle_model();
        assert_eq!(c.form().model, Model::DeepSeek);
        c.cycle_model();
        assert_eq!(c.form().model, Model::OpenAi);
    }
}
