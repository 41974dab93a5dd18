//! One-shot command drivers: list, run, generate.
//!
//! Each command drives the same `DashboardController` the TUI uses and
//! prints the resulting view as plain text.

use crate::api::DashboardApi;
use crate::dashboard::{
    edit_target, DashboardController, DashboardError, StatusKind, StatusRegion, WorkflowList,
};

/// Outcome of a one-shot command: the text to print and whether it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub failed: bool,
}

/// Render the workflow area as text.
pub fn render_list(controller: &DashboardController, base_url: &str) -> Report {
    match controller.list() {
        WorkflowList::Loading => Report {
            text: "Loading workflows...".into(),
            failed: false,
        },
        WorkflowList::Empty => Report {
            text: "No workflows found.".into(),
            failed: false,
        },
        WorkflowList::Failed(msg) => Report {
            text: msg.clone(),
            failed: true,
        },
        WorkflowList::Loaded(cards) => {
            let mut out = String::new();
            for card in cards {
                out.push_str(&format!("{}  ({})\n", card.workflow.name, card.workflow.id));
                out.push_str(&format!("    {}\n", card.workflow.description));
                out.push_str(&format!("    edit: {}\n", edit_link(base_url, &card.workflow.id)));
            }
            Report {
                text: out.trim_end().to_string(),
                failed: false,
            }
        }
    }
}

fn status_report(status: &StatusRegion) -> Report {
    Report {
        text: status.text().unwrap_or_default().to_string(),
        failed: status.kind() == Some(StatusKind::Error),
    }
}

pub async fn list(
    api: &dyn DashboardApi,
    controller: &mut DashboardController,
    base_url: &str,
) -> Report {
    controller.load_workflows(api).await;
    render_list(controller, base_url)
}

/// Load the listing, then run one workflow from it.
pub async fn run(
    api: &dyn DashboardApi,
    controller: &mut DashboardController,
    workflow_id: &str,
) -> Report {
    controller.load_workflows(api).await;
    if let WorkflowList::Failed(msg) = controller.list() {
        return Report {
            text: msg.clone(),
            failed: true,
        };
    }
    if let Err(e) = controller.run_workflow(api, workflow_id).await {
        return Report {
            text: e.to_string(),
            failed: true,
        };
    }
    match controller.card(workflow_id) {
        Some(card) => status_report(&card.status),
        None => Report {
            text: format!("no workflow '{workflow_id}'"),
            failed: true,
        },
    }
}

/// Submit `prompt` through the generation form. Output goes first, status after.
pub async fn generate(
    api: &dyn DashboardApi,
    controller: &mut DashboardController,
    prompt: &str,
) -> Report {
    controller.form_mut().prompt = prompt.to_string();
    match controller.generate_content(api).await {
        Ok(()) => {}
        Err(DashboardError::EmptyPrompt) => return status_report(&controller.form().status),
        Err(e) => {
            return Report {
                text: e.to_string(),
                failed: true,
            }
        }
    }
    let form = controller.form();
    let status = status_report(&form.status);
    if form.output.is_empty() {
        return status;
    }
    Report {
        text: format!("{}\n\n{}", form.output, status.text),
        failed: status.failed,
    }
}

/// Edit link for a workflow id.
pub fn edit_link(base_url: &str, workflow_id: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), edit_target(workflow_id))
}
