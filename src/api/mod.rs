//! Backend API — the three REST calls the dashboard makes.
//!
//! `DashboardApi` is the seam between the controller and the network.
//! The TUI and CLI use `HttpDashboardClient`; tests script their own.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::{ApiError, HttpDashboardClient};
pub use types::{GenerationRequest, GenerationResult, Model, ResponseStatus, RunResult, Workflow};

/// The backend operations the dashboard depends on.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Ordered workflow listing.
    async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError>;

    /// Trigger one run of a workflow.
    async fn run_workflow(&self, workflow_id: &str) -> Result<RunResult, ApiError>;

    /// Ask the backend to generate text.
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ApiError>;
}

#[async_trait]
impl DashboardApi for HttpDashboardClient {
    async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        self.workflows().await
    }

    async fn run_workflow(&self, workflow_id: &str) -> Result<RunResult, ApiError> {
        self.run(workflow_id).await
    }

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ApiError> {
        self.generate(request).await
    }
}
