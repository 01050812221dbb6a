//! Behaviour tests for the job status workflow.

#[path = "status_workflow_steps/mod.rs"]
mod status_workflow_steps_defs;

use rstest_bdd_macros::scenario;
use status_workflow_steps_defs::world::{StatusWorkflowWorld, world};

#[scenario(
    path = "tests/features/status_workflow.feature",
    name = "A driver completes a pending job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn driver_completes_pending_job(world: StatusWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/status_workflow.feature",
    name = "Staff reopen a completed job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn staff_reopen_completed_job(world: StatusWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/status_workflow.feature",
    name = "A driver reports an issue on site"
)]
#[tokio::test(flavor = "multi_thread")]
async fn driver_reports_issue(world: StatusWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/status_workflow.feature",
    name = "An unknown status is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_rejected(world: StatusWorkflowWorld) {
    let _ = world;
}
