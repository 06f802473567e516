//! Workflow-to-API error mapping.

use skirmish_workflow::WorkflowError;

use super::api_error::ApiError;

impl From<WorkflowError> for ApiError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::Validation { field, message } => {
                Self::validation_field(field, message)
            }
            WorkflowError::NotFound {
                entity_type,
                identifier,
            } => Self::not_found(entity_type, identifier),
            WorkflowError::ActiveSessionExists { user_id } => Self::conflict(format!(
                "user '{}' already has an active combat session",
                user_id
            )),
            WorkflowError::Conflict { reason } => Self::conflict(reason),
            WorkflowError::Configuration { reason } => {
                // Content bugs are server faults; log the detail, return a
                // generic failure to the client.
                tracing::error!("combat content configuration error: {}", reason);
                Self::internal("combat content is misconfigured")
            }
            WorkflowError::Repository { operation, message } => {
                tracing::error!("repository operation '{}' failed: {}", operation, message);
                Self::internal("storage failure")
            }
            WorkflowError::EventLog { operation, message } => {
                tracing::error!("combat log operation '{}' failed: {}", operation, message);
                Self::internal("storage failure")
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
