//! Replace the parameter list and metric schema of a processor
//!
//! The caller states which version it read. If the stored version moved on
//! in the meantime the command fails with `ConcurrentModification` and
//! nothing is written.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cqrs::middleware::Command;
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::models::{MetricSchema, ProcessorParameter};
use crate::repository::ProcessorRepository;
use crate::validation::validate_parameters;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProcessorParametersCommand {
    pub id: Uuid,
    /// Version the caller based its edit on
    pub expected_version: i64,
    pub parameters: Vec<ProcessorParameter>,
    pub metric_schema: MetricSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProcessorParametersResponse {
    pub id: Uuid,
    pub version: i64,
    pub parameter_count: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Request<CatalogResult<UpdateProcessorParametersResponse>>
    for UpdateProcessorParametersCommand
{
}

impl Command for UpdateProcessorParametersCommand {
    const NAME: &'static str = "update_processor_parameters";
}

impl UpdateProcessorParametersCommand {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_parameters(&self.parameters)
    }
}

#[tracing::instrument(
    skip(repo, command),
    fields(
        operation = UpdateProcessorParametersCommand::NAME,
        id = %command.id,
        expected_version = command.expected_version
    )
)]
pub async fn handle(
    repo: &dyn ProcessorRepository,
    command: UpdateProcessorParametersCommand,
) -> CatalogResult<UpdateProcessorParametersResponse> {
    command.validate()?;

    let current = repo
        .find_by_id(command.id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Data processor", command.id.to_string()))?;

    if current.version() != command.expected_version {
        return Err(CatalogError::ConcurrentModification {
            id: command.id,
            expected_version: command.expected_version,
            actual_version: current.version(),
        });
    }

    let changed = current.with_parameters(command.parameters, command.metric_schema)?;
    let stored = repo.update(&changed).await?;

    tracing::info!(new_version = stored.version(), "Processor parameters updated");

    Ok(UpdateProcessorParametersResponse {
        id: stored.id(),
        version: stored.version(),
        parameter_count: stored.parameters().len(),
        updated_at: stored.audit().updated_at,
    })
}
