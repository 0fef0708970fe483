//! Publish a data processor to the catalog

use chrono::{DateTime, Utc};
use mediator::Request;
use procat_common::{Subject, VisibilityScope};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cqrs::middleware::Command;
use crate::error::{CatalogResult, ValidationError};
use crate::models::{
    DataProcessor, DataProcessorType, DataType, MetricSchema, NewDataProcessor, OutputFile,
    ProcessorParameter,
};
use crate::repository::ProcessorRepository;
use crate::validation::{
    validate_command, validate_description, validate_name, validate_output_files,
    validate_parameters, validate_slug, MAX_NAME_LENGTH, MAX_SLUG_LENGTH,
};

/// Command to publish a new processor
///
/// # Examples
///
/// ```rust,ignore
/// use procat_catalog::features::processors::commands::CreateProcessorCommand;
/// use procat_catalog::models::{DataProcessorType, DataType};
///
/// let command = CreateProcessorCommand {
///     processor_type: DataProcessorType::Operation,
///     slug: "image-resize".to_string(),
///     name: "Image Resize".to_string(),
///     command: "python resize.py".to_string(),
///     input_data_type: DataType::Image,
///     output_data_type: DataType::Image,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProcessorCommand {
    pub processor_type: DataProcessorType,
    pub slug: String,
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub input_data_type: DataType,
    #[serde(default)]
    pub output_data_type: DataType,
    #[serde(default)]
    pub visibility_scope: VisibilityScope,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_project_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Subject>,
    #[serde(default)]
    pub parameters: Vec<ProcessorParameter>,
    #[serde(default)]
    pub output_files: Vec<OutputFile>,
    #[serde(default)]
    pub metric_schema: MetricSchema,
}

impl Default for CreateProcessorCommand {
    fn default() -> Self {
        Self {
            processor_type: DataProcessorType::Operation,
            slug: String::new(),
            name: String::new(),
            command: String::new(),
            input_data_type: DataType::default(),
            output_data_type: DataType::default(),
            visibility_scope: VisibilityScope::default(),
            description: String::new(),
            code_project_id: None,
            author: None,
            parameters: Vec::new(),
            output_files: Vec::new(),
            metric_schema: MetricSchema::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProcessorResponse {
    pub id: Uuid,
    pub slug: String,
    pub processor_type: DataProcessorType,
    pub chainable: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Request<CatalogResult<CreateProcessorResponse>> for CreateProcessorCommand {}

impl Command for CreateProcessorCommand {
    const NAME: &'static str = "create_processor";
}

impl CreateProcessorCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// - Slug must be 1-255 lowercase letters, digits, or hyphens, not hyphen-bounded
    /// - Name and command must not be blank
    /// - Description is limited to 1024 characters
    /// - Parameter names must be non-blank and unique; output file names non-blank
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_slug(&self.slug, MAX_SLUG_LENGTH)?;
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        validate_command(&self.command)?;
        validate_description(&self.description)?;
        validate_parameters(&self.parameters)?;
        validate_output_files(&self.output_files)?;
        Ok(())
    }

    fn into_new(self) -> NewDataProcessor {
        NewDataProcessor {
            processor_type: self.processor_type,
            slug: self.slug,
            name: self.name,
            command: self.command,
            input_data_type: self.input_data_type,
            output_data_type: self.output_data_type,
            visibility_scope: self.visibility_scope,
            description: self.description,
            code_project_id: self.code_project_id,
            author: self.author,
            parameters: self.parameters,
            output_files: self.output_files,
            metric_schema: self.metric_schema,
        }
    }
}

/// Handler for publishing processors
///
/// # Errors
///
/// - `Validation` if any field is malformed (nothing is written)
/// - `Persistence::UniqueViolation` if the slug is taken
/// - `Persistence::ForeignKeyViolation` if the author or code project is unknown
#[tracing::instrument(
    skip(repo, command),
    fields(
        operation = CreateProcessorCommand::NAME,
        slug = %command.slug,
        processor_type = %command.processor_type
    )
)]
pub async fn handle(
    repo: &dyn ProcessorRepository,
    command: CreateProcessorCommand,
) -> CatalogResult<CreateProcessorResponse> {
    command.validate()?;

    let processor = DataProcessor::new(command.into_new())?;
    let stored = repo.insert(&processor).await?;

    tracing::info!(processor_id = %stored.id(), "Processor published");

    Ok(CreateProcessorResponse {
        id: stored.id(),
        slug: stored.slug().to_string(),
        processor_type: stored.processor_type(),
        chainable: stored.is_chainable(),
        version: stored.version(),
        created_at: stored.audit().created_at,
    })
}
