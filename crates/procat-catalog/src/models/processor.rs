//! The data processor entity
//!
//! One struct covers the whole family. The `processor_type` discriminator
//! selects the variant (algorithm, operation, visualisation) and every
//! behaviour that differs between variants is a total `match` on it, so the
//! storage layer only has to restore the discriminator column to get the
//! right behaviour back.
//!
//! Fields are private. A processor is created through [`DataProcessor::new`],
//! which validates, and changed only through [`DataProcessor::with_parameters`].

use chrono::{DateTime, Utc};
use procat_common::{Subject, VisibilityScope};
use serde::Serialize;
use uuid::Uuid;

use super::children::{OutputFile, ProcessorParameter};
use super::metric_schema::MetricSchema;
use super::types::{DataProcessorType, DataType};
use crate::error::ValidationError;
use crate::validation::{
    validate_command, validate_description, validate_name, validate_output_files,
    validate_parameters, validate_slug, MAX_NAME_LENGTH, MAX_SLUG_LENGTH,
};

/// Identity and audit columns shared by every stored entity
///
/// `version` starts at 0 on insert and is bumped by one on each successful
/// update; updates are rejected unless the caller read the current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditInfo {
    pub id: Uuid,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuditInfo {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Input for publishing a new processor to the catalog
#[derive(Debug, Clone)]
pub struct NewDataProcessor {
    pub processor_type: DataProcessorType,
    pub slug: String,
    pub name: String,
    pub command: String,
    pub input_data_type: DataType,
    pub output_data_type: DataType,
    pub visibility_scope: VisibilityScope,
    pub description: String,
    pub code_project_id: Option<Uuid>,
    pub author: Option<Subject>,
    pub parameters: Vec<ProcessorParameter>,
    pub output_files: Vec<OutputFile>,
    pub metric_schema: MetricSchema,
}

impl NewDataProcessor {
    /// Minimal input; everything else takes its default
    pub fn new(
        processor_type: DataProcessorType,
        slug: impl Into<String>,
        name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            processor_type,
            slug: slug.into(),
            name: name.into(),
            command: command.into(),
            input_data_type: DataType::Any,
            output_data_type: DataType::Any,
            visibility_scope: VisibilityScope::default(),
            description: String::new(),
            code_project_id: None,
            author: None,
            parameters: Vec::new(),
            output_files: Vec::new(),
            metric_schema: MetricSchema::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_slug(&self.slug, MAX_SLUG_LENGTH)?;
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        validate_command(&self.command)?;
        validate_description(&self.description)?;
        validate_parameters(&self.parameters)?;
        validate_output_files(&self.output_files)?;
        Ok(())
    }
}

/// A catalog entry for a runnable transformation over typed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataProcessor {
    #[serde(flatten)]
    pub(crate) audit: AuditInfo,
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) command: String,
    pub(crate) input_data_type: DataType,
    pub(crate) output_data_type: DataType,
    pub(crate) processor_type: DataProcessorType,
    pub(crate) visibility_scope: VisibilityScope,
    pub(crate) description: String,
    pub(crate) code_project_id: Option<Uuid>,
    pub(crate) author: Option<Subject>,
    pub(crate) parameters: Vec<ProcessorParameter>,
    pub(crate) output_files: Vec<OutputFile>,
    pub(crate) metric_schema: MetricSchema,
}

impl DataProcessor {
    /// Validate the input and build an unsaved processor with a fresh id
    pub fn new(input: NewDataProcessor) -> Result<Self, ValidationError> {
        input.validate()?;

        Ok(Self {
            audit: AuditInfo::new(),
            slug: input.slug,
            name: input.name,
            command: input.command,
            input_data_type: input.input_data_type,
            output_data_type: input.output_data_type,
            processor_type: input.processor_type,
            visibility_scope: input.visibility_scope,
            description: input.description,
            code_project_id: input.code_project_id,
            author: input.author,
            parameters: input.parameters,
            output_files: input.output_files,
            metric_schema: input.metric_schema,
        })
    }

    pub fn is_chainable(&self) -> bool {
        self.processor_type.is_chainable()
    }

    /// Produce the updated definition of this processor
    ///
    /// The result is the same variant with the same identity, version and
    /// every other field; only the parameter list and metric schema change.
    pub fn with_parameters(
        &self,
        parameters: Vec<ProcessorParameter>,
        metric_schema: MetricSchema,
    ) -> Result<Self, ValidationError> {
        validate_parameters(&parameters)?;

        Ok(Self {
            parameters,
            metric_schema,
            ..self.clone()
        })
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    pub fn id(&self) -> Uuid {
        self.audit.id
    }

    pub fn version(&self) -> i64 {
        self.audit.version
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn input_data_type(&self) -> DataType {
        self.input_data_type
    }

    pub fn output_data_type(&self) -> DataType {
        self.output_data_type
    }

    pub fn processor_type(&self) -> DataProcessorType {
        self.processor_type
    }

    pub fn visibility_scope(&self) -> VisibilityScope {
        self.visibility_scope
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn code_project_id(&self) -> Option<Uuid> {
        self.code_project_id
    }

    pub fn author(&self) -> Option<&Subject> {
        self.author.as_ref()
    }

    pub fn parameters(&self) -> &[ProcessorParameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ProcessorParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn output_files(&self) -> &[OutputFile] {
        &self.output_files
    }

    pub fn metric_schema(&self) -> &MetricSchema {
        &self.metric_schema
    }

    /// Storage-assigned audit columns after a successful write
    pub(crate) fn stored_as(mut self, audit: AuditInfo) -> Self {
        self.audit = audit;
        self
    }
}
