//! Fixture builders for catalog tests

use procat_catalog::features::processors::CreateProcessorCommand;
use procat_catalog::models::{
    DataProcessorType, DataType, MetricSchema, MetricType, OutputFile, ParameterType,
    ProcessorParameter,
};
use procat_common::{Subject, VisibilityScope};
use uuid::Uuid;

/// Builder for processor creation commands with sensible defaults
#[derive(Debug, Clone)]
pub struct ProcessorFixture {
    command: CreateProcessorCommand,
}

impl ProcessorFixture {
    pub fn new(processor_type: DataProcessorType, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            command: CreateProcessorCommand {
                processor_type,
                name: format!("Processor {slug}"),
                command: format!("python {slug}.py"),
                slug,
                input_data_type: DataType::Tabular,
                output_data_type: DataType::Tabular,
                visibility_scope: VisibilityScope::Public,
                ..Default::default()
            },
        }
    }

    pub fn algorithm(slug: impl Into<String>) -> Self {
        Self::new(DataProcessorType::Algorithm, slug)
    }

    pub fn operation(slug: impl Into<String>) -> Self {
        Self::new(DataProcessorType::Operation, slug)
    }

    pub fn visualisation(slug: impl Into<String>) -> Self {
        Self::new(DataProcessorType::Visualisation, slug)
            .with_output_data_type(DataType::Image)
            .with_output_file(OutputFile::new("plot.png").with_data_type(DataType::Image))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.command.description = description.into();
        self
    }

    pub fn with_output_data_type(mut self, data_type: DataType) -> Self {
        self.command.output_data_type = data_type;
        self
    }

    pub fn with_author(mut self, author: Subject) -> Self {
        self.command.author = Some(author);
        self
    }

    pub fn with_code_project(mut self, id: Uuid) -> Self {
        self.command.code_project_id = Some(id);
        self
    }

    pub fn with_parameter(mut self, parameter: ProcessorParameter) -> Self {
        self.command.parameters.push(parameter);
        self
    }

    pub fn with_output_file(mut self, file: OutputFile) -> Self {
        self.command.output_files.push(file);
        self
    }

    pub fn with_metric_schema(mut self, schema: MetricSchema) -> Self {
        self.command.metric_schema = schema;
        self
    }

    pub fn build(self) -> CreateProcessorCommand {
        self.command
    }
}

/// A typical training algorithm: three ordered parameters and a metric schema
pub fn random_forest() -> CreateProcessorCommand {
    ProcessorFixture::algorithm("random-forest")
        .with_output_data_type(DataType::Model)
        .with_parameter(ProcessorParameter::new("n_estimators", ParameterType::Integer).required())
        .with_parameter(
            ProcessorParameter::new("max_depth", ParameterType::Integer).with_default_value("8"),
        )
        .with_parameter(
            ProcessorParameter::new("criterion", ParameterType::String)
                .with_default_value("gini")
                .with_group("split"),
        )
        .with_output_file(OutputFile::new("model.pkl").with_data_type(DataType::Model))
        .with_metric_schema(
            MetricSchema::new(MetricType::Precision)
                .with_ground_truth("label")
                .with_prediction("predicted"),
        )
        .build()
}

pub fn parameters(names: &[&str]) -> Vec<ProcessorParameter> {
    names
        .iter()
        .map(|name| ProcessorParameter::new(*name, ParameterType::String))
        .collect()
}
