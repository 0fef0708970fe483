//! Catalog domain model
//!
//! Storage-agnostic types; the repositories in [`crate::repository`] map
//! them onto tables.

pub mod children;
pub mod metric_schema;
pub mod processor;
pub mod types;

pub use children::{OutputFile, ProcessorParameter};
pub use metric_schema::MetricSchema;
pub use processor::{AuditInfo, DataProcessor, NewDataProcessor};
pub use types::{DataProcessorType, DataType, MetricType, ParameterType};
