//! Child records owned by a data processor
//!
//! Both live in their own tables but only ever through their owner: they are
//! written, replaced and deleted together with the parent row. List position
//! is the binding order and is persisted explicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{DataType, ParameterType};

/// A named, typed argument passed to the processor command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorParameter {
    pub id: Uuid,
    pub name: String,
    pub parameter_type: ParameterType,
    pub required: bool,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub group: String,
}

impl ProcessorParameter {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parameter_type,
            required: false,
            default_value: String::new(),
            description: String::new(),
            group: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}

/// A file the processor writes when it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub data_type: DataType,
}

impl OutputFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: String::new(),
            data_type: DataType::Any,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}
