use serde::{Deserialize, Serialize};

use super::types::MetricType;

/// Metric-evaluation settings embedded in a data processor row
///
/// Has no identity of its own; it is stored in the `metric_schema_*` columns
/// of its owner and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricSchema {
    pub metric_type: MetricType,
    #[serde(default)]
    pub ground_truth: String,
    #[serde(default)]
    pub prediction: String,
    /// Free-form serialized metric configuration
    #[serde(default)]
    pub json_blob: String,
}

impl MetricSchema {
    pub fn new(metric_type: MetricType) -> Self {
        Self {
            metric_type,
            ground_truth: String::new(),
            prediction: String::new(),
            json_blob: String::new(),
        }
    }

    pub fn with_ground_truth(mut self, ground_truth: impl Into<String>) -> Self {
        self.ground_truth = ground_truth.into();
        self
    }

    pub fn with_prediction(mut self, prediction: impl Into<String>) -> Self {
        self.prediction = prediction.into();
        self
    }

    pub fn with_json_blob(mut self, json_blob: impl Into<String>) -> Self {
        self.json_blob = json_blob.into();
        self
    }
}
