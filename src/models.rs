//! Wire types for the `/ask` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::deserializers::{
    de_labels_forgiving, de_numbers_forgiving, de_option_numbers_forgiving,
};
use crate::error::{AskError, Result};

/// Body sent to the endpoint for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub visualize: bool,
}

impl QuestionRequest {
    pub fn new(question: impl Into<String>, visualize: bool) -> Self {
        Self {
            question: question.into(),
            visualize,
        }
    }
}

/// One labelled unit of the answer's reasoning trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub steps: Vec<Step>,
    pub final_answer: String,
    /// Kept raw so a bad chart payload never costs the answer; see
    /// [`VisualizationPayload::from_value`].
    #[serde(
        rename = "visualizationData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub visualization_data: Option<Value>,
}

/// Chart data returned alongside an answer.
///
/// The endpoint sends either `{labels, values}` (single series) or
/// `{labels, datasets}` (multi series). Both shapes share this struct; use
/// [`VisualizationPayload::series`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPayload {
    #[serde(default, deserialize_with = "de_labels_forgiving")]
    pub labels: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de_option_numbers_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<Dataset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(default, deserialize_with = "de_numbers_forgiving")]
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

/// Borrowed view of the series carried by a payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Series<'a> {
    Single(&'a [f64]),
    Multi(&'a [Dataset]),
}

impl VisualizationPayload {
    pub fn single(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            labels,
            values: Some(values),
            datasets: None,
        }
    }

    pub fn multi(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            labels,
            values: None,
            datasets: Some(datasets),
        }
    }

    /// Read the raw `visualizationData` value. Anything unreadable is an
    /// [`AskError::Visualization`], never a failure of the whole answer.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value)
            .map_err(|e| AskError::visualization(format!("unreadable chart data: {}", e)))
    }

    /// `datasets` wins when both are present; `None` when neither is.
    pub fn series(&self) -> Option<Series<'_>> {
        match (&self.datasets, &self.values) {
            (Some(datasets), _) => Some(Series::Multi(datasets)),
            (None, Some(values)) => Some(Series::Single(values)),
            (None, None) => None,
        }
    }
}
