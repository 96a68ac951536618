//! Chart adapter: turns a [`VisualizationPayload`] into a bar chart
//! configuration and manages the single live chart widget.

use serde::Serialize;
use serde_json::Value;

use crate::error::{AskError, Result};
use crate::models::{Series, VisualizationPayload};
use crate::surface::{ChartRenderer, ChartWidget, Surface};

pub const SINGLE_SERIES_LABEL: &str = "Work Orders";
pub const SINGLE_SERIES_BACKGROUND: &str = "rgba(54, 162, 235, 0.6)";
pub const SINGLE_SERIES_BORDER: &str = "rgba(54, 162, 235, 1)";
pub const BORDER_WIDTH: u32 = 1;

/// Default (background, border) colours for series without explicit colours.
/// Series `i` takes entry `i % PALETTE.len()`.
pub const PALETTE: [(&str, &str); 5] = [
    ("rgba(54, 162, 235, 0.6)", "rgba(54, 162, 235, 1)"),
    ("rgba(255, 99, 132, 0.6)", "rgba(255, 99, 132, 1)"),
    ("rgba(75, 192, 192, 0.6)", "rgba(75, 192, 192, 1)"),
    ("rgba(255, 206, 86, 0.6)", "rgba(255, 206, 86, 1)"),
    ("rgba(153, 102, 255, 0.6)", "rgba(153, 102, 255, 1)"),
];

/// Renderer-ready configuration: `{type, data: {labels, datasets}, options}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

fn palette_entry(index: usize) -> (&'static str, &'static str) {
    PALETTE[index % PALETTE.len()]
}

/// Build the bar chart configuration for a payload.
///
/// Fails with [`AskError::Visualization`] when the payload carries neither
/// `values` nor `datasets`, or when a series length differs from the label
/// count.
pub fn build_config(payload: &VisualizationPayload) -> Result<ChartConfig> {
    let labels = payload.labels.clone();
    let series = payload
        .series()
        .ok_or_else(|| AskError::visualization("payload has neither values nor datasets"))?;

    let (datasets, plugins) = match series {
        Series::Single(values) => {
            check_len(SINGLE_SERIES_LABEL, values.len(), labels.len())?;
            let dataset = ChartDataset {
                label: SINGLE_SERIES_LABEL.to_string(),
                data: values.to_vec(),
                background_color: SINGLE_SERIES_BACKGROUND.to_string(),
                border_color: SINGLE_SERIES_BORDER.to_string(),
                border_width: BORDER_WIDTH,
            };
            (vec![dataset], None)
        }
        Series::Multi(inputs) => {
            let mut datasets = Vec::with_capacity(inputs.len());
            for (i, input) in inputs.iter().enumerate() {
                check_len(&input.label, input.data.len(), labels.len())?;
                let (bg, border) = palette_entry(i);
                datasets.push(ChartDataset {
                    label: input.label.clone(),
                    data: input.data.clone(),
                    background_color: input
                        .background_color
                        .clone()
                        .unwrap_or_else(|| bg.to_string()),
                    border_color: input
                        .border_color
                        .clone()
                        .unwrap_or_else(|| border.to_string()),
                    border_width: BORDER_WIDTH,
                });
            }
            let plugins = Plugins {
                legend: Legend { display: true },
            };
            (datasets, Some(plugins))
        }
    };

    Ok(ChartConfig {
        chart_type: "bar".to_string(),
        data: ChartData { labels, datasets },
        options: ChartOptions {
            scales: Scales {
                y: Axis {
                    begin_at_zero: true,
                },
            },
            plugins,
        },
    })
}

/// [`build_config`] for the raw `visualizationData` of an answer.
pub fn prepare(value: &Value) -> Result<ChartConfig> {
    build_config(&VisualizationPayload::from_value(value)?)
}

fn check_len(series: &str, got: usize, labels: usize) -> Result<()> {
    if got != labels {
        return Err(AskError::visualization(format!(
            "series '{}' has {} values but there are {} labels",
            series, got, labels
        )));
    }
    Ok(())
}

/// Owns the chart renderer and at most one live widget.
pub struct ChartAdapter<R: ChartRenderer> {
    renderer: R,
    widget: Option<Box<dyn ChartWidget>>,
}

impl<R: ChartRenderer> ChartAdapter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            widget: None,
        }
    }

    pub fn has_widget(&self) -> bool {
        self.widget.is_some()
    }

    /// Show the chart container and replace the live widget with one built
    /// from `payload`.
    ///
    /// The payload is validated before anything is touched, so a malformed
    /// payload leaves the current widget and container state alone.
    pub async fn render(
        &mut self,
        payload: &VisualizationPayload,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        let config = build_config(payload)?;
        self.show(&config, surface).await
    }

    /// Replace the live widget with one built from an already validated
    /// configuration.
    pub async fn show(&mut self, config: &ChartConfig, surface: &mut dyn Surface) -> Result<()> {
        surface.set_chart_visible(true);
        self.dispose();
        let widget = self.renderer.create(config).await?;
        tracing::debug!(
            datasets = config.data.datasets.len(),
            labels = config.data.labels.len(),
            "chart widget created"
        );
        self.widget = Some(widget);
        Ok(())
    }

    /// Hand the live widget to the caller without destroying it.
    pub fn take_widget(&mut self) -> Option<Box<dyn ChartWidget>> {
        self.widget.take()
    }

    /// Destroy the live widget, if any.
    pub fn dispose(&mut self) {
        if let Some(widget) = self.widget.take() {
            widget.destroy();
            tracing::debug!("chart widget destroyed");
        }
    }
}

impl<R: ChartRenderer> Drop for ChartAdapter<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
