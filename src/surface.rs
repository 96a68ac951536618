//! Rendering surface seams and the native implementations used by the CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::chart::ChartConfig;
use crate::error::Result;
use crate::render::ResponseView;

/// Where the controller puts its output: a response area and a chart
/// container whose visibility it toggles.
pub trait Surface: Send {
    fn show_response(&mut self, view: &ResponseView);
    fn set_chart_visible(&mut self, visible: bool);
}

/// Factory for chart widgets (the external charting library).
#[async_trait]
pub trait ChartRenderer: Send {
    async fn create(&mut self, config: &ChartConfig) -> Result<Box<dyn ChartWidget>>;
}

/// A live chart instance. Consumed on destroy so it cannot be reused.
pub trait ChartWidget: Send {
    fn destroy(self: Box<Self>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Html,
    #[default]
    Text,
}

/// Writes rendered responses to a writer (stdout for the CLI).
pub struct ConsoleSurface<W: Write + Send> {
    out: W,
    format: OutputFormat,
    chart_visible: bool,
}

impl ConsoleSurface<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write + Send> ConsoleSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            chart_visible: false,
        }
    }

    pub fn chart_visible(&self) -> bool {
        self.chart_visible
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> Surface for ConsoleSurface<W> {
    fn show_response(&mut self, view: &ResponseView) {
        let rendered = match self.format {
            OutputFormat::Html => view.to_html(),
            OutputFormat::Text => view.to_text(),
        };
        if let Err(e) = writeln!(self.out, "{}", rendered).and_then(|_| self.out.flush()) {
            tracing::warn!("failed to write response: {}", e);
        }
    }

    fn set_chart_visible(&mut self, visible: bool) {
        if self.chart_visible != visible {
            tracing::debug!(visible, "chart container visibility changed");
        }
        self.chart_visible = visible;
    }
}

/// Renders charts by writing their configuration as JSON to a fixed path.
/// A Chart.js page (or any other consumer) can pick the file up from there.
#[derive(Debug, Clone)]
pub struct ChartFileRenderer {
    path: PathBuf,
}

impl ChartFileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ChartRenderer for ChartFileRenderer {
    async fn create(&mut self, config: &ChartConfig) -> Result<Box<dyn ChartWidget>> {
        let json = serde_json::to_string_pretty(config)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        tracing::info!(path = %self.path.display(), "chart configuration written");
        Ok(Box::new(ChartFile {
            path: self.path.clone(),
        }))
    }
}

struct ChartFile {
    path: PathBuf,
}

impl ChartWidget for ChartFile {
    // Synchronous: also runs from `ChartAdapter`'s Drop.
    fn destroy(self: Box<Self>) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), "failed to remove chart file: {}", e),
        }
    }
}
