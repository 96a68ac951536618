use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use askviz::surface::{ChartFileRenderer, ConsoleSurface, OutputFormat};
use askviz::{Config, Controller, HttpAskClient, SubmitOutcome};

/// Ask a question of the /ask endpoint and render the step-by-step answer
#[derive(Parser, Debug)]
#[command(name = "askviz", version)]
struct Cli {
    /// Question to send; read from stdin when omitted
    question: Option<String>,

    /// Ask the endpoint for chart data alongside the answer
    #[arg(long)]
    visualize: bool,

    /// Endpoint URL (overrides config and ASKVIZ_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Where to write the chart configuration JSON
    #[arg(long)]
    chart_out: Option<PathBuf>,

    /// Read questions line by line from stdin until EOF
    #[arg(long, short = 'i')]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint.clone() {
        config.client.endpoint = endpoint;
    }
    if let Some(path) = cli.chart_out.clone() {
        config.chart.output = path;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.runtime.log_level))
        .with_writer(std::io::stderr)
        .init();

    let client = HttpAskClient::from_config(&config)?;
    info!(endpoint = client.endpoint(), "askviz starting");

    let visualize = cli.visualize || config.client.visualize;
    let renderer = ChartFileRenderer::new(config.chart.output.clone());
    if visualize {
        info!(path = %renderer.path().display(), "charts will be written here");
    }
    let controller = Controller::new(client, ConsoleSurface::stdout(cli.format), renderer);

    if cli.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            controller.submit(question, visualize).await;
        }
        let _chart = controller.into_chart_widget();
        return Ok(());
    }

    let question = match cli.question {
        Some(q) => q,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read question from stdin")?;
            buf.trim().to_string()
        }
    };

    let outcome = controller.submit(&question, visualize).await;
    let _chart = controller.into_chart_widget();
    if let SubmitOutcome::Failed { .. } = outcome {
        std::process::exit(1);
    }
    Ok(())
}
