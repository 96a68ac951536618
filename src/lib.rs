pub mod chart;
pub mod clients;
pub mod config;
pub mod controller;
pub mod deserializers;
pub mod error;
pub mod models;
pub mod render;
pub mod surface;

pub use chart::{ChartAdapter, ChartConfig, build_config};
pub use clients::{AskTransport, HttpAskClient};
pub use config::Config;
pub use controller::{Controller, SubmitOutcome};
pub use error::{AskError, Result};
pub use models::{AnswerResponse, Dataset, QuestionRequest, Step, VisualizationPayload};

