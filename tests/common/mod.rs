#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use askviz::chart::ChartConfig;
use askviz::error::{AskError, Result};
use askviz::render::ResponseView;
use askviz::surface::{ChartRenderer, ChartWidget, Surface};
use askviz::{AnswerResponse, AskTransport, QuestionRequest};

/// Ordered record of surface and renderer calls, shareable between both.
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// What a surface was asked to show, shared with the test body.
#[derive(Debug, Default)]
pub struct Shown {
    pub views: Vec<ResponseView>,
    pub chart_visible: Option<bool>,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub shown: Arc<Mutex<Shown>>,
    pub events: EventLog,
}

impl Surface for RecordingSurface {
    fn show_response(&mut self, view: &ResponseView) {
        self.events.lock().unwrap().push("response".to_string());
        self.shown.lock().unwrap().views.push(view.clone());
    }

    fn set_chart_visible(&mut self, visible: bool) {
        self.events.lock().unwrap().push(format!("chart_visible={}", visible));
        self.shown.lock().unwrap().chart_visible = Some(visible);
    }
}

/// Counts live and created widgets, and keeps every config it was handed.
#[derive(Clone, Default)]
pub struct CountingRenderer {
    pub live: Arc<AtomicUsize>,
    pub created: Arc<AtomicUsize>,
    pub configs: Arc<Mutex<Vec<ChartConfig>>>,
    pub events: EventLog,
}

impl CountingRenderer {
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

struct CountedWidget {
    live: Arc<AtomicUsize>,
}

impl ChartWidget for CountedWidget {
    fn destroy(self: Box<Self>) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChartRenderer for CountingRenderer {
    async fn create(&mut self, config: &ChartConfig) -> Result<Box<dyn ChartWidget>> {
        self.events.lock().unwrap().push("chart_created".to_string());
        self.live.fetch_add(1, Ordering::SeqCst);
        self.created.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(config.clone());
        Ok(Box::new(CountedWidget {
            live: self.live.clone(),
        }))
    }
}

/// Renderer whose widget creation always fails.
#[derive(Clone, Default)]
pub struct BrokenRenderer;

#[async_trait]
impl ChartRenderer for BrokenRenderer {
    async fn create(&mut self, _config: &ChartConfig) -> Result<Box<dyn ChartWidget>> {
        Err(AskError::Io {
            message: "canvas unavailable".to_string(),
        })
    }
}

/// Replays canned results in order and records the requests it saw.
#[derive(Default)]
pub struct ScriptedTransport {
    pub replies: Mutex<VecDeque<Result<AnswerResponse>>>,
    pub requests: Arc<Mutex<Vec<QuestionRequest>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<AnswerResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Arc::default(),
        }
    }
}

#[async_trait]
impl AskTransport for ScriptedTransport {
    async fn ask(&self, request: &QuestionRequest) -> Result<AnswerResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AskError::Transport {
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}
