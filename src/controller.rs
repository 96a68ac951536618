//! Request/render controller: one submission in, one rendered answer out.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::chart::{self, ChartAdapter};
use crate::clients::AskTransport;
use crate::models::QuestionRequest;
use crate::render::ResponseView;
use crate::surface::{ChartRenderer, ChartWidget, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Answer rendered; `charted` tells whether a chart widget was (re)built.
    Answered { steps: usize, charted: bool },
    /// Request or parse failure, rendered as an error in the response area.
    Failed { message: String },
    /// Another submission was still in flight; nothing was sent.
    Busy,
}

struct ViewState<S, R: ChartRenderer> {
    surface: S,
    chart: ChartAdapter<R>,
}

pub struct Controller<T, S, R: ChartRenderer> {
    transport: T,
    state: Mutex<ViewState<S, R>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on drop, including when a submission future is
/// dropped mid-request.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T, S, R> Controller<T, S, R>
where
    T: AskTransport,
    S: Surface,
    R: ChartRenderer,
{
    pub fn new(transport: T, surface: S, renderer: R) -> Self {
        Self {
            transport,
            state: Mutex::new(ViewState {
                surface,
                chart: ChartAdapter::new(renderer),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Read-only access to the surface, e.g. for inspecting what was shown.
    pub async fn with_surface<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&S) -> O,
    {
        let state = self.state.lock().await;
        f(&state.surface)
    }

    pub async fn has_chart(&self) -> bool {
        self.state.lock().await.chart.has_widget()
    }

    /// Tear down the controller, keeping the last chart alive for the caller.
    pub fn into_chart_widget(self) -> Option<Box<dyn ChartWidget>> {
        self.state.into_inner().chart.take_widget()
    }

    /// Send `question` and render whatever comes back. Never returns an error:
    /// failures end up in the response area.
    pub async fn submit(&self, question: &str, visualize: bool) -> SubmitOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::warn!("submission ignored, previous request still in flight");
            return SubmitOutcome::Busy;
        };

        let span = tracing::info_span!("submit", id = %Uuid::new_v4(), visualize);
        self.run(QuestionRequest::new(question, visualize))
            .instrument(span)
            .await
    }

    async fn run(&self, request: QuestionRequest) -> SubmitOutcome {
        tracing::info!(chars = request.question.len(), "sending question");
        let result = self.transport.ask(&request).await;

        let mut state = self.state.lock().await;
        let ViewState {
            surface,
            chart: adapter,
        } = &mut *state;

        let answer = match result {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("ask failed: {}", e);
                let message = e.to_string();
                surface.show_response(&ResponseView::error(message.clone()));
                return SubmitOutcome::Failed { message };
            }
        };

        // Chart data is validated up front so its notice lands in the same
        // view; the widget itself is only touched after the text is shown.
        let mut view = ResponseView::from_answer(&answer);
        let config = match answer.visualization_data.as_ref().map(chart::prepare) {
            Some(Ok(config)) => Some(config),
            Some(Err(e)) => {
                tracing::warn!("chart skipped: {}", e);
                view.push_notice(format!("Chart unavailable: {}", e));
                None
            }
            None => None,
        };
        surface.show_response(&view);

        let charted = match config {
            Some(config) => match adapter.show(&config, surface).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("chart renderer failed: {}", e);
                    surface.set_chart_visible(false);
                    false
                }
            },
            None => {
                surface.set_chart_visible(false);
                false
            }
        };

        tracing::info!(steps = answer.steps.len(), charted, "answer rendered");
        SubmitOutcome::Answered {
            steps: answer.steps.len(),
            charted,
        }
    }
}
