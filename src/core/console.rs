// query console - draft, one in-flight request, last verdict

use super::client::DecisionService;
use super::contract::{ControlResponse, QueryRequest};
use super::models::ModelPicker;
use super::trace::DecisionTrace;
use crate::Error;

pub const SUBMIT_LABEL: &str = "Submit";
pub const BUSY_LABEL: &str = "Evaluating…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Submitting,
    Failed(String),
}

/// What the console currently has to show below the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel<'a> {
    Empty,
    Busy,
    Failed(&'a str),
    Trace(DecisionTrace<'a>),
}

#[derive(Debug, Clone, Default)]
pub struct QueryDraft {
    pub text: String,
    /// Present only when model selection is enabled.
    pub models: Option<ModelPicker>,
}

impl QueryDraft {
    pub fn embedding_model(&self) -> Option<&str> {
        self.models.as_ref().map(|m| m.selected())
    }
}

#[derive(Debug, Clone)]
pub struct Console {
    draft: QueryDraft,
    state: RequestState,
    response: Option<ControlResponse>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            draft: QueryDraft::default(),
            state: RequestState::Idle,
            response: None,
        }
    }

    /// Console with the embedding-model selector enabled.
    pub fn with_models(models: ModelPicker) -> Self {
        Self {
            draft: QueryDraft {
                text: String::new(),
                models: Some(models),
            },
            ..Self::new()
        }
    }

    pub fn draft(&self) -> &QueryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QueryDraft {
        &mut self.draft
    }

    pub fn text(&self) -> &str {
        &self.draft.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn models(&self) -> Option<&ModelPicker> {
        self.draft.models.as_ref()
    }

    pub fn models_mut(&mut self) -> Option<&mut ModelPicker> {
        self.draft.models.as_mut()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn response(&self) -> Option<&ControlResponse> {
        self.response.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.state == RequestState::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() { BUSY_LABEL } else { SUBMIT_LABEL }
    }

    /// Starts a submission and returns the request to send, or `None` when
    /// the query is blank or a request is already in flight.
    pub fn submit(&mut self) -> Option<QueryRequest> {
        if self.is_busy() || self.draft.text.trim().is_empty() {
            return None;
        }

        self.state = RequestState::Submitting;
        self.response = None;
        tracing::debug!("console submitting");

        Some(QueryRequest {
            query: self.draft.text.clone(),
            embedding_model: self.draft.embedding_model().map(str::to_string),
        })
    }

    /// Records the outcome of the in-flight request. Ignored when nothing is
    /// in flight.
    pub fn settle(&mut self, outcome: Result<ControlResponse, Error>) {
        if !self.is_busy() {
            tracing::warn!("settle without a request in flight, dropping outcome");
            return;
        }

        match outcome {
            Ok(response) => {
                self.response = Some(response);
                self.state = RequestState::Idle;
            }
            Err(e) => {
                tracing::error!(error = %e, "query failed");
                self.state = RequestState::Failed(e.to_string());
            }
        }
    }

    /// Full submit cycle against `service`. Returns false when the submit
    /// was a no-op.
    pub async fn run(&mut self, service: &dyn DecisionService) -> bool {
        let Some(request) = self.submit() else {
            return false;
        };
        let outcome = service.evaluate(&request).await;
        self.settle(outcome);
        true
    }

    pub fn panel(&self) -> Panel<'_> {
        match (&self.state, &self.response) {
            (RequestState::Submitting, _) => Panel::Busy,
            (RequestState::Failed(message), _) => Panel::Failed(message),
            (RequestState::Idle, Some(response)) => {
                Panel::Trace(DecisionTrace::from_response(response))
            }
            (RequestState::Idle, None) => Panel::Empty,
        }
    }
}
