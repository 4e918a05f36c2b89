// ctrlq library - query console for a control-plane decision service

pub mod cli;
mod core;
mod error;
mod logging;
mod output;
pub mod tui;

pub use self::core::{
    BUSY_LABEL, Console, ControlResponse, DEFAULT_SERVICE_URL, DecisionService, DecisionTrace,
    EMBEDDING_MODELS, HttpDecisionService, ModelPicker, Panel, QueryDraft, QueryRequest,
    RequestState, SUBMIT_LABEL, Status, TraceBlock, evidence_label, format_confidence,
};
pub use error::Error;
pub use output::Output;
