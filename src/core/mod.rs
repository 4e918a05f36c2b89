// core logic - wire contract, service client, console state, trace rendering

mod client;
mod console;
mod contract;
mod models;
mod trace;

pub use client::{DEFAULT_SERVICE_URL, DecisionService, HttpDecisionService};
pub use console::{BUSY_LABEL, Console, Panel, QueryDraft, RequestState, SUBMIT_LABEL};
pub use contract::{ControlResponse, QueryRequest, Status};
pub use models::{EMBEDDING_MODELS, ModelPicker};
pub use trace::{DecisionTrace, TraceBlock, evidence_label, format_confidence};
