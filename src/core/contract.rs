// wire contract with the decision service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::Error;

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Allow,
    Abstain,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Allow => "ALLOW",
            Status::Abstain => "ABSTAIN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verdict returned by the decision service for one query.
///
/// Every field except `answer` and `request_id` is required; an unknown
/// `status` or a negative `evidence_count` fails to decode. Fields outside
/// the contract are kept in `extra` and written back out on serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: Status,
    pub message: String,
    pub reason_code: String,
    pub confidence: f64,
    pub evidence_count: u64,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ControlResponse {
    pub fn parse(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}
