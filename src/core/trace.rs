// decision trace - what gets shown for a verdict

use std::fmt;

use super::contract::{ControlResponse, Status};

/// The one block shown under the trace fields, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceBlock<'a> {
    Answer(&'a str),
    Response(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTrace<'a> {
    pub status: Status,
    pub reason_code: &'a str,
    pub confidence: String,
    pub evidence: String,
    pub request_id: Option<&'a str>,
    pub block: Option<TraceBlock<'a>>,
}

impl<'a> DecisionTrace<'a> {
    pub fn from_response(response: &'a ControlResponse) -> Self {
        // each block is gated on status alone, abstain never shows an answer
        let block = match response.status {
            Status::Allow => response
                .answer
                .as_deref()
                .filter(|a| !a.is_empty())
                .map(TraceBlock::Answer),
            Status::Abstain => Some(TraceBlock::Response(&response.message)),
        };

        Self {
            status: response.status,
            reason_code: &response.reason_code,
            confidence: format_confidence(response.confidence),
            evidence: evidence_label(response.evidence_count),
            request_id: response.request_id.as_deref(),
            block,
        }
    }
}

/// Two fixed decimals, with exact halves rounded away from zero.
pub fn format_confidence(confidence: f64) -> String {
    // the only binary values that sit exactly on a third-decimal 5 are odd eighths;
    // `{:.2}` would send those to even
    let eighths = confidence * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let rounded = (confidence * 100.0).round() / 100.0;
        return format!("{rounded:.2}");
    }
    format!("{confidence:.2}")
}

pub fn evidence_label(count: u64) -> String {
    let noun = if count == 1 { "source" } else { "sources" };
    format!("{count} {noun}")
}

impl fmt::Display for DecisionTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "─────── Decision Trace ───────")?;
        writeln!(f, "Status:     {}", self.status)?;
        writeln!(f, "Reason:     {}", self.reason_code)?;
        writeln!(f, "Confidence: {}", self.confidence)?;
        writeln!(f, "Evidence:   {}", self.evidence)?;
        if let Some(id) = self.request_id {
            writeln!(f, "Request:    {id}")?;
        }

        match self.block {
            Some(TraceBlock::Answer(answer)) => write!(f, "\nAnswer\n{answer}\n"),
            Some(TraceBlock::Response(message)) => write!(f, "\nResponse\n{message}\n"),
            None => Ok(()),
        }
    }
}
