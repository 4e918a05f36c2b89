// tests for decision trace rendering

use ctrlq::{
    ControlResponse, DecisionTrace, Status, TraceBlock, evidence_label, format_confidence,
};

fn response(status: Status, message: &str, answer: Option<&str>, evidence: u64) -> ControlResponse {
    ControlResponse {
        status,
        message: message.to_string(),
        reason_code: "REASON".to_string(),
        confidence: 0.5,
        evidence_count: evidence,
        answer: answer.map(str::to_string),
        request_id: None,
        extra: Default::default(),
    }
}

#[test]
fn test_confidence_two_decimals() {
    assert_eq!(format_confidence(0.873), "0.87");
    assert_eq!(format_confidence(1.0), "1.00");
    assert_eq!(format_confidence(0.92), "0.92");
    assert_eq!(format_confidence(0.0), "0.00");
    assert_eq!(format_confidence(12.3456), "12.35");
}

#[test]
fn test_confidence_out_of_range_is_shown_as_is() {
    assert_eq!(format_confidence(-0.25), "-0.25");
    assert_eq!(format_confidence(3.0), "3.00");
}

#[test]
fn test_confidence_rounds_ties_up() {
    assert_eq!(format_confidence(0.125), "0.13");
    assert_eq!(format_confidence(0.375), "0.38");
    assert_eq!(format_confidence(0.625), "0.63");
    assert_eq!(format_confidence(0.875), "0.88");
    assert_eq!(format_confidence(2.125), "2.13");
    assert_eq!(format_confidence(-0.125), "-0.13");
}

#[test]
fn test_confidence_near_tie_keeps_binary_value() {
    // 1.005 is stored just below the half
    assert_eq!(format_confidence(1.005), "1.00");
    assert_eq!(format_confidence(0.25), "0.25");
    assert_eq!(format_confidence(0.5), "0.50");
}

#[test]
fn test_evidence_singular() {
    assert_eq!(evidence_label(1), "1 source");
}

#[test]
fn test_evidence_plural() {
    assert_eq!(evidence_label(0), "0 sources");
    assert_eq!(evidence_label(2), "2 sources");
    assert_eq!(evidence_label(11), "11 sources");
}

#[test]
fn test_allow_with_answer_shows_answer_only() {
    let r = response(Status::Allow, "internal note", Some("The answer."), 1);
    let trace = DecisionTrace::from_response(&r);

    assert_eq!(trace.block, Some(TraceBlock::Answer("The answer.")));

    let text = trace.to_string();
    assert!(text.contains("The answer."));
    assert!(!text.contains("internal note"));
    assert!(!text.contains("Response"));
}

#[test]
fn test_allow_without_answer_has_no_block() {
    let r = response(Status::Allow, "nothing to add", None, 2);
    let trace = DecisionTrace::from_response(&r);

    assert_eq!(trace.block, None);
    let text = trace.to_string();
    assert!(text.contains("Status:     ALLOW"));
    assert!(text.contains("2 sources"));
    assert!(!text.contains("Answer"));
}

#[test]
fn test_allow_with_empty_answer_has_no_block() {
    let r = response(Status::Allow, "", Some(""), 2);
    assert_eq!(DecisionTrace::from_response(&r).block, None);
}

#[test]
fn test_abstain_shows_message() {
    let r = response(Status::Abstain, "Request violates policy.", None, 0);
    let trace = DecisionTrace::from_response(&r);

    assert_eq!(
        trace.block,
        Some(TraceBlock::Response("Request violates policy."))
    );
    assert!(trace.to_string().contains("Request violates policy."));
}

#[test]
fn test_abstain_suppresses_answer() {
    let r = response(Status::Abstain, "refused", Some("leaked answer"), 0);
    let trace = DecisionTrace::from_response(&r);

    assert_eq!(trace.block, Some(TraceBlock::Response("refused")));
    assert!(!trace.to_string().contains("leaked answer"));
}

#[test]
fn test_trace_fields() {
    let mut r = response(Status::Allow, "", Some("a"), 1);
    r.confidence = 0.873;
    r.reason_code = "POLICY_MATCH".to_string();
    r.request_id = Some("req-1".to_string());

    let trace = DecisionTrace::from_response(&r);
    assert_eq!(trace.status, Status::Allow);
    assert_eq!(trace.reason_code, "POLICY_MATCH");
    assert_eq!(trace.confidence, "0.87");
    assert_eq!(trace.evidence, "1 source");
    assert!(trace.to_string().contains("Request:    req-1"));
}
