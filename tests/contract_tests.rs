// tests for the decision service wire contract

use ctrlq::{ControlResponse, QueryRequest, Status};

#[test]
fn test_parse_allow() {
    let body = r#"{
        "status": "ALLOW",
        "message": "",
        "reason_code": "POLICY_MATCH",
        "confidence": 0.92,
        "evidence_count": 3,
        "answer": "Refunds are processed within 14 days."
    }"#;

    let response = ControlResponse::parse(body).unwrap();
    assert_eq!(response.status, Status::Allow);
    assert_eq!(response.reason_code, "POLICY_MATCH");
    assert_eq!(response.evidence_count, 3);
    assert_eq!(
        response.answer.as_deref(),
        Some("Refunds are processed within 14 days.")
    );
    assert!(response.request_id.is_none());
}

#[test]
fn test_parse_abstain_null_answer() {
    let body = r#"{"status":"ABSTAIN","message":"Request violates policy.","reason_code":"PROMPT_INJECTION","confidence":0.99,"evidence_count":0,"answer":null}"#;

    let response = ControlResponse::parse(body).unwrap();
    assert_eq!(response.status, Status::Abstain);
    assert_eq!(response.message, "Request violates policy.");
    assert!(response.answer.is_none());
}

#[test]
fn test_parse_missing_answer_and_request_id() {
    let body = r#"{"status":"ALLOW","message":"ok","reason_code":"safe_to_answer","confidence":1,"evidence_count":2,"request_id":"7f1c"}"#;

    let response = ControlResponse::parse(body).unwrap();
    assert!(response.answer.is_none());
    assert_eq!(response.confidence, 1.0);
    assert_eq!(response.request_id.as_deref(), Some("7f1c"));
}

#[test]
fn test_reject_unknown_status() {
    let body = r#"{"status":"CLARIFY","message":"","reason_code":"x","confidence":0.5,"evidence_count":0,"answer":null}"#;
    assert!(ControlResponse::parse(body).is_err());
}

#[test]
fn test_reject_lowercase_status() {
    let body = r#"{"status":"allow","message":"","reason_code":"x","confidence":0.5,"evidence_count":0}"#;
    assert!(ControlResponse::parse(body).is_err());
}

#[test]
fn test_reject_missing_reason_code() {
    let body = r#"{"status":"ALLOW","message":"","confidence":0.5,"evidence_count":1}"#;
    assert!(ControlResponse::parse(body).is_err());
}

#[test]
fn test_reject_negative_evidence() {
    let body = r#"{"status":"ALLOW","message":"","reason_code":"x","confidence":0.5,"evidence_count":-1}"#;
    assert!(ControlResponse::parse(body).is_err());
}

#[test]
fn test_reject_non_json() {
    let err = ControlResponse::parse("<html>Bad Gateway</html>").unwrap_err();
    assert!(err.to_string().contains("malformed response"));
}

#[test]
fn test_unknown_fields_survive_to_json() {
    let body = r#"{"status":"ALLOW","message":"","reason_code":"POLICY_MATCH","confidence":0.92,"evidence_count":3,"answer":"yes","latency_ms":41,"sources":["kb/refunds.md"]}"#;

    let response = ControlResponse::parse(body).unwrap();
    assert_eq!(response.extra["latency_ms"], 41);

    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["latency_ms"], 41);
    assert_eq!(json["sources"][0], "kb/refunds.md");
    assert_eq!(json["reason_code"], "POLICY_MATCH");
    assert_eq!(json["answer"], "yes");
    assert!(json.get("request_id").is_none());
}

#[test]
fn test_request_without_model() {
    let request = QueryRequest {
        query: "  what is the refund policy?  ".to_string(),
        embedding_model: None,
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "query": "  what is the refund policy?  " })
    );
}

#[test]
fn test_request_with_model() {
    let request = QueryRequest {
        query: "q".to_string(),
        embedding_model: Some("embedding-base-768".to_string()),
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["embedding_model"], "embedding-base-768");
    assert_eq!(json["query"], "q");
}
