// tests for the one-shot ask command

use async_trait::async_trait;
use std::sync::Mutex;

use ctrlq::cli::ask;
use ctrlq::{Console, ControlResponse, DecisionService, Error, QueryRequest, Status};

struct RecordingService {
    fail: bool,
    seen: Mutex<Vec<QueryRequest>>,
}

impl RecordingService {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl DecisionService for RecordingService {
    async fn evaluate(&self, request: &QueryRequest) -> Result<ControlResponse, Error> {
        self.seen.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(Error::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(ControlResponse {
            status: Status::Allow,
            message: String::new(),
            reason_code: "POLICY_MATCH".to_string(),
            confidence: 0.92,
            evidence_count: 3,
            answer: Some("Refunds are processed within 14 days.".to_string()),
            request_id: None,
            extra: Default::default(),
        })
    }
}

#[tokio::test]
async fn test_ask_blank_query_is_silent_success() {
    let service = RecordingService::new(false);

    let empty = ask(Console::new(), &service, String::new(), false).await;
    let blank = ask(Console::new(), &service, "   \n\t".to_string(), true).await;

    assert!(empty.is_ok());
    assert!(blank.is_ok());
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_ask_sends_one_request() {
    let service = RecordingService::new(false);

    let result = ask(Console::new(), &service, "refund?".to_string(), true).await;

    assert!(result.is_ok());
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_ask_failure_is_an_error() {
    let service = RecordingService::new(true);

    let err = ask(Console::new(), &service, "refund?".to_string(), false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}
