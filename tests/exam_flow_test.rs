use async_trait::async_trait;
use exam_console::dto::student_dto::AnswerSubmission;
use exam_console::error::{Error, Result};
use exam_console::exam_session::{AnswerSink, ExamSession};
use exam_console::models::question::Question;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn question(id: i64) -> Question {
    Question {
        question_id: id,
        text: format!("Question {id}"),
        mark: 5,
        model_answer: None,
        module_id: None,
        exam_id: Some(1),
        module_name: None,
    }
}

fn session(duration_minutes: u32, ids: &[i64]) -> ExamSession {
    ExamSession::new(7, 1, duration_minutes, ids.iter().copied().map(question).collect())
}

/// Records every submission it receives; fails (without retrying anything
/// itself) for one configured question id.
#[derive(Clone)]
struct RecordingSink {
    calls: Arc<Mutex<Vec<AnswerSubmission>>>,
    fail_on: Option<i64>,
}

impl RecordingSink {
    fn new(fail_on: Option<i64>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on,
        }
    }

    fn calls(&self) -> Vec<AnswerSubmission> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerSink for RecordingSink {
    async fn submit_answer(&self, answer: AnswerSubmission) -> Result<()> {
        let question_id = answer.question_id;
        self.calls.lock().unwrap().push(answer);
        if self.fail_on == Some(question_id) {
            Err(Error::api(500, "Failed to submit answer"))
        } else {
            Ok(())
        }
    }
}

/// The countdown driven by a real one-second interval under the paused
/// clock: ticks auto-advance, and the expiry latch still fires only once
/// no matter how many ticks follow.
#[tokio::test(start_paused = true)]
async fn ticker_driven_countdown_expires_exactly_once() {
    let mut session = session(1, &[1]);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await; // first tick is immediate

    let mut fires = 0;
    for _ in 0..90 {
        ticker.tick().await;
        if session.tick() {
            fires += 1;
        }
    }

    assert_eq!(fires, 1);
    assert!(session.is_expired());
    assert_eq!(session.remaining_secs(), 0);
}

#[tokio::test(start_paused = true)]
async fn countdown_survives_a_blocked_loop_by_catching_up() {
    let mut session = session(1, &[1]);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    // Simulate the loop being stuck in answer entry for five seconds; the
    // interval's missed ticks are delivered in a burst afterwards.
    tokio::time::sleep(Duration::from_secs(5)).await;
    for _ in 0..5 {
        ticker.tick().await;
        session.tick();
    }
    assert_eq!(session.remaining_secs(), 55);
}

#[tokio::test]
async fn every_question_is_submitted_answered_or_not() {
    let mut session = session(30, &[10, 20, 30]);
    session.record_answer(20, "Borrow checker".to_string());

    let sink = RecordingSink::new(None);
    session.submit_all(&sink).await.unwrap();

    let calls = sink.calls();
    assert_eq!(calls.len(), 3);
    let ids: HashSet<i64> = calls.iter().map(|c| c.question_id).collect();
    assert_eq!(ids, HashSet::from([10, 20, 30]));
    for call in &calls {
        assert_eq!(call.user_id, 7);
        assert_eq!(call.exam_id, 1);
        assert!(call.is_finalized);
        if call.question_id == 20 {
            assert_eq!(call.student_answer, "Borrow checker");
        } else {
            assert_eq!(call.student_answer, "");
        }
    }
}

/// No atomicity: a failing question does not stop the others, nothing is
/// rolled back or retried, and the failure surfaces after all requests
/// have settled.
#[tokio::test]
async fn partial_failure_still_sends_every_answer_once() {
    let mut session = session(30, &[1, 2, 3, 4]);
    session.record_answer(1, "a".to_string());
    session.record_answer(3, "c".to_string());

    let sink = RecordingSink::new(Some(3));
    let err = session.submit_all(&sink).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to submit answer");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let calls = sink.calls();
    assert_eq!(calls.len(), 4, "no retries, no early abort");
    let ids: HashSet<i64> = calls.iter().map(|c| c.question_id).collect();
    assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
}

#[tokio::test]
async fn expired_session_submits_the_same_payloads_as_a_manual_submit() {
    let mut session = session(1, &[1, 2]);
    session.record_answer(1, "final answer".to_string());
    while !session.is_expired() {
        session.tick();
    }

    let sink = RecordingSink::new(None);
    session.submit_all(&sink).await.unwrap();

    let calls = sink.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.is_finalized));
}
