use crate::dto::student_dto::AnswerSubmission;
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::services::student_service::StudentService;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;

#[cfg(test)]
use mockall::automock;

/// Where finalized answers go at submission time. One call per question;
/// the backend treats duplicate submissions as idempotent writes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnswerSink: Send + Sync {
    async fn submit_answer(&self, answer: AnswerSubmission) -> Result<()>;
}

#[async_trait]
impl AnswerSink for StudentService {
    async fn submit_answer(&self, answer: AnswerSubmission) -> Result<()> {
        self.submit(&answer).await
    }
}

#[async_trait]
impl<T: AnswerSink + ?Sized> AnswerSink for Arc<T> {
    async fn submit_answer(&self, answer: AnswerSubmission) -> Result<()> {
        (**self).submit_answer(answer).await
    }
}

/// One student's timed attempt at an exam's question set.
///
/// Answers live only in memory until submission; navigation is sequential;
/// flags are cosmetic and never leave the client. The countdown starts at
/// `duration_minutes * 60` and finalizes the session exactly once when it
/// reaches zero, however many ticks arrive after that.
#[derive(Debug)]
pub struct ExamSession {
    user_id: i64,
    exam_id: i64,
    questions: Vec<Question>,
    answers: HashMap<i64, String>,
    flagged: HashSet<i64>,
    current: usize,
    remaining_secs: u64,
    expired: bool,
}

impl ExamSession {
    pub fn new(user_id: i64, exam_id: i64, duration_minutes: u32, questions: Vec<Question>) -> Self {
        Self {
            user_id,
            exam_id,
            questions,
            answers: HashMap::new(),
            flagged: HashSet::new(),
            current: 0,
            remaining_secs: u64::from(duration_minutes) * 60,
            expired: false,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn answer_for(&self, question_id: i64) -> &str {
        self.answers
            .get(&question_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn record_answer(&mut self, question_id: i64, text: String) {
        self.answers.insert(question_id, text);
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.is_empty()).count()
    }

    pub fn is_flagged(&self, question_id: i64) -> bool {
        self.flagged.contains(&question_id)
    }

    pub fn toggle_flag(&mut self, question_id: i64) {
        if !self.flagged.remove(&question_id) {
            self.flagged.insert(question_id);
        }
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Advances the countdown by one second. Returns `true` exactly once,
    /// on the tick that exhausts the clock; every later tick is a no-op.
    pub fn tick(&mut self) -> bool {
        if self.expired {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.expired = true;
            return true;
        }
        false
    }

    /// One payload per question in question order, unanswered ones as empty
    /// strings. Manual and auto submission both finalize every answer.
    pub fn payloads(&self) -> Vec<AnswerSubmission> {
        self.questions
            .iter()
            .map(|q| AnswerSubmission {
                user_id: self.user_id,
                exam_id: self.exam_id,
                question_id: q.question_id,
                student_answer: self.answer_for(q.question_id).to_string(),
                is_finalized: true,
            })
            .collect()
    }

    /// Fires every payload concurrently, with no ordering guarantee and no
    /// atomicity: submissions that landed before a failure stay applied
    /// server-side, and nothing is retried. The first failure is reported
    /// after all requests have settled.
    pub async fn submit_all<S>(&self, sink: &S) -> Result<()>
    where
        S: AnswerSink + Clone + 'static,
    {
        let mut tasks = JoinSet::new();
        for payload in self.payloads() {
            let sink = sink.clone();
            tasks.spawn(async move { sink.submit_answer(payload).await });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| Error::Internal(format!("submission task failed: {e}")))
                .and_then(|r| r);
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "answer submission failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, mark: u32) -> Question {
        Question {
            question_id: id,
            text: format!("Question {id}"),
            mark,
            model_answer: None,
            module_id: None,
            exam_id: Some(1),
            module_name: None,
        }
    }

    fn session(duration_minutes: u32, ids: &[i64]) -> ExamSession {
        let questions = ids.iter().map(|&id| question(id, 5)).collect();
        ExamSession::new(7, 1, duration_minutes, questions)
    }

    #[test]
    fn countdown_starts_at_duration_times_sixty() {
        let s = session(90, &[1]);
        assert_eq!(s.remaining_secs(), 90 * 60);
    }

    #[test]
    fn each_tick_decrements_by_exactly_one() {
        let mut s = session(2, &[1]);
        s.tick();
        s.tick();
        s.tick();
        assert_eq!(s.remaining_secs(), 117);
        assert!(!s.is_expired());
    }

    #[test]
    fn expiry_fires_exactly_once_under_repeated_ticks() {
        let mut s = session(1, &[1]);
        let mut fires = 0;
        for _ in 0..200 {
            if s.tick() {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
        assert!(s.is_expired());
        assert_eq!(s.remaining_secs(), 0);
    }

    #[test]
    fn navigation_is_clamped_to_the_question_range() {
        let mut s = session(10, &[1, 2, 3]);
        s.previous();
        assert_eq!(s.current_index(), 0);
        s.next();
        s.next();
        s.next();
        s.next();
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.current_question().unwrap().question_id, 3);
    }

    #[test]
    fn flags_toggle_and_do_not_affect_payloads() {
        let mut s = session(10, &[1, 2]);
        s.toggle_flag(2);
        assert!(s.is_flagged(2));
        s.toggle_flag(2);
        assert!(!s.is_flagged(2));

        s.toggle_flag(1);
        let payloads = s.payloads();
        assert_eq!(payloads.len(), 2);
        assert!(payloads.iter().all(|p| p.is_finalized));
    }

    #[test]
    fn payloads_cover_every_question_with_empty_strings_for_unanswered() {
        let mut s = session(10, &[1, 2, 3]);
        s.record_answer(2, "An answer".to_string());

        let payloads = s.payloads();
        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[0].student_answer, "");
        assert_eq!(payloads[1].student_answer, "An answer");
        assert_eq!(payloads[2].student_answer, "");
        assert!(payloads.iter().all(|p| p.user_id == 7 && p.exam_id == 1));
    }

    #[tokio::test]
    async fn submit_all_issues_one_call_per_question() {
        let s = session(10, &[1, 2, 3, 4]);
        let mut mock = MockAnswerSink::new();
        mock.expect_submit_answer().times(4).returning(|_| Ok(()));
        let sink = Arc::new(mock);

        s.submit_all(&sink).await.unwrap();
    }

    #[tokio::test]
    async fn submit_all_reports_failure_but_never_retries() {
        let s = session(10, &[1, 2, 3]);
        let mut mock = MockAnswerSink::new();
        mock.expect_submit_answer()
            .times(3)
            .returning(|payload| {
                if payload.question_id == 2 {
                    Err(Error::api(500, "Failed to submit answer"))
                } else {
                    Ok(())
                }
            });
        let sink = Arc::new(mock);

        let err = s.submit_all(&sink).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
    }
}
