use crate::dto::lecturer_dto::{ExamPayload, ExamUpdate, QuestionPayload};
use crate::error::{Error, Result};
use crate::models::exam::ExamStatus;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use validator::Validate;

/// File-backed mirror of an exam being authored, one JSON file per draft
/// key. Written on every change and cleared only on successful publish; its
/// purpose is crash recovery, not correctness. Last writer wins and nothing
/// is ever reconciled against server state.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

/// Key for the create-exam screen's draft.
pub const CREATE_DRAFT_KEY: &str = "exam-draft";

/// Key for the edit-exam screen's draft, scoped per exam.
pub fn edit_draft_key(exam_id: i64) -> String {
    format!("edit-draft-{exam_id}")
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn save(&self, key: &str, draft: &ExamDraft) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file(key), serde_json::to_string_pretty(draft)?)?;
        Ok(())
    }

    /// Corrupt drafts are discarded, not errors.
    pub fn load(&self, key: &str) -> Option<ExamDraft> {
        let raw = fs::read_to_string(self.file(key)).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn clear(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.file(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamDraft {
    pub title: String,
    pub description: String,
    pub duration: Option<u32>,
    pub module_id: Option<i64>,
    pub status: Option<ExamStatus>,
    pub questions: Vec<DraftQuestion>,
}

/// A question that exists only in the draft. `id` is a local millisecond
/// timestamp until the backend assigns a real one at publish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub id: i64,
    pub question: String,
    pub model_answer: String,
    pub points: u32,
}

pub fn local_question_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl ExamDraft {
    pub fn is_empty(&self) -> bool {
        *self == ExamDraft::default()
    }

    /// Publish precondition: title, module, duration, status and at least
    /// one question.
    pub fn to_exam_payload(&self) -> Result<ExamPayload> {
        let incomplete = || {
            Error::Input(
                "Please fill in all required fields and add at least one question.".to_string(),
            )
        };
        if self.questions.is_empty() {
            return Err(incomplete());
        }
        let payload = ExamPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            duration: self.duration.ok_or_else(incomplete)?,
            module_id: self.module_id.ok_or_else(incomplete)?,
            status: self.status.ok_or_else(incomplete)?,
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn to_exam_update(&self) -> Result<ExamUpdate> {
        let payload = self.to_exam_payload()?;
        Ok(ExamUpdate {
            title: payload.title,
            description: payload.description,
            duration: payload.duration,
            status: payload.status,
        })
    }

    /// The full question batch submitted in one call after the exam record
    /// is created or updated.
    pub fn question_payloads(&self, module_id: i64) -> Vec<QuestionPayload> {
        self.questions
            .iter()
            .map(|q| QuestionPayload {
                question_name: q.question.clone(),
                question_mark: q.points,
                model_answer: q.model_answer.clone(),
                module_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> DraftStore {
        let dir = std::env::temp_dir().join(format!(
            "exam-console-drafts-{}-{}",
            std::process::id(),
            tag
        ));
        let _ = fs::remove_dir_all(&dir);
        DraftStore::new(dir)
    }

    fn sample_draft() -> ExamDraft {
        ExamDraft {
            title: "Rust basics".to_string(),
            description: "Closed book".to_string(),
            duration: Some(60),
            module_id: Some(3),
            status: Some(ExamStatus::Active),
            questions: vec![DraftQuestion {
                id: local_question_id(),
                question: "What does the borrow checker enforce?".to_string(),
                model_answer: "Aliasing xor mutability".to_string(),
                points: 5,
            }],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        let draft = sample_draft();
        store.save(CREATE_DRAFT_KEY, &draft).unwrap();
        assert_eq!(store.load(CREATE_DRAFT_KEY), Some(draft));
        store.clear(CREATE_DRAFT_KEY).unwrap();
    }

    #[test]
    fn corrupt_draft_loads_as_none() {
        let store = temp_store("corrupt");
        fs::create_dir_all(&store.dir).unwrap();
        fs::write(store.file("exam-draft"), "]]]").unwrap();
        assert!(store.load(CREATE_DRAFT_KEY).is_none());
    }

    #[test]
    fn clear_is_idempotent_and_keys_are_scoped() {
        let store = temp_store("scoped");
        store.save(&edit_draft_key(9), &sample_draft()).unwrap();
        assert!(store.load(CREATE_DRAFT_KEY).is_none());
        store.clear(&edit_draft_key(9)).unwrap();
        store.clear(&edit_draft_key(9)).unwrap();
        assert!(store.load(&edit_draft_key(9)).is_none());
    }

    #[test]
    fn publish_requires_all_fields_and_a_question() {
        let mut draft = sample_draft();
        assert!(draft.to_exam_payload().is_ok());

        draft.questions.clear();
        assert!(matches!(draft.to_exam_payload(), Err(Error::Input(_))));

        let mut no_module = sample_draft();
        no_module.module_id = None;
        assert!(matches!(no_module.to_exam_payload(), Err(Error::Input(_))));

        let mut blank_title = sample_draft();
        blank_title.title.clear();
        assert!(matches!(
            blank_title.to_exam_payload(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn question_payloads_carry_the_selected_module() {
        let draft = sample_draft();
        let payloads = draft.question_payloads(3);
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].module_id, 3);
        assert_eq!(payloads[0].question_mark, 5);
    }
}
