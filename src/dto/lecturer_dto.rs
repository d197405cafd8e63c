use crate::models::exam::ExamStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub duration: u32,
    #[serde(rename = "moduleId")]
    pub module_id: i64,
    pub status: ExamStatus,
}

/// `PUT /lecturer/exams/:id` takes the same fields minus the module, which
/// cannot be moved after creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamUpdate {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub duration: u32,
    pub status: ExamStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionPayload {
    #[serde(rename = "questionName")]
    #[validate(length(min = 1, message = "question text is required"))]
    pub question_name: String,
    #[serde(rename = "questionMark")]
    #[validate(range(min = 1, message = "marks must be positive"))]
    pub question_mark: u32,
    #[serde(rename = "modelAnswer", default)]
    pub model_answer: String,
    #[serde(rename = "moduleId")]
    pub module_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamResponse {
    #[serde(rename = "examId")]
    pub exam_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn exam_payload_rejects_empty_title_and_zero_duration() {
        let payload = ExamPayload {
            title: String::new(),
            description: String::new(),
            duration: 0,
            module_id: 1,
            status: ExamStatus::Active,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("duration"));
    }

    #[test]
    fn question_payload_requires_positive_mark() {
        let payload = QuestionPayload {
            question_name: "Define ownership.".to_string(),
            question_mark: 0,
            model_answer: String::new(),
            module_id: 2,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn exam_payload_serializes_camel_case_module_id() {
        let payload = ExamPayload {
            title: "Final".to_string(),
            description: "Closed book".to_string(),
            duration: 90,
            module_id: 4,
            status: ExamStatus::Draft,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["moduleId"], 4);
        assert_eq!(value["status"], "draft");
    }
}
