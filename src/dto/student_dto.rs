use serde::{Deserialize, Serialize};

/// One finalized answer for one question. The wire format mixes snake_case
/// and camelCase; the renames below match the backend exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub user_id: i64,
    pub exam_id: i64,
    pub question_id: i64,
    #[serde(rename = "studentAnswer")]
    pub student_answer: String,
    pub is_finalized: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleNameResponse {
    pub module_name: String,
}
