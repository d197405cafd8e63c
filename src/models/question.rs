use serde::{Deserialize, Serialize};

/// A question as served to both lecturers and students. The backend omits
/// `ModelAnswer` on the student path, so it stays optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "QuestionId")]
    pub question_id: i64,
    #[serde(rename = "QuestionName")]
    pub text: String,
    #[serde(rename = "QuestionMark")]
    pub mark: u32,
    #[serde(rename = "ModelAnswer", default)]
    pub model_answer: Option<String>,
    #[serde(rename = "ModuleId", default)]
    pub module_id: Option<i64>,
    #[serde(rename = "ExamId", default)]
    pub exam_id: Option<i64>,
    #[serde(rename = "ModuleName", default)]
    pub module_name: Option<String>,
}
