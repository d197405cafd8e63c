use serde::{Deserialize, Serialize};

/// A student's precomputed result for one exam. Scoring happens entirely
/// server-side; this client only renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    #[serde(rename = "ExamId")]
    pub exam_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ModuleName", default)]
    pub module_name: String,
    #[serde(rename = "TotalMark")]
    pub total_mark: f64,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
    #[serde(rename = "Questions", default)]
    pub questions: Vec<ResultQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultQuestion {
    #[serde(rename = "QuestionId")]
    pub question_id: i64,
    #[serde(rename = "QuestionName")]
    pub text: String,
    #[serde(rename = "QuestionMark")]
    pub mark: u32,
    #[serde(rename = "StdAnswer", default)]
    pub student_answer: String,
    #[serde(rename = "ModelAnswer", default)]
    pub model_answer: Option<String>,
    #[serde(rename = "Score", default)]
    pub score: f64,
    #[serde(rename = "Feedback", default)]
    pub feedback: Option<String>,
}

/// One student's row in the lecturer results table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResult {
    #[serde(rename = "studentName", default)]
    pub student_name: String,
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "StartedAt", default)]
    pub started_at: Option<String>,
    #[serde(rename = "SubmittedAt", default)]
    pub submitted_at: Option<String>,
    #[serde(rename = "timeSpent", default)]
    pub time_spent: Option<i64>,
    #[serde(rename = "totalScore", default)]
    pub total_score: f64,
    #[serde(rename = "percentage", default)]
    pub percentage: f64,
}

/// Envelope of `GET /lecturer/exams/:id/results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResultList {
    #[serde(default)]
    pub results: Vec<AttemptResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_result_payload() {
        let result: ExamResult = serde_json::from_value(serde_json::json!({
            "ExamId": 12,
            "Title": "Sample Exam",
            "ModuleName": "Mathematics",
            "TotalMark": 100,
            "Score": 85,
            "Percentage": 85,
            "Questions": [
                {
                    "QuestionId": 1,
                    "QuestionName": "What is 2 + 2?",
                    "QuestionMark": 5,
                    "StdAnswer": "4",
                    "ModelAnswer": "4",
                    "Score": 5,
                    "Feedback": "Correct"
                },
                {
                    "QuestionId": 2,
                    "QuestionName": "What is the capital of France?",
                    "QuestionMark": 5,
                    "StdAnswer": "",
                    "Score": 0
                }
            ]
        }))
        .unwrap();

        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.questions[0].feedback.as_deref(), Some("Correct"));
        assert_eq!(result.questions[1].student_answer, "");
        assert!(result.questions[1].model_answer.is_none());
    }
}
