use super::check_status;
use crate::dto::student_dto::{AnswerSubmission, ModuleNameResponse};
use crate::error::Result;
use crate::models::exam::StudentExam;
use crate::models::question::Question;
use crate::models::result::ExamResult;
use reqwest::Client;

#[derive(Clone)]
pub struct StudentService {
    client: Client,
    base_url: String,
}

impl StudentService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn exams(&self, user_id: i64) -> Result<Vec<StudentExam>> {
        let url = format!("{}/student/exams/{}", self.base_url, user_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch all exams").await?;
        Ok(response.json().await?)
    }

    pub async fn questions(&self, exam_id: i64) -> Result<Vec<Question>> {
        let url = format!("{}/student/exams/{}/questions", self.base_url, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch exam questions").await?;
        Ok(response.json().await?)
    }

    /// One independent request per question; the exam session fires these
    /// concurrently at submission time.
    pub async fn submit(&self, answer: &AnswerSubmission) -> Result<()> {
        let url = format!("{}/student/submit", self.base_url);
        let response = self.client.post(&url).json(answer).send().await?;
        check_status(response, "Failed to submit answer").await?;
        Ok(())
    }

    pub async fn module_name(&self, exam_id: i64) -> Result<String> {
        let url = format!("{}/student/exam/{}/module", self.base_url, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch module name").await?;
        Ok(response.json::<ModuleNameResponse>().await?.module_name)
    }

    /// The backend answers an empty object when no result exists yet; that
    /// maps to `None` rather than a parse error.
    pub async fn result(&self, user_id: i64, exam_id: i64) -> Result<Option<ExamResult>> {
        let url = format!("{}/student/results/{}/{}", self.base_url, user_id, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch student results").await?;
        let value = response.json::<serde_json::Value>().await?;
        if value.is_null() || value.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }
}
