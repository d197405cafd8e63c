use super::check_status;
use crate::dto::auth_dto::Credentials;
use crate::dto::lecturer_dto::{CreateExamResponse, ExamPayload, ExamUpdate, QuestionPayload};
use crate::error::Result;
use crate::models::exam::{Exam, LecturerDashboard};
use crate::models::module::Module;
use crate::models::question::Question;
use crate::models::result::AttemptResultList;
use reqwest::Client;
use validator::Validate;

#[derive(Clone)]
pub struct LecturerService {
    client: Client,
    base_url: String,
}

impl LecturerService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn dashboard(&self) -> Result<LecturerDashboard> {
        let url = format!("{}/lecturer/exams", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch dashboard data").await?;
        Ok(response.json().await?)
    }

    pub async fn create_exam(&self, payload: &ExamPayload) -> Result<i64> {
        payload.validate()?;
        let url = format!("{}/lecturer/exams", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        let response = check_status(response, "Failed to create exam").await?;
        let created = response.json::<CreateExamResponse>().await?;
        tracing::info!(exam_id = created.exam_id, "exam created");
        Ok(created.exam_id)
    }

    pub async fn exam(&self, exam_id: i64) -> Result<Exam> {
        let url = format!("{}/lecturer/exams/{}", self.base_url, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch exam").await?;
        Ok(response.json().await?)
    }

    pub async fn update_exam(&self, exam_id: i64, payload: &ExamUpdate) -> Result<()> {
        payload.validate()?;
        let url = format!("{}/lecturer/exams/{}", self.base_url, exam_id);
        let response = self.client.put(&url).json(payload).send().await?;
        check_status(response, "Failed to update exam").await?;
        Ok(())
    }

    /// Like user deletion, exam deletion re-authorizes with re-entered
    /// lecturer credentials.
    pub async fn delete_exam(&self, exam_id: i64, credentials: &Credentials) -> Result<()> {
        let url = format!("{}/lecturer/exams/{}/delete", self.base_url, exam_id);
        let response = self.client.post(&url).json(credentials).send().await?;
        check_status(response, "Invalid credentials or failed to delete exam").await?;
        tracing::info!(exam_id, "exam deleted");
        Ok(())
    }

    /// Submits the whole question list as one batch call.
    pub async fn add_questions(&self, exam_id: i64, questions: &[QuestionPayload]) -> Result<()> {
        for question in questions {
            question.validate()?;
        }
        let url = format!("{}/lecturer/exams/{}/questions", self.base_url, exam_id);
        let response = self.client.post(&url).json(questions).send().await?;
        check_status(response, "Failed to add questions").await?;
        Ok(())
    }

    /// Full replacement of an exam's question list.
    pub async fn replace_questions(
        &self,
        exam_id: i64,
        questions: &[QuestionPayload],
    ) -> Result<()> {
        for question in questions {
            question.validate()?;
        }
        let url = format!("{}/lecturer/exams/{}/questions", self.base_url, exam_id);
        let response = self.client.put(&url).json(questions).send().await?;
        check_status(response, "Failed to update questions").await?;
        Ok(())
    }

    pub async fn delete_question(&self, question_id: i64) -> Result<()> {
        let url = format!("{}/lecturer/questions/{}", self.base_url, question_id);
        let response = self.client.delete(&url).send().await?;
        check_status(response, "Failed to delete question").await?;
        Ok(())
    }

    pub async fn questions(&self, exam_id: i64) -> Result<Vec<Question>> {
        let url = format!("{}/lecturer/exams/{}/questions", self.base_url, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch questions").await?;
        Ok(response.json().await?)
    }

    pub async fn results(&self, exam_id: i64) -> Result<AttemptResultList> {
        let url = format!("{}/lecturer/exams/{}/results", self.base_url, exam_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch exam results").await?;
        Ok(response.json().await?)
    }

    /// The modules endpoint answers either a bare array or a
    /// `{"modules": [...]}` envelope depending on backend version; both are
    /// accepted.
    pub async fn modules(&self) -> Result<Vec<Module>> {
        let url = format!("{}/modules", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch modules").await?;
        let value = response.json::<serde_json::Value>().await?;
        let list = match value.get("modules") {
            Some(modules) => modules.clone(),
            None => value,
        };
        Ok(serde_json::from_value(list)?)
    }
}
