use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Active,
    Upcoming,
    Draft,
    Completed,
    #[serde(other)]
    Unknown,
}

impl ExamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Active => "active",
            ExamStatus::Upcoming => "upcoming",
            ExamStatus::Draft => "draft",
            ExamStatus::Completed => "completed",
            ExamStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ExamStatus::Active),
            "upcoming" => Ok(ExamStatus::Upcoming),
            "draft" => Ok(ExamStatus::Draft),
            "completed" => Ok(ExamStatus::Completed),
            other => Err(format!("unknown exam status: {other}")),
        }
    }
}

/// An exam record as the lecturer endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    #[serde(rename = "ExamId")]
    pub exam_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Duration")]
    pub duration: u32,
    #[serde(rename = "ModuleId", default)]
    pub module_id: Option<i64>,
    #[serde(rename = "ModuleName", default)]
    pub module_name: Option<String>,
    #[serde(rename = "Status")]
    pub status: ExamStatus,
}

/// One row of the student dashboard, joined with attempt progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentExam {
    #[serde(rename = "ExamId")]
    pub exam_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ModuleName", default)]
    pub module_name: String,
    #[serde(rename = "Status")]
    pub status: ExamStatus,
    #[serde(rename = "Duration")]
    pub duration: u32,
    #[serde(rename = "Score", default)]
    pub score: Option<f64>,
    #[serde(rename = "TotalMark", default)]
    pub total_mark: f64,
    #[serde(rename = "Percentage", default)]
    pub percentage: f64,
    #[serde(rename = "Attempts", default)]
    pub attempts: u32,
    #[serde(rename = "TotalQuestions", default)]
    pub total_questions: u32,
}

impl StudentExam {
    /// UI gate only; the backend is the actual authority.
    pub fn can_start(&self) -> bool {
        self.status == ExamStatus::Active && self.attempts <= 1
    }
}

/// Envelope of `GET /lecturer/exams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LecturerDashboard {
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(rename = "totalStudents", default)]
    pub total_students: u32,
}
