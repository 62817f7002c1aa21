//! The analysis result contract. Field names mirror the response schema sent
//! to the model (camelCase), so the model's JSON deserializes directly.
//!
//! All eight top-level sections are required; leaf fields default to empty
//! because the model occasionally omits a phone number or an explanation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary_card: SummaryCard,
    pub job_prediction: JobPrediction,
    pub job_matches: Vec<JobMatch>,
    pub gap_analysis: GapAnalysis,
    pub bullet_rewrites: Vec<RewrittenBullet>,
    pub interview_questions: Vec<String>,
    pub salary_expectation: SalaryExpectation,
    pub career_roadmap: Vec<SkillToLearn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryCard {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_experience: String,
    /// Ordered, most relevant first.
    pub top_skills: Vec<String>,
    pub predicted_level: String,
}

/// Profile category. Labels the model invents map to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobCategory {
    Tech,
    #[serde(rename = "Non-Tech")]
    NonTech,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPrediction {
    pub category: JobCategory,
    pub predicted_role: String,
    /// 0.0 – 1.0; doubles as the candidate's job-fit score.
    pub confidence_score: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobMatch {
    pub role: String,
    pub company: String,
    /// 0 – 100
    pub similarity: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapAnalysis {
    pub strengths: Vec<String>,
    pub gaps: Vec<Gap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gap {
    pub gap: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewrittenBullet {
    pub original: String,
    /// One or two achievement-focused variants.
    pub rewritten: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryExpectation {
    pub range: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillToLearn {
    pub skill: String,
    pub reason: String,
    pub resource: String,
}
