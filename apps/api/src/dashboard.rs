//! Dashboard view data — everything the dashboard displays that is derived
//! rather than copied from the analysis result. Pure functions of an
//! immutable `AnalysisResult`; chart drawing stays on the client.

use serde::Serialize;

use crate::analysis::model::{AnalysisResult, JobCategory};

/// Qualitative label for a 0–100 fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FitBand {
    ExcellentMatch,
    StrongCandidate,
    GoodPotential,
    NeedsDevelopment,
}

impl FitBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => FitBand::ExcellentMatch,
            70..=84 => FitBand::StrongCandidate,
            50..=69 => FitBand::GoodPotential,
            _ => FitBand::NeedsDevelopment,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::ExcellentMatch => "Excellent Match",
            FitBand::StrongCandidate => "Strong Candidate",
            FitBand::GoodPotential => "Good Potential",
            FitBand::NeedsDevelopment => "Needs Development",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitScoreView {
    pub score: u32,
    pub band: FitBand,
    pub label: &'static str,
    pub predicted_role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: &'static str,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFitBar {
    pub role: String,
    pub score: u32,
    pub band: FitBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRow {
    pub role: String,
    pub category: JobCategory,
    pub score: u32,
    pub reason: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub candidate_name: String,
    pub fit_score: FitScoreView,
    pub category_split: Vec<CategoryShare>,
    pub role_fit: Vec<RoleFitBar>,
    pub predictions: Vec<PredictionRow>,
}

/// Confidence in [0, 1] as a whole percentage.
pub fn fit_percent(confidence: f64) -> u32 {
    to_percent(confidence * 100.0)
}

/// Rounds a 0–100 score, clamping anything the model put out of range.
fn to_percent(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

impl DashboardView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let prediction = &result.job_prediction;
        let score = fit_percent(prediction.confidence_score);
        let band = FitBand::from_score(score);

        Self {
            candidate_name: result.summary_card.name.clone(),
            fit_score: FitScoreView {
                score,
                band,
                label: band.label(),
                predicted_role: prediction.predicted_role.clone(),
            },
            category_split: category_split(prediction.category),
            role_fit: role_fit_bars(result),
            predictions: prediction_rows(result),
        }
    }
}

/// A single resume is 100% one side; `Other` counts as Non-Tech.
fn category_split(category: JobCategory) -> Vec<CategoryShare> {
    let tech = category == JobCategory::Tech;
    vec![
        CategoryShare {
            name: "Tech",
            percent: if tech { 100 } else { 0 },
        },
        CategoryShare {
            name: "Non-Tech",
            percent: if tech { 0 } else { 100 },
        },
    ]
}

fn role_fit_bars(result: &AnalysisResult) -> Vec<RoleFitBar> {
    let mut bars: Vec<RoleFitBar> = result
        .job_matches
        .iter()
        .map(|m| {
            let score = to_percent(m.similarity);
            RoleFitBar {
                role: m.role.clone(),
                score,
                band: FitBand::from_score(score),
            }
        })
        .collect();
    // stable: equal scores keep the model's order
    bars.sort_by(|a, b| b.score.cmp(&a.score));
    bars
}

/// Primary prediction plus every match, best score first.
fn prediction_rows(result: &AnalysisResult) -> Vec<PredictionRow> {
    let prediction = &result.job_prediction;

    let mut rows = vec![PredictionRow {
        role: prediction.predicted_role.clone(),
        category: prediction.category,
        score: fit_percent(prediction.confidence_score),
        reason: prediction.explanation.clone(),
        is_primary: true,
    }];
    rows.extend(result.job_matches.iter().map(|m| PredictionRow {
        role: m.role.clone(),
        // matches are relative to the predicted role, so they share its category
        category: prediction.category,
        score: to_percent(m.similarity),
        reason: m.explanation.clone(),
        is_primary: false,
    }));

    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}
