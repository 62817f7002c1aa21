//! Downloadable analysis report, rendered as Markdown.

use std::fmt::Write;

use crate::analysis::model::{AnalysisResult, JobCategory};
use crate::dashboard::{fit_percent, FitBand};

pub const REPORT_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// `Resume-Analysis-Report-<name>.md`, each whitespace character of the
/// candidate name replaced with `_`.
pub fn report_filename(candidate_name: &str) -> String {
    let name: String = candidate_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        // keep the Content-Disposition header well-formed
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    let name = if name.is_empty() { "Candidate".to_string() } else { name };
    format!("Resume-Analysis-Report-{name}.md")
}

fn category_label(category: JobCategory) -> &'static str {
    match category {
        JobCategory::Tech => "Tech",
        JobCategory::NonTech => "Non-Tech",
        JobCategory::Other => "Other",
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

pub fn render_markdown(result: &AnalysisResult) -> String {
    // fmt::Write on String never fails
    let mut out = String::new();
    let summary = &result.summary_card;
    let prediction = &result.job_prediction;
    let fit = fit_percent(prediction.confidence_score);

    let _ = writeln!(out, "# Resume Analysis Report\n");
    let _ = writeln!(out, "Prepared for: **{}**\n", or_dash(&summary.name));

    let _ = writeln!(out, "## Candidate Profile\n");
    let _ = writeln!(out, "- **Level:** {}", or_dash(&summary.predicted_level));
    let _ = writeln!(out, "- **Experience:** {}", or_dash(&summary.total_experience));
    let _ = writeln!(out, "- **Email:** {}", or_dash(&summary.email));
    let _ = writeln!(out, "- **Phone:** {}", or_dash(&summary.phone));
    if !summary.top_skills.is_empty() {
        let _ = writeln!(out, "- **Top Skills:** {}", summary.top_skills.join(", "));
    }
    out.push('\n');

    let _ = writeln!(out, "## Job Fit Score\n");
    let _ = writeln!(out, "**{fit}%** — {}\n", FitBand::from_score(fit).label());

    let _ = writeln!(out, "## Predicted Job Role\n");
    let _ = writeln!(out, "- **Category:** {}", category_label(prediction.category));
    let _ = writeln!(out, "- **Predicted Role:** {}", or_dash(&prediction.predicted_role));
    let _ = writeln!(out, "- **Confidence:** {fit}%");
    let _ = writeln!(out, "- **Reasoning:** {}\n", or_dash(&prediction.explanation));

    if !result.job_matches.is_empty() {
        let _ = writeln!(out, "## Top Job Recommendations\n");
        for m in &result.job_matches {
            let _ = writeln!(out, "### {} at {}\n", m.role, m.company);
            let _ = writeln!(out, "Match Score: {}%\n", m.similarity.round());
            if !m.explanation.is_empty() {
                let _ = writeln!(out, "{}\n", m.explanation);
            }
        }
    }

    let _ = writeln!(out, "## Strengths & Weaknesses\n");
    let _ = writeln!(out, "### Strengths\n");
    for s in &result.gap_analysis.strengths {
        let _ = writeln!(out, "- {s}");
    }
    let _ = writeln!(out, "\n### Areas for Improvement\n");
    for g in &result.gap_analysis.gaps {
        let _ = writeln!(out, "- **{}**", g.gap);
        let _ = writeln!(out, "  - Suggestion: {}", g.suggestion);
    }
    out.push('\n');

    if !result.bullet_rewrites.is_empty() {
        let _ = writeln!(out, "## Resume Bullet Point Suggestions\n");
        for b in &result.bullet_rewrites {
            let _ = writeln!(out, "> Original: \"{}\"\n", b.original);
            for r in &b.rewritten {
                let _ = writeln!(out, "- {r}");
            }
            out.push('\n');
        }
    }

    if !result.interview_questions.is_empty() {
        let _ = writeln!(out, "## Interview Preparation\n");
        for (i, q) in result.interview_questions.iter().enumerate() {
            let _ = writeln!(out, "{}. {q}", i + 1);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Salary Expectation\n");
    let _ = writeln!(
        out,
        "{} ({})\n",
        or_dash(&result.salary_expectation.range),
        or_dash(&result.salary_expectation.level)
    );

    if !result.career_roadmap.is_empty() {
        let _ = writeln!(out, "## Personalized Career Roadmap\n");
        for step in &result.career_roadmap {
            let _ = writeln!(out, "### {}\n", step.skill);
            let _ = writeln!(out, "{}\n", step.reason);
            let _ = writeln!(out, "**Resource:** {}\n", step.resource);
        }
    }

    out
}
