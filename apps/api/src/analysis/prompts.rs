// All LLM prompt constants and the response schema for resume analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// System prompt for resume analysis. The JSON-only fragment is appended at call time.
pub const ANALYSIS_SYSTEM: &str = "You are a senior career coach and resume reviewer. \
    You first decide which single job role a candidate is best suited for, \
    then evaluate the whole resume against that role.";

/// Analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume below.

RESUME:
---
{resume_text}
---

STEP 1 — ROLE PREDICTION (fill `jobPrediction` before anything else):
- category: "Tech" or "Non-Tech"
- predictedRole: the single most suitable job title
- confidenceScore: 0.0 to 1.0, how well the candidate fits that role (this is the job-fit score)
- explanation: one or two sentences citing skills or projects from the resume

STEP 2 — EVERYTHING ELSE, RELATIVE TO THE PREDICTED ROLE:
- summaryCard: contact details as written in the resume, total experience, the five most relevant skills, seniority level
- jobMatches: 3 to 5 similar roles with a plausible company and a 0-100 similarity score
- gapAnalysis: concrete strengths; gaps that are specific and quantified where possible, each with an actionable suggestion
- bulletRewrites: up to 5 weak bullets from the resume, each with 1 or 2 achievement-focused rewrites
- interviewQuestions: 8 questions for the predicted role, ordered from basic to advanced
- salaryExpectation: a range and level for the predicted role in the San Francisco, CA market
- careerRoadmap: skills to learn next, why each matters for the role, and one resource each

Use only facts present in the resume. Leave a contact field empty if the resume does not contain it."#;

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn number(description: &str) -> Value {
    json!({ "type": "NUMBER", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

/// The structured-output schema in Gemini's OpenAPI subset.
/// Property names must stay in sync with `analysis::model`.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summaryCard": {
                "type": "OBJECT",
                "properties": {
                    "name": string("Candidate's full name."),
                    "email": string("Candidate's email address."),
                    "phone": string("Candidate's phone number."),
                    "totalExperience": string("Total professional experience, e.g. '8 years'."),
                    "topSkills": string_list("The five most relevant skills, most relevant first."),
                    "predictedLevel": string("Seniority, e.g. 'Senior' or 'Mid-Level'.")
                },
                "required": ["name", "email", "phone", "totalExperience", "topSkills", "predictedLevel"]
            },
            "jobPrediction": {
                "type": "OBJECT",
                "properties": {
                    "category": {
                        "type": "STRING",
                        "enum": ["Tech", "Non-Tech"],
                        "description": "Profile category."
                    },
                    "predictedRole": string("Most likely job role, e.g. 'Backend Developer'."),
                    "confidenceScore": number("Job fit for the predicted role, 0.0 to 1.0."),
                    "explanation": string("One or two sentences justifying the prediction.")
                },
                "required": ["category", "predictedRole", "confidenceScore", "explanation"]
            },
            "jobMatches": {
                "type": "ARRAY",
                "description": "3 to 5 roles similar to the predicted role.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "role": string("Job title."),
                        "company": string("Example employer."),
                        "similarity": number("Similarity score from 0 to 100."),
                        "explanation": string("Brief reason for the match.")
                    },
                    "required": ["role", "company", "similarity", "explanation"]
                }
            },
            "gapAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "strengths": string_list("Strengths relevant to the predicted role."),
                    "gaps": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "gap": string("A specific, quantified missing skill or experience."),
                                "suggestion": string("An actionable way to close the gap.")
                            },
                            "required": ["gap", "suggestion"]
                        }
                    }
                },
                "required": ["strengths", "gaps"]
            },
            "bulletRewrites": {
                "type": "ARRAY",
                "description": "Up to 5 bullet point improvements.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": string("The bullet as written in the resume."),
                        "rewritten": string_list("1 or 2 achievement-focused rewrites for the predicted role.")
                    },
                    "required": ["original", "rewritten"]
                }
            },
            "interviewQuestions": string_list("8 interview questions for the predicted role, basic to advanced."),
            "salaryExpectation": {
                "type": "OBJECT",
                "properties": {
                    "range": string("e.g. '$150,000 - $180,000'."),
                    "level": string("e.g. 'Senior Engineer (L5)'.")
                },
                "required": ["range", "level"]
            },
            "careerRoadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": string("Skill to learn."),
                        "reason": string("Why it matters for the predicted role."),
                        "resource": string("A suggested course or resource.")
                    },
                    "required": ["skill", "reason", "resource"]
                }
            }
        },
        "required": [
            "summaryCard",
            "jobPrediction",
            "jobMatches",
            "gapAnalysis",
            "bulletRewrites",
            "interviewQuestions",
            "salaryExpectation",
            "careerRoadmap"
        ],
        "propertyOrdering": [
            "jobPrediction",
            "summaryCard",
            "jobMatches",
            "gapAnalysis",
            "bulletRewrites",
            "interviewQuestions",
            "salaryExpectation",
            "careerRoadmap"
        ]
    })
}
