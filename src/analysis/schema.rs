//! Response schema
//!
//! The structural contract sent with every request. The provider is asked
//! to emit JSON conforming to this schema, which marks every top-level
//! field required: a structurally incomplete response is itself a parse
//! failure on our side (`types.rs` mirrors this with no defaults).

use serde_json::{json, Value};

/// Build the schema in the provider's declaration format
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": { "type": "NUMBER", "description": "Overall resume score from 0 to 10" },
            "overallJustification": { "type": "STRING" },
            "sectionAnalysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sectionName": { "type": "STRING" },
                        "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "improvementSuggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["sectionName", "strengths", "weaknesses", "improvementSuggestions"]
                }
            },
            "atsCompatibility": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "NUMBER" },
                    "issues": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["score", "issues"]
            },
            "keywordAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "found": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "missing": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["found", "missing"]
            },
            "jobMatches": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "role": { "type": "STRING" },
                        "matchPercentage": { "type": "NUMBER" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["role", "matchPercentage", "reason"]
                }
            },
            "contentQuality": {
                "type": "OBJECT",
                "properties": {
                    "actionVerbsUsage": { "type": "STRING" },
                    "quantifiedAchievements": { "type": "STRING" },
                    "clarity": { "type": "STRING" },
                    "professionalTone": { "type": "STRING" }
                },
                "required": ["actionVerbsUsage", "quantifiedAchievements", "clarity", "professionalTone"]
            },
            "dos": { "type": "ARRAY", "items": { "type": "STRING" } },
            "donts": { "type": "ARRAY", "items": { "type": "STRING" } },
            "specificImprovements": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": { "type": "STRING" },
                        "problem": { "type": "STRING" },
                        "suggestedRewrite": { "type": "STRING" }
                    },
                    "required": ["section", "problem", "suggestedRewrite"]
                }
            },
            "finalVerdict": {
                "type": "OBJECT",
                "properties": {
                    "impression": { "type": "STRING" },
                    "strength": { "type": "STRING", "enum": ["Strong", "Average", "Weak"] },
                    "priorityImprovements": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["impression", "strength", "priorityImprovements"]
            }
        },
        "required": [
            "overallScore", "overallJustification", "sectionAnalysis", "atsCompatibility",
            "keywordAnalysis", "jobMatches", "contentQuality", "dos", "donts",
            "specificImprovements", "finalVerdict"
        ]
    })
}
