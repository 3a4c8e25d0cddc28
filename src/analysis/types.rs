//! Analysis result model
//!
//! Mirrors the response schema sent with every request. Every array field
//! is required by the schema, so absence is a parse failure here as well:
//! no `#[serde(default)]` escape hatches on required fields.

use serde::{Deserialize, Serialize};

/// Marker prefix the model puts in `overallJustification` when the input
/// is not a resume. Combined with a zero score this forms the sentinel
/// condition: a schema-valid response that must never surface as success.
pub const INVALID_RESUME_MARKER: &str = "INVALID_RESUME";

/// Full structured review of one resume
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    /// Overall score, 0-10
    pub overall_score: f64,
    pub overall_justification: String,
    pub section_analysis: Vec<SectionAnalysis>,
    pub ats_compatibility: AtsCompatibility,
    pub keyword_analysis: KeywordAnalysis,
    /// Ranked alternative-role matches (primary role first)
    pub job_matches: Vec<JobMatch>,
    pub content_quality: ContentQuality,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
    pub specific_improvements: Vec<SpecificImprovement>,
    pub final_verdict: FinalVerdict,
}

impl ResumeAnalysis {
    /// Sentinel condition: structurally valid response that semantically
    /// rejects the document as not being a resume
    pub fn is_invalid_resume(&self) -> bool {
        self.overall_score == 0.0 && self.overall_justification.starts_with(INVALID_RESUME_MARKER)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalysis {
    pub section_name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AtsCompatibility {
    /// ATS parsing compatibility score, 0-10
    pub score: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub role: String,
    pub match_percentage: f64,
    pub reason: String,
}

/// Qualitative ratings of writing quality
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuality {
    pub action_verbs_usage: String,
    pub quantified_achievements: String,
    pub clarity: String,
    pub professional_tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecificImprovement {
    pub section: String,
    pub problem: String,
    pub suggested_rewrite: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    pub impression: String,
    pub strength: Strength,
    pub priority_improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Strength {
    Strong,
    Average,
    Weak,
}

/// Canned schema-complete response payload for tests across the crate
#[cfg(test)]
pub(crate) fn sample_analysis_json(score: f64, justification: &str) -> String {
    format!(
            r#"{{
                "overallScore": {score},
                "overallJustification": "{justification}",
                "sectionAnalysis": [
                    {{
                        "sectionName": "Experience",
                        "strengths": ["clear chronology"],
                        "weaknesses": [],
                        "improvementSuggestions": ["quantify impact"]
                    }}
                ],
                "atsCompatibility": {{"score": 7, "issues": ["two-column layout"]}},
                "keywordAnalysis": {{"found": ["Rust"], "missing": ["Kubernetes"]}},
                "jobMatches": [
                    {{"role": "Backend Engineer", "matchPercentage": 85, "reason": "strong systems background"}}
                ],
                "contentQuality": {{
                    "actionVerbsUsage": "Good",
                    "quantifiedAchievements": "Fair",
                    "clarity": "Good",
                    "professionalTone": "Excellent"
                }},
                "dos": ["lead with impact"],
                "donts": ["avoid buzzwords"],
                "specificImprovements": [
                    {{"section": "Summary", "problem": "vague", "suggestedRewrite": "Backend engineer with 6 years..."}}
                ],
                "finalVerdict": {{
                    "impression": "solid mid-level resume",
                    "strength": "Average",
                    "priorityImprovements": ["add metrics"]
                }}
            }}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_deserializes() {
        let analysis: ResumeAnalysis =
            serde_json::from_str(&sample_analysis_json(7.5, "Solid resume")).unwrap();
        assert_eq!(analysis.overall_score, 7.5);
        assert_eq!(analysis.final_verdict.strength, Strength::Average);
        assert_eq!(analysis.section_analysis.len(), 1);
        assert!(analysis.section_analysis[0].weaknesses.is_empty());
    }

    #[test]
    fn test_missing_required_array_is_a_parse_failure() {
        let mut value: serde_json::Value =
            serde_json::from_str(&sample_analysis_json(7.5, "ok")).unwrap();
        value.as_object_mut().unwrap().remove("dos");
        assert!(serde_json::from_value::<ResumeAnalysis>(value).is_err());
    }

    #[test]
    fn test_sentinel_requires_both_conditions() {
        let sentinel: ResumeAnalysis =
            serde_json::from_str(&sample_analysis_json(0.0, "INVALID_RESUME: recipe for soup")).unwrap();
        assert!(sentinel.is_invalid_resume());

        let zero_but_valid: ResumeAnalysis =
            serde_json::from_str(&sample_analysis_json(0.0, "Empty resume")).unwrap();
        assert!(!zero_but_valid.is_invalid_resume());

        let marker_but_scored: ResumeAnalysis =
            serde_json::from_str(&sample_analysis_json(3.0, "INVALID_RESUME: maybe")).unwrap();
        assert!(!marker_but_scored.is_invalid_resume());
    }

    #[test]
    fn test_strength_tier_parses_exact_variants() {
        assert!(serde_json::from_str::<Strength>("\"Strong\"").is_ok());
        assert!(serde_json::from_str::<Strength>("\"weak\"").is_err());
    }
}
