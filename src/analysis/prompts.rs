//! Analysis prompts
//!
//! Fixed prompt text for the resume review. The validation instruction is
//! load-bearing: when the document is not a resume the model must return
//! the sentinel response (score 0, justification starting with
//! INVALID_RESUME) instead of a transport-level error, and the
//! orchestrator converts that into a validation failure.

pub const SYSTEM_INSTRUCTION: &str = "You are an expert resume reviewer, career coach, and \
ATS (Applicant Tracking System) specialist with 15+ years of hiring experience across \
industries. You give honest, specific, actionable feedback. You respond only with JSON \
matching the requested schema.";

pub const ANALYSIS_PROMPT: &str = r#"Analyze the following resume thoroughly.

STEP 0 - VALIDATION (do this first):
Verify the document is actually a resume or CV. If it is anything else (an article,
an invoice, a recipe, random text, a screenshot of something unrelated), return
overallScore 0 and set overallJustification to a string starting with exactly
"INVALID_RESUME" followed by a short reason. Fill every other field with empty
arrays or neutral placeholder values. Do not analyze non-resume content.

For a valid resume:

1. Infer the candidate's PRIMARY target role from the resume content, and evaluate
   the resume against that role's expectations.
2. Identify up to TWO related roles the candidate could also target, ranked in
   jobMatches with a match percentage and a one-sentence reason (primary role first).
3. Score the resume overall from 0 to 10 and justify the score in 2-3 sentences.
4. Analyze each resume section (summary, experience, education, skills, projects,
   and any others present): concrete strengths, weaknesses, and improvement
   suggestions per section.
5. Evaluate ATS compatibility: score 0-10 plus specific parsing issues (layout,
   tables, graphics, headers, fonts, non-standard section names).
6. Evaluate keyword coverage for the primary role: keywords found in the resume
   and important keywords that are missing.
7. Rate content quality (actionVerbsUsage, quantifiedAchievements, clarity,
   professionalTone) with a short qualitative rating each.
8. Give practical dos and donts lists for this specific resume.
9. Give targeted rewrites: for the weakest bullets or sections, name the section,
   the problem, and a concrete suggested rewrite the candidate can paste in.
10. Close with a final verdict: overall impression, a strength tier of exactly
    Strong, Average, or Weak, and the highest-priority improvements in order.

Be specific to this resume; never give generic advice that applies to every resume."#;
