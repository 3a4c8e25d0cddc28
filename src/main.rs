//! CLI entry point: analyze one resume file and print the review.
//!
//! Usage: `resumelens <path-to-resume>`

use std::path::Path;
use std::process::ExitCode;

use resumelens::{Analyzer, CountdownState, ErrorKind, ResumeAnalysis, RetryCountdown};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env from the working directory when present
    let _ = dotenvy::dotenv();

    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,resumelens=info")),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: resumelens <path-to-resume>");
        return ExitCode::from(2);
    };

    let analyzer = match Analyzer::from_env() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Startup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match analyzer.analyze_file(Path::new(&path)).await {
        Ok(analysis) => {
            print_report(&analysis);
            ExitCode::SUCCESS
        }
        Err(classified) => {
            eprintln!("Analysis failed: {}", classified.user_message);

            if classified.kind == ErrorKind::RateLimited {
                if let Some(seconds) = classified.retry_after_secs.filter(|s| *s > 0) {
                    show_retry_countdown(seconds).await;
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Render the server-advised wait so the user knows when a retry is safe.
/// The countdown only informs; it never triggers a retry itself.
async fn show_retry_countdown(seconds: u64) {
    let mut countdown = RetryCountdown::new();
    let mut rx = countdown.subscribe();
    countdown.arm(seconds);

    eprint!("Safe to retry in {}s", seconds);
    while rx.changed().await.is_ok() {
        match *rx.borrow_and_update() {
            CountdownState::Counting(n) => eprint!("\rSafe to retry in {}s ", n),
            CountdownState::Idle => {
                eprintln!("\rYou can retry now.          ");
                break;
            }
        }
    }
}

fn print_report(analysis: &ResumeAnalysis) {
    println!("Overall score: {:.1}/10", analysis.overall_score);
    println!("{}", analysis.overall_justification);
    println!();

    println!(
        "ATS compatibility: {:.1}/10",
        analysis.ats_compatibility.score
    );
    for issue in &analysis.ats_compatibility.issues {
        println!("  - {}", issue);
    }
    println!();

    for section in &analysis.section_analysis {
        println!("## {}", section.section_name);
        for s in &section.strengths {
            println!("  + {}", s);
        }
        for w in &section.weaknesses {
            println!("  - {}", w);
        }
        for i in &section.improvement_suggestions {
            println!("  > {}", i);
        }
    }
    println!();

    println!(
        "Keywords found: {}",
        analysis.keyword_analysis.found.join(", ")
    );
    println!(
        "Keywords missing: {}",
        analysis.keyword_analysis.missing.join(", ")
    );
    println!();

    println!("Role matches:");
    for m in &analysis.job_matches {
        println!("  {} ({:.0}%) - {}", m.role, m.match_percentage, m.reason);
    }
    println!();

    println!("Content quality:");
    println!("  Action verbs: {}", analysis.content_quality.action_verbs_usage);
    println!(
        "  Quantified achievements: {}",
        analysis.content_quality.quantified_achievements
    );
    println!("  Clarity: {}", analysis.content_quality.clarity);
    println!(
        "  Professional tone: {}",
        analysis.content_quality.professional_tone
    );
    println!();

    if !analysis.specific_improvements.is_empty() {
        println!("Targeted rewrites:");
        for imp in &analysis.specific_improvements {
            println!("  [{}] {}", imp.section, imp.problem);
            println!("    -> {}", imp.suggested_rewrite);
        }
        println!();
    }

    println!(
        "Verdict ({:?}): {}",
        analysis.final_verdict.strength, analysis.final_verdict.impression
    );
    for (i, p) in analysis.final_verdict.priority_improvements.iter().enumerate() {
        println!("  {}. {}", i + 1, p);
    }
}
