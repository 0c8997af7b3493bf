//! Text output formatter

use std::collections::BTreeMap;
use std::time::Duration;

use yamlsentry_core::{CheckResult, CheckSummary, Source};

pub fn output_text(results: &[CheckResult], timings: bool) {
    for result in results {
        for diag in &result.diagnostics {
            println!(
                "{}:{}:{} {} [{}] {} ({})",
                diag.file.display(),
                diag.line,
                diag.column,
                diag.severity,
                diag.rule,
                diag.message,
                diag.source
            );
        }
        for failure in &result.failures {
            eprintln!(
                "{}: {} could not run: {}",
                result.path.display(),
                failure.tool,
                failure.message
            );
        }
    }

    let summary = CheckSummary::from_results(results);

    println!();
    println!(
        "Checked {} files ({} from cache), found {} issues ({} errors, {} warnings, {} info)",
        summary.files_checked,
        summary.files_from_cache,
        summary.total_diagnostics,
        summary.errors,
        summary.warnings,
        summary.infos
    );
    if summary.tool_failures > 0 {
        println!("{} tool run(s) failed", summary.tool_failures);
    }

    if timings {
        output_timings(results);
    }
}

fn output_timings(results: &[CheckResult]) {
    let mut total_duration = Duration::new(0, 0);
    let mut tool_timings: BTreeMap<Source, Duration> = BTreeMap::new();

    for result in results {
        for (tool, duration) in &result.timings {
            *tool_timings.entry(*tool).or_default() += *duration;
            total_duration += *duration;
        }
    }

    if !tool_timings.is_empty() {
        println!("\nPerformance Timings:");
        println!("{:<20} | {:<15} | {:<10}", "Tool", "Duration", "%");
        println!("{:-<20}-+-{:-<15}-+-{:-<10}", "", "", "");

        let mut sorted_timings: Vec<_> = tool_timings.into_iter().collect();
        sorted_timings.sort_by(|a, b| b.1.cmp(&a.1));

        for (tool, duration) in sorted_timings {
            let percentage = if total_duration.as_secs_f64() > 0.0 {
                (duration.as_secs_f64() / total_duration.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            println!(
                "{:<20} | {:<15?} | {:<10.1}%",
                tool.id(),
                duration,
                percentage
            );
        }
        println!("{:-<20}-+-{:-<15}-+-{:-<10}", "", "", "");
        println!("{:<20} | {:<15?}", "Total", total_duration);
    }
}
