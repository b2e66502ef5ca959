use deal_audit::audit::AuditReport;
use std::fmt::Write;

const PROGRESS_CELLS: usize = 20;

/// Text bar sized to the percentage, e.g. `[##########----------]`.
pub(crate) fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_CELLS - filled)
    )
}

pub(crate) fn render_report(deal_id: &str, report: &AuditReport) -> String {
    let outcome = report.overall_outcome();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Deal ID {}: {} ({})",
        deal_id,
        outcome.outcome.label(),
        outcome.color.label()
    );
    let _ = writeln!(out, "{}", progress_bar(outcome.percentage_value()));
    let _ = writeln!(out, "{}% Validation Complete", outcome.percentage);
    let _ = writeln!(out, "Recommendation: {}", outcome.recommendation);
    let _ = writeln!(out);

    for entry in report.checks() {
        let marker = if entry.result.passed() { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            marker,
            entry.check.label(),
            entry.result.status()
        );
        if let Some(issue) = entry.result.issue() {
            let _ = writeln!(out, "       {}", issue);
        }
    }

    out
}
