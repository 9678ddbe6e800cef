//! Final report table.

use marga::WalkOutcome;

use crate::shared::AntReport;

/// One line per ant: name, planner, outcome, final cell, moves, sensed cells.
pub fn report_table(reports: &[AntReport]) -> String {
    let mut out = format!(
        "{:<12} {:<6} {:<8} {:<10} {:>6} {:>9} {:>9}\n",
        "ant", "kind", "outcome", "at", "moves", "detected", "obstacles"
    );

    for report in reports {
        let outcome = match report.outcome {
            WalkOutcome::Arrived { .. } => "arrived",
            WalkOutcome::Stuck { .. } => "stuck",
            WalkOutcome::OutOfSteps { .. } => "timeout",
        };
        let at = report
            .position()
            .map(|pos| pos.to_string())
            .unwrap_or_else(|| "-".into());

        out.push_str(&format!(
            "{:<12} {:<6} {:<8} {:<10} {:>6} {:>9} {:>9}\n",
            report.name,
            report.kind.to_string(),
            outcome,
            at,
            report.outcome.steps(),
            report.detected,
            report.obstacles
        ));
    }

    out
}
