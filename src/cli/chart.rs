//! Plain-text bar chart and goal panel rendering.

use tally_core::{Bucket, GoalStatus};

use crate::app::GoalSummary;
use crate::currency::CurrencyFormatter;

pub const BAR_WIDTH: usize = 30;
pub const PROGRESS_WIDTH: usize = 20;

/// One line per bucket: right-aligned label, bar scaled to the peak bucket,
/// formatted total.
pub fn bucket_lines(buckets: &[Bucket], formatter: &CurrencyFormatter) -> Vec<String> {
    let peak = buckets.iter().map(|bucket| bucket.total).fold(0.0, f64::max);
    let label_width = buckets
        .iter()
        .map(|bucket| bucket.label.chars().count())
        .max()
        .unwrap_or(0);

    buckets
        .iter()
        .map(|bucket| {
            let bar = "#".repeat(bar_length(bucket.total, peak, BAR_WIDTH));
            format!(
                "{label:>label_width$} | {bar:<bar_width$} {amount}",
                label = bucket.label,
                bar_width = BAR_WIDTH,
                amount = formatter.format(bucket.total),
            )
        })
        .collect()
}

/// Non-zero values always get at least one cell.
fn bar_length(value: f64, peak: f64, width: usize) -> usize {
    if peak <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / peak) * width as f64).round().clamp(1.0, width as f64) as usize
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Goal panel lines. The deadline line is last so callers can style it.
pub fn goal_lines(summary: &GoalSummary, formatter: &CurrencyFormatter) -> Vec<String> {
    let progress = &summary.progress;
    let deadline = formatter.format_date(summary.goal.deadline);
    let mut lines = vec![
        format!("Target: {}", formatter.format(summary.goal.amount)),
        format!(
            "{} {:.1}%",
            progress_bar(progress.percent, PROGRESS_WIDTH),
            progress.percent
        ),
        format!("Remaining: {}", formatter.format(progress.remaining)),
    ];
    match summary.status() {
        GoalStatus::Reached => lines.push("Goal reached!".into()),
        GoalStatus::Overdue => lines.push(format!("Deadline expired: {}", deadline)),
        GoalStatus::InProgress => lines.push(format!("Deadline: {}", deadline)),
    }
    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tally_core::GoalProgress;
    use tally_domain::Goal;

    use super::*;

    fn usd() -> CurrencyFormatter {
        CurrencyFormatter::new("en-US", "USD", None)
    }

    #[test]
    fn bars_scale_to_peak() {
        let buckets = vec![
            Bucket {
                label: "Sun".into(),
                total: 0.0,
            },
            Bucket {
                label: "Mon".into(),
                total: 120.0,
            },
            Bucket {
                label: "Thu".into(),
                total: 30.0,
            },
        ];

        let lines = bucket_lines(&buckets, &usd());

        assert!(lines[0].starts_with("Sun | "));
        assert!(lines[0].ends_with("$0.00"));
        assert!(lines[1].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[2].contains(&format!("| {} ", "#".repeat(8))));
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(150.0, 4), "[####]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(50.0, 4), "[##--]");
    }

    #[test]
    fn goal_panel_reports_overdue_deadline() {
        let summary = GoalSummary {
            goal: Goal::new(5000.0, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            progress: GoalProgress {
                percent: 15.0,
                remaining: 4250.0,
                expired: true,
            },
        };

        let lines = goal_lines(&summary, &usd());

        assert_eq!(lines[0], "Target: $5,000.00");
        assert!(lines[1].ends_with("15.0%"));
        assert_eq!(lines[2], "Remaining: $4,250.00");
        assert_eq!(lines[3], "Deadline expired: 12/31/2025");
    }
}
