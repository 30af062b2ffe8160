//! Statistics command implementation.
//!
//! Handles the stats subcommands for the study dashboard.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use super::Session;
use crate::cli::args::{OutputFormat, StatsCommands};
use crate::config::StatsConfig;
use crate::core::{CategoryCount, Heatmap, StreakEngine};
use crate::error::StudyError;
use crate::features::stats::{
    render_bar_chart, render_daily_chart, render_heatmap, render_progress_bar, render_sparkline,
    render_summary_box, StatsCollector, SummaryMetrics, WeeklyReport,
};
use crate::output::to_json;
use crate::storage::TaskStore;

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns an error if no user is active or the store cannot be read.
pub fn stats(session: &Session, cmd: Option<StatsCommands>) -> Result<String, StudyError> {
    run(session, cmd, Utc::now())
}

fn run(
    session: &Session,
    cmd: Option<StatsCommands>,
    now: DateTime<Utc>,
) -> Result<String, StudyError> {
    let owner = session.active_user()?;
    let cfg = &session.config.stats;
    let format = session.format;

    let heatmap_days = match &cmd {
        Some(StatsCommands::Heatmap { days: Some(days) }) => *days,
        _ => cfg.heatmap_days,
    };
    let window = [
        heatmap_days,
        cfg.streak_window_days,
        cfg.long_consistency_days,
        cfg.short_consistency_days,
        7,
    ]
    .into_iter()
    .max()
    .unwrap_or(7);

    let store = TaskStore::new(&session.db);
    let data = StatsCollector::new(&store, owner.id).collect(window, now)?;
    let engine =
        StreakEngine::new(now.date_naive()).with_streak_window(cfg.streak_window_days as usize);

    match cmd {
        None | Some(StatsCommands::Summary) => {
            let summary = SummaryMetrics::calculate(&data, &engine, cfg);
            let weekly = WeeklyReport::calculate(&data, &engine);
            match format {
                OutputFormat::Json => to_json(&summary),
                OutputFormat::Pretty => Ok(render_summary(&summary, &weekly, cfg)),
            }
        },
        Some(StatsCommands::Weekly) => {
            let weekly = WeeklyReport::calculate(&data, &engine);
            match format {
                OutputFormat::Json => to_json(&weekly),
                OutputFormat::Pretty => Ok(render_weekly(&weekly)),
            }
        },
        Some(StatsCommands::Categories) => {
            let categories = engine.category_breakdown(&data.tasks);
            match format {
                OutputFormat::Json => to_json(&json!({
                    "count": categories.len(),
                    "items": categories
                })),
                OutputFormat::Pretty => Ok(render_categories(&categories)),
            }
        },
        Some(StatsCommands::Heatmap { .. }) => {
            let heatmap = engine.heatmap(&data.completions, heatmap_days as usize);
            match format {
                OutputFormat::Json => to_json(&heatmap),
                OutputFormat::Pretty => Ok(render_heatmap_view(&heatmap)),
            }
        },
    }
}

fn render_summary(
    summary: &SummaryMetrics,
    weekly: &WeeklyReport,
    cfg: &StatsConfig,
) -> String {
    let streak = if summary.streak > 0 {
        format!("{} days", summary.streak).green().to_string()
    } else {
        "0 days".dimmed().to_string()
    };

    let items = [
        ("Completed today", summary.today_completed.to_string()),
        ("Last 7 days", summary.week_completed.to_string()),
        ("All time", summary.total_completed.to_string()),
        ("Active tasks", summary.active_tasks.to_string()),
        ("Current streak", format!("{} days", summary.streak)),
        ("Best streak", format!("{} days", summary.best_streak)),
        ("Avg priority", format!("{:.2}", summary.avg_priority)),
    ];

    let mut output = vec![render_summary_box("Study Summary", &items), String::new()];
    output.push(format!("🔥 Streak: {streak}"));
    output.push(format!(
        "  {:>3}-day consistency {}",
        cfg.short_consistency_days,
        render_progress_bar(summary.consistency_7d, 20)
    ));
    output.push(format!(
        "  {:>3}-day consistency {}",
        cfg.long_consistency_days,
        render_progress_bar(summary.consistency_30d, 20)
    ));
    output.push(format!(
        "  Completion rate     {}",
        render_progress_bar(summary.completion_rate, 20)
    ));
    output.push(String::new());

    let counts: Vec<usize> = weekly.days.iter().map(|d| d.count).collect();
    output.push(format!(
        "This week: {}  ({} completed)",
        render_sparkline(&counts).cyan(),
        weekly.total
    ));

    output.join("\n")
}

fn render_weekly(weekly: &WeeklyReport) -> String {
    let mut output = vec!["📅 LAST 7 DAYS".bold().to_string(), "─".repeat(40)];
    output.push(render_daily_chart(&weekly.days, 20));
    output.push(String::new());
    output.push(format!("Total: {}", weekly.total.to_string().green()));
    output.join("\n")
}

fn render_categories(categories: &[CategoryCount]) -> String {
    if categories.is_empty() {
        return "Categories (0)\n  No tasks yet".to_string();
    }

    let mut output = vec![
        format!("Categories ({})", categories.len()).bold().to_string(),
        "─".repeat(40),
    ];
    let data: Vec<(String, usize)> = categories
        .iter()
        .map(|c| (c.category.clone(), c.total_count))
        .collect();
    output.push(render_bar_chart(&data, 14, 20));
    output.push(String::new());

    for c in categories {
        output.push(format!(
            "  {:<14} {}/{} completed",
            c.category, c.completed_count, c.total_count
        ));
    }
    output.join("\n")
}

fn render_heatmap_view(heatmap: &Heatmap) -> String {
    let mut output = vec![
        format!("🗓  ACTIVITY ({} days)", heatmap.days.len())
            .bold()
            .to_string(),
        "─".repeat(40),
    ];
    output.push(render_heatmap(heatmap));
    output.push(String::new());
    output.push(format!(
        "Contributions: {}  Current streak: {}  Best streak: {}",
        heatmap.total_contributions.to_string().green(),
        heatmap.current_streak,
        heatmap.best_streak
    ));
    output.join("\n")
}
