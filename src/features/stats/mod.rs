//! Statistics module.
//!
//! Provides the study dashboard:
//! - Completion counts, rates and streaks
//! - Weekly activity
//! - Category breakdowns
//! - Activity heatmaps

pub mod collector;
pub mod metrics;
pub mod visualization;

pub use collector::{CollectedData, StatsCollector};
pub use metrics::{SummaryMetrics, WeeklyReport};
pub use visualization::{
    render_bar_chart, render_daily_chart, render_heatmap, render_progress_bar, render_sparkline,
    render_summary_box,
};
