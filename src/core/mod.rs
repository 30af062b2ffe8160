//! Core computations for smartstudy.
//!
//! Pure functions only: priority scoring, streak analytics and due date
//! parsing. Nothing here touches the database.

mod datetime;
pub mod priority;
pub mod streak;

pub use datetime::{is_storable, parse_due_date};
pub use priority::{calculate_priority, calculate_priority_at};
pub use streak::{
    CategoryCount, DayCount, Heatmap, HeatmapDay, StreakEngine, DEFAULT_HEATMAP_DAYS,
    DEFAULT_STREAK_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
