//! Text rendering for the study dashboard.
//!
//! Bar charts for categories and days, sparklines, the contribution heatmap
//! grid and the framed summary box.

use chrono::Datelike;

use crate::core::{DayCount, Heatmap};

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Heatmap cell glyphs indexed by level.
const HEAT_CHARS: [char; 5] = ['·', '░', '▒', '▓', '█'];

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
///
/// # Returns
///
/// A multi-line string with the chart.
#[must_use]
pub fn render_bar_chart(data: &[(String, usize)], max_label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let truncated_label = if label.chars().count() > max_label_width {
            let kept: String = label.chars().take(max_label_width.saturating_sub(3)).collect();
            format!("{kept}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = (*value * bar_width) / max_value;
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{truncated_label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
pub fn render_sparkline(values: &[usize]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max_value = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                BAR_CHARS[((v * 7) / max_value).clamp(1, 7)]
            }
        })
        .collect()
}

/// Render daily counts as labelled rows, one per day.
#[must_use]
pub fn render_daily_chart(days: &[DayCount], bar_width: usize) -> String {
    let data: Vec<(String, usize)> = days
        .iter()
        .map(|d| (d.date.format("%a %m-%d").to_string(), d.count))
        .collect();

    render_bar_chart(&data, 9, bar_width)
}

/// Render a heatmap as a weekday-by-week grid.
///
/// Rows are Monday to Sunday; columns are calendar weeks, oldest on the left.
/// Cells before the first day of the window are left blank.
#[must_use]
pub fn render_heatmap(heatmap: &Heatmap) -> String {
    let Some(first) = heatmap.days.first() else {
        return String::new();
    };

    let offset = first.date.weekday().num_days_from_monday() as usize;
    let weeks = (offset + heatmap.days.len()).div_ceil(7);
    let mut grid = vec![vec![' '; weeks]; 7];

    for (i, day) in heatmap.days.iter().enumerate() {
        let slot = offset + i;
        grid[slot % 7][slot / 7] = HEAT_CHARS[usize::from(day.level.min(4))];
    }

    let mut lines: Vec<String> = grid
        .iter()
        .zip(DAY_LABELS)
        .map(|(row, label)| format!("{label} {}", row.iter().collect::<String>()))
        .collect();

    lines.push(String::new());
    lines.push("Legend: · = 0  ░ = low  ▒ = medium  ▓ = high  █ = peak".to_string());

    lines.join("\n")
}

/// Render a simple progress bar.
///
/// # Arguments
///
/// * `fraction` - Progress in `[0, 1]`; values outside are clamped
/// * `width` - Width of the progress bar
#[must_use]
pub fn render_progress_bar(fraction: f64, width: usize) -> String {
    let progress = fraction.clamp(0.0, 1.0);
    let filled = ((progress * width as f64).round() as usize).min(width);
    let empty = width - filled;

    let bar = format!(
        "[{}{}]",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty)
    );

    format!("{bar} {:.0}%", progress * 100.0)
}

/// Render a summary box with key metrics.
///
/// # Arguments
///
/// * `title` - Box title
/// * `items` - Vec of (label, value) pairs
///
/// # Returns
///
/// Multi-line string with a bordered box.
#[must_use]
pub fn render_summary_box(title: &str, items: &[(&str, String)]) -> String {
    let width = |s: &str| s.chars().count();
    let max_label_len = items.iter().map(|(l, _)| width(l)).max().unwrap_or(0);
    let max_value_len = items.iter().map(|(_, v)| width(v)).max().unwrap_or(0);
    let content_width = max_label_len + max_value_len + 3; // " : "
    let box_width = content_width.max(width(title)) + 4;

    let mut lines = Vec::new();

    lines.push(format!("┌{}┐", "─".repeat(box_width)));

    let title_padding = (box_width - width(title)) / 2;
    lines.push(format!(
        "│{}{}{}│",
        " ".repeat(title_padding),
        title,
        " ".repeat(box_width - title_padding - width(title))
    ));

    lines.push(format!("├{}┤", "─".repeat(box_width)));

    for (label, value) in items {
        let item_str = format!("{label:>max_label_len$} : {value}");
        let padding = box_width - width(&item_str);
        lines.push(format!("│ {}{} │", item_str, " ".repeat(padding - 2)));
    }

    lines.push(format!("└{}┘", "─".repeat(box_width)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HeatmapDay;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_render_sparkline() {
        let values = [0, 2, 5, 3, 8, 4, 1];
        let sparkline = render_sparkline(&values);
        assert_eq!(sparkline.chars().count(), 7);
        assert_eq!(sparkline.chars().next(), Some(' '));
        assert_eq!(sparkline.chars().nth(4), Some('▇'));
    }

    #[test]
    fn test_render_sparkline_empty() {
        assert!(render_sparkline(&[]).is_empty());
    }

    #[test]
    fn test_render_bar_chart() {
        let data = vec![
            ("math".to_string(), 5),
            ("reading".to_string(), 10),
            ("extraordinarily-long".to_string(), 3),
        ];
        let chart = render_bar_chart(&data, 8, 10);
        assert!(chart.contains("math"));
        assert!(chart.contains("reading"));
        assert!(chart.contains("extra..."));
        assert!(chart.contains(&"█".repeat(10)));
    }

    #[test]
    fn test_render_daily_chart() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let days: Vec<DayCount> = (0..7)
            .map(|i| DayCount {
                date: start + Duration::days(i),
                count: usize::try_from(i).unwrap(),
            })
            .collect();
        let chart = render_daily_chart(&days, 12);
        assert_eq!(chart.lines().count(), 7);
        assert!(chart.starts_with("Mon 03-02"));
    }

    #[test]
    fn test_render_heatmap_grid() {
        // 2026-03-04 is a Wednesday.
        let start = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let heatmap = Heatmap {
            days: (0..10)
                .map(|i| HeatmapDay {
                    date: start + Duration::days(i),
                    count: usize::try_from(i % 5).unwrap(),
                    level: u8::try_from(i % 5).unwrap(),
                })
                .collect(),
            total_contributions: 20,
            best_streak: 4,
            current_streak: 4,
        };

        let rendered = render_heatmap(&heatmap);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Mon"));
        assert!(lines[6].starts_with("Sun"));
        // Wednesday row: first cell is level 0, the following week level 2.
        assert_eq!(lines[2], "Wed ·▒");
        assert!(rendered.contains("Legend"));
    }

    #[test]
    fn test_render_heatmap_empty() {
        let heatmap = Heatmap {
            days: Vec::new(),
            total_contributions: 0,
            best_streak: 0,
            current_streak: 0,
        };
        assert!(render_heatmap(&heatmap).is_empty());
    }

    #[test]
    fn test_render_progress_bar() {
        assert!(render_progress_bar(0.5, 20).contains("50%"));
        assert!(render_progress_bar(1.0, 20).contains("100%"));
        assert!(render_progress_bar(0.0, 20).contains("0%"));
        assert!(render_progress_bar(3.0, 10).contains("100%"));
    }

    #[test]
    fn test_render_summary_box() {
        let items = [
            ("Streak", "4 days".to_string()),
            ("Completed", "35".to_string()),
        ];
        let box_str = render_summary_box("Study Summary", &items);
        assert!(box_str.contains("Study Summary"));
        assert!(box_str.contains("4 days"));
        assert!(box_str.contains("35"));
    }
}
