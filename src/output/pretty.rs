use colored::{ColoredString, Colorize};

use crate::tasks::{Task, TaskStatus};
use crate::users::User;

fn status_icon(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Active => "[ ]".white(),
        TaskStatus::Completed => "[x]".green(),
    }
}

/// Priority score colored by band: red is urgent, green can wait.
fn priority_label(score: f64) -> ColoredString {
    let label = format!("{score:.2}");
    if score >= 0.7 {
        label.red().bold()
    } else if score >= 0.4 {
        label.yellow()
    } else {
        label.green()
    }
}

/// Format a list of tasks as a pretty table
#[must_use]
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{title} ({} items)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let mut line = format!(
            "{} {} {}  {}",
            status_icon(task.status),
            format!("#{}", task.id).dimmed(),
            task.title.bold(),
            priority_label(task.priority_score)
        );

        line.push_str(&format!("  {}", task.category.cyan()));
        line.push_str(&format!(
            "  {}",
            task.due_date.format("%Y-%m-%d %H:%M").to_string().yellow()
        ));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
#[must_use]
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        priority_label(task.priority_score)
    ));
    output.push_str(&format!("  {}: {}\n", "Category".dimmed(), task.category));
    output.push_str(&format!("  {}: {}\n", "Type".dimmed(), task.task_type));
    output.push_str(&format!(
        "  {}: {}\n",
        "Due".dimmed(),
        task.due_date.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  {}: {}h, complexity {}/5\n",
        "Effort".dimmed(),
        task.effort_hours,
        task.complexity_level
    ));

    if !task.description.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), task.description));
    }

    if !task.notes.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), task.notes));
    }

    if task.requires_proof {
        output.push_str(&format!("  {}: yes\n", "Proof required".dimmed()));
    }

    if let Some(completed) = &task.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            completed.format("%Y-%m-%d %H:%M")
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        task.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format a list of users as pretty output
#[must_use]
pub fn format_users_pretty(users: &[User]) -> String {
    if users.is_empty() {
        return "Users (0)\n  No users".to_string();
    }

    let mut output = format!("Users ({})\n", users.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for user in users {
        output.push_str(&format!(
            "  {} {}  {}\n",
            format!("#{}", user.id).dimmed(),
            user.name.bold(),
            user.email.cyan()
        ));
    }

    output
}

/// Format a user profile as pretty output
#[must_use]
pub fn format_user_pretty(user: &User) -> String {
    let mut output = format!("{} <{}>\n", user.name.bold(), user.email);
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), user.id));
    output.push_str(&format!("  {}: {}\n", "Timezone".dimmed(), user.timezone));
    output.push_str(&format!(
        "  {}: {}\n",
        "Daily reminder".dimmed(),
        user.notification_time
    ));
    output.push_str(&format!(
        "  {}: {} min before due\n",
        "Reminder offset".dimmed(),
        user.reminder_offset
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Joined".dimmed(),
        user.created_at.format("%Y-%m-%d")
    ));
    output
}
