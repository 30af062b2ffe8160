//! Task command implementation.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use super::Session;
use crate::cli::args::{AddTaskArgs, OutputFormat, TaskCommands, UpdateTaskArgs};
use crate::core::parse_due_date;
use crate::error::StudyError;
use crate::events::{dispatch, CompletionNotifier, LogNotifier};
use crate::features::recurring::reconcile_daily;
use crate::output::{format_task, format_tasks, to_json};
use crate::storage::TaskStore;
use crate::tasks::{ListFilter, NewTask, TaskPatch, TaskStatus};

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if no user is active, input is invalid, the task does
/// not exist, or the database fails.
pub fn task(session: &Session, cmd: TaskCommands) -> Result<String, StudyError> {
    run(session, cmd, Utc::now(), &LogNotifier)
}

fn run(
    session: &Session,
    cmd: TaskCommands,
    now: DateTime<Utc>,
    notifier: &dyn CompletionNotifier,
) -> Result<String, StudyError> {
    let owner = session.active_user()?;
    let store = TaskStore::new(&session.db);
    let format = session.format;

    match cmd {
        TaskCommands::Add(args) => {
            let new_task = new_task_from_args(args, session, now)?;
            let task = store.create(owner.id, new_task, now)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!(
                    "{} task #{}: {} (priority {:.2})",
                    "Created".green(),
                    task.id,
                    task.title.bold(),
                    task.priority_score
                )),
            }
        },
        TaskCommands::List { filter, category } => {
            if session.config.tasks.auto_spawn_daily {
                reconcile_daily(&store, owner.id, now)?;
            }
            let filter = ListFilter::from(filter);
            let tasks = store.list(owner.id, filter, category.as_deref(), now)?;
            format_tasks(&tasks, filter.title(), format)
        },
        TaskCommands::Show { id } => format_task(&store.get(owner.id, id)?, format),
        TaskCommands::Update(args) => {
            let id = args.id;
            let before = store.get(owner.id, id)?;
            let patch = patch_from_args(args, now)?;
            let task = store.update(owner.id, id, patch, now)?;
            if !before.is_completed() {
                dispatch(notifier, &task);
            }
            format_task(&task, format)
        },
        TaskCommands::Complete { id } => {
            let task = store.toggle_complete(owner.id, id, now)?;
            dispatch(notifier, &task);
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => {
                    let verb = match task.status {
                        TaskStatus::Completed => "Completed".green(),
                        TaskStatus::Active => "Reopened".yellow(),
                    };
                    Ok(format!("{verb} task #{}: {}", task.id, task.title))
                },
            }
        },
        TaskCommands::Delete { id } => {
            store.delete(owner.id, id)?;
            match format {
                OutputFormat::Json => to_json(&json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("{} task #{id}", "Deleted".red())),
            }
        },
        TaskCommands::Reprioritize => {
            let count = store.reprioritize(owner.id, now)?;
            match format {
                OutputFormat::Json => to_json(&json!({ "reprioritized": count })),
                OutputFormat::Pretty => Ok(format!("Reprioritized {count} active task(s)")),
            }
        },
    }
}

fn parse_due(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, StudyError> {
    parse_due_date(input, now)
        .ok_or_else(|| StudyError::Validation(format!("could not understand due date {input:?}")))
}

fn new_task_from_args(
    args: AddTaskArgs,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<NewTask, StudyError> {
    let mut task = NewTask::new(
        args.title,
        parse_due(&args.due, now)?,
        args.effort,
        args.complexity,
    )
    .with_type(args.task_type.into())
    .with_category(
        args.category
            .unwrap_or_else(|| session.config.tasks.default_category.clone()),
    );
    task.description = args.description.unwrap_or_default();
    task.notes = args.notes.unwrap_or_default();
    task.requires_proof = args.requires_proof;
    Ok(task)
}

fn patch_from_args(args: UpdateTaskArgs, now: DateTime<Utc>) -> Result<TaskPatch, StudyError> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        notes: args.notes,
        category: args.category,
        due_date: args.due.as_deref().map(|d| parse_due(d, now)).transpose()?,
        effort_hours: args.effort,
        complexity_level: args.complexity,
        task_type: args.task_type.map(Into::into),
        requires_proof: args.requires_proof,
        status: args.status.map(Into::into),
    };

    if patch.is_empty() {
        return Err(StudyError::Validation("nothing to update".to_string()));
    }
    Ok(patch)
}
