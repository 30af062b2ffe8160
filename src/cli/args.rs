use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::MAX_WINDOW_DAYS;
use crate::tasks::{ListFilter, TaskStatus, TaskType};

#[derive(Parser)]
#[command(name = "smartstudy")]
#[command(about = "A study planner that ranks your tasks and tracks your streaks")]
#[command(long_about = "smartstudy - A study task manager for the terminal

Plan study work with deadlines, effort and complexity. Every task gets a
priority score between 0 and 1 so the most pressing work is always on top,
and completions feed streaks, consistency figures and an activity heatmap.

QUICK START:
  smartstudy user register \"Ada\" ada@example.com
  smartstudy --user ada@example.com task add \"Calculus set\" --due tomorrow --effort 3 --complexity 4
  smartstudy task list --filter today
  smartstudy task complete 1
  smartstudy stats summary

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  smartstudy <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to general.default_output.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Email of the user to act as
    ///
    /// Falls back to SMARTSTUDY_USER, then general.default_user.
    #[arg(short, long, global = true, env = "SMARTSTUDY_USER")]
    pub user: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage users and profile settings
    ///
    /// # Examples
    ///
    ///   smartstudy user register "Ada Lovelace" ada@example.com
    ///   smartstudy user list
    ///   smartstudy --user ada@example.com user update --notification-time 07:30
    User(UserArgs),

    /// Create, list and complete study tasks
    ///
    /// Every create and update recomputes the task's priority score from
    /// its deadline, effort and complexity.
    ///
    /// # Examples
    ///
    ///   smartstudy task add "Essay draft" --due "friday 17:00" --effort 4 --complexity 3
    ///   smartstudy task list --filter upcoming --category writing
    ///   smartstudy task complete 12
    ///   smartstudy task reprioritize
    #[command(alias = "t")]
    Task(TaskArgs),

    /// View streaks, consistency and activity
    ///
    /// # Subcommands
    ///
    ///   summary     Dashboard overview (default)
    ///   weekly      Completions per day over the last week
    ///   categories  Task totals per category
    ///   heatmap     Activity calendar
    ///
    /// # Examples
    ///
    ///   smartstudy stats
    ///   smartstudy stats heatmap --days 90
    ///   smartstudy stats categories -o json
    Stats(StatsArgs),

    /// Generate shell completion scripts
    ///
    /// Example: smartstudy completions zsh > ~/.zfunc/_smartstudy
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for user management.
#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Register {
        /// Display name
        name: String,

        /// Email address (must be unique)
        email: String,

        /// IANA timezone name (default: UTC)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// List all users
    List,

    /// Show the active user's profile
    Show,

    /// Update the active user's profile
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,

        /// Daily reminder time, HH:MM
        #[arg(long)]
        notification_time: Option<String>,

        /// Minutes before a due date to remind (5-120)
        #[arg(long)]
        reminder_offset: Option<u32>,
    },
}

/// Arguments for task management.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task
    ///
    /// # Examples
    ///
    ///   smartstudy task add "Read chapter 3" --due tomorrow --effort 2 --complexity 2
    ///   smartstudy task add "Vocab" --due today --effort 0.5 --complexity 1 --type daily
    Add(AddTaskArgs),

    /// List tasks, highest priority first
    #[command(alias = "ls")]
    List {
        /// Which tasks to show
        #[arg(long, short = 'f', value_enum, default_value = "all")]
        filter: ListFilterArg,

        /// Only tasks in this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Show details of a task
    Show {
        /// Task ID
        id: i64,
    },

    /// Update fields of a task; the priority score is recomputed
    Update(UpdateTaskArgs),

    /// Toggle a task between active and completed
    #[command(alias = "done")]
    Complete {
        /// Task ID
        id: i64,
    },

    /// Permanently delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: i64,
    },

    /// Recompute the priority of every active task as of now
    Reprioritize,
}

#[derive(Args)]
pub struct AddTaskArgs {
    /// Task title
    pub title: String,

    /// Due date: ISO date or time, "tomorrow", "friday 17:00", "in 3 days"
    #[arg(long, short = 'd')]
    pub due: String,

    /// Estimated effort in hours (0-100]
    #[arg(long, short = 'e')]
    pub effort: f64,

    /// Complexity from 1 (easy) to 5 (hard)
    #[arg(long, short = 'x')]
    pub complexity: u8,

    /// Category (default: tasks.default_category)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Longer description
    #[arg(long)]
    pub description: Option<String>,

    /// Notes
    #[arg(long, short = 'n')]
    pub notes: Option<String>,

    /// How the task recurs
    #[arg(long = "type", value_enum, default_value = "specific-date")]
    pub task_type: TaskTypeArg,

    /// Completion must be backed by proof
    #[arg(long)]
    pub requires_proof: bool,
}

#[derive(Args)]
pub struct UpdateTaskArgs {
    /// Task ID
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    /// New due date
    #[arg(long, short = 'd')]
    pub due: Option<String>,

    #[arg(long, short = 'e')]
    pub effort: Option<f64>,

    #[arg(long, short = 'x')]
    pub complexity: Option<u8>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, short = 'n')]
    pub notes: Option<String>,

    #[arg(long = "type", value_enum)]
    pub task_type: Option<TaskTypeArg>,

    #[arg(long)]
    pub requires_proof: Option<bool>,

    /// Set the status directly
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Show the dashboard summary
    ///
    /// Completion counts, current and best streak, consistency and rates.
    Summary,

    /// Show completions per day over the last seven days
    Weekly,

    /// Show task totals per category
    Categories,

    /// Show an activity heatmap
    Heatmap {
        /// Number of days to cover (default: stats.heatmap_days)
        #[arg(
            long,
            short = 'd',
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
        )]
        days: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFilterArg {
    Today,
    Upcoming,
    Completed,
    All,
}

impl From<ListFilterArg> for ListFilter {
    fn from(arg: ListFilterArg) -> Self {
        match arg {
            ListFilterArg::Today => Self::Today,
            ListFilterArg::Upcoming => Self::Upcoming,
            ListFilterArg::Completed => Self::Completed,
            ListFilterArg::All => Self::All,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskTypeArg {
    Daily,
    Weekly,
    #[value(alias = "specific_date")]
    SpecificDate,
}

impl From<TaskTypeArg> for TaskType {
    fn from(arg: TaskTypeArg) -> Self {
        match arg {
            TaskTypeArg::Daily => Self::Daily,
            TaskTypeArg::Weekly => Self::Weekly,
            TaskTypeArg::SpecificDate => Self::SpecificDate,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Active,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::try_parse_from(["smartstudy", "user", "list"]).unwrap();
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_output_format_short() {
        let cli = Cli::try_parse_from(["smartstudy", "-o", "json", "user", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "smartstudy",
            "task",
            "list",
            "--user",
            "ada@example.com",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("ada@example.com"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_user_register() {
        let cli = Cli::try_parse_from([
            "smartstudy",
            "user",
            "register",
            "Ada",
            "ada@example.com",
            "--timezone",
            "Europe/London",
        ])
        .unwrap();
        if let Commands::User(args) = cli.command {
            if let UserCommands::Register { name, email, timezone } = args.command {
                assert_eq!(name, "Ada");
                assert_eq!(email, "ada@example.com");
                assert_eq!(timezone.as_deref(), Some("Europe/London"));
            } else {
                panic!("Expected Register command");
            }
        } else {
            panic!("Expected User command");
        }
    }

    #[test]
    fn test_cli_task_add() {
        let cli = Cli::try_parse_from([
            "smartstudy",
            "task",
            "add",
            "Essay draft",
            "--due",
            "tomorrow",
            "--effort",
            "4.5",
            "--complexity",
            "3",
            "--category",
            "writing",
            "--type",
            "daily",
        ])
        .unwrap();
        if let Commands::Task(args) = cli.command {
            if let TaskCommands::Add(add) = args.command {
                assert_eq!(add.title, "Essay draft");
                assert_eq!(add.due, "tomorrow");
                assert!((add.effort - 4.5).abs() < f64::EPSILON);
                assert_eq!(add.complexity, 3);
                assert_eq!(add.category.as_deref(), Some("writing"));
                assert_eq!(add.task_type, TaskTypeArg::Daily);
                assert!(!add.requires_proof);
            } else {
                panic!("Expected Add command");
            }
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_task_add_requires_effort() {
        let result = Cli::try_parse_from([
            "smartstudy",
            "task",
            "add",
            "Essay",
            "--due",
            "tomorrow",
            "--complexity",
            "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_task_list_filter() {
        let cli = Cli::try_parse_from(["smartstudy", "t", "ls", "-f", "upcoming"]).unwrap();
        if let Commands::Task(args) = cli.command {
            if let TaskCommands::List { filter, category } = args.command {
                assert_eq!(ListFilter::from(filter), ListFilter::Upcoming);
                assert!(category.is_none());
            } else {
                panic!("Expected List command");
            }
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_task_update_status() {
        let cli = Cli::try_parse_from([
            "smartstudy",
            "task",
            "update",
            "7",
            "--status",
            "completed",
            "--effort",
            "2",
        ])
        .unwrap();
        if let Commands::Task(args) = cli.command {
            if let TaskCommands::Update(update) = args.command {
                assert_eq!(update.id, 7);
                assert_eq!(update.status, Some(StatusArg::Completed));
                assert_eq!(update.effort, Some(2.0));
                assert!(update.title.is_none());
            } else {
                panic!("Expected Update command");
            }
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_stats_default_subcommand() {
        let cli = Cli::try_parse_from(["smartstudy", "stats"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            assert!(args.command.is_none());
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_heatmap_days() {
        let cli = Cli::try_parse_from(["smartstudy", "stats", "heatmap", "--days", "90"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            assert!(matches!(
                args.command,
                Some(StatsCommands::Heatmap { days: Some(90) })
            ));
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_heatmap_days_bounded() {
        for days in ["0", "3661", "4294967295"] {
            assert!(
                Cli::try_parse_from(["smartstudy", "stats", "heatmap", "--days", days]).is_err(),
                "--days {days} should be rejected"
            );
        }
        assert!(Cli::try_parse_from(["smartstudy", "stats", "heatmap", "--days", "3660"]).is_ok());
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["smartstudy", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { ref shell, install: false } if shell == "zsh"
        ));
    }
}
