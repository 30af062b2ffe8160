use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use smartstudy::cli::args::{Cli, Commands};
use smartstudy::cli::commands::{self, Session};
use smartstudy::config::{ColorSetting, Config, Paths};
use smartstudy::logging;
use smartstudy::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let output = match cli.command {
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
        command => {
            let paths = Paths::new()?;
            let config = Config::load_from_path(&paths.config_file)
                .context("could not load configuration")?;
            apply_color(config.general.color);

            let db = Database::open(&paths)?;
            tracing::debug!(root = %paths.root.display(), "opened data directory");
            let session = Session::new(db, config, cli.output, cli.user);

            match command {
                Commands::User(args) => commands::user(&session, args.command)?,
                Commands::Task(args) => commands::task(&session, args.command)?,
                Commands::Stats(args) => commands::stats(&session, args.command)?,
                Commands::Completions { .. } => String::new(),
            }
        },
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn apply_color(setting: ColorSetting) {
    match setting {
        ColorSetting::Auto => {},
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
    }
}
