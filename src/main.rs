//! Registrar CLI - student and course records from the terminal

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "registrar")]
#[command(version)]
#[command(about = "Student and course record manager with JSON snapshots")]
#[command(long_about = r#"
Registrar keeps student and course records in a JSON snapshot file:
  • Add students and courses
  • Enroll students and record per-course grades
  • Save and reload the whole dataset

Run without a subcommand for the interactive menu.

Example usage:
  registrar
  registrar add-student --id S1 --name Ana --age 20 --address "X St"
  registrar enroll --student S1 --course C1
  registrar course --code C1 --json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Snapshot file (overrides the config file; default data.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file
    #[arg(short, long, global = true, default_value = "registrar.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,

    /// Add a student
    AddStudent {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        address: String,
    },

    /// Add a course
    AddCourse {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        instructor: String,
    },

    /// Enroll a student in a course
    Enroll {
        #[arg(short, long)]
        student: String,
        #[arg(short = 'C', long)]
        course: String,
    },

    /// Record a grade for an enrolled course
    Grade {
        #[arg(short, long)]
        student: String,
        #[arg(short = 'C', long)]
        course: String,
        #[arg(short, long)]
        grade: String,
    },

    /// Show one student
    Student {
        #[arg(long)]
        id: String,
    },

    /// Show one course and its roster
    Course {
        #[arg(long)]
        code: String,
    },

    /// List all students and courses
    List,

    /// Show record counts
    Stats,

    /// Audit student/course links in the snapshot
    Check,

    /// Write a config file
    Init {
        /// Snapshot file to record in the config
        #[arg(long, default_value = "data.json")]
        data_file: String,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the version
    Version,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = success_envelope(command, data);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn emit_error(command: &str, err: &anyhow::Error) {
    println!("{}", error_envelope(command, err));
}

fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

fn error_envelope(command: &str, err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "command": command,
        "error": format!("{:#}", err),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let command = cli.command.unwrap_or(Commands::Menu);
    let name = command_name(&command);

    let result = run(command, output_mode, cli.data, cli.config);
    match result {
        Err(e) if output_mode == OutputMode::Json => {
            emit_error(name, &e);
            std::process::exit(1);
        }
        other => other,
    }
}

fn run(
    command: Commands,
    output_mode: OutputMode,
    data: Option<PathBuf>,
    config_path: PathBuf,
) -> anyhow::Result<()> {
    let command = match command {
        Commands::Version => return commands::run_version(output_mode),
        Commands::Init { data_file, force } => {
            return commands::run_init(output_mode, &config_path, &data_file, force);
        }
        other => other,
    };

    let ctx = commands::Context::load(output_mode, data, &config_path)?;
    tracing::debug!(data = %ctx.data_path.display(), "Using snapshot");

    match command {
        Commands::Menu => commands::run_menu(&ctx),
        Commands::AddStudent { id, name, age, address } => {
            commands::mutate(&ctx, "add-student", |s| s.add_student(&name, age, &address, &id))
        }
        Commands::AddCourse { code, name, instructor } => {
            commands::mutate(&ctx, "add-course", |s| s.add_course(&name, &code, &instructor))
        }
        Commands::Enroll { student, course } => {
            commands::mutate(&ctx, "enroll", |s| s.enroll(&student, &course))
        }
        Commands::Grade { student, course, grade } => {
            commands::mutate(&ctx, "grade", |s| s.add_grade(&student, &course, &grade))
        }
        Commands::Student { id } => commands::view(&ctx, "student", |s| s.student_details(&id)),
        Commands::Course { code } => commands::view(&ctx, "course", |s| s.course_details(&code)),
        Commands::List => commands::view(&ctx, "list", |s| Ok(s.list())),
        Commands::Stats => commands::view(&ctx, "stats", |s| Ok(s.stats())),
        Commands::Check => commands::run_check(&ctx),
        // Handled above, before any snapshot is touched
        Commands::Init { .. } | Commands::Version => Ok(()),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Menu => "menu",
        Commands::AddStudent { .. } => "add-student",
        Commands::AddCourse { .. } => "add-course",
        Commands::Enroll { .. } => "enroll",
        Commands::Grade { .. } => "grade",
        Commands::Student { .. } => "student",
        Commands::Course { .. } => "course",
        Commands::List => "list",
        Commands::Stats => "stats",
        Commands::Check => "check",
        Commands::Init { .. } => "init",
        Commands::Version => "version",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use registrar::{Reply, Session};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_command_names_match_subcommands() {
        let cli = Cli::try_parse_from([
            "registrar", "add-student", "--id", "S1", "--name", "Ana", "--age", "20",
            "--address", "X St",
        ])
        .unwrap();
        assert_eq!(command_name(cli.command.as_ref().unwrap()), "add-student");

        let cli =
            Cli::try_parse_from(["registrar", "enroll", "-s", "S1", "-C", "C1", "--json"]).unwrap();
        assert!(cli.json);
        assert_eq!(command_name(cli.command.as_ref().unwrap()), "enroll");

        let cli = Cli::try_parse_from(["registrar"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(command_name(&Commands::Menu), "menu");
    }

    #[test]
    fn test_negative_age_is_rejected_by_parser() {
        let parsed = Cli::try_parse_from([
            "registrar", "add-student", "--id", "S1", "--name", "Ana", "--age", "-3",
            "--address", "X St",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_success_envelope_wraps_reply() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().join("data.json"));
        session.add_student("Ana", 20, "X St", "S1").unwrap();
        let reply = session.student_details("S1").unwrap();

        let envelope = success_envelope("student", serde_json::to_value(&reply).unwrap());
        assert_eq!(envelope["ok"], true);
        assert_eq!(envelope["command"], "student");
        assert_eq!(envelope["data"]["kind"], "student");
        assert_eq!(envelope["data"]["data"]["student_id"], "S1");

        let saved = Reply::Message("Saved".to_string());
        let envelope = success_envelope("save", serde_json::to_value(&saved).unwrap());
        assert_eq!(envelope["data"]["data"], "Saved");
    }

    #[test]
    fn test_error_envelope_carries_message() {
        let err = anyhow::anyhow!("Student not found: S9");
        let envelope = error_envelope("student", &err);
        assert_eq!(envelope["ok"], false);
        assert_eq!(envelope["command"], "student");
        assert_eq!(envelope["error"], "Student not found: S9");
        assert!(envelope.get("data").is_none());
    }
}
