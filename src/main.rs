mod cli;
mod config;
mod index;
mod ledger;
mod persona;
mod render;
mod resource;
mod tasks;
mod transcript;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "remember", about = "Session digests and knowledge-base tooling for Claude Code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one session transcript as clean markdown
    Extract {
        /// Path to a {session_id}.jsonl transcript
        file: PathBuf,
    },
    /// List transcripts not yet extracted, oldest first
    Unprocessed {
        /// Only show projects whose name contains this substring
        #[arg(long)]
        project: Option<String>,
    },
    /// Record a session ID as extracted
    MarkProcessed {
        session_id: String,
    },
    /// Print a knowledge index of the data root
    Index {
        /// One line per category, for hook injection
        #[arg(long)]
        compact: bool,
    },
    /// Classify a task by urgency and format it for tasks.md
    Route {
        /// Task text (omit when using --stdin)
        task: Option<String>,
        /// Read task text from stdin
        #[arg(long)]
        stdin: bool,
        /// Project name (kebab-case)
        #[arg(long)]
        project: Option<String>,
        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Read or update Persona.md
    Persona {
        #[command(subcommand)]
        command: cli::persona::PersonaCommand,
    },
    /// Create a resource note for a URL
    Resource(cli::resource::ResourceArgs),
    /// Print the resolved configuration
    Config {
        /// Dot-path key, e.g. paths.data_root
        key: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&config::default_sources());

    match cli.command {
        Commands::Extract { file } => cli::extract::run(&config, &file)?,
        Commands::Unprocessed { project } => cli::unprocessed::run(&config, project.as_deref())?,
        Commands::MarkProcessed { session_id } => cli::mark::run(&config, &session_id)?,
        Commands::Index { compact } => cli::index::run(&config, compact)?,
        Commands::Route { task, stdin, project, date } => {
            cli::route::run(task.as_deref(), stdin, project.as_deref(), date.as_deref())?
        }
        Commands::Persona { command } => cli::persona::run(command)?,
        Commands::Resource(args) => cli::resource::run(args)?,
        Commands::Config { key } => cli::config::run(&config, key.as_deref())?,
    }

    Ok(())
}
