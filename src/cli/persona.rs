use std::path::PathBuf;

use clap::Subcommand;

use crate::persona;

#[derive(Debug, Subcommand)]
pub enum PersonaCommand {
    /// Print Persona.md as structured JSON
    Read {
        /// Path to Persona.md
        path: PathBuf,
    },
    /// Append an evidence line to the Evidence Log
    AddEvidence {
        /// Path to Persona.md
        path: PathBuf,
        /// Evidence date (YYYY-MM-DD)
        date: String,
        /// Evidence text (read from stdin when omitted)
        text: Option<String>,
    },
    /// Detect behavioral patterns in a session digest
    Analyze {
        /// Session markdown file (read from stdin when omitted)
        file: Option<PathBuf>,
        /// Path to Persona.md
        #[arg(long)]
        persona_path: PathBuf,
        /// Session date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Analyze only, don't update Persona.md
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(command: PersonaCommand) -> anyhow::Result<()> {
    match command {
        PersonaCommand::Read { path } => {
            let doc = persona::read_persona(&path)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        PersonaCommand::AddEvidence { path, date, text } => {
            let text = match text {
                Some(text) => text,
                None => super::read_stdin()?,
            };
            let summary = persona::add_evidence(&path, &date, &text)?;
            println!("{}", summary);
        }
        PersonaCommand::Analyze { file, persona_path, date, dry_run } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => super::read_stdin()?,
            };
            let date = date.unwrap_or_else(super::today);

            let patterns = persona::analyze_session(&text, &date);
            println!("{}", serde_json::to_string_pretty(&patterns)?);

            if !dry_run {
                let summary = persona::update_persona_file(&persona_path, &patterns)?;
                eprintln!("{}", summary);
            }
        }
    }
    Ok(())
}
