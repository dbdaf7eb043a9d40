use std::path::PathBuf;

use clap::Args;

use crate::config;
use crate::resource::{self, ResourceMetadata};

#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// URL to record
    pub url: String,
    /// Page title (falls back to the URL's last path segment)
    #[arg(long)]
    pub title: Option<String>,
    /// Author or source attribution
    #[arg(long)]
    pub author: Option<String>,
    /// One-line description for the summary section
    #[arg(long)]
    pub description: Option<String>,
    /// Page excerpt, used for classification and the note body
    #[arg(long)]
    pub excerpt: Option<String>,
    /// Output directory, e.g. ~/remember/Resources/articles/
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Session date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,
    /// Print metadata only, don't create the note
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ResourceArgs) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(super::today);
    let meta = ResourceMetadata::build(
        &args.url,
        args.title,
        args.author,
        args.description,
        args.excerpt,
        &date,
    );

    println!("{}", serde_json::to_string_pretty(&meta)?);

    if args.dry_run {
        return Ok(());
    }
    match args.output {
        Some(dir) => {
            let dir = config::expand_tilde(&dir.to_string_lossy());
            let path = resource::write_note(&meta, &dir)?;
            eprintln!("Created: {}", path.display());
        }
        None => eprintln!("Use --output to choose where to create the note"),
    }

    Ok(())
}
