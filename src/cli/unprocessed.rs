use chrono::{DateTime, Local};

use crate::config::Config;
use crate::ledger::ProcessedLedger;
use crate::transcript::{batch, locator};

pub fn run(config: &Config, project_filter: Option<&str>) -> anyhow::Result<()> {
    let ledger = ProcessedLedger::for_data_root(&config.data_root());
    let processed = ledger.read();

    let transcripts = locator::find_transcripts(&config.projects_root());
    let candidates = batch::select_unprocessed(
        transcripts,
        &processed,
        config.extract.min_session_size,
        project_filter,
    );

    if candidates.is_empty() {
        println!("No unprocessed sessions found.");
        return Ok(());
    }

    println!("Found {} unprocessed session(s):\n", candidates.len());
    for transcript in &candidates {
        let modified = DateTime::<Local>::from(transcript.modified).format("%Y-%m-%d %H:%M");
        println!("  {}", transcript.session_id);
        println!("    Project: {}", transcript.project);
        println!("    Modified: {}", modified);
        println!("    Size: {}KB", transcript.size / 1024);
        println!("    Path: {}", transcript.path.display());
        println!();
    }

    Ok(())
}
