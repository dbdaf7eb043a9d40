use crate::config::Config;
use crate::ledger::ProcessedLedger;

pub fn run(config: &Config, session_id: &str) -> anyhow::Result<()> {
    let ledger = ProcessedLedger::for_data_root(&config.data_root());
    ledger.mark_processed(session_id)?;
    println!("Marked as processed: {}", session_id);
    Ok(())
}
