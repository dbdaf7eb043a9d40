use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable record of already-extracted sessions: a flat UTF-8 file with
/// one session ID per line. Appends are unguarded and never deduplicated;
/// a duplicate entry is tolerated, not an error. Callers that need
/// serialization across concurrent invocations must provide it themselves.
#[derive(Debug, Clone)]
pub struct ProcessedLedger {
    path: PathBuf,
}

impl ProcessedLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Standard ledger location under the data root.
    pub fn for_data_root(data_root: &Path) -> Self {
        Self::new(data_root.join(".processed_sessions"))
    }

    /// Session IDs recorded so far. A missing or unreadable ledger reads
    /// as empty; this never fails.
    pub fn read(&self) -> HashSet<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => HashSet::new(),
        }
    }

    /// Append a session ID, creating parent directories on first use.
    /// No membership check before the write.
    pub fn mark_processed(&self, session_id: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", session_id)?;
        Ok(())
    }
}
