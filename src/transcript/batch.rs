use std::collections::HashSet;

use super::locator::TranscriptFile;

/// Select and order transcripts for a catch-up run: drop sessions already
/// in the ledger and near-empty files, optionally keep only projects
/// matching a substring, then sort oldest modification first so batch
/// jobs work through the backlog in FIFO order.
pub fn select_unprocessed(
    mut files: Vec<TranscriptFile>,
    processed: &HashSet<String>,
    min_size: u64,
    project_filter: Option<&str>,
) -> Vec<TranscriptFile> {
    let filter = project_filter.map(str::to_lowercase);

    files.retain(|t| {
        if processed.contains(&t.session_id) {
            return false;
        }
        if t.size < min_size {
            return false;
        }
        if let Some(ref needle) = filter {
            if !t.project.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        true
    });

    files.sort_by_key(|t| t.modified);
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn transcript(session_id: &str, project: &str, size: u64, age_secs: u64) -> TranscriptFile {
        TranscriptFile {
            path: PathBuf::from(format!("/tmp/{}.jsonl", session_id)),
            session_id: session_id.to_string(),
            project: project.to_string(),
            size,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(age_secs),
        }
    }

    #[test]
    fn test_processed_sessions_excluded() {
        let processed: HashSet<String> = ["abc123".to_string()].into_iter().collect();
        let files = vec![transcript("abc123", "demo", 900, 10), transcript("def456", "demo", 900, 20)];
        let selected = select_unprocessed(files, &processed, 500, None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].session_id, "def456");
    }

    #[test]
    fn test_small_files_excluded() {
        let files = vec![transcript("tiny", "demo", 499, 10), transcript("ok", "demo", 500, 20)];
        let selected = select_unprocessed(files, &HashSet::new(), 500, None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].session_id, "ok");
    }

    #[test]
    fn test_project_filter_case_insensitive() {
        let files = vec![
            transcript("a", "client/Site", 900, 10),
            transcript("b", "other/tool", 900, 20),
        ];
        let selected = select_unprocessed(files, &HashSet::new(), 500, Some("site"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].session_id, "a");
    }

    #[test]
    fn test_oldest_first() {
        let files = vec![
            transcript("newest", "demo", 900, 300),
            transcript("oldest", "demo", 900, 100),
            transcript("middle", "demo", 900, 200),
        ];
        let selected = select_unprocessed(files, &HashSet::new(), 500, None);
        let ids: Vec<&str> = selected.iter().map(|t| t.session_id.as_str()).collect();
        assert_eq!(ids, vec!["oldest", "middle", "newest"]);
    }
}
