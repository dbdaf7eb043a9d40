use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A candidate transcript on disk. Identity is filename-based and fixed
/// at discovery time; size and mtime come from a single stat.
#[derive(Debug, Clone)]
pub struct TranscriptFile {
    pub path: PathBuf,
    pub session_id: String,
    pub project: String,
    pub size: u64,
    pub modified: SystemTime,
}

impl TranscriptFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let meta = std::fs::metadata(&path).ok()?;
        Some(TranscriptFile {
            session_id: session_id_from_path(&path),
            project: project_from_path(&path),
            size: meta.len(),
            modified: meta.modified().ok()?,
            path,
        })
    }
}

/// Enumerate `{session_id}.jsonl` files one directory deep under the
/// projects root. A missing root yields an empty list, not an error.
pub fn find_transcripts(projects_root: &Path) -> Vec<TranscriptFile> {
    let mut found = Vec::new();
    let entries = match std::fs::read_dir(projects_root) {
        Ok(entries) => entries,
        Err(_) => return found,
    };

    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let files = match std::fs::read_dir(&dir) {
            Ok(files) => files,
            Err(_) => continue,
        };
        for file in files.flatten() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            if let Some(transcript) = TranscriptFile::from_path(path) {
                found.push(transcript);
            }
        }
    }

    found
}

/// Session ID is the transcript filename without its extension.
pub fn session_id_from_path(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

pub fn project_from_path(path: &Path) -> String {
    match path.parent().and_then(|p| p.file_name()) {
        Some(name) => project_name(&name.to_string_lossy()),
        None => String::new(),
    }
}

/// Derive a readable project name from a flattened directory name.
///
/// The directory name is split on hyphens. Everything after a literal
/// `projects` segment becomes the slash-joined name; without that marker
/// the last two non-empty segments are used, and a name with fewer than
/// two segments is returned as-is. Pure string work, no file access.
pub fn project_name(dir_name: &str) -> String {
    let parts: Vec<&str> = dir_name.split('-').collect();

    if let Some(idx) = parts.iter().position(|p| *p == "projects") {
        let tail: Vec<&str> = parts[idx + 1..].iter().copied().filter(|p| !p.is_empty()).collect();
        if !tail.is_empty() {
            return tail.join("/");
        }
    }

    let meaningful: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if meaningful.len() >= 2 {
        meaningful[meaningful.len() - 2..].join("/")
    } else {
        dir_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_name_after_projects_marker() {
        assert_eq!(project_name("-home-chris-projects-remember"), "remember");
        assert_eq!(project_name("-home-chris-projects-client-site"), "client/site");
    }

    #[test]
    fn test_project_name_without_marker() {
        assert_eq!(project_name("-home-chris-dev-tooling"), "dev/tooling");
        assert_eq!(project_name("workspace"), "workspace");
        assert_eq!(project_name("-scratch"), "-scratch");
    }

    #[test]
    fn test_project_name_trailing_projects_marker() {
        // Nothing follows the marker; falls back to the last two segments.
        assert_eq!(project_name("-home-chris-projects"), "chris/projects");
    }

    #[test]
    fn test_session_id_from_path() {
        assert_eq!(session_id_from_path(Path::new("/tmp/dir/abc-123.jsonl")), "abc-123");
    }

    #[test]
    fn test_missing_root_is_empty() {
        assert!(find_transcripts(Path::new("/nonexistent/projects")).is_empty());
    }

    #[test]
    fn test_find_transcripts() {
        let root = TempDir::new().unwrap();
        let project = root.path().join("-home-chris-projects-demo");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(project.join("session-1.jsonl"), "{}\n").unwrap();
        std::fs::write(project.join("notes.txt"), "not a transcript").unwrap();
        // Stray file at the top level is ignored.
        std::fs::write(root.path().join("stray.jsonl"), "{}\n").unwrap();

        let found = find_transcripts(root.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].session_id, "session-1");
        assert_eq!(found[0].project, "demo");
        assert_eq!(found[0].size, 3);
    }
}
