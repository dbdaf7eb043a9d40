use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved configuration for one invocation.
///
/// Loaded once in `main` from an ordered list of sources and passed
/// explicitly into commands; there is no global cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub session: SessionConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the knowledge base; `~` is expanded on access.
    pub data_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { data_root: "~/remember".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether the session-start hook should load Persona.md.
    pub load_persona: bool,
    /// Phrases that trigger an immediate brain-dump capture.
    pub brain_dump_keywords: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load_persona: true,
            brain_dump_keywords: [
                "save this",
                "remember this",
                "brain dump",
                "note to self",
                "capture this",
                "save to brain",
                "write to brain",
                "add to brain",
                "salvează",
                "notează",
                "reține",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Assistant messages longer than this are dropped as code/tool noise.
    pub max_assistant_text_len: usize,
    /// Transcripts smaller than this many bytes are skipped in batch runs.
    pub min_session_size: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_assistant_text_len: 500, min_session_size: 500 }
    }
}

impl Config {
    /// Knowledge-base root with `~` expanded.
    pub fn data_root(&self) -> PathBuf {
        expand_tilde(&self.paths.data_root)
    }

    /// Where Claude Code keeps per-project transcript directories.
    pub fn projects_root(&self) -> PathBuf {
        home_dir().join(".claude").join("projects")
    }
}

/// One configuration source. Sources are merged lowest precedence first;
/// unreadable or invalid sources are skipped.
#[derive(Debug, Clone)]
pub enum Source {
    /// A JSON file on disk.
    File(PathBuf),
    /// Inline JSON, e.g. from the REMEMBER_CONFIG env var.
    Inline(String),
}

/// Standard source order: project scope, user scope, then the
/// REMEMBER_CONFIG_FILE and REMEMBER_CONFIG environment overrides.
pub fn default_sources() -> Vec<Source> {
    let mut sources = vec![
        Source::File(PathBuf::from(".claude/plugin-config/remember/config.json")),
        Source::File(home_dir().join(".claude").join("plugin-config").join("remember").join("config.json")),
    ];
    if let Ok(path) = std::env::var("REMEMBER_CONFIG_FILE") {
        sources.push(Source::File(PathBuf::from(path)));
    }
    if let Ok(json) = std::env::var("REMEMBER_CONFIG") {
        sources.push(Source::Inline(json));
    }
    sources
}

/// Deep-merge each source over the built-in defaults, in order. A broken
/// source degrades to the layers below it; the result is always usable.
pub fn load(sources: &[Source]) -> Config {
    let mut merged = serde_json::to_value(Config::default()).unwrap_or(Value::Null);

    for source in sources {
        let raw = match source {
            Source::File(path) => match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(_) => continue,
            },
            Source::Inline(json) => json.clone(),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(overlay @ Value::Object(_)) => deep_merge(&mut merged, overlay),
            _ => continue,
        }
    }

    serde_json::from_value(merged).unwrap_or_default()
}

/// Objects merge key-by-key; anything else is replaced wholesale.
fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.entry(key) {
                    serde_json::map::Entry::Occupied(mut slot) => {
                        if slot.get().is_object() && value.is_object() {
                            deep_merge(slot.get_mut(), value);
                        } else {
                            slot.insert(value);
                        }
                    }
                    serde_json::map::Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        return home_dir();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(raw),
    }
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_source(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = load(&[]);
        assert_eq!(config.paths.data_root, "~/remember");
        assert_eq!(config.extract.max_assistant_text_len, 500);
        assert_eq!(config.extract.min_session_size, 500);
        assert!(config.session.load_persona);
    }

    #[test]
    fn test_partial_override_keeps_sibling_keys() {
        let file = write_source(r#"{"extract": {"min_session_size": 1000}}"#);
        let config = load(&[Source::File(file.path().to_path_buf())]);
        assert_eq!(config.extract.min_session_size, 1000);
        assert_eq!(config.extract.max_assistant_text_len, 500);
    }

    #[test]
    fn test_later_source_wins() {
        let low = write_source(r#"{"paths": {"data_root": "/low"}}"#);
        let high = write_source(r#"{"paths": {"data_root": "/high"}}"#);
        let config = load(&[
            Source::File(low.path().to_path_buf()),
            Source::File(high.path().to_path_buf()),
        ]);
        assert_eq!(config.paths.data_root, "/high");
    }

    #[test]
    fn test_inline_source_overrides_file() {
        let file = write_source(r#"{"session": {"load_persona": true}}"#);
        let config = load(&[
            Source::File(file.path().to_path_buf()),
            Source::Inline(r#"{"session": {"load_persona": false}}"#.to_string()),
        ]);
        assert!(!config.session.load_persona);
    }

    #[test]
    fn test_broken_sources_are_skipped() {
        let invalid = write_source("not json at all");
        let config = load(&[
            Source::File(PathBuf::from("/nonexistent/config.json")),
            Source::File(invalid.path().to_path_buf()),
            Source::Inline("[1, 2, 3]".to_string()),
        ]);
        assert_eq!(config.paths.data_root, "~/remember");
    }

    #[test]
    fn test_expand_tilde() {
        assert!(!expand_tilde("~/remember").to_string_lossy().contains('~'));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
