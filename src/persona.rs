use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("persona file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structured view of Persona.md: frontmatter pairs plus the text under
/// each `##` section, alongside the raw document.
#[derive(Debug, Serialize)]
pub struct PersonaDoc {
    pub frontmatter: BTreeMap<String, String>,
    pub sections: BTreeMap<String, String>,
    pub raw: String,
}

pub fn read_persona(path: &Path) -> Result<PersonaDoc, PersonaError> {
    if !path.exists() {
        return Err(PersonaError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_persona(&content))
}

fn parse_persona(content: &str) -> PersonaDoc {
    let mut frontmatter = BTreeMap::new();
    if let Some(rest) = content.strip_prefix("---") {
        if let Some(end) = rest.find("---") {
            for line in rest[..end].trim().lines() {
                if let Some((key, value)) = line.split_once(':') {
                    frontmatter.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }
    }

    let mut sections = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();
    for line in content.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some(name) = current.take() {
                sections.insert(name, body.join("\n").trim().to_string());
            }
            current = Some(heading.trim().to_string());
            body.clear();
        } else if current.is_some() {
            body.push(line);
        }
    }
    if let Some(name) = current {
        sections.insert(name, body.join("\n").trim().to_string());
    }

    PersonaDoc { frontmatter, sections, raw: content.to_string() }
}

/// Append one evidence line to the Evidence Log and stamp the
/// frontmatter `updated:` date. Returns a short confirmation.
pub fn add_evidence(path: &Path, date: &str, text: &str) -> Result<String, PersonaError> {
    if !path.exists() {
        return Err(PersonaError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;

    let line = format!("- [{}] {}", date, text);
    let updated = stamp_updated(&insert_evidence_block(&content, &[line]), date);
    std::fs::write(path, updated)?;

    Ok(format!("Added evidence: [{}] {}...", date, head_chars(text, 50)))
}

/// New evidence goes at the top of the log so recent signals read first.
/// Without an Evidence Log section, one is created at the end.
fn insert_evidence_block(content: &str, lines: &[String]) -> String {
    let block = lines.join("\n");
    match content.find("## Evidence Log") {
        Some(idx) => {
            let log_start = idx + "## Evidence Log".len();
            let next_section = content[log_start..]
                .find("\n## ")
                .map(|offset| log_start + offset)
                .unwrap_or(content.len());
            format!(
                "{}\n{}\n{}{}",
                &content[..log_start],
                block,
                &content[log_start..next_section],
                &content[next_section..]
            )
        }
        None => format!("{}\n\n## Evidence Log\n{}\n", content, block),
    }
}

fn stamp_updated(content: &str, date: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let pattern = RE.get_or_init(|| Regex::new(r"updated:\s+\d{4}-\d{2}-\d{2}").unwrap());
    pattern.replace_all(content, format!("updated: {}", date)).into_owned()
}

// ---------------------------------------------------------------------------
// Pattern detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Correction,
    Preference,
    Workflow,
    Communication,
}

/// One rule table per pattern kind. Context windows differ per kind:
/// workflows read further ahead, communication style reads symmetrically.
struct RuleTable {
    kind: PatternKind,
    patterns: &'static [&'static str],
    before: usize,
    after: usize,
}

const RULE_TABLES: &[RuleTable] = &[
    RuleTable {
        kind: PatternKind::Correction,
        patterns: &[
            r"no[,\s]+(do\s+it|use|try|change)",
            r"instead[,\s]+(do|use|try)",
            r"actually[,\s]+(i|we)\s+(want|prefer|need)",
            r"don't\s+(do|use)\s+\w+[,\s]+use\s+\w+",
        ],
        before: 50,
        after: 50,
    },
    RuleTable {
        kind: PatternKind::Preference,
        patterns: &[
            r"i\s+(always|usually|prefer|like)\s+(\w+)",
            r"(never|don't)\s+use\s+(\w+)",
            r"stick\s+with\s+(\w+)",
        ],
        before: 50,
        after: 50,
    },
    RuleTable {
        kind: PatternKind::Workflow,
        patterns: &[
            r"first[,\s]+(i|we)\s+(\w+)",
            r"then[,\s]+(i|we)\s+(\w+)",
            r"process\s+is\s+(.+)",
            r"workflow:\s+(.+)",
        ],
        before: 30,
        after: 100,
    },
    RuleTable {
        kind: PatternKind::Communication,
        patterns: &[
            r"(concise|brief|short|detailed|thorough)",
            r"(romanian|english|mixed)",
            r"(formal|informal|casual)",
        ],
        before: 40,
        after: 40,
    },
];

fn compiled_tables() -> &'static Vec<(PatternKind, Vec<Regex>, usize, usize)> {
    static TABLES: OnceLock<Vec<(PatternKind, Vec<Regex>, usize, usize)>> = OnceLock::new();
    TABLES.get_or_init(|| {
        RULE_TABLES
            .iter()
            .map(|table| {
                let compiled = table
                    .patterns
                    .iter()
                    .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
                    .collect();
                (table.kind, compiled, table.before, table.after)
            })
            .collect()
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternMatch {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// The matched text itself.
    pub pattern: String,
    /// Surrounding context for human review.
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct SessionPatterns {
    pub corrections: Vec<PatternMatch>,
    pub preferences: Vec<PatternMatch>,
    pub workflows: Vec<PatternMatch>,
    pub communication: Vec<PatternMatch>,
    pub session_date: String,
}

/// Scan a session digest for behavioral signals, one ordered rule table
/// per kind, every match reported with its context window.
pub fn analyze_session(text: &str, session_date: &str) -> SessionPatterns {
    let mut patterns = SessionPatterns {
        corrections: Vec::new(),
        preferences: Vec::new(),
        workflows: Vec::new(),
        communication: Vec::new(),
        session_date: session_date.to_string(),
    };

    for (kind, rules, before, after) in compiled_tables() {
        let bucket = match kind {
            PatternKind::Correction => &mut patterns.corrections,
            PatternKind::Preference => &mut patterns.preferences,
            PatternKind::Workflow => &mut patterns.workflows,
            PatternKind::Communication => &mut patterns.communication,
        };
        for rule in rules {
            for m in rule.find_iter(text) {
                bucket.push(PatternMatch {
                    kind: *kind,
                    pattern: m.as_str().to_string(),
                    context: context_window(text, m.start(), m.end(), *before, *after),
                });
            }
        }
    }

    patterns
}

/// Append correction and preference evidence to Persona.md. Workflow and
/// communication matches are reported but not logged automatically.
pub fn update_persona_file(
    path: &Path,
    patterns: &SessionPatterns,
) -> Result<String, PersonaError> {
    if !path.exists() {
        return Err(PersonaError::NotFound(path.to_path_buf()));
    }

    let lines: Vec<String> = patterns
        .corrections
        .iter()
        .chain(patterns.preferences.iter())
        .map(|m| format!("- [{}] {}", patterns.session_date, head_chars(&m.context, 100)))
        .collect();

    if lines.is_empty() {
        return Ok("No significant patterns detected".to_string());
    }

    let content = std::fs::read_to_string(path)?;
    let updated = stamp_updated(&insert_evidence_block(&content, &lines), &patterns.session_date);
    std::fs::write(path, updated)?;

    Ok(format!("Added {} evidence line(s) to Persona.md", lines.len()))
}

/// Slice around a match, clamped to char boundaries, trimmed.
fn context_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> String {
    let mut lo = start.saturating_sub(before);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + after).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].trim().to_string()
}

fn head_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
