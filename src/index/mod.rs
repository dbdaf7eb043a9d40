//! Knowledge-index scanners for the data root. Each category scan is a
//! single pass over filenames and note heads; a missing directory is an
//! empty category, never an error.

pub mod frontmatter;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

pub struct PersonEntry {
    pub file: String,
    pub name: String,
    pub role: String,
    pub org: String,
    pub last_contact: String,
    pub tags: String,
}

pub struct ProjectEntry {
    pub file: String,
    pub name: String,
    pub status: String,
    pub tags: String,
    pub updated: String,
    pub sub_notes: usize,
}

pub struct AreaEntry {
    pub file: String,
    pub name: String,
    pub updated: String,
}

pub struct NoteEntry {
    pub file: String,
    pub name: String,
    pub tags: String,
    pub created: String,
}

#[derive(Default)]
pub struct TaskCounts {
    pub focus: usize,
    pub next_up: usize,
    pub backlog: usize,
    pub done: usize,
}

#[derive(Default)]
pub struct JournalSummary {
    pub count: usize,
    pub latest: String,
}

pub fn scan_people(brain: &Path) -> Vec<PersonEntry> {
    md_files(&brain.join("People"))
        .into_iter()
        .map(|path| {
            let stem = file_stem(&path);
            let meta = frontmatter::parse(&path);
            PersonEntry {
                name: display_title(&meta, &stem),
                role: get(&meta, "role"),
                org: get_or(&meta, "org", "organization"),
                last_contact: get_or(&meta, "last_contact", "updated"),
                tags: get(&meta, "tags"),
                file: stem,
            }
        })
        .collect()
}

pub fn scan_projects(brain: &Path) -> Vec<ProjectEntry> {
    let projects_dir = brain.join("Projects");
    let mut dirs: Vec<PathBuf> = match std::fs::read_dir(&projects_dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => return Vec::new(),
    };
    dirs.sort();

    let mut results = Vec::new();
    for dir in dirs {
        let name = file_stem(&dir);
        let notes = md_files(&dir);
        // Main note carries the project's name; any other note works as a fallback
        let main_file = {
            let named = dir.join(format!("{}.md", name));
            if named.exists() {
                Some(named)
            } else {
                notes.first().cloned()
            }
        };
        let Some(main_file) = main_file else {
            continue;
        };
        let meta = frontmatter::parse(&main_file);
        results.push(ProjectEntry {
            name: display_title(&meta, &name),
            status: get(&meta, "status"),
            tags: get(&meta, "tags"),
            updated: get(&meta, "updated"),
            sub_notes: notes.len().saturating_sub(1),
            file: name,
        });
    }
    results
}

pub fn scan_areas(brain: &Path) -> Vec<AreaEntry> {
    md_files(&brain.join("Areas"))
        .into_iter()
        .map(|path| {
            let stem = file_stem(&path);
            let meta = frontmatter::parse(&path);
            AreaEntry {
                name: display_title(&meta, &stem),
                updated: get(&meta, "updated"),
                file: stem,
            }
        })
        .collect()
}

pub fn scan_notes(brain: &Path) -> Vec<NoteEntry> {
    md_files(&brain.join("Notes"))
        .into_iter()
        .map(|path| {
            let stem = file_stem(&path);
            let meta = frontmatter::parse(&path);
            NoteEntry {
                name: display_title(&meta, &stem),
                tags: get(&meta, "tags"),
                created: get(&meta, "created"),
                file: stem,
            }
        })
        .collect()
}

/// Count checkboxes per section of Tasks/tasks.md.
pub fn scan_tasks(brain: &Path) -> TaskCounts {
    let text = match std::fs::read_to_string(brain.join("Tasks").join("tasks.md")) {
        Ok(t) => t,
        Err(_) => return TaskCounts::default(),
    };

    enum TaskSection {
        Focus,
        NextUp,
        Backlog,
        Done,
    }

    let mut counts = TaskCounts::default();
    let mut current: Option<TaskSection> = None;
    for line in text.lines() {
        let lower = line.trim().to_lowercase();
        if lower.starts_with("## focus") {
            current = Some(TaskSection::Focus);
        } else if lower.starts_with("## next up") {
            current = Some(TaskSection::NextUp);
        } else if lower.starts_with("## backlog") {
            current = Some(TaskSection::Backlog);
        } else if lower.starts_with("## done") || lower.starts_with("## completed") {
            current = Some(TaskSection::Done);
        } else if lower.starts_with("## ") {
            current = None;
        } else if checkbox_pattern().is_match(line.trim()) {
            match current {
                Some(TaskSection::Focus) => counts.focus += 1,
                Some(TaskSection::NextUp) => counts.next_up += 1,
                Some(TaskSection::Backlog) => counts.backlog += 1,
                Some(TaskSection::Done) => counts.done += 1,
                None => {}
            }
        }
    }
    counts
}

pub fn scan_journal(brain: &Path) -> JournalSummary {
    let entries = md_files(&brain.join("Journal"));
    JournalSummary {
        count: entries.len(),
        latest: entries.last().map(|p| file_stem(p)).unwrap_or_default(),
    }
}

/// Full markdown-table index for AI context.
pub fn format_full(brain: &Path) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Knowledge Index".to_string());
    lines.push(format!("**Brain:** `{}`", brain.display()));
    lines.push(String::new());

    let people = scan_people(brain);
    if people.is_empty() {
        lines.push("## People".to_string());
        lines.push("*None yet*".to_string());
    } else {
        lines.push("## People".to_string());
        lines.push("| Name | Role/Org | Last Contact | Tags |".to_string());
        lines.push("|------|----------|--------------|------|".to_string());
        for p in &people {
            let org = if p.org.is_empty() {
                p.role.clone()
            } else {
                format!("{} @ {}", p.role, p.org)
            };
            lines.push(format!(
                "| [[People/{}\\|{}]] | {} | {} | {} |",
                p.file, p.name, org, p.last_contact, p.tags
            ));
        }
    }
    lines.push(String::new());

    let projects = scan_projects(brain);
    if projects.is_empty() {
        lines.push("## Projects".to_string());
        lines.push("*None yet*".to_string());
    } else {
        lines.push("## Projects".to_string());
        lines.push("| Name | Status | Updated | Sub-notes | Tags |".to_string());
        lines.push("|------|--------|---------|-----------|------|".to_string());
        for p in &projects {
            lines.push(format!(
                "| [[Projects/{}/{}\\|{}]] | {} | {} | {} | {} |",
                p.file, p.file, p.name, p.status, p.updated, p.sub_notes, p.tags
            ));
        }
    }
    lines.push(String::new());

    let areas = scan_areas(brain);
    if areas.is_empty() {
        lines.push("## Areas".to_string());
        lines.push("*None yet*".to_string());
    } else {
        lines.push("## Areas".to_string());
        lines.push("| Name | Updated |".to_string());
        lines.push("|------|---------|".to_string());
        for a in &areas {
            lines.push(format!("| [[Areas/{}\\|{}]] | {} |", a.file, a.name, a.updated));
        }
    }
    lines.push(String::new());

    let notes = scan_notes(brain);
    if notes.is_empty() {
        lines.push("## Notes".to_string());
        lines.push("*None yet*".to_string());
    } else {
        lines.push(format!("## Notes ({} total)", notes.len()));
        lines.push("| Name | Tags | Created |".to_string());
        lines.push("|------|------|---------|".to_string());
        for n in &notes {
            lines.push(format!("| [[Notes/{}\\|{}]] | {} | {} |", n.file, n.name, n.tags, n.created));
        }
    }
    lines.push(String::new());

    let tasks = scan_tasks(brain);
    lines.push("## Tasks".to_string());
    lines.push(format!("- **Focus:** {} items", tasks.focus));
    lines.push(format!("- **Next Up:** {} items", tasks.next_up));
    lines.push(format!("- **Backlog:** {} items", tasks.backlog));
    lines.push(format!("- **Done:** {} items", tasks.done));
    lines.push(String::new());

    let journal = scan_journal(brain);
    lines.push("## Journal".to_string());
    lines.push(format!("- **Entries:** {}", journal.count));
    if !journal.latest.is_empty() {
        lines.push(format!("- **Latest:** {}", journal.latest));
    }

    lines.join("\n")
}

/// One-line-per-category summary for hook injection.
pub fn format_compact(brain: &Path) -> String {
    let people: Vec<String> = scan_people(brain).into_iter().map(|p| p.file).collect();
    let projects: Vec<String> = scan_projects(brain).into_iter().map(|p| p.file).collect();
    let areas: Vec<String> = scan_areas(brain).into_iter().map(|a| a.file).collect();
    let notes: Vec<String> = scan_notes(brain).into_iter().map(|n| n.file).collect();
    let tasks = scan_tasks(brain);
    let journal = scan_journal(brain);

    let ellipsis = if notes.len() > 20 { "..." } else { "" };
    let lines = [
        format!("BRAIN INDEX ({})", brain.display()),
        format!("People: {}", join_or_none(&people)),
        format!("Projects: {}", join_or_none(&projects)),
        format!("Areas: {}", join_or_none(&areas)),
        format!(
            "Notes ({}): {}{}",
            notes.len(),
            join_or_none(&notes[..notes.len().min(20)]),
            ellipsis
        ),
        format!(
            "Tasks: {} focus, {} next, {} backlog",
            tasks.focus, tasks.next_up, tasks.backlog
        ),
        format!("Journal: {} entries, latest {}", journal.count, journal.latest),
    ];
    lines.join("\n")
}

/// Title-case a kebab/space name for display ("site-redesign" -> "Site Redesign").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_title(meta: &HashMap<String, String>, stem: &str) -> String {
    match meta.get("_title") {
        Some(title) => title.clone(),
        None => title_case(&stem.replace('-', " ")),
    }
}

fn get(meta: &HashMap<String, String>, key: &str) -> String {
    meta.get(key).cloned().unwrap_or_default()
}

fn get_or(meta: &HashMap<String, String>, key: &str, fallback: &str) -> String {
    meta.get(key).or_else(|| meta.get(fallback)).cloned().unwrap_or_default()
}

fn md_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("md"))
            .collect(),
        Err(_) => return Vec::new(),
    };
    files.sort();
    files
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn checkbox_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-\s*\[.\]").unwrap())
}
