use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::index::title_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Important,
    Backlog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Destination {
    #[serde(rename = "tasks.md")]
    TasksFile,
    #[serde(rename = "project_file")]
    ProjectFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Focus,
    #[serde(rename = "Next Up")]
    NextUp,
    Backlog,
}

/// Ordered urgency rules, first match wins against the lowercased text.
/// Urgent deadline markers outrank backlog markers, which outrank the
/// generic important markers; anything unmatched lands in Important.
const URGENCY_RULES: &[(&str, Urgency)] = &[
    (r"by\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)", Urgency::Urgent),
    (r"by\s+\d{4}-\d{2}-\d{2}", Urgency::Urgent),
    (r"\basap\b", Urgency::Urgent),
    (r"\burgent\b", Urgency::Urgent),
    (r"\btoday\b", Urgency::Urgent),
    (r"\bthis\s+week\b", Urgency::Urgent),
    (r"\bdeadline\b", Urgency::Urgent),
    (r"\bdue\b", Urgency::Urgent),
    (r"\beventually\b", Urgency::Backlog),
    (r"\bmaybe\b", Urgency::Backlog),
    (r"\bsomeday\b", Urgency::Backlog),
    (r"phase\s+\d+", Urgency::Backlog),
    (r"\bv\d+\b", Urgency::Backlog),
    (r"\bfuture\b", Urgency::Backlog),
    (r"\blater\b", Urgency::Backlog),
    (r"\bshould\b", Urgency::Important),
    (r"\bneed\s+to\b", Urgency::Important),
    (r"\breminder\b", Urgency::Important),
    (r"\bimportant\b", Urgency::Important),
    (r"\bpriority\b", Urgency::Important),
];

fn compiled_rules() -> &'static Vec<(Regex, Urgency)> {
    static RULES: OnceLock<Vec<(Regex, Urgency)>> = OnceLock::new();
    RULES.get_or_init(|| {
        URGENCY_RULES
            .iter()
            .map(|(pattern, urgency)| (Regex::new(pattern).unwrap(), *urgency))
            .collect()
    })
}

pub fn classify_urgency(text: &str) -> Urgency {
    let lower = text.to_lowercase();
    for (pattern, urgency) in compiled_rules() {
        if pattern.is_match(&lower) {
            return *urgency;
        }
    }
    Urgency::Important
}

/// A classified task with its destination and ready-to-insert line.
#[derive(Debug, Serialize)]
pub struct RoutedTask {
    pub urgency: Urgency,
    pub destination: Destination,
    pub section: Section,
    pub formatted: String,
}

pub fn route_task(text: &str, project: Option<&str>, session_date: Option<&str>) -> RoutedTask {
    let urgency = classify_urgency(text);
    let (destination, section) = match urgency {
        Urgency::Urgent => (Destination::TasksFile, Section::Focus),
        Urgency::Important => (Destination::TasksFile, Section::NextUp),
        Urgency::Backlog => (Destination::ProjectFile, Section::Backlog),
    };
    RoutedTask {
        urgency,
        destination,
        section,
        formatted: format_task(text, urgency, project, session_date),
    }
}

/// Markdown checkbox line for tasks.md or a project file.
pub fn format_task(
    text: &str,
    urgency: Urgency,
    project: Option<&str>,
    date: Option<&str>,
) -> String {
    let project_link = match project {
        Some(p) => format!(" [[Projects/{}/{}|{}]]", p, p, title_case(&p.replace('-', " "))),
        None => String::new(),
    };
    let marker = if urgency == Urgency::Urgent { " ⚡" } else { "" };
    let date_suffix = match date {
        Some(d) => format!(" ({})", d),
        None => String::new(),
    };
    format!("- [ ] {}{}{}{}", text, project_link, marker, date_suffix).trim().to_string()
}
