use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use super::classify;
use super::locator;
use super::model::{Message, Role, Session};
use super::time;

/// Extract a clean Session from a transcript JSONL file.
///
/// Streams line-by-line to handle large files. Corrupt lines are skipped;
/// message order is preserved exactly as it appears in the log.
pub fn extract_session(path: &Path, max_assistant_text_len: usize) -> anyhow::Result<Session> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut session = Session {
        session_id: locator::session_id_from_path(path),
        project: locator::project_from_path(path),
        ..Session::default()
    };

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(_) => continue, // Skip corrupt lines
        };

        let ts = value.get("timestamp").and_then(|t| t.as_str()).unwrap_or("");
        if !ts.is_empty() {
            if session.first_ts.is_none() {
                session.first_ts = Some(ts.to_string());
            }
            session.last_ts = Some(ts.to_string());
        }

        if session.cwd.is_none() {
            if let Some(cwd) = value.get("cwd").and_then(|c| c.as_str()) {
                if !cwd.is_empty() {
                    session.cwd = Some(cwd.to_string());
                }
            }
        }

        let content = value.get("message").and_then(|m| m.get("content"));

        match value.get("type").and_then(|t| t.as_str()) {
            Some("user") => {
                // Meta events carry injected context, not the user's words
                if value.get("isMeta").and_then(|m| m.as_bool()).unwrap_or(false) {
                    continue;
                }
                if let Some(text) = content.and_then(classify::extract_user_text) {
                    session.messages.push(message(Role::User, text, ts));
                }
            }
            Some("assistant") => {
                if let Some(text) =
                    content.and_then(|c| classify::extract_assistant_text(c, max_assistant_text_len))
                {
                    session.messages.push(message(Role::Assistant, text, ts));
                }
            }
            _ => {} // progress, file-history-snapshot, system, etc.
        }
    }

    session.spans_multiple_days =
        time::spans_multiple_days(session.first_ts.as_deref(), session.last_ts.as_deref());

    Ok(session)
}

fn message(role: Role, text: String, ts: &str) -> Message {
    Message {
        role,
        text,
        time: if ts.is_empty() { None } else { time::format_timestamp(ts, false) },
        timestamp: if ts.is_empty() { None } else { Some(ts.to_string()) },
    }
}
