use crate::transcript::model::{Role, Session};
use crate::transcript::time;

/// Render a session as clean markdown.
///
/// Deterministic and order-preserving: the body follows message order
/// exactly, with `### YYYY-MM-DD` day headers inserted only when the
/// session spans multiple days. Rendering the same session twice yields
/// byte-identical output.
pub fn render_markdown(session: &Session) -> String {
    let mut lines: Vec<String> = Vec::new();

    let start_date = session.first_ts.as_deref().and_then(time::date);
    let end_date = session.last_ts.as_deref().and_then(time::date);

    lines.push(format!("# Session: {}", session.project));
    if let Some(ref start) = start_date {
        match end_date {
            Some(ref end) if session.spans_multiple_days && start != end => {
                lines.push(format!("**Date:** {} to {}", start, end));
            }
            _ => lines.push(format!("**Date:** {}", start)),
        }
    }
    lines.push(format!(
        "**Session date (use for journal/tasks):** {}",
        start_date.as_deref().unwrap_or("")
    ));
    if let Some(ref cwd) = session.cwd {
        lines.push(format!("**Working dir:** `{}`", cwd));
    }
    lines.push(format!("**Session ID:** `{}`", session.session_id));
    lines.push(String::new());

    if session.messages.is_empty() {
        lines.push("*(empty session)*".to_string());
        return lines.join("\n");
    }

    let mut current_day: Option<String> = None;
    for msg in &session.messages {
        if session.spans_multiple_days {
            if let Some(day) = msg.timestamp.as_deref().and_then(time::date) {
                if current_day.as_deref() != Some(day.as_str()) {
                    lines.push(format!("### {}", day));
                    lines.push(String::new());
                    current_day = Some(day);
                }
            }
        }

        let prefix = match msg.time.as_deref() {
            Some(time) => format!("[{}] ", time),
            None => String::new(),
        };
        match msg.role {
            Role::User => lines.push(format!("**{}User:** {}", prefix, msg.text)),
            Role::Assistant => lines.push(format!("*{}Claude: {}*", prefix, msg.text)),
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::model::Message;

    fn message(role: Role, text: &str, ts: Option<&str>) -> Message {
        Message {
            role,
            text: text.to_string(),
            time: ts.and_then(|t| time::format_timestamp(t, false)),
            timestamp: ts.map(str::to_string),
        }
    }

    fn session() -> Session {
        Session {
            session_id: "abc123".to_string(),
            project: "demo".to_string(),
            cwd: Some("/home/chris/demo".to_string()),
            first_ts: Some("2026-02-12T10:00:00Z".to_string()),
            last_ts: Some("2026-02-12T10:01:00Z".to_string()),
            spans_multiple_days: false,
            messages: vec![
                message(Role::User, "Hello", Some("2026-02-12T10:00:00Z")),
                message(Role::Assistant, "Hi there", Some("2026-02-12T10:01:00Z")),
            ],
        }
    }

    #[test]
    fn test_basic_layout() {
        let md = render_markdown(&session());
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "# Session: demo");
        assert_eq!(lines[1], "**Date:** 2026-02-12");
        assert_eq!(lines[2], "**Session date (use for journal/tasks):** 2026-02-12");
        assert_eq!(lines[3], "**Working dir:** `/home/chris/demo`");
        assert_eq!(lines[4], "**Session ID:** `abc123`");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "**[10:00] User:** Hello");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "*[10:01] Claude: Hi there*");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let s = session();
        assert_eq!(render_markdown(&s), render_markdown(&s));
    }

    #[test]
    fn test_empty_session_placeholder() {
        let s = Session {
            session_id: "empty1".to_string(),
            project: "demo".to_string(),
            ..Session::default()
        };
        let md = render_markdown(&s);
        assert!(md.ends_with("*(empty session)*"));
        // No date line when no timestamp was ever observed.
        assert!(!md.contains("**Date:**"));
        assert!(md.contains("**Session date (use for journal/tasks):** \n"));
    }

    #[test]
    fn test_multi_day_session_gets_day_headers() {
        let mut s = session();
        s.first_ts = Some("2026-02-12T23:50:00Z".to_string());
        s.last_ts = Some("2026-02-13T00:10:00Z".to_string());
        s.spans_multiple_days = true;
        s.messages = vec![
            message(Role::User, "late night", Some("2026-02-12T23:50:00Z")),
            message(Role::User, "after midnight", Some("2026-02-13T00:05:00Z")),
            message(Role::Assistant, "still here", Some("2026-02-13T00:10:00Z")),
        ];

        let md = render_markdown(&s);
        assert!(md.contains("**Date:** 2026-02-12 to 2026-02-13"));
        assert!(md.contains("### 2026-02-12"));
        assert!(md.contains("### 2026-02-13"));
        // One header per day, not per message.
        assert_eq!(md.matches("### 2026-02-13").count(), 1);
    }

    #[test]
    fn test_single_day_session_has_no_headers() {
        let md = render_markdown(&session());
        assert!(!md.contains("### "));
    }

    #[test]
    fn test_unparseable_timestamp_omits_prefix() {
        let mut s = session();
        s.messages = vec![message(Role::User, "untimed", None)];
        let md = render_markdown(&s);
        assert!(md.contains("**User:** untimed"));
        assert!(!md.contains("[] "));
    }
}
