use serde_json::Value;

/// Sentinel prefixes marking tool/system scaffolding injected into user
/// content. Checked in order against the start of the trimmed text;
/// case-sensitive, prefix only.
const NOISE_PREFIXES: &[&str] = &[
    "<local-command-",
    "<command-name>",
    "<system-",
    "<user-prompt-submit-hook>",
];

/// Minimum combined length for an assistant message that also carried
/// tool_use blocks; anything shorter is a content-free preamble.
const TOOL_PREAMBLE_MIN_LEN: usize = 20;

pub fn is_noise(text: &str) -> bool {
    let trimmed = text.trim();
    NOISE_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Clean text of a user message's `content`. A plain string is kept
/// trimmed unless it is noise or empty; a block list keeps every
/// non-noise text block, newline-joined. None when nothing survives.
pub fn extract_user_text(content: &Value) -> Option<String> {
    if let Some(text) = content.as_str() {
        if is_noise(text) {
            return None;
        }
        let text = text.trim();
        return if text.is_empty() { None } else { Some(text.to_string()) };
    }

    let blocks = content.as_array()?;
    let mut texts: Vec<&str> = Vec::new();
    for block in blocks {
        if block.get("type").and_then(|t| t.as_str()) == Some("text") {
            if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                let text = text.trim();
                if !text.is_empty() && !is_noise(text) {
                    texts.push(text);
                }
            }
        } else if let Some(text) = block.as_str() {
            if !is_noise(text) {
                texts.push(text.trim());
            }
        }
    }

    let joined = texts.join("\n");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Short conversational text of an assistant message's `content`.
///
/// Long responses are dropped wholesale (they are usually code or tool
/// output), as is a tiny preamble next to tool_use blocks. `max_len` is
/// counted in characters.
pub fn extract_assistant_text(content: &Value, max_len: usize) -> Option<String> {
    if let Some(text) = content.as_str() {
        if text.chars().count() > max_len {
            return None;
        }
        let text = text.trim();
        return if text.is_empty() { None } else { Some(text.to_string()) };
    }

    let blocks = content.as_array()?;
    let mut texts: Vec<&str> = Vec::new();
    let mut has_tool_use = false;
    for block in blocks {
        match block.get("type").and_then(|t| t.as_str()) {
            Some("tool_use") => has_tool_use = true,
            Some("text") => {
                if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                    let text = text.trim();
                    if !text.is_empty() {
                        texts.push(text);
                    }
                }
            }
            _ => {}
        }
    }

    if texts.is_empty() {
        return None;
    }

    let combined = texts.join("\n");
    let len = combined.chars().count();
    if len > max_len {
        return None;
    }
    if has_tool_use && len < TOOL_PREAMBLE_MIN_LEN {
        return None;
    }
    Some(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAX_LEN: usize = 500;

    #[test]
    fn test_noise_prefixes() {
        assert!(is_noise("<command-name>/clear</command-name>"));
        assert!(is_noise("  <local-command-stdout>ok</local-command-stdout>"));
        assert!(is_noise("<system-reminder>note</system-reminder>"));
        assert!(is_noise("<user-prompt-submit-hook>x</user-prompt-submit-hook>"));
        assert!(!is_noise("regular message mentioning <command-name> later"));
        assert!(!is_noise("hello"));
    }

    #[test]
    fn test_user_plain_string() {
        assert_eq!(extract_user_text(&json!("  Hello there  ")), Some("Hello there".to_string()));
        assert_eq!(extract_user_text(&json!("   ")), None);
        assert_eq!(extract_user_text(&json!("<command-name>/help</command-name>")), None);
    }

    #[test]
    fn test_user_blocks_joined() {
        let content = json!([
            {"type": "text", "text": "first"},
            {"type": "tool_result", "content": "ignored"},
            {"type": "text", "text": "<system-note>skip</system-note>"},
            {"type": "text", "text": "second"},
        ]);
        assert_eq!(extract_user_text(&content), Some("first\nsecond".to_string()));
    }

    #[test]
    fn test_user_blocks_all_noise() {
        let content = json!([{"type": "text", "text": "<command-name>/x</command-name>"}]);
        assert_eq!(extract_user_text(&content), None);
    }

    #[test]
    fn test_assistant_string_under_cap() {
        assert_eq!(extract_assistant_text(&json!("Sure."), MAX_LEN), Some("Sure.".to_string()));
    }

    #[test]
    fn test_assistant_string_over_cap() {
        let long = "x".repeat(501);
        assert_eq!(extract_assistant_text(&json!(long), MAX_LEN), None);
    }

    #[test]
    fn test_assistant_blank_string_dropped() {
        assert_eq!(extract_assistant_text(&json!("   "), MAX_LEN), None);
    }

    #[test]
    fn test_assistant_combined_over_cap() {
        let content = json!([
            {"type": "text", "text": "a".repeat(300)},
            {"type": "text", "text": "b".repeat(300)},
        ]);
        assert_eq!(extract_assistant_text(&content, MAX_LEN), None);
    }

    #[test]
    fn test_assistant_tool_preamble_dropped() {
        let content = json!([
            {"type": "text", "text": "Let me check."},
            {"type": "tool_use", "name": "Read", "input": {}},
        ]);
        assert_eq!(extract_assistant_text(&content, MAX_LEN), None);
    }

    #[test]
    fn test_assistant_tool_with_substantive_text_kept() {
        let content = json!([
            {"type": "text", "text": "That config option was removed in v2."},
            {"type": "tool_use", "name": "Read", "input": {}},
        ]);
        assert_eq!(
            extract_assistant_text(&content, MAX_LEN),
            Some("That config option was removed in v2.".to_string())
        );
    }

    #[test]
    fn test_assistant_only_tool_use() {
        let content = json!([{"type": "tool_use", "name": "Bash", "input": {}}]);
        assert_eq!(extract_assistant_text(&content, MAX_LEN), None);
    }
}
