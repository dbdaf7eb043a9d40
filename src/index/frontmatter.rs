use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Characters of a note examined for frontmatter and the leading H1.
const HEAD_CHARS: usize = 2048;

/// Parse the `--- ... ---` frontmatter block and first `# H1` from the
/// head of a note. The H1 lands under the `_title` key. Unreadable files
/// yield an empty map.
pub fn parse(path: &Path) -> HashMap<String, String> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(_) => return HashMap::new(),
    };
    parse_text(head(&text))
}

fn head(text: &str) -> &str {
    match text.char_indices().nth(HEAD_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn parse_text(text: &str) -> HashMap<String, String> {
    let mut meta = HashMap::new();

    if let Some(rest) = text.strip_prefix("---") {
        if let Some(end) = rest.find("---") {
            for line in rest[..end].trim().lines() {
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let mut value = value.trim().trim_matches('"').trim_matches('\'');
                if value.starts_with('[') && value.ends_with(']') {
                    value = value[1..value.len() - 1].trim();
                }
                meta.insert(key.trim().to_string(), value.to_string());
            }
        }
    }

    if let Some(h1) = h1_pattern().captures(text).and_then(|c| c.get(1)) {
        meta.insert("_title".to_string(), h1.as_str().trim().to_string());
    }

    meta
}

fn h1_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_and_title() {
        let meta = parse_text(
            "---\nrole: \"Engineer\"\ntags: [rust, cli]\nupdated: 2026-02-12\n---\n\n# Chris W\n\nBody text.\n",
        );
        assert_eq!(meta.get("role").map(String::as_str), Some("Engineer"));
        assert_eq!(meta.get("tags").map(String::as_str), Some("rust, cli"));
        assert_eq!(meta.get("updated").map(String::as_str), Some("2026-02-12"));
        assert_eq!(meta.get("_title").map(String::as_str), Some("Chris W"));
    }

    #[test]
    fn test_no_frontmatter_still_finds_h1() {
        let meta = parse_text("# Just a Title\n\ncontent\n");
        assert_eq!(meta.get("_title").map(String::as_str), Some("Just a Title"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_unterminated_frontmatter_ignored() {
        let meta = parse_text("---\nrole: Engineer\nno closing fence\n");
        assert!(meta.get("role").is_none());
    }

    #[test]
    fn test_unreadable_file_is_empty() {
        assert!(parse(Path::new("/nonexistent/note.md")).is_empty());
    }
}
