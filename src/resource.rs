use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Tool,
    Video,
    Book,
    Documentation,
}

impl ResourceKind {
    fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Article => "article",
            ResourceKind::Tool => "tool",
            ResourceKind::Video => "video",
            ResourceKind::Book => "book",
            ResourceKind::Documentation => "documentation",
        }
    }
}

/// Ordered host rules, first match wins; content markers are the last
/// resort before the article default.
const HOST_RULES: &[(&[&str], ResourceKind)] = &[
    (&["youtube", "vimeo", "youtu.be"], ResourceKind::Video),
    (&["docs.", "documentation", "readthedocs", "github.io"], ResourceKind::Documentation),
    (&["goodreads", "amazon", "book"], ResourceKind::Book),
];

const TOOL_MARKERS: &[&str] = &["pricing", "features", "get started", "sign up"];

pub fn classify_url(url: &str, content: &str) -> ResourceKind {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();

    for (needles, kind) in HOST_RULES {
        if needles.iter().any(|needle| host.contains(needle)) {
            return *kind;
        }
    }

    let content = content.to_lowercase();
    if TOOL_MARKERS.iter().any(|marker| content.contains(marker)) {
        return ResourceKind::Tool;
    }

    ResourceKind::Article
}

/// Kebab-case slug: lowercase, drop punctuation, hyphenate whitespace.
pub fn slugify(text: &str) -> String {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    static HYPHENATE: OnceLock<Regex> = OnceLock::new();
    let strip = STRIP.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let hyphenate = HYPHENATE.get_or_init(|| Regex::new(r"[\s_]+").unwrap());

    let lowered = text.to_lowercase();
    let stripped = strip.replace_all(&lowered, "");
    hyphenate.replace_all(&stripped, "-").trim_matches('-').to_string()
}

/// Metadata for a saved resource. Fields come from the caller (the host
/// tool does any fetching); the title falls back to the URL's last path
/// segment.
#[derive(Debug, Serialize)]
pub struct ResourceMetadata {
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Page excerpt used for classification and the note body.
    pub excerpt: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub fetched_at: String,
}

impl ResourceMetadata {
    pub fn build(
        url: &str,
        title: Option<String>,
        author: Option<String>,
        description: Option<String>,
        excerpt: Option<String>,
        date: &str,
    ) -> Self {
        let kind = classify_url(url, excerpt.as_deref().unwrap_or(""));
        let title = title.unwrap_or_else(|| fallback_title(url));
        ResourceMetadata {
            url: url.to_string(),
            title,
            author,
            description,
            excerpt,
            kind,
            fetched_at: date.to_string(),
        }
    }
}

fn fallback_title(url: &str) -> String {
    let segment = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
        })
        .unwrap_or_default();
    if segment.is_empty() {
        "Untitled".to_string()
    } else {
        segment
    }
}

/// Render the note body: frontmatter plus a skeleton for manual curation.
pub fn render_note(meta: &ResourceMetadata) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("source: {}\n", meta.url));
    out.push_str(&format!("author: {}\n", meta.author.as_deref().unwrap_or("Unknown")));
    out.push_str(&format!("type: {}\n", meta.kind.as_str()));
    out.push_str(&format!("created: {}\n", meta.fetched_at));
    out.push_str(&format!("tags: [resource, {}]\n", meta.kind.as_str()));
    out.push_str("related: []\n");
    out.push_str("---\n\n");

    out.push_str(&format!("# {}\n\n", meta.title));
    out.push_str("## Summary\n");
    out.push_str(meta.description.as_deref().unwrap_or("No description available."));
    out.push_str("\n\n## Key Takeaways\n");
    out.push_str(head_chars(meta.excerpt.as_deref().unwrap_or(""), 500));
    out.push_str("...\n\n");
    out.push_str("## Why It Matters\n");
    out.push_str("[Add context: why you saved this, how it relates to your work]\n\n");
    out.push_str("## Related\n");
    out.push_str("[Links to related Projects/Notes will be added automatically]\n");
    out
}

/// Write `<output_dir>/<slug>.md`, creating the directory as needed.
pub fn write_note(meta: &ResourceMetadata, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(format!("{}.md", slugify(&meta.title)));
    std::fs::create_dir_all(output_dir)?;
    std::fs::write(&path, render_note(meta))?;
    Ok(path)
}

fn head_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_by_host() {
        assert_eq!(classify_url("https://www.youtube.com/watch?v=x", ""), ResourceKind::Video);
        assert_eq!(classify_url("https://docs.rs/regex", ""), ResourceKind::Documentation);
        assert_eq!(classify_url("https://www.goodreads.com/book/1", ""), ResourceKind::Book);
        assert_eq!(classify_url("https://example.com/post", ""), ResourceKind::Article);
    }

    #[test]
    fn test_classify_by_content_markers() {
        assert_eq!(
            classify_url("https://example.com", "See our Pricing page to get started"),
            ResourceKind::Tool
        );
    }

    #[test]
    fn test_host_rule_outranks_content() {
        assert_eq!(
            classify_url("https://vimeo.com/123", "pricing features"),
            ResourceKind::Video
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust:  The_Book  "), "rust-the-book");
        assert_eq!(slugify("already-kebab"), "already-kebab");
    }

    #[test]
    fn test_fallback_title_from_path() {
        let meta = ResourceMetadata::build(
            "https://example.com/articles/rust-errors",
            None,
            None,
            None,
            None,
            "2026-02-12",
        );
        assert_eq!(meta.title, "rust-errors");

        let bare = ResourceMetadata::build("https://example.com", None, None, None, None, "2026-02-12");
        assert_eq!(bare.title, "Untitled");
    }

    #[test]
    fn test_render_note_frontmatter() {
        let meta = ResourceMetadata::build(
            "https://example.com/post",
            Some("A Post".to_string()),
            Some("Ana".to_string()),
            Some("Short description.".to_string()),
            None,
            "2026-02-12",
        );
        let note = render_note(&meta);
        assert!(note.starts_with("---\nsource: https://example.com/post\n"));
        assert!(note.contains("author: Ana\n"));
        assert!(note.contains("tags: [resource, article]\n"));
        assert!(note.contains("# A Post\n"));
        assert!(note.contains("## Summary\nShort description."));
    }

    #[test]
    fn test_write_note() {
        let dir = TempDir::new().unwrap();
        let meta = ResourceMetadata::build(
            "https://example.com/post",
            Some("A Post Title".to_string()),
            None,
            None,
            None,
            "2026-02-12",
        );
        let path = write_note(&meta, &dir.path().join("Resources").join("articles")).unwrap();
        assert!(path.ends_with("a-post-title.md"));
        assert!(path.exists());
    }
}
