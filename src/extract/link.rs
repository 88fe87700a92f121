use once_cell::sync::Lazy;
use regex::Regex;

/// `[title](url)`, the title may not contain `]` and the url may not contain `)`.
pub const MARKDOWN_LINK_PATTERN: &str = r"\[([^\]]+)\]\(([^)]+)\)";
/// A message that is nothing but a single URL.
pub const BARE_URL_PATTERN: &str = r"^https?://\S+$";

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(MARKDOWN_LINK_PATTERN).expect("valid markdown link regex"));
static BARE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(BARE_URL_PATTERN).expect("valid bare url regex"));

/// A link found in a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub url: String,
    pub title: Option<String>,
}

/// Finds the first hyperlink of a message. Only the leftmost Markdown link is
/// considered; a bare URL only counts when it is the whole text.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    markdown: Regex,
    bare_url: Regex,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self {
            markdown: MARKDOWN_LINK_RE.clone(),
            bare_url: BARE_URL_RE.clone(),
        }
    }
}

impl LinkExtractor {
    /// Builds an extractor from custom patterns. The Markdown pattern must
    /// capture the title as group 1 and the url as group 2.
    pub fn with_patterns(markdown: &str, bare_url: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            markdown: Regex::new(markdown)?,
            bare_url: Regex::new(bare_url)?,
        })
    }

    pub fn extract(&self, text: &str) -> Option<ExtractedLink> {
        if let Some(caps) = self.markdown.captures(text) {
            return Some(ExtractedLink {
                url: caps.get(2)?.as_str().to_string(),
                title: caps.get(1).map(|m| m.as_str().to_string()),
            });
        }

        self.bare_url.is_match(text).then(|| ExtractedLink {
            url: text.to_string(),
            title: None,
        })
    }

    pub fn extract_link(&self, text: &str) -> Option<String> {
        self.extract(text).map(|link| link.url)
    }

    pub fn extract_link_text(&self, text: &str) -> Option<String> {
        self.markdown
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
