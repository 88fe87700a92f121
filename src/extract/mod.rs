mod link;
mod loader;
mod message;

pub use link::{BARE_URL_PATTERN, ExtractedLink, LinkExtractor, MARKDOWN_LINK_PATTERN};
pub use loader::ConversationLoader;
pub use message::{
    ArticleCandidate, DEFAULT_PERMALINK_BASE, MessageNormalizer, RawMessage, display_name,
};
