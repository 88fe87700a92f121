use super::link::LinkExtractor;
use crate::utils::{to_title_case, to_unix_seconds};

pub const DEFAULT_PERMALINK_BASE: &str = "https://tchap.gouv.fr/#/room/";

/// One event of the chat export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub body: String,
    pub event_id: String,
    pub room_id: String,
    pub sender: String,
    pub origin_server_ts: i64,
}

/// A message that carries a link, ready to be reconciled against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCandidate {
    pub title: Option<String>,
    pub url: String,
    pub proposed_by: String,
    pub source_link: String,
    pub summary: Option<String>,
    /// Unix seconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct MessageNormalizer {
    extractor: LinkExtractor,
    permalink_base: String,
}

impl Default for MessageNormalizer {
    fn default() -> Self {
        Self::new(LinkExtractor::default(), DEFAULT_PERMALINK_BASE)
    }
}

impl MessageNormalizer {
    pub fn new(extractor: LinkExtractor, permalink_base: &str) -> Self {
        Self {
            extractor,
            permalink_base: permalink_base.to_string(),
        }
    }

    /// Returns `None` when the body holds no usable link.
    pub fn normalize(&self, raw: &RawMessage) -> Option<ArticleCandidate> {
        let link = self.extractor.extract(&raw.body)?;
        if link.url.is_empty() {
            return None;
        }

        let only_link = raw.body == link.url
            || link
                .title
                .as_ref()
                .is_some_and(|title| raw.body == format!("[{}]({})", title, link.url));
        let summary = (!only_link).then(|| raw.body.clone());

        Some(ArticleCandidate {
            title: link.title,
            url: link.url,
            proposed_by: display_name(&raw.sender),
            source_link: self.permalink(&raw.room_id, &raw.event_id),
            summary,
            timestamp: to_unix_seconds(raw.origin_server_ts),
        })
    }

    pub fn permalink(&self, room_id: &str, event_id: &str) -> String {
        format!("{}{}/{}", self.permalink_base, room_id, event_id)
    }
}

/// `@prenom.nom-insee.fr` becomes `Prenom Nom`: everything between the `@`
/// and the first `-` after it, dots turned into spaces.
///
/// Senders without that shape fall back to their localpart (up to `:`).
pub fn display_name(sender: &str) -> String {
    let before_server = |s: &str| s.split(':').next().unwrap_or_default().to_string();

    let localpart = match sender.find('@') {
        Some(at) => {
            let rest = &sender[at + 1..];
            match rest.find('-') {
                Some(dash) => rest[..dash].to_string(),
                None => before_server(rest),
            }
        }
        None => before_server(sender),
    };

    to_title_case(&localpart.replace('.', " "))
}
