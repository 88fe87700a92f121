use super::message::{ArticleCandidate, MessageNormalizer, RawMessage};
use crate::error::SyncError;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Deserialize)]
struct ExportFile {
    messages: Option<Vec<ExportRecord>>,
}

#[derive(Deserialize)]
struct ExportRecord {
    #[serde(default)]
    content: ExportContent,
    event_id: String,
    origin_server_ts: i64,
    sender: String,
    room_id: String,
}

#[derive(Default, Deserialize)]
struct ExportContent {
    #[serde(default)]
    body: Option<String>,
}

impl From<ExportRecord> for RawMessage {
    fn from(record: ExportRecord) -> Self {
        Self {
            body: record.content.body.unwrap_or_default(),
            event_id: record.event_id,
            room_id: record.room_id,
            sender: record.sender,
            origin_server_ts: record.origin_server_ts,
        }
    }
}

/// Turns a chat export into link candidates, unique by url, in file order.
#[derive(Debug, Clone, Default)]
pub struct ConversationLoader {
    normalizer: MessageNormalizer,
}

impl ConversationLoader {
    pub fn new(normalizer: MessageNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn parse_messages(source: &[u8]) -> Result<Vec<RawMessage>, SyncError> {
        let export: ExportFile = serde_json::from_slice(source)
            .map_err(|e| SyncError::MalformedInput(e.to_string()))?;

        let records = export
            .messages
            .ok_or_else(|| SyncError::MalformedInput("missing `messages` array".to_string()))?;

        Ok(records.into_iter().map(RawMessage::from).collect())
    }

    pub fn load(&self, source: &[u8]) -> Result<Vec<ArticleCandidate>, SyncError> {
        let messages = Self::parse_messages(source)?;
        let total = messages.len();

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for message in &messages {
            let Some(candidate) = self.normalizer.normalize(message) else {
                debug!("No link in message {}", message.event_id);
                continue;
            };

            if !seen.insert(candidate.url.clone()) {
                debug!(
                    "Duplicate link {} in message {}",
                    candidate.url, message.event_id
                );
                continue;
            }

            candidates.push(candidate);
        }

        debug!(
            "{} messages read, {} unique links kept",
            total,
            candidates.len()
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(body: serde_json::Value, event: &str, ts: i64) -> serde_json::Value {
        json!({
            "content": { "body": body, "msgtype": "m.text" },
            "event_id": event,
            "origin_server_ts": ts,
            "sender": "@jean.martin-insee.fr",
            "room_id": "!room:tchap",
            "type": "m.room.message"
        })
    }

    fn export(records: Vec<serde_json::Value>) -> Vec<u8> {
        serde_json::to_vec(&json!({ "room_name": "Veille", "messages": records })).unwrap()
    }

    #[test]
    fn test_three_messages_two_candidates_in_order() {
        let source = export(vec![
            record(json!("[Report](https://a.example/x)"), "$1", 1760297400000),
            record(json!("https://b.example/y"), "$2", 1760297500000),
            record(json!("no link here"), "$3", 1760297600000),
        ]);

        let candidates = ConversationLoader::default().load(&source).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "https://a.example/x");
        assert_eq!(candidates[0].title.as_deref(), Some("Report"));
        assert_eq!(candidates[1].url, "https://b.example/y");
        assert_eq!(candidates[1].title, None);
        assert_eq!(candidates[1].proposed_by, "Jean Martin");
    }

    #[test]
    fn test_first_occurrence_wins_on_duplicate_url() {
        let source = export(vec![
            record(json!("first [A](https://a.example/x)"), "$1", 1760297400000),
            record(json!("https://c.example"), "$2", 1760297450000),
            record(json!("second [B](https://a.example/x)"), "$3", 1760297500000),
        ]);

        let candidates = ConversationLoader::default().load(&source).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title.as_deref(), Some("A"));
        assert_eq!(candidates[0].summary.as_deref(), Some("first [A](https://a.example/x)"));
        assert!(candidates[0].source_link.ends_with("/$1"));
        assert_eq!(candidates[1].url, "https://c.example");
    }

    #[test]
    fn test_output_is_not_time_sorted() {
        let source = export(vec![
            record(json!("https://late.example"), "$1", 1760297900000),
            record(json!("https://early.example"), "$2", 1760297000000),
        ]);

        let candidates = ConversationLoader::default().load(&source).unwrap();
        assert_eq!(candidates[0].url, "https://late.example");
        assert_eq!(candidates[1].url, "https://early.example");
    }

    #[test]
    fn test_missing_body_defaults_to_empty() {
        let source = serde_json::to_vec(&json!({
            "messages": [
                { "content": {}, "event_id": "$1", "origin_server_ts": 1, "sender": "@a-b", "room_id": "!r" },
                { "event_id": "$2", "origin_server_ts": 1, "sender": "@a-b", "room_id": "!r" }
            ]
        }))
        .unwrap();

        let messages = ConversationLoader::parse_messages(&source).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.body.is_empty()));
        assert!(ConversationLoader::default().load(&source).unwrap().is_empty());
    }

    #[test]
    fn test_missing_messages_array() {
        let source = serde_json::to_vec(&json!({ "room_name": "Veille" })).unwrap();
        let r = ConversationLoader::default().load(&source);
        assert!(matches!(r, Err(SyncError::MalformedInput(_))));
    }

    #[test]
    fn test_missing_required_field() {
        let source = serde_json::to_vec(&json!({
            "messages": [
                { "content": { "body": "https://a.example" }, "event_id": "$1", "sender": "@a-b", "room_id": "!r" }
            ]
        }))
        .unwrap();

        let r = ConversationLoader::default().load(&source);
        assert!(matches!(r, Err(SyncError::MalformedInput(msg)) if msg.contains("origin_server_ts")));
    }

    #[test]
    fn test_invalid_json() {
        let r = ConversationLoader::default().load(b"{ not json");
        assert!(matches!(r, Err(SyncError::MalformedInput(_))));
    }
}
