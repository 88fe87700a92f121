use crate::extract::ArticleCandidate;
use crate::utils::format_display_time;
use serde::Serialize;

/// One row of the veille table, named after its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VeilleRecord {
    #[serde(rename = "Titre_article")]
    pub titre_article: Option<String>,
    #[serde(rename = "Lien_article")]
    pub lien_article: String,
    #[serde(rename = "Qui_a_propose")]
    pub qui_a_propose: String,
    #[serde(rename = "Quel_chanel")]
    pub quel_chanel: String,
    #[serde(rename = "Resume")]
    pub resume: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl VeilleRecord {
    pub fn from_candidate(candidate: ArticleCandidate, utc_offset_hours: i32) -> Self {
        let date = format_display_time(candidate.timestamp, utc_offset_hours)
            .unwrap_or_else(|| candidate.timestamp.to_string());

        Self {
            titre_article: candidate.title,
            lien_article: candidate.url,
            qui_a_propose: candidate.proposed_by,
            quel_chanel: candidate.source_link,
            resume: candidate.summary.unwrap_or_default(),
            date,
        }
    }
}
