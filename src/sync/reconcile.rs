use crate::extract::ArticleCandidate;
use crate::grist::TableRow;
use std::collections::HashSet;

/// Links already present in the destination table.
pub fn known_links(rows: &[TableRow]) -> HashSet<String> {
    rows.iter()
        .filter_map(TableRow::link)
        .map(str::to_string)
        .collect()
}

/// Anti-join on url: keeps the candidates the table does not know yet, in order.
pub fn diff(candidates: Vec<ArticleCandidate>, known: &HashSet<String>) -> Vec<ArticleCandidate> {
    candidates
        .into_iter()
        .filter(|c| !known.contains(&c.url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(url: &str) -> ArticleCandidate {
        ArticleCandidate {
            title: None,
            url: url.to_string(),
            proposed_by: "Jean Martin".to_string(),
            source_link: "https://tchap.gouv.fr/#/room/!r/$e".to_string(),
            summary: None,
            timestamp: 1760297400,
        }
    }

    fn row(id: u64, fields: serde_json::Value) -> TableRow {
        serde_json::from_value(json!({ "id": id, "fields": fields })).unwrap()
    }

    #[test]
    fn test_known_links_dedups_and_skips_empty_cells() {
        let rows = vec![
            row(1, json!({ "Lien_article": "https://a.example/x" })),
            row(2, json!({ "Lien_article": "https://a.example/x" })),
            row(3, json!({ "Lien_article": null })),
            row(4, json!({ "Titre_article": "no link" })),
        ];

        let known = known_links(&rows);
        assert_eq!(known.len(), 1);
        assert!(known.contains("https://a.example/x"));
    }

    #[test]
    fn test_diff_drops_known_and_preserves_order() {
        let known: HashSet<String> = ["https://a.example/x".to_string()].into();
        let kept = diff(
            vec![
                candidate("https://c.example"),
                candidate("https://a.example/x"),
                candidate("https://b.example/y"),
            ],
            &known,
        );

        let urls: Vec<&str> = kept.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, ["https://c.example", "https://b.example/y"]);
    }

    #[test]
    fn test_diff_edge_cases() {
        let input = vec![candidate("https://a.example/x")];
        assert_eq!(diff(input.clone(), &HashSet::new()), input);
        assert!(diff(Vec::new(), &known_links(&[])).is_empty());
    }
}
