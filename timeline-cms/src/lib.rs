//! Headless-CMS achievement documents to `TimelineEntry` converter.
//!
//! Accepts the Payload REST list shape (`{ "docs": [...] }`) or a bare
//! array, flattens Lexical rich-text summaries to plain text, resolves
//! image relationships to URLs and sorts entries date-descending. The
//! timeline engine itself never resorts.

use chrono::{DateTime, Utc};
use serde_json::Value;
use timeline_core::{TimelineEntry, TimelineError};

/// Convert an achievements export from a JSON string.
pub fn entries_from_docs_str(docs_json: &str) -> Result<Vec<TimelineEntry>, TimelineError> {
    let value: Value =
        serde_json::from_str(docs_json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    entries_from_docs_value(&value)
}

/// Convert an achievements export from a `serde_json::Value`.
///
/// Malformed documents degrade to empty-string fields; no document is ever
/// dropped, so index-based side alternation stays stable downstream.
pub fn entries_from_docs_value(docs: &Value) -> Result<Vec<TimelineEntry>, TimelineError> {
    let documents = match docs {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => docs
            .get("docs")
            .and_then(Value::as_array)
            .ok_or(TimelineError::MissingData)?
            .as_slice(),
        _ => {
            return Err(TimelineError::Parse(
                "expected an array of documents or a list object".to_string(),
            ))
        }
    };

    let mut entries: Vec<TimelineEntry> = documents.iter().map(entry_from_doc).collect();

    // Newest first; undated documents behave as epoch and sort last. The
    // sort is stable, so ties keep their upstream order.
    entries.sort_by_key(|entry| {
        std::cmp::Reverse(
            entry
                .occurred_at
                .map(|at| at.timestamp_millis())
                .unwrap_or(0),
        )
    });

    Ok(entries)
}

fn entry_from_doc(doc: &Value) -> TimelineEntry {
    TimelineEntry {
        id: document_id(doc),
        title: doc
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        text: doc
            .get("summary")
            .map(plain_text_from_rich_text)
            .unwrap_or_default(),
        image: resolve_image_url(doc.get("image")),
        occurred_at: doc.get("date").and_then(Value::as_str).and_then(parse_date),
    }
}

fn document_id(doc: &Value) -> String {
    match doc.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// Flatten a Lexical rich-text document to plain text.
///
/// Text leaves concatenate within a block; top-level blocks join with a
/// single space, trimmed. Formatting, links and nesting depth are ignored.
pub fn plain_text_from_rich_text(summary: &Value) -> String {
    let Some(children) = summary
        .get("root")
        .and_then(|root| root.get("children"))
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    children
        .iter()
        .map(collect_text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn collect_text(node: &Value) -> String {
    if let Some(text) = node.as_str() {
        return text.to_string();
    }
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(children) = node.get("children").and_then(Value::as_array) {
        return children.iter().map(collect_text).collect();
    }
    String::new()
}

/// Resolve the image relationship to a URL.
///
/// A populated relation is an object carrying `url`; an unpopulated one is
/// a bare numeric id (depth 0) and yields nothing. Plain strings pass
/// through for callers that pre-resolve.
fn resolve_image_url(image: Option<&Value>) -> Option<String> {
    let image = image?;
    if let Some(url) = image.as_str() {
        return non_empty(url);
    }
    image.get("url").and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(url: &str) -> Option<String> {
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_blocks() {
        let summary = json!({
            "root": {
                "children": [
                    { "children": [ { "text": "Won the " }, { "text": "regional" } ] },
                    { "children": [ { "text": "finals." } ] }
                ]
            }
        });
        assert_eq!(
            plain_text_from_rich_text(&summary),
            "Won the regional finals."
        );
    }

    #[test]
    fn missing_root_flattens_to_empty() {
        assert_eq!(plain_text_from_rich_text(&json!({})), "");
        assert_eq!(plain_text_from_rich_text(&json!(null)), "");
    }

    #[test]
    fn unpopulated_image_relation_yields_none() {
        assert_eq!(resolve_image_url(Some(&json!(12))), None);
        assert_eq!(resolve_image_url(Some(&json!(null))), None);
        assert_eq!(
            resolve_image_url(Some(&json!({ "id": 12, "url": "/media/a.jpg" }))),
            Some("/media/a.jpg".to_string())
        );
        assert_eq!(
            resolve_image_url(Some(&json!({ "id": 12, "url": "" }))),
            None
        );
    }

    #[test]
    fn docs_sort_newest_first_with_undated_last() {
        let docs = json!({ "docs": [
            { "id": 1, "title": "Oldest", "date": "2023-01-10T08:00:00.000Z" },
            { "id": 2, "title": "Undated" },
            { "id": 3, "title": "Newest", "date": "2025-06-01T12:30:00.000Z" }
        ]});

        let entries = entries_from_docs_value(&docs).expect("valid docs");
        let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Oldest", "Undated"]);
    }

    #[test]
    fn malformed_document_is_kept_with_fallbacks() {
        let docs = json!([ { "date": 42 } ]);
        let entries = entries_from_docs_value(&docs).expect("valid shape");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].text, "");
        assert_eq!(entries[0].image, None);
        assert_eq!(entries[0].occurred_at, None);
    }

    #[test]
    fn list_object_without_docs_is_missing_data() {
        let err = entries_from_docs_value(&json!({ "totalDocs": 0 })).unwrap_err();
        assert!(matches!(err, TimelineError::MissingData));
    }
}
