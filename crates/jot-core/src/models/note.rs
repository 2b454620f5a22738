//! Note model

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five recognized note categories.
///
/// This is a closed enumeration validated at the deserialization boundary;
/// unknown wire values are rejected by serde. The classification boundary
/// uses [`NoteType::from_label`] instead, which falls back to [`NoteType::Idea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// A creative thought, plan, or spark
    #[default]
    Idea,
    /// Venting, frustration, negative sentiment
    Complaint,
    /// A question or something the author doesn't understand
    Confusion,
    /// A headline, article summary, or knowledge snippet
    News,
    /// Content containing an http/https URL
    Link,
}

impl NoteType {
    /// All recognized types, in classification priority order.
    pub const ALL: [Self; 5] = [
        Self::Link,
        Self::Complaint,
        Self::Confusion,
        Self::News,
        Self::Idea,
    ];

    /// Wire/display name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Complaint => "complaint",
            Self::Confusion => "confusion",
            Self::News => "news",
            Self::Link => "link",
        }
    }

    /// Lenient lookup used when an external classifier supplies the label.
    ///
    /// Returns `None` for labels outside the closed set; callers that must
    /// produce a type anyway fall back to the default (`Idea`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "idea" => Some(Self::Idea),
            "complaint" => Some(Self::Complaint),
            "confusion" => Some(Self::Confusion),
            "news" => Some(Self::News),
            "link" => Some(Self::Link),
            _ => None,
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown note type: {s}"))
    }
}

/// A captured note.
///
/// `created_at` is assigned once at capture time and never rewritten; it is
/// the authoritative ordering key and the sole tie-breaker when two devices
/// sync conflicting copies of the same note id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, caller-assigned (UUID v7, time-sortable)
    pub id: String,
    /// Plain text content
    pub content: String,
    /// Note category
    #[serde(rename = "type")]
    pub note_type: NoteType,
    /// Tags, both inline `#tags` and classifier-provided
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached images as data URIs
    #[serde(default)]
    pub images: Vec<String>,
    /// Creation timestamp, immutable once assigned
    pub created_at: DateTime<Utc>,
    /// Optional reminder time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<DateTime<Utc>>,
    /// Suggestion returned by the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,
    /// Classifier's reason for the chosen type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_type_reason: Option<String>,
    /// Whether the classifier has run for this note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ai_analyzed: Option<bool>,
}

impl Note {
    /// Create a new note with the given content, stamped now.
    ///
    /// Inline `#tags` are extracted from the content immediately.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let tags = extract_tags(&content);
        Self {
            id: Uuid::now_v7().to_string(),
            content,
            note_type: NoteType::default(),
            tags,
            images: Vec::new(),
            created_at: Utc::now(),
            reminder_at: None,
            ai_suggestion: None,
            ai_type_reason: None,
            is_ai_analyzed: None,
        }
    }

    /// Check if note content is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get first line as title preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }

    /// Whether this note carries the given tag (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Extract #tags from text
///
/// Valid tags match the pattern: `#[a-zA-Z][a-zA-Z0-9_-]*`
/// Tags are returned in lowercase and deduplicated.
#[must_use]
pub fn extract_tags(text: &str) -> Vec<String> {
    let re = Regex::new(r"#([a-zA-Z][a-zA-Z0-9_-]*)").expect("Invalid regex");
    re.captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_note_new() {
        let note = Note::new("Hello world");
        assert_eq!(note.content, "Hello world");
        assert_eq!(note.note_type, NoteType::Idea);
        assert!(note.tags.is_empty());
        assert!(note.is_ai_analyzed.is_none());
    }

    #[test]
    fn test_note_ids_unique() {
        let a = Note::new("a");
        let b = Note::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_note_new_extracts_inline_tags() {
        let note = Note::new("ship the #rust rewrite");
        assert_eq!(note.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Note::new("   ").is_empty());
        assert!(!Note::new("Hello").is_empty());
    }

    #[test]
    fn test_title_preview() {
        let note = Note::new("First line\nSecond line");
        assert_eq!(note.title_preview(50), "First line");
        assert_eq!(note.title_preview(5), "First");
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let note = Note::new("release notes #Rust");
        assert!(note.has_tag("rust"));
        assert!(note.has_tag("RUST"));
        assert!(!note.has_tag("go"));
    }

    #[test]
    fn test_note_type_wire_names() {
        for note_type in NoteType::ALL {
            let json = serde_json::to_string(&note_type).unwrap();
            assert_eq!(json, format!("\"{note_type}\""));
        }
    }

    #[test]
    fn test_note_type_rejects_unknown_on_the_wire() {
        assert!(serde_json::from_str::<NoteType>("\"rant\"").is_err());
    }

    #[test]
    fn test_note_type_from_label() {
        assert_eq!(NoteType::from_label(" Link "), Some(NoteType::Link));
        assert_eq!(NoteType::from_label("rant"), None);
    }

    #[test]
    fn test_note_wire_shape_is_camel_case() {
        let mut note = Note::new("check https://example.com #links");
        note.note_type = NoteType::Link;
        note.ai_type_reason = Some("contains a URL".to_string());
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(*value.get("type").unwrap(), "link");
        assert_eq!(*value.get("aiTypeReason").unwrap(), "contains a URL");
        // Absent optionals are skipped entirely
        assert!(value.get("reminderAt").is_none());
    }

    #[test]
    fn test_note_deserializes_minimal_payload() {
        let json = r#"{"id":"1","content":"a","type":"idea","createdAt":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, "1");
        assert!(note.tags.is_empty());
        assert!(note.images.is_empty());
    }

    #[test]
    fn test_extract_tags_deduplicates_and_lowercases() {
        let tags = extract_tags("#Hello #HELLO #world");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&"hello".to_string()));
        assert!(tags.contains(&"world".to_string()));
    }

    #[test]
    fn test_extract_tags_rejects_leading_digits() {
        assert!(extract_tags("#123 #456test").is_empty());
    }
}
