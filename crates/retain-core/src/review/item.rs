//! Review Item - The fundamental unit of learning
//!
//! Each item is a prompt/answer pair with:
//! - Content and provenance metadata
//! - Embedded SM-2 scheduling state
//! - Lifetime counters (total reviews, lapses)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sm2::Sm2State;

// ============================================================================
// ITEM KINDS
// ============================================================================

/// Types of learnable items
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A single vocabulary word or expression
    #[default]
    Vocabulary,
    /// A multi-word phrase or sentence pattern
    Phrase,
    /// A grammar rule or conjugation
    Grammar,
    /// A listening-comprehension prompt
    Listening,
    /// A free-form exercise
    Exercise,
}

impl ItemKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Vocabulary => "vocabulary",
            ItemKind::Phrase => "phrase",
            ItemKind::Grammar => "grammar",
            ItemKind::Listening => "listening",
            ItemKind::Exercise => "exercise",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "vocabulary" => ItemKind::Vocabulary,
            "phrase" => ItemKind::Phrase,
            "grammar" => ItemKind::Grammar,
            "listening" => ItemKind::Listening,
            "exercise" => ItemKind::Exercise,
            _ => ItemKind::Vocabulary,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// REVIEW ITEM
// ============================================================================

/// A learnable item with its scheduling state
///
/// The scheduling fields are an explicit value (not derived from joins) so
/// the queue always reads the state the last review actually produced.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// What is shown to the learner
    pub prompt: String,
    /// The expected answer
    pub answer: String,
    /// Kind of item (vocabulary, phrase, etc.)
    pub kind: String,
    /// Tags for categorization (course, lesson, deck)
    pub tags: Vec<String>,
    /// Where the item came from (lesson id, import file, etc.)
    pub source: Option<String>,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// When the item was last modified
    pub updated_at: DateTime<Utc>,

    // ========== SM-2 scheduling state ==========
    /// Ease multiplier, floored at 1.3
    pub ease_factor: f64,
    /// Days between the last review and the next one
    pub interval_days: i64,
    /// Consecutive successful reviews
    pub repetitions: i32,
    /// Last recorded quality score, if ever reviewed
    pub last_quality: Option<u8>,
    /// When the item is next due
    pub due_at: DateTime<Utc>,

    // ========== Lifetime counters ==========
    /// Total reviews across the life of the item
    pub total_reviews: i64,
    /// Times the item was forgotten after at least one success
    pub lapses: i64,
}

impl ReviewItem {
    /// Check if this item is due at the given time
    pub fn is_due_at(&self, time: DateTime<Utc>) -> bool {
        self.due_at <= time
    }

    /// Check if this item is due now
    pub fn is_due(&self) -> bool {
        self.is_due_at(Utc::now())
    }

    /// The scheduling state to feed into the next review
    pub fn sm2_state(&self) -> Sm2State {
        Sm2State {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetitions: self.repetitions,
        }
    }

    /// Get the parsed item kind
    pub fn get_kind(&self) -> ItemKind {
        ItemKind::parse_name(&self.kind)
    }
}

// ============================================================================
// INPUT TYPES
// ============================================================================

/// Input for creating a new review item
///
/// Uses `deny_unknown_fields` to prevent field injection attacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewItemInput {
    /// What is shown to the learner
    pub prompt: String,
    /// The expected answer
    pub answer: String,
    /// Kind of item (vocabulary, phrase, etc.)
    #[serde(default)]
    pub kind: ItemKind,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
    /// Where the item came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Default for NewItemInput {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            answer: String::new(),
            kind: ItemKind::Vocabulary,
            tags: vec![],
            source: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_roundtrip() {
        for kind in [
            ItemKind::Vocabulary,
            ItemKind::Phrase,
            ItemKind::Grammar,
            ItemKind::Listening,
            ItemKind::Exercise,
        ] {
            assert_eq!(ItemKind::parse_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_kind_falls_back_to_vocabulary() {
        assert_eq!(ItemKind::parse_name("flashcard"), ItemKind::Vocabulary);
    }

    #[test]
    fn test_new_item_input_deny_unknown_fields() {
        let json = r#"{"prompt": "der Hund", "answer": "the dog", "tags": ["a1"]}"#;
        let result: Result<NewItemInput, _> = serde_json::from_str(json);
        assert!(result.is_ok());

        let json_with_unknown =
            r#"{"prompt": "der Hund", "answer": "the dog", "easeFactor": 99.0}"#;
        let result: Result<NewItemInput, _> = serde_json::from_str(json_with_unknown);
        assert!(result.is_err());
    }
}
