//! Retention statistics
//!
//! Aggregates over the item table and the attempt log. The heavy lifting
//! happens as SQL aggregates in the storage layer; the pure helpers here
//! exist so the derived numbers are testable without a database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReviewAttempt, ReviewItem};

// ============================================================================
// MEMORY STATISTICS
// ============================================================================

/// Statistics about the review corpus
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    /// Total number of review items
    pub total_items: i64,
    /// Items currently due for review
    pub items_due: i64,
    /// Items still in the learning phase (fewer than two successes)
    pub learning_items: i64,
    /// Items in the reviewing phase (ease-driven intervals)
    pub reviewing_items: i64,
    /// Average ease factor across all items
    pub average_ease_factor: f64,
    /// Average interval across all items, in days
    pub average_interval_days: f64,
    /// Total attempts ever recorded
    pub total_attempts: i64,
    /// Attempts recorded in the last seven days
    pub attempts_last_week: i64,
    /// Share of all attempts with quality >= 3, if any attempts exist
    pub overall_accuracy: Option<f64>,
    /// Share of last-week attempts with quality >= 3, if any exist
    pub recent_accuracy: Option<f64>,
    /// Timestamp of the oldest item
    pub oldest_item: Option<DateTime<Utc>>,
    /// Timestamp of the newest item
    pub newest_item: Option<DateTime<Utc>>,
}

/// Per-item progress: the item, its history, and derived numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProgress {
    /// The item itself
    pub item: ReviewItem,
    /// Attempt history, newest first
    pub attempts: Vec<ReviewAttempt>,
    /// Share of attempts with quality >= 3, if any attempts exist
    pub accuracy: Option<f64>,
    /// Consecutive successes counting back from the most recent attempt
    pub current_streak: usize,
}

// ============================================================================
// PURE HELPERS
// ============================================================================

/// Accuracy as successes / total, `None` when there are no attempts
pub fn accuracy(successes: i64, total: i64) -> Option<f64> {
    if total > 0 {
        Some(successes as f64 / total as f64)
    } else {
        None
    }
}

/// Consecutive successful attempts counting back from the most recent.
/// Expects attempts ordered newest first, as the storage layer returns them.
pub fn current_streak(attempts: &[ReviewAttempt]) -> usize {
    attempts.iter().take_while(|a| a.is_success()).count()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(quality: u8) -> ReviewAttempt {
        ReviewAttempt {
            id: uuid::Uuid::new_v4().to_string(),
            item_id: "item".to_string(),
            quality,
            ease_factor: 2.5,
            interval_days: 1,
            repetitions: 0,
            due_at: Utc::now(),
            reviewed_at: Utc::now(),
        }
    }

    #[test]
    fn test_accuracy_empty_is_none() {
        assert_eq!(accuracy(0, 0), None);
        assert_eq!(accuracy(3, 4), Some(0.75));
    }

    #[test]
    fn test_streak_stops_at_first_failure() {
        // Newest first: two successes, then a failure, then a success
        let attempts = vec![attempt(5), attempt(4), attempt(1), attempt(5)];
        assert_eq!(current_streak(&attempts), 2);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(current_streak(&[]), 0);
    }

    #[test]
    fn test_streak_all_failures() {
        let attempts = vec![attempt(0), attempt(2)];
        assert_eq!(current_streak(&attempts), 0);
    }
}
