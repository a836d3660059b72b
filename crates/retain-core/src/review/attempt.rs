//! Review attempts - the persisted outcome log
//!
//! One [`ReviewAttempt`] row is appended per review, in the same
//! transaction that updates the item's scheduling state. Statistics are
//! computed from this log, never from the scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReviewItem;

/// A single recorded review outcome
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAttempt {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// The reviewed item
    pub item_id: String,
    /// Quality score the learner earned, 0-5
    pub quality: u8,
    /// Ease factor the review produced
    pub ease_factor: f64,
    /// Interval the review produced, in days
    pub interval_days: i64,
    /// Consecutive-success count the review produced
    pub repetitions: i32,
    /// Due date the review produced
    pub due_at: DateTime<Utc>,
    /// When the review happened
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewAttempt {
    /// Whether the attempt counts as a successful recall (quality >= 3)
    pub fn is_success(&self) -> bool {
        self.quality >= 3
    }
}

/// Result of submitting a review: the updated item plus the logged attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReview {
    /// The item with its new scheduling state
    pub item: ReviewItem,
    /// The attempt row that was appended
    pub attempt: ReviewAttempt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_boundary() {
        let mut attempt = ReviewAttempt {
            id: "a".to_string(),
            item_id: "i".to_string(),
            quality: 3,
            ease_factor: 2.5,
            interval_days: 1,
            repetitions: 1,
            due_at: Utc::now(),
            reviewed_at: Utc::now(),
        };
        assert!(attempt.is_success());
        attempt.quality = 2;
        assert!(!attempt.is_success());
    }
}
