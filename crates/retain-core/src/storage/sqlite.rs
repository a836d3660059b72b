//! SQLite Storage Implementation
//!
//! Durable review state store: items, the attempt log, the due queue, and
//! retention statistics. The scheduler itself stays pure; this layer owns
//! the clock and the writes.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

use crate::review::{
    accuracy, current_streak, ItemProgress, MemoryStats, NewItemInput, ReviewAttempt, ReviewItem,
    SubmittedReview,
};
use crate::sm2::{Quality, ReviewPreview, Sm2Error, Sm2Scheduler};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Item not found
    #[error("Item not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
    /// Scheduler input rejected
    #[error("Scheduler error: {0}")]
    Sm2(#[from] Sm2Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// STORE
// ============================================================================

/// Review state store
///
/// Uses separate reader/writer connections for interior mutability. All
/// methods take `&self` (not `&mut self`), making Store `Send + Sync` so
/// callers can share it as `Arc<Store>` without an outer lock.
pub struct Store {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
    scheduler: Sm2Scheduler,
}

impl Store {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Open (or create) a store at the given path
    ///
    /// With `None`, the database lands in the platform data directory
    /// (e.g. `~/.local/share/retain` on Linux).
    pub fn open(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("com", "retain", "retain").ok_or_else(|| {
                    StorageError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                data_dir.join("retain.db")
            }
        };

        let writer_conn = Connection::open(&path)?;
        Self::configure_connection(&writer_conn)?;

        // Apply migrations on writer only
        super::migrations::apply_migrations(&writer_conn)?;

        // Open reader connection to same path
        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
            scheduler: Sm2Scheduler::default(),
        })
    }

    // ========================================================================
    // ITEMS
    // ========================================================================

    /// Create a new review item
    ///
    /// The item enters the learning state (ease 2.5, interval 1, zero
    /// repetitions) and is due immediately, so it shows up in the next
    /// queue pull.
    pub fn add_item(&self, input: NewItemInput) -> Result<ReviewItem> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let state = self.scheduler.new_item();
        let tags_json = serde_json::to_string(&input.tags).unwrap_or_else(|_| "[]".to_string());

        {
            let writer = self
                .writer
                .lock()
                .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
            writer.execute(
                "INSERT INTO review_items (
                    id, prompt, answer, kind, tags, source,
                    created_at, updated_at,
                    ease_factor, interval_days, repetitions, last_quality, due_at,
                    total_reviews, lapses
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6,
                    ?7, ?8,
                    ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15
                )",
                params![
                    id,
                    input.prompt,
                    input.answer,
                    input.kind.as_str(),
                    tags_json,
                    input.source,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                    state.ease_factor,
                    state.interval_days,
                    state.repetitions,
                    Option::<u8>::None,
                    now.to_rfc3339(),
                    0,
                    0,
                ],
            )?;
        }

        tracing::debug!(item_id = %id, "Created review item");

        self.get_item(&id)?
            .ok_or_else(|| StorageError::NotFound(id))
    }

    /// Get an item by ID
    pub fn get_item(&self, id: &str) -> Result<Option<ReviewItem>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare("SELECT * FROM review_items WHERE id = ?1")?;

        let item = stmt
            .query_row(params![id], |row| Self::row_to_item(row))
            .optional()?;
        Ok(item)
    }

    /// List items, newest first
    pub fn list_items(&self, limit: i32, offset: i32) -> Result<Vec<ReviewItem>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT * FROM review_items
             ORDER BY created_at DESC
             LIMIT ?1 OFFSET ?2",
        )?;

        let items = stmt.query_map(params![limit, offset], |row| Self::row_to_item(row))?;

        let mut result = Vec::new();
        for item in items {
            result.push(item?);
        }
        Ok(result)
    }

    /// Delete an item and its attempt history
    pub fn delete_item(&self, id: &str) -> Result<bool> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let rows = writer.execute("DELETE FROM review_items WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // ========================================================================
    // REVIEW QUEUE
    // ========================================================================

    /// Items due at or before `now`, soonest-due first
    ///
    /// Reads the persisted scheduling state as-is; the queue never
    /// synthesizes placeholder ease or interval values.
    pub fn review_queue(&self, now: DateTime<Utc>, limit: i32) -> Result<Vec<ReviewItem>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT * FROM review_items
             WHERE due_at <= ?1
             ORDER BY due_at ASC
             LIMIT ?2",
        )?;

        let items = stmt.query_map(params![now.to_rfc3339(), limit], |row| {
            Self::row_to_item(row)
        })?;

        let mut result = Vec::new();
        for item in items {
            result.push(item?);
        }
        Ok(result)
    }

    // ========================================================================
    // REVIEWS
    // ========================================================================

    /// Submit a review graded at the current time
    pub fn submit_review(&self, id: &str, quality: Quality) -> Result<SubmittedReview> {
        self.submit_review_at(id, quality, Utc::now())
    }

    /// Submit a review graded at an explicit time
    ///
    /// Runs the pure scheduler against the stored state, then persists the
    /// new state and appends the attempt row in one transaction. A failing
    /// grade on an item with at least one success counts as a lapse.
    pub fn submit_review_at(
        &self,
        id: &str,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<SubmittedReview> {
        let item = self
            .get_item(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        let outcome = self.scheduler.review(&item.sm2_state(), quality, now)?;
        let lapsed = !quality.is_success() && item.repetitions > 0;

        let attempt = ReviewAttempt {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            quality: quality.score(),
            ease_factor: outcome.ease_factor,
            interval_days: outcome.interval_days,
            repetitions: outcome.repetitions,
            due_at: outcome.due_at,
            reviewed_at: now,
        };

        {
            let mut writer = self
                .writer
                .lock()
                .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
            let tx = writer.transaction()?;

            tx.execute(
                "UPDATE review_items SET
                    ease_factor = ?1,
                    interval_days = ?2,
                    repetitions = ?3,
                    last_quality = ?4,
                    due_at = ?5,
                    updated_at = ?6,
                    total_reviews = total_reviews + 1,
                    lapses = lapses + ?7
                WHERE id = ?8",
                params![
                    outcome.ease_factor,
                    outcome.interval_days,
                    outcome.repetitions,
                    quality.score(),
                    outcome.due_at.to_rfc3339(),
                    now.to_rfc3339(),
                    if lapsed { 1 } else { 0 },
                    id,
                ],
            )?;

            tx.execute(
                "INSERT INTO review_attempts (
                    id, item_id, quality, ease_factor, interval_days,
                    repetitions, due_at, reviewed_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    attempt.id,
                    attempt.item_id,
                    attempt.quality,
                    attempt.ease_factor,
                    attempt.interval_days,
                    attempt.repetitions,
                    attempt.due_at.to_rfc3339(),
                    attempt.reviewed_at.to_rfc3339(),
                ],
            )?;

            tx.commit()?;
        }

        tracing::debug!(
            item_id = %id,
            quality = quality.score(),
            interval_days = outcome.interval_days,
            "Recorded review"
        );

        let item = self
            .get_item(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        Ok(SubmittedReview { item, attempt })
    }

    /// Preview the outcome of every quality grade for an item
    pub fn preview_review(&self, id: &str) -> Result<ReviewPreview> {
        let item = self
            .get_item(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        Ok(self.scheduler.preview(&item.sm2_state(), Utc::now())?)
    }

    // ========================================================================
    // ATTEMPT LOG
    // ========================================================================

    /// Attempt history for one item, newest first
    pub fn attempt_history(&self, item_id: &str, limit: i32) -> Result<Vec<ReviewAttempt>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT * FROM review_attempts
             WHERE item_id = ?1
             ORDER BY reviewed_at DESC
             LIMIT ?2",
        )?;

        let attempts = stmt.query_map(params![item_id, limit], |row| Self::row_to_attempt(row))?;

        let mut result = Vec::new();
        for attempt in attempts {
            result.push(attempt?);
        }
        Ok(result)
    }

    /// Most recent attempts across all items, newest first
    pub fn recent_attempts(&self, limit: i32) -> Result<Vec<ReviewAttempt>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT * FROM review_attempts
             ORDER BY reviewed_at DESC
             LIMIT ?1",
        )?;

        let attempts = stmt.query_map(params![limit], |row| Self::row_to_attempt(row))?;

        let mut result = Vec::new();
        for attempt in attempts {
            result.push(attempt?);
        }
        Ok(result)
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    /// Retention statistics as of `now`
    ///
    /// Reads the item table and the attempt log; never invokes the
    /// scheduler.
    pub fn stats(&self, now: DateTime<Utc>) -> Result<MemoryStats> {
        let now_str = now.to_rfc3339();
        let week_ago = (now - chrono::Duration::days(7)).to_rfc3339();

        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;

        let total: i64 =
            reader.query_row("SELECT COUNT(*) FROM review_items", [], |row| row.get(0))?;

        let due: i64 = reader.query_row(
            "SELECT COUNT(*) FROM review_items WHERE due_at <= ?1",
            params![now_str],
            |row| row.get(0),
        )?;

        let learning: i64 = reader.query_row(
            "SELECT COUNT(*) FROM review_items WHERE repetitions < 2",
            [],
            |row| row.get(0),
        )?;

        let avg_ease: f64 = reader.query_row(
            "SELECT COALESCE(AVG(ease_factor), 0) FROM review_items",
            [],
            |row| row.get(0),
        )?;

        let avg_interval: f64 = reader.query_row(
            "SELECT COALESCE(AVG(interval_days), 0) FROM review_items",
            [],
            |row| row.get(0),
        )?;

        let (total_attempts, total_successes): (i64, i64) = reader.query_row(
            "SELECT COUNT(*), COALESCE(SUM(quality >= 3), 0) FROM review_attempts",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let (week_attempts, week_successes): (i64, i64) = reader.query_row(
            "SELECT COUNT(*), COALESCE(SUM(quality >= 3), 0) FROM review_attempts
             WHERE reviewed_at >= ?1",
            params![week_ago],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let oldest: Option<String> = reader
            .query_row("SELECT MIN(created_at) FROM review_items", [], |row| {
                row.get(0)
            })
            .ok()
            .flatten();

        let newest: Option<String> = reader
            .query_row("SELECT MAX(created_at) FROM review_items", [], |row| {
                row.get(0)
            })
            .ok()
            .flatten();

        Ok(MemoryStats {
            total_items: total,
            items_due: due,
            learning_items: learning,
            reviewing_items: total - learning,
            average_ease_factor: avg_ease,
            average_interval_days: avg_interval,
            total_attempts,
            attempts_last_week: week_attempts,
            overall_accuracy: accuracy(total_successes, total_attempts),
            recent_accuracy: accuracy(week_successes, week_attempts),
            oldest_item: oldest.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }),
            newest_item: newest.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }),
        })
    }

    /// One item with its history and derived progress numbers
    pub fn item_progress(&self, id: &str) -> Result<ItemProgress> {
        let item = self
            .get_item(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        let attempts = self.attempt_history(id, i32::MAX)?;
        let successes = attempts.iter().filter(|a| a.is_success()).count() as i64;

        Ok(ItemProgress {
            accuracy: accuracy(successes, attempts.len() as i64),
            current_streak: current_streak(&attempts),
            item,
            attempts,
        })
    }

    // ========================================================================
    // ROW MAPPING
    // ========================================================================

    /// Parse RFC3339 timestamp
    fn parse_timestamp(value: &str, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid {} timestamp '{}': {}", field_name, value, e),
                    )),
                )
            })
    }

    /// Convert a row to ReviewItem
    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<ReviewItem> {
        let tags_json: String = row.get("tags")?;
        let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();

        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;
        let due_at: String = row.get("due_at")?;

        Ok(ReviewItem {
            id: row.get("id")?,
            prompt: row.get("prompt")?,
            answer: row.get("answer")?,
            kind: row.get("kind")?,
            tags,
            source: row.get("source")?,
            created_at: Self::parse_timestamp(&created_at, "created_at")?,
            updated_at: Self::parse_timestamp(&updated_at, "updated_at")?,
            ease_factor: row.get("ease_factor")?,
            interval_days: row.get("interval_days")?,
            repetitions: row.get("repetitions")?,
            last_quality: row.get("last_quality")?,
            due_at: Self::parse_timestamp(&due_at, "due_at")?,
            total_reviews: row.get("total_reviews")?,
            lapses: row.get("lapses")?,
        })
    }

    /// Convert a row to ReviewAttempt
    fn row_to_attempt(row: &rusqlite::Row) -> rusqlite::Result<ReviewAttempt> {
        let due_at: String = row.get("due_at")?;
        let reviewed_at: String = row.get("reviewed_at")?;

        Ok(ReviewAttempt {
            id: row.get("id")?,
            item_id: row.get("item_id")?,
            quality: row.get("quality")?,
            ease_factor: row.get("ease_factor")?,
            interval_days: row.get("interval_days")?,
            repetitions: row.get("repetitions")?,
            due_at: Self::parse_timestamp(&due_at, "due_at")?,
            reviewed_at: Self::parse_timestamp(&reviewed_at, "reviewed_at")?,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ItemKind;

    // The TempDir must outlive the Store or SQLite loses its backing file
    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(Some(dir.path().join("retain-test.db"))).unwrap();
        (dir, store)
    }

    fn vocab(prompt: &str) -> NewItemInput {
        NewItemInput {
            prompt: prompt.to_string(),
            answer: format!("{} (answer)", prompt),
            kind: ItemKind::Vocabulary,
            tags: vec!["a1".to_string()],
            source: None,
        }
    }

    #[test]
    fn test_add_item_is_immediately_due() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("der Hund")).unwrap();

        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.interval_days, 1);
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.last_quality, None);
        assert!(item.is_due());

        let queue = store.review_queue(Utc::now(), 10).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, item.id);
    }

    #[test]
    fn test_submit_review_persists_state_and_attempt() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("la maison")).unwrap();

        let result = store.submit_review(&item.id, Quality::Easy).unwrap();
        assert_eq!(result.item.repetitions, 1);
        assert_eq!(result.item.interval_days, 1);
        assert_eq!(result.item.ease_factor, 2.6);
        assert_eq!(result.item.last_quality, Some(5));
        assert_eq!(result.item.total_reviews, 1);
        assert_eq!(result.attempt.quality, 5);

        let history = store.attempt_history(&item.id, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, result.attempt.id);
    }

    #[test]
    fn test_reviewed_item_leaves_the_queue() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("el gato")).unwrap();

        store.submit_review(&item.id, Quality::Good).unwrap();

        // Due tomorrow, so the queue is empty now but not in two days
        let queue = store.review_queue(Utc::now(), 10).unwrap();
        assert!(queue.is_empty());

        let later = Utc::now() + chrono::Duration::days(2);
        let queue = store.review_queue(later, 10).unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_queue_orders_by_due_date() {
        let (_dir, store) = store();
        let first = store.add_item(vocab("one")).unwrap();
        let second = store.add_item(vocab("two")).unwrap();

        // Push `first` out by 6 days (two successes), `second` by 1 day
        store.submit_review(&first.id, Quality::Good).unwrap();
        store.submit_review(&first.id, Quality::Good).unwrap();
        store.submit_review(&second.id, Quality::Good).unwrap();

        let later = Utc::now() + chrono::Duration::days(10);
        let queue = store.review_queue(later, 10).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].id, second.id);
        assert_eq!(queue[1].id, first.id);
    }

    #[test]
    fn test_lapse_counted_once_per_forgetting() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("vergessen")).unwrap();

        store.submit_review(&item.id, Quality::Good).unwrap();
        let result = store.submit_review(&item.id, Quality::Blackout).unwrap();
        assert_eq!(result.item.lapses, 1);
        assert_eq!(result.item.repetitions, 0);

        // Failing again from zero repetitions is not a new lapse
        let result = store.submit_review(&item.id, Quality::Blackout).unwrap();
        assert_eq!(result.item.lapses, 1);
    }

    #[test]
    fn test_recent_attempts_span_items() {
        let (_dir, store) = store();
        let a = store.add_item(vocab("uno")).unwrap();
        let b = store.add_item(vocab("dos")).unwrap();

        store.submit_review(&a.id, Quality::Good).unwrap();
        store.submit_review(&b.id, Quality::Easy).unwrap();

        let recent = store.recent_attempts(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(store.recent_attempts(1).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let (_dir, store) = store();
        let err = store.submit_review("missing", Quality::Good).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_delete_cascades_to_attempts() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("obsolete")).unwrap();
        store.submit_review(&item.id, Quality::Hard).unwrap();

        assert!(store.delete_item(&item.id).unwrap());
        assert!(store.get_item(&item.id).unwrap().is_none());
        assert!(store.attempt_history(&item.id, 10).unwrap().is_empty());
        assert!(!store.delete_item(&item.id).unwrap());
    }

    #[test]
    fn test_stats_aggregates_items_and_attempts() {
        let (_dir, store) = store();
        let a = store.add_item(vocab("a")).unwrap();
        let b = store.add_item(vocab("b")).unwrap();

        store.submit_review(&a.id, Quality::Easy).unwrap();
        store.submit_review(&a.id, Quality::Easy).unwrap();
        store.submit_review(&b.id, Quality::Almost).unwrap();

        let stats = store.stats(Utc::now()).unwrap();
        assert_eq!(stats.total_items, 2);
        // `a` is at 2 repetitions (reviewing), `b` lapsed back to learning
        assert_eq!(stats.learning_items, 1);
        assert_eq!(stats.reviewing_items, 1);
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.attempts_last_week, 3);
        assert_eq!(stats.overall_accuracy, Some(2.0 / 3.0));
        assert_eq!(stats.recent_accuracy, Some(2.0 / 3.0));
        assert!(stats.oldest_item.is_some());
        // Nothing is due yet: `b` comes back in a day, `a` in six
        assert_eq!(stats.items_due, 0);
    }

    #[test]
    fn test_stats_on_empty_store() {
        let (_dir, store) = store();
        let stats = store.stats(Utc::now()).unwrap();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.overall_accuracy, None);
        assert_eq!(stats.recent_accuracy, None);
        assert_eq!(stats.oldest_item, None);
    }

    #[test]
    fn test_item_progress_streak_and_accuracy() {
        let (_dir, store) = store();
        let item = store.add_item(vocab("streak")).unwrap();

        store.submit_review(&item.id, Quality::Almost).unwrap();
        store.submit_review(&item.id, Quality::Good).unwrap();
        store.submit_review(&item.id, Quality::Easy).unwrap();

        let progress = store.item_progress(&item.id).unwrap();
        assert_eq!(progress.attempts.len(), 3);
        assert_eq!(progress.accuracy, Some(2.0 / 3.0));
        assert_eq!(progress.current_streak, 2);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retain.db");

        let id = {
            let store = Store::open(Some(path.clone())).unwrap();
            let item = store.add_item(vocab("persist")).unwrap();
            store.submit_review(&item.id, Quality::Easy).unwrap();
            item.id
        };

        let store = Store::open(Some(path)).unwrap();
        let item = store.get_item(&id).unwrap().unwrap();
        assert_eq!(item.repetitions, 1);
        assert_eq!(item.ease_factor, 2.6);
        assert_eq!(store.attempt_history(&id, 10).unwrap().len(), 1);
    }
}
