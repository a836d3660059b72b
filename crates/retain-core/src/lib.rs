//! # Retain Core
//!
//! Spaced-repetition review engine for language-learning products:
//!
//! - **SM-2 Scheduler**: the classic SuperMemo-2 interval algorithm
//!   (Wozniak, 1990) as a pure, clock-explicit function
//! - **Review Queue**: due items from persisted state, soonest-due first
//! - **Attempt Log**: append-only outcome history, written transactionally
//!   with every state update
//! - **Retention Statistics**: accuracy and corpus health from the log
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use retain_core::{NewItemInput, Quality, Store};
//!
//! // Open the store (uses default platform-specific location)
//! let store = Store::open(None)?;
//!
//! // Add something to learn
//! let input = NewItemInput {
//!     prompt: "der Hund".to_string(),
//!     answer: "the dog".to_string(),
//!     ..Default::default()
//! };
//! let item = store.add_item(input)?;
//!
//! // Pull the due queue and grade a recall
//! let due = store.review_queue(chrono::Utc::now(), 20)?;
//! let result = store.submit_review(&item.id, Quality::Good)?;
//!
//! // Inspect retention
//! let stats = store.stats(chrono::Utc::now())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): compile SQLite from the bundled
//!   amalgamation instead of linking the system library

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod review;
pub mod sm2;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Domain types
pub use review::{
    accuracy, current_streak, ItemKind, ItemProgress, MemoryStats, NewItemInput, ReviewAttempt,
    ReviewItem, SubmittedReview,
};

// SM-2 algorithm
pub use sm2::{
    ease_delta,
    next_ease_factor,
    // Core functions for advanced usage
    next_step,
    Quality,
    QualityOutcome,
    ReviewOutcome,
    ReviewPreview,
    Sm2Error,
    Sm2Parameters,
    Sm2Scheduler,
    Sm2State,
    FIRST_INTERVAL_DAYS,
    INITIAL_EASE_FACTOR,
    // Constants
    MIN_EASE_FACTOR,
    SECOND_INTERVAL_DAYS,
};

// Storage layer
pub use storage::{Result, StorageError, Store};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        ItemKind, MemoryStats, NewItemInput, Quality, Result, ReviewItem, ReviewOutcome,
        Sm2Scheduler, Sm2State, StorageError, Store,
    };
}
