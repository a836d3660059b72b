//! Review module - Domain types for learnable items
//!
//! The unit of learning is a [`ReviewItem`]: a prompt/answer pair carrying
//! its own SM-2 scheduling state. Every review appends a [`ReviewAttempt`]
//! to the attempt log, which the statistics aggregator reads back.

mod attempt;
mod item;
mod stats;

pub use attempt::{ReviewAttempt, SubmittedReview};
pub use item::{ItemKind, NewItemInput, ReviewItem};
pub use stats::{accuracy, current_streak, ItemProgress, MemoryStats};
