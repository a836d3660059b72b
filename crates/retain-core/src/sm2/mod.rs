//! SM-2 (SuperMemo-2) Review Scheduler
//!
//! The classic spaced-repetition algorithm (Wozniak, 1990). Given the
//! previous scheduling state of an item and a fresh 0-5 quality score,
//! computes the next ease factor, interval, and repetition count as a pure
//! function. Persistence belongs to the storage layer.
//!
//! ## Core formulas:
//! - Ease: EF' = max(1.3, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))
//! - Interval: 1 day, then 6 days, then round(previous * EF') thereafter
//! - Any q < 3 resets the item to the start of the learning phase

mod algorithm;
mod scheduler;

pub use algorithm::{
    ease_delta,
    next_ease_factor,
    next_step,
    round_ease,
    // Constants
    FIRST_INTERVAL_DAYS,
    INITIAL_EASE_FACTOR,
    MIN_EASE_FACTOR,
    SECOND_INTERVAL_DAYS,
};

pub use scheduler::{
    Quality, QualityOutcome, ReviewOutcome, ReviewPreview, Sm2Error, Sm2Parameters, Sm2Scheduler,
    Sm2State,
};
