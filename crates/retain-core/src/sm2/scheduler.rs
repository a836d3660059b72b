//! SM-2 scheduler types
//!
//! Wraps the pure formulas in [`super::algorithm`] with validated inputs:
//! a [`Quality`] score that cannot be out of range once constructed, and a
//! [`Sm2State`] checked for negative or non-finite values before use.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::{
    ease_delta, round_ease, FIRST_INTERVAL_DAYS, INITIAL_EASE_FACTOR, MIN_EASE_FACTOR,
    SECOND_INTERVAL_DAYS,
};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Scheduler error type
///
/// The scheduler performs no I/O, so every failure here is a caller
/// contract violation surfaced immediately. Retrying with the same input
/// fails identically.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Sm2Error {
    /// Quality score outside the closed range 0-5
    #[error("quality must be between 0 and 5, got {0}")]
    QualityOutOfRange(i64),
    /// Previous scheduling state with negative or non-finite fields
    #[error("invalid scheduling state: {0}")]
    InvalidState(String),
}

/// Scheduler result type
pub type Result<T> = std::result::Result<T, Sm2Error>;

// ============================================================================
// QUALITY
// ============================================================================

/// Quality of recall for a single review event, 0-5
///
/// 0-2 count as failures (the item is considered forgotten), 3-5 as
/// successes. The variants follow the original SM-2 grade descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Quality {
    /// Complete blackout, no recognition of the answer
    Blackout = 0,
    /// Wrong answer, but the correct one was recognized when shown
    Incorrect = 1,
    /// Wrong answer, but the correct one felt easy once shown
    Almost = 2,
    /// Correct with serious difficulty
    Hard = 3,
    /// Correct after some hesitation
    Good = 4,
    /// Perfect, effortless recall
    Easy = 5,
}

impl Quality {
    /// All quality grades, worst to best
    pub const ALL: [Quality; 6] = [
        Quality::Blackout,
        Quality::Incorrect,
        Quality::Almost,
        Quality::Hard,
        Quality::Good,
        Quality::Easy,
    ];

    /// Numeric score 0-5
    pub fn score(&self) -> u8 {
        *self as u8
    }

    /// Whether this grade counts as a successful recall (q >= 3)
    pub fn is_success(&self) -> bool {
        self.score() >= 3
    }

    /// Parse a numeric score, rejecting anything outside 0-5
    pub fn from_score(score: i64) -> Result<Self> {
        match score {
            0 => Ok(Quality::Blackout),
            1 => Ok(Quality::Incorrect),
            2 => Ok(Quality::Almost),
            3 => Ok(Quality::Hard),
            4 => Ok(Quality::Good),
            5 => Ok(Quality::Easy),
            other => Err(Sm2Error::QualityOutOfRange(other)),
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = Sm2Error;

    fn try_from(value: u8) -> Result<Self> {
        Quality::from_score(value as i64)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Quality::Blackout => "blackout",
            Quality::Incorrect => "incorrect",
            Quality::Almost => "almost",
            Quality::Hard => "hard",
            Quality::Good => "good",
            Quality::Easy => "easy",
        };
        write!(f, "{}", label)
    }
}

// ============================================================================
// SCHEDULING STATE
// ============================================================================

/// Per-item scheduling state fed into a review
///
/// One of these exists (persisted) for every item a user has touched. The
/// defaults describe an item that has never been reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2State {
    /// Ease multiplier, floored at 1.3. Higher means longer intervals.
    pub ease_factor: f64,
    /// Days until the next scheduled review
    pub interval_days: i64,
    /// Consecutive successful reviews; resets to 0 on failure
    pub repetitions: i32,
}

impl Default for Sm2State {
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: FIRST_INTERVAL_DAYS,
            repetitions: 0,
        }
    }
}

impl Sm2State {
    /// Construct a state, validating the fields
    pub fn new(ease_factor: f64, interval_days: i64, repetitions: i32) -> Result<Self> {
        let state = Self {
            ease_factor,
            interval_days,
            repetitions,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check the invariants the scheduler relies on
    pub fn validate(&self) -> Result<()> {
        if !self.ease_factor.is_finite() || self.ease_factor <= 0.0 {
            return Err(Sm2Error::InvalidState(format!(
                "ease factor must be a positive finite number, got {}",
                self.ease_factor
            )));
        }
        if self.interval_days < 1 {
            return Err(Sm2Error::InvalidState(format!(
                "interval must be at least 1 day, got {}",
                self.interval_days
            )));
        }
        if self.repetitions < 0 {
            return Err(Sm2Error::InvalidState(format!(
                "repetitions must be non-negative, got {}",
                self.repetitions
            )));
        }
        Ok(())
    }

    /// Whether the item is still in the fixed-interval learning phase
    /// (fewer than two consecutive successes)
    pub fn is_learning(&self) -> bool {
        self.repetitions < 2
    }
}

/// Updated scheduling state produced by a review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// New ease factor, rounded to two decimals
    pub ease_factor: f64,
    /// New interval in days
    pub interval_days: i64,
    /// New consecutive-success count
    pub repetitions: i32,
    /// When the item should next be reviewed
    pub due_at: DateTime<Utc>,
}

impl ReviewOutcome {
    /// The state to persist for the next review of this item
    pub fn state(&self) -> Sm2State {
        Sm2State {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetitions: self.repetitions,
        }
    }
}

/// Outcome for one quality grade in a preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityOutcome {
    /// The grade being previewed
    pub quality: Quality,
    /// What the review would produce
    pub outcome: ReviewOutcome,
}

/// Projected outcomes for every quality grade against one state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPreview {
    /// One entry per grade, worst to best
    pub outcomes: Vec<QualityOutcome>,
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Tunable scheduling parameters
///
/// The defaults are the canonical SM-2 constants. `min_ease_factor` is a
/// hard floor regardless of configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Parameters {
    /// Ease floor (canonically 1.3)
    pub min_ease_factor: f64,
    /// Ease assigned to brand-new items (canonically 2.5)
    pub initial_ease_factor: f64,
    /// Interval after the first success (canonically 1 day)
    pub first_interval_days: i64,
    /// Interval after the second success (canonically 6 days)
    pub second_interval_days: i64,
}

impl Default for Sm2Parameters {
    fn default() -> Self {
        Self {
            min_ease_factor: MIN_EASE_FACTOR,
            initial_ease_factor: INITIAL_EASE_FACTOR,
            first_interval_days: FIRST_INTERVAL_DAYS,
            second_interval_days: SECOND_INTERVAL_DAYS,
        }
    }
}

/// SM-2 review scheduler
///
/// Stateless between calls; every method is a pure function of its inputs
/// and the configured parameters. The current time is always an explicit
/// argument so callers control the clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Scheduler {
    params: Sm2Parameters,
}

impl Sm2Scheduler {
    /// Scheduler with custom parameters
    pub fn new(params: Sm2Parameters) -> Self {
        Self { params }
    }

    /// The configured parameters
    pub fn params(&self) -> &Sm2Parameters {
        &self.params
    }

    /// Initial state for an item that has never been reviewed
    pub fn new_item(&self) -> Sm2State {
        Sm2State {
            ease_factor: self.params.initial_ease_factor,
            interval_days: self.params.first_interval_days,
            repetitions: 0,
        }
    }

    /// Compute the next scheduling state for a review
    ///
    /// Two conceptual phases: "learning" (repetitions 0 or 1, fixed
    /// intervals) and "reviewing" (ease-driven multiplicative growth). A
    /// failing grade transitions back to the start of learning from either
    /// phase; there is no terminal state.
    pub fn review(
        &self,
        state: &Sm2State,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome> {
        state.validate()?;

        let ease_factor = round_ease(
            (state.ease_factor + ease_delta(quality.score())).max(self.params.min_ease_factor),
        );

        let (interval_days, repetitions) = if !quality.is_success() {
            (self.params.first_interval_days, 0)
        } else {
            match state.repetitions {
                0 => (self.params.first_interval_days, 1),
                1 => (self.params.second_interval_days, 2),
                n => (
                    (state.interval_days as f64 * ease_factor).round() as i64,
                    n + 1,
                ),
            }
        };

        Ok(ReviewOutcome {
            ease_factor,
            interval_days,
            repetitions,
            due_at: now + Duration::days(interval_days),
        })
    }

    /// Project the outcome of every quality grade against one state
    pub fn preview(&self, state: &Sm2State, now: DateTime<Utc>) -> Result<ReviewPreview> {
        let outcomes = Quality::ALL
            .iter()
            .map(|&quality| {
                self.review(state, quality, now)
                    .map(|outcome| QualityOutcome { quality, outcome })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReviewPreview { outcomes })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_quality_from_score_rejects_out_of_range() {
        assert_eq!(Quality::from_score(6), Err(Sm2Error::QualityOutOfRange(6)));
        assert_eq!(
            Quality::from_score(-1),
            Err(Sm2Error::QualityOutOfRange(-1))
        );
        assert_eq!(Quality::from_score(5), Ok(Quality::Easy));
        assert_eq!(Quality::from_score(0), Ok(Quality::Blackout));
    }

    #[test]
    fn test_quality_success_boundary() {
        assert!(!Quality::Almost.is_success());
        assert!(Quality::Hard.is_success());
    }

    #[test]
    fn test_invalid_state_rejected() {
        let scheduler = Sm2Scheduler::default();
        for state in [
            Sm2State {
                ease_factor: f64::NAN,
                ..Default::default()
            },
            Sm2State {
                ease_factor: -2.5,
                ..Default::default()
            },
            Sm2State {
                interval_days: 0,
                ..Default::default()
            },
            Sm2State {
                repetitions: -1,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                scheduler.review(&state, Quality::Good, now()),
                Err(Sm2Error::InvalidState(_))
            ));
        }
    }

    #[test]
    fn test_first_successful_review() {
        let scheduler = Sm2Scheduler::default();
        let outcome = scheduler
            .review(&Sm2State::default(), Quality::Easy, now())
            .unwrap();
        assert_eq!(outcome.interval_days, 1);
        assert_eq!(outcome.repetitions, 1);
        assert_eq!(outcome.ease_factor, 2.6);
    }

    #[test]
    fn test_second_successful_review() {
        let scheduler = Sm2Scheduler::default();
        let state = Sm2State::new(2.6, 1, 1).unwrap();
        let outcome = scheduler.review(&state, Quality::Easy, now()).unwrap();
        assert_eq!(outcome.interval_days, 6);
        assert_eq!(outcome.repetitions, 2);
        assert_eq!(outcome.ease_factor, 2.7);
    }

    #[test]
    fn test_third_review_multiplies_by_new_ease() {
        let scheduler = Sm2Scheduler::default();
        let state = Sm2State::new(2.7, 6, 2).unwrap();
        let outcome = scheduler.review(&state, Quality::Easy, now()).unwrap();
        // New ease 2.8, round(6 * 2.8) = 17
        assert_eq!(outcome.ease_factor, 2.8);
        assert_eq!(outcome.interval_days, 17);
        assert_eq!(outcome.repetitions, 3);
    }

    #[test]
    fn test_failure_resets_regardless_of_state() {
        let scheduler = Sm2Scheduler::default();
        let state = Sm2State::new(2.7, 17, 3).unwrap();
        let outcome = scheduler.review(&state, Quality::Incorrect, now()).unwrap();
        assert_eq!(outcome.interval_days, 1);
        assert_eq!(outcome.repetitions, 0);
        // 2.7 - 0.54, still above the floor
        assert_eq!(outcome.ease_factor, 2.16);
    }

    #[test]
    fn test_ease_floor_enforced() {
        let scheduler = Sm2Scheduler::default();
        let state = Sm2State::new(1.3, 1, 0).unwrap();
        let outcome = scheduler
            .review(&state, Quality::Blackout, now())
            .unwrap();
        assert_eq!(outcome.ease_factor, 1.3);
    }

    #[test]
    fn test_repeated_failure_converges_to_reset_state() {
        let scheduler = Sm2Scheduler::default();
        let mut state = Sm2State::new(2.5, 40, 6).unwrap();
        for _ in 0..10 {
            let outcome = scheduler
                .review(&state, Quality::Blackout, now())
                .unwrap();
            state = outcome.state();
            assert_eq!(state.interval_days, 1);
            assert_eq!(state.repetitions, 0);
        }
        assert_eq!(state.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_perfect_streak_intervals_never_shrink() {
        let scheduler = Sm2Scheduler::default();
        let mut state = Sm2State::default();
        let mut previous_interval = 0;
        for _ in 0..12 {
            let outcome = scheduler.review(&state, Quality::Easy, now()).unwrap();
            assert!(outcome.interval_days >= previous_interval);
            previous_interval = outcome.interval_days;
            state = outcome.state();
        }
        // A year-plus out after a dozen perfect recalls
        assert!(previous_interval > 365);
    }

    #[test]
    fn test_due_date_offset_by_interval() {
        let scheduler = Sm2Scheduler::default();
        let at = now();
        let state = Sm2State::new(2.7, 6, 2).unwrap();
        let outcome = scheduler.review(&state, Quality::Easy, at).unwrap();
        assert_eq!(outcome.due_at, at + Duration::days(17));
    }

    #[test]
    fn test_preview_covers_all_grades() {
        let scheduler = Sm2Scheduler::default();
        let preview = scheduler.preview(&Sm2State::default(), now()).unwrap();
        assert_eq!(preview.outcomes.len(), 6);
        assert_eq!(preview.outcomes[0].quality, Quality::Blackout);
        assert_eq!(preview.outcomes[5].quality, Quality::Easy);
        // Failing grades reset, passing grades advance
        assert_eq!(preview.outcomes[0].outcome.repetitions, 0);
        assert_eq!(preview.outcomes[5].outcome.repetitions, 1);
    }

    #[test]
    fn test_new_item_uses_initial_parameters() {
        let scheduler = Sm2Scheduler::default();
        let state = scheduler.new_item();
        assert_eq!(state.ease_factor, INITIAL_EASE_FACTOR);
        assert_eq!(state.interval_days, FIRST_INTERVAL_DAYS);
        assert_eq!(state.repetitions, 0);
        assert!(state.is_learning());
    }
}
