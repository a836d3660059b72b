//! SM-2 core formulas
//!
//! Pure arithmetic shared by the scheduler. Default constants live here;
//! the scheduler applies them through [`Sm2Parameters`](super::Sm2Parameters)
//! so deployments can tune the learning steps without touching the math.

/// Lower bound for the ease factor. Below this the algorithm degenerates
/// into reviewing the same item every day forever.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to an item that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Interval after the first successful review.
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second consecutive successful review.
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Ease factor adjustment for a quality score.
///
/// EF delta = 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)
///
/// Positive only for a perfect recall (q = 5); every hesitation costs ease.
pub fn ease_delta(quality: u8) -> f64 {
    let q = quality as f64;
    0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

/// New ease factor for a review, floored at [`MIN_EASE_FACTOR`] and rounded
/// to two decimal places.
pub fn next_ease_factor(previous: f64, quality: u8) -> f64 {
    round_ease((previous + ease_delta(quality)).max(MIN_EASE_FACTOR))
}

/// Round an ease factor to two decimal places.
///
/// The stored ease feeds back into every subsequent interval; rounding keeps
/// persisted values stable across float formatting round-trips.
pub fn round_ease(ease: f64) -> f64 {
    (ease * 100.0).round() / 100.0
}

/// New (interval, repetitions) for a review. First matching rule wins:
///
/// 1. q < 3: the item was forgotten, back to day one with zero repetitions
/// 2. first success: 1 day
/// 3. second success: 6 days
/// 4. thereafter: round(previous interval * new ease factor)
pub fn next_step(
    quality: u8,
    previous_interval: i64,
    previous_repetitions: i32,
    new_ease_factor: f64,
) -> (i64, i32) {
    if quality < 3 {
        return (FIRST_INTERVAL_DAYS, 0);
    }
    let interval = match previous_repetitions {
        0 => FIRST_INTERVAL_DAYS,
        1 => SECOND_INTERVAL_DAYS,
        _ => (previous_interval as f64 * new_ease_factor).round() as i64,
    };
    (interval, previous_repetitions + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_delta_perfect_recall() {
        assert!((ease_delta(5) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_ease_delta_monotone_in_quality() {
        for q in 0..5u8 {
            assert!(ease_delta(q) < ease_delta(q + 1));
        }
    }

    #[test]
    fn test_next_ease_factor_floor() {
        // q = 0 costs 0.8 ease; from the floor it must stay at the floor
        assert_eq!(next_ease_factor(MIN_EASE_FACTOR, 0), MIN_EASE_FACTOR);
        assert_eq!(next_ease_factor(1.5, 0), MIN_EASE_FACTOR);
    }

    #[test]
    fn test_next_ease_factor_rounds_to_two_decimals() {
        // 2.5 + (0.1 - 1 * (0.08 + 0.02)) = 2.5 exactly; q = 3 gives
        // 2.5 - 0.14 = 2.36, already two decimals after rounding
        assert_eq!(next_ease_factor(2.5, 4), 2.5);
        assert_eq!(next_ease_factor(2.5, 3), 2.36);
        assert_eq!(next_ease_factor(2.5, 5), 2.6);
    }

    #[test]
    fn test_next_step_failure_resets() {
        for q in 0..3u8 {
            assert_eq!(next_step(q, 42, 7, 2.5), (1, 0));
        }
    }

    #[test]
    fn test_next_step_learning_phase() {
        assert_eq!(next_step(4, 1, 0, 2.5), (1, 1));
        assert_eq!(next_step(4, 1, 1, 2.5), (6, 2));
    }

    #[test]
    fn test_next_step_review_phase_multiplies() {
        // round(6 * 2.8) = 17
        assert_eq!(next_step(5, 6, 2, 2.8), (17, 3));
        // round(17 * 2.5) = 43 (42.5 rounds away from zero)
        assert_eq!(next_step(4, 17, 3, 2.5), (43, 4));
    }
}
