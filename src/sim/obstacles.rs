//! Obstacle generation, movement and scoring predicates
//!
//! Each piece is pure; `tick` composes them in a fixed order.

use rand::Rng;

use super::difficulty::Difficulty;
use super::state::Obstacle;
use crate::tuning::Tuning;

/// Horizontal distance obstacles travel this step
#[inline]
pub fn travel(difficulty: &Difficulty, dt: f32, tuning: &Tuning) -> f32 {
    difficulty.obstacle_speed * dt * tuning.obstacles.frame_normalization
}

/// Obstacle moved left by `distance`
#[inline]
pub fn advanced(obstacle: &Obstacle, distance: f32) -> Obstacle {
    Obstacle {
        x: obstacle.x - distance,
        ..*obstacle
    }
}

/// Whether the obstacle is far enough past the left edge to drop
#[inline]
pub fn is_retired(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.x <= -tuning.obstacles.width - tuning.obstacles.retire_margin
}

/// Whether the obstacle's trailing edge has just passed the body and it
/// has not been scored yet
#[inline]
pub fn passes_body(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    !obstacle.cleared && obstacle.right(tuning.obstacles.width) < tuning.body.x
}

/// Whether enough simulated time has gone by to spawn again
#[inline]
pub fn spawn_due(since_spawn_ms: f32, difficulty: &Difficulty) -> bool {
    since_spawn_ms >= difficulty.spawn_interval_ms
}

/// Inclusive range the top barrier height is drawn from for a given gap
pub fn split_range(gap: f32, tuning: &Tuning) -> (f32, f32) {
    let min = tuning.obstacles.min_barrier_height;
    let max = tuning.field.height - gap - min;
    if max < min {
        // Only reachable with an unvalidated tuning
        log::warn!("Field {} too short for gap {}", tuning.field.height, gap);
        let mid = (tuning.field.height - gap) / 2.0;
        (mid, mid)
    } else {
        (min, max)
    }
}

/// New obstacle at the right edge of the field with the current gap
pub fn spawn<R: Rng>(rng: &mut R, difficulty: &Difficulty, tuning: &Tuning) -> Obstacle {
    let gap = difficulty.obstacle_gap;
    let (lo, hi) = split_range(gap, tuning);
    let top_height = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    Obstacle {
        x: tuning.field.width,
        top_height,
        bottom_height: tuning.field.height - top_height - gap,
        cleared: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle(x: f32) -> Obstacle {
        Obstacle {
            x,
            top_height: 100.0,
            bottom_height: 150.0,
            cleared: false,
        }
    }

    #[test]
    fn test_travel_is_frame_rate_independent() {
        let tuning = Tuning::default();
        let d = Difficulty::initial(&tuning.difficulty);
        let one = travel(&d, 1.0 / 30.0, &tuning);
        let two = travel(&d, 1.0 / 60.0, &tuning) * 2.0;
        assert!((one - two).abs() < 1e-4);
        assert!((travel(&d, 1.0 / 60.0, &tuning) - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_advance_keeps_geometry() {
        let moved = advanced(&obstacle(300.0), 12.5);
        assert_eq!(moved.x, 287.5);
        assert_eq!(moved.top_height, 100.0);
        assert_eq!(moved.bottom_height, 150.0);
    }

    #[test]
    fn test_retire_margin() {
        let tuning = Tuning::default();
        assert!(!is_retired(&obstacle(-60.0), &tuning));
        assert!(!is_retired(&obstacle(-69.0), &tuning));
        assert!(is_retired(&obstacle(-70.0), &tuning));
    }

    #[test]
    fn test_passes_body_once() {
        let tuning = Tuning::default();
        // Trailing edge at 100 is level with the body's left edge
        assert!(!passes_body(&obstacle(40.0), &tuning));
        assert!(passes_body(&obstacle(39.0), &tuning));

        let mut cleared = obstacle(39.0);
        cleared.cleared = true;
        assert!(!passes_body(&cleared, &tuning));
    }

    #[test]
    fn test_spawn_due() {
        let d = Difficulty::initial(&Tuning::default().difficulty);
        assert!(!spawn_due(1799.0, &d));
        assert!(spawn_due(1800.0, &d));
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let tuning = Tuning::default();
        let d = Difficulty::initial(&tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(5);
        let o = spawn(&mut rng, &d, &tuning);
        assert_eq!(o.x, tuning.field.width);
        assert!(!o.cleared);
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let tuning = Tuning::default();
        let d = Difficulty::initial(&tuning.difficulty);
        let mut a = Pcg32::seed_from_u64(77);
        let mut b = Pcg32::seed_from_u64(77);
        for _ in 0..10 {
            assert_eq!(spawn(&mut a, &d, &tuning), spawn(&mut b, &d, &tuning));
        }
    }

    #[test]
    fn test_short_viewport_keeps_barrier_minimums() {
        let tuning = Tuning::for_viewport(640.0, 300.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut d = Difficulty::initial(&tuning.difficulty);
        for score in 1..=60 {
            d = d.on_score(score, &tuning.difficulty);
            let o = spawn(&mut rng, &d, &tuning);
            assert!(o.top_height >= 50.0, "top {}", o.top_height);
            assert!(o.bottom_height >= 50.0 - 1e-3, "bottom {}", o.bottom_height);
            assert!((o.gap(tuning.field.height) - d.obstacle_gap).abs() < 1e-3);
        }
    }

    proptest! {
        #[test]
        fn prop_split_respects_minimums(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let d = Difficulty::initial(&tuning.difficulty);
            let mut rng = Pcg32::seed_from_u64(seed);
            let o = spawn(&mut rng, &d, &tuning);
            prop_assert!((o.top_height + o.bottom_height - 250.0).abs() < 1e-3);
            prop_assert!(o.top_height >= 50.0);
            prop_assert!(o.bottom_height >= 50.0 - 1e-3);
        }

        #[test]
        fn prop_gap_matches_difficulty(seed in any::<u64>(), gap in 110.0f32..150.0) {
            let tuning = Tuning::default();
            let mut d = Difficulty::initial(&tuning.difficulty);
            d.obstacle_gap = gap;
            let mut rng = Pcg32::seed_from_u64(seed);
            let o = spawn(&mut rng, &d, &tuning);
            prop_assert!((o.gap(tuning.field.height) - gap).abs() < 1e-3);
        }
    }
}
