//! Obstacle and cloud spawn scheduling
//!
//! Obstacles arrive as an exponential point process floored by a minimum
//! interval: the time an obstacle needs to cover the minimum gap at the current
//! scroll speed. Clouds follow the same pattern with a fixed mean.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::speed_px_per_sec;
use super::error::SimError;
use super::state::ObstacleKind;
use crate::tuning::{ElevationPolicy, Tuning};

/// Next scheduled spawn times (seconds, clock time)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub next_obstacle_at: f64,
    pub next_cloud_at: f64,
}

impl SpawnSchedule {
    /// Schedule both spawns from `now`
    pub fn new<R: Rng + ?Sized>(now: f64, speed: f32, rng: &mut R, tuning: &Tuning) -> Self {
        Self {
            next_obstacle_at: now + next_obstacle_interval(rng, speed, tuning),
            next_cloud_at: now + next_cloud_interval(rng, tuning),
        }
    }

    pub fn obstacle_due(&self, now: f64) -> bool {
        now >= self.next_obstacle_at
    }

    pub fn cloud_due(&self, now: f64) -> bool {
        now >= self.next_cloud_at
    }
}

/// Minimum gap between obstacles (px). Grows linearly above the threshold speed.
pub fn min_gap_px(speed: f32, tuning: &Tuning) -> f32 {
    tuning.min_gap_base() + (speed - tuning.gap_growth_threshold).max(0.0) * tuning.gap_growth_px
}

/// Shortest allowed time between two obstacle spawns at `speed`
pub fn min_interval(speed: f32, tuning: &Tuning) -> f64 {
    let seconds = min_gap_px(speed, tuning) / speed_px_per_sec(speed, tuning);
    (seconds as f64).max(tuning.spawn_floor)
}

/// Exponentially distributed sample with the given mean
pub fn sample_exp<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    let u: f64 = rng.random();
    -(1.0 - u).ln() * mean
}

/// Draw the time until the next obstacle.
///
/// Never below [`min_interval`]: short draws are pushed up by a small random
/// pad, then a symmetric jitter breaks up any visible rhythm.
pub fn next_obstacle_interval<R: Rng + ?Sized>(rng: &mut R, speed: f32, tuning: &Tuning) -> f64 {
    let min = min_interval(speed, tuning);
    let mut interval = sample_exp(rng, min * tuning.spawn_mean_factor);
    if interval < min {
        interval = min + rng.random::<f64>() * tuning.spawn_pad * min;
    }
    let jitter = (rng.random::<f64>() * 2.0 - 1.0) * tuning.spawn_jitter;
    interval += jitter * interval;
    interval.max(min)
}

/// Draw the time until the next cloud
pub fn next_cloud_interval<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f64 {
    sample_exp(rng, tuning.cloud_mean).max(tuning.cloud_floor)
}

/// Uniform choice over all obstacle kinds
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// Elevation for a new obstacle under the configured policy
pub fn choose_elevation<R: Rng + ?Sized>(
    rng: &mut R,
    kind: ObstacleKind,
    policy: &ElevationPolicy,
) -> f32 {
    match *policy {
        ElevationPolicy::GroundOnly => 0.0,
        ElevationPolicy::Randomized {
            kind: lifted,
            chance,
            max_elevation,
        } => {
            if kind == lifted && rng.random::<f64>() < chance {
                rng.random::<f32>() * max_elevation
            } else {
                0.0
            }
        }
    }
}

/// Check an interval before scheduling with it
pub fn validate_interval(interval: f64) -> Result<f64, SimError> {
    if interval.is_finite() && interval > 0.0 {
        Ok(interval)
    } else {
        Err(SimError::InvalidInterval(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DeviceKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_min_gap_grows_above_threshold() {
        let tuning = Tuning::default();
        assert_eq!(min_gap_px(3.0, &tuning), 220.0);
        assert_eq!(min_gap_px(4.0, &tuning), 220.0);
        assert!((min_gap_px(6.0, &tuning) - 264.0).abs() < 1e-4);

        let touch = Tuning::for_device(DeviceKind::Touch);
        assert_eq!(min_gap_px(3.0, &touch), 300.0);
    }

    #[test]
    fn test_min_interval_reference_values() {
        let tuning = Tuning::default();
        // 220 px at 252 px/s
        assert!((min_interval(4.2, &tuning) - 220.0 / 252.0).abs() < 1e-3);
        // Floor applies when the gap is covered very fast
        let fast = Tuning {
            min_gap_px_desktop: 10.0,
            ..Tuning::default()
        };
        assert_eq!(min_interval(11.0, &fast), fast.spawn_floor);
    }

    #[test]
    fn test_sample_exp_mean() {
        let mut rng = Pcg32::seed_from_u64(42);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| sample_exp(&mut rng, 2.0)).sum();
        let mean = total / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean = {mean}");
    }

    #[test]
    fn test_cloud_interval_floor() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(next_cloud_interval(&mut rng, &tuning) >= tuning.cloud_floor);
        }
    }

    #[test]
    fn test_both_kinds_appear() {
        let mut rng = Pcg32::seed_from_u64(11);
        let kinds: Vec<_> = (0..100).map(|_| choose_kind(&mut rng)).collect();
        assert!(kinds.contains(&ObstacleKind::Crystal));
        assert!(kinds.contains(&ObstacleKind::Fire));
    }

    #[test]
    fn test_elevation_policy() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(
            choose_elevation(&mut rng, ObstacleKind::Fire, &ElevationPolicy::GroundOnly),
            0.0
        );

        let always = ElevationPolicy::Randomized {
            kind: ObstacleKind::Fire,
            chance: 1.0,
            max_elevation: 40.0,
        };
        for _ in 0..100 {
            let e = choose_elevation(&mut rng, ObstacleKind::Fire, &always);
            assert!((0.0..40.0).contains(&e));
            assert_eq!(choose_elevation(&mut rng, ObstacleKind::Crystal, &always), 0.0);
        }
    }

    #[test]
    fn test_schedule_due() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let schedule = SpawnSchedule::new(100.0, tuning.base_speed, &mut rng, &tuning);
        assert!(!schedule.obstacle_due(100.0));
        assert!(schedule.obstacle_due(schedule.next_obstacle_at));
        assert!(schedule.next_cloud_at >= 101.0);
    }

    #[test]
    fn test_validate_interval() {
        assert_eq!(validate_interval(0.5), Ok(0.5));
        assert!(validate_interval(f64::NAN).is_err());
        assert!(validate_interval(0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_interval_never_below_min(seed in any::<u64>(), speed in 2.6f32..11.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let min = min_interval(speed, &tuning);
            for _ in 0..50 {
                prop_assert!(next_obstacle_interval(&mut rng, speed, &tuning) >= min);
            }
        }
    }
}
