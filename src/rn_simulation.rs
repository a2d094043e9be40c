// Expected-value growth simulation over referrer cohorts

use std::collections::VecDeque;

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of the cohort growth model
#[derive(Debug, Clone)]
pub struct GrowthConfig {
    /// Referrers active on day zero (default: 100)
    pub initial_referrers: f64,

    /// Expected referrals a single referrer makes before going inactive
    /// (default: 10)
    pub referral_capacity: f64,

    /// Hard cap on simulated days in `days_to_target` (default: 1000)
    pub max_days: u64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            initial_referrers: 100.0,
            referral_capacity: 10.0,
            max_days: 1000,
        }
    }
}

/// A group of referrers that joined on the same day.
///
/// `referrals_made` is the expected per-member referral total so far; once
/// it reaches the capacity the whole cohort retires.
struct Cohort {
    size: f64,
    referrals_made: f64,
}

// ============================================================================
// Simulation
// ============================================================================

/// Cumulative expected referral totals for each of `days` days, with the
/// default model parameters.
///
/// Each day every active referrer produces `p` expected referrals; the day's
/// production joins the active pool as a fresh cohort the following day.
/// Cohorts retire at capacity. `p <= 0` yields a flat vector of zeros.
pub fn simulate(p: f64, days: usize) -> Vec<f64> {
    simulate_with(&GrowthConfig::default(), p, days)
}

/// `simulate` with explicit model parameters
pub fn simulate_with(config: &GrowthConfig, p: f64, days: usize) -> Vec<f64> {
    if p <= 0.0 || days == 0 {
        return vec![0.0; days];
    }

    let mut cohorts: VecDeque<Cohort> = VecDeque::new();
    cohorts.push_back(Cohort {
        size: config.initial_referrers,
        referrals_made: 0.0,
    });
    let mut active = config.initial_referrers;
    let mut cumulative = 0.0;
    let mut daily_totals = Vec::with_capacity(days);

    for _ in 0..days {
        // Fewer than one whole active referrer: growth has stalled
        if active < 1.0 {
            daily_totals.push(cumulative);
            continue;
        }

        let new_today = active * p;
        cumulative += new_today;
        daily_totals.push(cumulative);

        age_and_retire(&mut cohorts, &mut active, p, config.referral_capacity);

        if new_today > 0.0 {
            cohorts.push_back(Cohort {
                size: new_today,
                referrals_made: 0.0,
            });
            active += new_today;
        }
    }

    daily_totals
}

/// Days until cumulative referrals meet `target`, with the default model
/// parameters.
///
/// `Some(0)` for a zero target. `None` when the target is unreachable:
/// non-positive `p`, the day cap exceeded, or the referrer pool exhausted.
pub fn days_to_target(p: f64, target: u64) -> Option<u64> {
    days_to_target_with(&GrowthConfig::default(), p, target)
}

/// `days_to_target` with explicit model parameters
pub fn days_to_target_with(config: &GrowthConfig, p: f64, target: u64) -> Option<u64> {
    if target == 0 {
        return Some(0);
    }
    if p <= 0.0 {
        return None;
    }

    let mut cohorts: VecDeque<Cohort> = VecDeque::new();
    cohorts.push_back(Cohort {
        size: config.initial_referrers,
        referrals_made: 0.0,
    });
    let mut active = config.initial_referrers;
    let mut cumulative = 0.0;
    let mut days_elapsed = 0u64;

    while cumulative < target as f64 {
        days_elapsed += 1;
        if days_elapsed > config.max_days {
            return None;
        }
        if active < 1.0 {
            return None;
        }

        let new_today = active * p;
        cumulative += new_today;

        age_and_retire(&mut cohorts, &mut active, p, config.referral_capacity);

        if new_today > 0.0 {
            cohorts.push_back(Cohort {
                size: new_today,
                referrals_made: 0.0,
            });
            active += new_today;
        }
    }

    Some(days_elapsed)
}

/// Advance every cohort by one day of referring and retire those that hit
/// the capacity, shrinking the active pool accordingly.
fn age_and_retire(cohorts: &mut VecDeque<Cohort>, active: &mut f64, p: f64, capacity: f64) {
    let mut surviving = VecDeque::with_capacity(cohorts.len());
    while let Some(mut cohort) = cohorts.pop_front() {
        cohort.referrals_made += p;
        if cohort.referrals_made < capacity {
            surviving.push_back(cohort);
        } else {
            *active -= cohort.size;
        }
    }
    *cohorts = surviving;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_simulate_normal_growth() {
        // Day 1: 100 * 0.1 = 10. Day 2: 110 * 0.1 = 11, total 21.
        // Day 3: 121 * 0.1 = 12.1, total 33.1.
        let totals = simulate(0.1, 3);

        assert_eq!(totals.len(), 3);
        let expected = [10.0, 21.0, 33.1];
        for (actual, want) in totals.iter().zip(expected) {
            assert!((actual - want).abs() < EPS, "got {} want {}", actual, want);
        }
    }

    #[test]
    fn test_simulate_no_growth() {
        assert_eq!(simulate(0.0, 5), vec![0.0; 5]);
        assert_eq!(simulate(-0.5, 3), vec![0.0; 3]);
    }

    #[test]
    fn test_simulate_zero_days() {
        assert!(simulate(0.1, 0).is_empty());
    }

    #[test]
    fn test_simulate_is_monotonic() {
        let totals = simulate(0.25, 40);
        for window in totals.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_simulate_capacity_exhaustion_plateaus() {
        // Each referrer produces at most 0.6 expected referrals before
        // retiring, so the pool dies out and the totals flatten
        let config = GrowthConfig {
            initial_referrers: 100.0,
            referral_capacity: 0.5,
            max_days: 1000,
        };
        let totals = simulate_with(&config, 0.3, 60);

        assert!((totals[0] - 30.0).abs() < EPS);
        assert!((totals[1] - 69.0).abs() < EPS);
        assert!((totals[2] - 89.7).abs() < EPS);
        // Plateau reached well before day 60
        let last = totals[totals.len() - 1];
        assert_eq!(last, totals[totals.len() - 2]);
        assert!(last < 200.0);
    }

    #[test]
    fn test_days_to_target_basic() {
        assert_eq!(days_to_target(0.1, 10), Some(1));
        assert_eq!(days_to_target(0.1, 21), Some(2));
        assert_eq!(days_to_target(0.1, 205), Some(12));
    }

    #[test]
    fn test_days_to_target_zero_target() {
        assert_eq!(days_to_target(0.5, 0), Some(0));
        assert_eq!(days_to_target(0.0, 0), Some(0));
    }

    #[test]
    fn test_days_to_target_no_probability() {
        assert_eq!(days_to_target(0.0, 100), None);
        assert_eq!(days_to_target(-1.0, 100), None);
    }

    #[test]
    fn test_days_to_target_exhausted_pool() {
        // Pool dies out long before a large target is met
        let config = GrowthConfig {
            initial_referrers: 100.0,
            referral_capacity: 0.5,
            max_days: 1000,
        };
        assert_eq!(days_to_target_with(&config, 0.3, 1_000_000), None);
    }

    #[test]
    fn test_days_to_target_respects_day_cap() {
        let config = GrowthConfig {
            max_days: 5,
            ..GrowthConfig::default()
        };
        // Reachable in principle, but not within 5 days at p = 0.1
        assert_eq!(days_to_target_with(&config, 0.1, 1_000), None);
    }
}
