// Referral bonus calibration

use crate::rn_simulation::days_to_target;

/// Upper bound of the bonus search space, in dollars. No bonus is assumed
/// to ever need to be higher than this.
pub const MAX_BONUS_SEARCH_RANGE: f64 = 5000.0;

/// Binary search stops once the bracket is narrower than this
pub const BONUS_SEARCH_EPS: f64 = 0.01;

/// Results are rounded up to this increment, in dollars
const BONUS_ROUNDING: f64 = 10.0;

/// Minimum bonus (in dollars, rounded up to $10) whose implied adoption
/// probability meets `target_hires` within `days`.
///
/// `adoption_prob` maps a bonus value to a per-person daily referral
/// probability; it is assumed monotonically non-decreasing. Returns
/// `Some(0)` for a zero target and `None` when even the maximum bonus
/// cannot meet the target in time.
pub fn min_bonus_for_target(
    days: u64,
    target_hires: u64,
    adoption_prob: impl Fn(f64) -> f64,
) -> Option<u64> {
    min_bonus_for_target_eps(days, target_hires, adoption_prob, BONUS_SEARCH_EPS)
}

/// `min_bonus_for_target` with an explicit search tolerance
pub fn min_bonus_for_target_eps(
    days: u64,
    target_hires: u64,
    adoption_prob: impl Fn(f64) -> f64,
    eps: f64,
) -> Option<u64> {
    if target_hires == 0 {
        return Some(0);
    }

    let mut low = 0.0;
    let mut high = MAX_BONUS_SEARCH_RANGE;
    let mut min_working: Option<f64> = None;

    while high - low > eps {
        let mid = (low + high) / 2.0;
        let p = adoption_prob(mid);

        if meets_target(p, target_hires, days) {
            // A smaller bonus may still work; keep shrinking
            min_working = Some(mid);
            high = mid;
        } else {
            low = mid;
        }
    }

    let bonus = match min_working {
        Some(b) => b,
        // The bracket never qualified; probe the cap itself as a last resort
        None if meets_target(adoption_prob(MAX_BONUS_SEARCH_RANGE), target_hires, days) => {
            MAX_BONUS_SEARCH_RANGE
        }
        None => return None,
    };

    Some(((bonus / BONUS_ROUNDING).ceil() * BONUS_ROUNDING) as u64)
}

fn meets_target(p: f64, target_hires: u64, days: u64) -> bool {
    match days_to_target(p, target_hires) {
        Some(needed) => needed <= days,
        None => false,
    }
}
