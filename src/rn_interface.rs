// Shared types for the referral network

use std::fmt;

/// Opaque user identifier. Users have no entity object of their own;
/// identity is the key itself.
pub type UserId = String;

// ============================================================================
// Referral Errors
// ============================================================================

/// Reason a referral was rejected
///
/// Rejections are reported, not raised: `add_referral` returns this in an
/// `Err` and leaves the store's edges untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralError {
    /// Referrer and candidate are the same user
    SelfReferral,

    /// Candidate already has a referrer (single-referrer invariant)
    AlreadyReferred,

    /// Edge would close a cycle through the referrer chain
    WouldCycle,
}

impl fmt::Display for ReferralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferralError::SelfReferral => write!(f, "users cannot refer themselves"),
            ReferralError::AlreadyReferred => write!(f, "candidate has already been referred"),
            ReferralError::WouldCycle => write!(f, "referral would create a cycle"),
        }
    }
}
