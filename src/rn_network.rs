// Referral store - directed forest of referrer -> candidate edges

use hashbrown::HashMap;
use indexmap::IndexMap;
use log::warn;

use crate::rn_interface::{ReferralError, UserId};

// ============================================================================
// Referral Store
// ============================================================================

/// The referral store: who referred whom.
///
/// Two co-maintained indices back the store. The forward index maps each
/// known user to the candidates they directly referred, in insertion order.
/// The reverse index maps a candidate to its single referrer.
///
/// Invariants held after every successful mutation:
/// - no user is its own referrer
/// - a candidate is assigned at most one referrer, ever
/// - following referrer links from any user terminates (directed forest)
/// - both endpoints of every accepted edge exist in the forward index
///
/// Single-writer: the validate-then-write sequence in `add_referral` is not
/// atomic, so concurrent mutation must be serialized externally. Read-only
/// queries may share an unchanging snapshot freely.
pub struct ReferralNetwork {
    /// Forward index: user -> directly referred candidates, insertion order
    referrals: IndexMap<UserId, Vec<UserId>>,

    /// Reverse index: candidate -> referrer
    referrers: HashMap<UserId, UserId>,
}

impl ReferralNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self {
            referrals: IndexMap::new(),
            referrers: HashMap::new(),
        }
    }

    /// Ensure `user` exists in the forward index. Idempotent, never fails.
    pub fn register(&mut self, user: &str) {
        if !self.referrals.contains_key(user) {
            self.referrals.insert(user.to_string(), Vec::new());
        }
    }

    /// Record a `referrer -> candidate` edge.
    ///
    /// Validation order (first failing check wins):
    /// 1. self-referral
    /// 2. candidate already referred
    /// 3. both endpoints are registered (kept even if the next check fails)
    /// 4. the edge would close a cycle through the referrer chain
    ///
    /// On rejection the store's edges are unchanged; only the endpoint
    /// registrations from step 3 persist.
    pub fn add_referral(&mut self, referrer: &str, candidate: &str) -> Result<(), ReferralError> {
        if referrer == candidate {
            warn!("referral rejected ({} -> {}): self-referral", referrer, candidate);
            return Err(ReferralError::SelfReferral);
        }

        if self.referrers.contains_key(candidate) {
            warn!(
                "referral rejected ({} -> {}): candidate already referred",
                referrer, candidate
            );
            return Err(ReferralError::AlreadyReferred);
        }

        self.register(referrer);
        self.register(candidate);

        if self.would_cycle(referrer, candidate) {
            warn!("referral rejected ({} -> {}): would create a cycle", referrer, candidate);
            return Err(ReferralError::WouldCycle);
        }

        if let Some(children) = self.referrals.get_mut(referrer) {
            children.push(candidate.to_string());
        }
        self.referrers
            .insert(candidate.to_string(), referrer.to_string());

        Ok(())
    }

    /// Walk the referrer chain upward from `referrer`; if it reaches
    /// `candidate`, the proposed edge would close a cycle. The walk
    /// terminates because the existing structure is a forest.
    fn would_cycle(&self, referrer: &str, candidate: &str) -> bool {
        let mut current = referrer;
        while let Some(next) = self.referrers.get(current) {
            if next == candidate {
                return true;
            }
            current = next;
        }
        false
    }

    /// Users directly referred by `user`, in insertion order.
    /// Empty for unknown users, never an error.
    pub fn direct_referrals(&self, user: &str) -> &[UserId] {
        self.referrals.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The referrer of `user`, if one has been assigned
    pub fn referrer_of(&self, user: &str) -> Option<&UserId> {
        self.referrers.get(user)
    }

    /// Whether `user` is known to the network
    pub fn contains(&self, user: &str) -> bool {
        self.referrals.contains_key(user)
    }

    /// Number of known users
    pub fn user_count(&self) -> usize {
        self.referrals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.referrals.is_empty()
    }

    /// All known users, in registration order
    pub fn users(&self) -> impl Iterator<Item = &UserId> {
        self.referrals.keys()
    }
}

impl Default for ReferralNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_valid_referral() {
        let mut network = ReferralNetwork::new();

        assert!(network.add_referral("A", "B").is_ok());
        assert_eq!(network.direct_referrals("A"), &["B".to_string()]);
        assert_eq!(network.referrer_of("B").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_direct_referrals_multiple() {
        let mut network = ReferralNetwork::new();

        network.add_referral("A", "B").unwrap();
        network.add_referral("A", "C").unwrap();

        let referrals = network.direct_referrals("A");
        assert_eq!(referrals.len(), 2);
        // Insertion order is preserved
        assert_eq!(referrals[0], "B");
        assert_eq!(referrals[1], "C");
    }

    #[test]
    fn test_direct_referrals_none_and_unknown() {
        let mut network = ReferralNetwork::new();

        network.register("A");
        assert!(network.direct_referrals("A").is_empty());

        // Unknown user degrades to empty, never an error
        assert!(network.direct_referrals("Z").is_empty());
        assert!(!network.contains("Z"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut network = ReferralNetwork::new();

        network.add_referral("A", "B").unwrap();
        network.register("A");
        network.register("A");

        assert_eq!(network.user_count(), 2);
        assert_eq!(network.direct_referrals("A").len(), 1);
    }

    #[test]
    fn test_rejects_self_referral() {
        let mut network = ReferralNetwork::new();

        let result = network.add_referral("A", "A");
        assert_eq!(result, Err(ReferralError::SelfReferral));

        // Rejected before registration: the store stays empty
        assert!(network.is_empty());
        assert!(network.referrer_of("A").is_none());
    }

    #[test]
    fn test_rejects_duplicate_referrer() {
        let mut network = ReferralNetwork::new();

        network.add_referral("A", "B").unwrap();
        let result = network.add_referral("C", "B");

        assert_eq!(result, Err(ReferralError::AlreadyReferred));
        // The original edge survives
        assert_eq!(network.direct_referrals("A"), &["B".to_string()]);
        assert_eq!(network.referrer_of("B").map(String::as_str), Some("A"));
        // "C" was never registered: the duplicate check fires before step 3
        assert!(!network.contains("C"));
    }

    #[test]
    fn test_rejects_direct_cycle() {
        let mut network = ReferralNetwork::new();

        network.add_referral("A", "B").unwrap();
        let result = network.add_referral("B", "A");

        assert_eq!(result, Err(ReferralError::WouldCycle));
        assert!(network.referrer_of("A").is_none());
        assert!(network.direct_referrals("B").is_empty());
    }

    #[test]
    fn test_rejects_indirect_cycle() {
        let mut network = ReferralNetwork::new();

        network.add_referral("A", "B").unwrap();
        network.add_referral("B", "C").unwrap();
        let result = network.add_referral("C", "A");

        assert_eq!(result, Err(ReferralError::WouldCycle));
        assert!(network.referrer_of("A").is_none());
        assert!(network.direct_referrals("C").is_empty());
    }

    #[test]
    fn test_root_can_still_be_referred() {
        let mut network = ReferralNetwork::new();

        // "A" is a referrer first, then becomes a candidate of "X"
        network.add_referral("A", "B").unwrap();
        assert!(network.add_referral("X", "A").is_ok());
        assert_eq!(network.referrer_of("A").map(String::as_str), Some("X"));

        // ...but the chain X -> A -> B still rejects B -> X
        assert_eq!(network.add_referral("B", "X"), Err(ReferralError::WouldCycle));
    }

    #[test]
    fn test_referrer_chain_always_terminates() {
        let mut network = ReferralNetwork::new();

        let edges = [
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("E", "A"),
            ("D", "A"), // rejected, A already referred by E
            ("D", "E"), // rejected, would cycle through E -> A -> .. -> D
        ];
        for (referrer, candidate) in edges {
            let _ = network.add_referral(referrer, candidate);
        }

        // Walk the referrer chain from every user; must terminate within
        // user_count steps
        for user in network.users() {
            let mut steps = 0;
            let mut current = user;
            while let Some(next) = network.referrer_of(current) {
                current = next;
                steps += 1;
                assert!(steps <= network.user_count(), "cycle detected from {}", user);
            }
        }
    }

    #[test]
    fn test_users_in_registration_order() {
        let mut network = ReferralNetwork::new();

        network.add_referral("B", "A").unwrap();
        network.add_referral("C", "D").unwrap();

        let users: Vec<&str> = network.users().map(String::as_str).collect();
        assert_eq!(users, ["B", "A", "C", "D"]);
    }
}
