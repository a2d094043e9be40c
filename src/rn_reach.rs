// Reachability over the referral forest

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::rn_interface::UserId;
use crate::rn_network::ReferralNetwork;

/// Count of all users transitively reachable from `user` via forward edges.
///
/// Plain BFS from the user's direct candidates. A user never counts itself;
/// unknown users and users with no referrals yield 0. No visited set is
/// needed because the store guarantees acyclicity.
pub fn total_reach(network: &ReferralNetwork, user: &str) -> usize {
    let mut queue: VecDeque<&str> = network
        .direct_referrals(user)
        .iter()
        .map(String::as_str)
        .collect();
    let mut count = queue.len();

    while let Some(current) = queue.pop_front() {
        for candidate in network.direct_referrals(current) {
            queue.push_back(candidate);
            count += 1;
        }
    }

    count
}

// ============================================================================
// Reach Index
// ============================================================================

/// Per-user reach sets for every known user, built in one shared pass.
///
/// A user's reach set is the union of its direct candidates and each
/// candidate's own reach set. Built with an explicit post-order stack and a
/// memo table rather than native recursion, so deep referral chains cannot
/// overflow the call stack. Each node is computed exactly once.
pub struct ReachIndex {
    sets: HashMap<UserId, HashSet<UserId>>,
}

impl ReachIndex {
    /// Build reach sets for every user in `network`
    pub fn build(network: &ReferralNetwork) -> Self {
        let mut sets: HashMap<UserId, HashSet<UserId>> = HashMap::with_capacity(network.user_count());

        for user in network.users() {
            if sets.contains_key(user.as_str()) {
                continue;
            }

            // (node, children_scheduled) pairs; a node is finalized only
            // after all of its candidates have been
            let mut stack: Vec<(&UserId, bool)> = vec![(user, false)];
            while let Some((node, children_scheduled)) = stack.pop() {
                if sets.contains_key(node.as_str()) {
                    continue;
                }

                if children_scheduled {
                    let mut reach: HashSet<UserId> = HashSet::new();
                    for candidate in network.direct_referrals(node) {
                        reach.insert(candidate.clone());
                        if let Some(candidate_reach) = sets.get(candidate.as_str()) {
                            reach.extend(candidate_reach.iter().cloned());
                        }
                    }
                    sets.insert(node.clone(), reach);
                } else {
                    stack.push((node, true));
                    for candidate in network.direct_referrals(node) {
                        if !sets.contains_key(candidate.as_str()) {
                            stack.push((candidate, false));
                        }
                    }
                }
            }
        }

        Self { sets }
    }

    /// The full reach set of `user`, or `None` for unknown users
    pub fn reach_set(&self, user: &str) -> Option<&HashSet<UserId>> {
        self.sets.get(user)
    }

    /// Reach count of `user`; 0 for unknown users
    pub fn total_reach(&self, user: &str) -> usize {
        self.sets.get(user).map_or(0, HashSet::len)
    }
}
