// Ranking algorithms: top-K by reach, greedy unique-reach expansion,
// and shortest-path flow centrality

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::rn_interface::UserId;
use crate::rn_network::ReferralNetwork;
use crate::rn_reach::{total_reach, ReachIndex};

// ============================================================================
// Top-K by Reach
// ============================================================================

/// The `k` users with the largest total reach, descending.
///
/// `k == 0` yields an empty list. Tie order is implementation-defined
/// (currently registration order via the stable sort); callers must not
/// rely on it.
pub fn top_k(network: &ReferralNetwork, k: usize) -> Vec<UserId> {
    if k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(&UserId, usize)> = network
        .users()
        .map(|user| (user, total_reach(network, user)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(k);
    scored.into_iter().map(|(user, _)| user.clone()).collect()
}

// ============================================================================
// Unique-Reach Expansion
// ============================================================================

/// Greedy maximum-coverage influencer ranking.
///
/// Repeatedly selects the user whose reach set contains the most users not
/// yet covered by earlier picks, then folds that reach set into the covered
/// set. Stops as soon as the best remaining contribution is zero, so the
/// result usually names far fewer users than the network holds. Tie order is
/// implementation-defined (first candidate in registration order wins).
pub fn rank_by_unique_reach(network: &ReferralNetwork) -> Vec<UserId> {
    let index = ReachIndex::build(network);

    let mut remaining: Vec<&UserId> = network.users().collect();
    let mut covered: HashSet<UserId> = HashSet::new();
    let mut ranked: Vec<UserId> = Vec::new();

    while !remaining.is_empty() {
        let mut best: Option<usize> = None;
        let mut best_contribution = 0;

        for (i, user) in remaining.iter().enumerate() {
            let contribution = index.reach_set(user).map_or(0, |reach| {
                reach.iter().filter(|m| !covered.contains(m.as_str())).count()
            });
            if best.is_none() || contribution > best_contribution {
                best = Some(i);
                best_contribution = contribution;
            }
        }

        let best_index = match best {
            Some(i) => i,
            None => break,
        };
        // No remaining user adds new coverage
        if best_contribution == 0 {
            break;
        }

        let user = remaining.remove(best_index);
        if let Some(reach) = index.reach_set(user) {
            covered.extend(reach.iter().cloned());
        }
        ranked.push(user.clone());
    }

    ranked
}

// ============================================================================
// Flow Centrality
// ============================================================================

/// Flow (betweenness-style) centrality ranking.
///
/// A user v scores one point for every ordered pair (s, t) whose shortest
/// referral path passes through v, detected by
/// `dist(s, v) + dist(v, t) == dist(s, t)`. The forest structure makes
/// shortest paths unique, so the distance test cannot double-count. Every
/// known user appears in the result; pure leaves and roots that broker no
/// path score 0 and sort to the tail.
pub fn rank_by_flow_centrality(network: &ReferralNetwork) -> Vec<UserId> {
    let distances = all_pairs_distances(network);
    let users: Vec<&UserId> = network.users().collect();
    let mut scores = vec![0usize; users.len()];

    for s in &users {
        let from_s = match distances.get(s.as_str()) {
            Some(d) => d,
            None => continue,
        };
        for t in &users {
            if s == t {
                continue;
            }
            let dist_st = match from_s.get(t.as_str()) {
                Some(d) => *d,
                None => continue,
            };

            for (i, v) in users.iter().enumerate() {
                if v == s || v == t {
                    continue;
                }
                let dist_sv = match from_s.get(v.as_str()) {
                    Some(d) => *d,
                    None => continue,
                };
                let dist_vt = match distances.get(v.as_str()).and_then(|d| d.get(t.as_str())) {
                    Some(d) => *d,
                    None => continue,
                };
                if dist_sv + dist_vt == dist_st {
                    scores[i] += 1;
                }
            }
        }
    }

    let mut ranked: Vec<(&UserId, usize)> = users.into_iter().zip(scores).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(user, _)| user.clone()).collect()
}

/// All-pairs shortest hop distances over the forward relation, one BFS per
/// user. Pairs with no forward path are absent from the inner map.
fn all_pairs_distances(network: &ReferralNetwork) -> HashMap<UserId, HashMap<UserId, usize>> {
    let mut distances: HashMap<UserId, HashMap<UserId, usize>> =
        HashMap::with_capacity(network.user_count());

    for source in network.users() {
        let mut dist: HashMap<UserId, usize> = HashMap::new();
        dist.insert(source.clone(), 0);

        let mut queue: VecDeque<(&UserId, usize)> = VecDeque::new();
        queue.push_back((source, 0));

        while let Some((current, d)) = queue.pop_front() {
            for candidate in network.direct_referrals(current) {
                if !dist.contains_key(candidate.as_str()) {
                    dist.insert(candidate.clone(), d + 1);
                    queue.push_back((candidate, d + 1));
                }
            }
        }

        distances.insert(source.clone(), dist);
    }

    distances
}
