//! # rnRust - Referral Network Analytics
//!
//! A Rust implementation of a referral-program model: who referred whom, how
//! far each person's referral chain reaches, and which participants act as
//! key connectors in the resulting structure.
//!
//! ## Core Components
//!
//! - **ReferralNetwork**: The referral store - a directed forest of
//!   referrer -> candidate edges with cycle-safe validated insertion
//! - **Reachability**: Per-user transitive reach counts and memoized
//!   all-users reach sets
//! - **Rankings**: Top-K by reach, greedy unique-reach-expansion influencer
//!   selection, and shortest-path flow centrality
//! - **Growth Simulation**: Expected-value cohort projection of cumulative
//!   referrals and bonus calibration against a hiring target
//!
//! ## Usage
//!
//! ```
//! use rn_rust::{ReferralNetwork, top_k, total_reach};
//!
//! let mut network = ReferralNetwork::new();
//! network.add_referral("alice", "bob").unwrap();
//! network.add_referral("bob", "carol").unwrap();
//!
//! assert_eq!(total_reach(&network, "alice"), 2);
//! assert_eq!(top_k(&network, 1), vec!["alice".to_string()]);
//!
//! // Invalid referrals are rejected, never panicking
//! assert!(network.add_referral("carol", "alice").is_err());
//! ```
//!
//! The store is single-writer: serialize mutation externally if multiple
//! threads are involved. All analytics are read-only over a snapshot.

// Core referral graph modules
pub mod rn_interface;
pub mod rn_network;
pub mod rn_ranking;
pub mod rn_reach;

// Growth projection and bonus calibration
pub mod rn_optimization;
pub mod rn_simulation;

// Re-export commonly used types
pub use rn_interface::{ReferralError, UserId};
pub use rn_network::ReferralNetwork;
pub use rn_ranking::{rank_by_flow_centrality, rank_by_unique_reach, top_k};
pub use rn_reach::{total_reach, ReachIndex};
// Public API for growth projection (used by callers to plan referral bonuses)
pub use rn_optimization::{min_bonus_for_target, MAX_BONUS_SEARCH_RANGE};
pub use rn_simulation::{days_to_target, simulate, GrowthConfig};
