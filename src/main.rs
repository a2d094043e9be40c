use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simple_logger::SimpleLogger;

use rn_rust::{
    days_to_target, min_bonus_for_target, rank_by_flow_centrality, rank_by_unique_reach, simulate,
    top_k, total_reach, ReferralNetwork,
};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("starting");

    let num_users = 500;
    let mut seed = [0u8; 32];
    rand::thread_rng().fill(&mut seed);
    let mut rng = StdRng::from_seed(seed);

    // Grow a random referral forest: each newcomer is referred by a random
    // earlier user, with occasional extra roots
    let mut network = ReferralNetwork::new();
    network.register("user_0000");

    let mut rejected = 0;
    for i in 1..num_users {
        let candidate = format!("user_{:04}", i);
        if rng.gen_bool(0.05) {
            // A fresh root joining without a referrer
            network.register(&candidate);
            continue;
        }
        let referrer = format!("user_{:04}", rng.gen_range(0..i));
        if network.add_referral(&referrer, &candidate).is_err() {
            rejected += 1;
        }
    }

    info!(
        "network built: {} users, {} rejected referrals",
        network.user_count(),
        rejected
    );

    let top = top_k(&network, 5);
    for user in &top {
        info!("top referrer {} reach={}", user, total_reach(&network, user));
    }

    let influencers = rank_by_unique_reach(&network);
    info!(
        "unique-reach influencers: {} users cover the whole network",
        influencers.len()
    );
    for user in influencers.iter().take(5) {
        info!("  coverage pick: {}", user);
    }

    let brokers = rank_by_flow_centrality(&network);
    for user in brokers.iter().take(5) {
        info!("  flow broker: {}", user);
    }

    // Project growth at a modest daily referral probability
    let p = 0.1;
    let horizon = 30;
    let totals = simulate(p, horizon);
    if let Some(final_total) = totals.last() {
        info!(
            "growth projection: {:.1} cumulative referrals after {} days at p={}",
            final_total, horizon, p
        );
    }

    let target = 500;
    match days_to_target(p, target) {
        Some(days) => info!("{} hires reachable in {} days at p={}", target, days, p),
        None => info!("{} hires not reachable at p={}", target, p),
    }

    // Calibrate the minimum bonus for the same target with a linear
    // adoption curve ($2000 buys certainty)
    match min_bonus_for_target(30, target, |bonus| (bonus / 2000.0).min(1.0)) {
        Some(bonus) => info!("minimum bonus for {} hires in 30 days: ${}", target, bonus),
        None => info!("no bonus meets {} hires in 30 days", target),
    }

    info!("done");
}
