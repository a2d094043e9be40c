use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rn_rust::{rank_by_flow_centrality, rank_by_unique_reach, top_k, ReachIndex, ReferralNetwork};

/// Benchmark the ranking analytics over random forests of increasing size
fn main() {
    std::env::set_var("RUST_LOG", "error");
    let _ = simple_logger::init();

    println!("\n=== Referral Ranking Benchmark ===\n");

    let sizes = [50usize, 150, 400];

    println!(
        "{:<10} {:>15} {:>15} {:>15} {:>15}",
        "Users", "ReachIndex (ms)", "top_k (ms)", "unique (ms)", "flow (ms)"
    );
    println!("{}", "-".repeat(75));

    for &size in &sizes {
        let network = random_forest(size, 0x5eed);

        let samples = 5;
        let mut index_time = 0.0;
        let mut top_k_time = 0.0;
        let mut unique_time = 0.0;
        let mut flow_time = 0.0;

        for _ in 0..samples {
            let start = Instant::now();
            let index = ReachIndex::build(&network);
            index_time += start.elapsed().as_secs_f64();
            assert!(index.total_reach("user_0000") <= size);

            let start = Instant::now();
            let top = top_k(&network, 10);
            top_k_time += start.elapsed().as_secs_f64();
            assert!(top.len() <= 10);

            let start = Instant::now();
            let unique = rank_by_unique_reach(&network);
            unique_time += start.elapsed().as_secs_f64();
            assert!(unique.len() <= size);

            let start = Instant::now();
            let flow = rank_by_flow_centrality(&network);
            flow_time += start.elapsed().as_secs_f64();
            assert_eq!(flow.len(), network.user_count());
        }

        let scale = 1000.0 / samples as f64;
        println!(
            "{:<10} {:>15.2} {:>15.2} {:>15.2} {:>15.2}",
            size,
            index_time * scale,
            top_k_time * scale,
            unique_time * scale,
            flow_time * scale
        );
    }

    println!();
}

/// Build a random referral forest: each newcomer referred by a random
/// earlier user
fn random_forest(size: usize, seed: u64) -> ReferralNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = ReferralNetwork::new();
    network.register("user_0000");

    for i in 1..size {
        let referrer = format!("user_{:04}", rng.gen_range(0..i));
        let candidate = format!("user_{:04}", i);
        let _ = network.add_referral(&referrer, &candidate);
    }

    network
}
