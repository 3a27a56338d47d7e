//! Recency Trace
//!
//! Replays a short workload against a small LRU cache and prints the recency
//! order after every step, followed by the collected metrics.
//!
//! Run with: RUST_LOG=recency_lru=trace cargo run --example recency_trace

use recency_lru::metrics::CacheMetrics;
use recency_lru::LruCache;
use std::fmt::Debug;

#[derive(Debug)]
enum Step {
    Put(&'static str, u32),
    Get(&'static str),
    Remove(&'static str),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut cache = LruCache::new(3).expect("capacity is positive");

    let workload = [
        Step::Put("apple", 1),
        Step::Put("banana", 2),
        Step::Put("cherry", 3),
        Step::Get("apple"),
        Step::Put("date", 4),
        Step::Get("banana"),
        Step::Put("apple", 10),
        Step::Put("elderberry", 5),
        Step::Remove("date"),
        Step::Put("fig", 6),
    ];

    println!("Capacity: {}\n", cache.cap());
    println!("{:<22} {:<28} order (most recent first)", "step", "result");
    println!("{}", "-".repeat(80));

    for step in &workload {
        let result = match *step {
            Step::Put(key, value) => match cache.put(key, value) {
                Some((old_key, old)) if old_key == key => format!("updated, was {}", old),
                Some((evicted, old)) => format!("evicted {}={}", evicted, old),
                None => "inserted".to_string(),
            },
            Step::Get(key) => describe(cache.get(key)),
            Step::Remove(key) => describe(cache.remove(key).as_ref()),
        };
        let order: Vec<_> = cache.keys().copied().collect();
        println!("{:<22} {:<28} {:?}", format!("{:?}", step), result, order);
    }

    cache.assert_invariants();

    println!("\nMetrics for {}:", cache.algorithm_name());
    for (name, value) in cache.metrics() {
        println!("  {:<16} {}", name, value);
    }
}

fn describe<V: Debug>(value: Option<&V>) -> String {
    match value {
        Some(v) => format!("hit {:?}", v),
        None => "miss".to_string(),
    }
}
