//! Concurrent Cache Usage Examples
//!
//! Multi-threaded usage patterns for the lock-wrapped LRU cache.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use recency_lru::metrics::CacheMetrics;
use recency_lru::ConcurrentLruCache;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
    println!("Concurrent Cache Usage Examples");
    println!("===============================\n");

    basic_concurrent_usage();
    println!();

    zero_copy_get_with();
    println!();

    throughput_by_threads();
}

/// Basic multi-threaded cache usage
fn basic_concurrent_usage() {
    println!("1. Basic Concurrent Usage");
    println!("   -----------------------");

    let cache = Arc::new(ConcurrentLruCache::new(1000).expect("capacity is positive"));

    let num_threads = 4;
    let ops_per_thread = 1000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("thread{}-key{}", thread_id, i);
                    let value = thread_id * 10000 + i;

                    cache.put(key.clone(), value);

                    // Another thread may have evicted it in between
                    if let Some(v) = cache.get(&key) {
                        assert_eq!(v, value);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    println!(
        "   Completed {} operations across {} threads",
        num_threads * ops_per_thread * 2,
        num_threads
    );
    println!("   Final cache size: {} items", cache.len());
    let metrics = cache.metrics();
    println!(
        "   Hit rate: {:.2}%, evictions: {}",
        metrics["hit_rate"] * 100.0,
        metrics["evictions"]
    );
}

/// Reading a value in place with get_with()
fn zero_copy_get_with() {
    println!("2. Zero-Copy Access with get_with()");
    println!("   ----------------------------------");

    let cache: ConcurrentLruCache<String, Vec<u8>> =
        ConcurrentLruCache::new(100).expect("capacity is positive");

    cache.put("large_key".to_string(), vec![1u8; 1024]);

    let sum: Option<u64> = cache.get_with("large_key", |data| {
        data.iter().map(|&x| x as u64).sum()
    });
    println!("   Stored 1KB of data in cache");
    println!(
        "   Computed sum without cloning: {}",
        sum.unwrap_or_default()
    );

    let has_zeros: Option<bool> = cache.get_with("large_key", |data| data.contains(&0));
    println!("   Data contains zeros: {}", has_zeros.unwrap_or(false));
}

/// Single-lock throughput as thread count grows
fn throughput_by_threads() {
    println!("3. Throughput by Thread Count");
    println!("   ---------------------------");

    const OPS_PER_THREAD: usize = 100_000;

    for num_threads in [1usize, 2, 4, 8] {
        let cache = Arc::new(ConcurrentLruCache::new(10_000).expect("capacity is positive"));
        let start = Instant::now();

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..OPS_PER_THREAD {
                        let key = (t * OPS_PER_THREAD + i) % 20_000;
                        if i % 4 == 0 {
                            cache.put(key, i);
                        } else {
                            let _ = cache.get(&key);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        let elapsed = start.elapsed();
        let total = (num_threads * OPS_PER_THREAD) as f64;
        println!(
            "   {} thread(s): {:>10.0} ops/sec",
            num_threads,
            total / elapsed.as_secs_f64()
        );
    }
}
