//! Benchmark tests for critical store operations
//!
//! Run with: cargo test --release bench -- --ignored --nocapture

use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;

use shortbot::store;

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_create_links() {
    println!("\n=== Benchmark: Create Links ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = shortbot::database::init_db(temp_db.path().to_str().unwrap()).unwrap();

    let iterations = 1000;
    benchmark("Create link", iterations, || {
        store::create_link(&db, "https://example.com/bench", 1).unwrap();
    });
}

#[test]
#[ignore]
fn bench_list_links() {
    println!("\n=== Benchmark: List Links ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = shortbot::database::init_db(temp_db.path().to_str().unwrap()).unwrap();

    // Create 1000 links first
    println!("  Preparing: Creating 1000 links...");
    for i in 0..1000 {
        store::create_link(&db, &format!("https://example.com/list{}", i), 1).unwrap();
    }
    println!("  Done!\n");

    let iterations = 1000;
    benchmark("List by creator (indexed)", iterations, || {
        store::links_by_creator(&db, 1).unwrap();
    });

    benchmark("Resolve single link", iterations, || {
        let record = store::links_by_creator(&db, 1).unwrap();
        store::resolve_link(&db, &record[0].short_id).unwrap();
    });
}

#[test]
#[ignore]
fn bench_concurrent_operations() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = Arc::new(shortbot::database::init_db(temp_db.path().to_str().unwrap()).unwrap());

    let num_threads = 8;
    let ops_per_thread = 100;

    println!(
        "  Running {} concurrent threads with {} ops each...",
        num_threads, ops_per_thread
    );

    let start = Instant::now();

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let db = Arc::clone(&db);
            std::thread::spawn(move || {
                for op_id in 0..ops_per_thread {
                    let url = format!("https://example.com/concurrent-{}-{}", thread_id, op_id);
                    store::create_link(&db, &url, thread_id as u64).unwrap();
                }
            })
        })
        .collect();

    // Wait for all threads
    for handle in handles {
        handle.join().unwrap();
    }

    let duration = start.elapsed();
    let total_ops = num_threads * ops_per_thread;
    let ops_per_sec = total_ops as f64 / duration.as_secs_f64();

    println!("  Total operations: {}", total_ops);
    println!("  Total time: {:?}", duration);
    println!("  Throughput: {:.0} ops/sec\n", ops_per_sec);
}

#[test]
fn bench_summary() {
    println!("\n{}", "=".repeat(60));
    println!("Benchmark Test Suite");
    println!("{}", "=".repeat(60));
    println!("\nTo run benchmarks, use:");
    println!("  cargo test --release bench -- --ignored --nocapture");
    println!("\nAvailable benchmarks:");
    println!("  • bench_create_links          - Link creation performance");
    println!("  • bench_list_links            - Indexed listing and resolution");
    println!("  • bench_concurrent_operations - Concurrent access patterns");
    println!("\n{}\n", "=".repeat(60));
}
