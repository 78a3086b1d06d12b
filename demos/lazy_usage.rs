//! LazyVal Usage Examples
//!
//! Demonstrates deferred, memoized computation with capture-by-value semantics.

use lazy_val::{lazy, LazyVal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

fn main() {
    println!("LazyVal Usage Examples");
    println!("======================");

    // Example 1: the `lazy!` block captures `number` when the cell is built.
    println!("\n1. Deferred Computation:");
    let mut number = 6;

    let val = lazy! {
        println!("  Calculating the answer...");
        println!("  while the number is {number}");
        42
    };

    number = 2;
    println!("  Lazy value defined (number is now {number})");
    println!("  {}", *val);
    println!("  {} (cached, no recomputation)", *val);

    // Example 2: many threads, one computation.
    println!("\n2. Concurrent First Access:");
    let runs = AtomicUsize::new(0);
    let shared = LazyVal::new(|| {
        runs.fetch_add(1, Ordering::SeqCst);
        (1..=20u64).product::<u64>()
    });

    thread::scope(|s| {
        for id in 0..8 {
            let shared = &shared;
            s.spawn(move || println!("  thread {id} sees {}", shared.get()));
        }
    });
    println!("  Computation ran {} time(s)", runs.load(Ordering::SeqCst));

    // Example 3: inspecting without forcing.
    println!("\n3. Observing State:");
    let pending = LazyVal::new(|| vec![0u8; 1024]);
    println!("  Before access: {pending:?}");
    println!("  Length after access: {}", pending.len());
    println!("  Computed: {}", pending.is_computed());
}
