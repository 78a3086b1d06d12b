use lazy_val::LazyVal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn test_lazy_val_concurrent_single_invocation() {
    const THREADS: usize = 16;

    let invocations = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let counter = Arc::clone(&invocations);
    let cell = Arc::new(LazyVal::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        (0..1_000u64).sum::<u64>()
    }));

    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let cell = Arc::clone(&cell);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            *cell.get()
        }));
    }

    let values: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(values.len(), THREADS);
    assert!(values.iter().all(|&v| v == 499_500));
}

#[test]
fn test_lazy_val_concurrent_readers_after_compute() {
    let cell = LazyVal::new(|| String::from("published"));
    assert_eq!(cell.get(), "published");

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..1_000 {
                    assert_eq!(cell.get_if_computed().map(String::as_str), Some("published"));
                }
            });
        }
    });
}

#[test]
fn test_lazy_val_concurrent_failures_retry_serially() {
    const THREADS: usize = 12;
    const FAILURES: usize = 4;

    let invocations = AtomicUsize::new(0);
    let in_flight = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let cell = LazyVal::new_fallible(|| {
        // The lock admits one attempt at a time.
        assert_eq!(in_flight.fetch_add(1, Ordering::SeqCst), 0);
        thread::sleep(Duration::from_millis(2));
        let n = invocations.fetch_add(1, Ordering::SeqCst) + 1;
        in_flight.fetch_sub(1, Ordering::SeqCst);

        if n <= FAILURES {
            Err(n)
        } else {
            Ok(n * 1_000)
        }
    });

    let (cell, barrier) = (&cell, &barrier);
    let results: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    barrier.wait();
                    loop {
                        if let Ok(value) = cell.try_get() {
                            return *value;
                        }
                    }
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(invocations.load(Ordering::SeqCst), FAILURES + 1);
    assert!(results.iter().all(|&v| v == (FAILURES + 1) * 1_000));
}

#[test]
fn test_lazy_val_independent_cells_do_not_share_locks() {
    let started = Barrier::new(2);
    let slow = LazyVal::new(|| {
        started.wait();
        thread::sleep(Duration::from_millis(50));
        1
    });
    let fast = LazyVal::new(|| 2);

    thread::scope(|s| {
        let slow_handle = s.spawn(|| *slow.get());

        started.wait();
        // `slow` is mid-computation and holds its own lock; `fast` is unaffected.
        assert!(!slow.is_computed());
        assert_eq!(*fast.get(), 2);

        assert_eq!(slow_handle.join().unwrap(), 1);
    });
}
