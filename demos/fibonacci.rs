//! Fibonacci numbers through a two-slot memo.

use lazy_val::memo::{fib, FibCache};
use lazy_val::MemoError;

fn main() -> anyhow::Result<()> {
    let mut cache = FibCache::<u32>::new();
    for n in 0..10 {
        println!("{}", fib(&mut cache, n)?);
    }

    match fib(&mut cache, 3) {
        Err(err @ MemoError::Evicted { .. }) => println!("as expected: {err}"),
        other => println!("unexpected: {other:?}"),
    }

    let mut small = FibCache::<u16>::new();
    if let Err(err) = fib(&mut small, 100) {
        println!("as expected: {err}");
    }

    Ok(())
}
