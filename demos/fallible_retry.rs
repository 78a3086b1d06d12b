//! Retrying a fallible lazy computation.
//!
//! A failed attempt is not cached: the next access runs the computation again.

use anyhow::{bail, Context, Result};
use lazy_val::LazyVal;
use std::cell::Cell;

fn main() -> Result<()> {
    let attempts = Cell::new(0u32);

    let settings = LazyVal::new_fallible(|| -> Result<String> {
        attempts.set(attempts.get() + 1);
        if attempts.get() < 3 {
            bail!("backend unavailable (attempt {})", attempts.get());
        }
        Ok(format!("settings loaded after {} attempts", attempts.get()))
    });

    let loaded = loop {
        match settings.try_get() {
            Ok(value) => break value,
            Err(err) => println!("not yet: {err:#}"),
        }
    };
    println!("{loaded}");

    // Cached now; the computation is not run again.
    let again = settings.try_get().context("cached value should be available")?;
    assert_eq!(loaded, again);
    println!("total attempts: {}", attempts.get());

    Ok(())
}
