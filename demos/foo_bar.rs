//! Adds two words to a filter sized for 1000 items at a 0.1% false
//! positive rate and queries three.
//!
//! Run with `cargo run --example foo_bar`.  Set `RUST_LOG=debug` to
//! also see the derived filter parameters.

use bloomprobe::{BloomFilter, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                         .unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut filter = BloomFilter::with_rate(1000, 0.001)?;
    info!(m = filter.num_bits(), k = filter.num_hashes(), "filter ready");

    for word in &["foo", "bar"] {
        filter.add(*word);
        info!(word, "added");
    }

    for word in &["foo", "bar", "abc"] {
        info!(word, contains = filter.maybe_contains(*word), "queried");
    }
    Ok(())
}
