//! Example demonstrating the unified CacheBuilder API.
//!
//! Run with: cargo run --example basic_builder [policy]
//!
//! The capacity comes from `EVICTKIT_MAX_ITEMS` (default 4). With no policy
//! argument the same workload is replayed against every policy.

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::config::CacheConfig;
use evictkit::error::ConfigError;
use evictkit::store::DiscardWriter;
use tracing_subscriber::EnvFilter;

fn run(config: &CacheConfig, policy: CachePolicy) -> Result<(), ConfigError> {
    println!("=== {policy} (max_items = {}) ===", config.max_items);

    let mut cache = CacheBuilder::from_config(config)
        .listener(DiscardWriter::stdout())
        .try_build::<&str, &str>(policy)?;

    cache.insert("A", "Hello");
    cache.insert("B", "World");
    cache.insert("C", "Holberton");
    cache.insert("D", "School");
    cache.get(&"B");
    cache.insert("E", "Battery");
    cache.insert("C", "Street");
    cache.get(&"A");
    cache.insert("F", "Mission");

    cache.print_cache();
    println!("evictions: {}\n", cache.evictions());
    Ok(())
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CacheConfig::from_env()?;

    match std::env::args().nth(1) {
        Some(name) => run(&config, name.parse()?),
        None => CachePolicy::ALL
            .into_iter()
            .try_for_each(|policy| run(&config, policy)),
    }
}
