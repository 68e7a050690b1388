//! FIFO cache walkthrough.
//!
//! Run with: cargo run --example basic_fifo
//! Set `RUST_LOG=evictkit=debug` to see eviction events.

use evictkit::policy::fifo::FifoCache;
use evictkit::store::DiscardWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = FifoCache::new(4).with_listener(DiscardWriter::stdout());

    cache.insert("A", "Hello");
    cache.insert("B", "World");
    cache.insert("C", "Holberton");
    cache.insert("D", "School");
    cache.print_cache();

    cache.insert("E", "Battery");
    cache.print_cache();

    // Overwriting keeps C in its original queue slot.
    cache.insert("C", "Street");
    cache.print_cache();

    cache.insert("F", "Mission");
    cache.print_cache();
}

// Expected output:
// Current cache:
// A: Hello
// B: World
// C: Holberton
// D: School
// DISCARD: A
// Current cache:
// B: World
// C: Holberton
// D: School
// E: Battery
// Current cache:
// B: World
// C: Street
// D: School
// E: Battery
// DISCARD: B
// Current cache:
// C: Street
// D: School
// E: Battery
// F: Mission
