//! LIFO cache walkthrough.
//!
//! Run with: cargo run --example basic_lifo
//! Set `RUST_LOG=evictkit=debug` to see eviction events.

use evictkit::policy::lifo::LifoCache;
use evictkit::store::DiscardWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = LifoCache::new(4).with_listener(DiscardWriter::stdout());

    cache.insert("A", "Hello");
    cache.insert("B", "World");
    cache.insert("C", "Holberton");
    cache.insert("D", "School");
    cache.print_cache();

    cache.insert("E", "Battery");
    cache.print_cache();

    // Overwriting moves C to the top of the stack.
    cache.insert("C", "Street");
    cache.print_cache();

    cache.insert("F", "Mission");
    cache.print_cache();

    cache.insert("G", "San Francisco");
    cache.print_cache();
}

// Expected output:
// Current cache:
// A: Hello
// B: World
// C: Holberton
// D: School
// DISCARD: D
// Current cache:
// A: Hello
// B: World
// C: Holberton
// E: Battery
// Current cache:
// A: Hello
// B: World
// C: Street
// E: Battery
// DISCARD: C
// Current cache:
// A: Hello
// B: World
// E: Battery
// F: Mission
// DISCARD: F
// Current cache:
// A: Hello
// B: World
// E: Battery
// G: San Francisco
