//! LFU cache walkthrough.
//!
//! Run with: cargo run --example basic_lfu
//! Set `RUST_LOG=evictkit=trace` to see victim selection.

use evictkit::policy::lfu::LfuCache;
use evictkit::store::DiscardWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = LfuCache::new(4).with_listener(DiscardWriter::stdout());

    cache.insert("A", "Hello");
    cache.insert("B", "World");
    cache.insert("C", "Holberton");
    cache.insert("D", "School");
    cache.print_cache();

    println!("{:?}", cache.get(&"B"));
    cache.insert("E", "Battery");
    cache.print_cache();

    cache.insert("C", "Street");
    cache.print_cache();

    println!("{:?}", cache.get(&"A"));
    println!("{:?}", cache.get(&"B"));
    println!("{:?}", cache.get(&"C"));

    cache.insert("F", "Mission");
    cache.print_cache();

    for key in ["A", "B", "C", "D", "E", "F"] {
        println!("{key}: freq={:?}", cache.frequency(&key));
    }
}

// Expected output:
// Current cache:
// A: Hello
// B: World
// C: Holberton
// D: School
// Some("World")
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
// None
// Some("World")
// Some("Street")
// DISCARD: D
// Current cache:
// B: World
// C: Street
// E: Battery
// F: Mission
// A: freq=None
// B: freq=Some(3)
// C: freq=Some(3)
// D: freq=None
// E: freq=Some(1)
// F: freq=Some(1)
