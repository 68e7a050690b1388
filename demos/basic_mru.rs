//! MRU cache walkthrough.
//!
//! Run with: cargo run --example basic_mru
//! Set `RUST_LOG=evictkit=debug` to see eviction events.

use evictkit::policy::mru::MruCache;
use evictkit::store::DiscardWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = MruCache::new(4).with_listener(DiscardWriter::stdout());

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
}

// Expected output:
// Current cache:
// A: Hello
// B: World
// C: Holberton
// D: School
// Some("World")
// DISCARD: B
// Current cache:
// A: Hello
// C: Holberton
// D: School
// E: Battery
// Current cache:
// A: Hello
// C: Street
// D: School
// E: Battery
// Some("Hello")
// None
// Some("Street")
// DISCARD: C
// Current cache:
// A: Hello
// D: School
// E: Battery
// F: Mission
