//! Building and using a URL matcher.
//!
//! Run with: `RUST_LOG=rust_verbex=trace cargo run --example url`

use rust_verbex::GLOBAL_CACHE;
use rust_verbex::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Assembling ===");
    let mut url = PatternBuilder::new();
    url.start_of_line(true)
        .find("http")
        .maybe("s")
        .find("://")
        .maybe("www.")
        .anything_but(" ")
        .end_of_line(true);
    println!("Pattern: {url}");

    let matcher = url.compile()?;
    for candidate in ["https://www.google.com", "http://example.org", "https://www google.com"] {
        println!("  {candidate:<26} -> {}", matcher.test(candidate));
    }

    println!("\n=== Captures ===");
    if let Some(m) = matcher.find("https://www.rust-lang.org") {
        println!("  scheme: {:?}", m.group(1));
        println!("  secure: {}", m.group(2).is_some());
        println!("  host:   {:?}", m.group(5));
    }

    println!("\n=== Replacing ===");
    let mut bird = PatternBuilder::new();
    bird.find("bird").global(true);
    let matcher = bird.compile()?;
    println!("  {}", matcher.replace("a bird and a bird", "duck"));

    println!("\n=== Alternatives ===");
    let mut pet = PatternBuilder::new();
    pet.start_of_line(true)
        .find("cat")
        .or_find("dog")
        .end_of_line(true)
        .with_any_case(true);
    let matcher = pet.compile()?;
    println!("Pattern: {matcher}");
    for candidate in ["Cat", "DOG", "cow"] {
        println!("  {candidate:<4} -> {}", matcher.test(candidate));
    }

    println!("\n=== Cache ===");
    println!("  {:?}", GLOBAL_CACHE.stats());

    Ok(())
}
