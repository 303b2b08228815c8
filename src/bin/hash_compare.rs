//! Compares the built-in hash strategies on random input.
//!
//! Usage: `hash-compare [COUNT] [SEED]` (defaults: 100000, random seed).

use chainset::{ChainedSet, HashStrategy, Instrumented, OpStats};
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_COUNT: usize = 100_000;
const BIG_COUNT: usize = 1_000_000;

fn human_time(nanos: f64) -> String {
    let mut t = nanos;
    if t < 1000.0 {
        return format!("{:.1}ns", t);
    }
    t /= 1000.0;
    if t < 1000.0 {
        return format!("{:.1}us", t);
    }
    t /= 1000.0;
    if t < 1000.0 {
        return format!("{:.1}ms", t);
    }
    t /= 1000.0;
    format!("{:.1}s", t)
}

fn random_values(rng: &mut fastrand::Rng, n: usize) -> Vec<i32> {
    (0..n).map(|_| rng.i32(..)).collect()
}

/// Times every insert into `set` and prints the distribution.
fn insert_timing(values: &[i32], mut set: ChainedSet) {
    let mut times = OpStats::new();
    let mut inst = Instrumented::new(&mut set);
    for &v in values {
        times.record_duration(inst.timed_insert(v));
    }
    println!(
        "  average insert: {}, worst: {} ({:.0}x)",
        human_time(times.average()),
        human_time(times.worst as f64),
        times.worst_ratio()
    );
    println!("  {}", set.stats());
}

/// Counts chain nodes visited per insert and prints the distribution.
fn insert_probes(values: &[i32], mut set: ChainedSet) {
    let mut probes = OpStats::new();
    let mut inst = Instrumented::new(&mut set);
    for &v in values {
        probes.record(inst.insert(v).visited as u64);
    }
    println!("  probes per insert: {}", probes);
}

fn compare_strategies(values: &[i32]) {
    println!("Inserting {} random values.", values.len());
    for strategy in HashStrategy::ALL {
        println!("Using: {}", strategy.name());
        insert_timing(values, ChainedSet::with_strategy(strategy.clone()));
        insert_probes(values, ChainedSet::with_strategy(strategy));
    }
}

fn growing_vs_preallocated(values: &[i32]) -> Result<(), Box<dyn Error>> {
    println!("Inserting into a growing set:");
    insert_timing(values, ChainedSet::new());
    println!("Inserting into a preallocated set:");
    let buckets = values.len().max(1) * 2;
    insert_timing(values, ChainedSet::with_buckets(buckets, HashStrategy::XorShift)?);
    Ok(())
}

fn big_build(rng: &mut fastrand::Rng) -> Duration {
    let values = random_values(rng, BIG_COUNT);
    let t0 = Instant::now();
    let set = ChainedSet::from(values.as_slice());
    let elapsed = t0.elapsed();
    std::hint::black_box(set);
    elapsed
}

fn verify_membership(values: &[i32]) -> Result<(), Box<dyn Error>> {
    let set = ChainedSet::from(values);
    if let Some(v) = values.iter().find(|&&v| !set.contains(v)) {
        return Err(format!("{} was inserted but not found", v).into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let count = match args.next() {
        Some(s) => s.parse::<usize>()?,
        None => DEFAULT_COUNT,
    };
    let mut rng = match args.next() {
        Some(s) => fastrand::Rng::with_seed(s.parse()?),
        None => fastrand::Rng::new(),
    };

    let values = random_values(&mut rng, count);
    compare_strategies(&values);
    println!();
    growing_vs_preallocated(&values)?;

    let elapsed = big_build(&mut rng);
    println!();
    println!(
        "Inserting {} values into a chained set took {}",
        BIG_COUNT,
        human_time(elapsed.as_nanos() as f64)
    );

    verify_membership(&values)?;
    println!();
    println!("Every inserted value was found.");
    Ok(())
}
