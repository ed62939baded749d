//! Time equity calculations for hands and ranges on different streets.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release --example equity_bench

use std::time::Instant;

use holdem_equity::{calculate_hands, calculate_ranges, EquityConfig, Hand, Range};

fn format_duration(nanos: u128) -> String {
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &str, iterations: u64, mut f: F)
where
    F: FnMut() -> String,
{
    let mut last = f();
    let start = Instant::now();
    for _ in 0..iterations {
        last = f();
    }
    let duration = start.elapsed();
    let per_iter_ns = duration.as_nanos() / iterations as u128;

    println!("{:44} {:>12}  {}", name, format_duration(per_iter_ns), last);
}

fn config(samples: u32, board: &str) -> Result<EquityConfig, Box<dyn std::error::Error>> {
    let mut builder = EquityConfig::builder().sample_size(samples);
    if !board.is_empty() {
        builder = builder.board(board.parse()?);
    }
    Ok(builder.build()?)
}

fn summary<P: std::fmt::Display>(eq: &holdem_equity::Equities<P>) -> String {
    eq.iter()
        .map(|(p, e)| format!("{p} {:.3}", e.equity()))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let aces: Hand = "AsAh".parse()?;
    let kings: Hand = "KsKh".parse()?;
    let suited: Hand = "JdTd".parse()?;

    println!("=== Hand vs hand (25k trials) ===\n");
    for (street, board) in [("Preflop", ""), ("Flop", "Kc9d2h"), ("Turn", "Kc9d2h3s"), ("River", "Kc9d2h3s4c")] {
        let c = config(25_000, board)?;
        bench(&format!("AA vs KK: {street}"), 5, || {
            calculate_hands(&c, &[aces, kings]).map(|eq| summary(&eq)).unwrap_or_else(|e| e.to_string())
        });
    }

    let c = config(25_000, "")?;
    bench("AA vs KK vs JTs: Preflop", 5, || {
        calculate_hands(&c, &[aces, kings, suited]).map(|eq| summary(&eq)).unwrap_or_else(|e| e.to_string())
    });

    println!("\n=== Range vs range (25k trials) ===\n");
    let tight: Range = "AA,KK,QQ,AKs,AKo".parse()?;
    let wide: Range = "22,33,44,55,66,77,88,99,TT,JJ,AT,AJ,AQ,KQ,QJs,JTs:0.5".parse()?;
    let pairs: Range = "TT,JJ,QQ".parse()?;

    bench("tight vs wide: Preflop", 5, || {
        calculate_ranges(&c, &[tight.clone(), wide.clone()])
            .map(|eq| {
                eq.iter()
                    .map(|(_, e)| format!("{:.3}", e.equity()))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .unwrap_or_else(|e| e.to_string())
    });

    let flop = config(25_000, "Ks9d2h")?;
    bench("tight vs wide vs pairs: Flop", 5, || {
        calculate_ranges(&flop, &[tight.clone(), wide.clone(), pairs.clone()])
            .map(|eq| {
                eq.iter()
                    .map(|(_, e)| format!("{:.3}", e.equity()))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .unwrap_or_else(|e| e.to_string())
    });

    println!("\n=== Trial scaling (AA vs KK, preflop) ===\n");
    for samples in [1_000, 10_000, 100_000, 1_000_000] {
        let c = config(samples, "")?;
        bench(&format!("{samples} trials"), 3, || {
            calculate_hands(&c, &[aces, kings]).map(|eq| summary(&eq)).unwrap_or_else(|e| e.to_string())
        });
    }

    Ok(())
}
