//! Compare the dispatch cost of several hand-written test doubles.
//!
//! Run with:
//!
//! ```bash
//! MOCKBENCH_SAMPLES=5000 RUST_LOG=mockbench=debug cargo run --release --example compare
//! ```

use std::cell::Cell;
use std::collections::HashMap;

use mockbench::{Config, Report, Timer};
use tracing_subscriber::EnvFilter;

trait PriceService {
    fn price(&self, sku: u32) -> u64;
}

struct RealService;

impl PriceService for RealService {
    fn price(&self, sku: u32) -> u64 {
        u64::from(sku) * 3 + 7
    }
}

/// Stub returning a canned answer and counting calls.
struct CountingStub {
    calls: Cell<u64>,
    answer: u64,
}

impl PriceService for CountingStub {
    fn price(&self, _sku: u32) -> u64 {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}

/// Mock matching arguments against a table of expectations.
struct TableMock {
    expectations: HashMap<u32, u64>,
    fallback: u64,
}

impl PriceService for TableMock {
    fn price(&self, sku: u32) -> u64 {
        self.expectations.get(&sku).copied().unwrap_or(self.fallback)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::quick().with_label_width(32)?.from_env()?;
    let mut timer = Timer::from_config(config);
    timer.report_resolution();

    let real = RealService;
    let stub = CountingStub {
        calls: Cell::new(0),
        answer: 42,
    };
    let mock = TableMock {
        expectations: (0..64).map(|sku| (sku, u64::from(sku) * 2)).collect(),
        fallback: 0,
    };
    let boxed: Box<dyn PriceService> = Box::new(CountingStub {
        calls: Cell::new(0),
        answer: 42,
    });

    let baseline = timer.measure("direct call", || real.price(mockbench::black_box(17)))?;
    let rows: Vec<Report> = vec![
        timer.measure("counting stub (static)", || stub.price(mockbench::black_box(17)))?,
        timer.measure("counting stub (dyn)", || boxed.price(mockbench::black_box(17)))?,
        timer.measure_with(
            "table mock",
            || mock.price(mockbench::black_box(17)),
            |samples| {
                if let Some(&[p50, p99]) = samples.percentiles(&[0.5, 0.99]).as_deref() {
                    println!("    table mock p50 {:.3} us, p99 {:.3} us", p50, p99);
                }
            },
        )?,
    ];

    println!();
    for row in &rows {
        match row.slowdown_vs(&baseline) {
            Some(ratio) => println!("{:<32} {:>6.2}x direct call", row.label, ratio),
            None => println!("{:<32}    n/a", row.label),
        }
    }

    Ok(())
}
