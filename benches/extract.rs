//! Benchmarks the extraction cascade over representative catalogue rows.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tyrespec::extract;

/// A mix of terse, branded, dual-load, and partially-valid rows, so the
/// bench exercises every cascade stage rather than just the fast path.
const DESCRIPTIONS: [&str; 8] = [
    "225/45R17 91W",
    "225/45RF17 91/89W",
    "225/45Z17 91W *MO*",
    "205/55R16 MICHELIN PRIMACY 4 91V",
    "255/50R19 107W MO XL",
    "225/45R17",
    "315/30ZRF21 105Y N0",
    "195/65R15 91T WINTERCONTACT",
];

fn extract_specs(c: &mut Criterion) {
    c.bench_function("extract catalogue rows", |b| {
        b.iter(|| {
            for description in DESCRIPTIONS {
                let _ = extract(black_box(description));
            }
        });
    });
}

criterion_group!(benches, extract_specs);
criterion_main!(benches);
