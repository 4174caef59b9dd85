//! Criterion benchmarks for geometry decoding and coil aggregation.

use coil_geometry::{aggregate_coils, parse_str, to_text};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Synthetic file with `coils` coils of `rows` patches each
fn synthetic_geometry(coils: usize, rows: usize) -> String {
    let prefixes = ["CS", "EF", "FP"];
    let mut text = format!("{}\nunits\n{}\n", coils, vec![rows.to_string(); coils].join(" "));
    for coil in 0..coils {
        for row in 0..rows {
            let r = 1.0 + coil as f64 * 0.1 + row as f64 * 0.01;
            text.push_str(&format!("2.0 {} {} 0.01 0.02", r, coil as f64 * 0.05));
            if row + 1 == rows {
                text.push_str(&format!(" {}{}", prefixes[coil % prefixes.len()], coil));
            }
            text.push('\n');
        }
    }

    text.push_str("500\n");
    for i in 0..500 {
        text.push_str(&format!("1.0 {} 0.5 0.01 0.02 7.4e-7\n", 1.0 + i as f64 * 0.002));
    }
    text.push_str("200\n");
    for i in 0..200 {
        text.push_str(&format!("{} {}\n", 1.0 + i as f64 * 0.01, (i as f64).sin()));
    }
    text.push_str("50\n");
    for i in 0..50 {
        text.push_str(&format!("2.0 {}\n", i as f64 * 0.02));
    }
    text.push_str("100\n");
    for i in 0..100 {
        text.push_str(&format!("2.1 {} {}\n", i as f64 * 0.02, i as f64 * 0.06));
    }
    text
}

fn parse_bench(c: &mut Criterion) {
    let text = synthetic_geometry(60, 40);
    let mut group = c.benchmark_group("decode");
    group.sample_size(20);

    group.bench_function("parse_str", |b| {
        b.iter(|| black_box(parse_str(black_box(&text))))
    });

    let file = match parse_str(&text) {
        Ok(file) => file,
        Err(e) => panic!("synthetic geometry failed to decode: {}", e),
    };
    group.bench_function("aggregate_coils", |b| {
        b.iter(|| black_box(aggregate_coils(black_box(&file.patches))))
    });
    group.bench_function("to_text", |b| b.iter(|| black_box(to_text(black_box(&file)))));

    group.finish();
}

criterion_group!(benches, parse_bench);
criterion_main!(benches);
