//! Profiling throughput: CSV ingestion with type inference, and profile computation on an
//! already loaded table.

use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data_profiler::ingestion::csv::ingest_csv_from_reader;
use data_profiler::profiling::profile_dataset;

fn make_csv(rows: usize) -> String {
    let mut out = String::from("id,name,score,active,city\n");
    for i in 0..rows {
        let score = if i % 7 == 0 {
            String::new()
        } else {
            format!("{:.2}", (i as f64 * 1.37) % 100.0)
        };
        let city = ["Oslo", "Lima", "", "Pune"][i % 4];
        let _ = writeln!(out, "{i},user{i},{score},{},{city}", i % 2 == 0);
    }
    out
}

fn bench_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");

    for rows in [1_000usize, 10_000, 100_000] {
        let input = make_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("ingest_csv", rows), &input, |b, input| {
            b.iter(|| {
                let mut rdr = csv::ReaderBuilder::new()
                    .flexible(true)
                    .from_reader(input.as_bytes());
                black_box(ingest_csv_from_reader(&mut rdr).unwrap())
            })
        });

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(input.as_bytes());
        let ds = ingest_csv_from_reader(&mut rdr).unwrap();
        group.bench_with_input(BenchmarkId::new("profile_dataset", rows), &ds, |b, ds| {
            b.iter(|| black_box(profile_dataset(ds)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_profile);
criterion_main!(benches);
