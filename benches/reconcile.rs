use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use tempfile::TempDir;
use vat_recon::ingest::{IngestOptions, load_table};
use vat_recon::{Cell, ReconcileConfig, Table, reconcile};

fn synthetic_table(rows: usize, with_vat: bool) -> Table {
    let mut columns = vec!["date".to_string(), "gross_amount".to_string(), "type".to_string()];
    if with_vat {
        columns.push("vat".to_string());
    }
    let rows = (0..rows)
        .map(|i| {
            let label = match i % 4 {
                0 | 1 => "Sales",
                2 => "purchase",
                _ => "transfer",
            };
            let gross = ((i % 500) as f64) * 1.23 + 10.0;
            let mut row = vec![
                Cell::Text(format!("2024-01-{:02}", (i % 28) + 1)),
                Cell::Number(gross),
                Cell::from(label),
            ];
            if with_vat {
                let vat = if i % 97 == 0 {
                    Cell::from("n/a")
                } else {
                    Cell::Text(format!("{:.2}", gross * 23.0 / 123.0))
                };
                row.push(vat);
            }
            row
        })
        .collect();
    Table::new(columns, rows)
}

fn generate_ledger(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("ledger.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "date,amount,vat,type").expect("header");
    for i in 0..rows {
        let kind = if i % 3 == 0 { "purchase" } else { "sale" };
        let amount = (i % 1000) as f64 + 0.5;
        writeln!(
            file,
            "2024-02-{:02},{amount},{:.2},{kind}",
            (i % 28) + 1,
            amount * 0.23
        )
        .expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_reconcile(c: &mut Criterion) {
    let config = ReconcileConfig::default();
    let explicit = synthetic_table(100_000, true);
    let inferred = synthetic_table(100_000, false);

    let mut group = c.benchmark_group("reconcile");
    group.bench_function("explicit_vat_column", |b| {
        b.iter(|| reconcile(&explicit, &config).expect("reconcile explicit"));
    });
    group.bench_function("inferred_vat", |b| {
        b.iter(|| reconcile(&inferred, &config).expect("reconcile inferred"));
    });
    group.finish();
}

fn bench_load_and_reconcile(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_ledger(50_000);
    let options = IngestOptions::default();
    let config = ReconcileConfig::default();

    c.bench_function("load_csv_and_reconcile", |b| {
        b.iter_batched(
            || (),
            |_| {
                let (_, table) = load_table(&csv_path, &options).expect("load ledger");
                reconcile(&table, &config).expect("reconcile ledger")
            },
            BatchSize::SmallInput,
        );
    });

    drop(temp_dir);
}

criterion_group!(benches, bench_reconcile, bench_load_and_reconcile);
criterion_main!(benches);
