//! Report pipeline benchmarks
//!
//! Measures selection, leaderboard layout, and table rendering over
//! synthetic repositories sized like a busy checkpoint tree.
//!
//! Run with: cargo bench --bench report_benchmarks

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use metric_board::experiment::{extract_horizon_rows, Horizon, HorizonMetrics, MetricTriple, Run, RunRepository};
use metric_board::parse::ResultDocument;
use metric_board::report::{build_detail_tables, Leaderboard};
use metric_board::selection::BestRunSelection;
use metric_board::sink::{all_runs_batch, horizon_batch};

const MODELS: usize = 20;
const DATASETS: usize = 8;
const HORIZONS: u32 = 12;

/// Repository with `runs_per_key` runs for every model/dataset pair.
#[allow(clippy::cast_precision_loss)]
fn synthetic_repository(runs_per_key: usize) -> RunRepository {
    let mut repo = RunRepository::new();
    for m in 0..MODELS {
        for d in 0..DATASETS {
            for r in 0..runs_per_key {
                let mae = ((m * 31 + d * 7 + r * 13) % 97) as f64 + 10.0;
                let mut builder = Run::builder(
                    format!("Model{m:02}"),
                    format!("DS{d}_{r}_12_12"),
                    format!("Model{m:02}/DS{d}_{r}_12_12/test_metrics.json"),
                    Utc::now(),
                )
                .metrics(MetricTriple::new(Some(mae), Some(mae * 1.6), Some(0.12)));
                for h in 1..=HORIZONS {
                    builder = builder.horizon(HorizonMetrics::new(
                        Horizon::Step(h),
                        MetricTriple::new(Some(mae + f64::from(h)), None, None),
                    ));
                }
                repo.add_run(builder.build());
            }
        }
    }
    repo
}

fn bench_leaderboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaderboard");
    for runs_per_key in [1, 10, 50] {
        let repo = synthetic_repository(runs_per_key);
        group.bench_with_input(
            BenchmarkId::new("select_and_build", repo.run_count()),
            &repo,
            |b, repo| {
                b.iter(|| Leaderboard::build(&BestRunSelection::select(black_box(repo))));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("render", repo.run_count()),
            &repo,
            |b, repo| {
                let board = Leaderboard::build(&BestRunSelection::select(repo));
                b.iter(|| black_box(&board).to_table().render());
            },
        );
    }
    group.finish();
}

fn bench_detail_tables(c: &mut Criterion) {
    let repo = synthetic_repository(10);
    c.bench_function("detail_tables_render", |b| {
        b.iter(|| {
            build_detail_tables(black_box(&repo))
                .iter()
                .map(|t| t.to_table().render().len())
                .sum::<usize>()
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut document = String::from(r#"{"overall": {"MAE": 19.1, "RMSE": 31.2, "MAPE": 0.128}"#);
    for h in 1..=HORIZONS {
        document.push_str(&format!(r#", "horizon_{h}": {{"MAE": 17.0, "RMSE": 27.9, "MAPE": 0.113}}"#));
    }
    document.push('}');

    c.bench_function("parse_result_document", |b| {
        b.iter(|| ResultDocument::parse(black_box(&document)));
    });
}

fn bench_export_batches(c: &mut Criterion) {
    let repo = synthetic_repository(10);
    c.bench_function("all_runs_batch", |b| b.iter(|| all_runs_batch(black_box(&repo))));

    let rows = extract_horizon_rows(&repo);
    c.bench_function("horizon_batch", |b| b.iter(|| horizon_batch(black_box(&rows))));
}

criterion_group!(
    benches,
    bench_leaderboard,
    bench_detail_tables,
    bench_parse,
    bench_export_batches
);
criterion_main!(benches);
