//! Criterion benchmarks for journal hot paths.
//!
//! Benchmarks:
//! 1. Performance stats over a large set of closed trades
//! 2. Realized PnL curve across many ledgers
//! 3. Parallel position summaries

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use journal_core::{Action, Trade};
use journal_stats::{closed_trades, realized_pnl_series, summarize_all, ClosedTrade, PerformanceStats};
use std::collections::HashMap;

// ── Helpers ──────────────────────────────────────────────────────────

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 2, 14, 30, 0).unwrap()
}

/// Buy twice, scale out in three sells. Every third trade stays open.
fn make_trades(n: usize) -> Vec<Trade> {
    (0..n)
        .map(|i| {
            let open = base() + Duration::days(i as i64);
            let entry = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let mut trade = Trade::with_initial_buy(format!("t{i}"), format!("SYM{}", i % 20), entry, 100, open)
                .with_stop_loss(entry * 0.95)
                .with_commission_rate(0.07)
                .with_strategy(["breakout", "pullback", "gap"][i % 3]);
            trade.record_action(Action::buy(entry * 1.01, 50, open + Duration::hours(2))).unwrap();
            trade.record_action(Action::sell(entry * 1.03, 50, open + Duration::days(1))).unwrap();
            trade.record_action(Action::sell(entry * 0.99, 50, open + Duration::days(2))).unwrap();
            if i % 3 != 0 {
                let exit = entry * (1.0 + (i as f64 * 0.37).cos() * 0.05);
                trade.record_action(Action::sell(exit, 50, open + Duration::days(4))).unwrap();
            }
            trade
        })
        .collect()
}

fn make_closed(n: usize) -> Vec<ClosedTrade> {
    closed_trades(&make_trades(n))
}

// ── 1. Performance stats ─────────────────────────────────────────────

fn bench_performance_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("performance_stats");
    for &n in &[100usize, 1_000, 10_000] {
        let closed = make_closed(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &closed, |b, closed| {
            b.iter(|| PerformanceStats::compute(black_box(closed)));
        });
    }
    group.finish();
}

// ── 2. Realized PnL curve ────────────────────────────────────────────

fn bench_realized_series(c: &mut Criterion) {
    let trades = make_trades(5_000);
    c.bench_function("realized_pnl_series_5000", |b| {
        b.iter(|| realized_pnl_series(black_box(&trades)));
    });
}

// ── 3. Position summaries ────────────────────────────────────────────

fn bench_summarize_all(c: &mut Criterion) {
    let trades = make_trades(5_000);
    let prices: HashMap<String, f64> = (0..20).map(|i| (format!("SYM{i}"), 105.0)).collect();
    c.bench_function("summarize_all_5000", |b| {
        b.iter(|| summarize_all(black_box(&trades), black_box(&prices)));
    });
}

criterion_group!(benches, bench_performance_stats, bench_realized_series, bench_summarize_all);
criterion_main!(benches);
