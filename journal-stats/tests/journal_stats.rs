//! Integration tests: trades closed through the lifecycle, aggregated into stats.

use chrono::{DateTime, Duration, TimeZone, Utc};
use journal_core::{Action, Trade};
use journal_stats::{closed_trades, realized_pnl_series, JournalConfig, JournalFile, PerformanceStats};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 1, 14, 30, 0).unwrap()
}

/// Buy 10 @ 100 on `open_day`, sell everything `held` days later at the price
/// that yields `pnl` (no commission), auto-closing the trade.
fn round_trip(id: &str, pnl: f64, open_day: i64, held: i64) -> Trade {
    let open = base() + Duration::days(open_day);
    let mut trade = Trade::with_initial_buy(id, "SPY", 100.0, 10, open).with_stop_loss(90.0);
    let exit = 100.0 + pnl / 10.0;
    trade.record_action(Action::sell(exit, 10, open + Duration::days(held))).unwrap();
    trade
}

#[test]
fn five_trade_streak_scenario() {
    let trades = vec![
        round_trip("a", 100.0, 0, 1),
        round_trip("b", 50.0, 1, 1),
        round_trip("c", -30.0, 2, 1),
        round_trip("d", 20.0, 3, 1),
        round_trip("e", -10.0, 4, 1),
    ];
    let closed = closed_trades(&trades);
    assert_eq!(closed.len(), 5);

    let stats = PerformanceStats::compute(&closed);
    assert_eq!(stats.max_win_streak, 2);
    assert_eq!(stats.max_lose_streak, 1);
    assert_eq!(stats.winning_trades, 3);
    assert_eq!(stats.losing_trades, 2);
    assert!((stats.win_rate - 60.0).abs() < 1e-10);
    assert!((stats.total_pnl - 130.0).abs() < 1e-9);
    assert!((stats.profit_factor.unwrap() - 170.0 / 40.0).abs() < 1e-9);
    // risk = 10 * 10 = 100 per trade, so R = pnl / 100
    assert!((stats.avg_r_multiple.unwrap() - 0.26).abs() < 1e-9);
    assert!((stats.avg_holding_days.unwrap() - 1.0).abs() < 1e-10);
}

#[test]
fn open_and_unfinished_trades_are_excluded() {
    let mut trades = vec![round_trip("a", 100.0, 0, 2)];
    trades.push(Trade::with_initial_buy("open", "SPY", 100.0, 5, base()));

    // CLOSED but with no stored results, as an older export might contain.
    let mut broken = round_trip("broken", 10.0, 1, 1);
    broken.final_results = None;
    trades.push(broken);

    let closed = closed_trades(&trades);
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].trade_id.as_str(), "a");
}

#[test]
fn all_winners_has_no_profit_factor() {
    let trades = vec![round_trip("a", 100.0, 0, 1), round_trip("b", 10.0, 1, 1)];
    let stats = PerformanceStats::compute(&closed_trades(&trades));
    assert_eq!(stats.profit_factor, None);
    assert_eq!(stats.max_lose_streak, 0);
}

#[test]
fn explicit_close_counts_realized_portion_only() {
    let mut trade = Trade::with_initial_buy("partial", "SPY", 100.0, 10, base());
    trade.record_action(Action::sell(110.0, 4, base() + Duration::days(1))).unwrap();
    let outcome = trade.close(base() + Duration::days(3)).unwrap();
    assert!(!outcome.fully_liquidated);

    let stats = PerformanceStats::compute(&closed_trades(&[trade]));
    assert!((stats.total_pnl - 40.0).abs() < 1e-10);
    assert_eq!(stats.avg_holding_days, Some(3.0));
}

#[test]
fn journal_file_to_stats_and_curve() {
    let trades = vec![round_trip("a", 100.0, 0, 1), round_trip("b", -40.0, 1, 3)];
    let json = serde_json::to_string(&serde_json::json!({ "trades": trades })).unwrap();
    let journal = JournalFile::from_json(&json, &JournalConfig::default()).unwrap();

    let stats = PerformanceStats::compute(&closed_trades(&journal.trades));
    assert_eq!(stats.total_trades, 2);

    let curve = realized_pnl_series(&journal.trades);
    assert_eq!(curve.len(), 2);
    assert!((curve[1].cumulative_pnl - 60.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn stats_are_always_finite(pnls in prop::collection::vec(-990.0..990.0_f64, 0..40)) {
        let trades: Vec<Trade> = pnls
            .iter()
            .enumerate()
            .map(|(i, &p)| round_trip(&format!("t{i}"), (p * 100.0).round() / 100.0, i as i64, 1))
            .collect();
        let stats = PerformanceStats::compute(&closed_trades(&trades));

        prop_assert_eq!(stats.total_trades, pnls.len());
        prop_assert!(stats.win_rate >= 0.0 && stats.win_rate <= 100.0);
        prop_assert!(stats.total_pnl.is_finite());
        prop_assert_eq!(
            stats.winning_trades + stats.losing_trades + stats.breakeven_trades,
            stats.total_trades
        );
        if stats.losing_trades == 0 {
            prop_assert_eq!(stats.profit_factor, None);
        } else {
            prop_assert!(stats.profit_factor.unwrap().is_finite());
        }
        prop_assert!(stats.max_win_streak <= stats.winning_trades);
        prop_assert!(stats.max_lose_streak <= stats.losing_trades);
    }
}
