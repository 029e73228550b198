//! End-to-end position scenarios: two-lot entry, full exit, commission, R-multiple.

use chrono::{DateTime, TimeZone, Utc};
use journal_core::accounting::{compute_cost_basis, compute_realized_pnl};
use journal_core::{summarize, Action, LifecycleDecision, Trade};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, d, 15, 30, 0).unwrap()
}

fn two_lot_trade(commission_pct: f64) -> Trade {
    let mut trade = Trade::with_initial_buy("scenario", "AAPL", 100.0, 10, day(2))
        .with_stop_loss(95.0)
        .with_commission_rate(commission_pct);
    trade.record_action(Action::buy(120.0, 10, day(3))).unwrap();
    trade
}

#[test]
fn two_buys_average_to_110() {
    let trade = two_lot_trade(0.0);
    let cb = compute_cost_basis(&trade.actions);
    assert!((cb.avg_entry_price - 110.0).abs() < 1e-10);
    assert_eq!(cb.total_buy_quantity, 20);
}

#[test]
fn full_exit_auto_closes_with_400() {
    let mut trade = two_lot_trade(0.0);
    let decision = trade.record_action(Action::sell(130.0, 20, day(6))).unwrap();
    assert_eq!(decision, LifecycleDecision::AutoClose { end_date: day(6) });
    assert!(trade.is_closed());
    let fr = trade.final_results().unwrap();
    assert!((fr.final_pnl - 400.0).abs() < 1e-10);
}

#[test]
fn commission_at_one_tenth_percent() {
    let mut trade = two_lot_trade(0.1);
    trade.record_action(Action::sell(130.0, 20, day(6))).unwrap();
    let cb = compute_cost_basis(&trade.actions);
    let realized = compute_realized_pnl(&trade.actions, &cb, 0.1);
    assert!((realized.total_commission - 4.8).abs() < 1e-10);
    assert!((realized.realized_pnl - 395.2).abs() < 1e-10);
    assert!((trade.final_results().unwrap().final_pnl - 395.2).abs() < 1e-10);
}

#[test]
fn r_multiple_against_planned_stop() {
    let mut trade = two_lot_trade(0.1);
    trade.record_action(Action::sell(130.0, 20, day(6))).unwrap();
    let r = trade.final_results().unwrap().final_r_multiple.unwrap();
    // 395.2 / ((110 - 95) * 20)
    assert!((r - 395.2 / 300.0).abs() < 1e-10);
    assert!((r - 1.317).abs() < 1e-3);
}

#[test]
fn oversell_is_rejected_before_mutation() {
    let mut trade = two_lot_trade(0.0);
    assert!(trade.record_action(Action::sell(130.0, 21, day(6))).is_err());
    assert_eq!(trade.actions.len(), 2);
    assert!(trade.is_open());
}

#[test]
fn actions_inserted_out_of_order_price_the_same() {
    let mut a = two_lot_trade(0.07);
    a.record_action(Action::sell(125.0, 8, day(8))).unwrap();

    let mut b = Trade::new("scenario", "AAPL", day(2)).with_stop_loss(95.0).with_commission_rate(0.07);
    b.actions = vec![
        Action::sell(125.0, 8, day(8)),
        Action::buy(120.0, 10, day(3)),
        Action::buy(100.0, 10, day(2)),
    ];

    let sa = summarize(&a, Some(118.0));
    let sb = summarize(&b, Some(118.0));
    assert_eq!(sa.cost_basis, sb.cost_basis);
    assert_eq!(sa.realized, sb.realized);
    assert_eq!(sa.unrealized, sb.unrealized);
}

#[test]
fn journal_json_roundtrip_keeps_final_results() {
    let mut trade = two_lot_trade(0.1);
    trade.record_action(Action::sell(130.0, 20, day(6))).unwrap();
    let json = serde_json::to_string(&trade).unwrap();
    let back: Trade = serde_json::from_str(&json).unwrap();
    assert_eq!(back.final_results(), trade.final_results());
    assert_eq!(back.end_date, Some(day(6)));
}
