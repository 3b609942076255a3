//! Tests for the rolling trade log and hourly rate limit.

use warden_core::config::RiskLimits;
use warden_core::gates::{
    HOUR_MS, TradeFrequencyMetrics, TradeFrequencyResult, TradeLog, evaluate_trade_frequency,
};
use warden_core::types::ReasonCode;

const NOW_MS: u64 = 1_700_000_000_000;

fn limits(max_trades_per_hour: u32) -> RiskLimits {
    RiskLimits::new(0.05, 0.20, max_trades_per_hour, 5.0, 10.0).expect("valid limits")
}

// ─── Log windowing ──────────────────────────────────────────────────────

#[test]
fn test_count_within_window() {
    let mut log = TradeLog::new();
    log.record("BTC-PERP", NOW_MS - 30 * 60_000);
    log.record("ETH-PERP", NOW_MS - 10 * 60_000);
    log.record("BTC-PERP", NOW_MS);

    assert_eq!(log.count_within(HOUR_MS, NOW_MS), 3);
    assert_eq!(log.count_within(15 * 60_000, NOW_MS), 2);
    assert_eq!(log.count_for_asset("BTC-PERP", HOUR_MS, NOW_MS), 2);
}

#[test]
fn test_entries_older_than_an_hour_age_out() {
    let mut log = TradeLog::new();
    log.record("BTC-PERP", NOW_MS - HOUR_MS - 1);
    log.record("BTC-PERP", NOW_MS - HOUR_MS + 1);

    assert_eq!(log.count_within(HOUR_MS, NOW_MS), 1);
}

#[test]
fn test_record_prunes_expired_entries() {
    let mut log = TradeLog::new();
    log.record("BTC-PERP", NOW_MS - 2 * HOUR_MS);
    log.record("BTC-PERP", NOW_MS);

    assert_eq!(log.len(), 1);
}

#[test]
fn test_entry_exactly_one_hour_old_is_outside_window() {
    let mut log = TradeLog::new();
    log.record("BTC-PERP", NOW_MS - HOUR_MS);

    assert_eq!(log.count_within(HOUR_MS, NOW_MS), 0);
}

// ─── Frequency check ────────────────────────────────────────────────────

#[test]
fn test_under_cap_is_allowed() {
    let mut log = TradeLog::new();
    log.record("BTC-PERP", NOW_MS - 1_000);
    let mut m = TradeFrequencyMetrics::new();

    let result = evaluate_trade_frequency(&log, &limits(6), NOW_MS, &mut m);

    assert_eq!(
        result,
        TradeFrequencyResult::Allowed {
            trades_in_window: 1
        }
    );
    assert_eq!(m.allowed_total(), 1);
}

#[test]
fn test_at_cap_is_rejected() {
    let mut log = TradeLog::new();
    for i in 0..6 {
        log.record("BTC-PERP", NOW_MS - 1_000 * (i + 1));
    }
    let mut m = TradeFrequencyMetrics::new();

    let result = evaluate_trade_frequency(&log, &limits(6), NOW_MS, &mut m);

    assert_eq!(
        result,
        TradeFrequencyResult::Rejected {
            reason: ReasonCode::TradeRateLimitExceeded,
            trades_in_window: 6,
            max_trades_per_hour: 6,
        }
    );
    assert_eq!(m.rejected_total(), 1);
}

#[test]
fn test_zero_cap_disables_the_check() {
    let mut log = TradeLog::new();
    for i in 0..50 {
        log.record("BTC-PERP", NOW_MS - 1_000 * (i + 1));
    }
    let mut m = TradeFrequencyMetrics::new();

    let result = evaluate_trade_frequency(&log, &limits(0), NOW_MS, &mut m);

    assert!(matches!(result, TradeFrequencyResult::Allowed { .. }));
}

#[test]
fn test_cap_frees_up_as_trades_age_out() {
    let mut log = TradeLog::new();
    for i in 0..6 {
        log.record("BTC-PERP", NOW_MS - HOUR_MS + 60_000 * i);
    }
    let mut m = TradeFrequencyMetrics::new();

    // An hour later, all six have aged out of the window.
    let later = NOW_MS + HOUR_MS;
    let result = evaluate_trade_frequency(&log, &limits(6), later, &mut m);

    assert_eq!(
        result,
        TradeFrequencyResult::Allowed {
            trades_in_window: 0
        }
    );
}
