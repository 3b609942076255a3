//! Tests for the risk gate: sizing caps, circuit breakers, capacity.

use warden_core::config::RiskLimits;
use warden_core::gates::{RiskGateDecision, RiskGateMetrics, evaluate_risk_gate};
use warden_core::types::{AccountState, Action, DecisionIntent, Mode, Position, ReasonCode};

fn intent(size: f64) -> DecisionIntent {
    DecisionIntent {
        action: Action::Buy,
        asset: "BTC-PERP".to_string(),
        size,
        confidence: 0.9,
        market: None,
        features: Vec::new(),
        timestamp_ms: 1_000,
    }
}

fn healthy_state() -> AccountState {
    AccountState {
        equity: 100_000.0,
        daily_pnl_pct: 0.0,
        max_drawdown_pct: 0.0,
        mode: Mode::Normal,
        open_positions: Vec::new(),
        safe_mode_latched_at_ms: None,
        last_normal_seen_at_ms: Some(1_000),
        cooldown_until_ms: None,
    }
}

fn limits() -> RiskLimits {
    RiskLimits::new(0.05, 0.20, 6, 5.0, 10.0).expect("valid limits")
}

// ─── Happy path ─────────────────────────────────────────────────────────

#[test]
fn test_within_all_limits_executes_full_size() {
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &healthy_state(), &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Execute);
    assert_eq!(result.approved_size, 0.03);
    assert!(result.reasons.is_empty());
    assert_eq!(m.executed_total(), 1);
}

// ─── Single-position cap ────────────────────────────────────────────────

#[test]
fn test_single_position_cap_clips_to_cap() {
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.10), &healthy_state(), &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Resize);
    assert_eq!(result.approved_size, 0.05);
    assert_eq!(result.reasons, vec![ReasonCode::MaxSinglePositionExceeded]);
    assert_eq!(m.resized_total(), 1);
}

#[test]
fn test_size_exactly_at_cap_is_not_clipped() {
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.05), &healthy_state(), &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Execute);
    assert_eq!(result.approved_size, 0.05);
    assert!(result.reasons.is_empty());
}

// ─── Gross-exposure cap ─────────────────────────────────────────────────

#[test]
fn test_gross_exposure_clips_to_remaining_capacity() {
    let mut state = healthy_state();
    state.open_positions = vec![
        Position {
            asset: "BTC-PERP".to_string(),
            size: 0.10,
        },
        Position {
            asset: "ETH-PERP".to_string(),
            size: -0.08,
        },
    ];
    // gross = 0.18 absolute; cap 0.20 leaves 0.02 of capacity.
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.05), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Resize);
    assert!((result.approved_size - 0.02).abs() < 1e-12);
    assert!(result.reasons.contains(&ReasonCode::MaxGrossExposureExceeded));
}

#[test]
fn test_short_positions_count_toward_gross_exposure() {
    let mut state = healthy_state();
    state.open_positions = vec![Position {
        asset: "ETH-PERP".to_string(),
        size: -0.20,
    }];
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
    assert_eq!(result.approved_size, 0.0);
    assert_eq!(
        result.reasons,
        vec![
            ReasonCode::MaxGrossExposureExceeded,
            ReasonCode::NoRiskCapacity
        ]
    );
    assert_eq!(m.blocked_total(), 1);
}

#[test]
fn test_both_caps_accumulate_reasons_in_order() {
    let mut state = healthy_state();
    state.open_positions = vec![Position {
        asset: "BTC-PERP".to_string(),
        size: 0.18,
    }];
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.10), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Resize);
    assert!((result.approved_size - 0.02).abs() < 1e-12);
    assert_eq!(
        result.reasons,
        vec![
            ReasonCode::MaxSinglePositionExceeded,
            ReasonCode::MaxGrossExposureExceeded
        ]
    );
}

// ─── Circuit breakers ───────────────────────────────────────────────────

#[test]
fn test_daily_loss_breaker_blocks() {
    let mut state = healthy_state();
    state.daily_pnl_pct = -6.0;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
    assert_eq!(result.approved_size, 0.0);
    assert!(result.reasons.contains(&ReasonCode::DailyLossLimitBreached));
    assert_eq!(m.breaker_trips_total(), 1);
}

#[test]
fn test_daily_loss_breaker_trips_exactly_at_limit() {
    let mut state = healthy_state();
    state.daily_pnl_pct = -5.0;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
}

#[test]
fn test_daily_loss_breaker_overrides_resize() {
    // Oversized request AND breached loss limit: the breaker wins, size is
    // zero, and the block decision stands no matter what the caps computed.
    let mut state = healthy_state();
    state.daily_pnl_pct = -6.0;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.10), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
    assert_eq!(result.approved_size, 0.0);
    assert!(result.reasons.contains(&ReasonCode::DailyLossLimitBreached));
}

#[test]
fn test_drawdown_breaker_trips_exactly_at_limit() {
    let mut state = healthy_state();
    state.max_drawdown_pct = -10.0;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
    assert_eq!(result.approved_size, 0.0);
    assert!(result.reasons.contains(&ReasonCode::MaxDrawdownLimitBreached));
}

#[test]
fn test_drawdown_breaker_blocks() {
    let mut state = healthy_state();
    state.max_drawdown_pct = -12.5;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Block);
    assert_eq!(result.approved_size, 0.0);
    assert!(result.reasons.contains(&ReasonCode::MaxDrawdownLimitBreached));
}

#[test]
fn test_positive_pnl_never_trips_breakers() {
    let mut state = healthy_state();
    state.daily_pnl_pct = 3.0;
    state.max_drawdown_pct = -2.0;
    let mut m = RiskGateMetrics::new();
    let result = evaluate_risk_gate(&intent(0.03), &state, &limits(), &mut m);

    assert_eq!(result.decision, RiskGateDecision::Execute);
}

// ─── Invariants ─────────────────────────────────────────────────────────

#[test]
fn test_approved_size_never_exceeds_requested() {
    let sizes = [0.001, 0.02, 0.05, 0.0501, 0.10, 0.50, 1.0];
    for &size in &sizes {
        let mut m = RiskGateMetrics::new();
        let result = evaluate_risk_gate(&intent(size), &healthy_state(), &limits(), &mut m);
        assert!(
            result.approved_size <= size,
            "approved {} > requested {}",
            result.approved_size,
            size
        );
        assert!(result.approved_size >= 0.0);
    }
}
