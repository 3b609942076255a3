//! Risk gate: sizing caps and account circuit breakers.
//!
//! Checks run in a fixed order. The caps (single-position, gross-exposure)
//! shrink the approved size and keep going; the breakers (daily loss,
//! drawdown) terminate with a block and zero size regardless of any resize
//! already computed. Reason codes accumulate in check order.
//!
//! `max_trades_per_hour` is deliberately not enforced here: this gate keeps
//! no trade history. The rolling `TradeLog` collaborator owns that check
//! (see `gates::trade_log`).

use crate::config::RiskLimits;
use crate::types::{AccountState, DecisionIntent, ReasonCode};

/// Terminal kind of a risk gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskGateDecision {
    /// Full requested size approved.
    Execute,
    /// A cap shrank the size; `approved_size` carries the clipped value.
    Resize,
    /// A breaker tripped or no capacity remains.
    Block,
}

/// Result of the risk gate: decision, approved size, accumulated reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskGateResult {
    pub decision: RiskGateDecision,
    /// Always `<= intent.size`; 0 when blocked.
    pub approved_size: f64,
    pub reasons: Vec<ReasonCode>,
}

/// Metrics for risk gate outcomes.
#[derive(Debug, Clone, Default)]
pub struct RiskGateMetrics {
    executed_total: u64,
    resized_total: u64,
    blocked_total: u64,
    breaker_trips_total: u64,
}

impl RiskGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed_total(&self) -> u64 {
        self.executed_total
    }

    pub fn resized_total(&self) -> u64 {
        self.resized_total
    }

    pub fn blocked_total(&self) -> u64 {
        self.blocked_total
    }

    /// Blocks caused by a loss/drawdown breaker specifically.
    pub fn breaker_trips_total(&self) -> u64 {
        self.breaker_trips_total
    }

    fn record_executed(&mut self) {
        self.executed_total += 1;
    }

    fn record_resized(&mut self) {
        self.resized_total += 1;
    }

    fn record_blocked(&mut self) {
        self.blocked_total += 1;
    }

    fn record_breaker_trip(&mut self) {
        self.breaker_trips_total += 1;
        self.blocked_total += 1;
    }
}

/// Evaluate the risk gate for one intent against a consistent state snapshot.
pub fn evaluate_risk_gate(
    intent: &DecisionIntent,
    state: &AccountState,
    limits: &RiskLimits,
    metrics: &mut RiskGateMetrics,
) -> RiskGateResult {
    let mut reasons: Vec<ReasonCode> = Vec::new();
    let mut approved_size = intent.size;

    // 1) Single-position cap: clip, keep going.
    if approved_size > limits.max_single_position {
        reasons.push(ReasonCode::MaxSinglePositionExceeded);
        approved_size = limits.max_single_position;
    }

    // 2) Gross-exposure cap: clip to remaining capacity, may reach zero.
    let gross = state.gross_exposure();
    if gross + approved_size > limits.max_gross_exposure {
        reasons.push(ReasonCode::MaxGrossExposureExceeded);
        approved_size = (limits.max_gross_exposure - gross).max(0.0);
    }

    // 3) Daily-loss breaker: overrides any resize computed above.
    if state.daily_pnl_pct <= -limits.daily_loss_limit_pct {
        reasons.push(ReasonCode::DailyLossLimitBreached);
        metrics.record_breaker_trip();
        return RiskGateResult {
            decision: RiskGateDecision::Block,
            approved_size: 0.0,
            reasons,
        };
    }

    // 4) Drawdown breaker.
    if state.max_drawdown_pct <= -limits.max_drawdown_limit_pct {
        reasons.push(ReasonCode::MaxDrawdownLimitBreached);
        metrics.record_breaker_trip();
        return RiskGateResult {
            decision: RiskGateDecision::Block,
            approved_size: 0.0,
            reasons,
        };
    }

    // 5) Capacity: the exposure clip may have left nothing to trade.
    if approved_size <= 0.0 {
        reasons.push(ReasonCode::NoRiskCapacity);
        metrics.record_blocked();
        return RiskGateResult {
            decision: RiskGateDecision::Block,
            approved_size: 0.0,
            reasons,
        };
    }

    if approved_size < intent.size {
        metrics.record_resized();
        return RiskGateResult {
            decision: RiskGateDecision::Resize,
            approved_size,
            reasons,
        };
    }

    metrics.record_executed();
    RiskGateResult {
        decision: RiskGateDecision::Execute,
        approved_size,
        reasons,
    }
}
