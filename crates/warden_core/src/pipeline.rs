//! Decision pipeline: fixed-precedence gate orchestration.
//!
//! Order: cooldown -> confidence -> trade frequency (only when a log is
//! supplied) -> risk. The first terminal result short-circuits; non-terminal
//! risk reasons accumulate into the outcome. The pipeline is pure (identical
//! intent/state/config/now inputs yield identical outcomes) and it observes
//! the account mode without ever transitioning it.

use crate::config::EngineConfig;
use crate::gates::{
    ConfidenceGateMetrics, ConfidenceGateResult, CooldownGateMetrics, CooldownGateResult,
    RiskGateDecision, RiskGateMetrics, TradeFrequencyMetrics, TradeFrequencyResult, TradeLog,
    evaluate_confidence_gate, evaluate_cooldown_gate, evaluate_risk_gate,
    evaluate_trade_frequency,
};
use crate::types::{AccountState, Decision, DecisionIntent, DecisionOutcome, ReasonCode};

/// Aggregated metrics for the decision pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    pub cooldown: CooldownGateMetrics,
    pub confidence: ConfidenceGateMetrics,
    pub frequency: TradeFrequencyMetrics,
    pub risk: RiskGateMetrics,
    execute_total: u64,
    resize_total: u64,
    hold_total: u64,
    block_total: u64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute_total(&self) -> u64 {
        self.execute_total
    }

    pub fn resize_total(&self) -> u64 {
        self.resize_total
    }

    pub fn hold_total(&self) -> u64 {
        self.hold_total
    }

    pub fn block_total(&self) -> u64 {
        self.block_total
    }

    pub fn decisions_total(&self) -> u64 {
        self.execute_total + self.resize_total + self.hold_total + self.block_total
    }

    fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Execute => self.execute_total += 1,
            Decision::Resize => self.resize_total += 1,
            Decision::Hold | Decision::Review => self.hold_total += 1,
            Decision::Block => self.block_total += 1,
        }
    }
}

fn seal(outcome: DecisionOutcome, metrics: &mut PipelineMetrics) -> DecisionOutcome {
    metrics.record(outcome.decision);
    tracing::debug!(
        "DecisionOutcome decision={} approved_size={} reasons={}",
        outcome.decision.as_str(),
        outcome.approved_size,
        outcome.reason_codes.len()
    );
    outcome
}

/// Evaluate one intent against a consistent state/config snapshot.
///
/// `trade_log` is the opt-in hourly rate-limit collaborator; `None` skips the
/// frequency check entirely. Caller must hold any per-account serialization:
/// the exposure math is only correct against a snapshot that cannot change
/// under the evaluation.
pub fn decide(
    intent: &DecisionIntent,
    state: &AccountState,
    config: &EngineConfig,
    trade_log: Option<&TradeLog>,
    now_ms: u64,
    metrics: &mut PipelineMetrics,
) -> DecisionOutcome {
    // Cooldown: unconditional, bypasses everything else.
    if let CooldownGateResult::Blocked { .. } =
        evaluate_cooldown_gate(state, now_ms, &mut metrics.cooldown)
    {
        return seal(
            DecisionOutcome::block(vec![ReasonCode::CooldownActive], state.mode),
            metrics,
        );
    }

    // Confidence: hard stop, no resize path.
    if let ConfidenceGateResult::Held { .. } =
        evaluate_confidence_gate(intent, &config.uncertainty, &mut metrics.confidence)
    {
        return seal(
            DecisionOutcome::hold(vec![ReasonCode::LowConfidence], state.mode),
            metrics,
        );
    }

    // Trade frequency, when a log is wired in.
    if let Some(log) = trade_log {
        if let TradeFrequencyResult::Rejected { reason, .. } =
            evaluate_trade_frequency(log, &config.risk, now_ms, &mut metrics.frequency)
        {
            return seal(DecisionOutcome::hold(vec![reason], state.mode), metrics);
        }
    }

    // Risk: caps and breakers.
    let risk = evaluate_risk_gate(intent, state, &config.risk, &mut metrics.risk);
    let decision = match risk.decision {
        RiskGateDecision::Execute => Decision::Execute,
        RiskGateDecision::Resize => Decision::Resize,
        RiskGateDecision::Block => Decision::Block,
    };

    seal(
        DecisionOutcome {
            decision,
            approved_size: risk.approved_size,
            reason_codes: risk.reasons,
            mode: state.mode,
        },
        metrics,
    )
}
