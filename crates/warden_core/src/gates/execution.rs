//! Execution gate: market-quality checks on an intent's snapshot.
//!
//! Rules run first-match-wins. A missing snapshot and the soft quality
//! defects (spread, slippage, latency) hold the intent for a better moment;
//! stale data is the one condition escalated to a block, because a decision
//! priced off dead data is wrong rather than merely expensive.
//!
//! Callable on its own as a pre-trade dry-run; the decision pipeline does not
//! chain it.

use crate::config::ExecutionLimits;
use crate::types::{DecisionIntent, ReasonCode};

/// Severity of an execution gate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionVerdict {
    /// Market quality is acceptable.
    Pass,
    /// Defer until conditions improve.
    Hold,
    /// Data is unusable; do not trade on it.
    Block,
}

/// Result of the execution gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionGateResult {
    pub verdict: ExecutionVerdict,
    /// Empty on pass; exactly one code otherwise (first match wins).
    pub reasons: Vec<ReasonCode>,
}

/// Metrics for execution gate outcomes.
#[derive(Debug, Clone, Default)]
pub struct ExecutionGateMetrics {
    passed_total: u64,
    held_total: u64,
    blocked_total: u64,
}

impl ExecutionGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed_total(&self) -> u64 {
        self.passed_total
    }

    pub fn held_total(&self) -> u64 {
        self.held_total
    }

    pub fn blocked_total(&self) -> u64 {
        self.blocked_total
    }

    fn record(&mut self, verdict: ExecutionVerdict) {
        match verdict {
            ExecutionVerdict::Pass => self.passed_total += 1,
            ExecutionVerdict::Hold => self.held_total += 1,
            ExecutionVerdict::Block => self.blocked_total += 1,
        }
    }
}

fn finish(
    verdict: ExecutionVerdict,
    reason: Option<ReasonCode>,
    metrics: &mut ExecutionGateMetrics,
) -> ExecutionGateResult {
    metrics.record(verdict);
    ExecutionGateResult {
        verdict,
        reasons: reason.into_iter().collect(),
    }
}

/// Evaluate market quality for one intent. First failing rule decides.
pub fn evaluate_execution_gate(
    intent: &DecisionIntent,
    limits: &ExecutionLimits,
    metrics: &mut ExecutionGateMetrics,
) -> ExecutionGateResult {
    let market = match &intent.market {
        Some(m) => m,
        None => {
            return finish(
                ExecutionVerdict::Hold,
                Some(ReasonCode::NoMarketSnapshot),
                metrics,
            );
        }
    };

    if market.spread_pct > limits.max_spread_pct {
        return finish(
            ExecutionVerdict::Hold,
            Some(ReasonCode::SpreadTooWide),
            metrics,
        );
    }

    if market.slippage_estimate_pct > limits.max_slippage_pct {
        return finish(
            ExecutionVerdict::Hold,
            Some(ReasonCode::SlippageTooHigh),
            metrics,
        );
    }

    if market.latency_ms > limits.max_latency_ms {
        return finish(
            ExecutionVerdict::Hold,
            Some(ReasonCode::LatencyTooHigh),
            metrics,
        );
    }

    if market.data_age_s > limits.stale_data_s {
        return finish(
            ExecutionVerdict::Block,
            Some(ReasonCode::StaleData),
            metrics,
        );
    }

    finish(ExecutionVerdict::Pass, None, metrics)
}
