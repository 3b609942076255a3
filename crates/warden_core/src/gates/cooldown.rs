//! Cooldown gate: highest-precedence, unconditional block.
//!
//! After a breach, a supervisory process sets `cooldown_until_ms` on the
//! account. While the wall clock is strictly before that timestamp every
//! decision is blocked, no matter what the intent looks like. The gate is
//! read-only; it never clears the timestamp.

use crate::types::AccountState;

/// True iff a cooldown window is set and still open at `now_ms`.
pub fn cooldown_active(state: &AccountState, now_ms: u64) -> bool {
    match state.cooldown_until_ms {
        Some(until_ms) => now_ms < until_ms,
        None => false,
    }
}

/// Result of the cooldown gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownGateResult {
    /// Cooldown is open; the pipeline must block immediately.
    Blocked {
        /// End of the window (epoch ms).
        until_ms: u64,
    },
    /// No cooldown in effect.
    Clear,
}

/// Metrics for cooldown gate outcomes.
#[derive(Debug, Clone, Default)]
pub struct CooldownGateMetrics {
    blocked_total: u64,
    clear_total: u64,
}

impl CooldownGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocked_total(&self) -> u64 {
        self.blocked_total
    }

    pub fn clear_total(&self) -> u64 {
        self.clear_total
    }

    fn record_blocked(&mut self) {
        self.blocked_total += 1;
    }

    fn record_clear(&mut self) {
        self.clear_total += 1;
    }
}

/// Evaluate the cooldown gate against the account state.
pub fn evaluate_cooldown_gate(
    state: &AccountState,
    now_ms: u64,
    metrics: &mut CooldownGateMetrics,
) -> CooldownGateResult {
    match state.cooldown_until_ms {
        Some(until_ms) if now_ms < until_ms => {
            metrics.record_blocked();
            CooldownGateResult::Blocked { until_ms }
        }
        _ => {
            metrics.record_clear();
            CooldownGateResult::Clear
        }
    }
}
