//! Rolling trade log backing the hourly trade-rate limit.
//!
//! The risk gate reads `max_trades_per_hour` but keeps no history of its own;
//! enforcement lives here so the risk gate's contract stays untouched. The
//! pipeline consults the log only when the caller supplies one; running
//! without a log reproduces the historical unenforced behavior.
//!
//! Entries are timestamped (epoch ms) and pruned lazily on record.

use crate::config::RiskLimits;
use crate::types::ReasonCode;

/// One hour in epoch milliseconds.
pub const HOUR_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq)]
struct TradeRecord {
    asset: String,
    at_ms: u64,
}

/// In-memory timestamped record of executed trades for one account.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    entries: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an executed trade and drop entries older than one hour.
    pub fn record(&mut self, asset: &str, now_ms: u64) {
        let horizon = now_ms.saturating_sub(HOUR_MS);
        self.entries.retain(|e| e.at_ms > horizon);
        self.entries.push(TradeRecord {
            asset: asset.to_string(),
            at_ms: now_ms,
        });
    }

    /// Trades recorded within `(now_ms - window_ms, now_ms]`.
    pub fn count_within(&self, window_ms: u64, now_ms: u64) -> u32 {
        let horizon = now_ms.saturating_sub(window_ms);
        self.entries
            .iter()
            .filter(|e| e.at_ms > horizon && e.at_ms <= now_ms)
            .count() as u32
    }

    /// Trades for one asset within the window. Queryable for diagnostics;
    /// the rate limit itself is account-wide.
    pub fn count_for_asset(&self, asset: &str, window_ms: u64, now_ms: u64) -> u32 {
        let horizon = now_ms.saturating_sub(window_ms);
        self.entries
            .iter()
            .filter(|e| e.asset == asset && e.at_ms > horizon && e.at_ms <= now_ms)
            .count() as u32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of the trade-frequency check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeFrequencyResult {
    /// Under the hourly cap (or the cap is disabled).
    Allowed { trades_in_window: u32 },
    /// At or over the cap; the pipeline holds the intent.
    Rejected {
        reason: ReasonCode,
        trades_in_window: u32,
        max_trades_per_hour: u32,
    },
}

/// Metrics for trade-frequency outcomes.
#[derive(Debug, Clone, Default)]
pub struct TradeFrequencyMetrics {
    allowed_total: u64,
    rejected_total: u64,
}

impl TradeFrequencyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }

    fn record_allowed(&mut self) {
        self.allowed_total += 1;
    }

    fn record_rejected(&mut self) {
        self.rejected_total += 1;
    }
}

/// Evaluate the hourly trade-rate limit against the log.
pub fn evaluate_trade_frequency(
    log: &TradeLog,
    limits: &RiskLimits,
    now_ms: u64,
    metrics: &mut TradeFrequencyMetrics,
) -> TradeFrequencyResult {
    let trades_in_window = log.count_within(HOUR_MS, now_ms);

    if limits.max_trades_per_hour == 0 {
        metrics.record_allowed();
        return TradeFrequencyResult::Allowed { trades_in_window };
    }

    if trades_in_window >= limits.max_trades_per_hour {
        metrics.record_rejected();
        return TradeFrequencyResult::Rejected {
            reason: ReasonCode::TradeRateLimitExceeded,
            trades_in_window,
            max_trades_per_hour: limits.max_trades_per_hour,
        };
    }

    metrics.record_allowed();
    TradeFrequencyResult::Allowed { trades_in_window }
}
