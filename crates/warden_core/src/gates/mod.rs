//! Safety gates in the decision chain.

pub mod confidence;
pub mod cooldown;
pub mod execution;
pub mod risk;
pub mod trade_log;

pub use confidence::{ConfidenceGateMetrics, ConfidenceGateResult, evaluate_confidence_gate};
pub use cooldown::{
    CooldownGateMetrics, CooldownGateResult, cooldown_active, evaluate_cooldown_gate,
};
pub use execution::{
    ExecutionGateMetrics, ExecutionGateResult, ExecutionVerdict, evaluate_execution_gate,
};
pub use risk::{RiskGateDecision, RiskGateMetrics, RiskGateResult, evaluate_risk_gate};
pub use trade_log::{
    HOUR_MS, TradeFrequencyMetrics, TradeFrequencyResult, TradeLog, evaluate_trade_frequency,
};
