//! Validated gate thresholds.
//!
//! Thresholds are checked at construction, not at decision time: a bad value
//! here is a deployment defect and must fail-closed before any intent is
//! evaluated. Business rejections never travel through `ConfigError`.

use std::fmt;

/// Error for a threshold that cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is NaN or infinite.
    NotFinite { field: &'static str },
    /// Value is negative where only non-negative is meaningful.
    Negative { field: &'static str },
    /// Value is outside its documented range.
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => {
                write!(f, "config fail-closed: '{field}' is not finite")
            }
            ConfigError::Negative { field } => {
                write!(f, "config fail-closed: '{field}' is negative")
            }
            ConfigError::OutOfRange { field, expected } => {
                write!(f, "config fail-closed: '{field}' out of range, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field });
    }
    Ok(value)
}

/// Confidence floor for the uncertainty gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyLimits {
    pub min_confidence: f64,
}

impl UncertaintyLimits {
    pub fn new(min_confidence: f64) -> Result<Self, ConfigError> {
        let min_confidence = non_negative("uncertainty.min_confidence", min_confidence)?;
        if min_confidence > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "uncertainty.min_confidence",
                expected: "0..=1",
            });
        }
        Ok(Self { min_confidence })
    }
}

/// Position-sizing caps and circuit-breaker thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLimits {
    /// Largest single position, fraction of equity.
    pub max_single_position: f64,
    /// Cap on summed absolute position sizes, fraction of equity.
    pub max_gross_exposure: f64,
    /// Rolling hourly trade cap. 0 disables the check.
    pub max_trades_per_hour: u32,
    /// Daily-loss breaker trips at `daily_pnl_pct <= -daily_loss_limit_pct`.
    pub daily_loss_limit_pct: f64,
    /// Drawdown breaker trips at `max_drawdown_pct <= -max_drawdown_limit_pct`.
    pub max_drawdown_limit_pct: f64,
}

impl RiskLimits {
    pub fn new(
        max_single_position: f64,
        max_gross_exposure: f64,
        max_trades_per_hour: u32,
        daily_loss_limit_pct: f64,
        max_drawdown_limit_pct: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_single_position: non_negative("risk.max_single_position", max_single_position)?,
            max_gross_exposure: non_negative("risk.max_gross_exposure", max_gross_exposure)?,
            max_trades_per_hour,
            daily_loss_limit_pct: non_negative("risk.daily_loss_limit_pct", daily_loss_limit_pct)?,
            max_drawdown_limit_pct: non_negative(
                "risk.max_drawdown_limit_pct",
                max_drawdown_limit_pct,
            )?,
        })
    }
}

/// Market-quality ceilings for the execution gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionLimits {
    pub max_spread_pct: f64,
    pub max_slippage_pct: f64,
    pub max_latency_ms: u64,
    /// Data older than this (seconds) is treated as unusable, not just poor.
    pub stale_data_s: f64,
}

impl ExecutionLimits {
    pub fn new(
        max_spread_pct: f64,
        max_slippage_pct: f64,
        max_latency_ms: u64,
        stale_data_s: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_spread_pct: non_negative("execution.max_spread_pct", max_spread_pct)?,
            max_slippage_pct: non_negative("execution.max_slippage_pct", max_slippage_pct)?,
            max_latency_ms,
            stale_data_s: non_negative("execution.stale_data_seconds", stale_data_s)?,
        })
    }
}

/// Full threshold set for one decision call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub uncertainty: UncertaintyLimits,
    pub risk: RiskLimits,
    pub execution: ExecutionLimits,
}

impl EngineConfig {
    pub fn new(
        uncertainty: UncertaintyLimits,
        risk: RiskLimits,
        execution: ExecutionLimits,
    ) -> Self {
        Self {
            uncertainty,
            risk,
            execution,
        }
    }

    /// Conservative defaults for a fresh deployment.
    pub fn sane_defaults() -> Self {
        Self {
            uncertainty: UncertaintyLimits {
                min_confidence: 0.55,
            },
            risk: RiskLimits {
                max_single_position: 0.05,
                max_gross_exposure: 0.20,
                max_trades_per_hour: 6,
                daily_loss_limit_pct: 5.0,
                max_drawdown_limit_pct: 10.0,
            },
            execution: ExecutionLimits {
                max_spread_pct: 0.5,
                max_slippage_pct: 0.3,
                max_latency_ms: 250,
                stale_data_s: 10.0,
            },
        }
    }
}
