//! Wire/persistence documents and boundary validation.
//!
//! The core assumes validated input; every shape check lives here. Raw JSON
//! deserializes into `*Doc` types, and the `TryFrom`/`into_*` conversions are
//! the single place where out-of-range values are rejected. Conversion
//! failures are data (`DocError`), surfaced before any gate runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use warden_core::config::{
    ConfigError, EngineConfig, ExecutionLimits, RiskLimits, UncertaintyLimits,
};
use warden_core::types::{
    AccountState, Action, DecisionIntent, DecisionOutcome, MarketSnapshot, Mode, Position,
};

/// Validation failure at the document boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DocError {
    /// `asset` must be a non-empty identifier.
    EmptyAsset,
    /// `size` must be finite and strictly positive.
    NonPositiveSize,
    /// `confidence` must be finite and within [0, 1].
    ConfidenceOutOfRange,
    /// Named numeric field must be finite and non-negative.
    NegativeField(&'static str),
    /// `equity` must be finite and strictly positive.
    NonPositiveEquity,
    /// Threshold construction rejected the configuration.
    Config(ConfigError),
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::EmptyAsset => write!(f, "intent rejected: 'asset' is empty"),
            DocError::NonPositiveSize => {
                write!(f, "intent rejected: 'size' must be > 0")
            }
            DocError::ConfidenceOutOfRange => {
                write!(f, "intent rejected: 'confidence' must be within [0, 1]")
            }
            DocError::NegativeField(field) => {
                write!(f, "document rejected: '{field}' must be >= 0")
            }
            DocError::NonPositiveEquity => {
                write!(f, "state rejected: 'equity' must be > 0")
            }
            DocError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DocError {}

impl From<ConfigError> for DocError {
    fn from(err: ConfigError) -> Self {
        DocError::Config(err)
    }
}

fn checked_non_negative(field: &'static str, value: f64) -> Result<f64, DocError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DocError::NegativeField(field));
    }
    Ok(value)
}

// --- Configuration document ---------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyDoc {
    pub min_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDoc {
    pub max_single_position: f64,
    pub max_gross_exposure: f64,
    pub max_trades_per_hour: u32,
    pub daily_loss_limit_pct: f64,
    pub max_drawdown_limit_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDoc {
    pub max_spread_pct: f64,
    pub max_slippage_pct: f64,
    pub max_latency_ms: u64,
    pub stale_data_seconds: f64,
}

/// `config.json` shape: `uncertainty`, `risk`, `execution` sections.
/// Missing sections or fields fail deserialization (fail-closed by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDoc {
    pub uncertainty: UncertaintyDoc,
    pub risk: RiskDoc,
    pub execution: ExecutionDoc,
}

impl TryFrom<ConfigDoc> for EngineConfig {
    type Error = DocError;

    fn try_from(doc: ConfigDoc) -> Result<Self, Self::Error> {
        let uncertainty = UncertaintyLimits::new(doc.uncertainty.min_confidence)?;
        let risk = RiskLimits::new(
            doc.risk.max_single_position,
            doc.risk.max_gross_exposure,
            doc.risk.max_trades_per_hour,
            doc.risk.daily_loss_limit_pct,
            doc.risk.max_drawdown_limit_pct,
        )?;
        let execution = ExecutionLimits::new(
            doc.execution.max_spread_pct,
            doc.execution.max_slippage_pct,
            doc.execution.max_latency_ms,
            doc.execution.stale_data_seconds,
        )?;
        Ok(EngineConfig::new(uncertainty, risk, execution))
    }
}

impl From<&EngineConfig> for ConfigDoc {
    fn from(config: &EngineConfig) -> Self {
        Self {
            uncertainty: UncertaintyDoc {
                min_confidence: config.uncertainty.min_confidence,
            },
            risk: RiskDoc {
                max_single_position: config.risk.max_single_position,
                max_gross_exposure: config.risk.max_gross_exposure,
                max_trades_per_hour: config.risk.max_trades_per_hour,
                daily_loss_limit_pct: config.risk.daily_loss_limit_pct,
                max_drawdown_limit_pct: config.risk.max_drawdown_limit_pct,
            },
            execution: ExecutionDoc {
                max_spread_pct: config.execution.max_spread_pct,
                max_slippage_pct: config.execution.max_slippage_pct,
                max_latency_ms: config.execution.max_latency_ms,
                stale_data_seconds: config.execution.stale_data_s,
            },
        }
    }
}

// --- Account state document ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModeDoc {
    Normal,
    Limited,
    Safe,
}

impl From<ModeDoc> for Mode {
    fn from(doc: ModeDoc) -> Self {
        match doc {
            ModeDoc::Normal => Mode::Normal,
            ModeDoc::Limited => Mode::Limited,
            ModeDoc::Safe => Mode::Safe,
        }
    }
}

impl From<Mode> for ModeDoc {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => ModeDoc::Normal,
            Mode::Limited => ModeDoc::Limited,
            Mode::Safe => ModeDoc::Safe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDoc {
    pub asset: String,
    pub size: f64,
}

fn default_mode() -> ModeDoc {
    ModeDoc::Normal
}

/// `state.json` shape. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDoc {
    pub equity: f64,
    #[serde(default)]
    pub daily_pnl_pct: f64,
    #[serde(default)]
    pub max_drawdown_pct: f64,
    #[serde(default = "default_mode")]
    pub mode: ModeDoc,
    #[serde(default)]
    pub open_positions: Vec<PositionDoc>,
    #[serde(default)]
    pub safe_mode_latched_at: Option<u64>,
    #[serde(default)]
    pub last_normal_seen_at: Option<u64>,
    #[serde(default)]
    pub cooldown_until: Option<u64>,
}

impl TryFrom<StateDoc> for AccountState {
    type Error = DocError;

    fn try_from(doc: StateDoc) -> Result<Self, Self::Error> {
        if !doc.equity.is_finite() || doc.equity <= 0.0 {
            return Err(DocError::NonPositiveEquity);
        }
        Ok(AccountState {
            equity: doc.equity,
            daily_pnl_pct: doc.daily_pnl_pct,
            max_drawdown_pct: doc.max_drawdown_pct,
            mode: doc.mode.into(),
            open_positions: doc
                .open_positions
                .into_iter()
                .map(|p| Position {
                    asset: p.asset,
                    size: p.size,
                })
                .collect(),
            safe_mode_latched_at_ms: doc.safe_mode_latched_at,
            last_normal_seen_at_ms: doc.last_normal_seen_at,
            cooldown_until_ms: doc.cooldown_until,
        })
    }
}

impl From<&AccountState> for StateDoc {
    fn from(state: &AccountState) -> Self {
        Self {
            equity: state.equity,
            daily_pnl_pct: state.daily_pnl_pct,
            max_drawdown_pct: state.max_drawdown_pct,
            mode: state.mode.into(),
            open_positions: state
                .open_positions
                .iter()
                .map(|p| PositionDoc {
                    asset: p.asset.clone(),
                    size: p.size,
                })
                .collect(),
            safe_mode_latched_at: state.safe_mode_latched_at_ms,
            last_normal_seen_at: state.last_normal_seen_at_ms,
            cooldown_until: state.cooldown_until_ms,
        }
    }
}

// --- Intent document -----------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionDoc {
    Buy,
    Sell,
    Hold,
}

impl From<ActionDoc> for Action {
    fn from(doc: ActionDoc) -> Self {
        match doc {
            ActionDoc::Buy => Action::Buy,
            ActionDoc::Sell => Action::Sell,
            ActionDoc::Hold => Action::Hold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDoc {
    pub price: f64,
    pub spread_pct: f64,
    pub slippage_estimate_pct: f64,
    pub latency_ms: u64,
    pub data_age_seconds: f64,
}

/// Inbound `/decide` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDoc {
    pub action: ActionDoc,
    pub asset: String,
    pub size: f64,
    pub confidence: f64,
    #[serde(default)]
    pub market: Option<MarketDoc>,
    #[serde(default)]
    pub features_snapshot: BTreeMap<String, f64>,
    /// Epoch ms; defaults to receipt time when absent.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl IntentDoc {
    /// Validate and convert into a core intent. `now_ms` stamps intents that
    /// arrive without a timestamp.
    pub fn into_intent(self, now_ms: u64) -> Result<DecisionIntent, DocError> {
        if self.asset.is_empty() {
            return Err(DocError::EmptyAsset);
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(DocError::NonPositiveSize);
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DocError::ConfidenceOutOfRange);
        }

        let market = match self.market {
            Some(m) => Some(MarketSnapshot {
                price: m.price,
                spread_pct: checked_non_negative("market.spread_pct", m.spread_pct)?,
                slippage_estimate_pct: checked_non_negative(
                    "market.slippage_estimate_pct",
                    m.slippage_estimate_pct,
                )?,
                latency_ms: m.latency_ms,
                data_age_s: checked_non_negative(
                    "market.data_age_seconds",
                    m.data_age_seconds,
                )?,
            }),
            None => None,
        };

        Ok(DecisionIntent {
            action: self.action.into(),
            asset: self.asset,
            size: self.size,
            confidence: self.confidence,
            market,
            features: self.features_snapshot.into_iter().collect(),
            timestamp_ms: self.timestamp.unwrap_or(now_ms),
        })
    }
}

// --- Outcome document ----------------------------------------------------

/// Outbound `/decide` response body. Reason codes serialize as their stable
/// wire tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDoc {
    pub decision: String,
    pub approved_size: f64,
    pub reason_codes: Vec<String>,
    pub mode: String,
}

impl From<&DecisionOutcome> for OutcomeDoc {
    fn from(outcome: &DecisionOutcome) -> Self {
        Self {
            decision: outcome.decision.as_str().to_string(),
            approved_size: outcome.approved_size,
            reason_codes: outcome
                .reason_codes
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
            mode: outcome.mode.as_str().to_string(),
        }
    }
}
