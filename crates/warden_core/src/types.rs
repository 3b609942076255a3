//! Shared decision-engine types.
//!
//! Sizes are fractions of account equity (0.05 = 5%). Percentages carry their
//! sign: `daily_pnl_pct = -6.0` means a 6% loss on the day. Timestamps are
//! epoch milliseconds; the core never reads the wall clock, callers pass
//! `now_ms` explicitly.

/// Direction of a proposed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

/// Market-quality snapshot attached to an intent.
///
/// Absence of a snapshot is itself a gate signal (see `gates::execution`).
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    /// Last observed price.
    pub price: f64,
    /// Bid/ask spread as a percentage of price.
    pub spread_pct: f64,
    /// Estimated slippage for this order size, percent.
    pub slippage_estimate_pct: f64,
    /// Feed round-trip latency in milliseconds.
    pub latency_ms: u64,
    /// Age of the underlying market data in seconds.
    pub data_age_s: f64,
}

/// A proposed trade awaiting approval.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionIntent {
    pub action: Action,
    /// Non-empty instrument identifier.
    pub asset: String,
    /// Requested size as a fraction of equity, strictly positive.
    pub size: f64,
    /// Signal confidence in [0, 1].
    pub confidence: f64,
    /// Market snapshot, if the caller has one.
    pub market: Option<MarketSnapshot>,
    /// Opaque feature snapshot. Carried through for audit; no gate reads it.
    pub features: Vec<(String, f64)>,
    /// When the intent was produced (epoch ms).
    pub timestamp_ms: u64,
}

/// An open position. `size` is signed; magnitude counts toward gross exposure.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub asset: String,
    pub size: f64,
}

/// Account-wide operating posture, set by a supervisory process outside this
/// core. Gates echo it; none of them transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Normal,
    Limited,
    Safe,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Limited => "LIMITED",
            Mode::Safe => "SAFE",
        }
    }
}

/// Mutable account state, loaded once per decision and read-only to every gate.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    /// Account equity, strictly positive.
    pub equity: f64,
    /// Signed daily PnL percentage (negative = loss).
    pub daily_pnl_pct: f64,
    /// Signed peak-to-trough drawdown percentage (negative = decline).
    pub max_drawdown_pct: f64,
    pub mode: Mode,
    pub open_positions: Vec<Position>,
    /// When SAFE mode was last latched (epoch ms), if ever.
    pub safe_mode_latched_at_ms: Option<u64>,
    /// When NORMAL mode was last observed (epoch ms), if ever.
    pub last_normal_seen_at_ms: Option<u64>,
    /// Once set, authoritative for blocking until the wall clock passes it.
    pub cooldown_until_ms: Option<u64>,
}

impl AccountState {
    /// Fresh-account state used when no persisted state exists yet.
    pub fn default_state(now_ms: u64) -> Self {
        Self {
            equity: 100_000.0,
            daily_pnl_pct: 0.0,
            max_drawdown_pct: 0.0,
            mode: Mode::Normal,
            open_positions: Vec::new(),
            safe_mode_latched_at_ms: None,
            last_normal_seen_at_ms: Some(now_ms),
            cooldown_until_ms: None,
        }
    }

    /// Sum of absolute open position sizes, as a fraction of equity.
    pub fn gross_exposure(&self) -> f64 {
        self.open_positions.iter().map(|p| p.size.abs()).sum()
    }
}

/// Final decision kind for an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Execute,
    Resize,
    Hold,
    Block,
    /// Reserved for a future manual-review path. No current gate produces it.
    Review,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Execute => "EXECUTE",
            Decision::Resize => "RESIZE",
            Decision::Hold => "HOLD",
            Decision::Block => "BLOCK",
            Decision::Review => "REVIEW",
        }
    }
}

/// Stable token identifying why a gate altered or rejected a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    CooldownActive,
    LowConfidence,
    MaxSinglePositionExceeded,
    MaxGrossExposureExceeded,
    DailyLossLimitBreached,
    MaxDrawdownLimitBreached,
    NoRiskCapacity,
    TradeRateLimitExceeded,
    NoMarketSnapshot,
    SpreadTooWide,
    SlippageTooHigh,
    LatencyTooHigh,
    StaleData,
}

impl ReasonCode {
    /// Wire token. These strings are a published contract; never rename.
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::CooldownActive => "COOLDOWN_ACTIVE",
            ReasonCode::LowConfidence => "LOW_CONFIDENCE",
            ReasonCode::MaxSinglePositionExceeded => "MAX_SINGLE_POSITION_EXCEEDED",
            ReasonCode::MaxGrossExposureExceeded => "MAX_GROSS_EXPOSURE_EXCEEDED",
            ReasonCode::DailyLossLimitBreached => "DAILY_LOSS_LIMIT_BREACHED",
            ReasonCode::MaxDrawdownLimitBreached => "MAX_DRAWDOWN_LIMIT_BREACHED",
            ReasonCode::NoRiskCapacity => "NO_RISK_CAPACITY",
            ReasonCode::TradeRateLimitExceeded => "TRADE_RATE_LIMIT_EXCEEDED",
            ReasonCode::NoMarketSnapshot => "NO_MARKET_SNAPSHOT",
            ReasonCode::SpreadTooWide => "SPREAD_TOO_WIDE",
            ReasonCode::SlippageTooHigh => "SLIPPAGE_TOO_HIGH",
            ReasonCode::LatencyTooHigh => "LATENCY_TOO_HIGH",
            ReasonCode::StaleData => "STALE_DATA",
        }
    }
}

const REGISTRY: &[ReasonCode] = &[
    ReasonCode::CooldownActive,
    ReasonCode::LowConfidence,
    ReasonCode::MaxSinglePositionExceeded,
    ReasonCode::MaxGrossExposureExceeded,
    ReasonCode::DailyLossLimitBreached,
    ReasonCode::MaxDrawdownLimitBreached,
    ReasonCode::NoRiskCapacity,
    ReasonCode::TradeRateLimitExceeded,
    ReasonCode::NoMarketSnapshot,
    ReasonCode::SpreadTooWide,
    ReasonCode::SlippageTooHigh,
    ReasonCode::LatencyTooHigh,
    ReasonCode::StaleData,
];

pub fn reason_code_registry() -> &'static [ReasonCode] {
    REGISTRY
}

pub fn reason_code_registry_contains(code: ReasonCode) -> bool {
    REGISTRY.contains(&code)
}

/// Approved decision for an intent.
///
/// Invariants: `approved_size <= intent.size`; `decision == Block` implies
/// `approved_size == 0`. `reason_codes` is append-only in gate-evaluation
/// order. `mode` echoes the account mode at decision time.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub approved_size: f64,
    pub reason_codes: Vec<ReasonCode>,
    pub mode: Mode,
}

impl DecisionOutcome {
    pub fn block(reasons: Vec<ReasonCode>, mode: Mode) -> Self {
        Self {
            decision: Decision::Block,
            approved_size: 0.0,
            reason_codes: reasons,
            mode,
        }
    }

    pub fn hold(reasons: Vec<ReasonCode>, mode: Mode) -> Self {
        Self {
            decision: Decision::Hold,
            approved_size: 0.0,
            reason_codes: reasons,
            mode,
        }
    }
}
