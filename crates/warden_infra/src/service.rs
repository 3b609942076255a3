//! Decision service: per-account serialization and bookkeeping.
//!
//! One service instance owns one account. The inner mutex makes
//! load-state -> evaluate -> record one non-interleavable unit, because the
//! risk gate's exposure math is only correct against a snapshot that cannot
//! change mid-evaluation. Services for different accounts are independent and
//! run in parallel.

use std::sync::{Mutex, MutexGuard, PoisonError};

use warden_core::gates::{
    ExecutionGateMetrics, ExecutionGateResult, RiskGateResult, TradeLog, evaluate_execution_gate,
    evaluate_risk_gate,
};
use warden_core::pipeline::{PipelineMetrics, decide};
use warden_core::types::{AccountState, Decision, DecisionIntent, DecisionOutcome, Mode};

use crate::clock::epoch_ms;
use crate::store::{StateStore, StoreError};

struct ServiceInner {
    trade_log: TradeLog,
    metrics: PipelineMetrics,
    execution_metrics: ExecutionGateMetrics,
}

/// Serialized decision entry point for a single account.
pub struct DecisionService<S: StateStore> {
    store: S,
    inner: Mutex<ServiceInner>,
}

impl<S: StateStore> DecisionService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            inner: Mutex::new(ServiceInner {
                trade_log: TradeLog::new(),
                metrics: PipelineMetrics::new(),
                execution_metrics: ExecutionGateMetrics::new(),
            }),
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, ServiceInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the full pipeline against one consistent snapshot. Approved
    /// Execute/Resize outcomes are recorded into the trade log so the hourly
    /// rate limit sees them on the next call.
    pub fn decide(&self, intent: &DecisionIntent) -> Result<DecisionOutcome, StoreError> {
        let mut guard = self.lock_inner();
        let inner = &mut *guard;
        let config = self.store.load_config()?;
        let state = self.store.load_state()?;
        let now_ms = epoch_ms();

        let outcome = decide(
            intent,
            &state,
            &config,
            Some(&inner.trade_log),
            now_ms,
            &mut inner.metrics,
        );

        if matches!(outcome.decision, Decision::Execute | Decision::Resize) {
            inner.trade_log.record(&intent.asset, now_ms);
        }

        Ok(outcome)
    }

    /// Risk gate alone, for pre-trade dry-run checks.
    pub fn risk_preflight(&self, intent: &DecisionIntent) -> Result<RiskGateResult, StoreError> {
        let mut inner = self.lock_inner();
        let config = self.store.load_config()?;
        let state = self.store.load_state()?;
        Ok(evaluate_risk_gate(
            intent,
            &state,
            &config.risk,
            &mut inner.metrics.risk,
        ))
    }

    /// Execution gate alone, for pre-trade dry-run checks.
    pub fn execution_preflight(
        &self,
        intent: &DecisionIntent,
    ) -> Result<ExecutionGateResult, StoreError> {
        let mut inner = self.lock_inner();
        let config = self.store.load_config()?;
        Ok(evaluate_execution_gate(
            intent,
            &config.execution,
            &mut inner.execution_metrics,
        ))
    }

    /// Supervisory mode switch. Stamps `last_normal_seen_at` on NORMAL and
    /// `safe_mode_latched_at` on SAFE; no gate reads these, a higher-level
    /// control loop does.
    pub fn set_mode(&self, mode: Mode) -> Result<AccountState, StoreError> {
        let _inner = self.lock_inner();
        let mut state = self.store.load_state()?;
        let now_ms = epoch_ms();
        state.mode = mode;
        match mode {
            Mode::Normal => state.last_normal_seen_at_ms = Some(now_ms),
            Mode::Safe => state.safe_mode_latched_at_ms = Some(now_ms),
            Mode::Limited => {}
        }
        self.store.save_state(&state)?;
        Ok(state)
    }

    /// Breach handler hook: open a cooldown window. Every decision blocks
    /// until the wall clock passes `until_ms`.
    pub fn set_cooldown(&self, until_ms: u64) -> Result<AccountState, StoreError> {
        let _inner = self.lock_inner();
        let mut state = self.store.load_state()?;
        state.cooldown_until_ms = Some(until_ms);
        self.store.save_state(&state)?;
        Ok(state)
    }

    /// Current account state, as the `/state` endpoint returns it.
    pub fn state(&self) -> Result<AccountState, StoreError> {
        let _inner = self.lock_inner();
        self.store.load_state()
    }

    /// Current configuration, as the `/config` endpoint returns it.
    pub fn config(&self) -> Result<warden_core::config::EngineConfig, StoreError> {
        self.store.load_config()
    }

    /// Probe this account's store, as the `/health` endpoint reports it.
    pub fn health(&self) -> crate::health::HealthResponse {
        crate::health::check_health(&self.store)
    }

    /// Snapshot of accumulated pipeline metrics.
    pub fn pipeline_metrics(&self) -> PipelineMetrics {
        self.lock_inner().metrics.clone()
    }

    /// Approved trades recorded in the trailing hour.
    pub fn trades_last_hour(&self) -> u32 {
        let inner = self.lock_inner();
        inner
            .trade_log
            .count_within(warden_core::gates::HOUR_MS, epoch_ms())
    }
}
