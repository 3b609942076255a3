//! Confidence gate: hard stop on low-conviction intents.
//!
//! Confidence is binary, not scalable: an intent strictly below the floor is
//! held outright, never resized, and no downstream gate runs.

use crate::config::UncertaintyLimits;
use crate::types::DecisionIntent;

/// Result of the confidence gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceGateResult {
    /// Confidence meets or exceeds the floor.
    Passed { confidence: f64 },
    /// Confidence is strictly below the floor; the pipeline must hold.
    Held {
        confidence: f64,
        min_confidence: f64,
    },
}

/// Metrics for confidence gate outcomes.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceGateMetrics {
    held_total: u64,
    passed_total: u64,
}

impl ConfidenceGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held_total(&self) -> u64 {
        self.held_total
    }

    pub fn passed_total(&self) -> u64 {
        self.passed_total
    }

    fn record_held(&mut self) {
        self.held_total += 1;
    }

    fn record_passed(&mut self) {
        self.passed_total += 1;
    }
}

/// Evaluate the confidence gate. Equal-to-floor passes.
pub fn evaluate_confidence_gate(
    intent: &DecisionIntent,
    limits: &UncertaintyLimits,
    metrics: &mut ConfidenceGateMetrics,
) -> ConfidenceGateResult {
    if intent.confidence < limits.min_confidence {
        metrics.record_held();
        return ConfidenceGateResult::Held {
            confidence: intent.confidence,
            min_confidence: limits.min_confidence,
        };
    }
    metrics.record_passed();
    ConfidenceGateResult::Passed {
        confidence: intent.confidence,
    }
}
