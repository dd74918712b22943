//! Scenario run metrics.

use std::collections::BTreeMap;

/// Counters collected while running scenarios.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Quotes computed.
    pub total_quotes: u64,
    /// Expectations that matched.
    pub passed_checks: u64,
    /// Expectations that did not match.
    pub failed_checks: u64,
    /// Warnings seen, by code.
    warnings: BTreeMap<&'static str, u64>,
}

impl RunMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a computed quote.
    pub fn record_quote(&mut self) {
        self.total_quotes += 1;
    }

    /// Record the outcome of one expectation.
    pub fn record_check(&mut self, passed: bool) {
        if passed {
            self.passed_checks += 1;
        } else {
            self.failed_checks += 1;
        }
    }

    /// Record a warning code.
    pub fn record_warning(&mut self, code: &'static str) {
        *self.warnings.entry(code).or_insert(0) += 1;
    }

    /// Warning counts, ordered by code.
    pub fn warning_counts(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.warnings.iter().map(|(code, count)| (*code, *count))
    }

    /// Share of expectations that matched.
    pub fn pass_rate(&self) -> f64 {
        let total = self.passed_checks + self.failed_checks;
        if total == 0 {
            return 0.0;
        }

        self.passed_checks as f64 / total as f64
    }

    /// Whether every expectation matched.
    pub fn all_passed(&self) -> bool {
        self.failed_checks == 0
    }
}
