//! Deal readiness audit: nine independent rule checks folded into a tiered
//! outcome.
//!
//! Auditing is a pure computation over a [`DealRecord`] and a [`RuleConfig`].
//! Callers are expected to hand over fully shaped records; the serde layer in
//! [`domain`] fills absent fields with empty defaults so a sparse payload
//! still produces a complete report.

pub mod checks;
pub mod domain;
pub mod intake;
pub mod outcome;
pub mod report;
pub mod rules;

#[cfg(test)]
mod tests;

pub use checks::CheckResult;
pub use domain::{DealRecord, DealStatus, HistoricalPerformance, InventoryStrength, Targeting};
pub use intake::{DealIntakeError, DealRecordLoader};
pub use outcome::{Outcome, OutcomeColor, OutcomeTier};
pub use report::{AuditReport, CheckEntry, CheckKind, IssueView};
pub use rules::{CpmRange, RuleConfig, RuleConfigError};

use tracing::debug;

/// Stateless auditor bound to one rule policy. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct DealAuditor {
    rules: RuleConfig,
}

impl DealAuditor {
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(RuleConfig::standard())
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn audit(&self, deal: &DealRecord) -> AuditReport {
        audit(deal, &self.rules)
    }
}

impl Default for DealAuditor {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs every check against `deal` in [`CheckKind::ordered`] order.
pub fn audit(deal: &DealRecord, rules: &RuleConfig) -> AuditReport {
    let report = AuditReport::new([
        checks::check_deal_status(deal.status.as_ref()),
        checks::check_buyer_seat(&deal.buyer_seat_id),
        checks::check_kvps(&deal.kvps, rules),
        checks::check_targeting(&deal.targeting, rules),
        checks::check_deal_list(&deal.deal_list_id),
        checks::check_floor_price(deal.floor_price.as_deref(), rules),
        checks::check_creative_audit(deal.creative_approved),
        checks::check_inventory(deal.inventory_strength.as_ref(), rules),
        checks::check_historical(deal.historical_performance.as_ref(), rules),
    ]);

    let outcome = report.overall_outcome();
    debug!(
        deal_id = %deal.deal_id,
        passed = report.passed_count(),
        tier = outcome.outcome.label(),
        percentage = %outcome.percentage,
        "deal audit completed"
    );

    report
}
