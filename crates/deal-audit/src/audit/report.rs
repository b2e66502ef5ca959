use super::checks::CheckResult;
use super::outcome::Outcome;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The nine audit rules, in the order reports present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    DealStatus,
    BuyerSeat,
    Kvps,
    Targeting,
    DealList,
    FloorPrice,
    CreativeAudit,
    Inventory,
    Historical,
}

impl CheckKind {
    pub const COUNT: usize = 9;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::DealStatus,
            Self::BuyerSeat,
            Self::Kvps,
            Self::Targeting,
            Self::DealList,
            Self::FloorPrice,
            Self::CreativeAudit,
            Self::Inventory,
            Self::Historical,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DealStatus => "deal_status",
            Self::BuyerSeat => "buyer_seat",
            Self::Kvps => "kvps",
            Self::Targeting => "targeting",
            Self::DealList => "deal_list",
            Self::FloorPrice => "floor_price",
            Self::CreativeAudit => "creative_audit",
            Self::Inventory => "inventory",
            Self::Historical => "historical",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DealStatus => "Deal Status",
            Self::BuyerSeat => "Buyer Seat ID",
            Self::Kvps => "KVPs",
            Self::Targeting => "Targeting",
            Self::DealList => "Deal List ID",
            Self::FloorPrice => "Floor Price",
            Self::CreativeAudit => "Creative Audit",
            Self::Inventory => "Inventory",
            Self::Historical => "Historical Performance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckEntry {
    pub check: CheckKind,
    pub result: CheckResult,
}

/// Issue line for a failed check, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueView {
    pub check: CheckKind,
    pub label: &'static str,
    pub status: String,
    pub issue: String,
}

/// Complete audit of one deal.
///
/// Serializes as an object keyed by [`CheckKind::key`] in report order,
/// followed by `overall_outcome`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    checks: Vec<CheckEntry>,
    overall_outcome: Outcome,
}

impl AuditReport {
    pub(crate) fn new(results: [CheckResult; CheckKind::COUNT]) -> Self {
        let checks: Vec<CheckEntry> = CheckKind::ordered()
            .into_iter()
            .zip(results)
            .map(|(check, result)| CheckEntry { check, result })
            .collect();
        let passed = checks.iter().filter(|entry| entry.result.passed()).count();

        Self {
            overall_outcome: Outcome::from_counts(passed, CheckKind::COUNT),
            checks,
        }
    }

    pub fn checks(&self) -> &[CheckEntry] {
        &self.checks
    }

    pub fn get(&self, kind: CheckKind) -> &CheckResult {
        &self.checks[kind as usize].result
    }

    pub fn overall_outcome(&self) -> &Outcome {
        &self.overall_outcome
    }

    pub fn passed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|entry| entry.result.passed())
            .count()
    }

    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.checks
            .iter()
            .filter(|entry| !entry.result.passed())
            .map(|entry| entry.check)
            .collect()
    }

    pub fn issues(&self) -> Vec<IssueView> {
        self.checks
            .iter()
            .filter_map(|entry| {
                entry.result.issue().map(|issue| IssueView {
                    check: entry.check,
                    label: entry.check.label(),
                    status: entry.result.status().to_string(),
                    issue: issue.to_string(),
                })
            })
            .collect()
    }
}

impl Serialize for AuditReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.checks.len() + 1))?;
        for entry in &self.checks {
            map.serialize_entry(entry.check.key(), &entry.result)?;
        }
        map.serialize_entry("overall_outcome", &self.overall_outcome)?;
        map.end()
    }
}
