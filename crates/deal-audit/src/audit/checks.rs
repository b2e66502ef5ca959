use super::domain::{DealStatus, HistoricalPerformance, InventoryStrength, Targeting};
use super::rules::RuleConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a single rule. A passing result never carries an issue and a
/// failing one always does; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    passed: bool,
    status: String,
    issue: Option<String>,
}

impl CheckResult {
    pub fn pass(status: impl Into<String>) -> Self {
        Self {
            passed: true,
            status: status.into(),
            issue: None,
        }
    }

    pub fn fail(status: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            passed: false,
            status: status.into(),
            issue: Some(issue.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn issue(&self) -> Option<&str> {
        self.issue.as_deref()
    }
}

pub fn check_deal_status(status: Option<&DealStatus>) -> CheckResult {
    match status {
        Some(DealStatus::Active) => CheckResult::pass("Active"),
        _ => CheckResult::fail("Inactive/Archived", "Deal is not active"),
    }
}

pub fn check_buyer_seat(buyer_seat_id: &str) -> CheckResult {
    if buyer_seat_id.is_empty() {
        CheckResult::fail("Missing", "Buyer seat ID missing")
    } else {
        CheckResult::pass("Present")
    }
}

pub fn check_kvps(kvps: &BTreeMap<String, bool>, rules: &RuleConfig) -> CheckResult {
    let missing: Vec<&str> = rules
        .required_kvps
        .iter()
        .filter(|key| !kvps.get(key.as_str()).copied().unwrap_or(false))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Valid")
    } else {
        CheckResult::fail("Invalid", format!("Missing: {}", missing.join(", ")))
    }
}

pub fn check_targeting(targeting: &Targeting, rules: &RuleConfig) -> CheckResult {
    let mut issues = Vec::new();

    let invalid_countries: Vec<&str> = targeting
        .geo
        .iter()
        .filter(|code| !rules.is_valid_country(code))
        .map(String::as_str)
        .collect();
    if !invalid_countries.is_empty() {
        issues.push(format!("Invalid countries: {}", invalid_countries.join(", ")));
    }

    let invalid_devices: Vec<&str> = targeting
        .devices
        .iter()
        .filter(|device| !rules.is_valid_device(device))
        .map(String::as_str)
        .collect();
    if !invalid_devices.is_empty() {
        issues.push(format!("Invalid devices: {}", invalid_devices.join(", ")));
    }

    if targeting.segments.len() > rules.max_segments {
        issues.push("Too many segments (restrictive)".to_string());
    }

    match issues.len() {
        0 => CheckResult::pass("All Pass"),
        1 => CheckResult::fail("Minor Issue", issues.join("; ")),
        _ => CheckResult::fail("Multiple Issues", issues.join("; ")),
    }
}

pub fn check_deal_list(deal_list_id: &str) -> CheckResult {
    if deal_list_id.is_empty() {
        CheckResult::fail("Unapproved", "Deal List ID missing")
    } else {
        CheckResult::pass("Approved")
    }
}

/// Unparsable and non-finite prices fail as "Not Set" instead of slipping
/// through the range comparison.
pub fn check_floor_price(floor_price: Option<&str>, rules: &RuleConfig) -> CheckResult {
    let raw = match floor_price.map(str::trim) {
        None | Some("") => return CheckResult::fail("Not Set", "Floor price not specified"),
        Some(raw) => raw,
    };

    let price = match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => return CheckResult::fail("Not Set", "Floor price is not a valid CPM value"),
    };

    let range = rules.market_cpm;
    if price < range.min {
        CheckResult::fail("Too Low", format!("Below market minimum (${})", range.min))
    } else if price > range.max {
        CheckResult::fail("Too High", format!("Above market maximum (${})", range.max))
    } else {
        CheckResult::pass("Competitive")
    }
}

pub fn check_creative_audit(creative_approved: bool) -> CheckResult {
    if creative_approved {
        CheckResult::pass("Approved")
    } else {
        CheckResult::fail("Rejected/Pending", "Creative not approved")
    }
}

pub fn check_inventory(strength: Option<&InventoryStrength>, rules: &RuleConfig) -> CheckResult {
    match strength {
        Some(strength) if rules.passing_inventory.contains(strength) => {
            CheckResult::pass(strength.label())
        }
        Some(strength) => CheckResult::fail(strength.label(), "Insufficient inventory"),
        None => CheckResult::fail("Insufficient", "Insufficient inventory"),
    }
}

pub fn check_historical(
    performance: Option<&HistoricalPerformance>,
    rules: &RuleConfig,
) -> CheckResult {
    match performance {
        Some(performance) if rules.passing_performance.contains(performance) => {
            CheckResult::pass(performance.label())
        }
        Some(performance) => CheckResult::fail(performance.label(), "Poor historical performance"),
        None => CheckResult::fail("Unknown", "Poor historical performance"),
    }
}
