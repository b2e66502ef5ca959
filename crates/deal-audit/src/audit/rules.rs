use super::domain::{HistoricalPerformance, InventoryStrength};
use serde::{Deserialize, Serialize};

/// Accepted market floor range in CPM dollars, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpmRange {
    pub min: f64,
    pub max: f64,
}

impl CpmRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for CpmRange {
    fn default() -> Self {
        Self {
            min: 2.0,
            max: 15.0,
        }
    }
}

/// Reference data every deal is audited against.
///
/// The policy is an explicit immutable value handed to the auditor, so
/// callers can run the same deal through different policies side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub market_cpm: CpmRange,
    pub required_kvps: Vec<String>,
    pub valid_device_types: Vec<String>,
    pub valid_country_codes: Vec<String>,
    pub max_segments: usize,
    pub passing_inventory: Vec<InventoryStrength>,
    pub passing_performance: Vec<HistoricalPerformance>,
}

impl RuleConfig {
    pub fn standard() -> Self {
        Self {
            market_cpm: CpmRange::default(),
            required_kvps: owned(&["msft_refresh", "brand_safety", "inventory_type"]),
            valid_device_types: owned(&["mobile", "desktop", "tablet"]),
            valid_country_codes: owned(&[
                "US", "CA", "GB", "DE", "FR", "AU", "JP", "IN", "BR", "MX",
            ]),
            max_segments: 5,
            passing_inventory: vec![InventoryStrength::Strong, InventoryStrength::Moderate],
            passing_performance: vec![HistoricalPerformance::Good, HistoricalPerformance::Mixed],
        }
    }

    pub fn validate(&self) -> Result<(), RuleConfigError> {
        let CpmRange { min, max } = self.market_cpm;
        if !min.is_finite() || !max.is_finite() {
            return Err(RuleConfigError::NonFiniteBound);
        }
        if min < 0.0 {
            return Err(RuleConfigError::NegativeMinimum(min));
        }
        if min > max {
            return Err(RuleConfigError::InvertedRange { min, max });
        }
        Ok(())
    }

    pub fn is_valid_country(&self, code: &str) -> bool {
        self.valid_country_codes.iter().any(|valid| valid == code)
    }

    pub fn is_valid_device(&self, device: &str) -> bool {
        self.valid_device_types.iter().any(|valid| valid == device)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Rejection reasons for a rule policy that cannot be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("market CPM bounds must be finite numbers")]
    NonFiniteBound,
    #[error("market CPM minimum {0} must not be negative")]
    NegativeMinimum(f64),
    #[error("market CPM minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
}
