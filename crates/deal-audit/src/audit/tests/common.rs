use std::collections::BTreeMap;

use crate::audit::domain::{
    DealRecord, DealStatus, HistoricalPerformance, InventoryStrength, Targeting,
};
use crate::audit::rules::RuleConfig;

pub(super) fn rules() -> RuleConfig {
    RuleConfig::standard()
}

pub(super) fn kvps(keys: &[&str]) -> BTreeMap<String, bool> {
    keys.iter().map(|key| (key.to_string(), true)).collect()
}

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn targeting(geo: &[&str], devices: &[&str], segments: &[&str]) -> Targeting {
    Targeting {
        geo: strings(geo),
        devices: strings(devices),
        segments: strings(segments),
    }
}

/// Deal that satisfies every rule in the standard policy.
pub(super) fn launch_ready_deal() -> DealRecord {
    DealRecord {
        deal_id: "D-1001".to_string(),
        status: Some(DealStatus::Active),
        buyer_seat_id: "BS-12345".to_string(),
        kvps: kvps(&["msft_refresh", "brand_safety", "inventory_type"]),
        targeting: targeting(&["US", "CA"], &["mobile", "desktop"], &["tech_enthusiasts"]),
        deal_list_id: "DL-9876".to_string(),
        floor_price: Some("7.5".to_string()),
        creative_approved: true,
        inventory_strength: Some(InventoryStrength::Strong),
        historical_performance: Some(HistoricalPerformance::Good),
    }
}

/// Deal failing buyer seat, deal list, creative audit and inventory.
pub(super) fn half_ready_deal() -> DealRecord {
    DealRecord {
        buyer_seat_id: String::new(),
        deal_list_id: String::new(),
        creative_approved: false,
        inventory_strength: Some(InventoryStrength::Weak),
        ..launch_ready_deal()
    }
}
