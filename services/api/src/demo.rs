use crate::render::render_report;
use chrono::Local;
use clap::Args;
use deal_audit::audit::{
    DealAuditor, DealRecord, DealRecordLoader, DealStatus, HistoricalPerformance,
    InventoryStrength, Targeting,
};
use deal_audit::config::AppConfig;
use deal_audit::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Path to a deal record JSON document
    #[arg(long)]
    pub(crate) deal: PathBuf,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Drop the creative approval and deal list from the sample deal
    #[arg(long)]
    pub(crate) with_gaps: bool,
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs { deal, json } = args;
    let config = AppConfig::load()?;
    let record = DealRecordLoader::from_path(&deal)?;
    let report = DealAuditor::new(config.rules).audit(&record);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(body) => println!("{}", body),
            Err(err) => println!("Report payload unavailable: {}", err),
        }
    } else {
        println!("Audited {} at {}", deal.display(), Local::now().format("%Y-%m-%d %H:%M"));
        print!("{}", render_report(&record.deal_id, &report));
    }

    Ok(())
}

pub(crate) fn run_rules() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    match serde_json::to_string_pretty(&config.rules) {
        Ok(body) => println!("{}", body),
        Err(err) => println!("Rule policy unavailable: {}", err),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut deal = sample_deal();
    if args.with_gaps {
        deal.creative_approved = false;
        deal.deal_list_id.clear();
    }

    println!("Deal audit demo");
    println!(
        "Policy: CPM ${}-${}, {} required KVPs, max {} segments\n",
        config.rules.market_cpm.min,
        config.rules.market_cpm.max,
        config.rules.required_kvps.len(),
        config.rules.max_segments
    );

    let report = DealAuditor::new(config.rules).audit(&deal);
    print!("{}", render_report(&deal.deal_id, &report));
    Ok(())
}

fn sample_deal() -> DealRecord {
    DealRecord {
        deal_id: "D-1001".to_string(),
        status: Some(DealStatus::Active),
        buyer_seat_id: "BS-12345".to_string(),
        kvps: ["msft_refresh", "brand_safety", "inventory_type"]
            .into_iter()
            .map(|key| (key.to_string(), true))
            .collect(),
        targeting: Targeting {
            geo: vec!["US".to_string(), "CA".to_string()],
            devices: vec!["mobile".to_string(), "desktop".to_string()],
            segments: vec!["tech_enthusiasts".to_string(), "finance".to_string()],
        },
        deal_list_id: "DL-9876".to_string(),
        floor_price: Some("5.50".to_string()),
        creative_approved: true,
        inventory_strength: Some(InventoryStrength::Strong),
        historical_performance: Some(HistoricalPerformance::Good),
    }
}
