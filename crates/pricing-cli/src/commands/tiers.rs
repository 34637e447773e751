use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use pricing_core::tiers::{annual_price, default_catalog, recommend_tier, TierCatalog};

use crate::input;

/// Arguments for tier selection
#[derive(Args)]
pub struct SelectTierArgs {
    /// Monthly transaction volume
    #[arg(long)]
    pub volume: Decimal,

    /// Path to a JSON/YAML tier catalog; the published catalog when omitted
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for catalog listing
#[derive(Args)]
pub struct ListTiersArgs {
    /// Path to a JSON/YAML tier catalog; the published catalog when omitted
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Debug, Serialize)]
struct TierRow {
    id: String,
    name: String,
    monthly_price: Decimal,
    annual_price: Decimal,
    max_transactions: String,
    max_operations: String,
    max_content: String,
}

pub fn load_catalog(path: &Option<String>) -> Result<TierCatalog, Box<dyn std::error::Error>> {
    match path {
        Some(p) => input::file::read_input(p),
        None => Ok(default_catalog()),
    }
}

pub fn run_select_tier(args: SelectTierArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(&args.catalog)?;
    let output = recommend_tier(&catalog, args.volume)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_list_tiers(args: ListTiersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(&args.catalog)?;

    let rows: Vec<TierRow> = catalog
        .tiers()
        .iter()
        .map(|tier| TierRow {
            id: tier.id.clone(),
            name: tier.name.clone(),
            monthly_price: tier.monthly_price,
            annual_price: annual_price(tier),
            max_transactions: tier.max_transaction_volume.to_string(),
            max_operations: tier.max_operations.to_string(),
            max_content: tier.max_content.to_string(),
        })
        .collect();

    Ok(serde_json::to_value(rows)?)
}
