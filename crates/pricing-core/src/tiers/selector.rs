use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PricingError;
use crate::tiers::catalog::{Tier, TierCatalog};
use crate::types::{with_metadata, ComputationOutput, Money, Volume};
use crate::PricingResult;

/// Price for a full year of the tier at the annual billing discount.
pub fn annual_price(tier: &Tier) -> Money {
    tier.monthly_price * dec!(12) * tier.annual_discount_factor
}

/// First tier whose transaction ceiling covers `volume` (boundary inclusive),
/// or the highest tier when every finite ceiling is exceeded. Never fails on
/// a non-empty catalog.
pub fn select_tier(catalog: &TierCatalog, volume: Volume) -> PricingResult<&Tier> {
    if volume < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: "volume".to_string(),
            reason: "Monthly transaction volume cannot be negative".to_string(),
        });
    }

    catalog
        .tiers()
        .iter()
        .find(|tier| tier.max_transaction_volume.allows(volume))
        .or_else(|| catalog.tiers().last())
        .ok_or(PricingError::EmptyCatalog)
}

/// Tier recommendation with derived pricing detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierRecommendation {
    pub tier_id: String,
    pub tier_name: String,
    pub monthly_price: Money,
    /// monthly_price × 12 × annual_discount_factor
    pub annual_price: Money,
    /// Transaction ceiling minus requested volume; None when unlimited
    pub transaction_headroom: Option<Decimal>,
}

/// Select a tier for a monthly transaction volume and wrap the result in the
/// standard computation envelope.
pub fn recommend_tier(
    catalog: &TierCatalog,
    volume: Volume,
) -> PricingResult<ComputationOutput<TierRecommendation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let tier = select_tier(catalog, volume)?;

    let transaction_headroom = tier.max_transaction_volume.finite().map(|c| c - volume);
    if let Some(headroom) = transaction_headroom {
        if headroom < Decimal::ZERO {
            warnings.push(format!(
                "Volume {} exceeds every tier ceiling; highest tier '{}' returned",
                volume, tier.id
            ));
        }
    }

    let result = TierRecommendation {
        tier_id: tier.id.clone(),
        tier_name: tier.name.clone(),
        monthly_price: tier.monthly_price,
        annual_price: annual_price(tier),
        transaction_headroom,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Ordered tier lookup: first ceiling covering the requested volume, highest tier as fallback",
        &serde_json::json!({
            "monthly_transaction_volume": volume.to_string(),
            "catalog_size": catalog.len(),
        }),
        warnings,
        elapsed,
        result,
    ))
}
