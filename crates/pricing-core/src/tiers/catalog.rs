use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::{Money, Rate, Volume};
use crate::PricingResult;

/// Ceiling on one tier dimension. `Unlimited` sits above every volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLimit {
    Limited(Decimal),
    Unlimited,
}

impl VolumeLimit {
    /// True when this ceiling accommodates the requested volume (inclusive).
    pub fn allows(&self, volume: Volume) -> bool {
        match self {
            VolumeLimit::Limited(ceiling) => volume <= *ceiling,
            VolumeLimit::Unlimited => true,
        }
    }

    /// The finite ceiling, if there is one.
    pub fn finite(&self) -> Option<Decimal> {
        match self {
            VolumeLimit::Limited(ceiling) => Some(*ceiling),
            VolumeLimit::Unlimited => None,
        }
    }
}

impl fmt::Display for VolumeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeLimit::Limited(ceiling) => write!(f, "{}", ceiling),
            VolumeLimit::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// A priced service level bounded by per-dimension monthly ceilings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    /// Stable identifier, e.g. "starter"
    pub id: String,
    /// Display name, e.g. "Starter"
    pub name: String,
    /// List price per month
    pub monthly_price: Money,
    /// Multiplier applied to 12 months of list price when billed annually
    /// (0.8 = 20% annual discount)
    pub annual_discount_factor: Rate,
    /// Monthly transaction receipt ceiling
    pub max_transaction_volume: VolumeLimit,
    /// Monthly operations attestation ceiling
    pub max_operations: VolumeLimit,
    /// Monthly content certification ceiling
    pub max_content: VolumeLimit,
}

/// Immutable ordered tier list. Construction validates that transaction
/// ceilings ascend and prices never decrease, which is what makes the
/// selector's first-match lookup and its monotonicity guarantee sound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierCatalog {
    tiers: Vec<Tier>,
}

impl TierCatalog {
    pub fn new(tiers: Vec<Tier>) -> PricingResult<Self> {
        if tiers.is_empty() {
            return Err(PricingError::EmptyCatalog);
        }

        for i in 1..tiers.len() {
            let (lower, upper) = (&tiers[i - 1], &tiers[i]);

            match (
                lower.max_transaction_volume.finite(),
                upper.max_transaction_volume.finite(),
            ) {
                (Some(a), Some(b)) if b <= a => {
                    return Err(PricingError::InvalidInput {
                        field: format!("tiers[{}].max_transaction_volume", i),
                        reason: format!(
                            "Ceiling {} does not ascend past previous ceiling {}",
                            b, a
                        ),
                    });
                }
                (None, Some(_)) => {
                    return Err(PricingError::InvalidInput {
                        field: format!("tiers[{}].max_transaction_volume", i),
                        reason: "Finite ceiling after an unlimited tier".to_string(),
                    });
                }
                _ => {}
            }

            if upper.monthly_price < lower.monthly_price {
                return Err(PricingError::InvalidInput {
                    field: format!("tiers[{}].monthly_price", i),
                    reason: format!(
                        "Price {} is below previous tier's price {}",
                        upper.monthly_price, lower.monthly_price
                    ),
                });
            }
        }

        Ok(Self { tiers })
    }

    /// Parse a catalog from a JSON array of tiers, validating ordering.
    pub fn from_json(json: &str) -> PricingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl TryFrom<Vec<Tier>> for TierCatalog {
    type Error = PricingError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierCatalog> for Vec<Tier> {
    fn from(catalog: TierCatalog) -> Self {
        catalog.tiers
    }
}

/// The platform's published tier sheet.
pub fn default_catalog() -> TierCatalog {
    // Constructed literally: the published sheet is known-ordered.
    TierCatalog {
        tiers: vec![
            Tier {
                id: "starter".to_string(),
                name: "Starter".to_string(),
                monthly_price: dec!(49),
                annual_discount_factor: dec!(0.8),
                max_transaction_volume: VolumeLimit::Limited(dec!(1000000)),
                max_operations: VolumeLimit::Limited(dec!(100000)),
                max_content: VolumeLimit::Limited(dec!(50000)),
            },
            Tier {
                id: "professional".to_string(),
                name: "Professional".to_string(),
                monthly_price: dec!(199),
                annual_discount_factor: dec!(0.8),
                max_transaction_volume: VolumeLimit::Limited(dec!(10000000)),
                max_operations: VolumeLimit::Limited(dec!(1000000)),
                max_content: VolumeLimit::Limited(dec!(500000)),
            },
            Tier {
                id: "scale".to_string(),
                name: "Scale".to_string(),
                monthly_price: dec!(499),
                annual_discount_factor: dec!(0.8),
                max_transaction_volume: VolumeLimit::Limited(dec!(100000000)),
                max_operations: VolumeLimit::Limited(dec!(10000000)),
                max_content: VolumeLimit::Limited(dec!(5000000)),
            },
            Tier {
                id: "enterprise".to_string(),
                name: "Enterprise".to_string(),
                monthly_price: dec!(1999),
                annual_discount_factor: dec!(0.8),
                max_transaction_volume: VolumeLimit::Unlimited,
                max_operations: VolumeLimit::Unlimited,
                max_content: VolumeLimit::Unlimited,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: &str, price: Decimal, ceiling: VolumeLimit) -> Tier {
        Tier {
            id: id.to_string(),
            name: id.to_string(),
            monthly_price: price,
            annual_discount_factor: dec!(0.8),
            max_transaction_volume: ceiling,
            max_operations: VolumeLimit::Unlimited,
            max_content: VolumeLimit::Unlimited,
        }
    }

    #[test]
    fn test_default_catalog_is_ordered() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 4);
        // Re-validating the literal must succeed
        assert!(TierCatalog::new(catalog.tiers().to_vec()).is_ok());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = TierCatalog::new(vec![]);
        assert!(matches!(result, Err(PricingError::EmptyCatalog)));
    }

    #[test]
    fn test_descending_ceilings_rejected() {
        let result = TierCatalog::new(vec![
            tier("a", dec!(49), VolumeLimit::Limited(dec!(1000))),
            tier("b", dec!(99), VolumeLimit::Limited(dec!(500))),
        ]);
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_finite_after_unlimited_rejected() {
        let result = TierCatalog::new(vec![
            tier("a", dec!(49), VolumeLimit::Unlimited),
            tier("b", dec!(99), VolumeLimit::Limited(dec!(500))),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decreasing_price_rejected() {
        let result = TierCatalog::new(vec![
            tier("a", dec!(99), VolumeLimit::Limited(dec!(1000))),
            tier("b", dec!(49), VolumeLimit::Limited(dec!(2000))),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_volume_limit_allows_is_inclusive() {
        let limit = VolumeLimit::Limited(dec!(1000000));
        assert!(limit.allows(dec!(1000000)));
        assert!(!limit.allows(dec!(1000001)));
        assert!(VolumeLimit::Unlimited.allows(dec!(999999999999)));
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalog = default_catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = TierCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed.tiers()[3].id, "enterprise");
        assert_eq!(
            parsed.tiers()[3].max_transaction_volume,
            VolumeLimit::Unlimited
        );
    }

    #[test]
    fn test_unordered_catalog_json_rejected() {
        // serde goes through the same validation as `new`
        let json = r#"[
            {"id":"b","name":"B","monthly_price":"99","annual_discount_factor":"0.8",
             "max_transaction_volume":{"limited":"5000"},"max_operations":"unlimited","max_content":"unlimited"},
            {"id":"a","name":"A","monthly_price":"199","annual_discount_factor":"0.8",
             "max_transaction_volume":{"limited":"1000"},"max_operations":"unlimited","max_content":"unlimited"}
        ]"#;
        assert!(TierCatalog::from_json(json).is_err());
    }
}
