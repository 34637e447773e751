use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PricingError;
use crate::tiers::catalog::TierCatalog;
use crate::tiers::selector::{annual_price, select_tier};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Volume};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types — Tri-Pillar savings model
// ---------------------------------------------------------------------------

/// The three cost domains, modeled independently then summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    TransactionFraud,
    OperationalCompliance,
    ContentReview,
}

impl Pillar {
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::TransactionFraud => "Transaction Fraud",
            Pillar::OperationalCompliance => "Operational Compliance",
            Pillar::ContentReview => "Content Review",
        }
    }
}

/// Monthly activity and unit incident cost for one pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarVolume {
    /// Monthly item count: transactions, attestations, or content pieces
    pub monthly_volume: Volume,
    /// Fully loaded cost of one missed incident in this domain
    pub cost_per_incident: Money,
}

/// Error-rate assumptions for one pillar, 0–100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarAssumptions {
    /// Industry baseline error rate without the platform
    pub baseline_error_rate_pct: Percent,
    /// Residual error rate with platform receipts in place
    pub improved_error_rate_pct: Percent,
}

/// Error-rate assumptions across all three pillars. The defaults are the
/// published industry baselines; every figure can be overridden per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriPillarAssumptions {
    pub transaction_fraud: PillarAssumptions,
    pub operational_compliance: PillarAssumptions,
    pub content_review: PillarAssumptions,
}

impl Default for TriPillarAssumptions {
    fn default() -> Self {
        Self {
            transaction_fraud: PillarAssumptions {
                baseline_error_rate_pct: dec!(1.5),
                improved_error_rate_pct: dec!(0.3),
            },
            operational_compliance: PillarAssumptions {
                baseline_error_rate_pct: dec!(4.0),
                improved_error_rate_pct: dec!(0.8),
            },
            content_review: PillarAssumptions {
                baseline_error_rate_pct: dec!(8.0),
                improved_error_rate_pct: dec!(1.6),
            },
        }
    }
}

/// Input for the three-pillar savings model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriPillarInput {
    /// Transaction fraud domain
    pub transactions: PillarVolume,
    /// Operational compliance domain
    pub operations: PillarVolume,
    /// Content review domain
    pub content: PillarVolume,
    /// Error-rate assumptions; published baselines when omitted
    #[serde(default)]
    pub assumptions: TriPillarAssumptions,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Annual cost comparison for one pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarBreakdown {
    pub pillar: Pillar,
    /// monthly_volume × 12 × baseline rate × cost per incident
    pub baseline_annual_cost: Money,
    /// monthly_volume × 12 × improved rate × cost per incident
    pub improved_annual_cost: Money,
    /// baseline − improved
    pub annual_savings: Money,
}

/// The recommended tier, condensed for the savings report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSummary {
    pub id: String,
    pub name: String,
    pub monthly_price: Money,
    pub annual_price: Money,
}

/// Full three-pillar savings output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriPillarOutput {
    pub pillars: Vec<PillarBreakdown>,
    /// Sum of the three pillar savings
    pub gross_annual_savings: Money,
    /// Annual price of the recommended tier
    pub platform_annual_cost: Money,
    /// gross − platform, exactly
    pub net_annual_savings: Money,
    /// net / platform × 100; 0 when the platform cost is 0
    pub roi_pct: Percent,
    /// platform / gross × 365; None (unbounded) when gross ≤ 0
    pub payback_days: Option<Decimal>,
    pub recommended_tier: TierSummary,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn require_non_negative(field: &str, value: Decimal) -> PricingResult<()> {
    if value < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: field.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

fn require_percentage(field: &str, value: Percent) -> PricingResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(PricingError::InvalidInput {
            field: field.to_string(),
            reason: "Rate must be between 0 and 100".to_string(),
        });
    }
    Ok(())
}

fn validate_pillar(name: &str, volume: &PillarVolume) -> PricingResult<()> {
    require_non_negative(&format!("{}.monthly_volume", name), volume.monthly_volume)?;
    require_non_negative(
        &format!("{}.cost_per_incident", name),
        volume.cost_per_incident,
    )?;
    Ok(())
}

fn validate_rates(name: &str, rates: &PillarAssumptions) -> PricingResult<()> {
    require_percentage(
        &format!("{}.baseline_error_rate_pct", name),
        rates.baseline_error_rate_pct,
    )?;
    require_percentage(
        &format!("{}.improved_error_rate_pct", name),
        rates.improved_error_rate_pct,
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// calculate_tri_pillar
// ---------------------------------------------------------------------------

fn pillar_breakdown(
    pillar: Pillar,
    volume: &PillarVolume,
    rates: &PillarAssumptions,
) -> PillarBreakdown {
    let annual_items = volume.monthly_volume * dec!(12);
    let baseline_annual_cost =
        annual_items * (rates.baseline_error_rate_pct / dec!(100)) * volume.cost_per_incident;
    let improved_annual_cost =
        annual_items * (rates.improved_error_rate_pct / dec!(100)) * volume.cost_per_incident;

    PillarBreakdown {
        pillar,
        baseline_annual_cost,
        improved_annual_cost,
        annual_savings: baseline_annual_cost - improved_annual_cost,
    }
}

/// Compute baseline-vs-improved annual cost across the three pillars, total
/// savings net of platform cost, ROI, payback period, and the recommended
/// tier for the transaction volume.
pub fn calculate_tri_pillar(
    catalog: &TierCatalog,
    input: &TriPillarInput,
) -> PricingResult<ComputationOutput<TriPillarOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_pillar("transactions", &input.transactions)?;
    validate_pillar("operations", &input.operations)?;
    validate_pillar("content", &input.content)?;
    validate_rates("transaction_fraud", &input.assumptions.transaction_fraud)?;
    validate_rates(
        "operational_compliance",
        &input.assumptions.operational_compliance,
    )?;
    validate_rates("content_review", &input.assumptions.content_review)?;

    let pillars = vec![
        pillar_breakdown(
            Pillar::TransactionFraud,
            &input.transactions,
            &input.assumptions.transaction_fraud,
        ),
        pillar_breakdown(
            Pillar::OperationalCompliance,
            &input.operations,
            &input.assumptions.operational_compliance,
        ),
        pillar_breakdown(
            Pillar::ContentReview,
            &input.content,
            &input.assumptions.content_review,
        ),
    ];

    for breakdown in &pillars {
        if breakdown.annual_savings < Decimal::ZERO {
            warnings.push(format!(
                "{}: improved error rate exceeds the baseline; this pillar costs more with the platform",
                breakdown.pillar.label()
            ));
        }
    }

    let gross_annual_savings: Decimal = pillars.iter().map(|p| p.annual_savings).sum();

    let tier = select_tier(catalog, input.transactions.monthly_volume)?;
    let platform_annual_cost = annual_price(tier);
    let net_annual_savings = gross_annual_savings - platform_annual_cost;

    let roi_pct = if platform_annual_cost.is_zero() {
        warnings.push("Platform cost is zero; ROI reported as 0".to_string());
        Decimal::ZERO
    } else {
        net_annual_savings / platform_annual_cost * dec!(100)
    };

    let payback_days = if gross_annual_savings <= Decimal::ZERO {
        warnings.push("Annual savings are not positive; payback period is unbounded".to_string());
        None
    } else {
        Some(platform_annual_cost / gross_annual_savings * dec!(365))
    };

    let result = TriPillarOutput {
        pillars,
        gross_annual_savings,
        platform_annual_cost,
        net_annual_savings,
        roi_pct,
        payback_days,
        recommended_tier: TierSummary {
            id: tier.id.clone(),
            name: tier.name.clone(),
            monthly_price: tier.monthly_price,
            annual_price: platform_annual_cost,
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Three-pillar savings: baseline vs improved annual error cost per domain, net of recommended tier cost",
        &serde_json::json!({
            "transaction_fraud_rates": input.assumptions.transaction_fraud,
            "operational_compliance_rates": input.assumptions.operational_compliance,
            "content_review_rates": input.assumptions.content_review,
            "recommended_tier": tier.id,
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::catalog::default_catalog;

    fn basic_input() -> TriPillarInput {
        TriPillarInput {
            transactions: PillarVolume {
                monthly_volume: dec!(100000),
                cost_per_incident: dec!(250),
            },
            operations: PillarVolume {
                monthly_volume: dec!(20000),
                cost_per_incident: dec!(120),
            },
            content: PillarVolume {
                monthly_volume: dec!(50000),
                cost_per_incident: dec!(8),
            },
            assumptions: TriPillarAssumptions::default(),
        }
    }

    #[test]
    fn test_transaction_pillar_costs() {
        // annual items = 100000*12 = 1.2M
        // baseline: 1.2M * 1.5% * 250 = 4,500,000
        // improved: 1.2M * 0.3% * 250 = 900,000
        let catalog = default_catalog();
        let result = calculate_tri_pillar(&catalog, &basic_input()).unwrap();
        let tx = &result.result.pillars[0];
        assert_eq!(tx.pillar, Pillar::TransactionFraud);
        assert_eq!(tx.baseline_annual_cost, dec!(4500000));
        assert_eq!(tx.improved_annual_cost, dec!(900000));
        assert_eq!(tx.annual_savings, dec!(3600000));
    }

    #[test]
    fn test_all_three_pillars_present() {
        let catalog = default_catalog();
        let result = calculate_tri_pillar(&catalog, &basic_input()).unwrap();
        let pillars = &result.result.pillars;
        assert_eq!(pillars.len(), 3);
        // ops: 20000*12 * 4% * 120 = 1,152,000 baseline; 0.8% => 230,400
        assert_eq!(pillars[1].annual_savings, dec!(921600));
        // content: 50000*12 * 8% * 8 = 384,000 baseline; 1.6% => 76,800
        assert_eq!(pillars[2].annual_savings, dec!(307200));
    }

    #[test]
    fn test_net_savings_reconcile_exactly() {
        let catalog = default_catalog();
        let result = calculate_tri_pillar(&catalog, &basic_input()).unwrap();
        let out = &result.result;

        let pillar_sum: Decimal = out.pillars.iter().map(|p| p.annual_savings).sum();
        assert_eq!(out.gross_annual_savings, pillar_sum);
        // net = sum of pillar savings minus platform cost, exactly
        assert_eq!(
            out.net_annual_savings,
            pillar_sum - out.platform_annual_cost
        );
    }

    #[test]
    fn test_tier_recommended_from_transaction_volume() {
        let catalog = default_catalog();
        let result = calculate_tri_pillar(&catalog, &basic_input()).unwrap();
        // 100k transactions/month sits inside the 1M starter ceiling
        assert_eq!(result.result.recommended_tier.id, "starter");
        // 49 * 12 * 0.8 = 470.4
        assert_eq!(result.result.platform_annual_cost, dec!(470.4));
    }

    #[test]
    fn test_higher_volume_recommends_higher_tier() {
        let catalog = default_catalog();
        let mut input = basic_input();
        input.transactions.monthly_volume = dec!(50000000);
        let result = calculate_tri_pillar(&catalog, &input).unwrap();
        assert_eq!(result.result.recommended_tier.id, "scale");
    }

    #[test]
    fn test_payback_days() {
        let catalog = default_catalog();
        let result = calculate_tri_pillar(&catalog, &basic_input()).unwrap();
        let out = &result.result;
        // gross = 3,600,000 + 921,600 + 307,200 = 4,828,800
        assert_eq!(out.gross_annual_savings, dec!(4828800));
        // payback = 470.4 / 4,828,800 * 365 ≈ 0.0356 days
        let payback = out.payback_days.unwrap();
        assert!(payback > dec!(0.03) && payback < dec!(0.04));
    }

    #[test]
    fn test_zero_activity_means_unbounded_payback() {
        let catalog = default_catalog();
        let input = TriPillarInput {
            transactions: PillarVolume {
                monthly_volume: dec!(0),
                cost_per_incident: dec!(250),
            },
            operations: PillarVolume {
                monthly_volume: dec!(0),
                cost_per_incident: dec!(120),
            },
            content: PillarVolume {
                monthly_volume: dec!(0),
                cost_per_incident: dec!(8),
            },
            assumptions: TriPillarAssumptions::default(),
        };
        let result = calculate_tri_pillar(&catalog, &input).unwrap();
        let out = &result.result;
        assert_eq!(out.gross_annual_savings, dec!(0));
        assert_eq!(out.payback_days, None);
        // Net savings are the platform cost, negative
        assert_eq!(out.net_annual_savings, dec!(0) - out.platform_annual_cost);
        assert!(out.roi_pct < dec!(0));
    }

    #[test]
    fn test_override_assumptions_respected() {
        let catalog = default_catalog();
        let mut input = basic_input();
        input.assumptions.transaction_fraud = PillarAssumptions {
            baseline_error_rate_pct: dec!(2),
            improved_error_rate_pct: dec!(1),
        };
        let result = calculate_tri_pillar(&catalog, &input).unwrap();
        let tx = &result.result.pillars[0];
        // 1.2M * 2% * 250 = 6,000,000 vs 1.2M * 1% * 250 = 3,000,000
        assert_eq!(tx.baseline_annual_cost, dec!(6000000));
        assert_eq!(tx.annual_savings, dec!(3000000));
    }

    #[test]
    fn test_regressive_rates_warn_but_compute() {
        let catalog = default_catalog();
        let mut input = basic_input();
        input.assumptions.content_review = PillarAssumptions {
            baseline_error_rate_pct: dec!(1),
            improved_error_rate_pct: dec!(2),
        };
        let result = calculate_tri_pillar(&catalog, &input).unwrap();
        assert!(result.result.pillars[2].annual_savings < dec!(0));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_negative_volume_rejected() {
        let catalog = default_catalog();
        let mut input = basic_input();
        input.operations.monthly_volume = dec!(-5);
        assert!(calculate_tri_pillar(&catalog, &input).is_err());
    }

    #[test]
    fn test_rate_above_hundred_rejected() {
        let catalog = default_catalog();
        let mut input = basic_input();
        input.assumptions.content_review.baseline_error_rate_pct = dec!(150);
        assert!(calculate_tri_pillar(&catalog, &input).is_err());
    }

    #[test]
    fn test_serde_defaults_assumptions() {
        let json = r#"{
            "transactions": {"monthly_volume": "100000", "cost_per_incident": "250"},
            "operations": {"monthly_volume": "20000", "cost_per_incident": "120"},
            "content": {"monthly_volume": "50000", "cost_per_incident": "8"}
        }"#;
        let input: TriPillarInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input.assumptions.transaction_fraud.baseline_error_rate_pct,
            dec!(1.5)
        );
    }
}
