use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PricingError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types — Dispute ROI
// ---------------------------------------------------------------------------

/// Modeled fee avoidance per deflected dispute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiAssumptions {
    /// Card-network fee avoided alongside the ticket when a dispute is
    /// deflected. Set to zero to model ticket recovery only.
    pub dispute_fee: Money,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            dispute_fee: dec!(15),
        }
    }
}

/// Input for the dispute-deflection ROI projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// Average ticket value per sale
    pub ticket_value: Money,
    /// Completed sales per month
    pub monthly_sales_count: Decimal,
    /// Disputes as a share of sales, 0–100
    pub dispute_rate_pct: Percent,
    /// Share of disputes the platform deflects, 0–100
    pub deflection_rate_pct: Percent,
    /// Monthly price of the plan being evaluated
    pub plan_monthly_price: Money,
    /// Fee-avoidance assumptions; published defaults when omitted
    #[serde(default)]
    pub assumptions: RoiAssumptions,
}

/// Derived savings projection. Recomputed on every input change; never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiOutput {
    /// monthly_sales_count × dispute_rate / 100
    pub monthly_disputes: Decimal,
    /// monthly_disputes × deflection_rate / 100
    pub deflected_disputes: Decimal,
    /// deflected_disputes × (ticket_value + dispute_fee)
    pub monthly_savings: Money,
    /// monthly_savings × 12
    pub annual_savings: Money,
    /// Monthly dispute count at which expected savings cover the plan
    /// price; None when savings per dispute is zero (unreachable)
    pub disputes_to_break_even: Option<Decimal>,
    /// annual_savings / (plan price × 12) × 100; 0 when the plan is free
    pub effective_roi_pct: Percent,
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

// ---------------------------------------------------------------------------
// calculate_roi
// ---------------------------------------------------------------------------

/// Project monthly and annual dispute-deflection savings for a plan, with
/// break-even dispute volume and effective ROI percentage.
///
/// Pure and idempotent: identical inputs always produce identical outputs.
/// Division-by-zero cases yield defined sentinels (0, or None for an
/// unreachable break-even) rather than errors.
pub fn calculate_roi(input: &RoiInput) -> PricingResult<ComputationOutput<RoiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("ticket_value", input.ticket_value)?;
    require_non_negative("monthly_sales_count", input.monthly_sales_count)?;
    require_non_negative("plan_monthly_price", input.plan_monthly_price)?;
    require_non_negative("assumptions.dispute_fee", input.assumptions.dispute_fee)?;
    require_percentage("dispute_rate_pct", input.dispute_rate_pct)?;
    require_percentage("deflection_rate_pct", input.deflection_rate_pct)?;

    let dispute_rate = input.dispute_rate_pct / dec!(100);
    let deflection_rate = input.deflection_rate_pct / dec!(100);

    let monthly_disputes = input.monthly_sales_count * dispute_rate;
    let deflected_disputes = monthly_disputes * deflection_rate;

    // Each deflected dispute recovers the ticket and avoids the network fee
    let recovered_per_deflection = input.ticket_value + input.assumptions.dispute_fee;
    let monthly_savings = deflected_disputes * recovered_per_deflection;
    let annual_savings = monthly_savings * dec!(12);

    // Expected savings per dispute = deflection rate × recovery per deflection
    let savings_per_dispute = deflection_rate * recovered_per_deflection;
    let disputes_to_break_even = if savings_per_dispute.is_zero() {
        warnings.push(
            "Savings per dispute is zero; break-even dispute volume is unbounded".to_string(),
        );
        None
    } else {
        Some((input.plan_monthly_price / savings_per_dispute).ceil())
    };

    let annual_plan_cost = input.plan_monthly_price * dec!(12);
    let effective_roi_pct = if annual_plan_cost.is_zero() {
        warnings.push("Plan price is zero; effective ROI reported as 0".to_string());
        Decimal::ZERO
    } else {
        annual_savings / annual_plan_cost * dec!(100)
    };

    let result = RoiOutput {
        monthly_disputes,
        deflected_disputes,
        monthly_savings,
        annual_savings,
        disputes_to_break_even,
        effective_roi_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Dispute-deflection ROI: deflected volume × recovery per dispute, annualised against plan cost",
        &serde_json::json!({
            "dispute_rate_pct": input.dispute_rate_pct.to_string(),
            "deflection_rate_pct": input.deflection_rate_pct.to_string(),
            "dispute_fee": input.assumptions.dispute_fee.to_string(),
            "plan_monthly_price": input.plan_monthly_price.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
