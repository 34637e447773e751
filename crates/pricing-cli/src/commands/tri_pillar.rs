use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pricing_core::tri_pillar::{
    calculate_tri_pillar, PillarVolume, TriPillarAssumptions, TriPillarInput,
};

use crate::commands::tiers::load_catalog;
use crate::input;

/// Arguments for the three-pillar savings model
#[derive(Args)]
pub struct TriPillarArgs {
    /// Path to a JSON/YAML file with a full tri-pillar input
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly transaction volume
    #[arg(long)]
    pub tx_volume: Option<Decimal>,

    /// Cost of one missed fraud incident
    #[arg(long)]
    pub tx_incident_cost: Option<Decimal>,

    /// Monthly operations attestation volume
    #[arg(long)]
    pub ops_volume: Option<Decimal>,

    /// Cost of one missed compliance incident
    #[arg(long)]
    pub ops_incident_cost: Option<Decimal>,

    /// Monthly content certification volume
    #[arg(long)]
    pub content_volume: Option<Decimal>,

    /// Cost of one missed content incident
    #[arg(long)]
    pub content_incident_cost: Option<Decimal>,

    /// Override the baseline fraud error rate (0–100)
    #[arg(long)]
    pub tx_baseline_rate: Option<Decimal>,

    /// Override the improved fraud error rate (0–100)
    #[arg(long)]
    pub tx_improved_rate: Option<Decimal>,

    /// Override the baseline compliance error rate (0–100)
    #[arg(long)]
    pub ops_baseline_rate: Option<Decimal>,

    /// Override the improved compliance error rate (0–100)
    #[arg(long)]
    pub ops_improved_rate: Option<Decimal>,

    /// Override the baseline content error rate (0–100)
    #[arg(long)]
    pub content_baseline_rate: Option<Decimal>,

    /// Override the improved content error rate (0–100)
    #[arg(long)]
    pub content_improved_rate: Option<Decimal>,

    /// Path to a JSON/YAML tier catalog; the published catalog when omitted
    #[arg(long)]
    pub catalog: Option<String>,
}

pub fn run_tri_pillar(args: TriPillarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(&args.catalog)?;
    let input = resolve_input(&args)?;
    let output = calculate_tri_pillar(&catalog, &input)?;
    Ok(serde_json::to_value(output)?)
}

fn resolve_input(args: &TriPillarArgs) -> Result<TriPillarInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(apply_rate_overrides(input::file::read_input(path)?, args));
    }

    if let (
        Some(tx_volume),
        Some(tx_incident_cost),
        Some(ops_volume),
        Some(ops_incident_cost),
        Some(content_volume),
        Some(content_incident_cost),
    ) = (
        args.tx_volume,
        args.tx_incident_cost,
        args.ops_volume,
        args.ops_incident_cost,
        args.content_volume,
        args.content_incident_cost,
    ) {
        let input = TriPillarInput {
            transactions: PillarVolume {
                monthly_volume: tx_volume,
                cost_per_incident: tx_incident_cost,
            },
            operations: PillarVolume {
                monthly_volume: ops_volume,
                cost_per_incident: ops_incident_cost,
            },
            content: PillarVolume {
                monthly_volume: content_volume,
                cost_per_incident: content_incident_cost,
            },
            assumptions: TriPillarAssumptions::default(),
        };
        return Ok(apply_rate_overrides(input, args));
    }

    if let Some(value) = input::stdin::read_stdin()? {
        return Ok(apply_rate_overrides(serde_json::from_value(value)?, args));
    }

    Err("Provide --input, the full volume/cost flag set for all three pillars, or pipe JSON \
         via stdin"
        .into())
}

/// Rate flags override whatever the input carried, including file inputs.
fn apply_rate_overrides(mut input: TriPillarInput, args: &TriPillarArgs) -> TriPillarInput {
    let rates = &mut input.assumptions;
    if let Some(rate) = args.tx_baseline_rate {
        rates.transaction_fraud.baseline_error_rate_pct = rate;
    }
    if let Some(rate) = args.tx_improved_rate {
        rates.transaction_fraud.improved_error_rate_pct = rate;
    }
    if let Some(rate) = args.ops_baseline_rate {
        rates.operational_compliance.baseline_error_rate_pct = rate;
    }
    if let Some(rate) = args.ops_improved_rate {
        rates.operational_compliance.improved_error_rate_pct = rate;
    }
    if let Some(rate) = args.content_baseline_rate {
        rates.content_review.baseline_error_rate_pct = rate;
    }
    if let Some(rate) = args.content_improved_rate {
        rates.content_review.improved_error_rate_pct = rate;
    }
    input
}
