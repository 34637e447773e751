use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pricing_core::roi::{calculate_roi, RoiAssumptions, RoiInput};

use crate::input;

/// Arguments for the dispute-deflection ROI projection
#[derive(Args)]
pub struct RoiArgs {
    /// Path to a JSON/YAML file with a full ROI input
    #[arg(long)]
    pub input: Option<String>,

    /// Average ticket value per sale
    #[arg(long)]
    pub ticket_value: Option<Decimal>,

    /// Completed sales per month
    #[arg(long)]
    pub monthly_sales: Option<Decimal>,

    /// Dispute rate as a percentage of sales (0–100)
    #[arg(long)]
    pub dispute_rate: Option<Decimal>,

    /// Share of disputes deflected, as a percentage (0–100)
    #[arg(long)]
    pub deflection_rate: Option<Decimal>,

    /// Monthly price of the plan being evaluated
    #[arg(long)]
    pub plan_price: Option<Decimal>,

    /// Override the modeled per-dispute fee avoidance (default 15)
    #[arg(long)]
    pub dispute_fee: Option<Decimal>,
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_input(&args)?;
    let output = calculate_roi(&input)?;
    Ok(serde_json::to_value(output)?)
}

/// Input file beats flags beats piped stdin, mirroring the other commands.
fn resolve_input(args: &RoiArgs) -> Result<RoiInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }

    if let (Some(ticket_value), Some(monthly_sales), Some(dispute_rate), Some(deflection_rate), Some(plan_price)) = (
        args.ticket_value,
        args.monthly_sales,
        args.dispute_rate,
        args.deflection_rate,
        args.plan_price,
    ) {
        let assumptions = match args.dispute_fee {
            Some(dispute_fee) => RoiAssumptions { dispute_fee },
            None => RoiAssumptions::default(),
        };
        return Ok(RoiInput {
            ticket_value,
            monthly_sales_count: monthly_sales,
            dispute_rate_pct: dispute_rate,
            deflection_rate_pct: deflection_rate,
            plan_monthly_price: plan_price,
            assumptions,
        });
    }

    if let Some(value) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }

    Err("Provide --input, the full flag set (--ticket-value --monthly-sales --dispute-rate \
         --deflection-rate --plan-price), or pipe JSON via stdin"
        .into())
}
