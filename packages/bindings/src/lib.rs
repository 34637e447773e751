use napi::Result as NapiResult;
use napi_derive::napi;

use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, value: &str) -> NapiResult<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|e| napi::Error::from_reason(format!("{}: {}", field, e)))
}

fn parse_catalog(catalog_json: Option<String>) -> NapiResult<pricing_core::tiers::TierCatalog> {
    match catalog_json {
        Some(json) => pricing_core::tiers::TierCatalog::from_json(&json).map_err(to_napi_error),
        None => Ok(pricing_core::tiers::default_catalog()),
    }
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_roi(input_json: String) -> NapiResult<String> {
    let input: pricing_core::roi::RoiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = pricing_core::roi::calculate_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_tri_pillar(input_json: String, catalog_json: Option<String>) -> NapiResult<String> {
    let catalog = parse_catalog(catalog_json)?;
    let input: pricing_core::tri_pillar::TriPillarInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        pricing_core::tri_pillar::calculate_tri_pillar(&catalog, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[napi]
pub fn select_tier(volume: String, catalog_json: Option<String>) -> NapiResult<String> {
    let catalog = parse_catalog(catalog_json)?;
    let volume = parse_decimal("volume", &volume)?;
    let output = pricing_core::tiers::recommend_tier(&catalog, volume).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_catalog() -> NapiResult<String> {
    serde_json::to_string(&pricing_core::tiers::default_catalog()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String, currency_code: String) -> NapiResult<String> {
    let amount = parse_decimal("amount", &amount)?;
    let currency = pricing_core::Currency::from_code(&currency_code);
    Ok(pricing_core::format::format_currency(amount, &currency))
}

#[napi]
pub fn format_percentage(value: String) -> NapiResult<String> {
    let value = parse_decimal("value", &value)?;
    Ok(pricing_core::format::format_percentage(value))
}
