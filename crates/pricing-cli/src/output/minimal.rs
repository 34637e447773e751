use serde_json::Value;

use super::render_value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "net_annual_savings",
        "annual_savings",
        "monthly_savings",
        "tier_id",
        "recommended_tier",
        "annual_price",
        "effective_roi_pct",
        "payback_days",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", render_value(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, render_value(val));
            return;
        }
    }

    println!("{}", render_value(result_obj));
}
