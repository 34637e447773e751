use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_value;

/// Format output as a table using the tabled crate.
///
/// Computation envelopes get their result section as a field/value table,
/// followed by warnings and methodology. Arrays of uniform objects (the
/// tier listing, pillar breakdowns) become one row per element.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_field_value(value),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(_) => print_field_value(result),
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", render_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(s) = warning {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_field_value(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", render_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}
