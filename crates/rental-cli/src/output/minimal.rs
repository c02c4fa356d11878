use serde_json::Value;

use crate::output::metric_cell;

/// Fields worth printing on their own, most useful first.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_cash_flow",
    "total_roi",
    "cap_rate",
    "monthly_payment",
    "net_operating_income",
    "projected_monthly_rent",
];

/// Print just the key answer value from the output.
///
/// Searches the result object and its nested sections (metrics,
/// amortization, income) for well-known fields, then falls back to the
/// first field present.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(found) = lookup(map, key) {
                println!("{}", format_minimal(found));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

/// Find a key at the top level or one level down inside nested sections.
fn lookup<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(v) = map.get(key) {
        if !v.is_null() {
            return Some(v);
        }
    }
    for section in map.values() {
        if let Value::Object(inner) = section {
            // Metric objects are leaves, not sections
            if inner.contains_key("status") {
                continue;
            }
            if let Some(v) = inner.get(key) {
                if !v.is_null() {
                    return Some(v);
                }
            }
        }
    }
    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(map) => metric_cell(map)
            .unwrap_or_else(|| serde_json::to_string(value).unwrap_or_default()),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
