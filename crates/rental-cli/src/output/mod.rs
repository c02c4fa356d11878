pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a derived-metric object ({"status": ..., "value": ...}) as a
/// single cell; `None` if the value is not a metric object.
pub fn metric_cell(map: &serde_json::Map<String, Value>) -> Option<String> {
    match map.get("status")? {
        Value::String(s) if s == "undefined" => Some("undefined".to_string()),
        Value::String(s) if s == "defined" => {
            let v = map.get("value")?;
            Some(match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        }
        _ => None,
    }
}
