use serde_json::Value;
use std::io;

use crate::output::metric_cell;

/// Write output as CSV to stdout.
///
/// Arrays of rows (projection, schedule) become a header + data rows;
/// everything else flattens into two-column `field,value` records with
/// dotted paths for nested groups.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        Value::Object(map) => {
            let scope = map.get("result").unwrap_or(value);
            let _ = wtr.write_record(["field", "value"]);
            let mut records = Vec::new();
            flatten("", scope, &mut records);
            for (field, val) in records {
                let _ = wtr.write_record([field.as_str(), val.as_str()]);
            }
        }
        _ => {
            let _ = wtr.write_record([scalar_string(value)]);
        }
    }

    let _ = wtr.flush();
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            if let Some(cell) = metric_cell(map) {
                out.push((prefix.to_string(), cell));
                return;
            }
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, out);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), val, out);
            }
        }
        _ => out.push((prefix.to_string(), scalar_string(value))),
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(scalar_string).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([scalar_string(item)]);
        }
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
