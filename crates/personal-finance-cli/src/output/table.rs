use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render the computation envelope as tables: summary fields first, the
/// amortization schedule (when present) as its own table, then warnings
/// and methodology.
pub fn print_table(value: &Value) {
    let map = match value {
        Value::Object(map) => map,
        other => {
            println!("{}", other);
            return;
        }
    };

    match map.get("result") {
        Some(Value::Object(fields)) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in fields {
                // The schedule gets its own table below
                if val.is_array() {
                    continue;
                }
                builder.push_record([key.as_str(), &render(val)]);
            }
            println!("{}", Table::from(builder));

            for (key, val) in fields {
                if let Value::Array(rows) = val {
                    println!("\n{}:", key);
                    print_row_table(rows);
                }
            }
        }
        Some(other) => print_field_table(other),
        None => {
            print_field_table(value);
            return;
        }
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = map.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_field_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &render(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

fn print_row_table(rows: &[Value]) {
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => {
            for row in rows {
                println!("{}", render(row));
            }
            return;
        }
    };

    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows {
        if let Value::Object(fields) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| fields.get(h.as_str()).map(render).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
