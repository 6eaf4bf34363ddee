use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. An amortization schedule in the result
/// becomes the CSV body; everything else prints as field,value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(fields) => {
            if let Some(Value::Array(rows)) = fields.get("schedule") {
                write_rows(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    if val.is_array() {
                        continue;
                    }
                    let _ = wtr.write_record([key.as_str(), &render(val)]);
                }
            }
        }
        Value::Array(rows) => {
            write_rows(&mut wtr, rows);
        }
        other => {
            let _ = wtr.write_record([&render(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for row in rows {
            if let Value::Object(fields) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| fields.get(*h).map(render).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
    } else {
        for row in rows {
            let _ = wtr.write_record([&render(row)]);
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
