use serde_json::Value;

/// Print just the headline number from the output.
///
/// Looks for the most useful field of each calculator first, then falls
/// back to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "payment",
        "base_monthly_payment",
        "total_value",
        "total_interest",
    ];

    if let Value::Object(fields) = result {
        for key in &priority_keys {
            if let Some(val) = fields.get(*key) {
                if !val.is_null() {
                    println!("{}", render(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = fields.iter().next() {
            println!("{}: {}", key, render(val));
            return;
        }
    }

    println!("{}", render(result));
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
