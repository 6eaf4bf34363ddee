use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a typed request from a JSON or YAML file, chosen by extension.
pub fn load<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let p = Path::new(path);

    if !p.exists() {
        return Err(format!("File not found: {}", path).into());
    }
    if !p.is_file() {
        return Err(format!("Not a file: {}", path).into());
    }

    let contents =
        fs::read_to_string(p).map_err(|e| format!("Failed to read '{}': {}", path, e))?;

    let request: T = match p.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?,
        _ => serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?,
    };

    Ok(request)
}
