use anyhow::Context;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read the whole input from `file`, or stdin when it is absent or `-`.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(f) if f != Path::new("-") => std::fs::read_to_string(f)
            .with_context(|| format!("failed to read '{}'", f.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Read and parse JSON input. Only syntax errors fail; any JSON value is accepted.
pub fn read_json(file: Option<&Path>) -> anyhow::Result<Value> {
    let text = read_input(file)?;
    let source = match file {
        Some(f) if f != Path::new("-") => format!("'{}'", f.display()),
        _ => "stdin".to_string(),
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {source}"))
}
