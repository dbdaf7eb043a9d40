use serde_json::Value;

use crate::config::Config;

/// Print the resolved configuration, or one key by dot-path
/// (e.g. `paths.data_root`). Missing keys print as an empty line.
pub fn run(config: &Config, key: Option<&str>) -> anyhow::Result<()> {
    let resolved = serde_json::to_value(config)?;

    match key {
        Some(path) => {
            let mut cursor = &resolved;
            for part in path.split('.') {
                cursor = cursor.get(part).unwrap_or(&Value::Null);
            }
            match cursor {
                Value::String(s) => println!("{}", s),
                Value::Null => println!(),
                other => println!("{}", other),
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&resolved)?),
    }

    Ok(())
}
