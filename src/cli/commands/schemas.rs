//! Schemas command implementation.

use crate::cli::Output;
use crate::error::SankeError;
use crate::schema::presets;
use anyhow::Result;

/// Run the schemas command.
pub fn run_schemas(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let schema = presets::by_name(name).ok_or_else(|| {
                SankeError::InvalidInput(format!(
                    "Unknown schema '{}'. Built-in schemas: {}",
                    name,
                    presets::PRESET_NAMES.join(", ")
                ))
            })?;

            let rendered = toml::to_string_pretty(&schema)
                .map_err(|e| SankeError::Config(e.to_string()))?;
            println!("{}", rendered);
        }
        None => {
            Output::header("Built-in schemas");
            for name in presets::PRESET_NAMES {
                let schema = presets::by_name(name).expect("preset list is consistent");
                Output::list_item(&format!("{} ({} fields)", name, schema.fields.len()));
            }
            println!();
            Output::info("Show one with: sanke schemas <name>");
            Output::info("Custom schemas: pass a TOML file to 'sanke harvest --schema <path>'");
        }
    }

    Ok(())
}
