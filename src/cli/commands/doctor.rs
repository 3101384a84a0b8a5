//! Doctor command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the doctor command.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    Output::header("Sanke Doctor");

    let mut problems = 0;

    match preflight::check_api_key() {
        Ok(()) => Output::success("OPENAI_API_KEY is set"),
        Err(e) => {
            Output::error(&format!("{}", e));
            problems += 1;
        }
    }

    match preflight::check_tool("yt-dlp") {
        Ok(()) => Output::success("yt-dlp is available"),
        Err(e) => {
            Output::error(&format!("{}", e));
            problems += 1;
        }
    }

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::success(&format!("Config file: {}", config_path.display()));
    } else {
        Output::info(&format!(
            "No config file at {} (defaults in effect)",
            config_path.display()
        ));
    }

    Output::header("Settings");
    Output::kv("extraction model", &settings.extract.model);
    Output::kv("default schema", &settings.extract.schema);
    Output::kv("languages", &settings.fetch.languages.join(", "));
    Output::kv(
        "max concurrent",
        &settings.pipeline.max_concurrent.to_string(),
    );

    println!();
    if problems == 0 {
        Output::success("All checks passed");
    } else {
        Output::warning(&format!("{} problem(s) found", problems));
    }

    Ok(())
}
