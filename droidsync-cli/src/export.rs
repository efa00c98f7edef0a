use std::{fs, path::PathBuf};

use droidsync::{ExportFilterFlags, TranslationService};
use droidsync_cli::{Settings, parse_export_format, validate_language_code, validate_output_path};

use crate::client::connect;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub api_token: Option<String>,
    pub project_id: Option<u64>,
    pub language: String,
    pub format: String,
    pub output: PathBuf,
    pub filters: ExportFilterFlags,
    pub alphabetical: bool,
}

pub fn run_export_command(settings: &Settings, opts: ExportOptions) -> Result<(), String> {
    let (client, project_id) = connect(&settings.poeditor(opts.api_token, opts.project_id))?;
    validate_language_code(&opts.language)?;
    let format = parse_export_format(&opts.format)?;
    validate_output_path(&opts.output)?;

    let project = client
        .fetch_project(project_id)
        .map_err(|e| format!("Cannot load project {}: {}", project_id, e))?;
    let bytes = client
        .export_translation(
            &project,
            &opts.language,
            format,
            Some(&opts.filters),
            opts.alphabetical,
        )
        .map_err(|e| format!("Export failed: {}", e))?;
    fs::write(&opts.output, &bytes)
        .map_err(|e| format!("Error writing output {}: {}", opts.output.display(), e))?;

    println!(
        "Exported {} ({}) to {}",
        opts.language,
        format,
        opts.output.display()
    );
    Ok(())
}
