use std::path::Path;

use droidsync::ExportFormat;
use unic_langid::LanguageIdentifier;

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &Path) -> Result<(), String> {
    if path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create output directory: {}", e))?;
        }
    }

    Ok(())
}

/// Validate a PoEditor language code (`en`, `pt-br`, `zh-Hans`)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.trim().is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    })
}

/// Parse an export format name, listing the supported ones on failure
pub fn parse_export_format(format: &str) -> Result<ExportFormat, String> {
    if format.trim().is_empty() {
        return Err("Format cannot be empty".to_string());
    }

    format.parse::<ExportFormat>().map_err(|e| {
        let supported: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.as_str()).collect();
        format!("{}. Supported formats: {}", e, supported.join(", "))
    })
}
