use std::path::PathBuf;

use droidsync::{
    AndroidStringsTarget, FastlaneTarget, ImportOutcome, ImportTarget, import_translations,
};
use droidsync_cli::Settings;

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub api_token: Option<String>,
    pub project_id: Option<u64>,
    /// `res/` for strings, the metadata root for fastlane.
    pub dir: Option<PathBuf>,
}

pub fn run_import_strings_command(settings: &Settings, opts: ImportOptions) -> Result<(), String> {
    let mut target = AndroidStringsTarget::new(&settings.android(opts.dir.clone()));
    run_with_target(settings, opts, &mut target)
}

pub fn run_import_fastlane_command(settings: &Settings, opts: ImportOptions) -> Result<(), String> {
    let mut target = FastlaneTarget::new(&settings.fastlane(opts.dir.clone()));
    run_with_target(settings, opts, &mut target)
}

fn run_with_target<T: ImportTarget>(
    settings: &Settings,
    opts: ImportOptions,
    target: &mut T,
) -> Result<(), String> {
    let config = settings.poeditor(opts.api_token, opts.project_id);
    let outcome =
        import_translations(&config, target).map_err(|e| format!("Import failed: {}", e))?;

    match outcome {
        ImportOutcome::Skipped => {}
        ImportOutcome::Imported(report) => {
            println!(
                "Imported {} language(s) from {}",
                report.languages.len(),
                report.project
            );
            for written in &report.languages {
                println!(
                    "  {:<8} {} ({} entries)",
                    written.language,
                    written.destination.display(),
                    written.entries
                );
            }
        }
    }
    Ok(())
}
