use droidsync::TranslationService;
use droidsync_cli::Settings;

use crate::client::connect;

pub fn run_languages_command(
    settings: &Settings,
    api_token: Option<String>,
    project_id: Option<u64>,
) -> Result<(), String> {
    let (client, project_id) = connect(&settings.poeditor(api_token, project_id))?;
    let project = client
        .fetch_project(project_id)
        .map_err(|e| format!("Cannot load project {}: {}", project_id, e))?;
    let languages = client
        .list_languages(&project)
        .map_err(|e| format!("Cannot list languages: {}", e))?;

    let reference = project.reference_language.as_deref().unwrap_or("-");
    println!("{} (reference language: {})", project.name, reference);
    for language in &languages {
        println!(
            "  {:<10} {:<24} {:>6.1}% {:>6}",
            language.code, language.name, language.percentage, language.translations
        );
    }
    Ok(())
}
