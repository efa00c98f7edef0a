use std::path::PathBuf;

use droidsync::{MaterialDesignIconsClient, update_drawables};
use droidsync_cli::Settings;

pub fn run_update_drawables_command(
    settings: &Settings,
    res_dir: Option<PathBuf>,
) -> Result<(), String> {
    let config = settings.android(res_dir);
    let client = MaterialDesignIconsClient::new(settings.icons.clone())
        .map_err(|e| format!("Cannot create icon catalog client: {}", e))?;
    let report =
        update_drawables(&client, &config).map_err(|e| format!("Drawable sync failed: {}", e))?;

    println!("Updated {} drawable(s)", report.updated.len());
    for drawable in &report.updated {
        println!("  {} ({})", drawable.path.display(), drawable.icon_id);
    }
    if !report.deprecated.is_empty() {
        println!("{} deprecated icon(s) need replacing:", report.deprecated.len());
        for drawable in &report.deprecated {
            println!("  {}", drawable.path.display());
        }
    }
    Ok(())
}
