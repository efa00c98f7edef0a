use droidsync::{PoEditorClient, PoEditorConfig};

/// Builds a client for commands that cannot run without the service.
pub fn connect(config: &PoEditorConfig) -> Result<(PoEditorClient, u64), String> {
    let api_token = config.api_token.as_deref().ok_or_else(|| {
        "PoEditor API token not set (use --api-token or POEDITOR_API_TOKEN)".to_string()
    })?;
    let project_id = config
        .project_id
        .ok_or_else(|| "PoEditor project ID not set (use --project-id)".to_string())?;
    let client = PoEditorClient::new(api_token)
        .map_err(|e| format!("Cannot create PoEditor client: {}", e))?
        .with_api_base(config.api_base());
    Ok((client, project_id))
}
