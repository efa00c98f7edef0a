mod client;
mod drawables;
mod export;
mod import;
mod languages;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use droidsync::ExportFilterFlags;
use droidsync_cli::load_settings;
use tracing_subscriber::EnvFilter;

use crate::{
    drawables::run_update_drawables_command,
    export::{ExportOptions, run_export_command},
    import::{ImportOptions, run_import_fastlane_command, run_import_strings_command},
    languages::run_languages_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./droidsync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Credentials shared by every command that talks to PoEditor.
#[derive(clap::Args, Debug, Clone)]
struct PoEditorArgs {
    /// PoEditor API token
    #[arg(long, env = "POEDITOR_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// PoEditor project ID
    #[arg(long)]
    project_id: Option<u64>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import translations into res/values*/strings.xml.
    ImportStrings {
        #[command(flatten)]
        poeditor: PoEditorArgs,

        /// The Android res directory
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },

    /// Import store-listing text into fastlane metadata.
    ImportFastlane {
        #[command(flatten)]
        poeditor: PoEditorArgs,

        /// The fastlane metadata directory
        #[arg(long)]
        metadata_dir: Option<PathBuf>,
    },

    /// Regenerate synced drawables from Material Design Icons.
    UpdateDrawables {
        /// The Android res directory
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },

    /// List the project's languages and their completion.
    Languages {
        #[command(flatten)]
        poeditor: PoEditorArgs,
    },

    /// Download a PoEditor export to a file.
    Export {
        #[command(flatten)]
        poeditor: PoEditorArgs,

        /// Language code to export
        #[arg(short, long)]
        language: String,

        /// Export format (po, xlsx, android_strings, ...)
        #[arg(short, long)]
        format: String,

        /// The file to write the export to
        #[arg(short, long)]
        output: PathBuf,

        /// Only translated (true) or untranslated (false) terms
        #[arg(long)]
        translated: Option<bool>,

        /// Only fuzzy (true) or non-fuzzy (false) terms
        #[arg(long)]
        fuzzy: Option<bool>,

        /// Only automatic (true) or human (false) translations
        #[arg(long)]
        automatic: Option<bool>,

        /// Only proofread (true) or unproofread (false) translations
        #[arg(long)]
        proofread: Option<bool>,

        /// Order terms alphabetically
        #[arg(long)]
        alphabetical: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), String> {
    let settings = load_settings(args.config.as_deref())?;

    match args.commands {
        Commands::ImportStrings { poeditor, res_dir } => run_import_strings_command(
            &settings,
            ImportOptions {
                api_token: poeditor.api_token,
                project_id: poeditor.project_id,
                dir: res_dir,
            },
        ),
        Commands::ImportFastlane {
            poeditor,
            metadata_dir,
        } => run_import_fastlane_command(
            &settings,
            ImportOptions {
                api_token: poeditor.api_token,
                project_id: poeditor.project_id,
                dir: metadata_dir,
            },
        ),
        Commands::UpdateDrawables { res_dir } => run_update_drawables_command(&settings, res_dir),
        Commands::Languages { poeditor } => {
            run_languages_command(&settings, poeditor.api_token, poeditor.project_id)
        }
        Commands::Export {
            poeditor,
            language,
            format,
            output,
            translated,
            fuzzy,
            automatic,
            proofread,
            alphabetical,
        } => run_export_command(
            &settings,
            ExportOptions {
                api_token: poeditor.api_token,
                project_id: poeditor.project_id,
                language,
                format,
                output,
                filters: ExportFilterFlags {
                    translated,
                    fuzzy,
                    automatic,
                    proofread,
                },
                alphabetical,
            },
        ),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
