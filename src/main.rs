use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assetdesk::audit::AuditVocabulary;
use assetdesk::cli::{handle_audit_command, AuditCommands, AuditContext};
use assetdesk::config::{AssetDeskPaths, Settings};

#[derive(Parser)]
#[command(
    name = "assetdesk",
    version,
    about = "Terminal front-end for the inventory audit log",
    long_about = "AssetDesk fetches the audit log of the inventory system and \
                  shows who changed what: field by field, with identifiers \
                  hidden and related employees, devices, roles and units \
                  resolved to their names."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit log commands
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Write default settings and vocabulary files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = AssetDeskPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Audit(cmd)) => {
            let vocabulary = AuditVocabulary::load_or_builtin(&paths)?;
            let ctx = AuditContext::new(settings, vocabulary);
            handle_audit_command(&ctx, cmd).await?;
        }
        Some(Commands::Init) => {
            println!("Initializing AssetDesk at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            let vocabulary_file = paths.vocabulary_file();
            if !vocabulary_file.exists() {
                let contents = serde_json::to_string_pretty(&AuditVocabulary::default())?;
                std::fs::write(&vocabulary_file, contents)?;
            }

            println!("Initialization complete!");
            println!();
            println!("Edit {} to set the API URL and your role.", paths.settings_file().display());
            println!("Edit {} to change labels.", vocabulary_file.display());
        }
        Some(Commands::Config) => {
            println!("AssetDesk Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Vocabulary file:  {}", paths.vocabulary_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  API URL:              {}", settings.api_base_url);
            println!(
                "  API token:            {}",
                if settings.api_token.is_some() { "set" } else { "not set" }
            );
            println!(
                "  Role:                 {}",
                settings.current_role.as_deref().unwrap_or("(none)")
            );
            println!("  Identifier threshold: {}", settings.identifier_threshold);
            println!("  Preview threshold:    {}", settings.preview_threshold);
            println!("  Date format:          {}", settings.date_format);
            println!("  Resolve names:        {}", settings.resolve_relation_names);
        }
        None => {
            println!("AssetDesk - inventory audit log");
            println!();
            println!("Run 'assetdesk --help' for usage information.");
            println!("Run 'assetdesk audit list' to see recent changes.");
        }
    }

    Ok(())
}
