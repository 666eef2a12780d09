//! CLI commands for the audit log
//!
//! Bridges clap arguments with the API client, the renderer and the
//! display/export layers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};

use crate::api::{parse_audit_page, ApiClient, AuditQuery, Page, Pagination};
use crate::audit::{AuditRecord, AuditRenderer, AuditVocabulary, RelationCatalog, RenderedAudit};
use crate::config::Settings;
use crate::display::{format_audit_table, format_page_footer};
use crate::error::{AssetDeskError, AssetDeskResult};
use crate::export::{export_audits_csv, export_audits_json, export_audits_yaml, AuditExport};
use crate::permissions::{filter_visible, Capability};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (spreadsheet-friendly)
    Csv,
    /// JSON format (keeps structured details)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Filters shared by commands that fetch from the API
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only records from this day (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Show raw ids instead of resolving employee/device/role/unit names
    #[arg(long)]
    pub no_resolve: bool,
}

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// Fetch and show a page of the audit log
    List {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Role of the viewer (defaults to the configured role)
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Render a saved `/audits` response without contacting the API
    Render {
        /// JSON file holding a listing response
        file: PathBuf,

        /// Role of the viewer (defaults to the configured role)
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Export a page of the audit log to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Read records from a saved response instead of the API
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Role of the viewer (defaults to the configured role)
        #[arg(short, long)]
        role: Option<String>,
    },
}

/// Shared state for audit commands
pub struct AuditContext {
    pub settings: Settings,
    pub vocabulary: AuditVocabulary,
}

impl AuditContext {
    pub fn new(settings: Settings, vocabulary: AuditVocabulary) -> Self {
        Self {
            settings,
            vocabulary,
        }
    }

    /// Capability of the viewer; an explicit role wins over the configured one
    fn viewer(&self, role: Option<&str>) -> Capability {
        Capability::for_role(role.or(self.settings.current_role.as_deref()))
    }

    fn render(
        &self,
        records: Vec<AuditRecord>,
        catalog: &RelationCatalog,
        viewer: &Capability,
    ) -> Vec<RenderedAudit> {
        let visible = filter_visible(records, viewer);
        AuditRenderer::new(&self.vocabulary, catalog, self.settings.format_options())
            .render_all(&visible)
    }

    fn print_page(&self, rows: &[RenderedAudit], pagination: &Pagination) {
        println!(
            "{}",
            format_audit_table(rows, &self.vocabulary.messages, &self.settings.date_format)
        );
        println!("{}", format_page_footer(pagination));
    }
}

/// Handle audit commands
pub async fn handle_audit_command(ctx: &AuditContext, cmd: AuditCommands) -> AssetDeskResult<()> {
    match cmd {
        AuditCommands::List { fetch, role } => handle_list(ctx, fetch, role).await,
        AuditCommands::Render { file, role } => handle_render(ctx, &file, role),
        AuditCommands::Export {
            output,
            format,
            pretty,
            input,
            fetch,
            role,
        } => handle_export(ctx, output, format, pretty, input, fetch, role).await,
    }
}

async fn handle_list(ctx: &AuditContext, fetch: FetchArgs, role: Option<String>) -> AssetDeskResult<()> {
    let viewer = ctx.viewer(role.as_deref());
    let requested_page = fetch.page;
    let (page, catalog) = fetch_page(ctx, &fetch, &viewer).await?;

    if let Some(requested) = requested_page {
        if !page.pagination.can_go_to(requested) {
            println!(
                "Page {} is out of range (1-{}).",
                requested, page.pagination.last_page
            );
        }
    }

    let Page { data, pagination } = page;
    let rows = ctx.render(data, &catalog, &viewer);
    ctx.print_page(&rows, &pagination);
    Ok(())
}

fn handle_render(ctx: &AuditContext, file: &Path, role: Option<String>) -> AssetDeskResult<()> {
    let viewer = ctx.viewer(role.as_deref());
    let Page { data, pagination } = load_page(file)?;

    let rows = ctx.render(data, &RelationCatalog::new(), &viewer);
    ctx.print_page(&rows, &pagination);
    Ok(())
}

async fn handle_export(
    ctx: &AuditContext,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
    input: Option<PathBuf>,
    fetch: FetchArgs,
    role: Option<String>,
) -> AssetDeskResult<()> {
    let viewer = ctx.viewer(role.as_deref());
    let (page, catalog) = match input {
        Some(path) => (load_page(&path)?, RelationCatalog::new()),
        None => fetch_page(ctx, &fetch, &viewer).await?,
    };
    let rows = ctx.render(page.data, &catalog, &viewer);

    let file = File::create(&output).map_err(|e| {
        AssetDeskError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    let messages = &ctx.vocabulary.messages;
    let date_format = &ctx.settings.date_format;

    match format {
        ExportFormat::Csv => export_audits_csv(&rows, messages, date_format, &mut writer)?,
        ExportFormat::Json => {
            let export = AuditExport::new(&rows, messages, date_format);
            export_audits_json(&export, &mut writer, pretty)?;
        }
        ExportFormat::Yaml => {
            let export = AuditExport::new(&rows, messages, date_format);
            export_audits_yaml(&export, &mut writer)?;
        }
    }

    tracing::info!(records = rows.len(), path = %output.display(), "Exported audit records");
    println!("Exported {} audit records to: {}", rows.len(), output.display());
    Ok(())
}

/// Fetch one audit page and, unless disabled, the relation names for it
async fn fetch_page(
    ctx: &AuditContext,
    fetch: &FetchArgs,
    viewer: &Capability,
) -> AssetDeskResult<(Page<AuditRecord>, RelationCatalog)> {
    let query = AuditQuery::new(fetch.page, fetch.search.clone(), fetch.date.as_deref())?;
    let client = ApiClient::from_settings(&ctx.settings)?;
    let resolve = ctx.settings.resolve_relation_names && !fetch.no_resolve;

    let page = client.fetch_audits(&query, viewer).await?;
    let catalog = if resolve && !page.is_empty() {
        client.fetch_catalog().await
    } else {
        RelationCatalog::new()
    };

    Ok((page, catalog))
}

/// Read a saved listing response from disk
pub fn load_page(path: &Path) -> AssetDeskResult<Page<AuditRecord>> {
    if !path.exists() {
        return Err(AssetDeskError::file_not_found(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AssetDeskError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let body: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| AssetDeskError::Json(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(parse_audit_page(body))
}
