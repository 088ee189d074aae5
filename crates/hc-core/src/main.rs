//! Cluster Health-Check Report CLI
//!
//! The main entry point for hc-core, handling:
//! - Health-check PDF generation for one namespace
//! - Sample report generation without a cluster
//! - Placeholder template installation
//! - Layout and configuration inspection

use chrono::Local;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use hc_client::HttpResourceClient;
use hc_common::OutputFormat;
use hc_core::config::{load_config, ConfigError, ConfigOptions, Overrides, ResolvedConfig};
use hc_core::exit_codes::ExitCode;
use hc_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use hc_report::layout::{validate_registry, Field};
use hc_report::{
    write_default_templates, GeneratedReport, RecordingBackend, ReportError, ReportGenerator,
    ReportKind,
};
use std::path::PathBuf;
use tracing::{error, info, info_span};

/// Cluster Health-Check Report - templated PDF reports of a namespace
#[derive(Parser)]
#[command(name = "hc-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Template directory
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Report output directory
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the health-check report of a namespace
    Generate(GenerateArgs),

    /// Generate a report from built-in sample data (no cluster needed)
    Sample,

    /// List available report kinds
    Templates,

    /// Write placeholder page templates into the template directory
    InitTemplates(InitTemplatesArgs),

    /// Dump and validate the field anchor registry
    Layout,

    /// Show the resolved configuration
    Config,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Namespace to report on
    #[arg(long, short = 'n')]
    namespace: String,

    /// Compose the report without writing a PDF; prints the stamped layout
    #[arg(long)]
    dry_run: bool,

    /// Resource API host
    #[arg(long)]
    host: Option<String>,

    /// Resource API port
    #[arg(long)]
    port: Option<u16>,

    /// Bearer token for the resource API
    #[arg(long)]
    token: Option<String>,
}

#[derive(Args, Debug)]
struct InitTemplatesArgs {
    /// Overwrite existing template files
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let run_id = generate_run_id();
    let span = info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    let exit_code = match &cli.command {
        Commands::Generate(args) => run_generate(&cli.global, args),
        Commands::Sample => run_sample(&cli.global),
        Commands::Templates => run_templates(&cli.global),
        Commands::InitTemplates(args) => run_init_templates(&cli.global, args),
        Commands::Layout => run_layout(&cli.global),
        Commands::Config => run_config(&cli.global),
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Configuration
// ============================================================================

fn resolve_config(
    global: &GlobalOpts,
    args: Option<&GenerateArgs>,
) -> Result<ResolvedConfig, ConfigError> {
    let mut cli = Overrides {
        report_dir: global.output_dir.clone(),
        template_dir: global.template_dir.clone(),
        ..Overrides::default()
    };
    if let Some(args) = args {
        cli.api_host = args.host.clone();
        cli.api_port = args.port;
        cli.token = args.token.clone();
    }
    let options = ConfigOptions::from_env(global.config.clone(), cli)?;
    load_config(&options)
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_generate(global: &GlobalOpts, args: &GenerateArgs) -> ExitCode {
    let resolved = match resolve_config(global, Some(args)) {
        Ok(resolved) => resolved,
        Err(e) => return output_config_error(global, &e),
    };
    let client = HttpResourceClient::new(resolved.config.api.clone());
    let generator = ReportGenerator::new(client, resolved.config.report.clone());
    info!(
        namespace = %args.namespace,
        api = %resolved.config.api.base_url(),
        dry_run = args.dry_run,
        "generating health check"
    );

    if args.dry_run {
        return run_dry_run(global, &generator, &args.namespace);
    }

    match generator.generate_health_check(&args.namespace) {
        Ok(report) => output_report(global, &report),
        Err(e) => output_report_error(global, &e),
    }
}

fn run_dry_run(
    global: &GlobalOpts,
    generator: &ReportGenerator<HttpResourceClient>,
    namespace: &str,
) -> ExitCode {
    let backend = RecordingBackend::new(generator.config().layout.font_size);
    let composed = match generator.compose_health_check(namespace, Local::now(), backend) {
        Ok(composed) => composed,
        Err(e) => return output_report_error(global, &e),
    };

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "ok",
                "dry_run": true,
                "namespace": namespace,
                "pages": composed.summary.pages,
                "summary": &composed.summary,
                "layout": composed.document.backend(),
            });
            print_json(&response);
        }
        OutputFormat::Human => {
            println!("# hc-core generate --dry-run");
            println!();
            println!("Namespace: {}", namespace);
            for (i, page) in composed.document.backend().pages().iter().enumerate() {
                let templates: Vec<String> = page.templates.iter().map(|t| t.to_string()).collect();
                println!("Page {}: {} ({} text runs)", i + 1, templates.join(", "), page.texts.len());
            }
            print_degraded_human(&composed.summary.degraded);
        }
    }
    ExitCode::Clean
}

fn run_sample(global: &GlobalOpts) -> ExitCode {
    let resolved = match resolve_config(global, None) {
        Ok(resolved) => resolved,
        Err(e) => return output_config_error(global, &e),
    };
    // The test report never contacts the API
    let client = HttpResourceClient::new(resolved.config.api.clone());
    let generator = ReportGenerator::new(client, resolved.config.report);
    match generator.generate_test_report() {
        Ok(report) => output_report(global, &report),
        Err(e) => output_report_error(global, &e),
    }
}

fn run_templates(global: &GlobalOpts) -> ExitCode {
    let catalog = ReportKind::catalog();
    match global.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({ "status": "ok", "report_kinds": catalog }));
        }
        OutputFormat::Human => {
            for info in &catalog {
                let scope = if info.scoped { "namespace" } else { "none" };
                println!("{:<12} {:<22} scope: {}", info.id, info.display_name, scope);
            }
        }
    }
    ExitCode::Clean
}

fn run_init_templates(global: &GlobalOpts, args: &InitTemplatesArgs) -> ExitCode {
    let resolved = match resolve_config(global, None) {
        Ok(resolved) => resolved,
        Err(e) => return output_config_error(global, &e),
    };
    let templates = &resolved.config.report.templates;
    let written = match write_default_templates(templates, args.force) {
        Ok(written) => written,
        Err(e) => return output_report_error(global, &e),
    };

    match global.format {
        OutputFormat::Json => {
            let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            print_json(&serde_json::json!({
                "status": "ok",
                "dir": templates.dir.display().to_string(),
                "written": files,
            }));
        }
        OutputFormat::Human => {
            println!("Templates in {}", templates.dir.display());
            if written.is_empty() {
                println!("All templates already present (use --force to overwrite)");
            }
            for path in &written {
                println!("  wrote {}", path.display());
            }
        }
    }
    ExitCode::Clean
}

fn run_layout(global: &GlobalOpts) -> ExitCode {
    let resolved = match resolve_config(global, None) {
        Ok(resolved) => resolved,
        Err(e) => return output_config_error(global, &e),
    };
    let margin = resolved.config.report.layout.margin_mm;
    let validation = validate_registry(margin);

    match global.format {
        OutputFormat::Json => {
            let fields: Vec<serde_json::Value> = Field::ALL
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "name": field.name(),
                        "template": field.template(),
                        "anchor": field.anchor(),
                        "box": field.text_box(margin),
                    })
                })
                .collect();
            print_json(&serde_json::json!({
                "status": if validation.is_ok() { "ok" } else { "error" },
                "valid": validation.is_ok(),
                "error": validation.as_ref().err().map(|e| e.to_string()),
                "fields": fields,
            }));
        }
        OutputFormat::Human => {
            for field in Field::ALL {
                let anchor = field.anchor();
                println!("{:<36} ({:>5.1}, {:>5.1})", field.name(), anchor.x, anchor.y);
            }
            match &validation {
                Ok(()) => println!("\nRegistry valid"),
                Err(e) => println!("\nRegistry invalid: {}", e),
            }
        }
    }

    match validation {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            error!(error = %e, "layout registry invalid");
            ExitCode::RenderError
        }
    }
}

fn run_config(global: &GlobalOpts) -> ExitCode {
    let resolved = match resolve_config(global, None) {
        Ok(resolved) => resolved,
        Err(e) => return output_config_error(global, &e),
    };
    let config = &resolved.config;
    let missing: Vec<String> = config
        .report
        .templates
        .missing()
        .into_iter()
        .map(|(kind, _)| kind.to_string())
        .collect();

    match global.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "status": "ok",
                "source": &resolved.source,
                "api_url": config.api.base_url(),
                "token_set": config.api.bearer_token.is_some(),
                "config": config,
                "missing_templates": missing,
            }));
        }
        OutputFormat::Human => {
            let source = resolved
                .source
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            println!("# hc-core config");
            println!();
            println!("Source: {}", source);
            println!("API: {}", config.api.base_url());
            println!("Token: {}", if config.api.bearer_token.is_some() { "set" } else { "not set" });
            println!("Templates: {}", config.report.templates.dir.display());
            println!("Reports: {}", config.report.output_dir.display());
            if !missing.is_empty() {
                println!("Missing templates: {}", missing.join(", "));
            }
        }
    }
    ExitCode::Clean
}

// ============================================================================
// Output
// ============================================================================

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to serialize output: {}", e),
    }
}

fn print_degraded_human(degraded: &[hc_report::DegradedSection]) {
    for section in degraded {
        println!(
            "Degraded: {} ({}): {}",
            section.section, section.subject, section.reason
        );
    }
}

fn output_report(global: &GlobalOpts, report: &GeneratedReport) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "status": "ok",
                "kind": report.kind,
                "scope": &report.scope,
                "file": &report.file_name,
                "path": report.path.display().to_string(),
                "pages": report.pages,
                "generated_at": report.generated_at.to_rfc3339(),
                "summary": &report.summary,
            }));
        }
        OutputFormat::Human => {
            println!("{} for {}", report.kind.display_name(), report.scope);
            println!("Wrote {} ({} pages)", report.path.display(), report.pages);
            print_degraded_human(&report.summary.degraded);
        }
    }
    ExitCode::Clean
}

fn output_report_error(global: &GlobalOpts, err: &ReportError) -> ExitCode {
    let stage = err.stage();
    let exit_code = ExitCode::for_stage(stage);
    error!(stage = %stage, error = %err, "report failed");

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "error": err.to_string(),
                "stage": stage,
                "code": exit_code.code_name(),
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
        }
        OutputFormat::Human => {
            eprintln!("Error ({}): {}", stage, err);
        }
    }
    exit_code
}

/// Output a config error in the appropriate format.
fn output_config_error(global: &GlobalOpts, err: &ConfigError) -> ExitCode {
    if let ConfigError::Report(report) = err {
        return output_report_error(global, report);
    }
    let exit_code = match err {
        ConfigError::IoError { .. } => ExitCode::IoError,
        _ => ExitCode::ArgsError,
    };

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "error": err.to_string(),
                "stage": "config",
                "code": exit_code.code_name(),
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
        }
        OutputFormat::Human => {
            eprintln!("Configuration error: {}", err);
        }
    }
    exit_code
}
