//! flavorkit CLI
//!
//! Resolve, validate and render the tenant flavors of the Android app.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flavorkit_android::gradle::{self, BuildVariant};
use flavorkit_android::{catalog, registry, resolve, validate_all, TenantError, TenantRegistry};
use flavorkit_cli::output::{format_columns, format_count, Status};
use flavorkit_core::config::Config;
use flavorkit_core::error::{exit_codes, Error, ErrorCode};
use flavorkit_telemetry::{level_for_verbosity, timed_span, TelemetryConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "flavorkit")]
#[command(about = "Resolve and validate tenant flavors for the Android app")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tenant catalog (TOML or JSON); overrides the config and embedded catalog
    #[arg(short, long, global = true)]
    tenants: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tenants in catalog order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the build values for one tenant
    Resolve {
        /// Tenant key
        key: String,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ResolveFormat,
    },

    /// Check every tenant and report all problems
    Validate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List build variants and their Gradle tasks
    Variants {
        /// Only this build type
        #[arg(long)]
        build_type: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render Kotlin DSL blocks for build.gradle.kts
    Render {
        /// Block to print
        #[arg(long, value_enum, default_value = "all")]
        section: Section,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResolveFormat {
    Text,
    Json,
    Properties,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Namespace,
    Flavors,
    BuildTypes,
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            Status::error(&e.to_string());
            exit_code_for(&e)
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<Error>() {
        return e.code.exit_code();
    }
    if let Some(e) = err.downcast_ref::<TenantError>() {
        return e.code().exit_code();
    }
    exit_codes::FAILURE
}

fn run(cli: &Cli) -> Result<i32> {
    // Logging settings live in the config, so the subscriber comes second.
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    }
    .with_level_override(level_for_verbosity(cli.verbose, cli.quiet));
    if let Err(e) = flavorkit_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }
    config.report();

    let registry = load_registry(cli, &config)?;

    match &cli.command {
        Commands::List { json } => run_list(registry, &config, *json, cli.quiet),
        Commands::Resolve { key, format } => run_resolve(registry, &config, key, *format),
        Commands::Validate { json } => run_validate(registry, *json, cli.quiet),
        Commands::Variants { build_type, json } => {
            run_variants(registry, &config, build_type.as_deref(), *json)
        }
        Commands::Render { section } => Ok(run_render(registry, &config, *section)),
    }
}

fn load_registry(cli: &Cli, config: &Config) -> Result<&'static TenantRegistry> {
    timed_span!("load_registry");

    match cli.tenants.clone().or_else(|| config.tenants_file()) {
        Some(path) => {
            let loaded = catalog::load_registry(&path)?;
            Ok(registry::install_global(loaded).map_err(Error::from)?)
        }
        None => Ok(catalog::builtin()?),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn run_list(registry: &TenantRegistry, config: &Config, json: bool, quiet: bool) -> Result<i32> {
    if json {
        println!("{}", to_json(registry.all())?);
        return Ok(exit_codes::SUCCESS);
    }

    if !quiet {
        Status::header(&format!(
            "{} ({})",
            config.schema.general.project_name,
            format_count(registry.len(), "tenant", "tenants")
        ));
    }

    let values: Vec<String> = registry
        .all()
        .iter()
        .map(|t| format!("{}  {}", t.application_id, t.display_name))
        .collect();
    let rows: Vec<(&str, &str)> = registry
        .keys()
        .zip(values.iter().map(String::as_str))
        .collect();
    if !rows.is_empty() {
        println!("{}", format_columns(&rows));
    }

    Ok(exit_codes::SUCCESS)
}

fn run_resolve(
    registry: &TenantRegistry,
    config: &Config,
    key: &str,
    format: ResolveFormat,
) -> Result<i32> {
    let resolved = resolve(registry, key).map_err(Error::from)?;
    let placeholders = &config.schema.android.placeholders;

    match format {
        ResolveFormat::Json => println!("{}", to_json(&resolved)?),
        ResolveFormat::Properties => print!("{}", resolved.to_gradle_properties(placeholders)),
        ResolveFormat::Text => {
            let [(host1, value1), (host2, value2)] = resolved.manifest_placeholders(placeholders);
            let rows = [
                ("applicationId", resolved.application_id.as_str()),
                (config.schema.android.app_name_resource.as_str(), resolved.display_name.as_str()),
                (host1, value1),
                (host2, value2),
            ];
            println!("{}", format_columns(&rows));
        }
    }

    Ok(exit_codes::SUCCESS)
}

fn run_validate(registry: &TenantRegistry, json: bool, quiet: bool) -> Result<i32> {
    let issues = validate_all(registry);

    if json {
        println!("{}", to_json(&issues)?);
    } else {
        for issue in &issues {
            Status::error(&issue.to_string());
        }
        if issues.is_empty() {
            if !quiet {
                Status::success(&format!(
                    "{} valid",
                    format_count(registry.len(), "tenant", "tenants")
                ));
            }
        } else {
            Status::error(&format!(
                "Found {}",
                format_count(issues.len(), "issue", "issues")
            ));
        }
    }

    Ok(if issues.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_ERROR
    })
}

fn run_variants(
    registry: &TenantRegistry,
    config: &Config,
    build_type: Option<&str>,
    json: bool,
) -> Result<i32> {
    let android = &config.schema.android;
    let build_types = match build_type {
        Some(name) => {
            let bt = android.build_type(name).ok_or_else(|| {
                Error::new(ErrorCode::ConfigError, format!("Unknown build type: {name}"))
                    .with_suggestion("Build types are declared under [[android.build_types]]")
            })?;
            vec![bt.clone()]
        }
        None => android.build_types.clone(),
    };

    let variants: Vec<BuildVariant> = gradle::variants(registry, &build_types);

    if json {
        let entries: Vec<serde_json::Value> = variants
            .iter()
            .map(|v| {
                serde_json::json!({
                    "flavor": v.flavor,
                    "build_type": v.build_type,
                    "name": v.name,
                    "assemble_task": v.assemble_task(),
                    "bundle_task": v.bundle_task(),
                })
            })
            .collect();
        println!("{}", to_json(&entries)?);
    } else {
        let tasks: Vec<String> = variants.iter().map(BuildVariant::assemble_task).collect();
        let rows: Vec<(&str, &str)> = variants
            .iter()
            .map(|v| v.name.as_str())
            .zip(tasks.iter().map(String::as_str))
            .collect();
        if !rows.is_empty() {
            println!("{}", format_columns(&rows));
        }
    }

    Ok(exit_codes::SUCCESS)
}

fn run_render(registry: &TenantRegistry, config: &Config, section: Section) -> i32 {
    let android = &config.schema.android;

    let mut blocks = Vec::new();
    if matches!(section, Section::Namespace | Section::All) {
        blocks.push(gradle::render_namespace(android));
    }
    if matches!(section, Section::Flavors | Section::All) {
        blocks.push(gradle::render_product_flavors(registry, android));
    }
    if matches!(section, Section::BuildTypes | Section::All) {
        blocks.push(gradle::render_build_types(&android.build_types));
    }
    print!("{}", blocks.join("\n"));

    tracing::info!(tenants = registry.len(), "Rendered Gradle blocks");
    exit_codes::SUCCESS
}
