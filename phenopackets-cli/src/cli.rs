use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use phenopackets::{SchemaVersion, Timestamp};
use phenopackets_validator::{FsSourceConfig, ValidationConfig, output, validate_fs};
use serde_json::{Value, json};

use crate::logging;
use crate::server::{self, DEFAULT_TERM_PATH, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "phenopackets", version, about = "Phenopacket structural validator")]
pub struct Cli {
    /// Verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate phenopacket JSON/YAML files or directories
    Validate(ValidateArgs),
    /// Check a single ontology term given as JSON
    CheckTerm(CheckTermArgs),
    /// Print an empty phenopacket template
    Template(TemplateArgs),
    /// Start the HTTP server
    Server(ServerArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Schema version to validate against
    #[arg(long, default_value = "v2")]
    pub schema_version: SchemaVersion,

    /// Glob patterns to exclude (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Fail when any document has warnings
    #[arg(long)]
    pub warnings_as_errors: bool,

    /// Maximum size of a single file in bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,
}

#[derive(Args, Debug)]
pub struct CheckTermArgs {
    /// Ontology term as JSON, e.g. '{"id": "HP:0000118", "label": "Phenotypic abnormality"}'
    pub json: String,

    /// Field path used as the prefix of every message
    #[arg(long, default_value = DEFAULT_TERM_PATH)]
    pub path: String,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Schema version of the template
    #[arg(long, default_value = "v2")]
    pub schema_version: SchemaVersion,

    /// Add a metaData block created now by NAME
    #[arg(long, value_name = "NAME")]
    pub created_by: Option<String>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Host to bind to
    #[arg(long, env = "PHENOPACKETS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PHENOPACKETS_PORT", default_value_t = 8000)]
    pub port: u16,
}

/// Parse the command line and run the selected command.
///
/// # Errors
///
/// Returns an error if the command itself fails (unreadable input, bind
/// failure, ...). Failed validations are reported through the exit code.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut stdout = std::io::stdout();
    let success = match cli.command {
        Commands::Validate(args) => {
            colored::control::set_override(stdout.is_terminal());
            cmd_validate(&args, &mut stdout)?
        }
        Commands::CheckTerm(args) => cmd_check_term(&args, &mut stdout)?,
        Commands::Template(args) => cmd_template(&args, &mut stdout)?,
        Commands::Server(args) => {
            let config = ServerConfig {
                host: args.host,
                port: args.port,
                verbose: cli.verbose,
            };
            server::serve(&config).await?;
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `validate`; returns the report's `ok`.
///
/// # Errors
///
/// Returns an error if a path does not exist or the report cannot be written.
pub fn cmd_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<bool> {
    let mut fs_config = FsSourceConfig::default();
    fs_config.paths.clone_from(&args.paths);
    fs_config.exclude.clone_from(&args.exclude);
    fs_config.follow_links = args.follow_links;
    if let Some(max) = args.max_file_size {
        fs_config.max_file_size = max;
    }

    let mut validation_config = ValidationConfig::default();
    validation_config.schema_version = args.schema_version;
    validation_config.warnings_as_errors = args.warnings_as_errors;

    let report = validate_fs(&fs_config, &validation_config)?;
    match args.format {
        OutputFormat::Json => output::write_json(&report, out)?,
        OutputFormat::Human => {
            let mut buf = Vec::new();
            output::write_human(&report, &mut buf)?;
            for line in String::from_utf8_lossy(&buf).lines() {
                writeln!(out, "{}", colorize_line(line))?;
            }
        }
    }
    Ok(report.ok)
}

fn colorize_line(line: &str) -> String {
    if line.starts_with('\u{2713}') {
        line.green().bold().to_string()
    } else if line.starts_with('\u{2717}') || line.contains(": error: ") {
        line.red().to_string()
    } else if line.contains(": warning: ") {
        line.yellow().to_string()
    } else if line.contains("[scan error]") {
        line.magenta().to_string()
    } else {
        line.to_owned()
    }
}

/// Run `check-term`; returns whether the term has no errors.
///
/// # Errors
///
/// Returns an error if the argument is not valid JSON or output fails.
pub fn cmd_check_term(args: &CheckTermArgs, out: &mut dyn Write) -> Result<bool> {
    let term = phenopackets::parse_document(&args.json)?;
    let findings = phenopackets::validate_ontology_term(&term, &args.path);

    let curie = term
        .get("id")
        .and_then(Value::as_str)
        .map(|id| match phenopackets_id::parse_curie(id) {
            Ok(c) => json!({ "prefix": c.prefix, "reference": c.reference }),
            Err(e) => json!({ "error": e.to_string() }),
        });

    let body = json!({
        "path": args.path,
        "isValid": findings.is_valid(),
        "errors": findings.errors,
        "warnings": findings.warnings,
        "curie": curie,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    Ok(findings.is_valid())
}

/// Run `template`.
///
/// # Errors
///
/// Returns an error if the creation time cannot be rendered or output fails.
pub fn cmd_template(args: &TemplateArgs, out: &mut dyn Write) -> Result<bool> {
    let mut document = phenopackets::empty_phenopacket(args.schema_version);
    if let Some(created_by) = &args.created_by {
        phenopackets::stamp_meta_data(&mut document, args.schema_version, Timestamp::now(), created_by)?;
    }
    writeln!(out, "{}", phenopackets::to_json_string(&document, args.pretty)?)?;
    Ok(true)
}
