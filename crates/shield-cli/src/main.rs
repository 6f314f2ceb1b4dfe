//! SHIELD-HIT12A converter CLI
//!
//! Compiles a simulation setup into the engine's four input files and turns
//! a finished run's binary output back into a JSON result.
//!
//! # Usage
//!
//! ```bash
//! # Compile a setup into a working directory
//! shield-cli compile --setup setup.json --out run/
//!
//! # Engine runs in run/ (not handled here), then:
//! shield-cli parse-results --dir run/ --context run/context.json
//!
//! # List the names the engine tables understand
//! shield-cli tables particles
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use shield_converter::{mapping, ConverterConfig, SerializationContext, ShieldBackend, SimulationBackend, CONFIG_ENV_VAR};
use sim_setup::{validate_setup, Setup};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const CONTEXT_FILE: &str = "context.json";

#[derive(Parser)]
#[command(name = "shield-cli")]
#[command(version)]
#[command(about = "Compile simulation setups for SHIELD-HIT12A and parse its results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Converter config (YAML)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Debug logging for the converter (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a setup into mat.dat, geo.dat, detect.dat and beam.dat
    Compile {
        /// Setup document (.json, .yaml or .yml)
        #[arg(short, long)]
        setup: PathBuf,

        /// Working directory to write into (created if missing)
        #[arg(short, long)]
        out: PathBuf,

        /// Where to store the serialization context (default: <out>/context.json)
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Parse the binary result files of a finished run
    ParseResults {
        /// Directory holding the engine output
        #[arg(short, long)]
        dir: PathBuf,

        /// Serialization context written by `compile`
        #[arg(long)]
        context: PathBuf,

        /// Write the result JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the entries of the engine lookup tables
    Tables {
        #[arg(value_enum, default_value = "all")]
        table: Table,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Table {
    Materials,
    Isotopes,
    Particles,
    Scoring,
    All,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Compile { setup, out, context } => cmd_compile(&config, &setup, &out, context),
        Commands::ParseResults { dir, context, output } => cmd_parse_results(&config, &dir, &context, output),
        Commands::Tables { table } => cmd_tables(table),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info,shield_converter=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => ConverterConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ConverterConfig::default()),
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_compile(config: &ConverterConfig, setup_path: &Path, out: &Path, context: Option<PathBuf>) -> Result<()> {
    let setup = Setup::from_path(setup_path).with_context(|| format!("reading setup {}", setup_path.display()))?;

    let findings = validate_setup(&setup);
    if !findings.is_empty() {
        for finding in &findings {
            eprintln!("  {} {}", "x".red(), finding);
        }
        bail!("setup has {} validation error(s)", findings.len());
    }

    let backend = ShieldBackend::new(config.clone());
    let (files, ctx) = backend.compile(&setup)?;

    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    files.write_to(out)?;
    let context_path = context.unwrap_or_else(|| out.join(CONTEXT_FILE));
    std::fs::write(&context_path, ctx.to_json()?)
        .with_context(|| format!("writing {}", context_path.display()))?;

    for (name, _) in files.files() {
        println!("{} {}", "OK".green(), out.join(name).display());
    }
    println!("{} {}", "OK".green(), context_path.display());
    println!("{} {}", "run:".bold(), files.command_line().join(" "));
    Ok(())
}

fn cmd_parse_results(config: &ConverterConfig, dir: &Path, context: &Path, output: Option<PathBuf>) -> Result<()> {
    let json = std::fs::read_to_string(context).with_context(|| format!("reading {}", context.display()))?;
    let ctx = SerializationContext::from_json(&json).with_context(|| format!("parsing {}", context.display()))?;

    let mut files = BTreeMap::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let content = std::fs::read(entry.path()).with_context(|| format!("reading {}", entry.path().display()))?;
        files.insert(name, content);
    }

    let backend = ShieldBackend::new(config.clone());
    let result = backend.parse_results(&files, &ctx);
    for (file, error) in &result.errors {
        eprintln!("  {} {}: {}", "!".yellow(), file, error);
    }

    let rendered = serde_json::to_string_pretty(&result)?;
    match output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("{} {} detector result(s) -> {}", "OK".green(), result.detectors.len(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn cmd_tables(table: Table) -> Result<()> {
    let show = |wanted: Table| table == wanted || table == Table::All;
    if show(Table::Materials) {
        print_section("Predefined materials", mapping::predefined_materials().map(|(n, id)| (n, id.to_string())));
    }
    if show(Table::Isotopes) {
        print_section("Isotopes", mapping::isotopes().map(|(n, id)| (n, id.to_string())));
    }
    if show(Table::Particles) {
        print_section("Particles", mapping::particles().map(|(n, id)| (n, id.to_string())));
    }
    if show(Table::Scoring) {
        print_section("Scoring quantities", mapping::scoring_quantities().map(|(n, card)| (n, card.to_string())));
    }
    Ok(())
}

fn print_section<'a>(title: &str, rows: impl Iterator<Item = (&'a str, String)>) {
    println!("{}", title.bold());
    for (name, value) in rows {
        println!("  {} {}", format!("{:<40}", name).green(), value);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_parses() {
        let cli = Cli::try_parse_from(["shield-cli", "--config", "conv.yaml", "tables", "particles"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("conv.yaml")));
        assert!(matches!(cli.command, Commands::Tables { table: Table::Particles }));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/conv.yaml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/conv.yaml"));
    }
}
