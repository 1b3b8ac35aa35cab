use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use helm_docgen_config::Config;
use helm_docgen_engine::{generate_docs, io};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_VALUES_PATH: &str = "values.yaml";

/// Generate markdown reference docs from an annotated Helm values file.
#[derive(Debug, Parser)]
#[command(name = "helm-docgen", version, about)]
struct Cli {
    /// Values file to document [default: config `values_path`, else ./values.yaml]
    values: Option<PathBuf>,

    /// Write the docs to FILE instead of stdout [default: config `output_path`]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file [default: ~/.config/helm-docgen/config.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Build and validate only; print nothing on success
    #[arg(long)]
    check: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // RUST_LOG is parsed last so it can still override the flag
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let values_path = cli
        .values
        .clone()
        .or_else(|| config.as_ref().map(|c| c.values_path.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VALUES_PATH));
    let output_path = cli
        .output
        .clone()
        .or_else(|| config.and_then(|c| c.output_path));

    log::info!("Documenting {}", values_path.display());
    let values = io::read_values(&values_path)
        .with_context(|| format!("Failed to read values file '{}'", values_path.display()))?;
    let docs = generate_docs(&values)
        .with_context(|| format!("Failed to document '{}'", values_path.display()))?;

    if cli.check {
        log::info!("{} is valid", values_path.display());
        return Ok(());
    }

    match output_path {
        Some(path) => {
            io::write_output(&path, &format!("{docs}\n"))
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{docs}"),
    }
    Ok(())
}

/// An explicit config file must exist; the default one is optional.
fn load_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    match explicit {
        Some(path) => {
            let Some(config) = Config::load_from_path(path)? else {
                bail!("Config file '{}' not found", path.display());
            };
            Ok(Some(config))
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?)
        }
    }
}
