//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use scenport_core::pipeline::{ImportRequest, analyze};
use scenport_shared::{AppConfig, StepNode, UuidIdGenerator, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// scenport — reconstruct scenario step trees from export files.
#[derive(Parser)]
#[command(
    name = "scenport",
    version,
    about = "Analyze scenario export files into import-ready step trees.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Analyze an export file into an import-ready result.
    Analyze {
        /// Path to the scenario export file.
        file: PathBuf,

        /// Destination project id for the imported scenarios.
        #[arg(short, long)]
        project: String,

        /// Output path for the analysis JSON (defaults to
        /// `<output_dir>/<file stem>.analysis.json`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Emit compact JSON regardless of the configured default.
        #[arg(long)]
        compact: bool,
    },

    /// Print a human-readable summary of an export file's step trees.
    Inspect {
        /// Path to the scenario export file.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scenport=info",
        1 => "scenport=debug",
        _ => "scenport=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            file,
            project,
            out,
            compact,
        } => cmd_analyze(&file, &project, out.as_deref(), compact),
        Command::Inspect { file } => cmd_inspect(&file),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_analyze(file: &Path, project: &str, out: Option<&Path>, compact: bool) -> Result<()> {
    let config = load_config()?;
    let start = Instant::now();

    info!(file = %file.display(), project, "analyzing export file");

    let envelope = scenport_envelope::parse_export_file(file)?;
    let request = ImportRequest {
        project_id: project.to_string(),
    };
    let ids = UuidIdGenerator;
    let analysis = analyze(&envelope, &request, &ids)?;

    let out_path = match out {
        Some(p) => p.to_path_buf(),
        None => default_out_path(&config, file)?,
    };

    let json = if compact || !config.defaults.pretty {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    std::fs::write(&out_path, json)
        .map_err(|e| eyre!("cannot write {}: {e}", out_path.display()))?;

    let step_count: usize = analysis
        .scenarios
        .iter()
        .chain(&analysis.related_scenarios)
        .flat_map(|s| &s.steps)
        .map(StepNode::subtree_len)
        .sum();

    println!();
    println!("  Export analyzed successfully!");
    println!("  Scenarios: {}", analysis.scenarios.len());
    println!("  Related:   {}", analysis.related_scenarios.len());
    println!("  Steps:     {step_count}");
    println!("  Output:    {}", out_path.display());
    println!("  Time:      {:.2}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_inspect(file: &Path) -> Result<()> {
    let envelope = scenport_envelope::parse_export_file(file)?;

    // Ids are regenerated per analysis; for inspection the destination
    // project is irrelevant.
    let request = ImportRequest {
        project_id: "inspect".to_string(),
    };
    let ids = UuidIdGenerator;
    let analysis = analyze(&envelope, &request, &ids)?;

    let blob_count: usize = analysis
        .scenarios
        .iter()
        .chain(&analysis.related_scenarios)
        .map(|s| s.step_details.len())
        .sum();
    println!(
        "Scenarios: {} ({} related, {blob_count} blobs rehomed)",
        analysis.scenarios.len(),
        analysis.related_scenarios.len()
    );

    for detail in analysis.scenarios.iter().chain(&analysis.related_scenarios) {
        println!();
        println!("{} ({})", detail.name, detail.id);
        if detail.steps.is_empty() {
            println!("  (no reconstructable steps)");
        }
        for step in &detail.steps {
            print_tree(step, 1);
        }
        if !detail.csv_files.is_empty() {
            println!("  datasets: {}", detail.csv_files.len());
        }
    }
    println!();

    Ok(())
}

fn print_tree(node: &StepNode, depth: usize) {
    let marker = if node.enable { "" } else { " [disabled]" };
    println!(
        "{}- {} <{}>{marker}",
        "  ".repeat(depth),
        if node.name.is_empty() { &node.id } else { &node.name },
        node.step_type
    );
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

/// Default analysis output path: `<output_dir>/<file stem>.analysis.json`.
fn default_out_path(config: &AppConfig, file: &Path) -> Result<PathBuf> {
    let stem = file
        .file_stem()
        .ok_or_else(|| eyre!("cannot derive output name from '{}'", file.display()))?;
    let mut name = stem.to_os_string();
    name.push(".analysis.json");
    Ok(PathBuf::from(&config.defaults.output_dir).join(name))
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
