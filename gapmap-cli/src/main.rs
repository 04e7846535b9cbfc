//! Gapmap CLI - explore the GenAI security maturity assessment

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use gapmap_core::config::{self, ResolvedConfig};
use gapmap_core::{load_dataset, render_html, render_json, render_text, Controller, Theme};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gapmap")]
#[command(about = "GenAI security maturity explorer (heatmap, protection gaps, threat profiles)")]
#[command(version = env!("GAPMAP_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard snapshot for an assessment year
    Show {
        /// Dataset file (default: builtin assessment)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Assessment year (default: baseline)
        #[arg(long)]
        year: Option<u16>,

        /// Enable the what-if governance simulation
        #[arg(long)]
        simulate: bool,

        /// Open the detail view for a threat category
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the dashboard as a self-contained HTML file
    Export {
        /// Dataset file (default: builtin assessment)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Assessment year (default: baseline)
        #[arg(long)]
        year: Option<u16>,

        /// Enable the what-if governance simulation
        #[arg(long)]
        simulate: bool,

        /// Theme for the exported dashboard (overrides config file)
        #[arg(long)]
        theme: Option<ThemeArg>,

        /// Output file path
        #[arg(long, default_value = "gapmap-report.html")]
        output: PathBuf,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Theme {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            dataset,
            year,
            simulate,
            category,
            format,
            config,
        } => {
            let resolved = resolve_config(config.as_deref())?;
            let mut controller =
                build_controller(dataset.as_deref(), year, simulate, None, &resolved)?;
            if let Some(ref category) = category {
                controller
                    .select_category(category)
                    .with_context(|| format!("cannot open detail view for {:?}", category))?;
            }

            let snapshot = controller.snapshot();
            match format {
                OutputFormat::Text => print!("{}", render_text(&snapshot)),
                OutputFormat::Json => println!("{}", render_json(&snapshot)),
            }
            Ok(())
        }
        Commands::Export {
            dataset,
            year,
            simulate,
            theme,
            output,
            config,
        } => {
            let resolved = resolve_config(config.as_deref())?;
            let controller = build_controller(
                dataset.as_deref(),
                year,
                simulate,
                theme.map(Theme::from),
                &resolved,
            )?;

            let html = render_html(
                controller.dataset(),
                controller.state(),
                controller.params(),
            );
            write_html_report(&output, &html)?;
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let resolved = resolve_config(path.as_deref())?;
                match resolved.config_path {
                    Some(path) => println!("Config valid: {}", path.display()),
                    None => println!("No config file found; defaults apply"),
                }
                Ok(())
            }
            ConfigAction::Show { path } => {
                let resolved = resolve_config(path.as_deref())?;
                print_resolved_config(&resolved);
                Ok(())
            }
        },
    }
}

/// Resolve configuration from an explicit path or the current directory.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    config::resolve_config(explicit, &cwd)
}

/// Load the dataset and apply startup selections (config first, then CLI).
fn build_controller(
    dataset: Option<&Path>,
    year: Option<u16>,
    simulate: bool,
    theme: Option<Theme>,
    resolved: &ResolvedConfig,
) -> anyhow::Result<Controller> {
    let dataset_path = dataset.or(resolved.dataset_path.as_deref());
    let dataset = load_dataset(dataset_path).context("failed to load dataset")?;

    let mut controller = Controller::with_params(dataset, resolved.params);

    if let Some(default_year) = resolved.default_year {
        controller
            .set_year(default_year)
            .context("config default_year is not covered by the dataset")?;
    }
    if let Some(year) = year {
        controller
            .set_year(year)
            .with_context(|| format!("cannot select year {}", year))?;
    }
    if simulate {
        controller.set_simulation(true);
    }

    let target_theme = theme.unwrap_or(resolved.theme);
    if controller.state().theme != target_theme {
        controller.toggle_theme();
    }

    Ok(controller)
}

fn print_resolved_config(resolved: &ResolvedConfig) {
    match resolved.config_path {
        Some(ref path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, defaults)"),
    }
    match resolved.dataset_path {
        Some(ref path) => println!("Dataset: {}", path.display()),
        None => println!("Dataset: builtin assessment"),
    }
    match resolved.default_year {
        Some(year) => println!("Default year: {}", year),
        None => println!("Default year: dataset baseline"),
    }
    println!("Theme: {}", resolved.theme.as_str());
    println!("Simulation delta: {}", resolved.params.delta);
}

/// Write the HTML report, creating parent directories as needed.
fn write_html_report(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write HTML report: {}", path.display()))?;
    println!("HTML dashboard written to {}", path.display());
    Ok(())
}
