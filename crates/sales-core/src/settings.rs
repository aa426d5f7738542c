use clap::{CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::RegionFilter;

/// Default location of the normalized artifact written by `transform`.
pub const DEFAULT_OUTPUT_FILE: &str = "formatted_sales_output.csv";

/// Default directory scanned for raw daily sales files.
pub const DEFAULT_DATA_DIR: &str = "data";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Pink Morsel sales pipeline and dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pink-morsel",
    about = "Normalize daily sales files and inspect the Pink Morsel price change",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level
    #[arg(long, global = true, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (stderr when omitted)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge raw daily sales files into the normalized Pink Morsel CSV.
    Transform(TransformArgs),
    /// Print the daily series and before/after KPIs.
    Report(ReportArgs),
    /// Launch the interactive terminal dashboard.
    Dashboard(DashboardArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct TransformArgs {
    /// Input CSV files, concatenated in the order given
    #[arg(value_name = "CSV")]
    pub inputs: Vec<PathBuf>,

    /// Directory scanned for `*.csv` files when no inputs are given
    #[arg(long, env = "PINK_MORSEL_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Output file for the normalized records
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Normalized sales file produced by `transform`
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub input: PathBuf,

    /// Region filter (all, north, east, south, west)
    #[arg(short, long, default_value = "all")]
    pub region: RegionFilter,

    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DashboardArgs {
    /// Normalized sales file produced by `transform`
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub input: PathBuf,

    /// Initially selected region (all, north, east, south, west)
    #[arg(short, long, default_value = "all")]
    pub region: RegionFilter,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// How daily totals are drawn
    #[arg(long, default_value = "line", value_parser = ["line", "markers"])]
    pub chart_style: String,

    /// Clear saved dashboard preferences
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Dashboard preferences saved to `~/.pink-morsel/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_style: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".pink-morsel").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl From<&DashboardArgs> for LastUsedParams {
    fn from(args: &DashboardArgs) -> Self {
        LastUsedParams {
            region: Some(args.region.to_string()),
            theme: Some(args.theme.clone()),
            chart_style: Some(args.chart_style.clone()),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, merging saved dashboard preferences.
    pub fn load() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation with an explicit argument list and config path.
    ///
    /// Saved preferences only apply to `dashboard`, and only to flags not
    /// given on the command line.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if let Command::Dashboard(ref mut dash) = settings.command {
            let sub = matches.subcommand_matches("dashboard");
            let explicit = |name: &str| sub.is_some_and(|m| is_arg_explicitly_set(m, name));

            if dash.clear {
                if let Err(e) = LastUsedParams::clear_at(config_path) {
                    tracing::warn!("Failed to clear saved preferences: {}", e);
                }
            } else {
                let last = LastUsedParams::load_from(config_path);

                if !explicit("region") {
                    if let Some(region) = last.region.and_then(|r| r.parse().ok()) {
                        dash.region = region;
                    }
                }
                if !explicit("theme") {
                    if let Some(theme) = last.theme {
                        dash.theme = theme;
                    }
                }
                // clap stores the arg id using the field name.
                if !explicit("chart_style") {
                    if let Some(style) = last.chart_style {
                        dash.chart_style = style;
                    }
                }

                if let Err(e) = LastUsedParams::from(&*dash).save_to(config_path) {
                    tracing::warn!("Failed to save preferences to {}: {}", config_path.display(), e);
                }
            }
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}
