use crate::sources::{CsvSource, CsvTables, JsonSource, PropertySource};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Answer natural-language property queries against a local catalog
#[derive(Debug, Parser)]
#[command(name = "property-finder", version, about)]
pub struct Cli {
    /// Directory with project.csv, ProjectAddress.csv, ProjectConfiguration.csv
    /// and ProjectConfigurationVariant.csv
    #[arg(short, long, env = "PROPERTY_FINDER_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Pre-merged JSON dataset; takes precedence over --data-dir
    #[arg(long, env = "PROPERTY_FINDER_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Number of result cards to print
    #[arg(
        short = 'n',
        long,
        env = "PROPERTY_FINDER_MAX_RESULTS",
        default_value_t = DEFAULT_MAX_RESULTS
    )]
    pub max_results: usize,

    /// Print filters and results as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the merged dataset to this JSON file and exit
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Query text; omit to start an interactive prompt
    pub query: Vec<String>,
}

/// Where the catalog comes from
#[derive(Debug, Clone)]
pub enum DatasetConfig {
    Csv(CsvTables),
    Json(PathBuf),
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub max_results: usize,
    pub json_output: bool,
    pub export: Option<PathBuf>,
    pub query: Option<String>,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let dataset = match cli.dataset {
            Some(path) => DatasetConfig::Json(path),
            None => DatasetConfig::Csv(CsvTables::in_dir(cli.data_dir)),
        };

        let query = cli.query.join(" ");
        let query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };

        Self {
            dataset,
            max_results: cli.max_results,
            json_output: cli.json,
            export: cli.export,
            query,
        }
    }

    pub fn source(&self) -> Box<dyn PropertySource> {
        match &self.dataset {
            DatasetConfig::Csv(tables) => Box::new(CsvSource::with_tables(tables.clone())),
            DatasetConfig::Json(path) => Box::new(JsonSource::new(path.clone())),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::Csv(CsvTables::default()),
            max_results: DEFAULT_MAX_RESULTS,
            json_output: false,
            export: None,
            query: None,
        }
    }
}
