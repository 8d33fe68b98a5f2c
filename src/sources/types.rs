use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Locations of the four relational catalog tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvTables {
    /// Directory holding the CSV files
    pub data_dir: PathBuf,
    /// Projects: id, projectName, status, slug, possessionDate
    pub project_file: String,
    /// Addresses: projectId
    pub address_file: String,
    /// Configurations: id, projectId, type
    pub configuration_file: String,
    /// Variants: configurationId, price, carpetArea, bathrooms, ...
    pub variant_file: String,
}

impl CsvTables {
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn project_path(&self) -> PathBuf {
        self.data_dir.join(&self.project_file)
    }

    pub fn address_path(&self) -> PathBuf {
        self.data_dir.join(&self.address_file)
    }

    pub fn configuration_path(&self) -> PathBuf {
        self.data_dir.join(&self.configuration_file)
    }

    pub fn variant_path(&self) -> PathBuf {
        self.data_dir.join(&self.variant_file)
    }
}

impl Default for CsvTables {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            project_file: "project.csv".to_string(),
            address_file: "ProjectAddress.csv".to_string(),
            configuration_file: "ProjectConfiguration.csv".to_string(),
            variant_file: "ProjectConfigurationVariant.csv".to_string(),
        }
    }
}
