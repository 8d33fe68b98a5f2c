use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy status of a listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    ReadyToMove,
    UnderConstruction,
    /// Anything else the catalog carries, kept verbatim
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::ReadyToMove => "READY_TO_MOVE",
            Status::UnderConstruction => "UNDER_CONSTRUCTION",
            Status::Other(raw) => raw,
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "READY_TO_MOVE" => Status::ReadyToMove,
            "UNDER_CONSTRUCTION" => Status::UnderConstruction,
            other => Status::Other(other.to_string()),
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Status::from(raw.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the merged property catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub project_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    /// Canonical "<N> BHK"
    #[serde(default)]
    pub bhk: Option<String>,
    /// Price in rupees
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub carpet_area: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub furnished_type: Option<String>,
    #[serde(default)]
    pub parking_type: Option<String>,
    /// Formatted as "%b %Y", e.g. "Dec 2025"
    #[serde(default)]
    pub possession_date: Option<String>,
    pub slug: String,
}
