use crate::models::PropertyRecord;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Catalog loaded from a pre-merged JSON array of records
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PropertySource for JsonSource {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        info!("Loading catalog from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let records: Vec<PropertyRecord> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to decode records in {}", self.path.display()))?;

        info!("Loaded {} property records", records.len());
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "JSON dump"
    }
}

/// Write records as a pretty-printed JSON array
pub async fn save_records(records: &[PropertyRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("💾 Saved {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn sample() -> Vec<PropertyRecord> {
        vec![PropertyRecord {
            project_name: "Skyline Towers".to_string(),
            city: Some("Pune".to_string()),
            locality: Some("Baner".to_string()),
            bhk: Some("2 BHK".to_string()),
            price: Some(7_500_000),
            status: Some(Status::ReadyToMove),
            carpet_area: Some(850.0),
            bathrooms: Some(2.0),
            furnished_type: None,
            parking_type: Some("COVERED".to_string()),
            possession_date: Some("Mar 2024".to_string()),
            slug: "skyline-towers-baner-pune-101".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_saved_records_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export").join("catalog.json");

        save_records(&sample(), &path).await.unwrap();
        let loaded = JsonSource::new(&path).load().await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = JsonSource::new(&path).load().await.unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
