use crate::models::PropertyRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can produce the property catalog.
/// The catalog is loaded once per process through this seam.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Load every record, in the source's own stable order
    async fn load(&self) -> Result<Vec<PropertyRecord>>;

    /// Get the name of the source, for logging
    fn source_name(&self) -> &'static str;
}
