use crate::models::PropertyRecord;
use crate::query::{CityVocabulary, FilterSet, QueryParser};
use crate::search;
use crate::sources::PropertySource;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of one query against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub query: String,
    pub filters: FilterSet,
    pub total: usize,
    pub results: Vec<PropertyRecord>,
}

/// The loaded dataset together with a parser built from its cities
pub struct Catalog {
    records: Vec<PropertyRecord>,
    vocabulary: CityVocabulary,
    parser: QueryParser,
}

impl Catalog {
    /// Load the dataset from `source` and build the parser
    pub async fn load(source: &dyn PropertySource) -> Result<Self> {
        info!("Loading catalog from {}", source.source_name());
        let records = source
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", source.source_name()))?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<PropertyRecord>) -> Result<Self> {
        let mut vocabulary = CityVocabulary::from_records(&records);
        if vocabulary.is_empty() {
            warn!("Catalog has no known cities - falling back to the built-in list");
            vocabulary = CityVocabulary::default();
        }
        debug!("Recognising {} cities", vocabulary.len());

        let parser = QueryParser::with_cities(vocabulary.clone())?;

        Ok(Self {
            records,
            vocabulary,
            parser,
        })
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn vocabulary(&self) -> &CityVocabulary {
        &self.vocabulary
    }

    pub fn parse(&self, query: &str) -> FilterSet {
        self.parser.parse(query)
    }

    pub fn search(&self, filters: &FilterSet) -> Vec<PropertyRecord> {
        search::search(&self.records, filters)
    }

    /// Parse then search
    pub fn answer(&self, query: &str) -> Answer {
        let filters = self.parse(query);
        let results = self.search(&filters);
        info!(
            "Query '{}' -> {} filters, {} matches",
            query,
            filters.len(),
            results.len()
        );

        Answer {
            query: query.to_string(),
            filters,
            total: results.len(),
            results,
        }
    }
}
