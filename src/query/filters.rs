use crate::models::Status;
use serde::{Deserialize, Serialize};

/// A single constraint produced by one extraction rule
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    MaxPrice(f64),
    Bhk(String),
    City(String),
    Status(Status),
    Locality(String),
}

/// Structured search constraints derived from a query.
///
/// Every field is independent and optional. `None` means the dimension is
/// unconstrained; present fields are ANDed by the search engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bhk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filter unless its dimension is already set
    pub fn insert(&mut self, filter: Filter) {
        match filter {
            Filter::MaxPrice(value) => {
                self.max_price.get_or_insert(value);
            }
            Filter::Bhk(value) => {
                self.bhk.get_or_insert(value);
            }
            Filter::City(value) => {
                self.city.get_or_insert(value);
            }
            Filter::Status(value) => {
                self.status.get_or_insert(value);
            }
            Filter::Locality(value) => {
                self.locality.get_or_insert(value);
            }
        }
    }

    pub fn with(mut self, filter: Filter) -> Self {
        self.insert(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of constrained dimensions
    pub fn len(&self) -> usize {
        [
            self.max_price.is_some(),
            self.bhk.is_some(),
            self.city.is_some(),
            self.status.is_some(),
            self.locality.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        iter.into_iter().fold(FilterSet::new(), FilterSet::with)
    }
}
