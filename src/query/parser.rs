//! Query Parser
//!
//! Turns a free-text property query into a [`FilterSet`] by running an
//! ordered list of independent [`Extractor`] rules over the lower-cased text.

use crate::query::filters::FilterSet;
use crate::query::rules::{BhkRule, CityRule, Extractor, LocalityRule, PriceRule, StatusRule};
use crate::query::vocabulary::CityVocabulary;
use anyhow::Result;
use std::sync::OnceLock;
use tracing::debug;

/// Rule-based query parser
pub struct QueryParser {
    rules: Vec<Box<dyn Extractor>>,
}

impl QueryParser {
    /// Parser recognising the built-in cities
    pub fn new() -> Result<Self> {
        Self::with_cities(CityVocabulary::default())
    }

    /// Parser whose city and locality rules use the given vocabulary
    pub fn with_cities(vocabulary: CityVocabulary) -> Result<Self> {
        let rules: Vec<Box<dyn Extractor>> = vec![
            Box::new(PriceRule),
            Box::new(BhkRule),
            Box::new(CityRule::new(vocabulary.clone())?),
            Box::new(StatusRule),
            Box::new(LocalityRule::new(vocabulary)),
        ];

        Ok(Self::with_rules(rules))
    }

    /// Parser over a custom rule list, applied in order
    pub fn with_rules(rules: Vec<Box<dyn Extractor>>) -> Self {
        Self { rules }
    }

    /// Parse a query into filters. Never fails; unmatched rules are omitted.
    pub fn parse(&self, query: &str) -> FilterSet {
        let text = query.to_lowercase();

        self.rules
            .iter()
            .filter_map(|rule| {
                let filter = rule.extract(&text)?;
                debug!("Rule '{}' matched: {:?}", rule.name(), filter);
                Some(filter)
            })
            .collect()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new().expect("Failed to create default QueryParser")
    }
}

/// Parse with the built-in city vocabulary
pub fn parse_query(query: &str) -> FilterSet {
    static PARSER: OnceLock<QueryParser> = OnceLock::new();
    PARSER.get_or_init(QueryParser::default).parse(query)
}
