//! Natural-language property search.
//!
//! [`query::QueryParser`] turns text like "2 BHK in Pune under 80 lakh" into a
//! [`query::FilterSet`], and [`search::search`] applies it to the catalog.

pub mod catalog;
pub mod config;
pub mod display;
pub mod models;
pub mod query;
pub mod search;
pub mod sources;

pub use catalog::{Answer, Catalog};
pub use models::{PropertyRecord, Status};
pub use query::{parse_query, FilterSet, QueryParser};
pub use search::search;
