pub mod filters;
pub mod parser;
pub mod rules;
pub mod vocabulary;

pub use filters::{Filter, FilterSet};
pub use parser::{parse_query, QueryParser};
pub use rules::Extractor;
pub use vocabulary::CityVocabulary;
