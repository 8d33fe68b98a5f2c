pub mod json;
pub mod tables;
pub mod traits;
pub mod types;

pub use json::{save_records, JsonSource};
pub use tables::CsvSource;
pub use traits::PropertySource;
pub use types::CsvTables;
