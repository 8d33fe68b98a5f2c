pub mod engine;


pub use engine::{matches, search};
