//! Structured document model: the tree behind a record's `Data` string

pub mod model;
pub mod parser;
pub mod writer;

pub use model::{is_valid_name, Document, Element, ROOT_ELEMENT};
pub use parser::{Config, Parser};
pub use writer::serialize;
