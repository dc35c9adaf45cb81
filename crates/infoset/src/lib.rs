//! infoset - field storage over a lazily parsed XML document
//!
//! Each content item version carries a serialized document, its `Data`.
//! Fields of the item's parts are stored inside it, one element per field:
//! the unnamed value is the element's text and named values are attributes.
//!
//! # Quick Start
//!
//! ```
//! use infoset::{
//!     ContentItem, ContentPartDefinition, ContentTypeDefinition, FieldStorage,
//!     FieldStorageProvider, InfosetStorageProvider,
//! };
//! # fn main() -> Result<(), infoset::Error> {
//! let page = ContentTypeDefinition::new("Page")
//!     .with_part(ContentPartDefinition::new("Foo").with_field("Bar"));
//! let item = ContentItem::new(1, &page);
//! let part = &item.parts()[0];
//! let storage = InfosetStorageProvider::new().bind_storage(part, &part.fields()[0])?;
//!
//! storage.set(None, Some("one"))?;
//! storage.set(Some("alpha"), Some("two"))?;
//!
//! assert_eq!(storage.get(Some("alpha"))?.as_deref(), Some("two"));
//! assert_eq!(item.data(), r#"<Data><Foo><Bar alpha="two">one</Bar></Foo></Data>"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;

pub mod document;
pub use document::{Config, Document, Element};

pub mod content;
pub use content::{
    ContentItem, ContentPart, ContentPartDefinition, ContentPartFieldDefinition,
    ContentTypeDefinition, RecordHandle, VersionRecord,
};

pub mod storage;
pub use storage::{
    FieldStorage, FieldStorageExt, FieldStorageProvider, InfosetFieldStorage,
    InfosetStorageProvider,
};

/// Parse a document from string
pub fn from_str(s: &str) -> Result<Document> {
    Document::parse(s)
}

/// Parse a document from string with custom limits
pub fn from_str_with_config(s: &str, config: Config) -> Result<Document> {
    Document::parse_with_config(s, config)
}

/// Serialize a document to its canonical string form
pub fn to_string(document: &Document) -> String {
    document::serialize(document)
}
