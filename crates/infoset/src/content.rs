//! Content model collaborators: definitions, items, parts and the version
//! record that owns the serialized infoset

pub mod definition;
pub mod item;
pub mod record;

pub use definition::{ContentPartDefinition, ContentPartFieldDefinition, ContentTypeDefinition};
pub use item::{ContentItem, ContentPart};
pub use record::{RecordHandle, VersionRecord};
