//! Content items and the parts welded onto them

use crate::content::definition::{
    ContentPartDefinition, ContentPartFieldDefinition, ContentTypeDefinition,
};
use crate::content::record::{RecordHandle, VersionRecord};

/// A content item version and its parts.
///
/// Every part shares the item's version record.
#[derive(Clone, Debug)]
pub struct ContentItem {
    id: u64,
    content_type: String,
    record: RecordHandle,
    parts: Vec<ContentPart>,
}

impl ContentItem {
    /// Create an item with an empty record and one part per part definition
    pub fn new(id: u64, definition: &ContentTypeDefinition) -> Self {
        Self::with_record(id, definition, VersionRecord::new())
    }

    /// Create an item over an existing record
    pub fn with_record(id: u64, definition: &ContentTypeDefinition, record: VersionRecord) -> Self {
        let mut item = Self {
            id,
            content_type: definition.name().to_string(),
            record: record.into_handle(),
            parts: Vec::new(),
        };
        for part in definition.parts() {
            item.weld(part.clone());
        }
        item
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn record(&self) -> &RecordHandle {
        &self.record
    }

    /// Snapshot of the record's serialized infoset
    pub fn data(&self) -> String {
        self.record.read().data().to_string()
    }

    /// Overwrite the record's serialized infoset
    pub fn set_data(&self, data: impl Into<String>) {
        self.record.write().set_data(data);
    }

    /// Attach a part sharing this item's record
    #[allow(clippy::indexing_slicing)]
    pub fn weld(&mut self, definition: ContentPartDefinition) -> &ContentPart {
        let index = self.parts.len();
        self.parts.push(ContentPart {
            definition,
            record: self.record.clone(),
        });
        &self.parts[index]
    }

    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&ContentPart> {
        self.parts.iter().find(|part| part.name() == name)
    }
}

/// A part of a content item
#[derive(Clone, Debug)]
pub struct ContentPart {
    definition: ContentPartDefinition,
    record: RecordHandle,
}

impl ContentPart {
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &ContentPartDefinition {
        &self.definition
    }

    pub fn fields(&self) -> &[ContentPartFieldDefinition] {
        self.definition.fields()
    }

    pub fn field(&self, name: &str) -> Option<&ContentPartFieldDefinition> {
        self.definition.field(name)
    }

    /// The owning item's version record
    pub fn record(&self) -> &RecordHandle {
        &self.record
    }
}
