//! Version record holding the serialized infoset

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::document::{Config, Document, ROOT_ELEMENT};
use crate::error::{Error, Pos, Result};

/// Shared handle to a version record.
///
/// The content item and each of its parts hold a clone of the same handle.
pub type RecordHandle = Arc<RwLock<VersionRecord>>;

/// Version record of a content item.
///
/// `data` is the source of truth. The parsed infoset is a cache of it. The
/// cache is filled on first access and dropped whenever `data` is replaced.
/// Data whose root element is not `Data` is malformed.
#[derive(Clone, Debug, Default)]
pub struct VersionRecord {
    data: String,
    infoset: Option<Document>,
}

impl VersionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            infoset: None,
        }
    }

    /// Wrap the record in a shareable handle
    pub fn into_handle(self) -> RecordHandle {
        Arc::new(RwLock::new(self))
    }

    /// The serialized infoset
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Overwrite the serialized infoset; the next access re-parses it
    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
        if self.infoset.take().is_some() {
            debug!("record data overwritten, dropping parsed infoset");
        }
    }

    /// Whether `data` has been parsed since it was last replaced
    pub fn is_parsed(&self) -> bool {
        self.infoset.is_some()
    }

    /// The parsed infoset, parsing `data` if needed
    pub fn infoset(&mut self, config: Config) -> Result<&Document> {
        self.parsed(config).map(|document| &*document)
    }

    /// Apply `update` to the infoset and write the result back into `data`
    pub fn update_infoset<T>(
        &mut self,
        config: Config,
        update: impl FnOnce(&mut Document) -> T,
    ) -> Result<T> {
        let document = self.parsed(config)?;
        let output = update(document);
        let data = document.to_xml();
        self.data = data;
        Ok(output)
    }

    fn parsed(&mut self, config: Config) -> Result<&mut Document> {
        let document = match self.infoset.take() {
            Some(document) => document,
            None => {
                debug!(len = self.data.len(), "parsing record infoset");
                let document = Document::parse_with_config(&self.data, config)?;
                if document.root.name() != ROOT_ELEMENT {
                    return Err(Error::malformed(Pos::default(), "root element must be Data"));
                }
                document
            }
        };
        Ok(self.infoset.insert(document))
    }
}
