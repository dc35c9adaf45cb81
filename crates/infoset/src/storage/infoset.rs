//! Field storage backed by the record infoset.
//!
//! A field `Bar` of part `Foo` lives at `Data/Foo/Bar`. The unnamed value is
//! the element's text and named values are its attributes:
//!
//! ```text
//! <Data><Foo><Bar alpha="two">one</Bar></Foo></Data>
//! ```
//!
//! Bindings hold the record handle and the element path, never a node. Each
//! call goes through the record, so an overwrite of the record's `Data` is
//! seen by the next call.

use tracing::{instrument, trace};

use crate::content::{ContentPart, ContentPartFieldDefinition, RecordHandle};
use crate::document::{is_valid_name, Config};
use crate::error::{Error, Result};
use crate::storage::{value_name, FieldStorage, FieldStorageProvider};

/// Provider binding fields to the infoset of their item's version record
#[derive(Clone, Copy, Debug, Default)]
pub struct InfosetStorageProvider {
    config: Config,
}

impl InfosetStorageProvider {
    pub const PROVIDER_NAME: &'static str = "Infoset";

    pub fn new() -> Self {
        Self::default()
    }

    /// Provider parsing record data with custom limits
    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> Config {
        self.config
    }

    /// Bind `field` of `part`, returning the concrete storage
    #[instrument(level = "debug", skip_all, fields(part = %part.name(), field = %field.name()))]
    pub fn bind(
        &self,
        part: &ContentPart,
        field: &ContentPartFieldDefinition,
    ) -> Result<InfosetFieldStorage> {
        for name in [part.name(), field.name()] {
            if !is_valid_name(name) {
                return Err(Error::invalid_name(name));
            }
        }

        Ok(InfosetFieldStorage {
            record: part.record().clone(),
            part_name: part.name().to_string(),
            field_name: field.name().to_string(),
            config: self.config,
        })
    }
}

impl FieldStorageProvider for InfosetStorageProvider {
    fn provider_name(&self) -> &'static str {
        Self::PROVIDER_NAME
    }

    fn bind_storage(
        &self,
        part: &ContentPart,
        field: &ContentPartFieldDefinition,
    ) -> Result<Box<dyn FieldStorage>> {
        Ok(Box::new(self.bind(part, field)?))
    }
}

/// Accessor pair over `Data/<part>/<field>`
#[derive(Clone, Debug)]
pub struct InfosetFieldStorage {
    record: RecordHandle,
    part_name: String,
    field_name: String,
    config: Config,
}

impl InfosetFieldStorage {
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Element path below the root
    pub fn path(&self) -> [&str; 2] {
        [&self.part_name, &self.field_name]
    }

    pub fn record(&self) -> &RecordHandle {
        &self.record
    }
}

impl FieldStorage for InfosetFieldStorage {
    fn get(&self, name: Option<&str>) -> Result<Option<String>> {
        let mut record = self.record.write();
        let Some(element) = record.infoset(self.config)?.find(&self.path()) else {
            return Ok(None);
        };

        let value = match value_name(name) {
            None => element.text(),
            Some(name) => element.attribute(name),
        };
        Ok(value.map(str::to_string))
    }

    fn set(&self, name: Option<&str>, value: Option<&str>) -> Result<()> {
        let name = value_name(name);
        if let Some(name) = name.filter(|name| !is_valid_name(name)) {
            return Err(Error::invalid_name(name));
        }

        let mut record = self.record.write();
        record.update_infoset(self.config, |document| {
            let element = document.find_or_insert(&self.path());
            match (name, value) {
                (None, value) => element.set_text(value.map(str::to_string)),
                (Some(name), Some(value)) => {
                    element.set_attribute(name, value);
                }
                (Some(name), None) => {
                    element.remove_attribute(name);
                }
            }
        })?;

        trace!(
            part = %self.part_name,
            field = %self.field_name,
            name = name.unwrap_or_default(),
            len = record.data().len(),
            "field written through to record"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, ContentPartDefinition, ContentTypeDefinition};
    use crate::error::ErrorKind;

    fn item() -> ContentItem {
        let ty = ContentTypeDefinition::new("Page")
            .with_part(ContentPartDefinition::new("Foo").with_field("Bar"));
        ContentItem::new(1, &ty)
    }

    fn bind(item: &ContentItem) -> Result<InfosetFieldStorage> {
        let part = item.part("Foo").ok_or_else(|| Error::invalid_name("Foo"))?;
        let field = part.field("Bar").ok_or_else(|| Error::invalid_name("Bar"))?;
        InfosetStorageProvider::new().bind(part, field)
    }

    #[test]
    fn test_path() -> Result<()> {
        let storage = bind(&item())?;
        assert_eq!(storage.path(), ["Foo", "Bar"]);
        assert_eq!(storage.part_name(), "Foo");
        assert_eq!(storage.field_name(), "Bar");
        Ok(())
    }

    #[test]
    fn test_get_does_not_materialize() -> Result<()> {
        let item = item();
        let storage = bind(&item)?;

        assert_eq!(storage.get(None)?, None);
        assert_eq!(storage.get(Some("alpha"))?, None);
        assert_eq!(item.data(), "");
        let untouched = storage
            .record()
            .write()
            .infoset(Config::default())?
            .root
            .children
            .is_empty();
        assert!(untouched);
        Ok(())
    }

    #[test]
    fn test_remove_attribute_and_clear_text() -> Result<()> {
        let item = item();
        let storage = bind(&item)?;

        storage.set(None, Some("one"))?;
        storage.set(Some("alpha"), Some("two"))?;
        storage.set(Some("alpha"), None)?;
        assert_eq!(item.data(), "<Data><Foo><Bar>one</Bar></Foo></Data>");

        storage.set(Some(""), None)?;
        assert_eq!(item.data(), "<Data><Foo><Bar/></Foo></Data>");
        assert_eq!(storage.get(None)?, None);
        Ok(())
    }

    #[test]
    fn test_invalid_attribute_name_on_set() -> Result<()> {
        let item = item();
        let storage = bind(&item)?;

        let err = storage.set(Some("This is a test"), Some("x")).err();
        assert_eq!(
            err.map(|e| e.kind().clone()),
            Some(ErrorKind::InvalidName {
                name: "This is a test".to_string()
            })
        );
        assert_eq!(storage.get(Some("This is a test"))?, None);
        assert_eq!(item.data(), "");
        Ok(())
    }

    #[test]
    fn test_invalid_part_name_on_bind() {
        let ty = ContentTypeDefinition::new("Page")
            .with_part(ContentPartDefinition::new("Bad Part").with_field("Bar"));
        let item = ContentItem::new(1, &ty);
        let part = item.part("Bad Part");
        let result = part
            .and_then(|p| p.field("Bar").map(|f| (p, f)))
            .map(|(p, f)| InfosetStorageProvider::new().bind(p, f));

        assert!(matches!(result, Some(Err(ref e)) if matches!(e.kind(), ErrorKind::InvalidName { .. })));
    }

    #[test]
    fn test_provider_name() {
        let provider = InfosetStorageProvider::new();
        assert_eq!(provider.provider_name(), "Infoset");
        assert_eq!(provider.config(), Config::default());
    }
}
