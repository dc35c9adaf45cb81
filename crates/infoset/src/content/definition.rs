//! Statically declared content type, part and field definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named value slot within a part
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentPartFieldDefinition {
    pub name: String,
}

impl ContentPartFieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named group of fields, in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentPartDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<ContentPartFieldDefinition>,
}

impl ContentPartDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field definition
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(ContentPartFieldDefinition::new(name));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[ContentPartFieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ContentPartFieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A content type and the parts welded onto its items
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentTypeDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parts: Vec<ContentPartDefinition>,
}

impl ContentTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: ContentPartDefinition) -> Self {
        self.parts.push(part);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parts(&self) -> &[ContentPartDefinition] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&ContentPartDefinition> {
        self.parts.iter().find(|part| part.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let part = ContentPartDefinition::new("Foo")
            .with_field("Bar")
            .with_field("Baz");

        let names: Vec<&str> = part.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Bar", "Baz"]);
        assert_eq!(part.field("Baz").map(|f| f.name()), Some("Baz"));
        assert!(part.field("Qux").is_none());
    }

    #[test]
    fn test_type_lookup() {
        let ty = ContentTypeDefinition::new("Page")
            .with_part(ContentPartDefinition::new("Foo").with_field("Bar"));
        assert_eq!(ty.part("Foo").map(|p| p.fields().len()), Some(1));
        assert!(ty.part("Body").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_definitions_from_toml() -> Result<(), toml::de::Error> {
        let ty: ContentTypeDefinition = toml::from_str(
            r#"
            name = "Page"

            [[parts]]
            name = "Foo"
            fields = [{ name = "Bar" }]

            [[parts]]
            name = "Empty"
            "#,
        )?;

        assert_eq!(ty.part("Foo").and_then(|p| p.field("Bar")).map(|f| f.name()), Some("Bar"));
        assert_eq!(ty.part("Empty").map(|p| p.fields().is_empty()), Some(true));
        Ok(())
    }
}
