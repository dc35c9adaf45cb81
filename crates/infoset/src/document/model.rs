//! Document data model

use std::fmt;

use indexmap::IndexMap;

use crate::document::parser::{Config, Parser};
use crate::document::writer;
use crate::error::Result;

/// Name of the root element every infoset is stored under
pub const ROOT_ELEMENT: &str = "Data";

/// A parsed infoset document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Default for Document {
    /// An empty `<Data/>` document
    fn default() -> Self {
        Self {
            root: Element::new(ROOT_ELEMENT),
        }
    }
}

impl Document {
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse a document with the default limits.
    ///
    /// Empty or whitespace-only input yields [`Document::default`].
    pub fn parse(text: &str) -> Result<Self> {
        Parser::new(text.as_bytes()).parse()
    }

    /// Parse a document with custom limits
    pub fn parse_with_config(text: &str, config: Config) -> Result<Self> {
        Parser::with_config(text.as_bytes(), config).parse()
    }

    /// Serialize to the canonical compact form
    pub fn to_xml(&self) -> String {
        writer::serialize(self)
    }

    /// Follow a path of child names from the root
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        self.root.find(path)
    }

    /// Follow a path of child names from the root, creating missing elements
    pub fn find_or_insert(&mut self, path: &[&str]) -> &mut Element {
        self.root.find_or_insert(path)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Document element.
///
/// Holds an optional text value and ordered attributes. Child elements keep
/// their insertion order, and so do attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, returning the previous value.
    ///
    /// Overwriting keeps the attribute at its original position.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// First child with the given name, appending an empty one if missing
    #[allow(clippy::indexing_slicing)]
    pub fn child_or_insert(&mut self, name: &str) -> &mut Self {
        let index = match self.children.iter().position(|child| child.name == name) {
            Some(index) => index,
            None => {
                self.children.push(Self::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Follow a path of child names; an empty path is `self`
    pub fn find(&self, path: &[&str]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    pub fn find_or_insert(&mut self, path: &[&str]) -> &mut Self {
        path.iter()
            .fold(self, |element, name| element.child_or_insert(name))
    }

    /// True when the element has no text, attributes or children
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.attributes.is_empty() && self.children.is_empty()
    }
}

/// Check that `name` can be written as an element or attribute name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == ':' || (!ch.is_ascii() && ch.is_alphabetic())
}

fn is_name_char(ch: char) -> bool {
    is_name_start_char(ch)
        || ch.is_ascii_digit()
        || matches!(ch, '-' | '.')
        || (!ch.is_ascii() && ch.is_alphanumeric())
}
