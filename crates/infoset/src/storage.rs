//! Field storage: binding a part's field to a getter/setter pair

pub mod infoset;

pub use infoset::{InfosetFieldStorage, InfosetStorageProvider};

use std::fmt::Display;
use std::str::FromStr;

use crate::content::{ContentPart, ContentPartFieldDefinition};
use crate::error::{Error, ErrorKind, Result, Span};

/// Binds fields of content parts to storage
pub trait FieldStorageProvider {
    /// Name the provider is registered under
    fn provider_name(&self) -> &'static str;

    /// Bind `field` of `part` to an accessor pair
    fn bind_storage(
        &self,
        part: &ContentPart,
        field: &ContentPartFieldDefinition,
    ) -> Result<Box<dyn FieldStorage>>;
}

/// Getter/setter pair for one bound field.
///
/// A `None` or empty name addresses the field's own value. Any other name
/// addresses a named value stored alongside it.
pub trait FieldStorage: Send + Sync {
    /// Read a value; unset values are `Ok(None)`
    fn get(&self, name: Option<&str>) -> Result<Option<String>>;

    /// Write a value; `None` clears it
    fn set(&self, name: Option<&str>, value: Option<&str>) -> Result<()>;
}

/// Typed access on top of [`FieldStorage`]
pub trait FieldStorageExt: FieldStorage {
    /// Read a value and parse it as `T`
    fn get_as<T: FromStr>(&self, name: Option<&str>) -> Result<Option<T>> {
        match self.get(name)? {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                Error::new(ErrorKind::InvalidValue { value: raw }, Span::empty())
            }),
        }
    }

    /// Write the display form of `value`
    fn set_as<T: Display>(&self, name: Option<&str>, value: Option<T>) -> Result<()> {
        let value = value.map(|value| value.to_string());
        self.set(name, value.as_deref())
    }
}

impl<S: FieldStorage + ?Sized> FieldStorageExt for S {}

/// `None` and `""` both address the unnamed value
pub(crate) fn value_name(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}
