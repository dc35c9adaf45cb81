//! Document parser implementation

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::document::model::{Document, Element};
use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::Cursor;

/// Parser configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Document parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default limits
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
        }
    }

    /// Parse a complete document.
    ///
    /// Blank input means no data has been stored yet and yields the
    /// default `<Data/>` document.
    pub fn parse(&mut self) -> Result<Document> {
        let size = self.cursor.remaining().len();
        if self.config.max_size != 0 && size > self.config.max_size {
            return Err(Error::new(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                Span::empty(),
            ));
        }

        self.skip_misc()?;
        if self.cursor.is_eof() {
            return Ok(Document::default());
        }

        let root = self.parse_element(1)?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error_here("unexpected content after root element"));
        }

        Ok(Document { root })
    }

    /// Skip whitespace, comments, processing instructions and doctype
    /// declarations outside the root element
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
            } else if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<!") {
                self.cursor.advance_by(2);
                self.skip_until(b">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self, depth: u16) -> Result<Element> {
        if self.config.max_depth != 0 && depth > self.config.max_depth {
            return Err(Error::new(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                Span::empty(),
            ));
        }

        self.expect_byte(b'<')?;
        if self.cursor.current() == Some(b'/') {
            return Err(self.error_here("unexpected closing tag"));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                text: None,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut text = String::new();
        let mut cdata = false;
        let mut children = Vec::new();
        loop {
            if self.cursor.starts_with(b"</") {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here("mismatched closing tag"));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
                continue;
            }

            if self.cursor.starts_with(b"<![CDATA[") {
                self.cursor.advance_by(9);
                text.push_str(&self.take_until(b"]]>")?);
                cdata = true;
                continue;
            }

            if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                children.push(self.parse_element(depth.saturating_add(1))?);
                continue;
            }

            if self.cursor.is_eof() {
                return Err(self.error_here("unterminated element"));
            }

            text.push_str(&self.parse_text()?);
        }

        // Whitespace between child elements is layout unless it came from CDATA
        let text = if children.is_empty() || cdata || !text.trim().is_empty() {
            Some(text)
        } else {
            None
        };

        Ok(Element {
            name,
            text,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unexpected end of input")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here("duplicate attribute"));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_here("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = self.bytes_to_str(raw)?;
                return self.decode_entities(text);
            }
            if b == b'<' {
                return Err(self.error_here("'<' in attribute value"));
            }
            self.cursor.advance();
        }

        Err(self.error_here("unterminated attribute value"))
    }

    fn parse_text(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = self.bytes_to_str(raw)?;
        self.decode_entities(text)
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(first) if is_name_start(first) => self.cursor.advance(),
            _ => return Err(self.error_here("expected name")),
        }

        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        self.bytes_to_str(raw).map(str::to_string)
    }

    /// Consume raw text up to `pattern`, consuming the pattern too
    fn take_until(&mut self, pattern: &[u8]) -> Result<String> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(pattern.len());
                return self.bytes_to_str(raw).map(str::to_string);
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        self.take_until(pattern).map(|_| ())
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.error_here("unexpected token"))
        }
    }

    fn bytes_to_str(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.error_here("invalid utf-8"))
    }

    fn decode_entities(&self, input: &str) -> Result<String> {
        if !input.contains('&') {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(amp) = rest.find('&') {
            let (before, after) = rest.split_at(amp);
            result.push_str(before);

            let Some(end) = after.find(';') else {
                return Err(self.error_here("unterminated entity reference"));
            };
            let entity = after.get(1..end).unwrap_or_default();
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric_entity(entity),
            };

            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error_here("invalid entity reference")),
            }
            rest = after.get(end + 1..).unwrap_or_default();
        }
        result.push_str(rest);

        Ok(result)
    }

    fn error_here(&self, message: &str) -> Error {
        Error::malformed(self.cursor.position(), message)
    }
}

/// Name bytes; anything outside ASCII is accepted and checked as UTF-8
fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || !b.is_ascii()
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
