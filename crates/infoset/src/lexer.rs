//! Lexer support for the document parser

pub mod cursor;

pub use cursor::Cursor;
