//! Canonical serializer for documents

use crate::document::model::{Document, Element};

/// Serialize a document into its compact canonical form.
///
/// No declaration or indentation is written. Elements without text or
/// children are self-closing, and text is written before child elements.
/// Blank text on an element with children is wrapped in CDATA so that it
/// parses back as text rather than layout.
pub fn serialize(doc: &Document) -> String {
    let mut output = String::new();
    write_element(&doc.root, &mut output);
    output
}

fn write_element(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.name);

    for (key, value) in &element.attributes {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        escape_attribute(value, output);
        output.push('"');
    }

    if element.text.is_none() && element.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    match &element.text {
        // Blank text beside children would read back as layout
        Some(text) if !element.children.is_empty() && text.trim().is_empty() => {
            output.push_str("<![CDATA[");
            output.push_str(text);
            output.push_str("]]>");
        }
        Some(text) => escape_text(text, output),
        None => {}
    }
    for child in &element.children {
        write_element(child, output);
    }
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

fn escape_text(input: &str, output: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
}

fn escape_attribute(input: &str, output: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\t' => output.push_str("&#x9;"),
            '\n' => output.push_str("&#xA;"),
            '\r' => output.push_str("&#xD;"),
            _ => output.push(ch),
        }
    }
}
