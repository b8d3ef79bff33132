//! Shared XML writing helpers.

use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub type XmlWriter = Writer<Vec<u8>>;

/// Indented writer with the XML declaration already written.
pub fn new_document() -> io::Result<XmlWriter> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(xml)
}

/// Finishes a document into text with a trailing newline.
pub fn finish_document(xml: XmlWriter) -> String {
    let mut text = String::from_utf8_lossy(&xml.into_inner()).into_owned();
    text.push('\n');
    text
}

pub fn start_element(writer: &mut XmlWriter, name: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

/// Opens an element with attributes.
pub fn start_element_with(
    writer: &mut XmlWriter,
    name: &str,
    attributes: &[(&str, &str)],
) -> io::Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))
}

pub fn end_element(writer: &mut XmlWriter, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

pub fn empty_element(writer: &mut XmlWriter, name: &str) -> io::Result<()> {
    writer.write_event(Event::Empty(BytesStart::new(name)))
}

/// Write a simple text element.
pub fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Text element with attributes; self-closing when `text` is empty.
pub fn write_text_element_with(
    writer: &mut XmlWriter,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> io::Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    if text.is_empty() {
        return writer.write_event(Event::Empty(start));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Text element that is skipped entirely when `text` is blank.
pub fn write_optional_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    write_text_element(writer, name, text)
}

/// Text element that is always present, self-closing when `text` is blank.
pub fn write_required_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        empty_element(writer, name)
    } else {
        write_text_element(writer, name, text)
    }
}

/// Element whose content is written as literal blocks, unescaped.
///
/// A `]]>` inside the text is split across two consecutive blocks. Blank
/// text skips the element.
pub fn write_cdata_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for piece in cdata_pieces(text) {
        writer.write_event(Event::CData(BytesCData::new(piece)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Splits text so that no piece contains the `]]>` terminator.
pub fn cdata_pieces(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find("]]>") {
        pieces.push(&rest[..idx + 2]);
        rest = &rest[idx + 2..];
    }
    pieces.push(rest);
    pieces
}
