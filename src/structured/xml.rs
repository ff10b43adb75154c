use super::should_write;
use crate::error::{PipekitError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::Value;
use std::fs;
use std::path::Path;

// XML has no natural serde data model, so this module converts to and
// from serde_json::Value trees: maps nest as child elements, sequences
// emit <item> children, scalars become element text. On the way back in,
// leaves are always strings.

fn xml_err(err: impl std::fmt::Display) -> PipekitError {
    PipekitError::Xml(err.to_string())
}

/// Export a value tree to an XML file under the given root tag.
///
/// Returns `Ok(false)` without touching the file when it already exists
/// and `overwrite` is off.
pub fn write_xml<P: AsRef<Path>>(
    path: P,
    data: &Value,
    overwrite: bool,
    root_tag: &str,
) -> Result<bool> {
    let path = path.as_ref();
    if !should_write(path, overwrite) {
        return Ok(false);
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    write_element(&mut writer, root_tag, data)?;

    fs::write(path, writer.into_inner()).map_err(PipekitError::Io)?;
    Ok(true)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(writer, key, child)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(writer, "item", item)?;
            }
        }
        scalar => {
            let text = scalar_text(scalar);
            if !text.is_empty() {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(xml_err)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Import an XML file as a value tree, or `None` if the file does not
/// exist. The root tag itself is dropped; its content is returned.
///
/// A childless element becomes a string, children sharing one tag become
/// an array, and duplicate keys in mixed content promote to arrays.
pub fn read_xml<P: AsRef<Path>>(path: P) -> Result<Option<Value>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(PipekitError::Io)?;
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(_) => return parse_element(&mut reader).map(Some),
            Event::Empty(_) => return Ok(Some(Value::String(String::new()))),
            Event::Eof => return Err(xml_err("document has no root element")),
            _ => {}
        }
    }
}

fn parse_element(reader: &mut Reader<&[u8]>) -> Result<Value> {
    let mut text = String::new();
    let mut children: Vec<(String, Value)> = Vec::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let value = parse_element(reader)?;
                children.push((tag, value));
            }
            Event::Empty(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                children.push((tag, Value::String(String::new())));
            }
            Event::Text(t) => text.push_str(&t.unescape().map_err(xml_err)?),
            Event::End(_) => break,
            Event::Eof => return Err(xml_err("unexpected end of document")),
            _ => {}
        }
    }

    if children.is_empty() {
        return Ok(Value::String(text));
    }

    // Children all sharing one tag read as a sequence.
    let first_tag = children[0].0.clone();
    if children.iter().all(|(tag, _)| *tag == first_tag) {
        return Ok(Value::Array(
            children.into_iter().map(|(_, value)| value).collect(),
        ));
    }

    // Mixed tags read as a map; duplicate tags promote to arrays.
    let mut map = serde_json::Map::new();
    for (tag, value) in children {
        match map.remove(&tag) {
            Some(Value::Array(mut existing)) => {
                existing.push(value);
                map.insert(tag, Value::Array(existing));
            }
            Some(prior) => {
                map.insert(tag, Value::Array(vec![prior, value]));
            }
            None => {
                map.insert(tag, value);
            }
        }
    }
    Ok(Value::Object(map))
}
