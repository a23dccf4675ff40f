//! Recursive XML to JSON folding.
//!
//! # Folding rules
//! - A text-only element (no attributes, no children) folds to its
//!   trimmed text as a plain string
//! - An element name repeating under one parent folds to an array in
//!   document order; a single occurrence folds to a scalar or object,
//!   never a one-element array
//! - Attributes fold under a `$` member; text content of a mixed
//!   element folds under `_`
//! - Empty input folds to null
//!
//! The single-vs-sequence asymmetry is inherited from the upstream
//! format and must be preserved for caller compatibility.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};

/// Translate upstream XML text into a JSON value.
///
/// The result is keyed by the document's root element name, the way
/// callers of the previous deployment already consume it.
pub fn to_json(xml: &str) -> GatewayResult<Value> {
    if xml.trim().is_empty() {
        return Ok(Value::Null);
    }

    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(translation_error)? {
            Event::Start(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                let value = fold_element(&mut reader, attrs)?;
                let mut root = Map::new();
                root.insert(name, value);
                return Ok(Value::Object(root));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                let mut root = Map::new();
                root.insert(name, empty_element(attrs));
                return Ok(Value::Object(root));
            }
            Event::Eof => return Ok(Value::Null),
            // Prolog, comments and stray whitespace before the root.
            _ => {}
        }
    }
}

/// Fold one element's content, starting just after its opening tag.
fn fold_element(reader: &mut Reader<&[u8]>, attrs: Map<String, Value>) -> GatewayResult<Value> {
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(translation_error)? {
            Event::Start(start) => {
                let name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                let value = fold_element(reader, child_attrs)?;
                insert_folded(&mut children, name, value);
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                insert_folded(&mut children, name, empty_element(child_attrs));
            }
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(translation_error)?;
                text.push_str(unescaped.trim());
            }
            Event::CData(t) => {
                text.push_str(String::from_utf8_lossy(&t.into_inner()).trim());
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(GatewayError::Translation(
                    "unexpected end of document".to_string(),
                ));
            }
            _ => {}
        }
    }

    if attrs.is_empty() && children.is_empty() {
        return Ok(Value::String(text));
    }

    let mut object = Map::new();
    if !attrs.is_empty() {
        object.insert("$".to_string(), Value::Object(attrs));
    }
    object.extend(children);
    if !text.is_empty() {
        object.insert("_".to_string(), Value::String(text));
    }
    Ok(Value::Object(object))
}

/// Insert a folded child: a first occurrence stays scalar, a repeat
/// turns the slot into an array and appends in document order.
fn insert_folded(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Fold a self-closing element: empty string without attributes, an
/// attribute-only object otherwise.
fn empty_element(attrs: Map<String, Value>) -> Value {
    if attrs.is_empty() {
        Value::String(String::new())
    } else {
        let mut object = Map::new();
        object.insert("$".to_string(), Value::Object(attrs));
        Value::Object(object)
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn read_attributes(start: &BytesStart<'_>) -> GatewayResult<Map<String, Value>> {
    let mut attrs = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(translation_error)?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(translation_error)?;
        attrs.insert(key, Value::String(value.into_owned()));
    }
    Ok(attrs)
}

fn translation_error(e: impl std::fmt::Display) -> GatewayError {
    GatewayError::Translation(e.to_string())
}
