//! Response parsing: the raw document plus a nested mapping of the SOAP body.

use std::io::BufReader;

use serde_json::{Map, Value};
use xmltree::{Element, XMLNode};

use super::local_name;

#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,
}

/// A parsed SOAP response.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    /// The full envelope, for scanning embedded messages.
    pub document: Element,
    /// The `Body` contents as a nested mapping with `snake_case` keys.
    pub body: Value,
}

impl SoapResponse {
    pub fn from_xml(xml: &str) -> Result<Self, SoapParseError> {
        let document = Element::parse(BufReader::new(xml.as_bytes()))?;
        if document.name != "Envelope" {
            return Err(SoapParseError::MissingEnvelope);
        }
        let body_el = body_element(&document).ok_or(SoapParseError::MissingBody)?;
        let body = match element_to_value(body_el) {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(Self { document, body })
    }

    /// The `(code, message)` of a SOAP fault in the body, if there is one.
    ///
    /// Understands both SOAP 1.1 (`faultcode`/`faultstring`) and SOAP 1.2
    /// (`Code/Value`, `Reason/Text`) layouts.
    pub fn fault(&self) -> Option<(String, String)> {
        let fault = body_element(&self.document)?.get_child("Fault")?;
        let code = fault
            .get_child("faultcode")
            .or_else(|| fault.get_child("Code").and_then(|c| c.get_child("Value")))
            .and_then(|e| e.get_text())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        let message = fault
            .get_child("faultstring")
            .or_else(|| fault.get_child("Reason").and_then(|r| r.get_child("Text")))
            .and_then(|e| e.get_text())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        Some((code, message))
    }
}

fn body_element(document: &Element) -> Option<&Element> {
    document.get_child("Body")
}

/// Converts an element into a mapping.
///
/// Child elements become keys (repeated siblings collapse into an array),
/// attributes become `@name` keys, text-only elements become strings, and
/// empty or `nil` elements become `null`.
fn element_to_value(el: &Element) -> Value {
    let is_nil = el
        .attributes
        .iter()
        .any(|(k, v)| local_name(k) == "nil" && v == "true");
    if is_nil {
        return Value::Null;
    }

    let mut map = Map::new();
    let mut text = String::new();

    for (name, value) in &el.attributes {
        map.insert(
            format!("@{}", snake_case(local_name(name))),
            Value::String(value.clone()),
        );
    }

    for node in &el.children {
        match node {
            XMLNode::Element(child) => {
                let key = snake_case(&child.name);
                let value = element_to_value(child);
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
            XMLNode::Text(t) | XMLNode::CData(t) => text.push_str(t),
            _ => {}
        }
    }

    let text = text.trim();
    if map.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        }
    } else {
        if !text.is_empty() {
            map.insert("$text".to_string(), Value::String(text.to_string()));
        }
        Value::Object(map)
    }
}

/// `FindCompaniesResponse` -> `find_companies_response`, `HTMLReport` -> `html_report`.
pub(crate) fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}
