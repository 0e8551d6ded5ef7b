//! Request envelope serialization.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::request::{RequestParams, RequestValue};

pub const SOAP_ENV_PREFIX: &str = "soapenv";
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Serializes a complete SOAP 1.1 request.
///
/// `operation_element` is the qualified name of the body's single child
/// (e.g. `oper:FindCompanies`); every `(prefix, uri)` in `namespaces` is
/// declared on the envelope.
pub fn build_envelope(
    operation_element: &str,
    params: &RequestParams,
    namespaces: &[(String, String)],
) -> Result<Vec<u8>, xmltree::Error> {
    let mut operation = Element::new(operation_element);
    append_params(&mut operation, params);

    let mut body = Element::new(&format!("{SOAP_ENV_PREFIX}:Body"));
    body.children.push(XMLNode::Element(operation));

    let header = Element::new(&format!("{SOAP_ENV_PREFIX}:Header"));

    let mut envelope = Element::new(&format!("{SOAP_ENV_PREFIX}:Envelope"));
    envelope
        .attributes
        .insert(format!("xmlns:{SOAP_ENV_PREFIX}"), SOAP_ENV_NS.to_string());
    envelope
        .attributes
        .insert("xmlns:xsi".to_string(), XSI_NS.to_string());
    for (prefix, uri) in namespaces {
        envelope
            .attributes
            .insert(format!("xmlns:{prefix}"), uri.clone());
    }
    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = EmitterConfig::new().write_document_declaration(true);
    envelope.write_with_config(&mut buf, config)?;
    Ok(buf)
}

fn append_params(parent: &mut Element, params: &RequestParams) {
    for (key, value) in params.iter() {
        let mut child = Element::new(key);
        match value {
            RequestValue::Text(text) => child.children.push(XMLNode::Text(text.clone())),
            RequestValue::Nil => {
                child
                    .attributes
                    .insert("xsi:nil".to_string(), "true".to_string());
            }
            RequestValue::Nested(nested) => append_params(&mut child, nested),
        }
        parent.children.push(XMLNode::Element(child));
    }
}
