//! Lenient XML reading.
//!
//! Forms arrive from a backend and are sometimes truncated or slightly
//! ill-formed. The reader keeps whatever it managed to read: when quick-xml
//! reports an error, the error is logged and every element still open is
//! closed onto its parent, yielding a best-effort tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use giswater_forms_core::{FormError, FormResult};

/// Represents an XML element with a name, attributes, and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Element name (tag name, namespace prefix stripped)
    name: String,
    /// Element attributes in source order
    attributes: Vec<(String, String)>,
    /// Child nodes (elements and text)
    children: Vec<XmlNode>,
}

/// Represents a node in an XML element's content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// An element node
    Element(XmlElement),
    /// A text or CDATA node
    Text(String),
}

impl XmlElement {
    /// Creates a new element with the specified name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let local = match name.find(':') {
            Some(pos) => name[pos + 1..].to_string(),
            None => name,
        };
        XmlElement {
            name: local,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute value, replacing an existing one with the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Returns an iterator over all attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if the element has at least one attribute.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns all child nodes.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Returns an iterator over child elements only.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Gets the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Adds a child element.
    pub fn add_child_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Adds a text node.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Returns the text content of this element (concatenated from all text nodes).
    pub fn text(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            if let XmlNode::Text(t) = child {
                result.push_str(t);
            }
        }
        result
    }
}

/// The outcome of a lenient parse.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientParse {
    /// The root element (possibly reconstructed from a truncated document).
    pub root: XmlElement,
    /// The reader error that was recovered from, if any.
    pub recovered: Option<FormError>,
}

/// Parses an XML string, recovering from reader errors where possible.
///
/// Fails only when not even a root element could be read.
pub fn parse_xml(s: &str) -> FormResult<LenientParse> {
    let mut reader = Reader::from_str(s);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut element_stack: Vec<XmlElement> = Vec::new();
    let mut recovered = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                element_stack.push(element_from_start(&start));
            }
            Ok(Event::End(_)) => {
                if let Some(element) = element_stack.pop() {
                    attach(element, &mut element_stack, &mut root);
                }
            }
            Ok(Event::Empty(empty)) => {
                let element = element_from_start(&empty);
                attach(element, &mut element_stack, &mut root);
            }
            Ok(Event::Text(text)) => {
                let content = match text.unescape() {
                    Ok(content) => content.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                if !content.is_empty() {
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_text(content);
                    }
                }
            }
            Ok(Event::CData(cdata)) => {
                let content = String::from_utf8_lossy(&cdata).into_owned();
                if let Some(parent) = element_stack.last_mut() {
                    parent.add_text(content);
                }
            }
            // Declarations, comments, processing instructions and DOCTYPE
            // carry nothing a form needs.
            Ok(_) => {}
            Err(e) => {
                let position = reader.buffer_position();
                tracing::warn!(
                    target: "giswater_forms::parse",
                    position,
                    error = %e,
                    "malformed form XML, keeping the elements read so far"
                );
                recovered = Some(FormError::xml(position, e.to_string()));
                break;
            }
        }
    }

    // Close elements left open by a truncated or broken document.
    if !element_stack.is_empty() && recovered.is_none() {
        let position = reader.buffer_position();
        let open = element_stack
            .last()
            .map(|el| el.name().to_string())
            .unwrap_or_default();
        tracing::warn!(
            target: "giswater_forms::parse",
            position,
            element = %open,
            "form XML ended with unclosed elements"
        );
        recovered = Some(FormError::xml(
            position,
            format!("unclosed element <{open}>"),
        ));
    }
    while let Some(element) = element_stack.pop() {
        attach(element, &mut element_stack, &mut root);
    }

    match root {
        Some(root) => Ok(LenientParse { root, recovered }),
        None => Err(recovered.unwrap_or_else(|| {
            FormError::xml(reader.buffer_position(), "XML document has no root element")
        })),
    }
}

/// Builds an element (name + attributes) from a start tag.
fn element_from_start(start: &BytesStart<'_>) -> XmlElement {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        element.set_attribute(key, value);
    }
    element
}

/// Attaches a finished element to its parent, or makes it the root.
fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    if let Some(parent) = stack.last_mut() {
        parent.add_child_element(element);
    } else if root.is_none() {
        *root = Some(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <ui version="4.0">
                <class>Form</class>
                <widget class="QWidget" name="Form"/>
            </ui>
        "#;

        let parsed = parse_xml(xml).unwrap();
        assert!(parsed.recovered.is_none());
        assert_eq!(parsed.root.name(), "ui");
        assert_eq!(parsed.root.attribute("version"), Some("4.0"));
        assert_eq!(parsed.root.child("class").unwrap().text(), "Form");
        assert_eq!(
            parsed.root.child("widget").unwrap().attribute("class"),
            Some("QWidget")
        );
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<string name="a &amp; b">x &lt; y</string>"#;
        let parsed = parse_xml(xml).unwrap();
        assert_eq!(parsed.root.attribute("name"), Some("a & b"));
        assert_eq!(parsed.root.text(), "x < y");
    }

    #[test]
    fn test_cdata_is_text() {
        let parsed = parse_xml("<string><![CDATA[<b>bold</b>]]></string>").unwrap();
        assert_eq!(parsed.root.text(), "<b>bold</b>");
    }

    #[test]
    fn test_truncated_document_recovers() {
        let xml = r#"<ui><widget class="QWidget"><layout class="QGridLayout">"#;
        let parsed = parse_xml(xml).unwrap();
        assert!(parsed.recovered.is_some());
        let widget = parsed.root.child("widget").unwrap();
        assert!(widget.child("layout").is_some());
    }

    #[test]
    fn test_mismatched_end_tag_recovers() {
        let xml = r#"<ui><widget class="QLabel" name="lbl"></layout></ui>"#;
        let parsed = parse_xml(xml).unwrap();
        assert!(parsed.recovered.is_some());
        assert_eq!(
            parsed.root.child("widget").unwrap().attribute("name"),
            Some("lbl")
        );
    }

    #[test]
    fn test_no_root_is_error() {
        assert!(parse_xml("").is_err());
        assert!(parse_xml("   ").is_err());
    }

    #[test]
    fn test_namespace_prefix_is_stripped() {
        let parsed = parse_xml(r#"<q:ui xmlns:q="urn:x"/>"#).unwrap();
        assert_eq!(parsed.root.name(), "ui");
    }
}
