//! A small owned XML tree for services queried with the XML response format.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{MapsError, Result};

/// A parsed XML response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

/// One element of an XML response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlDocument {
    /// Parse a document, rejecting anything that is not a single well-formed root element
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    if root.is_some() {
                        return Err(malformed("content after the root element"));
                    }
                    stack.push(XmlElement::from_start(&start)?);
                }
                Ok(Event::Empty(start)) => {
                    let element = XmlElement::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text.unescape().map_err(|e| malformed(e.to_string()))?;
                    push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(data)) => {
                    let data = data.into_inner();
                    push_text(&mut stack, &String::from_utf8_lossy(&data))?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(malformed(e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(malformed("unclosed element at end of input"));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| malformed("no root element"))
    }

    /// The document element
    #[must_use]
    pub const fn root(&self) -> &XmlElement {
        &self.root
    }
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| malformed(e.to_string()))?;
            let value = attribute
                .unescape_value()
                .map_err(|e| malformed(e.to_string()))?;
            attributes.push((
                String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
                value.into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    /// Tag name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text content directly inside this element
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an attribute
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements
    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First direct child with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First element with the given name, searching depth-first from this element
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Every element with the given name in document order, this element included
    #[must_use]
    pub fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("multiple root elements")),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    let current = stack
        .last_mut()
        .ok_or_else(|| malformed("text outside of the root element"))?;
    current.text.push_str(text);
    Ok(())
}

fn malformed(detail: impl Into<String>) -> MapsError {
    MapsError::MalformedResponse {
        format: "XML",
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <DistanceMatrixResponse>
              <status>OK</status>
              <origin_address>Brussels, Belgium</origin_address>
              <row><element><status>OK</status><duration unit="s"><value>3600</value></duration></element></row>
            </DistanceMatrixResponse>"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name(), "DistanceMatrixResponse");
        assert_eq!(root.child("status").unwrap().text(), "OK");
        assert_eq!(root.child("origin_address").unwrap().text(), "Brussels, Belgium");
        assert_eq!(root.find("duration").unwrap().attribute("unit"), Some("s"));
        assert_eq!(root.find_all("status").len(), 2);
    }

    #[test]
    fn test_unescapes_entities() {
        let doc = XmlDocument::parse("<a><b>Fish &amp; Chips</b></a>").unwrap();
        assert_eq!(doc.root().find("b").unwrap().text(), "Fish & Chips");
    }

    #[test]
    fn test_rejects_plain_text() {
        let err = XmlDocument::parse("random response").unwrap_err();
        assert!(matches!(err, MapsError::MalformedResponse { format: "XML", .. }));
    }

    #[test]
    fn test_rejects_unclosed_and_mismatched_tags() {
        assert!(XmlDocument::parse("<a><b></a>").is_err());
        assert!(XmlDocument::parse("<a><b>").is_err());
        assert!(XmlDocument::parse("").is_err());
    }
}
