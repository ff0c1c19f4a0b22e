// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A minimal XML tree for SOAP payloads.
//!
//! The Ads payloads are small and element-centric, so the transport works on
//! an owned tree rather than streaming events. Element and attribute names
//! are matched by local name: the services vary their namespace prefixes
//! between versions, and the payload grammar never reuses a local name with
//! two meanings inside one parent.

use google_ads_gax::error::Error;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

/// One XML element: a name, attributes, text, and child elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute; returns `self` for chaining.
    pub fn attr<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Sets the text content; returns `self` for chaining.
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a child element; returns `self` for chaining.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a child holding only text, e.g. `<id>123</id>`.
    pub fn leaf<N, S>(self, name: N, text: S) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        self.child(Element::new(name).text(text))
    }

    /// Adds every element of an iterator as a child.
    pub fn children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// The local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The concatenated text content of the element itself.
    pub fn get_text(&self) -> &str {
        &self.text
    }

    /// The value of an attribute, matched by local name.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local_name(k) == key)
            .map(|(_, v)| v.as_str())
    }

    /// The first child with the given local name.
    pub fn get_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The first child with the given local name, or a deserialization error
    /// naming the missing element.
    pub fn require_child(&self, name: &str) -> Result<&Element, Error> {
        self.get_child(name)
            .ok_or_else(|| Error::deser(format!("missing element {name} under {}", self.name)))
    }

    /// Every child with the given local name, in document order.
    pub fn get_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All children, in document order.
    pub fn all_children(&self) -> &[Element] {
        &self.children
    }

    /// Every descendant with the given local name, in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// The text of a child element, or an error naming the missing element.
    pub fn require_text(&self, name: &str) -> Result<&str, Error> {
        Ok(self.require_child(name)?.get_text())
    }

    /// The text of a child element, or `""` when the child is absent.
    pub fn child_text(&self, name: &str) -> &str {
        self.get_child(name).map_or("", Element::get_text)
    }

    /// Parses a document into its root element.
    ///
    /// Namespace prefixes are stripped from element names; comments and
    /// processing instructions are ignored; CDATA is folded into text.
    pub fn parse(input: &str) -> Result<Element, Error> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        loop {
            match reader.read_event().map_err(Error::deser)? {
                Event::Start(start) => stack.push(element_from(&start)?),
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape().map_err(Error::deser)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = data.into_inner();
                        let text = std::str::from_utf8(&raw).map_err(Error::deser)?;
                        current.text.push_str(text);
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::deser("unbalanced closing tag"))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Eof => {
                    return Err(Error::deser("unexpected end of document"));
                }
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
    }

    /// Renders the element and its subtree as XML.
    ///
    /// Attribute names are written as given, so callers can emit prefixed
    /// attributes like `xsi:type` or an `xmlns` default namespace.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.text.is_empty() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&escape(self.text.as_str()));
        for child in &self.children {
            child.render_into(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, Error> {
    let name = std::str::from_utf8(start.name().local_name().as_ref())
        .map_err(Error::deser)?
        .to_string();
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(Error::deser)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(Error::deser)?
            .to_string();
        let value = attribute.unescape_value().map_err(Error::deser)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    type Result = anyhow::Result<()>;

    #[test]
    fn parse_nested_document() -> Result {
        let root = Element::parse(
            r#"<?xml version="1.0"?>
            <ns:rval xmlns:ns="https://example.com/v1">
              <ns:totalNumEntries>2</ns:totalNumEntries>
              <ns:entries><ns:id>100</ns:id></ns:entries>
              <ns:entries><ns:id>200</ns:id></ns:entries>
            </ns:rval>"#,
        )?;
        assert_eq!(root.name(), "rval");
        assert_eq!(root.child_text("totalNumEntries"), "2");
        let ids: Vec<&str> = root
            .get_children("entries")
            .map(|e| e.child_text("id"))
            .collect();
        assert_eq!(ids, ["100", "200"]);
        Ok(())
    }

    #[test]
    fn attributes_match_by_local_name() -> Result {
        let root = Element::parse(
            r#"<errors xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                       xsi:type="CriterionError"/>"#,
        )?;
        assert_eq!(root.get_attr("type"), Some("CriterionError"));
        assert_eq!(root.get_attr("absent"), None);
        Ok(())
    }

    #[test]
    fn text_entities_unescaped() -> Result {
        let root = Element::parse("<name>chocolate &amp; co &lt;3</name>")?;
        assert_eq!(root.get_text(), "chocolate & co <3");
        Ok(())
    }

    #[test]
    fn cdata_folds_into_text() -> Result {
        let root = Element::parse("<url><![CDATA[https://example.com/?a=1&b=2]]></url>")?;
        assert_eq!(root.get_text(), "https://example.com/?a=1&b=2");
        Ok(())
    }

    #[test]
    fn empty_elements() -> Result {
        let root = Element::parse("<rval><entries/></rval>")?;
        assert_eq!(root.get_children("entries").count(), 1);
        assert_eq!(root.child_text("entries"), "");
        Ok(())
    }

    #[test]
    fn malformed_documents_rejected() {
        for input in ["", "<open>", "<a></b>", "plain text"] {
            let error = Element::parse(input).unwrap_err();
            assert!(error.is_deserialization(), "{input}: {error:?}");
        }
    }

    #[test]
    fn require_child_names_the_missing_element() -> Result {
        let root = Element::parse("<rval/>")?;
        let error = root.require_child("totalNumEntries").unwrap_err();
        assert!(error.is_deserialization());
        assert!(
            format!("{:?}", error.source()).contains("totalNumEntries"),
            "{error:?}"
        );
        Ok(())
    }

    #[test]
    fn render_escapes_text_and_attributes() {
        let element = Element::new("mutate")
            .attr("xmlns", "https://example.com/v1")
            .child(
                Element::new("operations")
                    .leaf("operator", "SET")
                    .child(Element::new("operand").leaf("name", "a < b & \"c\"")),
            );
        let xml = element.render();
        assert!(xml.starts_with(r#"<mutate xmlns="https://example.com/v1">"#), "{xml}");
        assert!(xml.contains("<operator>SET</operator>"), "{xml}");
        assert!(xml.contains("a &lt; b &amp; &quot;c&quot;"), "{xml}");
    }

    #[test]
    fn render_parse_round_trip() -> Result {
        let element = Element::new("selector")
            .leaf("fields", "Id")
            .leaf("fields", "Name")
            .child(
                Element::new("paging")
                    .leaf("startIndex", "0")
                    .leaf("numberResults", "100"),
            );
        let parsed = Element::parse(&element.render())?;
        assert_eq!(parsed, element);
        Ok(())
    }

    #[test]
    fn empty_element_renders_self_closing() {
        assert_eq!(Element::new("entries").render(), "<entries/>");
    }
}
