//! Minimal owned DOM over quick-xml events.
//!
//! The site description is small and read exactly once, so the whole
//! document is materialized as an owned tree and exposed through a
//! read-only lookup API: first element by tag, all elements by tag,
//! attribute by name. Lookups never fail on absence; requiredness is
//! enforced one layer up, in the schema walk.

use quick_xml::events::Event;
use quick_xml::Reader;

/// A node in the parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A parsed element: tag name, attributes in document order, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A parsed document, holding the top-level nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Errors from the DOM layer.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("XML syntax error: {0}")]
    Syntax(String),

    #[error("Element <{0}> does not contain a single text value")]
    NoText(String),
}

impl Document {
    /// Parse an XML document into an owned tree.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let mut reader = Reader::from_str(source);

        let mut top_level: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    stack.push(element_from_start(&start)?);
                }
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut top_level, Node::Element(element));
                }
                Ok(Event::End(_)) => {
                    let finished = stack
                        .pop()
                        .ok_or_else(|| DomError::Syntax("closing tag without opener".into()))?;
                    attach(&mut stack, &mut top_level, Node::Element(finished));
                }
                Ok(Event::Text(text)) => {
                    let value = text
                        .unescape()
                        .map_err(|e| DomError::Syntax(e.to_string()))?
                        .into_owned();
                    attach(&mut stack, &mut top_level, Node::Text(value));
                }
                Ok(Event::CData(data)) => {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    attach(&mut stack, &mut top_level, Node::Text(value));
                }
                Ok(Event::Eof) => break,
                // Declarations, comments and processing instructions carry
                // nothing the site description needs.
                Ok(_) => {}
                Err(e) => {
                    return Err(DomError::Syntax(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if !stack.is_empty() {
            return Err(DomError::Syntax(
                "unexpected end of document inside an open element".into(),
            ));
        }

        Ok(Document {
            children: top_level,
        })
    }

    /// First element with the given tag, in document order, or `None`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        first_match(&self.children, tag)
    }

    /// All elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_matches(&self.children, tag, &mut found);
        found
    }
}

impl Element {
    /// First descendant element with the given tag, or `None`.
    /// The element itself is not a candidate.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        first_match(&self.children, tag)
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_matches(&self.children, tag, &mut found);
        found
    }

    /// Attribute value by name, or `None`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The element's text value. Text-bearing leaves must have exactly
    /// one text child; anything else is a shape error.
    pub fn text(&self) -> Result<&str, DomError> {
        match self.children.as_slice() {
            [Node::Text(value)] => Ok(value),
            _ => Err(DomError::NoText(self.name.clone())),
        }
    }
}

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, DomError> {
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| DomError::Syntax(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DomError::Syntax(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [Element], top_level: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}

fn first_match<'a>(nodes: &'a [Node], tag: &str) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == tag {
                return Some(element);
            }
            if let Some(found) = first_match(&element.children, tag) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_matches<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == tag {
                found.push(element);
            }
            collect_matches(&element.children, tag, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"<content><site_name>Docs</site_name><guides><category name="A" id="a"><entry name="One" id="one"/></category><category name="B" id="b"/></guides></content>"#;

    #[test]
    fn finds_first_element_in_document_order() {
        let doc = Document::parse(DOC).unwrap();

        let category = doc.find("category").unwrap();

        assert_eq!(category.attr("name"), Some("A"));
    }

    #[test]
    fn find_all_returns_ordered_matches() {
        let doc = Document::parse(DOC).unwrap();

        let categories = doc.find_all("category");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].attr("id"), Some("a"));
        assert_eq!(categories[1].attr("id"), Some("b"));
    }

    #[test]
    fn descendants_are_searched() {
        let doc = Document::parse(DOC).unwrap();

        let entry = doc.find("entry").unwrap();

        assert_eq!(entry.attr("name"), Some("One"));
    }

    #[test]
    fn absent_element_is_none() {
        let doc = Document::parse(DOC).unwrap();

        assert!(doc.find("missing").is_none());
        assert!(doc.find_all("missing").is_empty());
    }

    #[test]
    fn absent_attribute_is_none() {
        let doc = Document::parse(DOC).unwrap();

        assert_eq!(doc.find("category").unwrap().attr("missing"), None);
    }

    #[test]
    fn reads_single_text_child() {
        let doc = Document::parse(DOC).unwrap();

        assert_eq!(doc.find("site_name").unwrap().text().unwrap(), "Docs");
    }

    #[test]
    fn text_fails_on_element_children() {
        let doc = Document::parse(DOC).unwrap();

        let result = doc.find("guides").unwrap().text();

        assert!(matches!(result, Err(DomError::NoText(_))));
    }

    #[test]
    fn text_fails_on_empty_element() {
        let doc = Document::parse("<a><b></b></a>").unwrap();

        assert!(matches!(
            doc.find("b").unwrap().text(),
            Err(DomError::NoText(_))
        ));
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let doc =
            Document::parse(r#"<a title="Fish &amp; Chips">1 &lt; 2</a>"#).unwrap();

        let a = doc.find("a").unwrap();

        assert_eq!(a.attr("title"), Some("Fish & Chips"));
        assert_eq!(a.text().unwrap(), "1 < 2");
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(matches!(
            Document::parse("<a><b></a>"),
            Err(DomError::Syntax(_))
        ));
    }

    #[test]
    fn rejects_unclosed_document() {
        assert!(matches!(
            Document::parse("<a><b></b>"),
            Err(DomError::Syntax(_))
        ));
    }
}
