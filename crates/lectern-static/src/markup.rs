//! Imperative HTML tree builder.
//!
//! Elements are opened with a closure scope; whatever the closure builds
//! is attached to the element when it returns, so a frame is always
//! finalized into its parent on every exit path. Serialization produces
//! an indented, human-readable rendering with a leading doctype line.

/// A node in the markup tree.
#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    void: bool,
}

/// Builder for an HTML fragment or document.
#[derive(Debug, Default)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Open an element with the given attributes. Content built inside
    /// the closure becomes the element's children.
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], build: impl FnOnce(&mut Markup)) {
        let mut inner = Markup::new();
        build(&mut inner);

        self.nodes.push(Node::Element(Element {
            tag: tag.to_string(),
            attrs: owned_attrs(attrs),
            children: inner.nodes,
            void: false,
        }));
    }

    /// Element with no content and no closing tag (`meta`, `link`).
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.nodes.push(Node::Element(Element {
            tag: tag.to_string(),
            attrs: owned_attrs(attrs),
            children: Vec::new(),
            void: true,
        }));
    }

    /// Character data, escaped on serialization.
    pub fn text(&mut self, content: &str) {
        self.nodes.push(Node::Text(content.to_string()));
    }

    /// Pre-escaped markup, emitted verbatim.
    pub fn raw(&mut self, content: &str) {
        self.nodes.push(Node::Raw(content.to_string()));
    }

    /// Serialize the tree: a doctype line followed by the indented
    /// rendering, two spaces per depth.
    pub fn render(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        for node in &self.nodes {
            write_node(&mut out, node, 0);
        }
        out
    }
}

fn owned_attrs(attrs: &[(&str, &str)]) -> Vec<(String, String)> {
    attrs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);

    match node {
        Node::Text(text) => {
            out.push_str(&pad);
            out.push_str(&escape_text(text));
            out.push('\n');
        }
        Node::Raw(raw) => {
            out.push_str(&pad);
            out.push_str(raw.trim_end());
            out.push('\n');
        }
        Node::Element(element) => {
            out.push_str(&pad);
            out.push_str(&open_tag(element));

            if element.void {
                out.push('\n');
            } else if is_inline(&element.children) {
                // Text-only content stays on one line with its tags.
                for child in &element.children {
                    match child {
                        Node::Text(text) => out.push_str(&escape_text(text)),
                        Node::Raw(raw) => out.push_str(raw),
                        Node::Element(_) => unreachable!(),
                    }
                }
                out.push_str(&format!("</{}>\n", element.tag));
            } else {
                out.push('\n');
                for child in &element.children {
                    write_node(out, child, depth + 1);
                }
                out.push_str(&pad);
                out.push_str(&format!("</{}>\n", element.tag));
            }
        }
    }
}

fn is_inline(children: &[Node]) -> bool {
    children
        .iter()
        .all(|child| matches!(child, Node::Text(_) | Node::Raw(_)))
}

fn open_tag(element: &Element) -> String {
    let mut tag = format!("<{}", element.tag);
    for (key, value) in &element.attrs {
        tag.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
    }
    tag.push('>');
    tag
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_doctype_line() {
        let markup = Markup::new();

        assert!(markup.render().starts_with("<!DOCTYPE html>\n"));
    }

    #[test]
    fn renders_text_only_elements_inline() {
        let mut markup = Markup::new();
        markup.element("h1", &[], |h| h.text("Docs"));

        assert_eq!(markup.render(), "<!DOCTYPE html>\n<h1>Docs</h1>\n");
    }

    #[test]
    fn indents_nested_elements() {
        let mut markup = Markup::new();
        markup.element("div", &[("id", "x")], |div| {
            div.element("h1", &[], |h| h.text("Title"));
            div.element("p", &[], |p| p.text("Body"));
        });

        assert_eq!(
            markup.render(),
            "<!DOCTYPE html>\n<div id=\"x\">\n  <h1>Title</h1>\n  <p>Body</p>\n</div>\n"
        );
    }

    #[test]
    fn escapes_text_content() {
        let mut markup = Markup::new();
        markup.element("p", &[], |p| p.text("a < b & c"));

        assert!(markup.render().contains("a &lt; b &amp; c"));
    }

    #[test]
    fn escapes_attribute_values() {
        let mut markup = Markup::new();
        markup.void("meta", &[("content", "say \"hi\" & go")]);

        assert!(markup
            .render()
            .contains("content=\"say &quot;hi&quot; &amp; go\""));
    }

    #[test]
    fn raw_content_is_verbatim() {
        let mut markup = Markup::new();
        markup.element("section", &[], |section| {
            section.raw("<p>Already <em>markup</em></p>");
        });

        assert!(markup.render().contains("<p>Already <em>markup</em></p>"));
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut markup = Markup::new();
        markup.void("meta", &[("charset", "UTF-8")]);

        let html = markup.render();

        assert!(html.contains("<meta charset=\"UTF-8\">\n"));
        assert!(!html.contains("</meta>"));
    }

    #[test]
    fn empty_element_keeps_closing_tag() {
        let mut markup = Markup::new();
        markup.element("td", &[], |_| {});

        assert!(markup.render().contains("<td></td>"));
    }
}
