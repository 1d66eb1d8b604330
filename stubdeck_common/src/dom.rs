//! Minimal element builder
//!
//! Views are assembled as a detached node tree and rendered to HTML in one
//! pass. Text content and attribute values are always escaped; the only
//! unescaped content is `'static` markup such as embedded stylesheets.

use crate::escape::escape_html;
use std::fmt;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in a detached view tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted markup compiled into the binary
    Static(&'static str),
}

/// An HTML element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

/// Start building an element
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append an escaped text node
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Append trusted static markup
    pub fn markup(self, markup: &'static str) -> Self {
        self.child(Node::Static(markup))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for descendant elements with the given tag
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if element.tag == tag {
                    found.push(element);
                }
                element.collect(tag, found);
            }
        }
    }

    /// Concatenated text content of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Element(element) => out.push_str(&element.text_content()),
                Node::Text(text) => out.push_str(text),
                Node::Static(_) => {}
            }
        }
        out
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Static(markup) => out.push_str(markup),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let html = el("div")
            .class("row")
            .child(el("span").class("tag").text("GET"))
            .child(el("br"))
            .text("tail")
            .render();

        assert_eq!(
            html,
            r#"<div class="row"><span class="tag">GET</span><br>tail</div>"#
        );
    }

    #[test]
    fn test_text_and_attrs_are_escaped() {
        let name = r#"<script>alert("x")</script>"#;
        let html = el("td").attr("title", name).text(name).render();

        assert!(!html.contains("<script>"));
        assert_eq!(
            html,
            "<td title=\"&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;\">\
             &lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;</td>"
        );
    }

    #[test]
    fn test_static_markup_is_verbatim() {
        let html = el("style").markup("a > b { color: red; }").render();
        assert_eq!(html, "<style>a > b { color: red; }</style>");
    }

    #[test]
    fn test_find_all_and_text_content() {
        let table = el("table").child(
            el("tbody")
                .child(el("tr").child(el("td").text("a")))
                .child(el("tr").child(el("td").text("b"))),
        );

        let rows = table.find_all("tr");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text_content(), "b");
        assert_eq!(table.text_content(), "ab");
    }
}
