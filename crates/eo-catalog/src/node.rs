//! A detached element tree, the output of the renderer.
//!
//! Nodes are plain owned values. Nothing is attached anywhere until a caller
//! appends the tree to a container (see [`crate::render::ListView`]) or
//! serializes it with [`Element::to_html`].

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Create an element with the given attributes
pub fn el<I, V>(tag: &'static str, attrs: I) -> Element
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<String>,
{
    Element {
        tag,
        attrs: attrs.into_iter().map(|(k, v)| (k, v.into())).collect(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style text content
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }

    /// Child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first search for the first descendant (or self) matching `pred`
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(pred))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

fn write_element(e: &Element, out: &mut String) {
    out.push('<');
    out.push_str(e.tag);
    for (k, v) in &e.attrs {
        let _ = write!(out, " {}=\"{}\"", k, escape_html(v));
    }
    out.push('>');
    if VOID_TAGS.contains(&e.tag) {
        return;
    }
    for child in &e.children {
        match child {
            Node::Element(c) => write_element(c, out),
            Node::Text(t) => out.push_str(&escape_html(t)),
        }
    }
    let _ = write!(out, "</{}>", e.tag);
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_concatenates_descendants() {
        let node = Element::new("div")
            .with_child(Element::new("span").with_text("Label"))
            .with_text(" ")
            .with_child(Element::new("span").with_text("value"));
        assert_eq!(node.text_content(), "Label value");
    }

    #[test]
    fn test_to_html_escapes() {
        let node = el("a", [("href", "/x?a=1&b=\"2\"")]).with_text("<Click>");
        insta::assert_snapshot!(
            node.to_html(),
            @r#"<a href="/x?a=1&amp;b=&quot;2&quot;">&lt;Click&gt;</a>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let node = el("input", [("id", "search")]);
        assert_eq!(node.to_html(), r#"<input id="search">"#);
    }

    #[test]
    fn test_find_by_class() {
        let tree = el("div", [("class", "outer")])
            .with_child(el("p", [("class", "a b")]).with_text("first"))
            .with_child(el("p", [("class", "b")]).with_text("second"));
        assert_eq!(tree.find(&|e| e.has_class("b")).unwrap().text_content(), "first");
        assert_eq!(tree.find(&|e| e.has_class("outer")).unwrap().tag, "div");
        assert!(tree.find(&|e| e.has_class("c")).is_none());
    }
}
