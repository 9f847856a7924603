//! In-memory HTML document tree.
//!
//! Pages are built as a tree of [`Element`]s and serialized once. Block
//! elements go on their own indented lines; inline elements, and anything
//! marked [`Element::single_line`], are written on one line with their
//! whole subtree.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-rendered HTML, inserted verbatim.
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    classes: Vec<String>,
    children: Vec<Node>,
    single_line: bool,
}

const INLINE_TAGS: &[&str] = &["a", "span", "code", "em", "strong", "title"];
const VOID_TAGS: &[&str] = &["meta", "link", "br", "img"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
            single_line: false,
        }
    }

    pub fn div(class: &str) -> Self {
        Self::new("div").class(class)
    }

    pub fn span(class: &str) -> Self {
        Self::new("span").class(class)
    }

    /// `<span>` holding only text.
    pub fn text_span(class: &str, text: impl Into<String>) -> Self {
        Self::span(class).text(text)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.push(class.to_owned());
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Write this element and its subtree on one line.
    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn push_raw(&mut self, html: impl Into<String>) {
        self.children.push(Node::Raw(html.into()));
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn is_inline(&self) -> bool {
        self.single_line || INLINE_TAGS.contains(&self.tag)
    }

    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&self.classes.join(" "))));
        }
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
        out.push('>');
    }

    fn write_close(&self, out: &mut String) {
        if !VOID_TAGS.contains(&self.tag) {
            out.push_str(&format!("</{}>", self.tag));
        }
    }

    fn write_inline(&self, out: &mut String) {
        self.write_open(out);
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_inline(out),
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Raw(html) => out.push_str(html),
            }
        }
        self.write_close(out);
    }

    fn write_block(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        if self.is_inline() || VOID_TAGS.contains(&self.tag) {
            self.write_inline(out);
            out.push('\n');
            return;
        }
        self.write_open(out);
        out.push('\n');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_block(out, depth + 1),
                Node::Text(t) => {
                    indent(out, depth + 1);
                    out.push_str(&escape_text(t));
                    out.push('\n');
                }
                Node::Raw(html) => {
                    let html = html.trim_end();
                    if !html.is_empty() {
                        out.push_str(html);
                        out.push('\n');
                    }
                }
            }
        }
        indent(out, depth);
        self.write_close(out);
        out.push('\n');
    }

    /// Serialize this element as a fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_block(&mut out, 0);
        out
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Serialize a complete document rooted at `<html>`.
pub fn render_document(root: &Element) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    root.write_block(&mut out, 0);
    out
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}
