//! Lossless HTML tree used as the native rendered projection.
//!
//! The parser is deliberately forgiving: anything it does not recognise as a
//! tag is kept as text, unclosed elements are closed implicitly and stray
//! closing tags are kept verbatim. Every node remembers the exact source bytes
//! it came from, so [`HtmlTree::serialize`] reproduces the input byte for byte
//! and an attribute edit only touches the bytes of that attribute's value.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is taken as text up to the matching closing tag.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

/// Index of a node inside one [`HtmlTree`]. Only meaningful for the tree that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element(Element),
    /// Character data as written in the source, entities not decoded.
    Text(String),
    /// Comments, doctypes, processing instructions and unmatched closing tags.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    open_tag: String,
    close_tag: Option<String>,
}

impl Element {
    /// Lowercased tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open_tag(&self) -> &str {
        &self.open_tag
    }

    fn attributes(&self) -> Vec<AttrSpan> {
        let start = 1 + self.name.len();
        let end = if self.open_tag.ends_with("/>") {
            self.open_tag.len() - 2
        } else {
            self.open_tag.len() - 1
        };
        if start >= end {
            return Vec::new();
        }
        ATTRIBUTE
            .captures_iter(&self.open_tag[start..end])
            .filter_map(|caps| {
                let name = caps.get(1)?;
                let value = match (caps.get(2), caps.get(3), caps.get(4)) {
                    (Some(m), _, _) => Some((m.range(), Quote::Double)),
                    (_, Some(m), _) => Some((m.range(), Quote::Single)),
                    (_, _, Some(m)) => Some((m.range(), Quote::Unquoted)),
                    _ => None,
                };
                Some(AttrSpan {
                    name: name.as_str().to_ascii_lowercase(),
                    name_end: start + name.end(),
                    value: value.map(|(r, q)| (r.start + start..r.end + start, q)),
                })
            })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<AttrSpan> {
        let name = name.to_ascii_lowercase();
        self.attributes().into_iter().find(|a| a.name == name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let double = html_escape::encode_double_quoted_attribute(value);
        match self.attribute(name) {
            Some(AttrSpan {
                value: Some((range, quote)),
                ..
            }) => {
                let replacement = match quote {
                    Quote::Double => double.into_owned(),
                    Quote::Single => html_escape::encode_single_quoted_attribute(value).into_owned(),
                    Quote::Unquoted => format!("\"{double}\""),
                };
                self.open_tag.replace_range(range, &replacement);
            }
            Some(AttrSpan { name_end, .. }) => {
                self.open_tag.insert_str(name_end, &format!("=\"{double}\""));
            }
            None => {
                let body_end = if self.open_tag.ends_with("/>") {
                    self.open_tag.len() - 2
                } else {
                    self.open_tag.len() - 1
                };
                let at = self.open_tag[..body_end].trim_end().len();
                self.open_tag.insert_str(at, &format!(" {name}=\"{double}\""));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    Unquoted,
}

#[derive(Debug, Clone)]
struct AttrSpan {
    name: String,
    name_end: usize,
    value: Option<(Range<usize>, Quote)>,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree. Node ids stay stable for the lifetime of the
/// tree; detached nodes keep their slot but are no longer reachable from the
/// root.
#[derive(Debug, Clone)]
pub struct HtmlTree {
    nodes: Vec<Node>,
}

enum Markup<'a> {
    Open { name: String, raw: &'a str },
    Close { name: String, raw: &'a str },
    Other(&'a str),
}

impl HtmlTree {
    pub fn parse(source: &str) -> Self {
        let mut tree = HtmlTree {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut stack = vec![NodeId::ROOT];
        let bytes = source.as_bytes();
        let mut pos = 0;
        let mut text_start = 0;

        while pos < bytes.len() {
            if bytes[pos] != b'<' {
                pos += 1;
                continue;
            }
            let Some((markup, end)) = scan_markup(source, pos) else {
                pos += 1;
                continue;
            };
            let parent = stack.last().copied().unwrap_or(NodeId::ROOT);
            if text_start < pos {
                tree.push(parent, NodeKind::Text(source[text_start..pos].to_string()));
            }
            pos = end;

            match markup {
                Markup::Other(raw) => {
                    tree.push(parent, NodeKind::Raw(raw.to_string()));
                }
                Markup::Open { name, raw } => {
                    let self_closing = raw.ends_with("/>");
                    let is_void = VOID_ELEMENTS.contains(&name.as_str());
                    let is_raw_text = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                    let id = tree.push(
                        parent,
                        NodeKind::Element(Element {
                            name: name.clone(),
                            open_tag: raw.to_string(),
                            close_tag: None,
                        }),
                    );
                    if is_raw_text && !self_closing {
                        pos = tree.take_raw_text(id, &name, source, pos);
                    } else if !self_closing && !is_void {
                        stack.push(id);
                    }
                }
                Markup::Close { name, raw } => {
                    let open = stack.iter().rposition(|&id| {
                        id != NodeId::ROOT && tree.tag_name(id) == Some(name.as_str())
                    });
                    match open {
                        Some(depth) => {
                            let id = stack[depth];
                            stack.truncate(depth);
                            if let NodeKind::Element(el) = &mut tree.nodes[id.0].kind {
                                el.close_tag = Some(raw.to_string());
                            }
                        }
                        None => {
                            tree.push(parent, NodeKind::Raw(raw.to_string()));
                        }
                    }
                }
            }
            text_start = pos;
        }

        if text_start < source.len() {
            let parent = stack.last().copied().unwrap_or(NodeId::ROOT);
            tree.push(parent, NodeKind::Text(source[text_start..].to_string()));
        }
        tree
    }

    /// Consumes the content of a raw-text element starting at `from` and
    /// returns the position after its closing tag.
    fn take_raw_text(&mut self, id: NodeId, name: &str, source: &str, from: usize) -> usize {
        let lowered = source[from..].to_ascii_lowercase();
        let Some(rel) = lowered.find(&format!("</{name}")) else {
            if from < source.len() {
                self.push(id, NodeKind::Text(source[from..].to_string()));
            }
            return source.len();
        };
        let close_start = from + rel;
        if close_start > from {
            self.push(id, NodeKind::Text(source[from..close_start].to_string()));
        }
        let close_end = source[close_start..]
            .find('>')
            .map(|i| close_start + i + 1)
            .unwrap_or(source.len());
        if let NodeKind::Element(el) = &mut self.nodes[id.0].kind {
            el.close_tag = Some(source[close_start..close_end].to_string());
        }
        close_end
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_node(NodeId::ROOT, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Root => {}
            NodeKind::Element(el) => out.push_str(&el.open_tag),
            NodeKind::Text(raw) | NodeKind::Raw(raw) => {
                out.push_str(raw);
                return;
            }
        }
        for &child in &node.children {
            self.write_node(child, out);
        }
        if let NodeKind::Element(Element {
            close_tag: Some(close),
            ..
        }) = &node.kind
        {
            out.push_str(close);
        }
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element(el) => Some(el.name()),
            _ => None,
        }
    }

    /// True when the node can be reached from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == NodeId::ROOT {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// True when the node or one of its ancestors is a `tag` element.
    pub fn is_within(&self, id: NodeId, tag: &str) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.tag_name(node) == Some(tag) {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Attached elements named `tag`, in document order.
    pub fn elements_named(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(NodeId::ROOT, &mut |tree: &HtmlTree, id: NodeId| {
            if tree.tag_name(id) == Some(tag) {
                found.push(id);
            }
        });
        found
    }

    /// Attached text nodes, in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(NodeId::ROOT, &mut |tree: &HtmlTree, id: NodeId| {
            if matches!(tree.kind(id), Some(NodeKind::Text(_))) {
                found.push(id);
            }
        });
        found
    }

    fn walk(&self, id: NodeId, visit: &mut impl FnMut(&HtmlTree, NodeId)) {
        visit(self, id);
        for &child in self.children(id) {
            self.walk(child, visit);
        }
    }

    /// Decoded value of an attribute. A present attribute without a value
    /// yields an empty string.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let NodeKind::Element(el) = self.kind(id)? else {
            return None;
        };
        let span = el.attribute(name)?;
        Some(match span.value {
            Some((range, _)) => {
                html_escape::decode_html_entities(&el.open_tag[range]).into_owned()
            }
            None => String::new(),
        })
    }

    /// Sets an attribute value, rewriting only the bytes of that value (or
    /// appending the attribute when it is missing). Returns false when `id`
    /// is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(el)) => {
                el.set_attribute(name, value);
                true
            }
            _ => false,
        }
    }

    /// Decoded character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<String> {
        match self.kind(id)? {
            NodeKind::Text(raw) => Some(html_escape::decode_html_entities(raw).into_owned()),
            _ => None,
        }
    }

    /// Replaces the character data of a text node, escaping markup characters.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Text(raw)) => {
                *raw = html_escape::encode_text(text).into_owned();
                true
            }
            _ => false,
        }
    }

    /// Unlinks a node (and its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) -> bool {
        if id == NodeId::ROOT {
            return false;
        }
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
        true
    }
}

fn scan_markup(source: &str, start: usize) -> Option<(Markup<'_>, usize)> {
    let rest = &source[start..];
    if rest.starts_with("<!--") {
        let end = rest[4..]
            .find("-->")
            .map(|i| start + 4 + i + 3)
            .unwrap_or(source.len());
        return Some((Markup::Other(&source[start..end]), end));
    }
    let bytes = rest.as_bytes();
    let next = *bytes.get(1)?;
    if next == b'!' || next == b'?' {
        let end = rest.find('>').map(|i| start + i + 1).unwrap_or(source.len());
        return Some((Markup::Other(&source[start..end]), end));
    }
    let (closing, name_start) = if next == b'/' { (true, 2) } else { (false, 1) };
    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }
    let end = start + find_tag_end(rest)?;
    let raw = &source[start..end];
    let name: String = raw[name_start..]
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
        .collect::<String>()
        .to_ascii_lowercase();
    let markup = if closing {
        Markup::Close { name, raw }
    } else {
        Markup::Open { name, raw }
    };
    Some((markup, end))
}

/// Length of the tag at the start of `tag`, up to and including its `>`.
/// Quotes only count when they open an attribute value.
fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut last = 0u8;
    for (i, b) in tag.bytes().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => {
                quote = None;
                last = b;
            }
            Some(_) => {}
            None if (b == b'"' || b == b'\'') && last == b'=' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None if b.is_ascii_whitespace() => {}
            None => last = b,
        }
    }
    None
}
