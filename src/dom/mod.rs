/// In-memory document model
///
/// The occurrence locator walks and mutates pages through the [`PageTree`] and
/// [`PageTreeMut`] traits. [`Document`] is the arena-backed implementation used
/// for HTML snapshots and test fixtures.

pub mod html;
pub mod style;

pub use html::HtmlPage;
pub use style::{stylesheet_rules, Overflow, Rect, ScrollMetrics, Style};

use std::collections::BTreeMap;
use std::ops::Range;

/// Handle to a node in a [`Document`]; stays valid after the node is detached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Emphasis applied to a highlight marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Plain highlight
    #[default]
    Normal,
    /// The occurrence currently navigated to
    Active,
}

/// Element payload
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    attrs: BTreeMap<String, String>,
    style: Style,
    pub rect: Option<Rect>,
    pub scroll: Option<ScrollMetrics>,
    pub emphasis: Emphasis,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Read-only view of a rendered page
pub trait PageTree {
    fn root(&self) -> NodeId;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> &[NodeId];
    /// Content of a text node, `None` for elements
    fn text(&self, node: NodeId) -> Option<&str>;
    /// Lowercase tag name of an element, `None` for text
    fn tag(&self, node: NodeId) -> Option<&str>;
    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;
    fn style(&self, node: NodeId) -> Option<&Style>;
    /// Layout box, `None` when no layout is known
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;
    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics>;

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// `node` or its nearest ancestor satisfying `pred`
    fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
        Self: Sized,
    {
        let mut current = Some(node);
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Still connected to the root
    fn is_attached(&self, node: NodeId) -> bool {
        let root = self.root();
        let mut current = node;
        loop {
            if current == root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        collect_text(self, node, &mut out);
        out
    }
}

fn collect_text<T: PageTree + ?Sized>(tree: &T, node: NodeId, out: &mut String) {
    if let Some(text) = tree.text(node) {
        out.push_str(text);
        return;
    }
    for child in tree.children(node) {
        collect_text(tree, *child, out);
    }
}

/// Mutations the occurrence locator performs on a page
pub trait PageTreeMut: PageTree {
    /// Split a text node, wrapping each byte range in a marker element with `marker_class`.
    /// Ranges must be sorted and non-overlapping. Returns the markers in order.
    fn wrap_ranges(&mut self, text_node: NodeId, ranges: &[Range<usize>], marker_class: &str) -> Vec<NodeId>;
    /// Replace a marker by a plain text node holding its text; returns the former parent
    fn unwrap_marker(&mut self, marker: NodeId) -> Option<NodeId>;
    /// Merge adjacent text nodes and drop empty ones below `node`
    fn normalize(&mut self, node: NodeId);
    fn set_emphasis(&mut self, marker: NodeId, emphasis: Emphasis);
    fn set_scroll_top(&mut self, container: NodeId, scroll_top: f64);
    /// Smoothly centre `node` in the viewport
    fn scroll_into_view(&mut self, node: NodeId);
}

/// Arena-backed document tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    viewport_target: Option<NodeId>,
}

impl Document {
    /// A document with `html > body`
    pub fn new() -> Self {
        let mut doc = Self::with_root("html");
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc
    }

    /// A bare document root for parsers to fill
    pub fn empty() -> Self {
        Self::with_root("#document")
    }

    fn with_root(tag: &str) -> Self {
        let root = Node {
            kind: NodeKind::Element(Element::new(tag)),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            viewport_target: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element, or the root when there is none
    pub fn body(&self) -> NodeId {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.tag(*id) == Some("body"))
            .unwrap_or(self.root)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Convenience for fixtures: append a new element and return it
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Convenience for fixtures: append a new text node and return it
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Remove `node` from its parent; the node itself stays addressable
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Put `replacements` where `node` was and detach `node`
    pub fn replace_with(&mut self, node: NodeId, replacements: &[NodeId]) {
        let Some(parent) = self.nodes[node.0].parent else {
            return;
        };
        for r in replacements {
            self.detach(*r);
        }
        let Some(index) = self.nodes[parent.0].children.iter().position(|c| *c == node) else {
            return;
        };

        self.nodes[parent.0]
            .children
            .splice(index..=index, replacements.iter().copied());
        for r in replacements {
            self.nodes[r.0].parent = Some(parent);
        }
        self.nodes[node.0].parent = None;
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.attr(name))
    }

    /// Set an attribute; `style` is parsed into the element's [`Style`]
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            let name = name.to_ascii_lowercase();
            if name == "style" {
                el.style = Style::parse(value);
            }
            el.attrs.insert(name, value.to_string());
        }
    }

    /// Replace the computed style without touching the `style` attribute
    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if let Some(el) = self.element_mut(node) {
            el.style = style;
        }
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(node) {
            el.rect = Some(rect);
        }
    }

    pub fn set_scroll(&mut self, node: NodeId, scroll: ScrollMetrics) {
        if let Some(el) = self.element_mut(node) {
            el.scroll = Some(scroll);
        }
    }

    /// Node most recently scrolled into the viewport
    pub fn viewport_target(&self) -> Option<NodeId> {
        self.viewport_target
    }

    /// `node` and everything below it, in document order
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    /// Attached elements carrying `class`, in document order
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| self.element(*node).map(|el| el.has_class(class)).unwrap_or(false))
            .collect()
    }

    pub fn text_content(&self, node: NodeId) -> String {
        PageTree::text_content(self, node)
    }

    /// Serialize `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let el = match &self.nodes[node.0].kind {
            NodeKind::Text(text) => {
                out.push_str(&escape_text(text));
                return;
            }
            NodeKind::Element(el) => el,
        };

        let synthetic = el.tag.starts_with('#');
        if !synthetic {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attrs {
                out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
            }
            if el.emphasis == Emphasis::Active {
                out.push_str(" data-emphasis=\"active\"");
            }
            out.push('>');
            if is_void(&el.tag) {
                return;
            }
        }

        for child in self.children(node) {
            self.write_html(*child, out);
        }

        if !synthetic {
            out.push_str(&format!("</{}>", el.tag));
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTree for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Document::parent(self, node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        Document::children(self, node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        Document::text(self, node)
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        Document::tag(self, node)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        Document::attr(self, node, name)
    }

    fn style(&self, node: NodeId) -> Option<&Style> {
        self.element(node).map(Element::style)
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        self.element(node).and_then(|el| el.rect)
    }

    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics> {
        self.element(node).and_then(|el| el.scroll)
    }
}

impl PageTreeMut for Document {
    fn wrap_ranges(&mut self, text_node: NodeId, ranges: &[Range<usize>], marker_class: &str) -> Vec<NodeId> {
        let Some(text) = self.text(text_node).map(str::to_string) else {
            return Vec::new();
        };
        if self.parent(text_node).is_none() {
            return Vec::new();
        }

        let mut replacements = Vec::new();
        let mut markers = Vec::new();
        let mut last = 0;

        for range in ranges {
            let (Some(before), Some(matched)) = (text.get(last..range.start), text.get(range.clone())) else {
                continue;
            };
            if !before.is_empty() {
                replacements.push(self.create_text(before));
            }

            let marker = self.create_element("span");
            self.set_attr(marker, "class", marker_class);
            let inner = self.create_text(matched);
            self.append_child(marker, inner);

            replacements.push(marker);
            markers.push(marker);
            last = range.end;
        }

        if markers.is_empty() {
            return markers;
        }
        if let Some(rest) = text.get(last..).filter(|rest| !rest.is_empty()) {
            replacements.push(self.create_text(rest));
        }

        self.replace_with(text_node, &replacements);
        markers
    }

    fn unwrap_marker(&mut self, marker: NodeId) -> Option<NodeId> {
        let parent = self.parent(marker)?;
        let content = self.text_content(marker);
        let text = self.create_text(&content);
        self.replace_with(marker, &[text]);
        Some(parent)
    }

    fn normalize(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        let mut merged: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let child_text = self.text(child).map(str::to_string);
            match child_text {
                Some(text) if text.is_empty() => {
                    self.nodes[child.0].parent = None;
                }
                Some(text) => {
                    let previous = merged.last().copied().filter(|prev| self.text(*prev).is_some());
                    match previous {
                        Some(prev) => {
                            if let NodeKind::Text(existing) = &mut self.nodes[prev.0].kind {
                                existing.push_str(&text);
                            }
                            self.nodes[child.0].parent = None;
                        }
                        None => merged.push(child),
                    }
                }
                None => {
                    self.normalize(child);
                    merged.push(child);
                }
            }
        }

        self.nodes[node.0].children = merged;
    }

    fn set_emphasis(&mut self, marker: NodeId, emphasis: Emphasis) {
        if let Some(el) = self.element_mut(marker) {
            el.emphasis = emphasis;
        }
    }

    fn set_scroll_top(&mut self, container: NodeId, scroll_top: f64) {
        if let Some(scroll) = self.element_mut(container).and_then(|el| el.scroll.as_mut()) {
            let max = (scroll.scroll_height - scroll.client_height).max(0.0);
            scroll.scroll_top = scroll_top.clamp(0.0, max);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.viewport_target = Some(node);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "track" | "wbr"
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
