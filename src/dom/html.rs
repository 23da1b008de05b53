/// HTML snapshots loaded through scraper
use super::{stylesheet_rules, Document, NodeId, PageTree, Style};
use crate::error::{CaptionError, Result};
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use tracing::debug;

/// A parsed page: the scraper tree for selector queries plus a mutable [`Document`]
pub struct HtmlPage {
    html: Html,
    document: Document,
    /// Document node for each scraper node, in scraper pre-order
    origin: Vec<Option<NodeId>>,
}

impl HtmlPage {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let mut document = Document::empty();
        let mut origin = Vec::new();
        let mut mapped = HashMap::new();

        for node in html.tree.root().descendants() {
            let parent = node
                .parent()
                .and_then(|p| mapped.get(&p.id()).copied());

            let id = match node.value() {
                Node::Document | Node::Fragment => Some(document.root()),
                Node::Element(el) => parent.map(|parent| {
                    let id = document.append_element(parent, el.name());
                    for (name, value) in el.attrs() {
                        document.set_attr(id, name, value);
                    }
                    id
                }),
                Node::Text(text) => parent.map(|parent| {
                    let content: &str = text;
                    document.append_text(parent, content)
                }),
                _ => None,
            };

            if let Some(id) = id {
                mapped.insert(node.id(), id);
            }
            origin.push(id);
        }

        // sheet declarations in source order, inline style last
        let mut declared: HashMap<NodeId, String> = HashMap::new();
        for (selector, declarations) in page_stylesheet(&html) {
            let Ok(parsed) = Selector::parse(&selector) else {
                debug!("Skipping unsupported stylesheet selector: {}", selector);
                continue;
            };
            for element in html.select(&parsed) {
                if let Some(id) = mapped.get(&element.id()) {
                    let entry = declared.entry(*id).or_default();
                    entry.push_str(&declarations);
                    entry.push(';');
                }
            }
        }
        for (id, mut declarations) in declared {
            if let Some(inline) = document.attr(id, "style") {
                declarations.push_str(inline);
            }
            document.set_style(id, Style::parse(&declarations));
        }

        debug!("Parsed HTML page: {} nodes", origin.len());
        Self {
            html,
            document,
            origin,
        }
    }

    /// First element matching a CSS selector, if still attached
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeId>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| CaptionError::InvalidSelector(format!("{}: {:?}", selector, e)))?;

        let Some(element) = self.html.select(&parsed).next() else {
            return Ok(None);
        };

        let position = self
            .html
            .tree
            .root()
            .descendants()
            .position(|node| node.id() == element.id());

        Ok(position
            .and_then(|pos| self.origin.get(pos).copied().flatten())
            .filter(|id| self.document.is_attached(*id)))
    }

    /// Text of the first element matching `selector`
    pub fn select_text(&self, selector: &str) -> Result<Option<String>> {
        Ok(self
            .select_first(selector)?
            .map(|id| self.document.text_content(id)))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn to_html(&self) -> String {
        self.document.to_html(self.document.root())
    }
}

/// Rules from every `<style>` element, in document order
fn page_stylesheet(html: &Html) -> Vec<(String, String)> {
    let Ok(style_selector) = Selector::parse("style") else {
        return Vec::new();
    };
    html.select(&style_selector)
        .flat_map(|style| stylesheet_rules(&style.text().collect::<String>()))
        .collect()
}
