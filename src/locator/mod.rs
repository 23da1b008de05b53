/// Occurrence locator
///
/// Finds every rendered occurrence of a term, wraps each one in a highlight
/// marker and steps through them cyclically. All state for the current search
/// lives in a [`SearchSession`].

pub mod visibility;

pub use visibility::{find_scrollable_parent, is_visible, scroll_to_element};

use crate::dom::{Emphasis, NodeId, PageTree, PageTreeMut};
use crate::lexicon::{Lexicon, MatchKind, WordEntry};
use crate::matcher::{sort_longest_first, symbol_pattern};
use regex::Regex;
use std::fmt;
use tracing::{debug, info, warn};

/// Class carried by every highlight marker
pub const HIGHLIGHT_CLASS: &str = "word-search-highlight";
/// Class of the floating results panel
pub const PANEL_CLASS: &str = "word-tracker-floating";
/// Id of the results panel
pub const RESULTS_PANEL_ID: &str = "wordTrackerResults";

/// Current occurrence within a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.index + 1, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A fresh search highlighted its occurrences and moved to the first
    Found(Position),
    /// Repeated search moved to the next occurrence
    Advanced(Position),
    NotFound { term: String },
}

impl SearchOutcome {
    pub fn position(&self) -> Option<Position> {
        match self {
            SearchOutcome::Found(p) | SearchOutcome::Advanced(p) => Some(*p),
            SearchOutcome::NotFound { .. } => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(p) | SearchOutcome::Advanced(p) => write!(f, "{}", p),
            SearchOutcome::NotFound { term } => {
                write!(f, "No occurrences of \"{}\" found on this page.", term)
            }
        }
    }
}

/// State of the active search
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    term: Option<String>,
    variants: Vec<WordEntry>,
    markers: Vec<NodeId>,
    /// `None` before the first occurrence is shown
    index: Option<usize>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn variants(&self) -> &[WordEntry] {
        &self.variants
    }

    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    pub fn current(&self) -> Option<Position> {
        self.index.map(|index| Position {
            index,
            total: self.markers.len(),
        })
    }

    pub fn is_active(&self) -> bool {
        !self.markers.is_empty()
    }

    /// Search for `term`, or advance when it is already the active term
    pub fn search<T: PageTreeMut>(&mut self, tree: &mut T, term: &str, lexicon: &Lexicon) -> SearchOutcome {
        if self.term.as_deref() == Some(term) && self.is_active() {
            if let Some(position) = self.highlight_next(tree) {
                return SearchOutcome::Advanced(position);
            }
            debug!("Every marker for \"{}\" is gone, searching again", term);
        }

        self.clear_all_highlights(tree);

        self.term = Some(term.to_string());
        self.variants = lexicon
            .search_variants(term)
            .into_iter()
            .filter(|entry| !entry.text.is_empty())
            .collect();

        self.find_and_highlight_all(tree);

        if self.markers.is_empty() {
            info!("🔍 No occurrences of \"{}\" on this page", term);
            self.reset();
            return SearchOutcome::NotFound {
                term: term.to_string(),
            };
        }

        self.index = None;
        match self.highlight_next(tree) {
            Some(position) => SearchOutcome::Found(position),
            None => {
                self.clear_all_highlights(tree);
                SearchOutcome::NotFound {
                    term: term.to_string(),
                }
            }
        }
    }

    /// Move to the next live marker, wrapping after the last
    pub fn highlight_next<T: PageTreeMut>(&mut self, tree: &mut T) -> Option<Position> {
        let total = self.markers.len();
        if total == 0 {
            return None;
        }

        if let Some(previous) = self.index.and_then(|i| self.markers.get(i)).copied() {
            if tree.is_attached(previous) {
                tree.set_emphasis(previous, Emphasis::Normal);
            }
        }

        for _ in 0..total {
            let next = self.index.map(|i| (i + 1) % total).unwrap_or(0);
            self.index = Some(next);

            let marker = self.markers[next];
            if !tree.is_attached(marker) {
                debug!("Skipping detached marker {}", next + 1);
                continue;
            }

            tree.set_emphasis(marker, Emphasis::Active);
            scroll_to_element(tree, marker);

            let position = Position { index: next, total };
            debug!("Showing occurrence {}", position);
            return Some(position);
        }

        warn!("All {} markers are detached", total);
        None
    }

    /// Remove every highlight marker in the tree and reset the session
    pub fn clear_all_highlights<T: PageTreeMut>(&mut self, tree: &mut T) {
        let root = tree.root();
        let markers: Vec<NodeId> = descendants(tree, root)
            .into_iter()
            .filter(|id| tree.tag(*id).is_some() && tree.has_class(*id, HIGHLIGHT_CLASS))
            .collect();

        for marker in &markers {
            if let Some(parent) = tree.unwrap_marker(*marker) {
                tree.normalize(parent);
            }
        }

        if !markers.is_empty() {
            debug!("Cleared {} highlights", markers.len());
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        self.term = None;
        self.variants.clear();
        self.markers.clear();
        self.index = None;
    }

    fn find_and_highlight_all<T: PageTreeMut>(&mut self, tree: &mut T) {
        let (boundary, mut symbol): (Vec<WordEntry>, Vec<WordEntry>) = self
            .variants
            .iter()
            .cloned()
            .partition(|entry| entry.kind == MatchKind::Boundary);

        debug!(
            "Search: {} boundary words, {} symbol words",
            boundary.len(),
            symbol.len()
        );

        if !boundary.is_empty() {
            let alternation = boundary
                .iter()
                .map(|entry| format!(r"\b{}\b", regex::escape(&entry.text)))
                .collect::<Vec<_>>()
                .join("|");
            if let Some(re) = compile(&format!("(?i)(?:{})", alternation)) {
                let found = highlight_matches(tree, &re);
                self.markers.extend(found);
            }
        }

        sort_longest_first(&mut symbol);
        for entry in &symbol {
            if let Some(re) = compile(&symbol_pattern(&entry.text)) {
                let found = highlight_matches(tree, &re);
                self.markers.extend(found);
            }
        }

        info!("🔍 Highlighted {} occurrences", self.markers.len());
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Search pattern failed to compile: {}", e);
            None
        }
    }
}

/// Wrap every match of `re` in qualifying text nodes, in document order
fn highlight_matches<T: PageTreeMut>(tree: &mut T, re: &Regex) -> Vec<NodeId> {
    let start = scan_root(tree);
    let candidates: Vec<NodeId> = descendants(tree, start)
        .into_iter()
        .filter(|id| accepts_text_node(tree, *id, re))
        .collect();

    debug!("Processing {} text nodes", candidates.len());

    let mut markers = Vec::new();
    for node in candidates {
        let ranges: Vec<_> = match tree.text(node) {
            Some(text) => re
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| m.range())
                .collect(),
            None => continue,
        };
        markers.extend(tree.wrap_ranges(node, &ranges, HIGHLIGHT_CLASS));
    }
    markers
}

fn accepts_text_node<T: PageTree>(tree: &T, node: NodeId, re: &Regex) -> bool {
    let Some(text) = tree.text(node) else {
        return false;
    };
    let Some(parent) = tree.parent(node) else {
        return false;
    };

    if matches!(tree.tag(parent), Some("script") | Some("style")) {
        return false;
    }
    let in_panel = tree
        .closest(parent, |t, id| {
            t.attr(id, "id") == Some(RESULTS_PANEL_ID) || t.has_class(id, PANEL_CLASS)
        })
        .is_some();
    if in_panel || tree.has_class(parent, HIGHLIGHT_CLASS) {
        return false;
    }
    if !is_visible(tree, parent) {
        return false;
    }

    re.is_match(text)
}

/// The `body` element when present, else the root
fn scan_root<T: PageTree>(tree: &T) -> NodeId {
    let root = tree.root();
    descendants(tree, root)
        .into_iter()
        .find(|id| tree.tag(*id) == Some("body"))
        .unwrap_or(root)
}

fn descendants<T: PageTree>(tree: &T, node: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.children(id).iter().rev());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Rect};
    use crate::lexicon::{WordCategories, SPECIAL_LIST_KEY};

    fn lexicon() -> Lexicon {
        let mut categories = WordCategories::new();
        categories.insert_list(
            SPECIAL_LIST_KEY.to_string(),
            vec!["fuck".to_string(), "f***".to_string(), "f***ing".to_string()],
        );
        categories.insert_list("PG_Language".to_string(), vec!["crap".to_string()]);
        Lexicon::from_categories(&categories)
    }

    /// body > p("Oh fuck, what the f***ing hell. Fuck!") + floating panel("fuck")
    fn page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let p = doc.append_element(body, "p");
        doc.append_text(p, "Oh fuck, what the f***ing hell. Fuck!");

        let panel = doc.append_element(body, "div");
        doc.set_attr(panel, "id", RESULTS_PANEL_ID);
        doc.set_attr(panel, "class", PANEL_CLASS);
        let cell = doc.append_element(panel, "span");
        doc.append_text(cell, "fuck(3)");
        (doc, p)
    }

    fn emphasis(doc: &Document, id: NodeId) -> Emphasis {
        doc.element(id).unwrap().emphasis
    }

    #[test]
    fn test_canonical_term_expands_to_special_list() {
        let (mut doc, _) = page();
        let mut session = SearchSession::new();

        let outcome = session.search(&mut doc, "fuck", &lexicon());
        assert_eq!(outcome, SearchOutcome::Found(Position { index: 0, total: 3 }));

        let texts: Vec<String> = session.markers().iter().map(|m| doc.text_content(*m)).collect();
        // boundary pass first, then the symbol pass
        assert_eq!(texts, vec!["fuck", "Fuck", "f***ing"]);
        assert_eq!(emphasis(&doc, session.markers()[0]), Emphasis::Active);
    }

    #[test]
    fn test_panel_content_is_skipped() {
        let (mut doc, _) = page();
        let mut session = SearchSession::new();
        session.search(&mut doc, "fuck", &lexicon());

        let panel = doc.find_by_id(RESULTS_PANEL_ID).unwrap();
        for marker in session.markers() {
            assert!(doc.closest(*marker, |_, id| id == panel).is_none());
        }
        assert!(doc.elements_with_class(HIGHLIGHT_CLASS).len() == 3);
    }

    #[test]
    fn test_same_term_advances_cyclically() {
        let (mut doc, _) = page();
        let mut session = SearchSession::new();
        let lexicon = lexicon();

        session.search(&mut doc, "fuck", &lexicon);
        let markers = session.markers().to_vec();

        let second = session.search(&mut doc, "fuck", &lexicon);
        assert_eq!(second, SearchOutcome::Advanced(Position { index: 1, total: 3 }));
        assert_eq!(second.to_string(), "2 of 3");
        assert_eq!(emphasis(&doc, markers[0]), Emphasis::Normal);
        assert_eq!(emphasis(&doc, markers[1]), Emphasis::Active);

        session.search(&mut doc, "fuck", &lexicon);
        let wrapped = session.search(&mut doc, "fuck", &lexicon);
        assert_eq!(wrapped.position(), Some(Position { index: 0, total: 3 }));
        // no rebuild happened
        assert_eq!(session.markers(), markers.as_slice());
    }

    #[test]
    fn test_clear_restores_text() {
        let (mut doc, p) = page();
        let body = doc.body();
        let before = doc.text_content(body);
        let mut session = SearchSession::new();

        session.search(&mut doc, "fuck", &lexicon());
        assert!(doc.children(p).len() > 1);

        session.clear_all_highlights(&mut doc);
        assert_eq!(doc.text_content(body), before);
        assert_eq!(doc.children(p).len(), 1);
        assert!(doc.elements_with_class(HIGHLIGHT_CLASS).is_empty());
        assert!(session.term().is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_new_term_replaces_previous_highlights() {
        let (mut doc, p) = page();
        doc.append_text(p, " That's crap.");
        let mut session = SearchSession::new();
        let lexicon = lexicon();

        session.search(&mut doc, "fuck", &lexicon);
        let outcome = session.search(&mut doc, "crap", &lexicon);

        assert_eq!(outcome, SearchOutcome::Found(Position { index: 0, total: 1 }));
        assert_eq!(doc.elements_with_class(HIGHLIGHT_CLASS).len(), 1);
        assert_eq!(session.term(), Some("crap"));
    }

    #[test]
    fn test_not_found_resets_session() {
        let (mut doc, _) = page();
        let mut session = SearchSession::new();

        let outcome = session.search(&mut doc, "zebra", &lexicon());
        assert_eq!(
            outcome,
            SearchOutcome::NotFound {
                term: "zebra".to_string()
            }
        );
        assert_eq!(
            outcome.to_string(),
            "No occurrences of \"zebra\" found on this page."
        );
        assert!(!session.is_active());
        assert!(session.term().is_none());
    }

    #[test]
    fn test_hidden_and_script_text_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let script = doc.append_element(body, "script");
        doc.append_text(script, "var crap = 1;");
        let hidden = doc.append_element(body, "div");
        doc.set_attr(hidden, "style", "display: none");
        doc.append_text(hidden, "crap");
        let collapsed = doc.append_element(body, "p");
        doc.set_rect(collapsed, Rect::new(0.0, 0.0, 0.0, 0.0));
        doc.append_text(collapsed, "crap");
        let shown = doc.append_element(body, "p");
        doc.append_text(shown, "CRAP");

        let mut session = SearchSession::new();
        let outcome = session.search(&mut doc, "crap", &lexicon());
        assert_eq!(outcome.position().map(|p| p.total), Some(1));
        assert_eq!(doc.parent(session.markers()[0]), Some(shown));
    }

    #[test]
    fn test_detached_marker_is_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append_element(body, "p");
        doc.append_text(first, "crap");
        let second = doc.append_element(body, "p");
        doc.append_text(second, "crap");

        let mut session = SearchSession::new();
        let lexicon = lexicon();
        session.search(&mut doc, "crap", &lexicon);
        doc.detach(second);

        let outcome = session.search(&mut doc, "crap", &lexicon);
        assert_eq!(outcome, SearchOutcome::Advanced(Position { index: 0, total: 2 }));
    }

    #[test]
    fn test_boundary_search_respects_word_edges() {
        let mut doc = Document::new();
        let body = doc.body();
        let p = doc.append_element(body, "p");
        doc.append_text(p, "crappy crap");

        let mut session = SearchSession::new();
        session.search(&mut doc, "crap", &lexicon());
        assert_eq!(session.markers().len(), 1);
        assert_eq!(doc.text_content(p), "crappy crap");
    }
}
