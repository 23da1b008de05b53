/// Results table and its HTML/text renderings
use crate::dom::{Document, NodeId};
use crate::duration::DetectedDuration;
use crate::lexicon::{CategoryKey, ContentCategory, RatingTier, CANONICAL_TERM};
use crate::locator::{Position, PANEL_CLASS, RESULTS_PANEL_ID};
use crate::tracker::ScanOutcome;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

pub const PROMPT_PANEL_ID: &str = "wordTrackerPrompt";
pub const POSITION_INDICATOR_ID: &str = "positionIndicator";
pub const CLICKABLE_WORD_CLASS: &str = "clickable-word";

const PANEL_TITLE: &str = "Caption Assist";

/// One matched word in a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellWord {
    pub word: String,
    pub count: usize,
}

impl CellWord {
    /// `fuck(n)` for the canonical term, `word: n` otherwise
    pub fn label(&self) -> String {
        if self.word == CANONICAL_TERM {
            format!("{}({})", self.word, self.count)
        } else {
            format!("{}: {}", self.word, self.count)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsRow {
    pub tier: RatingTier,
    /// One cell per active category, same order as [`ResultsTable::categories`]
    pub cells: Vec<Vec<CellWord>>,
}

/// Tier rows by content-category columns, limited to what matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsTable {
    pub categories: Vec<ContentCategory>,
    pub rows: Vec<ResultsRow>,
    pub duration: Option<DetectedDuration>,
    pub special_total: usize,
    pub special_tier: Option<RatingTier>,
}

impl ResultsTable {
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        let categories = outcome.result.active_categories();
        let rows = outcome
            .result
            .active_tiers(&categories)
            .into_iter()
            .map(|tier| ResultsRow {
                tier,
                cells: categories
                    .iter()
                    .map(|category| {
                        outcome
                            .result
                            .words(&CategoryKey::new(tier, *category))
                            .map(|words| {
                                words
                                    .iter()
                                    .map(|(word, count)| CellWord {
                                        word: word.clone(),
                                        count: *count,
                                    })
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect();

        Self {
            categories,
            rows,
            duration: outcome.duration.clone(),
            special_total: outcome.special_total,
            special_tier: outcome.special_tier,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Worth showing: something matched or a duration was found
    pub fn is_reportable(&self) -> bool {
        !self.is_empty() || self.duration.is_some()
    }

    pub fn duration_banner(&self) -> Option<String> {
        self.duration
            .as_ref()
            .map(|d| format!("Detected Content Duration: {}", d))
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(banner) = self.duration_banner() {
            let _ = writeln!(out, "{}", banner);
        }
        if self.is_empty() {
            let _ = writeln!(out, "No words matched.");
            return out;
        }

        for row in &self.rows {
            let _ = writeln!(out, "{}", row.tier);
            for (category, cell) in self.categories.iter().zip(&row.cells) {
                if cell.is_empty() {
                    continue;
                }
                let labels: Vec<String> = cell.iter().map(CellWord::label).collect();
                let _ = writeln!(out, "  {}: {}", category, labels.join(", "));
            }
        }
        out
    }

    /// Insert the floating results panel into `doc`, replacing any previous one
    pub fn render_panel(&self, doc: &mut Document) -> Option<NodeId> {
        if let Some(existing) = doc.find_by_id(RESULTS_PANEL_ID) {
            doc.detach(existing);
        }
        if !self.is_reportable() {
            debug!("Nothing to report, results panel not shown");
            return None;
        }

        let panel = floating_panel(doc, RESULTS_PANEL_ID);
        let content = doc.append_element(panel, "div");
        doc.set_attr(content, "class", "word-tracker-content");

        if let Some(banner) = self.duration_banner() {
            let div = doc.append_element(content, "div");
            doc.set_attr(div, "class", "duration-banner");
            doc.append_text(div, &banner);
        }

        if !self.is_empty() {
            self.render_table(doc, content);
        }

        let body = doc.body();
        doc.append_child(body, panel);
        Some(panel)
    }

    fn render_table(&self, doc: &mut Document, parent: NodeId) {
        let table = doc.append_element(parent, "table");
        doc.set_attr(table, "class", "results-table");

        let thead = doc.append_element(table, "thead");
        let header = doc.append_element(thead, "tr");
        let corner = doc.append_element(header, "th");
        doc.append_text(corner, "MR \\ CD");
        for category in &self.categories {
            let th = doc.append_element(header, "th");
            doc.append_text(th, category.label());
        }

        let tbody = doc.append_element(table, "tbody");
        for row in &self.rows {
            let tr = doc.append_element(tbody, "tr");
            let th = doc.append_element(tr, "th");
            doc.append_text(th, row.tier.label());

            for cell in &row.cells {
                let td = doc.append_element(tr, "td");
                for (i, entry) in cell.iter().enumerate() {
                    if i > 0 {
                        doc.append_element(td, "br");
                    }
                    let span = doc.append_element(td, "span");
                    doc.set_attr(span, "class", CLICKABLE_WORD_CLASS);
                    doc.set_attr(span, "data-word", &entry.word);
                    doc.append_text(span, &entry.label());
                }
            }
        }
    }
}

/// Panel shown when no word lists are configured
pub fn render_no_words_prompt(doc: &mut Document) -> NodeId {
    remove_no_words_prompt(doc);

    let panel = floating_panel(doc, PROMPT_PANEL_ID);
    let content = doc.append_element(panel, "div");
    doc.set_attr(content, "class", "word-tracker-content");
    let first = doc.append_element(content, "p");
    doc.append_text(
        first,
        "No words have been configured yet. Please set up your word categories using the extension popup.",
    );
    let second = doc.append_element(content, "p");
    doc.append_text(second, "Click the extension icon in your browser toolbar to get started.");

    let body = doc.body();
    doc.append_child(body, panel);
    panel
}

pub fn remove_no_words_prompt(doc: &mut Document) {
    if let Some(existing) = doc.find_by_id(PROMPT_PANEL_ID) {
        doc.detach(existing);
    }
}

/// Show `"n of total"`, replacing any previous indicator
pub fn render_position_indicator(doc: &mut Document, position: Position) -> NodeId {
    remove_position_indicator(doc);
    let body = doc.body();
    let indicator = doc.append_element(body, "div");
    doc.set_attr(indicator, "id", POSITION_INDICATOR_ID);
    doc.append_text(indicator, &position.to_string());
    indicator
}

pub fn remove_position_indicator(doc: &mut Document) {
    if let Some(existing) = doc.find_by_id(POSITION_INDICATOR_ID) {
        doc.detach(existing);
    }
}

/// Detached panel shell with header
fn floating_panel(doc: &mut Document, id: &str) -> NodeId {
    let panel = doc.create_element("div");
    doc.set_attr(panel, "id", id);
    doc.set_attr(panel, "class", PANEL_CLASS);

    let header = doc.append_element(panel, "div");
    doc.set_attr(header, "class", "word-tracker-header");
    let title = doc.append_element(header, "h3");
    doc.append_text(title, PANEL_TITLE);
    let close = doc.append_element(header, "button");
    doc.set_attr(close, "class", "close-btn");
    doc.append_text(close, "×");
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ThresholdTable;
    use crate::lexicon::{Lexicon, WordCategories, SPECIAL_LIST_KEY};
    use crate::tracker::scan_text;

    fn outcome(text: &str) -> ScanOutcome {
        let mut categories = WordCategories::new();
        categories.insert_list(SPECIAL_LIST_KEY.into(), vec!["fuck".into()]);
        categories.insert_list("PG_Language".into(), vec!["crap".into()]);
        categories.insert_list("12_Drugs".into(), vec!["weed".into()]);
        scan_text(text, &Lexicon::from_categories(&categories), &ThresholdTable::default())
    }

    #[test]
    fn test_table_shape() {
        let table = ResultsTable::from_outcome(&outcome("00:05:00.000 fuck, crap, weed, fuck"));

        assert_eq!(table.categories, vec![ContentCategory::Language, ContentCategory::Drugs]);
        let tiers: Vec<RatingTier> = table.rows.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![RatingTier::PG, RatingTier::Twelve, RatingTier::Fifteen]);

        // 2 occurrences in 5 minutes exceeds the 15-minute allowance of 1
        let fifteen = &table.rows[2];
        assert_eq!(fifteen.cells[0][0].label(), "fuck(2)");
        assert!(fifteen.cells[1].is_empty());
        assert_eq!(table.rows[0].cells[0][0].label(), "crap: 1");
    }

    #[test]
    fn test_render_text() {
        let table = ResultsTable::from_outcome(&outcome("00:05:00.000 crap"));
        let text = table.render_text();
        assert!(text.starts_with("Detected Content Duration: 00:05:00 (5 minutes)"));
        assert!(text.contains("PG\n  Language: crap: 1"));
    }

    #[test]
    fn test_render_panel_replaces_existing() {
        let table = ResultsTable::from_outcome(&outcome("crap"));
        let mut doc = Document::new();

        let first = table.render_panel(&mut doc).unwrap();
        let second = table.render_panel(&mut doc).unwrap();
        assert_ne!(first, second);
        assert_eq!(doc.find_by_id(RESULTS_PANEL_ID), Some(second));

        let words = doc.elements_with_class(CLICKABLE_WORD_CLASS);
        assert_eq!(words.len(), 1);
        assert_eq!(doc.attr(words[0], "data-word"), Some("crap"));
        assert_eq!(doc.text_content(words[0]), "crap: 1");
    }

    #[test]
    fn test_nothing_to_report() {
        let table = ResultsTable::from_outcome(&outcome("nothing here"));
        let mut doc = Document::new();
        assert!(!table.is_reportable());
        assert!(table.render_panel(&mut doc).is_none());
        assert!(doc.find_by_id(RESULTS_PANEL_ID).is_none());
    }

    #[test]
    fn test_duration_only_panel() {
        let table = ResultsTable::from_outcome(&outcome("00:01:00.000 --> 00:01:02.000"));
        let mut doc = Document::new();
        let panel = table.render_panel(&mut doc).unwrap();
        assert!(doc.text_content(panel).contains("Detected Content Duration: 00:01:02 (2 minutes)"));
        assert!(!doc.to_html(panel).contains("<table"));
    }

    #[test]
    fn test_position_indicator() {
        let mut doc = Document::new();
        render_position_indicator(&mut doc, Position { index: 0, total: 2 });
        let indicator = render_position_indicator(&mut doc, Position { index: 1, total: 2 });
        assert_eq!(doc.find_by_id(POSITION_INDICATOR_ID), Some(indicator));
        assert_eq!(doc.text_content(indicator), "2 of 2");

        remove_position_indicator(&mut doc);
        assert!(doc.find_by_id(POSITION_INDICATOR_ID).is_none());
    }
}
