/// Scan orchestration: caption text in, rated results and page state out
use crate::activation::{ActivationPlan, LegacyFallbacks};
use crate::classifier::{classify_special, ThresholdTable};
use crate::dom::HtmlPage;
use crate::duration::{extract_duration, DetectedDuration};
use crate::error::{CaptionError, Result};
use crate::lexicon::{CategoryKey, ContentCategory, Lexicon, RatingTier, WordCategories, CANONICAL_TERM};
use crate::locator::{SearchOutcome, SearchSession};
use crate::matcher::{ScanResult, WordMatcher};
use crate::messages::{Request, Response};
use crate::report::{self, ResultsTable};
use crate::store::{load_site_configs, load_word_categories, ConfigStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Everything one scan of a caption produced
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub duration: Option<DetectedDuration>,
    /// Raw Special List count, whether or not a tier was assigned
    pub special_total: usize,
    pub special_tier: Option<RatingTier>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanOutcome {
    /// Something matched or a duration was found
    pub fn is_reportable(&self) -> bool {
        !self.result.is_empty() || self.duration.is_some()
    }
}

/// Count, time and rate one caption text
pub fn scan_text(text: &str, lexicon: &Lexicon, thresholds: &ThresholdTable) -> ScanOutcome {
    let duration = extract_duration(text);
    let counts = WordMatcher::new(lexicon).count(text);
    let mut result = counts.result;

    let special_tier = classify_special(thresholds, counts.special_total, duration.as_ref());
    if let Some(tier) = special_tier {
        // the synthetic entry is authoritative for its cell
        result.insert(
            CategoryKey::new(tier, ContentCategory::Language),
            CANONICAL_TERM.to_string(),
            counts.special_total,
        );
    }

    debug!(
        "Scan: {} occurrences, special total {}, tier {:?}",
        result.total_occurrences(),
        counts.special_total,
        special_tier
    );

    ScanOutcome {
        result,
        duration,
        special_total: counts.special_total,
        special_tier,
        scanned_at: Utc::now(),
    }
}

/// Page-side state: loaded words, the last scan and the active search
#[derive(Debug, Default)]
pub struct WordTracker {
    categories: WordCategories,
    lexicon: Lexicon,
    thresholds: ThresholdTable,
    legacy: LegacyFallbacks,
    caption_selector: Option<String>,
    cached: Option<ScanOutcome>,
    session: SearchSession,
}

impl WordTracker {
    pub fn new(thresholds: ThresholdTable, legacy: LegacyFallbacks) -> Self {
        Self {
            thresholds,
            legacy,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, categories: WordCategories) -> Self {
        self.set_categories(categories);
        self
    }

    pub fn set_categories(&mut self, categories: WordCategories) {
        self.lexicon = Lexicon::from_categories(&categories);
        self.categories = categories;
        let stats = self.lexicon.stats();
        info!(
            "📚 Loaded {} words in {} lists",
            stats.total_words,
            stats.category_counts.len()
        );
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn cached(&self) -> Option<&ScanOutcome> {
        self.cached.as_ref()
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Decide what runs on `location`, then load words and scan the caption
    pub async fn initialize<S: ConfigStore + ?Sized>(
        &mut self,
        store: &S,
        page: &mut HtmlPage,
        location: &str,
    ) -> Result<ActivationPlan> {
        let sites = load_site_configs(store).await?;
        let plan = ActivationPlan::for_location(location, &sites.timestamp, &sites.caption, &self.legacy);

        if plan.is_inactive() {
            debug!("Nothing configured for {}", location);
            return Ok(plan);
        }

        if let Some(selector) = &plan.caption_selector {
            info!("🎬 Initializing word tracker for {}", location);
            self.caption_selector = Some(selector.clone());
            self.set_categories(load_word_categories(store).await?);

            if self.categories.is_empty() {
                report::render_no_words_prompt(page.document_mut());
            } else {
                self.scan_page(page, selector)?;
            }
        }

        Ok(plan)
    }

    /// Scan the element `selector` points at and show the results panel
    pub fn scan_page(&mut self, page: &mut HtmlPage, selector: &str) -> Result<Option<&ScanOutcome>> {
        let Some(text) = page.select_text(selector)? else {
            warn!("Caption element not found: {}", selector);
            return Ok(None);
        };
        if text.trim().is_empty() {
            info!("Caption element {} is empty, nothing to scan", selector);
            return Ok(None);
        }

        let outcome = scan_text(&text, &self.lexicon, &self.thresholds);
        ResultsTable::from_outcome(&outcome).render_panel(page.document_mut());

        self.cached = Some(outcome);
        Ok(self.cached.as_ref())
    }

    /// Redraw the last results, or reload the word lists from `store` and scan again
    pub async fn reopen<S: ConfigStore + ?Sized>(&mut self, store: &S, page: &mut HtmlPage) -> Result<bool> {
        if let Some(outcome) = &self.cached {
            if !self.categories.is_empty() {
                return Ok(ResultsTable::from_outcome(outcome)
                    .render_panel(page.document_mut())
                    .is_some());
            }
        }

        let Some(selector) = self.caption_selector.clone() else {
            debug!("No caption selector, nothing to reopen");
            return Ok(false);
        };

        // words may have been added since the last scan
        self.set_categories(load_word_categories(store).await?);
        if self.categories.is_empty() {
            report::render_no_words_prompt(page.document_mut());
            return Ok(true);
        }

        report::remove_no_words_prompt(page.document_mut());
        Ok(self
            .scan_page(page, &selector)?
            .map(ScanOutcome::is_reportable)
            .unwrap_or(false))
    }

    /// Highlight `term`, or step to its next occurrence
    pub fn search(&mut self, page: &mut HtmlPage, term: &str) -> SearchOutcome {
        let doc = page.document_mut();
        report::remove_position_indicator(doc);

        let outcome = self.session.search(doc, term, &self.lexicon);
        if let Some(position) = outcome.position() {
            report::render_position_indicator(doc, position);
        }
        outcome
    }

    /// Trimmed text of the timestamp element
    pub fn copy_timestamp(page: &HtmlPage, selector: &str) -> Result<Option<String>> {
        let text = page.select_text(selector)?;
        Ok(text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    pub async fn handle_message<S: ConfigStore + ?Sized>(
        &mut self,
        store: &S,
        page: &mut HtmlPage,
        request: Request,
    ) -> Result<Response> {
        match request {
            Request::ReopenWordTracker => {
                self.reopen(store, page).await?;
                Ok(Response::Ack { success: true })
            }
            other => Err(CaptionError::UnsupportedAction(other.action().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SPECIAL_LIST_KEY;
    use crate::locator::{Position, RESULTS_PANEL_ID};
    use crate::store::{save_word_categories, MemoryStore};

    fn categories() -> WordCategories {
        let mut categories = WordCategories::new();
        categories.insert_list(SPECIAL_LIST_KEY.into(), vec!["fuck".into(), "f***".into()]);
        categories.insert_list("PG_Language".into(), vec!["crap".into()]);
        categories
    }

    const PAGE: &str = r#"<html><body>
<div class="panel-body" id="full-caps">00:10:00.000 --> 00:10:02.000
Oh fuck. That's crap.
00:20:00.000 --> 00:20:03.000
f*** this.</div>
<span class="vjs-current-time-display"> 01:02:03 </span>
</body></html>"#;

    #[test]
    fn test_scan_text_assigns_special_tier() {
        let lexicon = Lexicon::from_categories(&categories());
        let outcome = scan_text(
            "00:20:00.000 fuck f*** crap fuck",
            &lexicon,
            &ThresholdTable::default(),
        );

        assert_eq!(outcome.special_total, 3);
        assert_eq!(outcome.special_tier, Some(RatingTier::Fifteen));
        let key = CategoryKey::new(RatingTier::Fifteen, ContentCategory::Language);
        assert_eq!(outcome.result.count(&key, CANONICAL_TERM), Some(3));
    }

    #[test]
    fn test_scan_text_without_duration_withholds_tier() {
        let lexicon = Lexicon::from_categories(&categories());
        let outcome = scan_text("fuck crap", &lexicon, &ThresholdTable::default());

        assert_eq!(outcome.special_total, 1);
        assert_eq!(outcome.special_tier, None);
        assert_eq!(outcome.duration, None);
        let pg = CategoryKey::new(RatingTier::PG, ContentCategory::Language);
        assert_eq!(outcome.result.count(&pg, "crap"), Some(1));
        assert_eq!(outcome.result.active_categories(), vec![ContentCategory::Language]);
    }

    #[tokio::test]
    async fn test_scan_page_and_reopen() {
        let mut page = HtmlPage::parse(PAGE);
        let mut tracker = WordTracker::default().with_categories(categories());

        let outcome = tracker.scan_page(&mut page, "div.panel-body#full-caps").unwrap().unwrap();
        assert_eq!(outcome.duration.as_ref().unwrap().total_minutes, 21);
        assert_eq!(outcome.special_tier, Some(RatingTier::Twelve));
        assert!(page.document().find_by_id(RESULTS_PANEL_ID).is_some());

        assert!(tracker.reopen(&MemoryStore::new(), &mut page).await.unwrap());
        let panels = page
            .document()
            .elements_with_class(crate::locator::PANEL_CLASS)
            .len();
        assert_eq!(panels, 1);
    }

    #[test]
    fn test_missing_caption_element() {
        let mut page = HtmlPage::parse(PAGE);
        let mut tracker = WordTracker::default().with_categories(categories());
        assert!(tracker.scan_page(&mut page, "#nothing").unwrap().is_none());
        assert!(tracker.cached().is_none());
    }

    #[test]
    fn test_search_skips_results_panel() {
        let mut page = HtmlPage::parse(PAGE);
        let mut tracker = WordTracker::default().with_categories(categories());
        tracker.scan_page(&mut page, "div.panel-body#full-caps").unwrap();

        // panel shows "fuck(2)" but only the caption occurrences count
        let outcome = tracker.search(&mut page, "fuck");
        assert_eq!(outcome, SearchOutcome::Found(Position { index: 0, total: 2 }));
        let indicator = page.document().find_by_id(report::POSITION_INDICATOR_ID).unwrap();
        assert_eq!(page.document().text_content(indicator), "1 of 2");

        let outcome = tracker.search(&mut page, "fuck");
        assert_eq!(outcome.to_string(), "2 of 2");
    }

    #[test]
    fn test_copy_timestamp() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(
            WordTracker::copy_timestamp(&page, ".vjs-current-time-display").unwrap(),
            Some("01:02:03".to_string())
        );
        assert_eq!(WordTracker::copy_timestamp(&page, "#missing").unwrap(), None);
    }

    #[tokio::test]
    async fn test_handle_reopen_message() {
        let store = MemoryStore::new();
        let mut page = HtmlPage::parse(PAGE);
        let mut tracker = WordTracker::default();
        let reply = tracker
            .handle_message(&store, &mut page, Request::ReopenWordTracker)
            .await
            .unwrap();
        assert_eq!(reply, Response::Ack { success: true });
        assert!(tracker
            .handle_message(&store, &mut page, Request::GetWordCategories)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_reopen_reloads_words_after_prompt() {
        let store = MemoryStore::new();
        let mut page = HtmlPage::parse(PAGE);
        let mut tracker = WordTracker::default();
        tracker.caption_selector = Some("div.panel-body#full-caps".to_string());

        assert!(tracker.reopen(&store, &mut page).await.unwrap());
        assert!(page.document().find_by_id(report::PROMPT_PANEL_ID).is_some());
        assert!(tracker.cached().is_none());

        save_word_categories(&store, &categories()).await.unwrap();
        assert!(tracker.reopen(&store, &mut page).await.unwrap());

        assert!(page.document().find_by_id(report::PROMPT_PANEL_ID).is_none());
        assert!(page.document().find_by_id(RESULTS_PANEL_ID).is_some());
        assert_eq!(tracker.cached().unwrap().special_total, 2);
    }
}
