/// Word occurrence counting over caption text
use crate::lexicon::{CategoryKey, ContentCategory, Lexicon, MatchKind, RatingTier, WordEntry};
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, warn};

/// Per-cell word counts produced by one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    cells: BTreeMap<CategoryKey, BTreeMap<String, usize>>,
}

impl ScanResult {
    pub(crate) fn insert(&mut self, key: CategoryKey, word: String, count: usize) {
        self.cells.entry(key).or_default().insert(word, count);
    }

    /// Words and counts recorded for a cell
    pub fn words(&self, key: &CategoryKey) -> Option<&BTreeMap<String, usize>> {
        self.cells.get(key).filter(|words| !words.is_empty())
    }

    pub fn count(&self, key: &CategoryKey, word: &str) -> Option<usize> {
        self.cells.get(key).and_then(|words| words.get(word)).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CategoryKey, &BTreeMap<String, usize>)> {
        self.cells.iter().filter(|(_, words)| !words.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    /// Content categories with at least one matched word, in table order
    pub fn active_categories(&self) -> Vec<ContentCategory> {
        ContentCategory::ALL
            .into_iter()
            .filter(|category| {
                RatingTier::ALL
                    .iter()
                    .any(|tier| self.words(&CategoryKey::new(*tier, *category)).is_some())
            })
            .collect()
    }

    /// Tiers with at least one matched word in any of `categories`
    pub fn active_tiers(&self, categories: &[ContentCategory]) -> Vec<RatingTier> {
        RatingTier::ALL
            .into_iter()
            .filter(|tier| {
                categories
                    .iter()
                    .any(|category| self.words(&CategoryKey::new(*tier, *category)).is_some())
            })
            .collect()
    }

    /// Total occurrences across every cell
    pub fn total_occurrences(&self) -> usize {
        self.cells.values().flat_map(|words| words.values()).sum()
    }
}

/// Output of [`WordMatcher::count`]
#[derive(Debug, Clone, Default)]
pub struct MatchCounts {
    pub result: ScanResult,
    /// Raw Special List total across all variants
    pub special_total: usize,
    /// Non-zero Special List counts per variant, for diagnostics
    pub special_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    word: String,
    regex: Option<Regex>,
}

impl CompiledEntry {
    fn compile(entry: &WordEntry) -> Self {
        let pattern = match entry.kind {
            MatchKind::Boundary => boundary_pattern(&entry.text),
            MatchKind::Symbol => symbol_pattern(&entry.text),
        };
        let regex = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Word '{}' will never match, pattern failed to compile: {}", entry.text, e);
                None
            }
        };
        Self {
            word: entry.text.clone(),
            regex,
        }
    }

    fn count(&self, text: &str) -> usize {
        self.regex
            .as_ref()
            .map(|re| re.find_iter(text).filter(|m| !m.is_empty()).count())
            .unwrap_or(0)
    }
}

/// Case-insensitive, word-boundary delimited pattern
pub fn boundary_pattern(word: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(word))
}

/// Case-insensitive substring pattern for masked spellings
pub fn symbol_pattern(word: &str) -> String {
    format!("(?i){}", regex::escape(word))
}

/// Order symbol words longest first so a longer masked spelling claims its span
/// before a shorter one contained in it
pub fn sort_longest_first(entries: &mut [WordEntry]) {
    entries.sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));
}

/// Lexicon compiled for counting
#[derive(Debug, Clone)]
pub struct WordMatcher {
    lists: Vec<(CategoryKey, Vec<CompiledEntry>)>,
    special_boundary: Vec<CompiledEntry>,
    special_symbol: Vec<CompiledEntry>,
}

impl WordMatcher {
    pub fn new(lexicon: &Lexicon) -> Self {
        let lists = lexicon
            .lists()
            .map(|(key, entries)| (*key, entries.iter().map(CompiledEntry::compile).collect()))
            .collect();

        let (boundary, mut symbol): (Vec<WordEntry>, Vec<WordEntry>) = lexicon
            .special()
            .iter()
            .cloned()
            .partition(|entry| entry.kind == MatchKind::Boundary);
        sort_longest_first(&mut symbol);

        debug!(
            "Special list: {} boundary words, {} symbol words",
            boundary.len(),
            symbol.len()
        );

        Self {
            lists,
            special_boundary: boundary.iter().map(CompiledEntry::compile).collect(),
            special_symbol: symbol.iter().map(CompiledEntry::compile).collect(),
        }
    }

    /// Count every lexicon word in `text`
    pub fn count(&self, text: &str) -> MatchCounts {
        let mut counts = MatchCounts::default();
        if text.trim().is_empty() {
            return counts;
        }

        let lower = text.to_lowercase();
        self.count_special(&lower, &mut counts);

        for (key, entries) in &self.lists {
            for entry in entries {
                let occurrences = entry.count(&lower);
                if occurrences > 0 {
                    counts.result.insert(*key, entry.word.clone(), occurrences);
                }
            }
        }

        counts
    }

    fn count_special(&self, text: &str, counts: &mut MatchCounts) {
        for entry in &self.special_boundary {
            let occurrences = entry.count(text);
            if occurrences > 0 {
                debug!("Boundary word \"{}\": {} matches", entry.word, occurrences);
                counts.special_total += occurrences;
                *counts.special_breakdown.entry(entry.word.clone()).or_default() += occurrences;
            }
        }

        // Spans already counted by a longer symbol word in this pass
        let mut claimed: Vec<Range<usize>> = Vec::new();

        for entry in &self.special_symbol {
            let Some(re) = &entry.regex else {
                continue;
            };

            let mut occurrences = 0;
            for m in re.find_iter(text) {
                let span = m.range();
                if span.is_empty() || overlaps_any(&span, &claimed) {
                    continue;
                }
                claimed.push(span);
                occurrences += 1;
            }

            if occurrences > 0 {
                debug!("Symbol word \"{}\": {} matches", entry.word, occurrences);
                counts.special_total += occurrences;
                *counts.special_breakdown.entry(entry.word.clone()).or_default() += occurrences;
            }
        }

        debug!("Total special list occurrences: {}", counts.special_total);
    }
}

fn overlaps_any(span: &Range<usize>, claimed: &[Range<usize>]) -> bool {
    claimed.iter().any(|c| span.start < c.end && span.end > c.start)
}
