/// Rating lexicon: tier × category word lists plus the dynamically rated Special List
///
/// The persisted form keys each list by a combined string such as `"12_Language"`.
/// Those keys are parsed into structured [`CategoryKey`]s once, when a [`Lexicon`]
/// is built, and every entry is tagged with its [`MatchKind`] at the same time.

pub mod preloaded;

use crate::error::{CaptionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

pub use preloaded::{preloaded_categories, SPECIAL_VARIANTS};

/// Storage key of the Special List
pub const SPECIAL_LIST_KEY: &str = "SPECIAL_F_WORDS";

/// Term under which the Special List total is reported and searched
pub const CANONICAL_TERM: &str = "fuck";

/// Spellings that may only live in the Special List
const RESERVED_VARIANTS: &[&str] = &["fuck", "fucked", "fucking", "fucks", "fucker", "fuckin"];

/// Rating tiers, ordered by increasing severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingTier {
    #[serde(rename = "U")]
    U,
    #[serde(rename = "PG")]
    PG,
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "18")]
    Eighteen,
}

impl RatingTier {
    pub const ALL: [RatingTier; 5] = [
        RatingTier::U,
        RatingTier::PG,
        RatingTier::Twelve,
        RatingTier::Fifteen,
        RatingTier::Eighteen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::U => "U",
            RatingTier::PG => "PG",
            RatingTier::Twelve => "12",
            RatingTier::Fifteen => "15",
            RatingTier::Eighteen => "18",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RatingTier {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self> {
        RatingTier::ALL
            .iter()
            .copied()
            .find(|tier| tier.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CaptionError::InvalidCategoryKey(format!("unknown rating tier '{}'", s)))
    }
}

/// Content categories (table columns)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentCategory {
    Language,
    Discrimination,
    #[serde(rename = "Sex references")]
    SexReferences,
    #[serde(rename = "Sexual violence")]
    SexualViolence,
    Drugs,
    #[serde(rename = "Racial language")]
    RacialLanguage,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        ContentCategory::Language,
        ContentCategory::Discrimination,
        ContentCategory::SexReferences,
        ContentCategory::SexualViolence,
        ContentCategory::Drugs,
        ContentCategory::RacialLanguage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentCategory::Language => "Language",
            ContentCategory::Discrimination => "Discrimination",
            ContentCategory::SexReferences => "Sex references",
            ContentCategory::SexualViolence => "Sexual violence",
            ContentCategory::Drugs => "Drugs",
            ContentCategory::RacialLanguage => "Racial language",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentCategory {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self> {
        ContentCategory::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CaptionError::InvalidCategoryKey(format!("unknown content category '{}'", s)))
    }
}

/// A (rating tier, content category) cell of the rating table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub tier: RatingTier,
    pub category: ContentCategory,
}

impl CategoryKey {
    pub fn new(tier: RatingTier, category: ContentCategory) -> Self {
        Self { tier, category }
    }

    /// Persisted form, e.g. `"12_Sex references"`
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.tier.label(), self.category.label())
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.tier, self.category)
    }
}

impl FromStr for CategoryKey {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self> {
        let (tier, category) = s
            .split_once('_')
            .ok_or_else(|| CaptionError::InvalidCategoryKey(s.to_string()))?;
        Ok(Self::new(tier.parse()?, category.parse()?))
    }
}

/// How a lexicon entry is searched for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchKind {
    /// Word-boundary delimited, case-insensitive
    Boundary,
    /// Masked spelling: plain substring, case-insensitive
    Symbol,
}

impl MatchKind {
    /// Symbol words carry masking characters in place of letters
    pub fn classify(word: &str) -> Self {
        if word.trim().contains(['*', '-', '_']) {
            MatchKind::Symbol
        } else {
            MatchKind::Boundary
        }
    }
}

/// A single lexicon entry with its match strategy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub kind: MatchKind,
}

impl WordEntry {
    /// Entry for an ordinary category list, always boundary matched
    pub fn boundary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MatchKind::Boundary,
        }
    }

    /// Trimmed entry classified by its literal form
    pub fn classified(text: &str) -> Self {
        let text = text.trim();
        Self {
            text: text.to_string(),
            kind: MatchKind::classify(text),
        }
    }
}

/// Persisted word lists, keyed by storage key
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WordCategories(BTreeMap<String, Vec<String>>);

impl WordCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn insert_list(&mut self, key: String, words: Vec<String>) {
        self.0.insert(key, words);
    }

    /// Add comma-separated words to a category, skipping ones already present
    pub fn add_words(&mut self, key: &CategoryKey, input: &str) -> Result<usize> {
        let words = parse_word_input(input)?;
        let list = self.0.entry(key.storage_key()).or_default();

        let mut added = 0;
        for word in words {
            if !list.contains(&word) {
                list.push(word);
                added += 1;
            }
        }
        debug!("Added {} word(s) to {}", added, key);
        Ok(added)
    }

    /// Remove comma-separated words from a category, dropping the category once empty
    pub fn delete_words(&mut self, key: &CategoryKey, input: &str) -> Result<usize> {
        let words = parse_word_input(input)?;
        let storage_key = key.storage_key();
        let list = self
            .0
            .get_mut(&storage_key)
            .ok_or_else(|| CaptionError::CategoryNotFound(key.to_string()))?;

        let mut deleted = 0;
        for word in words {
            if let Some(index) = list.iter().position(|w| *w == word) {
                list.remove(index);
                deleted += 1;
            }
        }

        if list.is_empty() {
            self.0.remove(&storage_key);
        }
        debug!("Deleted {} word(s) from {}", deleted, key);
        Ok(deleted)
    }

    /// Overlay `self` (the user's lists) on `base`; user keys win
    pub fn merged_over(&self, base: &WordCategories) -> WordCategories {
        let mut merged = base.clone();
        for (key, words) in &self.0 {
            merged.0.insert(key.clone(), words.clone());
        }
        merged
    }
}

fn parse_word_input(input: &str) -> Result<Vec<String>> {
    let words: Vec<String> = input
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(CaptionError::EmptyWordList);
    }

    let reserved: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| RESERVED_VARIANTS.contains(w))
        .collect();
    if !reserved.is_empty() {
        return Err(CaptionError::ReservedWord(reserved.join(", ")));
    }

    Ok(words)
}

/// Lexicon resolved for scanning
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    lists: BTreeMap<CategoryKey, Vec<WordEntry>>,
    special: Vec<WordEntry>,
}

impl Lexicon {
    /// Resolve persisted word lists; malformed keys and blank entries are skipped
    pub fn from_categories(categories: &WordCategories) -> Self {
        let mut lexicon = Self::default();

        for (key, words) in categories.iter() {
            if key == SPECIAL_LIST_KEY {
                lexicon.special = words
                    .iter()
                    .filter(|w| !w.trim().is_empty())
                    .map(|w| WordEntry::classified(w))
                    .collect();
                continue;
            }

            let category_key = match key.parse::<CategoryKey>() {
                Ok(k) => k,
                Err(e) => {
                    warn!("Skipping word list with malformed key '{}': {}", key, e);
                    continue;
                }
            };

            let entries = words
                .iter()
                .filter(|w| !w.trim().is_empty())
                .map(|w| WordEntry::boundary(w.as_str()));
            lexicon.lists.entry(category_key).or_default().extend(entries);
        }

        lexicon
    }

    /// Lexicon built from the shipped defaults
    pub fn preloaded() -> Self {
        Self::from_categories(&preloaded_categories())
    }

    pub fn lists(&self) -> impl Iterator<Item = (&CategoryKey, &[WordEntry])> {
        self.lists.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn words(&self, key: &CategoryKey) -> &[WordEntry] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn special(&self) -> &[WordEntry] {
        &self.special
    }

    pub fn has_special(&self) -> bool {
        !self.special.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.values().all(Vec::is_empty) && self.special.is_empty()
    }

    /// Search set for a chosen term: the canonical term expands to every Special List variant
    pub fn search_variants(&self, term: &str) -> Vec<WordEntry> {
        if term == CANONICAL_TERM {
            if self.has_special() {
                return self.special.clone();
            }
            return SPECIAL_VARIANTS.iter().map(|w| WordEntry::classified(w)).collect();
        }
        vec![WordEntry::classified(term)]
    }

    pub fn stats(&self) -> LexiconStats {
        let category_counts: BTreeMap<CategoryKey, usize> =
            self.lists.iter().map(|(k, v)| (*k, v.len())).collect();

        LexiconStats {
            total_words: category_counts.values().sum::<usize>() + self.special.len(),
            special_words: self.special.len(),
            category_counts,
        }
    }
}

/// Statistics about a lexicon
#[derive(Debug, Clone)]
pub struct LexiconStats {
    pub total_words: usize,
    pub special_words: usize,
    pub category_counts: BTreeMap<CategoryKey, usize>,
}

impl LexiconStats {
    /// Generate a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Lexicon Stats:\n\
            - Total words: {}\n\
            - Special list variants: {}",
            self.total_words, self.special_words
        );
        for (key, count) in &self.category_counts {
            summary.push_str(&format!("\n- {}: {}", key, count));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_parsing() {
        let key: CategoryKey = "12_Sex references".parse().unwrap();
        assert_eq!(key.tier, RatingTier::Twelve);
        assert_eq!(key.category, ContentCategory::SexReferences);
        assert_eq!(key.storage_key(), "12_Sex references");

        assert!("Language".parse::<CategoryKey>().is_err());
        assert!("21_Language".parse::<CategoryKey>().is_err());
        assert!("PG_Violence".parse::<CategoryKey>().is_err());
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RatingTier::U < RatingTier::PG);
        assert!(RatingTier::Twelve < RatingTier::Fifteen);
        assert!(RatingTier::Fifteen < RatingTier::Eighteen);
    }

    #[test]
    fn test_match_kind_classification() {
        assert_eq!(MatchKind::classify("fuck"), MatchKind::Boundary);
        assert_eq!(MatchKind::classify("f word"), MatchKind::Boundary);
        assert_eq!(MatchKind::classify("f***ing"), MatchKind::Symbol);
        assert_eq!(MatchKind::classify("----"), MatchKind::Symbol);
        assert_eq!(MatchKind::classify("f-off"), MatchKind::Symbol);
        assert_eq!(MatchKind::classify("____in"), MatchKind::Symbol);
        assert_eq!(MatchKind::classify("  feck  "), MatchKind::Boundary);
    }

    #[test]
    fn test_lexicon_skips_bad_keys_and_blank_words() {
        let mut categories = WordCategories::new();
        categories.insert_list("PG_Language".into(), vec!["damn".into(), "   ".into(), "".into()]);
        categories.insert_list("bogus".into(), vec!["word".into()]);
        categories.insert_list(SPECIAL_LIST_KEY.into(), vec![" f***ing ".into(), "fuck".into(), " ".into()]);

        let lexicon = Lexicon::from_categories(&categories);
        let key = CategoryKey::new(RatingTier::PG, ContentCategory::Language);

        assert_eq!(lexicon.words(&key).len(), 1);
        assert_eq!(lexicon.lists().count(), 1);
        assert_eq!(lexicon.special().len(), 2);
        assert_eq!(lexicon.special()[0].text, "f***ing");
        assert_eq!(lexicon.special()[0].kind, MatchKind::Symbol);
        assert_eq!(lexicon.special()[1].kind, MatchKind::Boundary);
    }

    #[test]
    fn test_search_variants() {
        let lexicon = Lexicon::preloaded();
        let variants = lexicon.search_variants(CANONICAL_TERM);
        assert_eq!(variants.len(), SPECIAL_VARIANTS.len());

        let single = lexicon.search_variants("hell-");
        assert_eq!(single, vec![WordEntry { text: "hell-".into(), kind: MatchKind::Symbol }]);

        let empty = Lexicon::default();
        assert_eq!(empty.search_variants(CANONICAL_TERM).len(), SPECIAL_VARIANTS.len());
    }

    #[test]
    fn test_add_words() {
        let mut categories = WordCategories::new();
        let key = CategoryKey::new(RatingTier::U, ContentCategory::Drugs);

        assert_eq!(categories.add_words(&key, "Beer, wine ,, beer").unwrap(), 2);
        assert_eq!(categories.get("U_Drugs").unwrap(), &vec!["beer".to_string(), "wine".to_string()]);
        assert_eq!(categories.add_words(&key, "wine").unwrap(), 0);

        assert!(matches!(categories.add_words(&key, " , "), Err(CaptionError::EmptyWordList)));
        assert!(matches!(
            categories.add_words(&key, "gin, Fucking"),
            Err(CaptionError::ReservedWord(_))
        ));
        // rejected requests leave the list untouched
        assert_eq!(categories.get("U_Drugs").unwrap().len(), 2);
    }

    #[test]
    fn test_delete_words() {
        let mut categories = WordCategories::new();
        let key = CategoryKey::new(RatingTier::U, ContentCategory::Drugs);
        categories.add_words(&key, "beer, wine").unwrap();

        assert_eq!(categories.delete_words(&key, "beer, vodka").unwrap(), 1);
        assert_eq!(categories.delete_words(&key, "wine").unwrap(), 1);
        assert!(categories.get("U_Drugs").is_none());
        assert!(matches!(
            categories.delete_words(&key, "wine"),
            Err(CaptionError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_merge_prefers_user_lists() {
        let mut user = WordCategories::new();
        user.insert_list("U_Language".into(), vec!["darn".into()]);

        let merged = user.merged_over(&preloaded_categories());
        assert_eq!(merged.get("U_Language").unwrap(), &vec!["darn".to_string()]);
        assert!(merged.get(SPECIAL_LIST_KEY).is_some());
        assert!(merged.get("12_Drugs").is_some());
    }
}
