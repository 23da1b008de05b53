/// Caption Assist - Rust Implementation
///
/// Scans caption text against rated word lists, classifies the Special List
/// by content duration, and locates word occurrences on a rendered page.

pub mod activation;
pub mod classifier;
pub mod config;
pub mod dom;
pub mod duration;
pub mod error;
pub mod lexicon;
pub mod locator;
pub mod matcher;
pub mod messages;
pub mod report;
pub mod store;
pub mod tracker;

// Re-export main types for easy access
pub use crate::activation::{ActivationPlan, SiteConfig, UrlPattern};
pub use crate::classifier::{classify_special, ThresholdTable};
pub use crate::config::Config;
pub use crate::dom::{Document, HtmlPage, NodeId, PageTree, PageTreeMut};
pub use crate::duration::{extract_duration, DetectedDuration};
pub use crate::error::{CaptionError, Result};
pub use crate::lexicon::{CategoryKey, ContentCategory, Lexicon, RatingTier, WordCategories};
pub use crate::locator::{Position, SearchOutcome, SearchSession};
pub use crate::matcher::{ScanResult, WordMatcher};
pub use crate::messages::{BackgroundHandler, Request, Response};
pub use crate::report::ResultsTable;
pub use crate::store::{ConfigStore, InstallReason, JsonFileStore, MemoryStore, SiteKind};
pub use crate::tracker::{scan_text, ScanOutcome, WordTracker};
