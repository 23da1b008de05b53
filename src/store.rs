/// Persisted configuration: word lists and site configurations
use crate::activation::SiteConfig;
use crate::error::{CaptionError, Result};
use crate::lexicon::{preloaded_categories, WordCategories};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub const WORD_CATEGORIES_KEY: &str = "wordCategories";
pub const TIMESTAMP_CONFIG_KEY: &str = "timestampConfig";
pub const CAPTION_CONFIG_KEY: &str = "captionConfig";

/// Key-value store holding JSON values
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Values for the requested keys; absent keys are omitted
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Write every entry; on failure nothing is guaranteed to be written
    async fn set(&self, entries: Map<String, Value>) -> Result<()>;
}

/// Store kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Map<String, Value>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let data = self.data.read().await;
        Ok(select_keys(&data, keys))
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<()> {
        let mut data = self.data.write().await;
        data.extend(entries);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten whole on every `set`
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("Store file {} does not exist yet", self.path.display());
            return Ok(Map::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(CaptionError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl ConfigStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let data = self.read_all().await?;
        Ok(select_keys(&data, keys))
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read_all().await?;
        data.extend(entries);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json_content = serde_json::to_string_pretty(&Value::Object(data))?;
        tokio::fs::write(&self.path, json_content).await?;

        debug!("💾 Wrote store file {}", self.path.display());
        Ok(())
    }
}

fn select_keys(data: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| data.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// Stored word lists; missing or malformed data yields an empty set
pub async fn load_word_categories<S: ConfigStore + ?Sized>(store: &S) -> Result<WordCategories> {
    let mut values = store.get(&[WORD_CATEGORIES_KEY]).await?;
    let Some(value) = values.remove(WORD_CATEGORIES_KEY) else {
        return Ok(WordCategories::new());
    };

    match serde_json::from_value(value) {
        Ok(categories) => Ok(categories),
        Err(e) => {
            warn!("Stored word categories are malformed, treating as empty: {}", e);
            Ok(WordCategories::new())
        }
    }
}

pub async fn save_word_categories<S: ConfigStore + ?Sized>(store: &S, categories: &WordCategories) -> Result<()> {
    let mut entries = Map::new();
    entries.insert(WORD_CATEGORIES_KEY.to_string(), serde_json::to_value(categories)?);
    store.set(entries).await
}

/// Stored site configurations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfigs {
    pub timestamp: SiteConfig,
    pub caption: SiteConfig,
}

/// Which site configuration a setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SiteKind {
    Timestamp,
    Caption,
}

impl SiteKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            SiteKind::Timestamp => TIMESTAMP_CONFIG_KEY,
            SiteKind::Caption => CAPTION_CONFIG_KEY,
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteKind::Timestamp => f.write_str("Timestamp"),
            SiteKind::Caption => f.write_str("Caption"),
        }
    }
}

/// Trim and store one site configuration; both the URL and the selector are required
pub async fn save_site_config<S: ConfigStore + ?Sized>(
    store: &S,
    kind: SiteKind,
    config: &SiteConfig,
) -> Result<SiteConfig> {
    let trimmed = SiteConfig::new(config.url.trim(), config.element.trim());
    if !trimmed.is_configured() {
        return Err(CaptionError::IncompleteSiteConfig);
    }

    let mut entries = Map::new();
    entries.insert(kind.storage_key().to_string(), serde_json::to_value(&trimmed)?);
    store.set(entries).await?;

    info!("✅ {} configuration saved: {} ({})", kind, trimmed.url, trimmed.element);
    Ok(trimmed)
}

/// Timestamp and caption configurations; absent or malformed ones are blank
pub async fn load_site_configs<S: ConfigStore + ?Sized>(store: &S) -> Result<SiteConfigs> {
    let mut values = store.get(&[TIMESTAMP_CONFIG_KEY, CAPTION_CONFIG_KEY]).await?;
    Ok(SiteConfigs {
        timestamp: site_config(values.remove(TIMESTAMP_CONFIG_KEY), TIMESTAMP_CONFIG_KEY),
        caption: site_config(values.remove(CAPTION_CONFIG_KEY), CAPTION_CONFIG_KEY),
    })
}

fn site_config(value: Option<Value>, key: &str) -> SiteConfig {
    value
        .and_then(|value| match serde_json::from_value(value) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", key, e);
                None
            }
        })
        .unwrap_or_default()
}

/// Why the lifecycle hook runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    Install,
    Update,
}

/// Values seeded by the lifecycle hook
#[derive(Debug, Clone)]
pub struct LifecycleDefaults {
    pub words: WordCategories,
    /// Written on install when missing
    pub install_sites: SiteConfigs,
    /// Written on update when missing
    pub upgrade_sites: SiteConfigs,
}

impl LifecycleDefaults {
    /// Use the same site configurations for install and update
    pub fn with_sites(mut self, sites: SiteConfigs) -> Self {
        self.install_sites = sites.clone();
        self.upgrade_sites = sites;
        self
    }
}

impl Default for LifecycleDefaults {
    fn default() -> Self {
        Self {
            words: preloaded_categories(),
            install_sites: SiteConfigs {
                timestamp: SiteConfig::default_timestamp(),
                caption: SiteConfig::default_caption(),
            },
            upgrade_sites: SiteConfigs {
                timestamp: SiteConfig::upgrade_timestamp(),
                caption: SiteConfig::upgrade_caption(),
            },
        }
    }
}

/// Seed or upgrade the store. Returns the keys that were written.
pub async fn apply_lifecycle_defaults<S: ConfigStore + ?Sized>(
    store: &S,
    reason: InstallReason,
    defaults: &LifecycleDefaults,
) -> Result<Vec<String>> {
    let existing = store
        .get(&[WORD_CATEGORIES_KEY, TIMESTAMP_CONFIG_KEY, CAPTION_CONFIG_KEY])
        .await?;
    let mut updates = Map::new();
    let sites = match reason {
        InstallReason::Install => &defaults.install_sites,
        InstallReason::Update => &defaults.upgrade_sites,
    };

    match reason {
        InstallReason::Install => {
            if !existing.contains_key(WORD_CATEGORIES_KEY) {
                updates.insert(WORD_CATEGORIES_KEY.to_string(), serde_json::to_value(&defaults.words)?);
                info!("📚 Seeding preloaded word categories");
            }
        }
        InstallReason::Update => {
            let user_words = load_word_categories(store).await?;
            let merged = user_words.merged_over(&defaults.words);
            updates.insert(WORD_CATEGORIES_KEY.to_string(), serde_json::to_value(&merged)?);
            info!("📚 Merged preloaded word categories under {} user lists", user_words.keys().count());
        }
    }

    if !existing.contains_key(TIMESTAMP_CONFIG_KEY) {
        updates.insert(TIMESTAMP_CONFIG_KEY.to_string(), serde_json::to_value(&sites.timestamp)?);
    }
    if !existing.contains_key(CAPTION_CONFIG_KEY) {
        updates.insert(CAPTION_CONFIG_KEY.to_string(), serde_json::to_value(&sites.caption)?);
    }

    let written: Vec<String> = updates.keys().cloned().collect();
    if !updates.is_empty() {
        store.set(updates).await?;
        info!("✅ Store initialized ({:?}): {}", reason, written.join(", "));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        let mut entries = Map::new();
        entries.insert("a".into(), json!(1));
        store.set(entries).await.unwrap();

        let values = store.get(&["a", "b"]).await.unwrap();
        assert_eq!(values.get("a"), Some(&json!(1)));
        assert!(!values.contains_key("b"));
    }

    #[tokio::test]
    async fn test_malformed_values_read_as_blank() {
        let mut entries = Map::new();
        entries.insert(WORD_CATEGORIES_KEY.into(), json!("not a map"));
        entries.insert(CAPTION_CONFIG_KEY.into(), json!({"url": "*://x/*"}));
        entries.insert(TIMESTAMP_CONFIG_KEY.into(), json!(42));
        let store = MemoryStore::with_entries(entries);

        assert!(load_word_categories(&store).await.unwrap().is_empty());
        let sites = load_site_configs(&store).await.unwrap();
        assert_eq!(sites.caption.url, "*://x/*");
        assert!(!sites.caption.is_configured());
        assert_eq!(sites.timestamp, SiteConfig::default());
    }

    #[tokio::test]
    async fn test_install_seeds_missing_keys_only() {
        let store = MemoryStore::new();
        let custom = SiteConfig::new("*://mine/*", "#caps");
        let mut entries = Map::new();
        entries.insert(CAPTION_CONFIG_KEY.into(), serde_json::to_value(&custom).unwrap());
        store.set(entries).await.unwrap();

        let written = apply_lifecycle_defaults(&store, InstallReason::Install, &LifecycleDefaults::default())
            .await
            .unwrap();
        assert!(written.contains(&WORD_CATEGORIES_KEY.to_string()));
        assert!(!written.contains(&CAPTION_CONFIG_KEY.to_string()));

        let sites = load_site_configs(&store).await.unwrap();
        assert_eq!(sites.caption, custom);
        assert_eq!(sites.timestamp, SiteConfig::default_timestamp());
        assert!(!load_word_categories(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_seeds_upgrade_site_configs() {
        let store = MemoryStore::new();
        let mut entries = Map::new();
        entries.insert(WORD_CATEGORIES_KEY.into(), json!({}));
        store.set(entries).await.unwrap();

        apply_lifecycle_defaults(&store, InstallReason::Update, &LifecycleDefaults::default())
            .await
            .unwrap();
        let sites = load_site_configs(&store).await.unwrap();
        assert_eq!(sites.caption.url, "*://vcc-review-caption-alpha.corp/*");
        assert_eq!(sites.timestamp, SiteConfig::upgrade_timestamp());
    }

    #[tokio::test]
    async fn test_save_site_config_trims_and_requires_both_fields() {
        let store = MemoryStore::new();

        let blank_selector = SiteConfig::new("*://captions.test/*", "   ");
        assert!(matches!(
            save_site_config(&store, SiteKind::Caption, &blank_selector).await,
            Err(CaptionError::IncompleteSiteConfig)
        ));
        let blank_url = SiteConfig::new("", ".time");
        assert!(save_site_config(&store, SiteKind::Timestamp, &blank_url).await.is_err());
        assert!(store.get(&[CAPTION_CONFIG_KEY, TIMESTAMP_CONFIG_KEY]).await.unwrap().is_empty());

        let input = SiteConfig::new("  *://captions.test/*  ", " #caps ");
        let saved = save_site_config(&store, SiteKind::Caption, &input).await.unwrap();
        assert_eq!(saved, SiteConfig::new("*://captions.test/*", "#caps"));

        let sites = load_site_configs(&store).await.unwrap();
        assert_eq!(sites.caption, saved);
        assert_eq!(sites.timestamp, SiteConfig::default());
    }

    #[tokio::test]
    async fn test_update_merges_user_lists_over_defaults() {
        let store = MemoryStore::new();
        let mut user = WordCategories::new();
        user.insert_list("U_Language".into(), vec!["darn".into()]);
        save_word_categories(&store, &user).await.unwrap();

        let mut defaults = LifecycleDefaults::default();
        defaults.words = WordCategories::new();
        defaults.words.insert_list("U_Language".into(), vec!["heck".into()]);
        defaults.words.insert_list("PG_Drugs".into(), vec!["weed".into()]);

        apply_lifecycle_defaults(&store, InstallReason::Update, &defaults).await.unwrap();
        let words = load_word_categories(&store).await.unwrap();
        assert_eq!(words.get("U_Language").unwrap(), &vec!["darn".to_string()]);
        assert_eq!(words.get("PG_Drugs").unwrap(), &vec!["weed".to_string()]);
    }
}
