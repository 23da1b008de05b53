use anyhow::{Context, Result};
use caption_assist::config::Config;
use caption_assist::lexicon::{CategoryKey, Lexicon, SPECIAL_LIST_KEY};
use caption_assist::activation::SiteConfig;
use caption_assist::store::{
    apply_lifecycle_defaults, load_site_configs, load_word_categories, save_site_config, save_word_categories,
    InstallReason, JsonFileStore, LifecycleDefaults, SiteConfigs, SiteKind,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lexicon-manager")]
#[command(about = "Word list management utility")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store file (defaults to the configured store)
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored word lists
    List {
        /// Only this category, e.g. "12_Language"
        category: Option<CategoryKey>,
    },
    /// Add comma-separated words to a category
    Add {
        /// Category key, e.g. "PG_Drugs"
        category: CategoryKey,
        /// Comma-separated words
        words: String,
    },
    /// Delete comma-separated words from a category
    Delete {
        category: CategoryKey,
        words: String,
    },
    /// Seed preloaded words and default site configurations into an empty store
    Init,
    /// Merge preloaded words under the stored ones and add missing site configurations
    Update,
    /// Set where the caption scanner or the timestamp copier runs
    Sites {
        #[arg(value_enum)]
        kind: SiteKind,
        /// URL glob, e.g. "*://captions.example.com/*"
        url: String,
        /// CSS selector of the element to read
        element: String,
    },
    /// Show word list statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let path = cli.store.unwrap_or(config.store.path.clone());
    let store = JsonFileStore::new(&path);

    // configured sites replace both the install and the upgrade defaults
    let customized = config.sites.caption != SiteConfig::default_caption()
        || config.sites.timestamp != SiteConfig::default_timestamp();
    let defaults = if customized {
        LifecycleDefaults::default().with_sites(SiteConfigs {
            timestamp: config.sites.timestamp.clone(),
            caption: config.sites.caption.clone(),
        })
    } else {
        LifecycleDefaults::default()
    };

    match cli.command {
        Commands::List { category } => {
            let categories = load_word_categories(&store).await?;
            if categories.is_empty() {
                info!("📭 No word lists stored in {}", path.display());
                return Ok(());
            }

            let wanted = category.map(|key| key.storage_key());
            for (key, words) in categories.iter() {
                if wanted.as_ref().is_some_and(|w| w != key) {
                    continue;
                }
                let label = match key.parse::<CategoryKey>() {
                    Ok(parsed) => parsed.to_string(),
                    Err(_) if key == SPECIAL_LIST_KEY => "Special list".to_string(),
                    Err(_) => key.clone(),
                };
                println!("{} ({} words)", label, words.len());
                println!("  {}", words.join(", "));
            }
        }
        Commands::Add { category, words } => {
            let mut categories = load_word_categories(&store).await?;
            let added = categories.add_words(&category, &words)?;
            save_word_categories(&store, &categories)
                .await
                .with_context(|| format!("Error saving words to {}", path.display()))?;
            info!("✅ Added {} word(s) to {}", added, category);
        }
        Commands::Delete { category, words } => {
            let mut categories = load_word_categories(&store).await?;
            let deleted = categories.delete_words(&category, &words)?;
            save_word_categories(&store, &categories)
                .await
                .with_context(|| format!("Error saving words to {}", path.display()))?;
            if deleted == 0 {
                warn!("None of the words were in {}", category);
            } else {
                info!("🗑️ Deleted {} word(s) from {}", deleted, category);
            }
        }
        Commands::Init => {
            let written = apply_lifecycle_defaults(&store, InstallReason::Install, &defaults).await?;
            if written.is_empty() {
                info!("📦 Store {} already initialized", path.display());
            }
        }
        Commands::Update => {
            apply_lifecycle_defaults(&store, InstallReason::Update, &defaults).await?;
        }
        Commands::Sites { kind, url, element } => {
            save_site_config(&store, kind, &SiteConfig::new(url, element))
                .await
                .with_context(|| format!("Error saving {} configuration", kind))?;
        }
        Commands::Stats => {
            let categories = load_word_categories(&store).await?;
            let lexicon = Lexicon::from_categories(&categories);
            println!("{}", lexicon.stats().summary());

            let sites = load_site_configs(&store).await?;
            println!("Caption site: {} ({})", sites.caption.url, sites.caption.element);
            println!("Timestamp site: {} ({})", sites.timestamp.url, sites.timestamp.element);
        }
    }

    Ok(())
}
