use anyhow::{anyhow, Context, Result};
use caption_assist::config::{Config, ReportFormat};
use caption_assist::dom::{Document, HtmlPage};
use caption_assist::lexicon::{preloaded_categories, Lexicon, WordCategories};
use caption_assist::report::ResultsTable;
use caption_assist::store::{load_word_categories, JsonFileStore};
use caption_assist::tracker::{scan_text, WordTracker};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const CAPTION_EXTENSIONS: &[&str] = &["vtt", "txt", "html", "htm"];

#[derive(Parser)]
#[command(name = "caption-assist")]
#[command(version, author = "TigreRoll")]
#[command(about = "Rate caption text against word lists and locate occurrences in pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to caption-assist.toml lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store file holding the word lists
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan caption files or directories and report matches
    Scan {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Caption element selector for HTML files
        #[arg(long)]
        selector: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },
    /// Highlight a word in an HTML page and step through its occurrences
    Locate {
        page: PathBuf,
        term: String,

        /// How many times to advance after the first match
        #[arg(long, default_value_t = 0)]
        steps: usize,

        /// Write the highlighted page here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the current timestamp shown in an HTML page
    Timestamp {
        page: PathBuf,

        /// Timestamp element selector
        #[arg(long)]
        selector: Option<String>,
    },
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    table: &'a ResultsTable,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(&path.to_string_lossy())?,
        None => Config::load()?,
    };
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }

    let level = if cli.verbose { "debug" } else { config.output.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("caption_assist={},warn", level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;
    info!("🚀 Caption Assist starting...");
    tracing::debug!("{}", config.summary());

    match cli.command {
        Commands::Scan { paths, selector, format } => {
            let categories = load_categories(&config).await?;
            let lexicon = Lexicon::from_categories(&categories);
            let selector = selector.unwrap_or_else(|| config.sites.caption.element.clone());
            let format = format.unwrap_or(config.output.format);
            scan_paths(&paths, &selector, format, &lexicon, &config)?;
        }
        Commands::Locate { page, term, steps, output } => {
            let categories = load_categories(&config).await?;
            let source = tokio::fs::read_to_string(&page)
                .await
                .with_context(|| format!("Cannot read {}", page.display()))?;

            let mut html = HtmlPage::parse(&source);
            let mut tracker = WordTracker::new(
                config.classifier.thresholds.clone(),
                config.sites.legacy.clone(),
            )
            .with_categories(categories);

            for _ in 0..=steps {
                let outcome = tracker.search(&mut html, &term);
                println!("{}", outcome);
                if outcome.position().is_none() {
                    break;
                }
            }

            if let Some(output) = output {
                tokio::fs::write(&output, html.to_html()).await?;
                info!("💾 Highlighted page written to {}", output.display());
            }
        }
        Commands::Timestamp { page, selector } => {
            let source = tokio::fs::read_to_string(&page)
                .await
                .with_context(|| format!("Cannot read {}", page.display()))?;
            let selector = selector.unwrap_or_else(|| config.sites.timestamp.element.clone());

            let html = HtmlPage::parse(&source);
            match WordTracker::copy_timestamp(&html, &selector)? {
                Some(timestamp) => println!("{}", timestamp),
                None => {
                    error!("❌ No timestamp found for {}", selector);
                    return Err(anyhow!("Timestamp element not found"));
                }
            }
        }
    }

    Ok(())
}

/// Stored word lists, falling back to the preloaded ones when the store has none
async fn load_categories(config: &Config) -> Result<WordCategories> {
    let store = JsonFileStore::new(&config.store.path);
    let categories = load_word_categories(&store)
        .await
        .with_context(|| format!("Cannot read store {}", config.store.path.display()))?;

    if categories.is_empty() {
        warn!(
            "No word lists in {}, using preloaded lists (run `lexicon-manager init` to persist them)",
            config.store.path.display()
        );
        return Ok(preloaded_categories());
    }
    Ok(categories)
}

fn caption_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let is_caption = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| CAPTION_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if entry.file_type().is_file() && is_caption {
                files.push(entry.into_path());
            }
        }
    }
    files
}

fn scan_paths(
    paths: &[PathBuf],
    selector: &str,
    format: ReportFormat,
    lexicon: &Lexicon,
    config: &Config,
) -> Result<()> {
    let files = caption_files(paths);
    info!("📁 Scanning {} caption files", files.len());

    let mut tables = Vec::new();
    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Cannot read {}", file.display()))?;

        let is_html = matches!(
            file.extension().and_then(|e| e.to_str()),
            Some("html") | Some("htm")
        );
        let text = if is_html {
            match HtmlPage::parse(&content).select_text(selector)? {
                Some(text) => text,
                None => {
                    warn!("Caption element {} not found in {}", selector, file.display());
                    continue;
                }
            }
        } else {
            content
        };

        let outcome = scan_text(&text, lexicon, &config.classifier.thresholds);
        tables.push((file.clone(), ResultsTable::from_outcome(&outcome)));
    }

    match format {
        ReportFormat::Text => {
            for (path, table) in &tables {
                println!("== {} ==", path.display());
                print!("{}", table.render_text());
            }
        }
        ReportFormat::Json => {
            let reports: Vec<FileReport> = tables
                .iter()
                .map(|(path, table)| FileReport { path, table })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        ReportFormat::Html => {
            for (_, table) in &tables {
                let mut doc = Document::new();
                if let Some(panel) = table.render_panel(&mut doc) {
                    println!("{}", doc.to_html(panel));
                }
            }
        }
    }

    info!("✅ Scanned {} files", tables.len());
    Ok(())
}
