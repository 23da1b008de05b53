/// Cross-context request/response messages
use crate::activation::SiteConfig;
use crate::error::{CaptionError, Result};
use crate::lexicon::WordCategories;
use crate::store::{load_site_configs, load_word_categories, ConfigStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetWordCategories,
    GetConfigurations,
    ReopenWordTracker,
}

impl Request {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn action(&self) -> &'static str {
        match self {
            Request::GetWordCategories => "getWordCategories",
            Request::GetConfigurations => "getConfigurations",
            Request::ReopenWordTracker => "reopenWordTracker",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    #[serde(rename_all = "camelCase")]
    WordCategories { word_categories: WordCategories },
    #[serde(rename_all = "camelCase")]
    Configurations {
        timestamp_config: SiteConfig,
        caption_config: SiteConfig,
    },
    Ack { success: bool },
}

impl Response {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Answers store-backed requests
pub struct BackgroundHandler<S: ConfigStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ConfigStore + ?Sized> BackgroundHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, request: Request) -> Result<Response> {
        debug!("Handling {}", request.action());
        match request {
            Request::GetWordCategories => Ok(Response::WordCategories {
                word_categories: load_word_categories(self.store.as_ref()).await?,
            }),
            Request::GetConfigurations => {
                let sites = load_site_configs(self.store.as_ref()).await?;
                Ok(Response::Configurations {
                    timestamp_config: sites.timestamp,
                    caption_config: sites.caption,
                })
            }
            Request::ReopenWordTracker => Err(CaptionError::UnsupportedAction(request.action().to_string())),
        }
    }

    /// Parse, handle and serialize one message
    pub async fn handle_json(&self, raw: &str) -> Result<String> {
        let request = Request::from_json(raw)?;
        self.handle(request).await?.to_json()
    }
}
