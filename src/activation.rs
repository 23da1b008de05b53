/// URL gating for the caption scanner and the timestamp copier
use crate::error::{CaptionError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Glob over full page URLs; `*` matches any run of characters
#[derive(Debug, Clone)]
pub struct UrlPattern {
    glob: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn compile(glob: &str) -> Result<Self> {
        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = RegexBuilder::new(&format!("^{}$", body))
            .case_insensitive(true)
            .build()
            .map_err(|e| CaptionError::InvalidPattern(format!("{}: {}", glob, e)))?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, location: &str) -> bool {
        self.regex.is_match(location)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

/// Where a feature runs and which element it reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL glob
    pub url: String,
    /// CSS selector
    pub element: String,
}

impl SiteConfig {
    pub fn new(url: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            element: element.into(),
        }
    }

    pub fn default_caption() -> Self {
        Self::new("*://vcc-review-caption-alpha.corp*", "div.panel-body#full-caps")
    }

    pub fn default_timestamp() -> Self {
        Self::new("*://atv-optic-domain-tooling-prod-iad.iad.proxy*", ".vjs-current-time-display")
    }

    /// Caption configuration added for stores upgraded from a release without one
    pub fn upgrade_caption() -> Self {
        Self::new("*://vcc-review-caption-alpha.corp/*", "div.panel-body#full-caps")
    }

    pub fn upgrade_timestamp() -> Self {
        Self::new("*://atv-optic-domain-tooling-prod-iad.iad.proxy/*", ".vjs-current-time-display")
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Both a URL and a selector are set
    pub fn is_configured(&self) -> bool {
        self.has_url() && !self.element.trim().is_empty()
    }

    /// Selector to use on `location`, if this config applies there
    pub fn selector_for(&self, location: &str) -> Option<&str> {
        if !self.is_configured() {
            return None;
        }
        match UrlPattern::compile(&self.url) {
            Ok(pattern) if pattern.matches(location) => Some(self.element.as_str()),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring site configuration: {}", e);
                None
            }
        }
    }
}

/// Host-substring fallback used when no site configuration exists at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyHost {
    pub host_contains: String,
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFallbacks {
    pub caption: Option<LegacyHost>,
    pub timestamp: Option<LegacyHost>,
}

impl Default for LegacyFallbacks {
    fn default() -> Self {
        Self {
            caption: Some(LegacyHost {
                host_contains: "vcc-review-caption-alpha.corp".to_string(),
                element: "div.panel-body#full-caps".to_string(),
            }),
            timestamp: Some(LegacyHost {
                host_contains: "atv-optic-domain-tooling-prod-iad.iad.proxy".to_string(),
                element: ".vjs-current-time-display".to_string(),
            }),
        }
    }
}

impl LegacyHost {
    fn selector_for(&self, host: &str) -> Option<String> {
        host.contains(&self.host_contains).then(|| self.element.clone())
    }
}

/// Features active on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPlan {
    pub caption_selector: Option<String>,
    pub timestamp_selector: Option<String>,
}

impl ActivationPlan {
    pub fn for_location(
        location: &str,
        timestamp: &SiteConfig,
        caption: &SiteConfig,
        legacy: &LegacyFallbacks,
    ) -> Self {
        let mut plan = Self {
            caption_selector: caption.selector_for(location).map(str::to_string),
            timestamp_selector: timestamp.selector_for(location).map(str::to_string),
        };

        if !timestamp.has_url() && !caption.has_url() {
            let host = Url::parse(location)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string));

            if let Some(host) = host {
                plan.caption_selector = legacy.caption.as_ref().and_then(|l| l.selector_for(&host));
                plan.timestamp_selector = legacy.timestamp.as_ref().and_then(|l| l.selector_for(&host));
            }
        }

        debug!(
            "Activation for {}: caption={:?} timestamp={:?}",
            location, plan.caption_selector, plan.timestamp_selector
        );
        plan
    }

    pub fn is_inactive(&self) -> bool {
        self.caption_selector.is_none() && self.timestamp_selector.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matching() {
        let pattern = UrlPattern::compile("*://example.com/watch*").unwrap();
        assert!(pattern.matches("https://example.com/watch?v=1"));
        assert!(pattern.matches("HTTP://EXAMPLE.COM/watch"));
        // dots are literal
        assert!(!pattern.matches("https://exampleXcom/watch"));
        // anchored at both ends
        assert!(!pattern.matches("https://evil.test/?https://example.com/watch"));
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let pattern = UrlPattern::compile("https://a.test/(x)+[y]?").unwrap();
        assert!(pattern.matches("https://a.test/(x)+[y]?"));
        assert!(!pattern.matches("https://a.test/xx"));
    }

    #[test]
    fn test_configured_sites() {
        let caption = SiteConfig::new("*://captions.test/*", "#caps");
        let timestamp = SiteConfig::new("*://player.test/*", ".time");
        let legacy = LegacyFallbacks::default();

        let plan = ActivationPlan::for_location("https://captions.test/job/1", &timestamp, &caption, &legacy);
        assert_eq!(plan.caption_selector.as_deref(), Some("#caps"));
        assert_eq!(plan.timestamp_selector, None);

        let plan = ActivationPlan::for_location("https://other.test/", &timestamp, &caption, &legacy);
        assert!(plan.is_inactive());
    }

    #[test]
    fn test_blank_config_is_inactive() {
        let caption = SiteConfig::new("*://captions.test/*", "  ");
        let plan = ActivationPlan::for_location(
            "https://captions.test/a",
            &SiteConfig::default(),
            &caption,
            &LegacyFallbacks::default(),
        );
        assert!(plan.is_inactive());
    }

    #[test]
    fn test_legacy_fallback_without_any_url() {
        let none = SiteConfig::default();
        let plan = ActivationPlan::for_location(
            "https://vcc-review-caption-alpha.corp.example/review/9",
            &none,
            &none,
            &LegacyFallbacks::default(),
        );
        assert_eq!(plan.caption_selector.as_deref(), Some("div.panel-body#full-caps"));
        assert_eq!(plan.timestamp_selector, None);
    }

    #[test]
    fn test_default_site_configs_match_their_hosts() {
        let caption = SiteConfig::default_caption();
        assert_eq!(
            caption.selector_for("https://vcc-review-caption-alpha.corp.example/x"),
            Some("div.panel-body#full-caps")
        );
    }
}
