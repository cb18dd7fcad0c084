use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser-like user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// How listings are pulled out of a results page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Read title, link and price from inside each listing card
    #[default]
    Container,
    /// Independent link, title and price passes over the whole page,
    /// zipped by position and checked for equal counts
    Legacy,
}

/// Request parameters for the storefront search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    /// Scheme and host, without trailing slash
    pub base_url: String,
    pub locale: String,
    /// Localized path segment of the search page
    pub search_path: String,
    /// Platform facet applied to every request
    pub platform: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub mode: ExtractionMode,
}

impl ScrapeParams {
    /// Search URL for one page of results
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/{}/{}/?type%5B0%5D={}&page={}",
            self.base_url, self.locale, self.search_path, self.platform, page
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            base_url: "https://www.instant-gaming.com".to_string(),
            locale: "fr".to_string(),
            search_path: "rechercher".to_string(),
            platform: "steam".to_string(),
            timeout_secs: 60,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mode: ExtractionMode::default(),
        }
    }
}
