use crate::error::Result;
use crate::models::Listing;
use async_trait::async_trait;

/// Common trait for all storefront scrapers
#[async_trait]
pub trait ScraperTrait: Send + Sync {
    /// Scrape listings from pages `1..=pages`
    async fn scrape(&self, pages: u32) -> Result<Vec<Listing>>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}

/// Source of raw HTML for one results page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String>;
}
