pub mod http;
pub mod instant_gaming;
pub mod traits;
pub mod types;

pub use http::HttpFetcher;
pub use instant_gaming::InstantGamingScraper;
pub use traits::{PageFetcher, ScraperTrait};
pub use types::{ExtractionMode, ScrapeParams};
