use crate::error::{Error, Result};
use crate::models::{Listing, ListingColumns};
use crate::scrapers::http::HttpFetcher;
use crate::scrapers::traits::{PageFetcher, ScraperTrait};
use crate::scrapers::types::{ExtractionMode, ScrapeParams};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

/// Number of `span.title` nodes at the top of every results page that sit
/// outside the listing grid. Only the legacy extraction skips them.
pub const TITLE_HEADER_NOISE_COUNT: usize = 4;

/// Currency symbol that terminates the amount in price text
const CURRENCY_SYMBOL: char = '€';

const LISTING_SELECTOR: &str = "div.item";
const COVER_SELECTOR: &str = "a.cover";
const TITLE_SELECTOR: &str = "span.title";
const INFORMATION_SELECTOR: &str = "div.information";
const PRICE_SELECTOR: &str = "div.price";

/// Instant Gaming search results scraper
pub struct InstantGamingScraper<F = HttpFetcher> {
    fetcher: F,
    mode: ExtractionMode,
}

impl InstantGamingScraper<HttpFetcher> {
    /// Create a scraper for the default Steam search
    pub fn new() -> Result<Self> {
        Self::with_params(ScrapeParams::default())
    }

    /// Create a scraper hitting the live storefront with custom parameters
    pub fn with_params(params: ScrapeParams) -> Result<Self> {
        let mode = params.mode;
        Ok(Self::with_fetcher(HttpFetcher::new(params)?, mode))
    }
}

impl<F: PageFetcher> InstantGamingScraper<F> {
    pub fn with_fetcher(fetcher: F, mode: ExtractionMode) -> Self {
        Self { fetcher, mode }
    }

    /// Scrape pages `1..=pages` and return the aligned column view.
    ///
    /// Pages are fetched one after another; the first failing page aborts the
    /// run and nothing gathered so far is returned.
    pub async fn fetch_data(&self, pages: u32) -> Result<ListingColumns> {
        Ok(self.scrape(pages).await?.into())
    }
}

#[async_trait]
impl<F: PageFetcher> ScraperTrait for InstantGamingScraper<F> {
    async fn scrape(&self, pages: u32) -> Result<Vec<Listing>> {
        info!("Starting {} scrape over {} page(s)", self.source_name(), pages);

        let mut listings = Vec::new();
        for page in 1..=pages {
            let html = self.fetcher.fetch_page(page).await?;
            let found = parse_page(&html, page, self.mode)?;
            info!("Page {}/{}: {} listings", page, pages, found.len());
            listings.extend(found);
        }

        info!("✅ Scraped {} listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Instant Gaming"
    }
}

/// Extract all listings from one results page
pub fn parse_page(html: &str, page: u32, mode: ExtractionMode) -> Result<Vec<Listing>> {
    let document = Html::parse_document(html);
    match mode {
        ExtractionMode::Container => parse_containers(&document),
        ExtractionMode::Legacy => parse_parallel_passes(&document, page),
    }
}

fn parse_containers(document: &Html) -> Result<Vec<Listing>> {
    let listing_selector = selector(LISTING_SELECTOR)?;
    let cover_selector = selector(COVER_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let price_selector = selector(PRICE_SELECTOR)?;

    let mut listings = Vec::new();
    for item in document.select(&listing_selector) {
        if !is_listing_card(item, &listing_selector, &cover_selector) {
            continue;
        }

        let title = first_in_card(item, &title_selector, &listing_selector)
            .map(element_text)
            .unwrap_or_default();
        if title.is_empty() {
            debug!("Skipping listing card without title");
            continue;
        }

        let link = first_in_card(item, &cover_selector, &listing_selector)
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let price =
            first_in_card(item, &price_selector, &listing_selector).and_then(listing_price);
        listings.push(Listing::new(title, price, link));
    }

    Ok(listings)
}

/// A card carries a cover link and is not nested inside another card
fn is_listing_card(
    item: ElementRef,
    listing_selector: &Selector,
    cover_selector: &Selector,
) -> bool {
    let nested = item
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| listing_selector.matches(&ancestor));
    if nested {
        debug!("Skipping item nested inside a listing card");
        return false;
    }
    first_in_card(item, cover_selector, listing_selector).is_some()
}

/// First match inside `card` that does not belong to a card nested in it
fn first_in_card<'a>(
    card: ElementRef<'a>,
    selector: &Selector,
    listing_selector: &Selector,
) -> Option<ElementRef<'a>> {
    card.select(selector).find(|element| {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| listing_selector.matches(ancestor))
            .map_or(true, |owner| owner.id() == card.id())
    })
}

/// Three independent passes zipped by position. The first
/// `TITLE_HEADER_NOISE_COUNT` titles and the last information block of the
/// page are not listings.
fn parse_parallel_passes(document: &Html, page: u32) -> Result<Vec<Listing>> {
    let cover_selector = selector(COVER_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let information_selector = selector(INFORMATION_SELECTOR)?;
    let price_selector = selector(PRICE_SELECTOR)?;

    let links: Vec<String> = document
        .select(&cover_selector)
        .map(|a| a.value().attr("href").unwrap_or_default().to_string())
        .collect();

    let titles: Vec<String> = document
        .select(&title_selector)
        .skip(TITLE_HEADER_NOISE_COUNT)
        .map(element_text)
        .collect();

    let information: Vec<ElementRef> = document.select(&information_selector).collect();
    let listing_blocks = information.len().saturating_sub(1);
    let prices: Vec<Option<f64>> = information[..listing_blocks]
        .iter()
        .map(|block| block.select(&price_selector).next().and_then(listing_price))
        .collect();

    if links.len() != titles.len() || titles.len() != prices.len() {
        warn!(
            "Page {} is misaligned: {} links, {} titles, {} prices",
            page,
            links.len(),
            titles.len(),
            prices.len()
        );
        return Err(Error::Misaligned {
            page,
            links: links.len(),
            titles: titles.len(),
            prices: prices.len(),
        });
    }

    Ok(titles
        .into_iter()
        .zip(prices)
        .zip(links)
        .map(|((title, price), link)| Listing::new(title, price, link))
        .collect())
}

/// Price of one listing; malformed text counts as no price
fn listing_price(element: ElementRef) -> Option<f64> {
    let text = element_text(element);
    match parse_price(&text) {
        Ok(price) => Some(price),
        Err(e) => {
            warn!("Treating listing as unpriced: {}", e);
            None
        }
    }
}

/// Parse storefront price text such as `19,99€` into euros
pub fn parse_price(text: &str) -> Result<f64> {
    let normalized = text.replace(',', ".");
    let amount = normalized.split(CURRENCY_SYMBOL).next().unwrap_or_default().trim();

    amount
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| Error::Price {
            text: text.to_string(),
        })
}

/// Text content with whitespace collapsed
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector {css:?}: {e}")))
}
