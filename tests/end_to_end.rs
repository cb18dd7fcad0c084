use async_trait::async_trait;
use game_prices::scrapers::{ExtractionMode, InstantGamingScraper, PageFetcher, ScraperTrait};
use game_prices::{DataSearcher, Listing, Result, TableStore};

const SINGLE_LISTING_PAGE: &str = r#"
    <html><body>
    <span class="title">Promotions</span>
    <span class="title">Meilleures ventes</span>
    <span class="title">Précommandes</span>
    <span class="title">Nouveautés</span>
    <div class="search listing-items">
        <div class="item">
            <a class="cover" href="https://www.instant-gaming.com/fr/42-stardew-valley/"></a>
            <div class="information">
                <div class="name"><span class="title">Stardew Valley</span></div>
                <div class="price">10,00€</div>
            </div>
        </div>
    </div>
    <div class="information">Paiement sécurisé</div>
    </body></html>
"#;

struct MockStorefront;

#[async_trait]
impl PageFetcher for MockStorefront {
    async fn fetch_page(&self, _page: u32) -> Result<String> {
        Ok(SINGLE_LISTING_PAGE.to_string())
    }
}

fn expected() -> Listing {
    Listing {
        title: "Stardew Valley".to_string(),
        price: Some(10.0),
        final_price: Some(12.0),
        link: "https://www.instant-gaming.com/fr/42-stardew-valley/".to_string(),
    }
}

#[tokio::test]
async fn test_scrape_save_load_search() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::TempDir::new()?;
    let store = TableStore::new(temp_dir.path().join("game_prices.csv"));

    for mode in [ExtractionMode::Container, ExtractionMode::Legacy] {
        let scraper = InstantGamingScraper::with_fetcher(MockStorefront, mode);
        let listings = scraper.scrape(1).await?;
        store.save(&listings)?;

        let results = DataSearcher::new(store.clone()).search("")?;
        assert_eq!(results, vec![expected()]);

        let results = DataSearcher::new(store.clone()).search("STARDEW")?;
        assert_eq!(results, vec![expected()]);
    }

    Ok(())
}

#[tokio::test]
async fn test_multi_page_columns_stay_aligned() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let scraper = InstantGamingScraper::with_fetcher(MockStorefront, ExtractionMode::Legacy);
    let (titles, prices, final_prices, links) = scraper.fetch_data(3).await?.into_parts();

    assert_eq!(titles.len(), 3);
    assert_eq!(prices.len(), 3);
    assert_eq!(final_prices.len(), 3);
    assert_eq!(links.len(), 3);
    assert!(final_prices.iter().all(|p| *p == Some(12.0)));

    Ok(())
}
