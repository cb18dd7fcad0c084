use serde::{Deserialize, Serialize};

/// French VAT applied on top of the listed price
pub const TAX_RATE: f64 = 0.20;

/// One game entry scraped from a search results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    /// Listed price in euros, `None` when the listing shows no price
    pub price: Option<f64>,
    /// `price` with tax, rounded to cents
    pub final_price: Option<f64>,
    pub link: String,
}

impl Listing {
    /// Build a listing, deriving the taxed price from `price`
    pub fn new(title: impl Into<String>, price: Option<f64>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            final_price: price.map(final_price),
            link: link.into(),
        }
    }
}

/// Price with tax, rounded to 2 decimal places
pub fn final_price(price: f64) -> f64 {
    round_cents(price * (1.0 + TAX_RATE))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Column-oriented view of a set of listings.
///
/// The four sequences always have the same length and the Nth element of
/// each one describes the same listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingColumns {
    pub titles: Vec<String>,
    pub prices: Vec<Option<f64>>,
    pub final_prices: Vec<Option<f64>>,
    pub links: Vec<String>,
}

impl ListingColumns {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Sequences in (titles, prices, final_prices, links) order
    pub fn into_parts(self) -> (Vec<String>, Vec<Option<f64>>, Vec<Option<f64>>, Vec<String>) {
        (self.titles, self.prices, self.final_prices, self.links)
    }

    pub fn into_listings(self) -> Vec<Listing> {
        self.titles
            .into_iter()
            .zip(self.prices)
            .zip(self.final_prices)
            .zip(self.links)
            .map(|(((title, price), final_price), link)| Listing {
                title,
                price,
                final_price,
                link,
            })
            .collect()
    }
}

impl From<Vec<Listing>> for ListingColumns {
    fn from(listings: Vec<Listing>) -> Self {
        let mut columns = ListingColumns::default();
        for listing in listings {
            columns.titles.push(listing.title);
            columns.prices.push(listing.price);
            columns.final_prices.push(listing.final_price);
            columns.links.push(listing.link);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_price_rounds_to_cents() {
        assert!((final_price(19.99) - 23.99).abs() < 1e-9);
        assert!((final_price(10.0) - 12.0).abs() < 1e-9);
        assert!((final_price(0.01) - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_missing_price_has_no_final_price() {
        let listing = Listing::new("Hades", None, "/fr/1-hades");
        assert_eq!(listing.price, None);
        assert_eq!(listing.final_price, None);

        let listing = Listing::new("Hades", Some(19.99), "/fr/1-hades");
        assert_eq!(listing.final_price, Some(23.99));
    }

    #[test]
    fn test_columns_stay_aligned() {
        let listings = vec![
            Listing::new("Celeste", Some(4.5), "a"),
            Listing::new("Tunic", None, "b"),
        ];
        let columns = ListingColumns::from(listings.clone());
        assert_eq!(columns.len(), 2);

        let (titles, prices, final_prices, links) = columns.clone().into_parts();
        assert_eq!(titles, vec!["Celeste", "Tunic"]);
        assert_eq!(prices, vec![Some(4.5), None]);
        assert_eq!(final_prices, vec![Some(5.4), None]);
        assert_eq!(links, vec!["a", "b"]);

        assert_eq!(columns.into_listings(), listings);
    }
}
