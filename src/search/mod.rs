use crate::error::Result;
use crate::models::Listing;
use crate::storage::TableStore;
use tracing::debug;

/// Case-insensitive title lookup over a saved listing table
pub struct DataSearcher {
    store: TableStore,
}

impl DataSearcher {
    pub fn new(store: TableStore) -> Self {
        Self { store }
    }

    /// Load the table and return listings whose title contains `query`
    pub fn search(&self, query: &str) -> Result<Vec<Listing>> {
        let listings = self.store.load()?;
        let total = listings.len();
        let matches = filter_by_title(listings, query);
        debug!("{:?} matched {} of {} listings", query, matches.len(), total);
        Ok(matches)
    }
}

/// Keep listings whose title contains `query`, ignoring case, in original
/// order. An empty query keeps everything.
pub fn filter_by_title(listings: Vec<Listing>, query: &str) -> Vec<Listing> {
    let needle = query.to_lowercase();
    listings
        .into_iter()
        .filter(|listing| listing.title.to_lowercase().contains(&needle))
        .collect()
}
