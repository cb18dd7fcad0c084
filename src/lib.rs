pub mod error;
pub mod models;
pub mod scrapers;
pub mod search;
pub mod storage;

pub use error::{Error, Result};
pub use models::{Listing, ListingColumns};
pub use search::DataSearcher;
pub use storage::TableStore;
