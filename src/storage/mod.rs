use crate::error::{Error, Result};
use crate::models::{Listing, ListingColumns};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default table location, relative to the working directory
pub const DEFAULT_TABLE_PATH: &str = "game_prices.csv";

/// Column names in file order
pub const COLUMNS: [&str; 4] = ["Title", "Price", "Final Price", "Link"];

/// Token standing in for a missing price
pub const NO_PRICE: &str = "Pas de prix";

/// Listing table stored at a fixed path
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all listings, replacing any existing file
    pub fn save(&self, listings: &[Listing]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;

        for listing in listings {
            writer.write_record([
                listing.title.as_str(),
                format_price(listing.price).as_str(),
                format_price(listing.final_price).as_str(),
                listing.link.as_str(),
            ])?;
        }
        writer.flush()?;

        info!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }

    /// Write the column view, replacing any existing file
    pub fn save_columns(&self, columns: ListingColumns) -> Result<()> {
        self.save(&columns.into_listings())
    }

    /// Read back every listing in file order
    pub fn load(&self) -> Result<Vec<Listing>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: self.path.clone(),
            },
            _ => Error::Io(e),
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers().map_err(|e| self.malformed(e))?;
        if headers.iter().ne(COLUMNS) {
            return Err(self.malformed(format!(
                "expected header {:?}, found {:?}",
                COLUMNS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut listings = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.malformed(e))?;
            let row = index + 1;
            let price = parse_price_field(&record[1])
                .ok_or_else(|| self.malformed(format!("row {row}: bad price {:?}", &record[1])))?;
            let final_price = parse_price_field(&record[2]).ok_or_else(|| {
                self.malformed(format!("row {row}: bad final price {:?}", &record[2]))
            })?;

            listings.push(Listing {
                title: record[0].to_string(),
                price,
                final_price,
                link: record[3].to_string(),
            });
        }

        debug!("Loaded {} listings from {}", listings.len(), self.path.display());
        Ok(listings)
    }

    /// Read back the column view
    pub fn load_columns(&self) -> Result<ListingColumns> {
        Ok(self.load()?.into())
    }

    fn malformed(&self, reason: impl ToString) -> Error {
        Error::Malformed {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_PATH)
    }
}

/// Plain decimal text as stored in the table; whole amounts keep one
/// decimal (`12.0`)
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value.fract() == 0.0 => format!("{value:.1}"),
        Some(value) => value.to_string(),
        None => NO_PRICE.to_string(),
    }
}

/// Price as shown to users: the stored text with a currency suffix
pub fn display_price(price: Option<f64>) -> String {
    match price {
        Some(_) => format!("{}€", format_price(price)),
        None => NO_PRICE.to_string(),
    }
}

/// `Some(None)` for the no-price token, `None` when the field is not a price
fn parse_price_field(field: &str) -> Option<Option<f64>> {
    if field == NO_PRICE {
        return Some(None);
    }
    field.trim().parse::<f64>().ok().map(Some)
}
