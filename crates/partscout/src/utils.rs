use crate::types::ListingRecord;

use std::collections::HashMap;

/// Collapses listings sharing a case-insensitive title. A later listing
/// replaces an earlier one but keeps the position where its title first
/// appeared.
pub fn dedup_by_title(listings: impl IntoIterator<Item = ListingRecord>) -> Vec<ListingRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<ListingRecord> = Vec::new();

    for listing in listings {
        let key = listing.title.to_lowercase();
        match positions.get(&key) {
            Some(&i) => deduped[i] = listing,
            None => {
                positions.insert(key, deduped.len());
                deduped.push(listing);
            }
        }
    }

    deduped
}

#[derive(Debug)]
pub struct ListingStats {
    pub total: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub mean_price: Option<f64>,
}

impl ListingStats {
    pub fn from_listings(listings: &[ListingRecord]) -> ListingStats {
        let prices = listings.iter().map(|l| l.price);
        let total = listings.len();

        ListingStats {
            total,
            min_price: prices.clone().reduce(f64::min),
            max_price: prices.clone().reduce(f64::max),
            mean_price: (total > 0).then(|| prices.sum::<f64>() / total as f64),
        }
    }
}

impl std::fmt::Display for ListingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Listings:      {}", self.total)?;
        if let (Some(min), Some(max), Some(mean)) = (self.min_price, self.max_price, self.mean_price)
        {
            writeln!(f, "  Lowest price:  ${:.2}", min)?;
            writeln!(f, "  Highest price: ${:.2}", max)?;
            writeln!(f, "  Mean price:    ${:.2}", mean)?;
        }
        Ok(())
    }
}
