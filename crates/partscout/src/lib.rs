mod parser;
pub mod query;
pub mod render;
pub mod scraper;
pub mod types;
pub mod utils;

pub use parser::{ParseError, ParsedPage, parse_listing_fragment, parse_search_results};
pub use scraper::{ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "https://www.ebay.com";
