use std::sync::LazyLock;

use regex::Regex;

use crate::types::ListingRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

static RE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<li class="s-item".*?>[\s\S]*?</li>"#).expect("invalid regex: item")
});

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<h3 class="s-item__title">(.*?)</h3>"#).expect("invalid regex: title")
});

static RE_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="s-item__price">\$([\d,\.]+)</span>"#)
        .expect("invalid regex: price")
});

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a.*?href="(https://www\.ebay\.com/itm/\d+)""#).expect("invalid regex: link")
});

static RE_ITEM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/itm/(\d+)").expect("invalid regex: item id"));

static RE_DECIMAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*(\.\d*)?").expect("invalid regex: decimal prefix"));

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("invalid regex: tag"));

/// Records recovered from one search results page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedPage {
    pub records: Vec<ListingRecord>,
    /// Fragments that looked like listings but were missing a field.
    pub dropped: usize,
}

pub fn parse_search_results(html: &str) -> ParsedPage {
    let mut page = ParsedPage::default();

    for fragment in RE_ITEM.find_iter(html) {
        match parse_listing_fragment(fragment.as_str()) {
            Ok(record) => page.records.push(record),
            Err(e) => {
                log::debug!("Dropping listing fragment at {}: {}", fragment.start(), e);
                page.dropped += 1;
            }
        }
    }

    page
}

pub fn parse_listing_fragment(fragment: &str) -> Result<ListingRecord, ParseError> {
    let title = RE_TITLE
        .captures(fragment)
        .ok_or(ParseError::MissingField("title"))?;
    let price = RE_PRICE
        .captures(fragment)
        .ok_or(ParseError::MissingField("price"))?;
    let link = RE_LINK
        .captures(fragment)
        .ok_or(ParseError::MissingField("link"))?;
    let id = RE_ITEM_ID
        .captures(&link[1])
        .ok_or(ParseError::MissingField("item id"))?;

    Ok(ListingRecord {
        title: strip_tags(&title[1]),
        price: parse_price(&price[1]),
        id: id[1].to_string(),
    })
}

fn strip_tags(text: &str) -> String {
    RE_TAG.replace_all(text, "").into_owned()
}

/// Reads the longest leading decimal number once thousands separators are
/// gone, so `1.2.3` is `1.2`. Captures with no digits at all become `NaN`.
fn parse_price(text: &str) -> f64 {
    let text = text.replace(',', "");
    RE_DECIMAL_PREFIX
        .find(&text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
