use html_escape::encode_text;

use crate::types::{ListingRecord, OutputFormat, Vehicle};

pub const CSV_HEADER: &str = "Title,Price,Item ID,Link";

/// A rendered result set ready to be written out or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedListings {
    pub content_type: &'static str,
    /// Suggested download name, only set for attachments.
    pub filename: Option<String>,
    pub body: String,
}

pub fn render(
    format: OutputFormat,
    vehicle: &Vehicle,
    listings: &[ListingRecord],
) -> RenderedListings {
    match format {
        OutputFormat::Csv => RenderedListings {
            content_type: format.content_type(),
            filename: Some(csv_filename(vehicle)),
            body: render_csv(listings),
        },
        OutputFormat::Html => RenderedListings {
            content_type: format.content_type(),
            filename: None,
            body: render_html(vehicle, listings),
        },
    }
}

pub fn csv_filename(vehicle: &Vehicle) -> String {
    format!(
        "ebay_{}_{}_{}.csv",
        vehicle.year, vehicle.make, vehicle.model
    )
}

/// Only the title is free text; price and id are numeric and the link is
/// rebuilt from the id, so those are written as-is.
pub fn render_csv(listings: &[ListingRecord]) -> String {
    let mut lines = Vec::with_capacity(listings.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(listings.iter().map(|l| {
        format!(
            "\"{}\",{},{},\"{}\"",
            l.title.replace('"', "\"\""),
            l.price,
            l.id,
            l.item_url()
        )
    }));
    lines.join("\n")
}

pub fn render_html(vehicle: &Vehicle, listings: &[ListingRecord]) -> String {
    let heading = format!("eBay Parts for {}", encode_text(&vehicle.to_string()));
    let items: String = listings
        .iter()
        .map(|l| {
            format!(
                r#"
    <div>
      <h3><a href="{}" target="_blank">{}</a> - ${}</h3>
      <a href="{}" target="_blank" title="Sell Similar">Sell Similar</a>
    </div>"#,
                l.item_url(),
                encode_text(&l.title),
                l.price,
                l.sell_similar_url()
            )
        })
        .collect();

    format!(
        r#"<html>
  <head><title>{heading}</title></head>
  <body>
    <h1>{heading}</h1>{items}
  </body>
</html>"#
    )
}
