use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Missing year, make, or model query parameters.")]
pub struct VehicleError;

/// The vehicle a parts search is run for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub year: String,
    pub make: String,
    pub model: String,
}

impl Vehicle {
    /// Builds a vehicle from optional inputs, rejecting any that are absent or empty.
    pub fn from_parts(
        year: Option<&str>,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Result<Self, VehicleError> {
        match (year, make, model) {
            (Some(year), Some(make), Some(model))
                if !year.is_empty() && !make.is_empty() && !model.is_empty() =>
            {
                Ok(Self {
                    year: year.to_string(),
                    make: make.to_string(),
                    model: model.to_string(),
                })
            }
            _ => Err(VehicleError),
        }
    }
}

impl Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub price: f64,
    pub id: String,
}

impl ListingRecord {
    pub fn item_url(&self) -> String {
        format!("{}/itm/{}", crate::BASE_URL, self.id)
    }

    pub fn sell_similar_url(&self) -> String {
        format!(
            "{}/sl/list?mode=SellLikeItem&itemId={}",
            crate::BASE_URL,
            self.id
        )
    }
}

impl Display for ListingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - ${} ({})", self.title, self.price, self.item_url())
    }
}

/// Encoding of a rendered result set. Anything other than `csv` means HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    #[default]
    Html,
}

impl OutputFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Html => "text/html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            _ => Ok(OutputFormat::Html),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_requires_all_fields() {
        assert!(Vehicle::from_parts(Some("2015"), Some("Honda"), Some("Civic")).is_ok());
        assert_eq!(
            Vehicle::from_parts(None, Some("Honda"), Some("Civic")),
            Err(VehicleError)
        );
        assert_eq!(
            Vehicle::from_parts(Some("2015"), None, Some("Civic")),
            Err(VehicleError)
        );
        assert_eq!(
            Vehicle::from_parts(Some("2015"), Some("Honda"), Some("")),
            Err(VehicleError)
        );
    }

    #[test]
    fn test_output_format_defaults_to_html() {
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("pdf".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!(OutputFormat::default(), OutputFormat::Html);
    }

    #[test]
    fn test_listing_urls() {
        let record = ListingRecord {
            title: "Front Bumper".to_string(),
            price: 120.0,
            id: "1234567890".to_string(),
        };
        assert_eq!(record.item_url(), "https://www.ebay.com/itm/1234567890");
        assert_eq!(
            record.sell_similar_url(),
            "https://www.ebay.com/sl/list?mode=SellLikeItem&itemId=1234567890"
        );
        assert_eq!(
            record.to_string(),
            "Front Bumper - $120 (https://www.ebay.com/itm/1234567890)"
        );
    }
}
