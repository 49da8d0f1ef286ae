use crate::parser::parse_search_results;
use crate::query::{build_queries, search_url};
use crate::types::{ListingRecord, Vehicle};
use crate::utils::dedup_by_title;

use futures::{StreamExt, TryStreamExt, stream};
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
    concurrency: usize,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: crate::BASE_URL.to_string(),
            concurrency: 1,
        })
    }

    /// Points searches at another marketplace host, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Number of searches allowed in flight at once. Results are still
    /// consumed in query order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Runs every query variant for `vehicle` and returns the deduplicated
    /// listings. Any failed search fails the whole run.
    pub async fn search_parts(&self, vehicle: &Vehicle) -> Result<Vec<ListingRecord>, ScraperError> {
        log::info!("Fetching parts for {}", vehicle);

        let pages: Vec<Vec<ListingRecord>> = stream::iter(build_queries(vehicle))
            .map(|query| async move { self.fetch_listings(&query).await })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let listings = dedup_by_title(pages.into_iter().flatten());
        log::info!("Found {} unique listings for {}", listings.len(), vehicle);
        Ok(listings)
    }

    pub async fn fetch_listings(&self, query: &str) -> Result<Vec<ListingRecord>, ScraperError> {
        let url = search_url(&self.base_url, query).map_err(ScraperError::InvalidUrl)?;
        log::info!("Searching for '{}'", query);
        let html = self.get_html(url).await?;

        let page = parse_search_results(&html);
        if page.dropped > 0 {
            log::debug!(
                "Dropped {} incomplete listing(s) for '{}'",
                page.dropped,
                query
            );
        }
        Ok(page.records)
    }

    /// Block pages and error statuses still carry a body worth scanning, so
    /// only transport and decode failures are errors here.
    async fn get_html(&self, url: reqwest::Url) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?;
        if !response.status().is_success() {
            log::warn!("Search returned {} for {}", response.status(), response.url());
        }
        Ok(response
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QUERY_SUFFIXES;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn civic() -> Vehicle {
        Vehicle {
            year: "2015".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
        }
    }

    fn results_page(title: &str, price: &str, id: &str) -> String {
        format!(
            r#"<ul><li class="s-item"><a href="https://www.ebay.com/itm/{id}">
<h3 class="s-item__title">{title}</h3></a>
<span class="s-item__price">{price}</span></li></ul>"#
        )
    }

    async fn scraper_for(server: &MockServer) -> WebScraper {
        WebScraper::new()
            .expect("Failed to create scraper")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_search_parts_issues_one_request_per_query() {
        let server = MockServer::start().await;
        for suffix in QUERY_SUFFIXES {
            Mock::given(method("GET"))
                .and(path("/sch/i.html"))
                .and(query_param("_nkw", format!("2015 Honda Civic OEM {suffix}")))
                .and(query_param("LH_Sold", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(results_page(
                    &format!("Civic {suffix} trim"),
                    "$10.00",
                    "1",
                )))
                .expect(1)
                .mount(&server)
                .await;
        }

        let listings = scraper_for(&server)
            .await
            .search_parts(&civic())
            .await
            .expect("Search should succeed");

        assert_eq!(listings.len(), 8);
        assert_eq!(listings[0].title, "Civic used trim");
        assert_eq!(listings[7].title, "Civic lower trim");
    }

    #[tokio::test]
    async fn test_search_parts_dedups_across_queries_in_query_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("_nkw", "2015 Honda Civic OEM used"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(results_page(
                    "Front Bumper",
                    "$100.00",
                    "111",
                )),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("_nkw", "2015 Honda Civic OEM lower"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(results_page(
                    "front bumper",
                    "$80.00",
                    "888",
                )),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .with_priority(10)
            .mount(&server)
            .await;

        let listings = scraper_for(&server)
            .await
            .with_concurrency(8)
            .search_parts(&civic())
            .await
            .expect("Search should succeed");

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "888");
        assert_eq!(listings[0].price, 80.0);
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("_nkw", "2015 Honda Civic OEM center"))
            .respond_with(ResponseTemplate::new(503).set_body_string(results_page(
                "Center Console Lid",
                "$35.00",
                "503",
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("<html>Blocked</html>"))
            .with_priority(10)
            .mount(&server)
            .await;

        let listings = scraper_for(&server)
            .await
            .search_parts(&civic())
            .await
            .expect("Search should succeed");

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Center Console Lid");
        assert_eq!(listings[0].id, "503");
    }

    #[tokio::test]
    async fn test_search_parts_fails_on_transport_error() {
        let closed = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let base_url = format!("http://{}", closed.local_addr().expect("No local addr"));
        drop(closed);

        let result = WebScraper::new()
            .expect("Failed to create scraper")
            .with_base_url(base_url)
            .search_parts(&civic())
            .await;

        assert!(matches!(result, Err(ScraperError::Http(_))));
    }
}
