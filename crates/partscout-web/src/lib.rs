use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use partscout::render::render;
use partscout::types::{OutputFormat, Vehicle, VehicleError};
use partscout::{ScraperError, WebScraper};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidParams(#[from] VehicleError),
    #[error("Search failed: {0}")]
    Scraper(#[from] ScraperError),
    #[error("Invalid response header: {0}")]
    InvalidHeader(#[from] header::InvalidHeaderValue),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidParams(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            e => {
                log::error!("Error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn router(scraper: WebScraper) -> Router {
    Router::new()
        .route("/", get(search_parts))
        .with_state(scraper)
        .layer(CorsLayer::permissive())
}

async fn search_parts(
    State(scraper): State<WebScraper>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let vehicle = Vehicle::from_parts(
        params.year.as_deref(),
        params.make.as_deref(),
        params.model.as_deref(),
    )?;
    let format = params
        .format
        .as_deref()
        .unwrap_or("html")
        .parse::<OutputFormat>()
        .unwrap_or_default();

    let listings = scraper.search_parts(&vehicle).await?;
    let rendered = render(format, &vehicle, &listings);

    let mut response =
        ([(header::CONTENT_TYPE, rendered.content_type)], rendered.body).into_response();
    if let Some(filename) = rendered.filename {
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))?;
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}
