use reqwest::{
    Url,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{Result, WeatherError},
    model::Coordinate,
    transport::HttpGet,
};

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim serializes coordinates as strings; other geocoders use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self, field: &str) -> Result<f64> {
        match self {
            Degrees::Number(v) => Ok(*v),
            Degrees::Text(s) => s.trim().parse().map_err(|e| WeatherError::malformed(field, e)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: Degrees,
    lon: Degrees,
}

/// Turns free text into the coordinates of the best geocoding match.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    transport: Arc<dyn HttpGet>,
    endpoint: Url,
    user_agent: HeaderValue,
}

impl LocationResolver {
    pub fn new(transport: Arc<dyn HttpGet>, endpoint: Url, user_agent: HeaderValue) -> Self {
        Self { transport, endpoint, user_agent }
    }

    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }

    pub async fn resolve(&self, query: &str) -> Result<Coordinate> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());

        let body = self.transport.get(self.request_url(query), headers).await?;
        let coordinate = parse_geocode(&body)?
            .ok_or_else(|| WeatherError::NotFound { query: query.to_string() })?;

        tracing::debug!(query, %coordinate, "Resolved location");
        Ok(coordinate)
    }
}

/// First (highest-ranked) hit of a geocoding response, `None` if there are none.
pub fn parse_geocode(body: &str) -> Result<Option<Coordinate>> {
    let hits: Vec<GeocodeHit> =
        serde_json::from_str(body).map_err(|e| WeatherError::malformed("geocoding response", e))?;

    hits.first()
        .map(|hit| Ok(Coordinate::new(hit.lat.value("lat")?, hit.lon.value("lon")?)))
        .transpose()
}
