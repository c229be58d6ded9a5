//! The two collaborators the pipeline talks through: an HTTP GET and the
//! device-facing delivery sink.

use async_trait::async_trait;
use reqwest::{Client, Url, header::HeaderMap};
use std::fmt::Debug;

use crate::{
    error::{Result, WeatherError},
    model::Dictionary,
};

/// Single-attempt GET returning the response body.
#[async_trait]
pub trait HttpGet: Send + Sync + Debug {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<String>;
}

/// Fire-and-forget hand-off of a flattened summary to the device.
pub trait Deliver: Send + Sync {
    fn deliver(&self, dictionary: Dictionary);
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpGet for ReqwestTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<String> {
        tracing::debug!(%url, "GET");

        let res = self.http.get(url).headers(headers).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Provider { status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
