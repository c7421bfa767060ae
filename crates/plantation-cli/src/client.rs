//! HTTP client for the plantation server.

use anyhow::{bail, Context, Result};
use plantation_core::{CreateEstateRequest, CreateTreeRequest, Estate, EstateStats, FlightPlan};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreatedTree {
    id: Uuid,
}

/// Blocking client for the estate endpoints.
pub struct EstateClient {
    client: Client,
    base_url: String,
}

impl EstateClient {
    /// Create a client for a server such as `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn create_estate(&self, width: i64, length: i64) -> Result<Estate> {
        let response = self
            .client
            .post(format!("{}/estate", self.base_url))
            .json(&CreateEstateRequest { width, length })
            .send()
            .context("Failed to send create estate request")?;
        parse(response)
    }

    /// Plant a tree and return its ID.
    pub fn add_tree(&self, estate_id: &str, x: i64, y: i64, height: i64) -> Result<Uuid> {
        let response = self
            .client
            .post(format!("{}/estate/{}/tree", self.base_url, estate_id))
            .json(&CreateTreeRequest { x, y, height })
            .send()
            .context("Failed to send add tree request")?;
        let created: CreatedTree = parse(response)?;
        Ok(created.id)
    }

    pub fn stats(&self, estate_id: &str) -> Result<EstateStats> {
        let response = self
            .client
            .get(format!("{}/estate/{}/stats", self.base_url, estate_id))
            .send()
            .context("Failed to send stats request")?;
        parse(response)
    }

    pub fn drone_plan(&self, estate_id: &str, max_distance: Option<u64>) -> Result<FlightPlan> {
        let mut request = self
            .client
            .get(format!("{}/estate/{}/drone-plan", self.base_url, estate_id));
        if let Some(max_distance) = max_distance {
            request = request.query(&[("max_distance", max_distance)]);
        }
        let response = request.send().context("Failed to send drone plan request")?;
        parse(response)
    }
}

fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json().context("Failed to decode server response");
    }
    let message = response
        .json::<ErrorBody>()
        .map(|body| body.message)
        .unwrap_or_else(|_| "no error message".to_string());
    bail!("Server returned {}: {}", status, message)
}
