//! `ApplicationGateway` backed by the Cloud Controller v2 REST API.
//!
//! Authenticates with the token from the cf CLI's `config.json`. Token
//! refresh is out of scope: an expired token surfaces as a transport error
//! and the user re-runs `cf login`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::application::ports::ApplicationGateway;
use crate::domain::{ApplicationSnapshot, GatewayError, LifecycleState};
use crate::infra::cf_config::CfSession;

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AppList {
    #[serde(default)]
    resources: Vec<AppResource>,
}

#[derive(Debug, Deserialize)]
struct AppResource {
    metadata: Metadata,
    entity: AppEntity,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    guid: String,
}

#[derive(Debug, Deserialize)]
struct AppEntity {
    #[serde(default)]
    state: String,
    #[serde(default)]
    instances: u32,
}

#[derive(Debug, Default, Deserialize)]
struct AppSummary {
    #[serde(default)]
    running_instances: u32,
}

// ── Gateway ───────────────────────────────────────────────────────────────────

/// Gateway talking HTTP to the Cloud Controller of the targeted space.
pub struct CloudControllerGateway {
    client: reqwest::Client,
    base_url: String,
    token: String,
    space_guid: String,
    guids: Mutex<HashMap<String, String>>,
}

impl CloudControllerGateway {
    /// Build a gateway from a validated cf session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(session: &CfSession, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(session.ssl_disabled)
            .user_agent(concat!("scaleover/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: session.target.trim_end_matches('/').to_string(),
            token: session.access_token.clone(),
            space_guid: session.space.guid.clone(),
            guids: Mutex::new(HashMap::new()),
        })
    }

    fn cached_guid(&self, name: &str) -> Option<String> {
        self.guids.lock().ok()?.get(name).cloned()
    }

    fn remember_guid(&self, name: &str, guid: &str) {
        if let Ok(mut map) = self.guids.lock() {
            map.insert(name.to_string(), guid.to_string());
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        name: &str,
    ) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        let response = check_status(response, name).await?;
        Ok(response.json::<T>().await.map_err(GatewayError::transport)?)
    }

    async fn lookup(&self, name: &str) -> Result<AppResource> {
        let url = format!("{}/v2/spaces/{}/apps", self.base_url, self.space_guid);
        let list: AppList = self
            .get_json(&url, &[("q", format!("name:{name}"))], name)
            .await?;
        let resource = list
            .resources
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(name.to_string()))?;
        self.remember_guid(name, &resource.metadata.guid);
        Ok(resource)
    }

    async fn guid(&self, name: &str) -> Result<String> {
        if let Some(guid) = self.cached_guid(name) {
            return Ok(guid);
        }
        Ok(self.lookup(name).await?.metadata.guid)
    }

    async fn update(&self, name: &str, body: serde_json::Value) -> Result<()> {
        let guid = self.guid(name).await?;
        let url = format!("{}/v2/apps/{guid}", self.base_url);
        tracing::debug!(url, %body, "PUT");
        let response = self
            .client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        check_status(response, name).await?;
        Ok(())
    }
}

/// Map non-2xx responses onto gateway errors.
async fn check_status(response: reqwest::Response, name: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, name).into())
}

fn status_error(status: StatusCode, body: &str, name: &str) -> GatewayError {
    if status == StatusCode::NOT_FOUND || body.contains("CF-AppNotFound") {
        return GatewayError::NotFound(name.to_string());
    }
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("description").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());
    if detail.is_empty() {
        GatewayError::Transport(format!("Cloud Controller returned {status}"))
    } else {
        GatewayError::Transport(format!("Cloud Controller returned {status}: {detail}"))
    }
}

fn snapshot(name: &str, entity: &AppEntity, running: u32) -> ApplicationSnapshot {
    ApplicationSnapshot::new(
        name,
        LifecycleState::parse(&entity.state),
        running,
        entity.instances,
    )
}

impl ApplicationGateway for CloudControllerGateway {
    async fn fetch_application(&self, name: &str) -> Result<ApplicationSnapshot> {
        let resource = self.lookup(name).await?;
        let url = format!("{}/v2/apps/{}/summary", self.base_url, resource.metadata.guid);
        let summary: AppSummary = self.get_json(&url, &[], name).await?;
        Ok(snapshot(name, &resource.entity, summary.running_instances))
    }

    async fn set_instance_count(&self, name: &str, count: u32) -> Result<()> {
        self.update(name, json!({ "instances": count })).await
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.update(name, json!({ "state": "STARTED" })).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.update(name, json!({ "state": "STOPPED" })).await
    }
}
