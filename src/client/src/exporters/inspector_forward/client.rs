use super::error::{InspectorForwardError, InspectorForwardResult};
use crate::config_manager::Config;
use crate::exporters::event_writer::EventWriter;
use chrono::Utc;
use inspector_common::payload::{session_started, OutgoingPayload, PayloadContext};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Headers sent with every request, computed once at setup.
pub fn default_headers(config: &Config) -> InspectorForwardResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert("env", header_value("env", &config.environment)?);
    headers.insert("api-key", header_value("api-key", &config.avo_api_key)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> InspectorForwardResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| InspectorForwardError::InvalidHeader { name })
}

/// Check the body of the batch call: it has to be JSON and must not say `"ok": false`.
fn check_batch_response(body: &str) -> InspectorForwardResult<()> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| InspectorForwardError::InvalidResponse {
            body: body.to_string(),
        })?;

    if value.get("ok") == Some(&Value::Bool(false)) {
        return Err(InspectorForwardError::Rejected {
            body: body.to_string(),
        });
    }

    Ok(())
}

/// HTTP client for the inspector ingestion endpoint.
///
/// One POST per call, no retries and no timeout beyond the client's defaults.
pub struct InspectorForward {
    endpoint: String,
    headers: HeaderMap,
    context: PayloadContext,
    client: Client,
}

impl InspectorForward {
    pub fn try_new(config: &Config) -> InspectorForwardResult<Self> {
        let headers = default_headers(config)?;
        let client = Client::builder().default_headers(headers.clone()).build()?;

        Ok(InspectorForward {
            endpoint: config.endpoint.clone(),
            headers,
            context: config.payload_context(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Issue a single POST with the payloads as a JSON array and return the response body.
    pub async fn post(&self, payloads: &[OutgoingPayload]) -> InspectorForwardResult<String> {
        let body = serde_json::to_vec(payloads)?;

        let response = self.client.post(&self.endpoint).body(body).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status != StatusCode::OK {
            return Err(InspectorForwardError::server_error(status.as_u16(), body));
        }

        Ok(body)
    }
}

impl EventWriter for InspectorForward {
    async fn send_events(&self, payloads: &[OutgoingPayload]) -> InspectorForwardResult<()> {
        if payloads.is_empty() {
            debug!("No payloads to send, skipping network call");
            return Ok(());
        }

        let start_time = Instant::now();
        self.post(payloads).await?;

        info!(
            "Sent {} payloads to {}, elapsed: {:?}",
            payloads.len(),
            self.endpoint,
            start_time.elapsed()
        );
        Ok(())
    }

    async fn send_session(&self, mut payloads: Vec<OutgoingPayload>) -> InspectorForwardResult<()> {
        if payloads.is_empty() {
            debug!("Empty batch, skipping session");
            return Ok(());
        }

        let start_time = Instant::now();
        let session_id = Uuid::new_v4().to_string();

        for payload in payloads.iter_mut() {
            payload.session_id = session_id.clone();
        }

        let marker = session_started(&self.context, &session_id, Utc::now());
        self.post(std::slice::from_ref(&marker)).await?;

        let body = self.post(&payloads).await?;
        check_batch_response(&body)?;

        info!(
            "Sent session {} with {} payloads, elapsed: {:?}",
            session_id,
            payloads.len(),
            start_time.elapsed()
        );
        Ok(())
    }
}
