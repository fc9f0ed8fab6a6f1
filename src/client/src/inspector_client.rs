use crate::config_manager::Config;
use crate::exporters::event_writer::EventWriter;
use crate::exporters::inspector_forward::InspectorForward;

use anyhow::{Context, Result};
use chrono::Utc;
use inspector_common::event::IncomingEvent;
use inspector_common::filter::FilterConfig;
use inspector_common::payload::{to_payload, OutgoingPayload, PayloadContext};
use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::{debug, error, info};

/// A fully prepared request for hosts that perform delivery themselves.
#[derive(Debug, Clone)]
pub struct Webhook {
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
    pub method: Method,
}

/// Entry point for the host pipeline.
///
/// Built once at setup; every call afterwards only reads it, so a single client
/// can serve concurrent invocations.
pub struct InspectorClient<W = InspectorForward> {
    filters: FilterConfig,
    context: PayloadContext,
    writer: W,
}

impl InspectorClient<InspectorForward> {
    pub fn setup(config: Config) -> Result<Self> {
        info!(
            "Setting up inspector forwarding for app {} ({})",
            config.app_name, config.environment
        );

        let writer =
            InspectorForward::try_new(&config).context("Failed to set up inspector transport")?;

        Ok(Self::with_writer(&config, writer))
    }

    /// Build the request that would deliver this event, without sending it.
    pub fn compose_webhook(&self, event: &IncomingEvent) -> Result<Option<Webhook>> {
        let Some(payload) = self.transform(event) else {
            debug!("Event {} filtered out", event.name());
            return Ok(None);
        };

        let body = serde_json::to_string(&[payload]).context("Failed to serialize payload")?;

        Ok(Some(Webhook {
            url: self.writer.endpoint().to_string(),
            headers: self.writer.headers().clone(),
            body,
            method: Method::POST,
        }))
    }
}

impl<W: EventWriter> InspectorClient<W> {
    pub fn with_writer(config: &Config, writer: W) -> Self {
        InspectorClient {
            filters: config.filters(),
            context: config.payload_context(),
            writer,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn transform(&self, event: &IncomingEvent) -> Option<OutgoingPayload> {
        to_payload(event, &self.context, &self.filters, "", Utc::now())
    }

    /// Forward a single event. Returns whether a payload was delivered;
    /// delivery failures are logged, never returned.
    pub async fn on_event(&self, event: &IncomingEvent) -> bool {
        let Some(payload) = self.transform(event) else {
            debug!("Event {} filtered out", event.name());
            return false;
        };

        match self.writer.send_events(std::slice::from_ref(&payload)).await {
            Ok(()) => {
                debug!("Forwarded event {} ({})", payload.event_name, payload.message_id);
                true
            }
            Err(e) => {
                error!(
                    "Failed to forward event {} ({}): {}",
                    payload.event_name, payload.message_id, e
                );
                false
            }
        }
    }

    /// Forward a batch as one session. Returns the number of payloads delivered.
    pub async fn export_events(&self, events: &[IncomingEvent]) -> usize {
        let payloads: Vec<OutgoingPayload> = events
            .iter()
            .filter_map(|event| self.transform(event))
            .collect();

        if payloads.is_empty() {
            debug!("All {} events filtered out", events.len());
            return 0;
        }

        let count = payloads.len();
        match self.writer.send_session(payloads).await {
            Ok(()) => count,
            Err(e) => {
                error!("Failed to export batch of {} events: {}", count, e);
                0
            }
        }
    }
}
