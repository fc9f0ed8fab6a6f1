use crate::constants::{
    APP_VERSION, LIB_PLATFORM, LIB_VERSION, SAMPLING_RATE, SESSION_STARTED_EVENT_NAME,
};
use crate::event::IncomingEvent;
use crate::filter::FilterConfig;
use crate::property::{convert_properties, EventProperty};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PayloadType {
    Event,
    SessionStarted,
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadType::Event => write!(f, "event"),
            PayloadType::SessionStarted => write!(f, "sessionStarted"),
        }
    }
}

/// Static half of every payload, fixed at setup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TypedBuilder)]
pub struct PayloadContext {
    #[builder(setter(into))]
    pub api_key: String,
    #[builder(setter(into))]
    pub env: String,
    #[builder(setter(into))]
    pub app_name: String,
}

/// One record of the inspector ingestion schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingPayload {
    pub api_key: String,
    pub env: String,
    pub app_name: String,
    pub session_id: String,
    pub created_at: String,
    pub avo_function: bool,
    pub event_id: Option<String>,
    pub event_hash: Option<String>,
    pub app_version: String,
    pub lib_version: String,
    pub lib_platform: String,
    pub message_id: String,
    pub tracking_id: String,
    pub sampling_rate: u32,
    #[serde(rename = "type")]
    pub payload_type: PayloadType,
    pub event_name: String,
    pub event_properties: Vec<EventProperty>,
}

impl OutgoingPayload {
    fn base(
        ctx: &PayloadContext,
        payload_type: PayloadType,
        event_name: String,
        message_id: String,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        OutgoingPayload {
            api_key: ctx.api_key.clone(),
            env: ctx.env.clone(),
            app_name: ctx.app_name.clone(),
            session_id: session_id.to_string(),
            created_at: iso_timestamp(now),
            avo_function: false,
            event_id: None,
            event_hash: None,
            app_version: APP_VERSION.to_string(),
            lib_version: LIB_VERSION.to_string(),
            lib_platform: LIB_PLATFORM.to_string(),
            message_id,
            tracking_id: String::new(),
            sampling_rate: SAMPLING_RATE,
            payload_type,
            event_name,
            event_properties: Vec::new(),
        }
    }
}

/// Render a timestamp the way the ingestion API expects: `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Map a host event onto the inspector schema.
///
/// Returns `None` when the event name itself is filtered out.
pub fn to_payload(
    event: &IncomingEvent,
    ctx: &PayloadContext,
    filters: &FilterConfig,
    session_id: &str,
    now: DateTime<Utc>,
) -> Option<OutgoingPayload> {
    if !filters.forwards_event(&event.event) {
        return None;
    }

    let mut payload = OutgoingPayload::base(
        ctx,
        PayloadType::Event,
        event.event.clone(),
        event.uuid.clone(),
        session_id,
        now,
    );

    if let Some(properties) = &event.properties {
        payload.event_properties = convert_properties(properties, &filters.properties);
    }

    Some(payload)
}

/// The marker record announcing a new session ahead of a batch.
pub fn session_started(ctx: &PayloadContext, session_id: &str, now: DateTime<Utc>) -> OutgoingPayload {
    OutgoingPayload::base(
        ctx,
        PayloadType::SessionStarted,
        SESSION_STARTED_EVENT_NAME.to_string(),
        Uuid::new_v4().to_string(),
        session_id,
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NameFilter;
    use crate::property::PropertyType;
    use chrono::TimeZone;
    use serde_json::json;

    fn ctx() -> PayloadContext {
        PayloadContext::builder()
            .api_key("key")
            .env("prod")
            .app_name("PostHog")
            .build()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn signup() -> IncomingEvent {
        IncomingEvent::new("signup", "u1")
            .with_property("$browser", "x")
            .with_property("plan", "pro")
    }

    #[test]
    fn test_signup_with_default_filters() {
        let payload = to_payload(&signup(), &ctx(), &FilterConfig::default(), "", now()).unwrap();

        assert_eq!(payload.event_name, "signup");
        assert_eq!(payload.message_id, "u1");
        assert_eq!(payload.event_properties.len(), 1);
        assert_eq!(payload.event_properties[0].property_name, "plan");
        assert_eq!(payload.event_properties[0].property_type, PropertyType::String);
    }

    #[test]
    fn test_reserved_event_is_dropped() {
        let event = IncomingEvent::new("$pageview", "u2").with_property("plan", "pro");

        assert!(to_payload(&event, &ctx(), &FilterConfig::default(), "", now()).is_none());
    }

    #[test]
    fn test_event_filters_apply() {
        let filters = FilterConfig {
            events: NameFilter::new(["signup", "login"], ["login"]),
            properties: NameFilter::default(),
        };

        assert!(to_payload(&signup(), &ctx(), &filters, "", now()).is_some());
        assert!(to_payload(&IncomingEvent::new("login", "u3"), &ctx(), &filters, "", now()).is_none());
        assert!(to_payload(&IncomingEvent::new("logout", "u4"), &ctx(), &filters, "", now()).is_none());
    }

    #[test]
    fn test_missing_properties_give_empty_list() {
        let payload = to_payload(
            &IncomingEvent::new("signup", "u1"),
            &ctx(),
            &FilterConfig::default(),
            "",
            now(),
        )
        .unwrap();

        assert!(payload.event_properties.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let payload = to_payload(&signup(), &ctx(), &FilterConfig::default(), "s1", now()).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "apiKey": "key",
                "env": "prod",
                "appName": "PostHog",
                "sessionId": "s1",
                "createdAt": "2024-01-02T03:04:05.000Z",
                "avoFunction": false,
                "eventId": null,
                "eventHash": null,
                "appVersion": "1.0.0",
                "libVersion": "1.0.0",
                "libPlatform": "node",
                "messageId": "u1",
                "trackingId": "",
                "samplingRate": 1,
                "type": "event",
                "eventName": "signup",
                "eventProperties": [
                    {"propertyName": "plan", "propertyType": "string"}
                ]
            })
        );
    }

    #[test]
    fn test_session_started_marker() {
        let marker = session_started(&ctx(), "s1", now());

        assert_eq!(marker.payload_type, PayloadType::SessionStarted);
        assert_eq!(marker.event_name, "sessionStarted");
        assert_eq!(marker.session_id, "s1");
        assert!(marker.event_properties.is_empty());
        assert!(Uuid::parse_str(&marker.message_id).is_ok());

        let value = serde_json::to_value(&marker).unwrap();
        assert_eq!(value["type"], json!("sessionStarted"));
    }
}
