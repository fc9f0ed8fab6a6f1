use crate::exporters::inspector_forward::InspectorForwardResult;
use inspector_common::payload::OutgoingPayload;

#[allow(async_fn_in_trait)]
pub trait EventWriter {
    /// Deliver payloads in a single call.
    async fn send_events(&self, payloads: &[OutgoingPayload]) -> InspectorForwardResult<()>;

    /// Deliver payloads as one session: a session-start marker followed by the batch.
    async fn send_session(&self, payloads: Vec<OutgoingPayload>) -> InspectorForwardResult<()>;
}
