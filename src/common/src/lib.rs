pub mod constants;
pub mod event;
pub mod filter;
pub mod payload;
pub mod property;

pub use event::IncomingEvent;
pub use filter::{should_forward, FilterConfig, NameFilter};
pub use payload::{to_payload, OutgoingPayload, PayloadContext};
pub use property::{classify, EventProperty, PropertyType};
