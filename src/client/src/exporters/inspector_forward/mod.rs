//! Delivery of inspector payloads to the remote ingestion endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! # use inspector_client::config_manager::Config;
//! # use inspector_client::exporters::event_writer::EventWriter;
//! # use inspector_client::exporters::inspector_forward::InspectorForward;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder().avo_api_key("api-key").build();
//! let forwarder = InspectorForward::try_new(&config)?;
//! forwarder.send_events(&[]).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{default_headers, InspectorForward};
pub use error::{InspectorForwardError, InspectorForwardResult};
