pub mod event_writer;
pub mod inspector_forward;
