pub mod events;
pub mod infrastructure;
pub mod stream_executor;
