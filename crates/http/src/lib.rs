//! REST client for the MockTail API

pub mod client;
pub mod types;

pub use client::{
    ClientConfig, ClientConfigBuilder, ClientError, MocktailClient, RefreshOutcome, cancellable,
};
pub use tokio_util::sync::CancellationToken;
