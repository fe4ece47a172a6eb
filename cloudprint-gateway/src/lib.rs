//! # cloudprint-gateway
//!
//! Client for the cloud printer vendor HTTP API.
//!
//! ## Scope
//!
//! This crate handles talking to the vendor:
//! - Per-request SHA-1 signing from static credentials
//! - One operation per vendor capability (register, delete, clear queue,
//!   print, job state, device status, order counts)
//! - Concurrent, partial-failure-tolerant status polling across many
//!   device serials
//!
//! What gets printed (receipt composition) stays in application code.
//!
//! ## Example
//!
//! ```ignore
//! use cloudprint_gateway::{CloudGateway, Credentials, StatusPoller};
//!
//! let gateway = CloudGateway::new(Credentials::new("account", "secret"))?;
//! let job_id = gateway.print_ticket("916500001", "<C>hello</C>", 1).await?;
//!
//! let poller = StatusPoller::default();
//! let statuses = poller.query_statuses(&gateway, &serials).await;
//! ```

mod client;
mod credentials;
mod error;
mod poller;
mod signature;

// Re-exports
pub use client::{
    CloudGateway, DEFAULT_ENDPOINT, OrderCounts, PrinterGateway, PrinterInfo, Registration,
};
pub use credentials::Credentials;
pub use error::{GatewayError, GatewayResult};
pub use poller::{DeviceState, DeviceStatus, StatusPoller, classify};
pub use signature::sign;
