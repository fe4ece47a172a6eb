//! # cloudprint
//!
//! Receipt composition and site-level print dispatch for cloud thermal
//! printers.
//!
//! ## Scope
//!
//! This crate decides WHAT gets printed and where:
//! - Order data model (decimal-exact goods lines, order snapshots)
//! - Notice templates and the order-acceptance receipt
//! - Dispatching composed content to every healthy device of a site
//!
//! Layout mechanics live in `cloudprint-format`; vendor HTTP plumbing in
//! `cloudprint-gateway`.
//!
//! ## Example
//!
//! ```ignore
//! use cloudprint::{CloudGateway, Credentials, ReceiptComposer, StatusPoller};
//!
//! let composer = ReceiptComposer::new("云点餐");
//! let receipt = composer.accept_order(&order)?;
//!
//! let gateway = CloudGateway::new(Credentials::from_env()?)?;
//! let outcomes = cloudprint::dispatch_to_site(
//!     &gateway, &StatusPoller::default(), &registry, "site-1", &receipt, 1,
//! ).await;
//! ```

mod composer;
mod dispatch;
pub mod markup;
mod order;

// Re-exports
pub use composer::{NoticeKind, ReceiptComposer};
pub use dispatch::{
    DeviceRegistry, DispatchError, DispatchOutcome, OrderSource, dispatch_to_site,
    print_accept_order,
};
pub use order::{Fulfillment, GoodsLine, OrderSnapshot};

// Companion crates re-exported for callers wiring the full path
pub use cloudprint_format::{Align, FormatError, FormatResult, FormatSpec, LINE_WIDTH, Rule};
pub use cloudprint_gateway::{
    CloudGateway, Credentials, DeviceState, DeviceStatus, GatewayError, GatewayResult,
    PrinterGateway, PrinterInfo, StatusPoller,
};
