//! Site-level print dispatch
//!
//! Looks up a site's device serials, polls their statuses, and submits the
//! composed content to every device that reports a normal working state.
//! One device's failure is recorded in its own outcome and never aborts
//! the batch.

use cloudprint_format::FormatError;
use cloudprint_gateway::{DeviceState, PrinterGateway, StatusPoller};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::composer::ReceiptComposer;
use crate::order::OrderSnapshot;

/// Maps a site identifier to its registered device serials
///
/// Owned by an external component (typically the relational store);
/// synchronous single-result lookup.
pub trait DeviceRegistry {
    fn serials_for_site(&self, site_id: &str) -> Vec<String>;
}

/// Resolves an order reference to its snapshot
///
/// Owned by an external component; synchronous single-result lookup.
pub trait OrderSource {
    fn snapshot(&self, reference: &str) -> Option<OrderSnapshot>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The order source has no snapshot for the reference
    #[error("unknown order reference: {0}")]
    UnknownOrder(String),

    /// Receipt template construction failed
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Per-device result of one dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub sn: String,
    pub state: DeviceState,
    /// Vendor status message, or the submit error text
    pub message: String,
    /// Whether a print job was handed to the vendor
    pub submitted: bool,
    /// Vendor job id when submitted
    pub job_id: Option<String>,
}

/// Send `content` to every normal device registered for `site_id`
///
/// Devices that are faulted, offline, or whose status query failed are
/// reported but skipped. A failed submission is captured in that device's
/// outcome; remaining devices still print.
#[instrument(skip(gateway, poller, registry, content))]
pub async fn dispatch_to_site<G, R>(
    gateway: &G,
    poller: &StatusPoller,
    registry: &R,
    site_id: &str,
    content: &str,
    copies: u32,
) -> Vec<DispatchOutcome>
where
    G: PrinterGateway + Sync,
    R: DeviceRegistry,
{
    let serials = registry.serials_for_site(site_id);
    if serials.is_empty() {
        info!(site = %site_id, "no devices registered for site");
        return Vec::new();
    }

    let statuses = poller.query_statuses(gateway, &serials).await;

    let mut outcomes = Vec::with_capacity(statuses.len());
    for status in statuses {
        let outcome = match status.state {
            DeviceState::Normal => match gateway.print_ticket(&status.sn, content, copies).await {
                Ok(job_id) => DispatchOutcome {
                    sn: status.sn,
                    state: status.state,
                    message: status.message,
                    submitted: true,
                    job_id: Some(job_id),
                },
                Err(e) => {
                    error!(sn = %status.sn, error = %e, "print submission failed");
                    DispatchOutcome {
                        sn: status.sn,
                        state: status.state,
                        message: e.to_string(),
                        submitted: false,
                        job_id: None,
                    }
                }
            },
            _ => DispatchOutcome {
                sn: status.sn,
                state: status.state,
                message: status.message,
                submitted: false,
                job_id: None,
            },
        };
        outcomes.push(outcome);
    }

    let submitted = outcomes.iter().filter(|o| o.submitted).count();
    info!(site = %site_id, devices = outcomes.len(), submitted, "dispatch finished");
    outcomes
}

/// Compose the acceptance receipt for `reference` and dispatch it to the site
#[instrument(skip(gateway, poller, registry, orders, composer))]
pub async fn print_accept_order<G, R, O>(
    gateway: &G,
    poller: &StatusPoller,
    registry: &R,
    orders: &O,
    composer: &ReceiptComposer,
    site_id: &str,
    reference: &str,
) -> Result<Vec<DispatchOutcome>, DispatchError>
where
    G: PrinterGateway + Sync,
    R: DeviceRegistry,
    O: OrderSource,
{
    let order = orders
        .snapshot(reference)
        .ok_or_else(|| DispatchError::UnknownOrder(reference.to_string()))?;
    let receipt = composer.accept_order(&order)?;

    Ok(dispatch_to_site(gateway, poller, registry, site_id, &receipt, 1).await)
}
