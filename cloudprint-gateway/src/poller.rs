//! Concurrent device status polling
//!
//! Fans one status query out per serial, bounded by a semaphore, and
//! classifies each reply. A device's failure is folded into its own slot;
//! it never aborts or reorders the batch.

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{instrument, warn};

use crate::client::PrinterGateway;

/// Default cap on in-flight status queries
const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Classification of one polled device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Online and ready to print
    Normal,
    /// Online but not operational (typically out of paper)
    Faulted,
    /// Not reachable by the vendor
    Offline,
    /// The status query itself failed (infrastructure, not device state)
    QueryFailed,
}

/// Status of one device, produced fresh per poll
#[derive(Debug, Clone)]
pub struct DeviceStatus {
    pub sn: String,
    pub state: DeviceState,
    /// Raw vendor message, or the query error text for `QueryFailed`
    pub message: String,
}

/// Known substrings in the vendor's free-form status prose
///
/// The vendor contract is loosely structured text, so classification is
/// substring matching against this table. Brittle by nature; anything the
/// table does not recognize is reported as `Offline`, which deliberately
/// conflates genuinely offline devices with unexpected message formats.
const STATUS_MARKERS: &[(&str, DeviceState)] = &[
    ("工作状态正常", DeviceState::Normal),
    ("工作状态不正常", DeviceState::Faulted),
];

/// Classify a successful vendor status message
pub fn classify(message: &str) -> DeviceState {
    for (marker, state) in STATUS_MARKERS {
        if message.contains(marker) {
            return *state;
        }
    }
    DeviceState::Offline
}

/// Bounded concurrent status poller
#[derive(Debug, Clone)]
pub struct StatusPoller {
    max_in_flight: usize,
}

impl StatusPoller {
    /// Create a poller capping concurrent queries at `max_in_flight`
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Read the cap from `CLOUDPRINT_MAX_IN_FLIGHT`, defaulting to 16
    pub fn from_env() -> Self {
        let max_in_flight = std::env::var("CLOUDPRINT_MAX_IN_FLIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_IN_FLIGHT);
        Self::new(max_in_flight)
    }

    /// Query every serial concurrently
    ///
    /// Returns exactly one `DeviceStatus` per input serial, in input order,
    /// regardless of completion order or per-device failures.
    #[instrument(skip(self, gateway, serials), fields(count = serials.len()))]
    pub async fn query_statuses<G>(&self, gateway: &G, serials: &[String]) -> Vec<DeviceStatus>
    where
        G: PrinterGateway + Sync,
    {
        let semaphore = Semaphore::new(self.max_in_flight);

        let queries = serials.iter().map(|sn| {
            let semaphore = &semaphore;
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return DeviceStatus {
                            sn: sn.clone(),
                            state: DeviceState::QueryFailed,
                            message: "poller semaphore closed".to_string(),
                        };
                    }
                };
                match gateway.query_printer_status(sn).await {
                    Ok(message) => DeviceStatus {
                        sn: sn.clone(),
                        state: classify(&message),
                        message,
                    },
                    Err(e) => {
                        warn!(sn = %sn, error = %e, "status query failed");
                        DeviceStatus {
                            sn: sn.clone(),
                            state: DeviceState::QueryFailed,
                            message: e.to_string(),
                        }
                    }
                }
            }
        });

        join_all(queries).await
    }
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IN_FLIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GatewayError, GatewayResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct ScriptedGateway;

    impl PrinterGateway for ScriptedGateway {
        async fn query_printer_status(&self, sn: &str) -> GatewayResult<String> {
            match sn {
                "SN-OK" => Ok("在线，工作状态正常".to_string()),
                "SN-PAPER" => Ok("在线，工作状态不正常".to_string()),
                "SN-OFF" => Ok("离线".to_string()),
                "SN-WEIRD" => Ok("unexpected payload".to_string()),
                _ => Err(GatewayError::Transport { status: 502 }),
            }
        }

        async fn print_ticket(
            &self,
            _sn: &str,
            _content: &str,
            _copies: u32,
        ) -> GatewayResult<String> {
            Ok("job-1".to_string())
        }
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("在线，工作状态正常"), DeviceState::Normal);
        assert_eq!(classify("在线，工作状态不正常"), DeviceState::Faulted);
        assert_eq!(classify("离线"), DeviceState::Offline);
        // unrecognized formats deliberately fall back to Offline
        assert_eq!(classify("{\"weird\":true}"), DeviceState::Offline);
        assert_eq!(classify(""), DeviceState::Offline);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failure() {
        let serials: Vec<String> = ["SN-OK", "SN-BAD", "SN-PAPER", "SN-OFF", "SN-WEIRD"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let poller = StatusPoller::default();
        let statuses = poller.query_statuses(&ScriptedGateway, &serials).await;

        assert_eq!(statuses.len(), serials.len());
        for (status, sn) in statuses.iter().zip(&serials) {
            assert_eq!(&status.sn, sn);
        }
        assert_eq!(statuses[0].state, DeviceState::Normal);
        assert_eq!(statuses[1].state, DeviceState::QueryFailed);
        assert_eq!(statuses[2].state, DeviceState::Faulted);
        assert_eq!(statuses[3].state, DeviceState::Offline);
        assert_eq!(statuses[4].state, DeviceState::Offline);

        let failed = statuses
            .iter()
            .filter(|s| s.state == DeviceState::QueryFailed)
            .count();
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let poller = StatusPoller::default();
        let statuses = poller.query_statuses(&ScriptedGateway, &[]).await;
        assert!(statuses.is_empty());
    }

    struct CountingGateway {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl PrinterGateway for CountingGateway {
        async fn query_printer_status(&self, _sn: &str) -> GatewayResult<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok("在线，工作状态正常".to_string())
        }

        async fn print_ticket(
            &self,
            _sn: &str,
            _content: &str,
            _copies: u32,
        ) -> GatewayResult<String> {
            Ok("job-1".to_string())
        }
    }

    #[tokio::test]
    async fn test_fan_out_is_bounded() {
        let gateway = CountingGateway {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let serials: Vec<String> = (0..12).map(|i| format!("SN-{i}")).collect();

        let poller = StatusPoller::new(3);
        let statuses = poller.query_statuses(&gateway, &serials).await;

        assert_eq!(statuses.len(), 12);
        assert!(gateway.peak.load(Ordering::SeqCst) <= 3);
    }
}
