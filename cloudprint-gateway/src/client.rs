//! Vendor HTTP API client
//!
//! One method per vendor capability. Every call POSTs a form-encoded body
//! carrying the signature triple (`user`, `sig`, `stime`), the operation
//! name (`apiname`) and operation-specific parameters, then decodes the
//! `{ret, msg, data}` envelope. No automatic retry; the caller decides.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::credentials::Credentials;
use crate::error::{GatewayError, GatewayResult};
use crate::signature::sign;

/// Production vendor endpoint
pub const DEFAULT_ENDPOINT: &str = "http://api.feieyun.cn/Api/Open/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vendor response envelope: `{ret, msg, data}`
///
/// `ret != 0` signals an application-level failure carrying `msg`.
#[derive(Debug, Deserialize)]
struct VendorResponse<T> {
    ret: i64,
    msg: String,
    data: Option<T>,
}

/// Registration details for one physical device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterInfo {
    pub sn: String,
    pub key: String,
    pub name: Option<String>,
    pub card_number: Option<String>,
}

impl PrinterInfo {
    pub fn new(sn: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            sn: sn.into(),
            key: key.into(),
            name: None,
            card_number: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    /// Wire form: `sn# key[# name][# card]`, one device per line
    fn registration_line(&self) -> String {
        let mut parts = vec![self.sn.as_str(), self.key.as_str()];
        if let Some(ref name) = self.name {
            parts.push(name);
        }
        if let Some(ref card) = self.card_number {
            parts.push(card);
        }
        parts.join("# ")
    }
}

/// Outcome of a batch register/delete call
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    /// Serials the vendor accepted
    #[serde(default)]
    pub ok: Vec<String>,
    /// Serials the vendor rejected, with its reason text appended
    #[serde(rename = "no", default)]
    pub failed: Vec<String>,
}

/// Per-day job counters for one device
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderCounts {
    /// Jobs already printed that day
    #[serde(rename = "print")]
    pub printed: u64,
    /// Jobs still queued
    pub waiting: u64,
}

/// Gateway operations consumed by the poller and the dispatcher
///
/// Trait seam so batch logic can run against a test double.
#[allow(async_fn_in_trait)]
pub trait PrinterGateway {
    /// Query one device's raw vendor status message
    async fn query_printer_status(&self, sn: &str) -> GatewayResult<String>;

    /// Submit printable content to one device; returns the vendor job id
    async fn print_ticket(&self, sn: &str, content: &str, copies: u32) -> GatewayResult<String>;
}

/// Client for the vendor printer API
#[derive(Debug, Clone)]
pub struct CloudGateway {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl CloudGateway {
    /// Create a client against the production endpoint
    pub fn new(credentials: Credentials) -> GatewayResult<Self> {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint
    pub fn with_endpoint(credentials: Credentials, endpoint: &str) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            credentials,
        })
    }

    /// Register devices with the vendor account
    #[instrument(skip(self, printers), fields(count = printers.len()))]
    pub async fn add_printers(&self, printers: &[PrinterInfo]) -> GatewayResult<Registration> {
        let content = printers
            .iter()
            .map(PrinterInfo::registration_line)
            .collect::<Vec<_>>()
            .join("\n");
        let outcome: Registration = self
            .call("Open_printerAddlist", vec![("printerContent", content)])
            .await?;
        info!(ok = outcome.ok.len(), failed = outcome.failed.len(), "printers registered");
        Ok(outcome)
    }

    /// Remove devices from the vendor account
    #[instrument(skip(self, serials), fields(count = serials.len()))]
    pub async fn delete_printers(&self, serials: &[String]) -> GatewayResult<Registration> {
        self.call("Open_printerDelList", vec![("snlist", serials.join("-"))])
            .await
    }

    /// Drop all jobs still queued for one device
    #[instrument(skip(self))]
    pub async fn clear_pending(&self, sn: &str) -> GatewayResult<bool> {
        self.call("Open_delPrinterSqs", vec![("sn", sn.to_string())])
            .await
    }

    /// Check whether a submitted job has been printed
    #[instrument(skip(self))]
    pub async fn query_job_state(&self, job_id: &str) -> GatewayResult<bool> {
        self.call("Open_queryOrderState", vec![("orderid", job_id.to_string())])
            .await
    }

    /// Printed/waiting job counts for one device on a given date
    #[instrument(skip(self))]
    pub async fn query_order_counts(&self, sn: &str, date: NaiveDate) -> GatewayResult<OrderCounts> {
        self.call(
            "Open_queryOrderInfoByDate",
            vec![
                ("sn", sn.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ],
        )
        .await
    }

    /// Sign and send one operation, decoding the vendor envelope
    async fn call<T: DeserializeOwned>(
        &self,
        apiname: &str,
        params: Vec<(&str, String)>,
    ) -> GatewayResult<T> {
        let stime = unix_seconds();
        let sig = sign(&self.credentials.user, &self.credentials.ukey, &stime);

        let mut form: Vec<(&str, String)> = vec![
            ("user", self.credentials.user.clone()),
            ("sig", sig),
            ("stime", stime),
            ("apiname", apiname.to_string()),
        ];
        form.extend(params);

        let resp = self.http.post(&self.endpoint).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Transport {
                status: status.as_u16(),
            });
        }

        let body: VendorResponse<T> = resp.json().await?;
        if body.ret != 0 {
            return Err(GatewayError::Vendor {
                code: body.ret,
                message: body.msg,
            });
        }
        body.data
            .ok_or_else(|| GatewayError::InvalidResponse("missing data field".into()))
    }
}

impl PrinterGateway for CloudGateway {
    #[instrument(skip(self))]
    async fn query_printer_status(&self, sn: &str) -> GatewayResult<String> {
        self.call("Open_queryPrinterStatus", vec![("sn", sn.to_string())])
            .await
    }

    #[instrument(skip(self, content), fields(bytes = content.len()))]
    async fn print_ticket(&self, sn: &str, content: &str, copies: u32) -> GatewayResult<String> {
        let job_id: String = self
            .call(
                "Open_printMsg",
                vec![
                    ("sn", sn.to_string()),
                    ("content", content.to_string()),
                    ("times", copies.to_string()),
                ],
            )
            .await?;
        info!(sn = %sn, job_id = %job_id, "print job submitted");
        Ok(job_id)
    }
}

/// Current Unix time in seconds, as the vendor expects it
fn unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}
