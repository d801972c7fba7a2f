use log::{info, warn};
use reqwest::{Client, Method, StatusCode};
use std::time::{Duration, Instant};
use url::Url;

use crate::config::Endpoint;
use crate::error::Error;

/// Fixed per-request timeout; doubles as the latency budget for the
/// availability rule.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

const LATENCY_LIMIT_MS: f64 = 500.0;

/// Outcome of a single probe. Lives only long enough to be logged and
/// folded into the cumulative stats.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Aggregation key: hostname of the endpoint URL, empty when the URL
    /// has no extractable host.
    pub domain: String,
    pub status: Option<u16>,
    pub latency_ms: f64,
    pub available: bool,
    pub error: Option<String>,
}

/// Issues probes over a shared HTTP client.
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Probes one endpoint and classifies the outcome.
    ///
    /// An endpoint is available when a response came back with a 2xx
    /// status within the latency budget. Every request failure (timeout,
    /// connect error, DNS, TLS, bad method or header) is absorbed into an
    /// UNAVAILABLE result here; nothing propagates to the caller.
    ///
    /// Emits exactly one log line per probe.
    pub async fn probe(&self, endpoint: &Endpoint) -> CheckResult {
        let name = endpoint.display_name();
        let url = &endpoint.url;
        let domain = domain_of(url);
        let start = Instant::now();

        match self.dispatch(endpoint).await {
            Ok(status) => {
                let latency_ms = elapsed_ms(start);
                let available = is_available(status, latency_ms);
                let code = status.as_u16();
                if available {
                    info!("[{name}] {url} - AVAILABLE | Status: {code} | Time: {latency_ms:.2}ms");
                } else {
                    warn!("[{name}] {url} - UNAVAILABLE | Status: {code} | Time: {latency_ms:.2}ms");
                }
                CheckResult {
                    domain,
                    status: Some(code),
                    latency_ms,
                    available,
                    error: None,
                }
            }
            Err(e) => {
                let latency_ms = elapsed_ms(start);
                warn!("[{name}] {url} - UNAVAILABLE | Error: {e} | Time: {latency_ms:.2}ms");
                CheckResult {
                    domain,
                    status: None,
                    latency_ms,
                    available: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn dispatch(&self, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        let method = Method::from_bytes(endpoint.method.to_uppercase().as_bytes())
            .map_err(|_| Error::InvalidMethod(endpoint.method.clone()))?;

        let mut request = self.client.request(method, &endpoint.url);
        for (key, value) in &endpoint.headers {
            request = request.header(key, value);
        }
        if let Some(body) = &endpoint.body {
            request = request.body(body.clone());
        }

        Ok(request.send().await?.status())
    }
}

fn is_available(status: StatusCode, latency_ms: f64) -> bool {
    status.is_success() && latency_ms <= LATENCY_LIMIT_MS
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Extracts the stats aggregation key from an endpoint URL.
///
/// Malformed or host-less URLs map to the empty string; their probes
/// still run and aggregate under that bucket.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_default()
}
