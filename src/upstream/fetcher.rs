//! Resilient upstream fetcher.
//!
//! # Responsibilities
//! - Issue the primary request under the primary timeout
//! - On any transport failure, derive the degraded request and retry
//!   once under an independent timeout
//! - Surface a gateway-timeout outcome when both attempts fail
//!
//! # Design Decisions
//! - The upstream has unpredictable latency under broad queries; a
//!   cheaper retry recovers availability without the caller
//!   reformulating
//! - reqwest's per-request timeout cancels the in-flight call, so the
//!   retry does not contend with an abandoned first attempt
//! - Upstream HTTP error statuses still carry an XML error document and
//!   are passed through to the translator, not retried

use std::time::Duration;

use reqwest::header;

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::upstream::request::UpstreamRequest;

/// Result of a fetch: the XML body and, when the degraded attempt
/// supplied it, the retry request that was issued.
#[derive(Debug)]
pub struct FetchOutcome {
    pub xml: String,
    pub retried: Option<UpstreamRequest>,
}

/// Issues upstream calls with the two-attempt degraded-retry policy.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl Fetcher {
    /// Create a fetcher over a shared client and upstream settings.
    pub fn new(client: reqwest::Client, upstream: UpstreamConfig) -> Self {
        Self { client, upstream }
    }

    /// Fetch the XML body for a request, degrading once on failure.
    pub async fn fetch(&self, request: &UpstreamRequest) -> GatewayResult<FetchOutcome> {
        let primary_timeout = Duration::from_millis(self.upstream.primary_timeout_ms);
        let primary_err = match self.attempt(request, primary_timeout).await {
            Ok(xml) => {
                return Ok(FetchOutcome { xml, retried: None });
            }
            Err(e) => e,
        };

        tracing::warn!(
            op = %request.op(),
            url = %request.redacted(),
            error = %primary_err,
            "Primary upstream attempt failed, retrying with degraded query"
        );

        let degraded = request.degraded(
            &self.upstream.service_key,
            self.upstream.degraded_row_limit,
        )?;
        crate::observability::metrics::record_degraded_retry(request.op().name());

        let retry_timeout = Duration::from_millis(self.upstream.retry_timeout_ms);
        match self.attempt(&degraded, retry_timeout).await {
            Ok(xml) => Ok(FetchOutcome {
                xml,
                retried: Some(degraded),
            }),
            Err(retry_err) => {
                tracing::error!(
                    op = %request.op(),
                    url = %degraded.redacted(),
                    error = %retry_err,
                    "Degraded upstream attempt failed, giving up"
                );
                Err(GatewayError::UpstreamExhausted)
            }
        }
    }

    /// One bounded attempt. Dropping the future on timeout aborts the
    /// connection and releases it back to the pool.
    async fn attempt(
        &self,
        request: &UpstreamRequest,
        timeout: Duration,
    ) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(request.url().clone())
            .timeout(timeout)
            .header(header::ACCEPT, "application/xml,*/*")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        response.text().await
    }
}
