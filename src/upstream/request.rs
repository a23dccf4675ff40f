//! Upstream URL composition and redaction.
//!
//! # Responsibilities
//! - Compose `base/{op}` with the credential set first, then the
//!   normalized parameters (later identical keys overwrite earlier ones)
//! - Produce a redacted URL safe for logs and response echoing
//! - Derive the degraded retry request (clamped rows, no name filter)
//!
//! # Design Decisions
//! - Redaction masks both the literal credential and its form-encoded
//!   form; every URL leaving the process goes through it
//! - The builder assumes a non-empty credential; the handler checks
//!   configuration before anything is built

use url::Url;

use crate::error::{GatewayError, GatewayResult};
use crate::query::{CREDENTIAL_KEY, NAME_FILTER_KEY, ROW_COUNT_KEY};
use crate::registry::Operation;

/// Mask substituted for the credential in redacted URLs.
const CREDENTIAL_MASK: &str = "****";

/// A fully composed upstream request, immutable after construction.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    op: Operation,
    base: String,
    params: Vec<(String, String)>,
    url: Url,
    redacted: String,
}

impl UpstreamRequest {
    /// Build a request from a service base URL, operation, normalized
    /// parameters and the configured credential.
    pub fn build(
        base: &str,
        op: Operation,
        params: &[(String, String)],
        credential: &str,
    ) -> GatewayResult<UpstreamRequest> {
        let mut url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), op))
            .map_err(|e| GatewayError::Internal(format!("invalid upstream URL: {e}")))?;

        // Credential first, then a last-wins fold over the caller params.
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(params.len() + 1);
        pairs.push((CREDENTIAL_KEY.to_string(), credential.to_string()));
        for (key, value) in params {
            match pairs.iter_mut().find(|(existing, _)| existing == key) {
                Some((_, slot)) => *slot = value.clone(),
                None => pairs.push((key.clone(), value.clone())),
            }
        }

        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let redacted = redact(url.as_str(), credential);

        Ok(UpstreamRequest {
            op,
            base: base.to_string(),
            params: params.to_vec(),
            url,
            redacted,
        })
    }

    /// Derive the degraded retry request: clamp the row count to
    /// `row_limit` when unset, unparseable or larger, and drop the
    /// free-text name filter entirely.
    pub fn degraded(&self, credential: &str, row_limit: u32) -> GatewayResult<UpstreamRequest> {
        let mut params: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(key, _)| key != NAME_FILTER_KEY)
            .cloned()
            .collect();

        match params.iter_mut().find(|(key, _)| key == ROW_COUNT_KEY) {
            Some((_, value)) => {
                let within_limit = value
                    .parse::<u32>()
                    .map(|rows| rows <= row_limit)
                    .unwrap_or(false);
                if !within_limit {
                    *value = row_limit.to_string();
                }
            }
            None => params.push((ROW_COUNT_KEY.to_string(), row_limit.to_string())),
        }

        UpstreamRequest::build(&self.base, self.op, &params, credential)
    }

    /// The operation this request targets.
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The full URL including the credential. Never log or echo this.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The redacted URL, safe for logs and responses.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

/// Replace every occurrence of the credential with the fixed mask.
///
/// The credential may appear percent-encoded in the query string, so
/// both the encoded and the literal forms are masked.
fn redact(url: &str, credential: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(credential.as_bytes()).collect();
    url.replace(&encoded, CREDENTIAL_MASK)
        .replace(credential, CREDENTIAL_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://openapi.onbid.co.kr/openapi/services/ThingInfoInquireSvc";

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_url_composition_credential_first() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyNewCltrList,
            &pairs(&[("numOfRows", "5"), ("pageNo", "2")]),
            "secret",
        )
        .unwrap();

        assert_eq!(
            request.url().as_str(),
            format!("{BASE}/getUnifyNewCltrList?serviceKey=secret&numOfRows=5&pageNo=2")
        );
    }

    #[test]
    fn test_later_duplicate_key_overwrites() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyNewCltrList,
            &pairs(&[("pageNo", "1"), ("numOfRows", "5"), ("pageNo", "9")]),
            "secret",
        )
        .unwrap();

        let query = request.url().query().unwrap();
        assert!(query.contains("pageNo=9"));
        assert!(!query.contains("pageNo=1"));
        assert_eq!(query.matches("pageNo").count(), 1);
    }

    #[test]
    fn test_redaction_masks_credential() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyNewCltrList,
            &pairs(&[("numOfRows", "5")]),
            "topsecret",
        )
        .unwrap();

        assert!(!request.redacted().contains("topsecret"));
        assert!(request.redacted().contains("serviceKey=****"));
        assert!(request.redacted().contains("numOfRows=5"));
    }

    #[test]
    fn test_redaction_masks_percent_encoded_credential() {
        // Keys issued by the portal routinely contain '+' and '='.
        let credential = "abc+def==";
        let request =
            UpstreamRequest::build(BASE, Operation::UnifyNewCltrList, &[], credential).unwrap();

        assert!(!request.redacted().contains("abc%2Bdef"));
        assert!(!request.redacted().contains(credential));
        assert!(request.redacted().contains(CREDENTIAL_MASK));
    }

    #[test]
    fn test_degraded_clamps_large_row_count() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyUsageCltr,
            &pairs(&[("numOfRows", "500"), ("SIDO", "11")]),
            "secret",
        )
        .unwrap();

        let degraded = request.degraded("secret", 10).unwrap();
        let query = degraded.url().query().unwrap();
        assert!(query.contains("numOfRows=10"));
        assert!(query.contains("SIDO=11"));
    }

    #[test]
    fn test_degraded_keeps_small_row_count() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyUsageCltr,
            &pairs(&[("numOfRows", "5")]),
            "secret",
        )
        .unwrap();

        let degraded = request.degraded("secret", 10).unwrap();
        assert!(degraded.url().query().unwrap().contains("numOfRows=5"));
    }

    #[test]
    fn test_degraded_sets_row_count_when_unset() {
        let request =
            UpstreamRequest::build(BASE, Operation::UnifyUsageCltr, &[], "secret").unwrap();

        let degraded = request.degraded("secret", 10).unwrap();
        assert!(degraded.url().query().unwrap().contains("numOfRows=10"));
    }

    #[test]
    fn test_degraded_drops_name_filter() {
        let request = UpstreamRequest::build(
            BASE,
            Operation::UnifyUsageCltr,
            &pairs(&[("CLTR_NM", "apartment"), ("SIDO", "11")]),
            "secret",
        )
        .unwrap();

        let degraded = request.degraded("secret", 10).unwrap();
        let query = degraded.url().query().unwrap();
        assert!(!query.contains("CLTR_NM"));
        assert!(query.contains("SIDO=11"));
    }
}
