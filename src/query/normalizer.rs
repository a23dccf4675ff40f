//! Inbound query normalization.
//!
//! # Responsibilities
//! - Resolve the effective operation (explicit selector or heuristic)
//! - Strip reserved keys (`op`, `ping`, `serviceKey`) from the params
//! - Drop empty values, preserve caller order for the rest
//!
//! # Design Decisions
//! - An explicit selector is used verbatim, even when empty; only a
//!   missing selector triggers the default heuristic
//! - A caller-supplied `serviceKey` is stripped so it can never override
//!   the configured credential

use crate::error::{GatewayError, GatewayResult};
use crate::registry::Operation;

/// Reserved key selecting the upstream operation.
pub const OP_KEY: &str = "op";

/// Reserved debug flag; short-circuits the pipeline with a liveness reply.
pub const PING_KEY: &str = "ping";

/// Reserved credential key; callers may never set it.
pub const CREDENTIAL_KEY: &str = "serviceKey";

/// Reserved row-count key, clamped by the degraded-retry policy.
pub const ROW_COUNT_KEY: &str = "numOfRows";

/// Reserved free-text name filter, dropped by the degraded-retry policy.
pub const NAME_FILTER_KEY: &str = "CLTR_NM";

/// Region-filter keys that steer the default-operation heuristic.
const REGION_KEYS: [&str; 3] = ["SIDO", "SGK", "EMD"];

/// The effective operation and pass-through parameters of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub op: Operation,
    pub params: Vec<(String, String)>,
}

/// Normalize raw query pairs into an operation plus upstream parameters.
///
/// Fails with [`GatewayError::UnsupportedOperation`] when the resolved
/// operation is not allow-listed; no network call is made in that case.
pub fn normalize(raw: &[(String, String)]) -> GatewayResult<NormalizedQuery> {
    let name = match raw.iter().find(|(k, _)| k == OP_KEY) {
        Some((_, explicit)) => explicit.as_str(),
        None => default_operation(raw),
    };

    let op = Operation::parse(name)
        .ok_or_else(|| GatewayError::UnsupportedOperation(name.to_string()))?;

    let params = raw
        .iter()
        .filter(|(k, v)| {
            k != OP_KEY && k != PING_KEY && k != CREDENTIAL_KEY && !v.is_empty()
        })
        .cloned()
        .collect();

    Ok(NormalizedQuery { op, params })
}

/// Pick the default operation when the caller did not name one.
///
/// Any non-empty region filter means the caller wants the filtered
/// listing endpoint; everything else goes to the general listing.
fn default_operation(raw: &[(String, String)]) -> &'static str {
    let region_filtered = raw
        .iter()
        .any(|(k, v)| REGION_KEYS.contains(&k.as_str()) && !v.is_empty());

    if region_filtered {
        Operation::UnifyUsageCltr.name()
    } else {
        Operation::UnifyNewCltrList.name()
    }
}
