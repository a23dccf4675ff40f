//! Upstream operations and their service mapping.
//!
//! # Responsibilities
//! - Gate operation names against the fixed allow-list
//! - Map each allow-listed operation to its upstream service family
//! - Resolve a service to its configured base URL

use std::fmt;

use crate::config::UpstreamConfig;

/// An allow-listed upstream operation.
///
/// Constructing one via [`Operation::parse`] is the only way to obtain a
/// value, so every `Operation` in the pipeline is guaranteed callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Unified list of newly registered assets.
    UnifyNewCltrList,
    /// Asset list filtered by usage, region and price.
    UnifyUsageCltr,
    /// Top-level usage category codes.
    OnbidTopCodeInfo,
}

impl Operation {
    /// Parse an operation name against the allow-list.
    ///
    /// Returns `None` for any name outside the allow-list, including
    /// names the upstream itself would accept.
    pub fn parse(name: &str) -> Option<Operation> {
        match name {
            "getUnifyNewCltrList" => Some(Operation::UnifyNewCltrList),
            "getUnifyUsageCltr" => Some(Operation::UnifyUsageCltr),
            "getOnbidTopCodeInfo" => Some(Operation::OnbidTopCodeInfo),
            _ => None,
        }
    }

    /// Upstream wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::UnifyNewCltrList => "getUnifyNewCltrList",
            Operation::UnifyUsageCltr => "getUnifyUsageCltr",
            Operation::OnbidTopCodeInfo => "getOnbidTopCodeInfo",
        }
    }

    /// Service family this operation belongs to.
    pub fn service(&self) -> Service {
        match self {
            Operation::UnifyNewCltrList | Operation::UnifyUsageCltr => Service::ThingInfoInquire,
            Operation::OnbidTopCodeInfo => Service::OnbidCodeInfoInquire,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An upstream service family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Asset information inquiry service.
    ThingInfoInquire,
    /// Code table inquiry service.
    OnbidCodeInfoInquire,
}

impl Service {
    /// Base URL for this service from the upstream configuration.
    pub fn base_url<'a>(&self, upstream: &'a UpstreamConfig) -> &'a str {
        match self {
            Service::ThingInfoInquire => &upstream.thing_base_url,
            Service::OnbidCodeInfoInquire => &upstream.code_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    #[test]
    fn test_allow_listed_operations_parse() {
        assert_eq!(
            Operation::parse("getUnifyNewCltrList"),
            Some(Operation::UnifyNewCltrList)
        );
        assert_eq!(
            Operation::parse("getUnifyUsageCltr"),
            Some(Operation::UnifyUsageCltr)
        );
        assert_eq!(
            Operation::parse("getOnbidTopCodeInfo"),
            Some(Operation::OnbidTopCodeInfo)
        );
    }

    #[test]
    fn test_unknown_operations_rejected() {
        assert_eq!(Operation::parse("getOnbidList"), None);
        assert_eq!(Operation::parse(""), None);
        // Case matters; the upstream names are exact.
        assert_eq!(Operation::parse("getunifynewcltrlist"), None);
    }

    #[test]
    fn test_service_mapping() {
        assert_eq!(
            Operation::UnifyNewCltrList.service(),
            Service::ThingInfoInquire
        );
        assert_eq!(Operation::UnifyUsageCltr.service(), Service::ThingInfoInquire);
        assert_eq!(
            Operation::OnbidTopCodeInfo.service(),
            Service::OnbidCodeInfoInquire
        );
    }

    #[test]
    fn test_base_url_resolution() {
        let upstream = UpstreamConfig::default();
        assert!(Service::ThingInfoInquire
            .base_url(&upstream)
            .ends_with("ThingInfoInquireSvc"));
        assert!(Service::OnbidCodeInfoInquire
            .base_url(&upstream)
            .ends_with("OnbidCodeInfoInquireSvc"));
    }
}
