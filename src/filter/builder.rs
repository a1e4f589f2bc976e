//! Advanced search panel → query parameters.
//!
//! The panel offers a range (start/end), a subnet, and a list of common
//! address shortcuts. Only one of them ends up in the `ipAddress`
//! parameter; the compliance choice is sent separately as `ipMismatch`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::expression::FilterExpression;
use crate::compliance::ComplianceStatus;
use crate::error::IpError;

pub const IP_ADDRESS_PARAM: &str = "ipAddress";
pub const IP_MISMATCH_PARAM: &str = "ipMismatch";

/// Address controls of the advanced search panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInput {
    #[serde(default)]
    pub range_start: String,
    #[serde(default)]
    pub range_end: String,
    #[serde(default)]
    pub subnet: String,
    /// Predefined prefix, `unknown`, or a literal address taken from statistics
    #[serde(default)]
    pub common_ips_choice: Option<String>,
}

impl FilterInput {
    /// Typed form of [`build_filter_expression`]; `None` when nothing is set.
    pub fn to_expression(&self) -> Result<Option<FilterExpression>, IpError> {
        FilterExpression::parse_optional(&build_filter_expression(self))
    }
}

/// Build the `ipAddress` filter text from the panel controls.
///
/// Precedence: a complete range, then the subnet, then the common choice.
/// Values are trimmed but not validated, and range bounds are not ordered.
///
/// # Examples
/// ```
/// use ipexpr::filter::{build_filter_expression, FilterInput};
///
/// let input = FilterInput {
///     range_start: "192.168.1.1".into(),
///     range_end: "192.168.1.50".into(),
///     subnet: "10.0.0.0/8".into(),
///     ..Default::default()
/// };
/// assert_eq!(build_filter_expression(&input), "range:192.168.1.1-192.168.1.50");
/// ```
pub fn build_filter_expression(input: &FilterInput) -> String {
    let start = input.range_start.trim();
    let end = input.range_end.trim();
    if !start.is_empty() && !end.is_empty() {
        return FilterExpression::Range {
            start: start.to_string(),
            end: end.to_string(),
        }
        .to_string();
    }

    let subnet = input.subnet.trim();
    if !subnet.is_empty() {
        return FilterExpression::Subnet(subnet.to_string()).to_string();
    }

    match input.common_ips_choice.as_deref().map(str::trim) {
        Some(choice) if !choice.is_empty() => choice.to_string(),
        _ => String::new(),
    }
}

/// Compliance choice shown in the advanced search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceFilter {
    Compliant,
    NonCompliant,
    NoAssignment,
}

impl ComplianceFilter {
    pub fn to_mismatch_param(self) -> MismatchParam {
        match self {
            ComplianceFilter::Compliant => MismatchParam::Match,
            ComplianceFilter::NonCompliant => MismatchParam::Mismatch,
            ComplianceFilter::NoAssignment => MismatchParam::Unknown,
        }
    }
}

impl FromStr for ComplianceFilter {
    type Err = IpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compliant" => Ok(ComplianceFilter::Compliant),
            "non-compliant" => Ok(ComplianceFilter::NonCompliant),
            "no-assignment" => Ok(ComplianceFilter::NoAssignment),
            _ => Err(IpError::UnknownComplianceStatus(raw.trim().to_string())),
        }
    }
}

/// Value of the `ipMismatch` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchParam {
    Match,
    Mismatch,
    Unknown,
}

impl MismatchParam {
    pub fn as_str(self) -> &'static str {
        match self {
            MismatchParam::Match => "match",
            MismatchParam::Mismatch => "mismatch",
            MismatchParam::Unknown => "unknown",
        }
    }

    /// Whether a record with this compliance status passes the filter.
    pub fn admits(self, status: ComplianceStatus) -> bool {
        match self {
            MismatchParam::Match => status == ComplianceStatus::Match,
            MismatchParam::Mismatch => status == ComplianceStatus::Mismatch,
            MismatchParam::Unknown => matches!(
                status,
                ComplianceStatus::NoAssignment | ComplianceStatus::UnknownIp
            ),
        }
    }
}

impl fmt::Display for MismatchParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the advanced search panel submits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearch {
    #[serde(default)]
    pub ip: FilterInput,
    #[serde(default)]
    pub compliance: Option<ComplianceFilter>,
}

/// Address-related filter state of the records page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilters {
    pub ip_address: String,
    pub ip_mismatch: Option<MismatchParam>,
}

impl RecordFilters {
    /// Overwrite both fields from a submitted advanced search.
    pub fn apply_advanced_search(&mut self, search: &AdvancedSearch) {
        self.ip_address = build_filter_expression(&search.ip);
        self.ip_mismatch = search.compliance.map(ComplianceFilter::to_mismatch_param);
        log::debug!(
            "Applied advanced search: ipAddress={:?} ipMismatch={:?}",
            self.ip_address,
            self.ip_mismatch
        );
    }

    pub fn clear(&mut self) {
        *self = RecordFilters::default();
    }

    /// Query parameters to attach to the records request; unset ones are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.ip_address.is_empty() {
            pairs.push((IP_ADDRESS_PARAM, self.ip_address.clone()));
        }
        if let Some(mismatch) = self.ip_mismatch {
            pairs.push((IP_MISMATCH_PARAM, mismatch.as_str().to_string()));
        }
        pairs
    }
}

/// Named advanced search persisted by the browser as an opaque blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreset {
    pub name: String,
    pub search: AdvancedSearch,
}

impl SearchPreset {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}
