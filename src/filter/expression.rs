//! Filter expressions exchanged through the `ipAddress` query parameter.
//!
//! Textual forms:
//! - `range:<start>-<end>`
//! - `subnet:<address>/<prefix>` (a bare CIDR is read as a subnet too)
//! - `unknown` (or `null`) for records without a captured address
//! - `*<text>*` for substring search
//! - a bare string ending in `.` for a prefix such as `192.168.1.`
//! - any other bare string for an exact address

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::{classify, ipv4_to_u32, AddressClassification};
use crate::error::IpError;

/// Value stored for records whose client address could not be captured.
pub const UNKNOWN_IP: &str = "Unknown";

const RANGE_TAG: &str = "range:";
const SUBNET_TAG: &str = "subnet:";

/// True when an observed record address counts as "not captured".
pub fn is_unknown_address(observed: Option<&str>) -> bool {
    match observed.map(str::trim) {
        None => true,
        Some(value) => value.is_empty() || value == UNKNOWN_IP,
    }
}

/// Parsed `ipAddress` filter
///
/// Values built with the constructors ([`FilterExpression::exact`],
/// [`FilterExpression::prefix`], ...) or parsed from text always survive a
/// `Display` / `FromStr` round trip. Variants are public for matching; one
/// built directly with colliding text (e.g. `Exact("unknown")`) does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterExpression {
    Exact(String),
    /// Inclusive bounds; their order is not checked
    Range { start: String, end: String },
    Subnet(String),
    Contains(String),
    Prefix(String),
    Unknown,
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Exact(address) => f.write_str(address),
            FilterExpression::Range { start, end } => write!(f, "{RANGE_TAG}{start}-{end}"),
            FilterExpression::Subnet(cidr) => write!(f, "{SUBNET_TAG}{cidr}"),
            FilterExpression::Contains(text) => write!(f, "*{text}*"),
            FilterExpression::Prefix(prefix) => f.write_str(prefix),
            FilterExpression::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for FilterExpression {
    type Err = IpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let query = raw.trim();

        if query.is_empty() {
            return Err(IpError::EmptyFilter);
        }
        if is_unknown_keyword(query) {
            return Ok(FilterExpression::Unknown);
        }
        if let Some(spec) = query.strip_prefix(RANGE_TAG) {
            return match spec.split('-').collect::<Vec<_>>().as_slice() {
                [start, end] => FilterExpression::range(start, end),
                _ => Err(malformed(query, "expected range:<start>-<end>")),
            };
        }
        if let Some(cidr) = query.strip_prefix(SUBNET_TAG) {
            return FilterExpression::subnet(cidr);
        }
        if is_wrapped(query) {
            return Ok(FilterExpression::contains(&query[1..query.len() - 1]));
        }
        if query.ends_with('.') {
            return FilterExpression::prefix(query);
        }
        if query.contains('/') {
            return FilterExpression::subnet(query);
        }
        FilterExpression::exact(query)
    }
}

fn malformed(expression: &str, reason: &str) -> IpError {
    IpError::MalformedFilter {
        expression: expression.to_string(),
        reason: reason.to_string(),
    }
}

fn is_unknown_keyword(text: &str) -> bool {
    text.eq_ignore_ascii_case("unknown") || text.eq_ignore_ascii_case("null")
}

fn is_wrapped(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('*') && text.ends_with('*')
}

/// Bare text that would be read back as `unknown`, a range or a subnet.
fn is_reserved(text: &str) -> bool {
    is_unknown_keyword(text) || text.starts_with(RANGE_TAG) || text.starts_with(SUBNET_TAG)
}

impl FilterExpression {
    /// Exact address match. Rejects text whose bare form reads back as
    /// another filter (a trailing `.`, a `/`, `*…*`, `unknown`, a tag).
    pub fn exact(address: &str) -> Result<Self, IpError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(IpError::EmptyFilter);
        }
        if is_reserved(address) || is_wrapped(address) || address.ends_with('.') || address.contains('/') {
            return Err(malformed(address, "collides with another filter form"));
        }
        Ok(FilterExpression::Exact(address.to_string()))
    }

    /// Address prefix such as `192.168.1.`; must end with `.`.
    pub fn prefix(prefix: &str) -> Result<Self, IpError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(IpError::EmptyFilter);
        }
        if !prefix.ends_with('.') || is_reserved(prefix) {
            return Err(malformed(prefix, "expected an address prefix ending with '.'"));
        }
        Ok(FilterExpression::Prefix(prefix.to_string()))
    }

    /// Substring search; the `*…*` wrapping keeps any text unambiguous.
    pub fn contains(text: &str) -> Self {
        FilterExpression::Contains(text.to_string())
    }

    pub fn subnet(cidr: &str) -> Result<Self, IpError> {
        let cidr = cidr.trim();
        if cidr.is_empty() {
            return Err(malformed(cidr, "expected subnet:<address>/<prefix>"));
        }
        Ok(FilterExpression::Subnet(cidr.to_string()))
    }

    /// Inclusive range; bounds are trimmed and must not contain `-`.
    pub fn range(start: &str, end: &str) -> Result<Self, IpError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() || start.contains('-') || end.contains('-') {
            return Err(malformed(
                &format!("{start}-{end}"),
                "expected range:<start>-<end>",
            ));
        }
        Ok(FilterExpression::Range {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// Parse an optional query value; empty input means "no filter".
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, IpError> {
        match raw.parse() {
            Ok(expression) => Ok(Some(expression)),
            Err(IpError::EmptyFilter) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether a record with the observed address passes this filter.
    ///
    /// Range and subnet checks only apply to IPv4 addresses.
    pub fn matches(&self, observed: Option<&str>) -> bool {
        if is_unknown_address(observed) {
            return *self == FilterExpression::Unknown;
        }
        let address = observed.map(str::trim).unwrap_or_default();

        match self {
            FilterExpression::Unknown => false,
            FilterExpression::Range { start, end } => ipv4_in_range(address, start, end),
            FilterExpression::Subnet(cidr) => ipv4_in_subnet(address, cidr),
            FilterExpression::Prefix(prefix) => address.starts_with(prefix.as_str()),
            FilterExpression::Contains(text) => address.contains(text.as_str()),
            FilterExpression::Exact(expected) => address == expected,
        }
    }
}

fn ipv4_in_range(address: &str, start: &str, end: &str) -> bool {
    match (ipv4_to_u32(address), ipv4_to_u32(start), ipv4_to_u32(end)) {
        (Some(ip), Some(low), Some(high)) => low <= ip && ip <= high,
        _ => false,
    }
}

fn ipv4_in_subnet(address: &str, cidr: &str) -> bool {
    let Some((network, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.trim().parse::<u32>() else {
        return false;
    };
    if prefix > 32 {
        return false;
    }
    match (ipv4_to_u32(address), ipv4_to_u32(network.trim())) {
        (Some(ip), Some(net)) => {
            let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
            ip & mask == net & mask
        }
        _ => false,
    }
}

/// `ipType` filter for advanced search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressTypeFilter {
    Ipv4,
    Ipv6,
    Unknown,
}

impl FromStr for AddressTypeFilter {
    type Err = IpError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ipv4" => Ok(AddressTypeFilter::Ipv4),
            "ipv6" => Ok(AddressTypeFilter::Ipv6),
            "unknown" => Ok(AddressTypeFilter::Unknown),
            _ => Err(IpError::UnknownAddressType(raw.trim().to_string())),
        }
    }
}

impl AddressTypeFilter {
    pub fn matches(self, observed: Option<&str>) -> bool {
        if is_unknown_address(observed) {
            return self == AddressTypeFilter::Unknown;
        }
        let kind = classify(observed.map(str::trim).unwrap_or_default());
        match self {
            AddressTypeFilter::Ipv4 => kind == AddressClassification::IPv4,
            AddressTypeFilter::Ipv6 => kind == AddressClassification::IPv6,
            AddressTypeFilter::Unknown => kind == AddressClassification::Invalid,
        }
    }
}
