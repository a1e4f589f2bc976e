//! Single-token address classification.
//!
//! Classification is regex based and intentionally mirrors the patterns the
//! records backend uses, including its lenient compressed IPv6 forms.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IpError;

/// Longest textual form of an IPv6 address with an embedded IPv4 tail.
pub const MAX_ADDRESS_LEN: usize = 45;

/// Compiled address patterns
pub struct AddressPatterns {
    /// Four dotted decimal octets, each 0-255 (leading zeros tolerated)
    pub ipv4: Regex,
    /// Full eight-group form, `::1`, `::` and single-elision compressed forms
    pub ipv6: Regex,
}

impl AddressPatterns {
    pub fn new() -> Self {
        Self {
            ipv4: Regex::new(
                r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
            ).expect("Invalid ipv4 regex"),
            ipv6: Regex::new(concat!(
                r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$|",
                r"^::1$|",
                r"^::$|",
                r"^([0-9a-fA-F]{1,4}:){1,7}:$|",
                r"^([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}$|",
                r"^([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}$|",
                r"^([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}$|",
                r"^([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}$|",
                r"^([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}$|",
                r"^[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})$|",
                r"^:((:[0-9a-fA-F]{1,4}){1,7}|:)$",
            )).expect("Invalid ipv6 regex"),
        }
    }
}

impl Default for AddressPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<AddressPatterns> = LazyLock::new(AddressPatterns::new);

/// Result of classifying a single address token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressClassification {
    IPv4,
    IPv6,
    Invalid,
}

impl AddressClassification {
    pub fn is_valid(self) -> bool {
        self != AddressClassification::Invalid
    }
}

impl fmt::Display for AddressClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AddressClassification::IPv4 => "IPv4",
            AddressClassification::IPv6 => "IPv6",
            AddressClassification::Invalid => "Invalid",
        };
        f.write_str(label)
    }
}

/// Classify a trimmed, non-empty token as IPv4, IPv6 or invalid.
///
/// The token is matched as given; callers are expected to trim it and to
/// skip empty tokens before calling.
///
/// # Examples
/// ```
/// use ipexpr::address::{classify, AddressClassification};
///
/// assert_eq!(classify("192.168.1.100"), AddressClassification::IPv4);
/// assert_eq!(classify("2001:db8::1"), AddressClassification::IPv6);
/// assert_eq!(classify("256.1.1.1"), AddressClassification::Invalid);
/// ```
pub fn classify(token: &str) -> AddressClassification {
    if PATTERNS.ipv4.is_match(token) {
        AddressClassification::IPv4
    } else if PATTERNS.ipv6.is_match(token) {
        AddressClassification::IPv6
    } else {
        AddressClassification::Invalid
    }
}

pub fn is_ipv4(token: &str) -> bool {
    classify(token) == AddressClassification::IPv4
}

pub fn is_ipv6(token: &str) -> bool {
    classify(token) == AddressClassification::IPv6
}

/// Validate a single address, explaining why it was rejected.
///
/// Surrounding whitespace is trimmed first. The reason strings are meant to
/// be shown verbatim under the input field.
pub fn validate_address(raw: &str) -> Result<AddressClassification, IpError> {
    let token = raw.trim();
    let reject = |reason: &str| IpError::InvalidAddressFormat {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if token.is_empty() {
        return Err(reject("IP address cannot be empty"));
    }
    if token.chars().count() > MAX_ADDRESS_LEN {
        return Err(reject("exceeds maximum length of 45 characters"));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(reject("spaces not allowed in IP addresses"));
    }

    match classify(token) {
        AddressClassification::Invalid => {
            let reason = if token.contains('.') && !token.contains(':') {
                "must be in format x.x.x.x where x is 0-255"
            } else if token.contains(':') {
                "invalid IPv6 format"
            } else {
                "must be valid IPv4 or IPv6 address"
            };
            log::debug!("Rejected address '{}': {}", token, reason);
            Err(reject(reason))
        }
        kind => Ok(kind),
    }
}

/// Convert a classified IPv4 token to its numeric value.
///
/// Returns `None` for anything that does not classify as IPv4. Leading zeros
/// are read as decimal, so `010.0.0.1` is `10.0.0.1`.
pub fn ipv4_to_u32(token: &str) -> Option<u32> {
    if !is_ipv4(token) {
        return None;
    }
    token.split('.').try_fold(0u32, |acc, octet| {
        octet.parse::<u8>().ok().map(|value| (acc << 8) | u32::from(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_reference_fixtures() {
        assert_eq!(classify("192.168.1.100"), AddressClassification::IPv4);
        assert_eq!(classify("256.1.1.1"), AddressClassification::Invalid);
        assert_eq!(classify("2001:db8::1"), AddressClassification::IPv6);
        assert_eq!(classify("not-an-ip"), AddressClassification::Invalid);
        assert_eq!(classify("::1"), AddressClassification::IPv6);
        assert_eq!(classify("::"), AddressClassification::IPv6);
    }

    #[test]
    fn test_classify_ipv4_edges() {
        assert_eq!(classify("0.0.0.0"), AddressClassification::IPv4);
        assert_eq!(classify("255.255.255.255"), AddressClassification::IPv4);
        assert_eq!(classify("01.02.003.4"), AddressClassification::IPv4);
        assert_eq!(classify("1.2.3"), AddressClassification::Invalid);
        assert_eq!(classify("1.2.3.4.5"), AddressClassification::Invalid);
        assert_eq!(classify("1.2.3.256"), AddressClassification::Invalid);
        assert_eq!(classify("0001.2.3.4"), AddressClassification::Invalid);
        assert_eq!(classify(" 1.2.3.4"), AddressClassification::Invalid);
    }

    #[test]
    fn test_classify_ipv6_forms() {
        assert_eq!(classify("2001:0db8:85a3:0000:0000:8a2e:0370:7334"), AddressClassification::IPv6);
        assert_eq!(classify("2001:DB8:85A3::8A2E:370:7334"), AddressClassification::IPv6);
        assert_eq!(classify("fe80::"), AddressClassification::IPv6);
        assert_eq!(classify("::ffff"), AddressClassification::IPv6);
        assert_eq!(classify("1:2:3:4:5:6:7"), AddressClassification::Invalid);
        assert_eq!(classify("gggg::1"), AddressClassification::Invalid);
        assert_eq!(classify(":::"), AddressClassification::Invalid);
    }

    #[test]
    fn test_every_octet_combination_is_ipv4() {
        for a in [0u32, 1, 9, 10, 99, 100, 199, 200, 249, 250, 255] {
            let s = format!("{a}.{a}.{a}.{a}");
            assert_eq!(classify(&s), AddressClassification::IPv4, "{s}");
            assert!(!is_ipv6(&s));
        }
    }

    #[test]
    fn test_validate_address_reasons() {
        assert_eq!(validate_address(" 10.0.0.5 "), Ok(AddressClassification::IPv4));

        let err = validate_address("   ").unwrap_err();
        assert!(matches!(err, IpError::InvalidAddressFormat { ref reason, .. } if reason.contains("empty")));

        let err = validate_address("10.0 .0.5").unwrap_err();
        assert!(matches!(err, IpError::InvalidAddressFormat { ref reason, .. } if reason.contains("spaces")));

        let err = validate_address("300.1.1.1").unwrap_err();
        assert!(matches!(err, IpError::InvalidAddressFormat { ref reason, .. } if reason.contains("x.x.x.x")));

        let err = validate_address("zz::1").unwrap_err();
        assert!(matches!(err, IpError::InvalidAddressFormat { ref reason, .. } if reason.contains("IPv6")));

        let long = "1".repeat(46);
        let err = validate_address(&long).unwrap_err();
        assert!(matches!(err, IpError::InvalidAddressFormat { ref reason, .. } if reason.contains("45")));
    }

    #[test]
    fn test_ipv4_to_u32() {
        assert_eq!(ipv4_to_u32("0.0.0.0"), Some(0));
        assert_eq!(ipv4_to_u32("192.168.1.1"), Some(0xC0A8_0101));
        assert_eq!(ipv4_to_u32("255.255.255.255"), Some(u32::MAX));
        assert_eq!(ipv4_to_u32("010.0.0.1"), Some(0x0A00_0001));
        assert_eq!(ipv4_to_u32("::1"), None);
        assert_eq!(ipv4_to_u32("192.168.1."), None);
    }
}
