//! Multi-address field validation.
//!
//! Assigned address lists are free text delimited by `,` or `;`. An empty
//! list is valid and clears the assignment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::classifier::classify;
use super::display::format_for_display;
use crate::error::IpError;

/// Outcome of validating an address list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Every failing token in input order, trimmed but otherwise verbatim
    pub invalid_tokens: Vec<String>,
}

impl ValidationResult {
    /// Convert into a `Result` carrying all offending tokens.
    pub fn into_result(self) -> Result<(), IpError> {
        if self.valid {
            Ok(())
        } else {
            Err(IpError::ValidationFailed {
                tokens: self.invalid_tokens,
            })
        }
    }
}

/// Limits applied when an address list is saved as a user's assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    #[serde(default = "default_max_addresses")]
    pub max_addresses: usize,
    #[serde(default)]
    pub allow_duplicates: bool,
}

fn default_max_addresses() -> usize {
    10
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            max_addresses: default_max_addresses(),
            allow_duplicates: false,
        }
    }
}

/// Split on `,` or `;`, trim each segment and drop the empty ones.
pub fn split_address_list(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Owned variant of [`split_address_list`].
pub fn parse_assigned_addresses(text: &str) -> Vec<String> {
    split_address_list(text).map(str::to_string).collect()
}

/// Validate a free-form address list, reporting every invalid token.
///
/// # Examples
/// ```
/// use ipexpr::address::validate_address_list;
///
/// let result = validate_address_list("192.168.1.100; bogus; 10.0.0.5");
/// assert!(!result.valid);
/// assert_eq!(result.invalid_tokens, vec!["bogus"]);
/// assert!(validate_address_list("").valid);
/// ```
pub fn validate_address_list(text: &str) -> ValidationResult {
    let invalid_tokens: Vec<String> = split_address_list(text)
        .filter(|token| !classify(token).is_valid())
        .map(str::to_string)
        .collect();

    ValidationResult {
        valid: invalid_tokens.is_empty(),
        invalid_tokens,
    }
}

/// Validate an address list against an assignment policy.
///
/// Returns the parsed addresses on success. Blank text is accepted and
/// yields no addresses; text made only of delimiters is rejected.
pub fn validate_assignment(text: &str, policy: &AssignmentPolicy) -> Result<Vec<String>, IpError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    validate_address_list(text).into_result()?;

    let addresses = parse_assigned_addresses(text);
    if addresses.is_empty() {
        log::warn!("Rejected assignment without addresses: {:?}", text);
        return Err(IpError::NoAddressesFound {
            text: text.trim().to_string(),
        });
    }

    if !policy.allow_duplicates {
        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for address in &addresses {
            let normalized = format_for_display(address);
            if !seen.insert(normalized.clone()) && !duplicates.contains(&normalized) {
                duplicates.push(normalized);
            }
        }
        if !duplicates.is_empty() {
            log::warn!("Rejected assignment with duplicate addresses: {:?}", duplicates);
            return Err(IpError::DuplicateAddresses { duplicates });
        }
    }

    if addresses.len() > policy.max_addresses {
        log::warn!(
            "Rejected assignment with {} addresses (limit {})",
            addresses.len(),
            policy.max_addresses
        );
        return Err(IpError::TooManyAddresses {
            max: policy.max_addresses,
            found: addresses.len(),
        });
    }

    log::debug!("Accepted assignment of {} address(es)", addresses.len());
    Ok(addresses)
}

/// Remove one address from an assignment, returning the new list text.
///
/// Comparison uses the display form, so IPv6 case differences still match.
pub fn remove_from_assignment(current: &str, address: &str) -> Result<String, IpError> {
    if current.trim().is_empty() {
        return Err(IpError::EmptyAssignment);
    }
    let target = address.trim();
    if target.is_empty() {
        return Err(IpError::InvalidAddressFormat {
            token: String::new(),
            reason: "IP address to remove cannot be empty".to_string(),
        });
    }

    let target = format_for_display(target);
    let addresses = parse_assigned_addresses(current);
    let remaining: Vec<&str> = addresses
        .iter()
        .map(String::as_str)
        .filter(|candidate| format_for_display(candidate) != target)
        .collect();

    if remaining.len() == addresses.len() {
        return Err(IpError::AddressNotAssigned {
            address: address.trim().to_string(),
        });
    }
    Ok(remaining.join(", "))
}
