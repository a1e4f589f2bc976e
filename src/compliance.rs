//! Compliance of an observed record address with a user's assignment.

use serde::{Deserialize, Serialize};

use crate::address::{format_for_display, split_address_list};
use crate::filter::is_unknown_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Match,
    Mismatch,
    NoAssignment,
    UnknownIp,
}

/// Compare an observed address with an assigned address list.
///
/// A blank assignment wins over an unknown address. Addresses are compared
/// in display form so IPv6 case differences do not cause a mismatch.
pub fn compliance_status(observed: Option<&str>, assigned: &str) -> ComplianceStatus {
    if assigned.trim().is_empty() {
        return ComplianceStatus::NoAssignment;
    }
    if is_unknown_address(observed) {
        return ComplianceStatus::UnknownIp;
    }

    let address = format_for_display(observed.unwrap_or_default().trim());
    if split_address_list(assigned).any(|candidate| format_for_display(candidate) == address) {
        ComplianceStatus::Match
    } else {
        ComplianceStatus::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_status() {
        assert_eq!(compliance_status(Some("10.0.0.1"), ""), ComplianceStatus::NoAssignment);
        assert_eq!(compliance_status(None, "  "), ComplianceStatus::NoAssignment);
        assert_eq!(compliance_status(None, "10.0.0.1"), ComplianceStatus::UnknownIp);
        assert_eq!(compliance_status(Some("Unknown"), "10.0.0.1"), ComplianceStatus::UnknownIp);
        assert_eq!(compliance_status(Some("10.0.0.1"), "10.0.0.2; 10.0.0.1"), ComplianceStatus::Match);
        assert_eq!(compliance_status(Some("2001:DB8::1"), "2001:db8::1"), ComplianceStatus::Match);
        assert_eq!(compliance_status(Some("10.0.0.3"), "10.0.0.2, 10.0.0.1"), ComplianceStatus::Mismatch);
    }
}
