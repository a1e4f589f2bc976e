//! Error types shared by the address and filter modules.

/// Errors produced while validating addresses or interpreting filters.
///
/// Every variant carries enough context to be shown to the user as an
/// inline message; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpError {
    #[error("Invalid IP address format '{token}': {reason}")]
    InvalidAddressFormat { token: String, reason: String },

    #[error("Invalid IP addresses: {}", tokens.join(", "))]
    ValidationFailed { tokens: Vec<String> },

    #[error("Duplicate IP addresses found in assignment: {}", duplicates.join(", "))]
    DuplicateAddresses { duplicates: Vec<String> },

    #[error("Too many IP addresses assigned (max: {max}, found: {found})")]
    TooManyAddresses { max: usize, found: usize },

    #[error("No valid IP addresses found in assignment '{text}'")]
    NoAddressesFound { text: String },

    #[error("Cannot remove an IP address from an empty assignment")]
    EmptyAssignment,

    #[error("IP address {address} not found in current assignment")]
    AddressNotAssigned { address: String },

    #[error("Filter expression is empty")]
    EmptyFilter,

    #[error("Malformed filter expression '{expression}': {reason}")]
    MalformedFilter { expression: String, reason: String },

    #[error("Unknown compliance status '{0}' (expected compliant, non-compliant or no-assignment)")]
    UnknownComplianceStatus(String),

    #[error("Unknown address type '{0}' (expected ipv4, ipv6 or unknown)")]
    UnknownAddressType(String),
}

impl IpError {
    /// Offending tokens for display next to the input field.
    pub fn offending_tokens(&self) -> Vec<String> {
        match self {
            IpError::InvalidAddressFormat { token, .. } => vec![token.clone()],
            IpError::ValidationFailed { tokens } => tokens.clone(),
            IpError::DuplicateAddresses { duplicates } => duplicates.clone(),
            IpError::AddressNotAssigned { address } => vec![address.clone()],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_lists_every_token() {
        let err = IpError::ValidationFailed {
            tokens: vec!["bogus".to_string(), "1.2.3".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid IP addresses: bogus, 1.2.3");
        assert_eq!(err.offending_tokens(), vec!["bogus", "1.2.3"]);
    }

    #[test]
    fn test_too_many_message() {
        let err = IpError::TooManyAddresses { max: 10, found: 12 };
        assert_eq!(err.to_string(), "Too many IP addresses assigned (max: 10, found: 12)");
        assert!(err.offending_tokens().is_empty());
    }
}
