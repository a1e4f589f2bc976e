//! Address classification, list validation and display formatting.
//!
//! This module covers everything done with raw address text typed by an
//! administrator: deciding whether a token is IPv4 or IPv6, validating the
//! comma/semicolon separated assignment field, and rendering addresses.

pub mod classifier;
pub mod display;
pub mod validator;

// Re-export commonly used types
pub use classifier::{classify, ipv4_to_u32, is_ipv4, is_ipv6, validate_address, AddressClassification};
pub use display::{format_for_display, truncate_for_display, ELLIPSIS};
pub use validator::{
    parse_assigned_addresses, remove_from_assignment, split_address_list, validate_address_list,
    validate_assignment, AssignmentPolicy, ValidationResult,
};
