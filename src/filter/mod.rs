//! Record filter expressions.
//!
//! `expression` owns the textual encoding of the `ipAddress` query value and
//! how it selects records; `builder` turns advanced search controls into
//! that encoding plus the separate `ipMismatch` parameter.

pub mod builder;
pub mod expression;

pub use builder::{
    build_filter_expression, AdvancedSearch, ComplianceFilter, FilterInput, MismatchParam,
    RecordFilters, SearchPreset, IP_ADDRESS_PARAM, IP_MISMATCH_PARAM,
};
pub use expression::{is_unknown_address, AddressTypeFilter, FilterExpression, UNKNOWN_IP};
