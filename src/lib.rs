//! # ipexpr - IP address expressions for attendance record administration
//!
//! This library holds the address logic behind the admin console of the
//! attendance tracking system: classifying address text, validating the
//! addresses assigned to a user, and building or interpreting the filter
//! expressions the records API accepts.
//!
//! ## Overview
//!
//! Everything here is a pure function over strings. Nothing performs I/O
//! apart from the configuration loader, and nothing keeps state between calls,
//! so any caller may use these functions from independent UI events.
//!
//! ## Architecture
//!
//! - `address`: classification (`IPv4`/`IPv6`/`Invalid`), list validation, display formatting
//! - `filter`: `ipAddress` filter expressions, advanced search building, record filter state
//! - `compliance`: observed address vs. assignment status
//! - `config` / `config_loader`: YAML configuration
//! - `error`: the [`IpError`] taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use ipexpr::address::{classify, validate_address_list, AddressClassification};
//! use ipexpr::filter::{build_filter_expression, FilterExpression, FilterInput};
//!
//! assert_eq!(classify("10.0.0.5"), AddressClassification::IPv4);
//!
//! let result = validate_address_list("10.0.0.5; bogus");
//! assert_eq!(result.invalid_tokens, vec!["bogus"]);
//!
//! let input = FilterInput { subnet: "10.0.0.0/8".into(), ..Default::default() };
//! let expression: FilterExpression = build_filter_expression(&input).parse()?;
//! assert!(expression.matches(Some("10.1.2.3")));
//! # Ok::<(), ipexpr::IpError>(())
//! ```
//!
//! ## Query Parameters
//!
//! | Parameter | Values |
//! |---|---|
//! | `ipAddress` | bare address, `*text*`, `a.b.c.`, `unknown`, `range:<a>-<b>`, `subnet:<cidr>` |
//! | `ipMismatch` | `match`, `mismatch`, `unknown` |
//! | `ipAddresses` (body) | `,`/`;` separated list, empty clears the assignment |
//!
//! ## Error Handling
//!
//! Library functions return `Result<T, IpError>`. Validation failures are
//! ordinary values meant for inline display, never panics. The binary and the
//! configuration loader use `color_eyre` for reporting with context.

pub mod address;
pub mod compliance;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod filter;

pub use error::IpError;
