//! Common error handling utilities for CertStore
//!
//! This crate holds the pieces of error handling that more than one crate
//! needs to agree on:
//!
//! - **Error Codes**: stable string codes returned to API clients
//! - **Error Classes**: transport-independent classification of failures
//! - **Process Errors**: the error type used by binaries during startup
//!
//! Each crate keeps its own `thiserror` enum with structured context and maps
//! every variant to a code and a class from here. Only the server decides
//! how a class becomes an HTTP status.
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorClass};
//!
//! fn describe(class: ErrorClass) -> &'static str {
//!     match class {
//!         ErrorClass::Validation => codes::validation::INVALID_INPUT,
//!         _ => codes::system::INTERNAL_ERROR,
//!     }
//! }
//!
//! assert_eq!(describe(ErrorClass::Validation), "VALIDATION_3001");
//! ```

pub mod codes;
pub mod types;

pub use types::*;
