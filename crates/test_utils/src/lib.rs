//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `logging`: One-shot tracing setup for tests

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
