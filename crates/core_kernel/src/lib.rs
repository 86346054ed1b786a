//! Core Kernel - Foundational types and utilities for the ledger engine
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - The explicit company context threaded through every core call
//! - The shared storage-port error type

pub mod context;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use context::CompanyContext;
pub use error::CoreError;
pub use identifiers::{AccountId, CompanyId, JournalEntryId, JournalLineId, UserId};
pub use money::{Currency, Money, MoneyError, BALANCE_TOLERANCE};
pub use ports::PortError;
