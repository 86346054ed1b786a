//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL backing for the ledger system,
//! implementing the `domain_ledger::LedgerStore` port with SQLx.
//!
//! # Architecture
//!
//! The domain layer depends only on the storage port; this crate supplies
//! the adapter. Journal entry commits are transactional and document
//! counters increment in a single atomic statement, so the posting
//! guarantees hold under concurrent writers.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, ensure_schema, DatabaseConfig, PostgresLedgerStore};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = create_pool(&config).await?;
//! ensure_schema(&pool).await?;
//! let store = PostgresLedgerStore::new(pool);
//! ```

pub mod config;
pub mod error;
pub mod pool;
pub mod schema;
pub mod store;

pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabasePool};
pub use schema::ensure_schema;
pub use store::PostgresLedgerStore;
