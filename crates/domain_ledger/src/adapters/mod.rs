//! Storage adapters for the ledger domain

mod memory;

pub use memory::InMemoryLedgerStore;
