//! Agent store adapter implementations for factory-contract.

pub mod memory_store;
#[cfg(feature = "postgres")]
pub mod postgres_store;

pub use memory_store::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres_store::PostgresStore;
