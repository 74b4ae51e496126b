//! Implementations of the [`MarketStore`] contract.
//!
//! [`MarketStore`]: sharehub_core::store::MarketStore

pub mod memory;
pub mod postgres;

pub use memory::MemoryMarketStore;
pub use postgres::PgMarketStore;
