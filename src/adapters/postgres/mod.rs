//! PostgreSQL adapters - Database implementations for the ledger port.
//!
//! - `PostgresLedger` - events, payments and tickets tables
//! - `connect` - pool construction and optional migrations

mod ledger;
mod pool;

pub use ledger::PostgresLedger;
pub use pool::connect;
