//! Inventory domain module.
//!
//! A ledger of item identities and their quantities, restricted to a type
//! scope, that reports every change as an event. Deterministic domain logic
//! only (no IO, no storage).

pub mod config;
pub mod error;
pub mod ledger;
pub mod operation;

pub use config::{ACCEPT_ENV_VAR, LedgerConfig};
pub use error::LedgerError;
pub use ledger::{InventoryLedger, Iter};
pub use operation::{ItemOperation, OperationKind, QuantityChange};
