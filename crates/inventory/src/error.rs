use thiserror::Error;

/// Why a ledger mutation was refused.
///
/// Items are carried by their display form so errors stay cheap to move
/// across threads and to log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("{item} is not accepted by this ledger")]
    NotAccepted { item: String },

    #[error("{item} is not stored in this ledger")]
    NotPresent { item: String },

    #[error("quantity of {item} would overflow")]
    QuantityOverflow { item: String },
}
