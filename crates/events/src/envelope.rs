use serde::{Deserialize, Serialize};
use uuid::Uuid;

use satchel_core::LedgerId;

/// Envelope for an event, containing stream metadata.
///
/// Notes:
/// - `ledger_id` names the stream the event belongs to.
/// - `sequence_number` is monotonically increasing per ledger, starting at 1.
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    ledger_id: LedgerId,

    /// Monotonically increasing position in the ledger stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, ledger_id: LedgerId, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            ledger_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn ledger_id(&self) -> LedgerId {
        self.ledger_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
