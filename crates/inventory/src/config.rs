//! Ledger configuration: which types a ledger accepts.
//!
//! Types are named by full name (`"Weapon.Sword"`) and resolved against a
//! frozen taxonomy; naming a category accepts everything under it.

use serde::{Deserialize, Serialize};

use satchel_core::DomainResult;
use satchel_items::{Taxonomy, TypeScope};

use crate::ledger::InventoryLedger;

/// Environment variable holding a comma-separated list of accepted types.
pub const ACCEPT_ENV_VAR: &str = "SATCHEL_ACCEPT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub accepted_types: Vec<String>,
}

impl LedgerConfig {
    pub fn new(accepted_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            accepted_types: accepted_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list. Blank entries are skipped.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim).filter(|name| !name.is_empty()))
    }

    /// Read [`ACCEPT_ENV_VAR`]; unset means nothing is accepted.
    pub fn from_env() -> Self {
        std::env::var(ACCEPT_ENV_VAR)
            .map(|list| Self::parse_list(&list))
            .unwrap_or_default()
    }

    pub fn resolve(&self, taxonomy: &Taxonomy) -> DomainResult<TypeScope> {
        let accepted = self
            .accepted_types
            .iter()
            .map(|name| taxonomy.resolve(name).cloned())
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(TypeScope::new(accepted))
    }

    pub fn build(&self, taxonomy: &Taxonomy) -> DomainResult<InventoryLedger> {
        Ok(InventoryLedger::new(self.resolve(taxonomy)?))
    }
}
