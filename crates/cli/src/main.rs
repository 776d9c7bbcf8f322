use std::path::Path;

use anyhow::Context;

use satchel_inventory::LedgerConfig;

fn main() -> anyhow::Result<()> {
    satchel_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: satchel <catalog.json>")?;

    let config = LedgerConfig::from_env();
    if config.accepted_types.is_empty() {
        tracing::warn!("SATCHEL_ACCEPT not set; the ledger accepts no types");
    }

    let catalog = satchel_cli::load_catalog(Path::new(&path))?;
    let report = satchel_cli::Report::build(&catalog, &config)?;
    print!("{report}");

    Ok(())
}
