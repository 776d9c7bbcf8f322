//! `satchel` command: load a catalog, stock one of every item into a ledger
//! and report what was accepted.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use satchel_inventory::{InventoryLedger, LedgerConfig};
use satchel_items::{Appraisal, CarryLoad, Catalog, DefaultOrdering, Item, ItemOrdering, SlotPlan};

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("invalid catalog {}", path.display()))
}

/// One catalog item as listed in the report.
#[derive(Debug, Clone)]
pub struct ReportLine {
    pub item: Item,
    pub description: String,
    pub accepted: bool,
    pub stack_limit: Option<u32>,
}

/// Catalog listing plus the totals of what the ledger took in.
#[derive(Debug, Clone)]
pub struct Report {
    pub lines: Vec<ReportLine>,
    pub stored: usize,
    pub load: CarryLoad,
    pub appraisal: Appraisal,
}

impl Report {
    pub fn build(catalog: &Catalog, config: &LedgerConfig) -> anyhow::Result<Self> {
        let mut ledger = config
            .build(catalog.taxonomy())
            .context("invalid accepted type list")?;

        let mut lines: Vec<ReportLine> = catalog
            .templates()
            .iter()
            .map(|template| {
                let item = template.instantiate();
                let mut slots = SlotPlan::default();
                item.affect(&mut slots);
                ReportLine {
                    accepted: ledger.add_one(&item),
                    description: template.description().to_string(),
                    stack_limit: slots.stack_limit,
                    item,
                }
            })
            .collect();
        lines.sort_by(|a, b| DefaultOrdering.compare(&a.item, &b.item));

        let (load, appraisal) = totals(&ledger);
        info!(items = lines.len(), stored = ledger.len(), "catalog stocked");

        Ok(Self {
            lines,
            stored: ledger.len(),
            load,
            appraisal,
        })
    }
}

fn totals(ledger: &InventoryLedger) -> (CarryLoad, Appraisal) {
    let mut load = CarryLoad::default();
    let mut appraisal = Appraisal::default();
    for (item, quantity) in ledger {
        for _ in 0..quantity {
            item.affect(&mut load);
            item.affect(&mut appraisal);
        }
    }
    (load, appraisal)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let mark = if line.accepted { '+' } else { '-' };
            write!(f, "{mark} {}", line.item)?;

            let capabilities: Vec<String> =
                line.item.properties().sorted().iter().map(|c| c.to_string()).collect();
            if !capabilities.is_empty() {
                write!(f, " [{}]", capabilities.join(", "))?;
            }
            if !line.description.is_empty() {
                write!(f, ": {}", line.description)?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "stored {} of {} items; weight {}; buy {}; sell {}",
            self.stored,
            self.lines.len(),
            self.load.total_weight,
            self.appraisal.buy_total,
            self.appraisal.sell_total
        )
    }
}
