//! Item catalog domain: type taxonomy, capabilities, property bags and items.
//!
//! Pure domain logic. Diagnostics are emitted through `tracing`; installing a
//! subscriber is the host's job.

pub mod bag;
pub mod capability;
pub mod catalog;
pub mod effect;
pub mod item;
pub mod ordering;
pub mod scope;
pub mod taxonomy;

pub use bag::PropertyBag;
pub use capability::{
    AnyCapability, Capability, CapabilityFamily, CapabilityKind, CapabilityType, CarryWeight,
    Merchandise, Physical, Stackable, Tradeable,
};
pub use catalog::{Catalog, CatalogDocument, ItemRecord, TypeRecord};
pub use effect::{Affect, Appraisal, CarryLoad, EffectTarget, SlotPlan};
pub use item::{Item, ItemTemplate};
pub use ordering::{ByName, ByType, DefaultOrdering, ItemOrdering, sort_items};
pub use scope::TypeScope;
pub use taxonomy::{Taxonomy, TaxonomyBuilder, TypeNode, TypeNodeKind};
