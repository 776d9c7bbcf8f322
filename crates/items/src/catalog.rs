//! Catalog documents: the host-supplied type definitions and item records.
//!
//! A [`CatalogDocument`] is plain data (deserializable from JSON). Turning it
//! into a [`Catalog`] validates every reference, freezes the taxonomy and
//! resolves each item record into an [`ItemTemplate`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use satchel_core::{DomainError, DomainResult};

use crate::capability::Capability;
use crate::item::{Item, ItemTemplate};
use crate::taxonomy::{Taxonomy, TypeNodeKind};

/// One type definition. `category` is the parent's full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: TypeNodeKind,
}

fn default_kind() -> TypeNodeKind {
    TypeNodeKind::ItemType
}

/// One item definition. `item_type` is the full name of an item type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<Capability>,
}

/// Serialized catalog. Types must be listed parents-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub types: Vec<TypeRecord>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// A validated, frozen catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    taxonomy: Taxonomy,
    templates: Vec<ItemTemplate>,
}

impl Catalog {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed catalog: {e}")))?;
        Self::from_document(&document)
    }

    pub fn from_document(document: &CatalogDocument) -> DomainResult<Self> {
        let mut builder = Taxonomy::builder();
        for record in &document.types {
            builder.define(&record.name, record.kind, record.category.as_deref())?;
        }
        let taxonomy = builder.build();

        let mut seen = BTreeSet::new();
        let mut templates = Vec::with_capacity(document.items.len());
        for record in &document.items {
            let item_type = taxonomy.resolve(&record.item_type)?;
            if item_type.kind() != TypeNodeKind::ItemType {
                return Err(DomainError::invariant(format!(
                    "item `{}` uses `{item_type}`, which is a category",
                    record.name
                )));
            }
            if !seen.insert((item_type.full_name().to_string(), record.name.clone())) {
                return Err(DomainError::duplicate(format!(
                    "item `{}` of type `{item_type}`",
                    record.name
                )));
            }

            let template = record.properties.iter().cloned().fold(
                ItemTemplate::new(item_type.clone(), record.name.clone())
                    .describe(record.description.clone()),
                ItemTemplate::with,
            );
            templates.push(template);
        }

        debug!(
            types = taxonomy.len(),
            items = templates.len(),
            "catalog loaded"
        );

        Ok(Self {
            taxonomy,
            templates,
        })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Templates in catalog order.
    pub fn templates(&self) -> &[ItemTemplate] {
        &self.templates
    }

    pub fn template(&self, type_name: &str, name: &str) -> Option<&ItemTemplate> {
        self.templates
            .iter()
            .find(|t| t.item_type().full_name() == type_name && t.name() == name)
    }

    /// Instantiate one item from the template with the given type and name.
    pub fn instantiate(&self, type_name: &str, name: &str) -> DomainResult<Item> {
        self.template(type_name, name)
            .map(ItemTemplate::instantiate)
            .ok_or_else(|| DomainError::unknown(format!("item `{name}` of type `{type_name}`")))
    }
}
