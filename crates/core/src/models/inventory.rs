//! Medical supplies and equipment inventory.

use super::{clearable, merge, Draft, Entity, EntityKind, Patch};
use crate::validation::{if_present, if_set, require_text, validate_date, Validate};
use crate::CrmResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryCategory {
    #[serde(rename = "Medical Device")]
    MedicalDevice,
    Pharmaceuticals,
    Surgical,
    General,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: u32,
    pub location: String,
    pub status: StockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: u32,
    pub location: String,
    pub status: StockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InventoryItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<InventoryCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<Option<String>>,
}

impl Validate for NewInventoryItem {
    fn validate(&self) -> CrmResult<()> {
        require_text("name", &self.name)?;
        require_text("location", &self.location)?;
        if_present(&self.expiry_date, |v| validate_date("expiryDate", v))
    }
}

impl Validate for InventoryItemPatch {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.name, |v| require_text("name", v))?;
        if_present(&self.location, |v| require_text("location", v))?;
        if_set(&self.expiry_date, |v| validate_date("expiryDate", v))
    }
}

impl Entity for InventoryItem {
    const KIND: EntityKind = EntityKind::InventoryItem;

    type Draft = NewInventoryItem;
    type Patch = InventoryItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewInventoryItem) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            location: draft.location,
            status: draft.status,
            expiry_date: draft.expiry_date,
        }
    }

    fn apply_patch(&mut self, patch: InventoryItemPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.category, patch.category);
        merge(&mut self.quantity, patch.quantity);
        merge(&mut self.location, patch.location);
        merge(&mut self.status, patch.status);
        merge(&mut self.expiry_date, patch.expiry_date);
    }
}

impl Draft for NewInventoryItem {
    type Entity = InventoryItem;
}

impl Patch for InventoryItemPatch {
    type Entity = InventoryItem;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
