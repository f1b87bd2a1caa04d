//! Entity models.
//!
//! Every entity is a flat record with a store-assigned string identifier. Records never
//! reference each other by key; a lab result names its patient as free text.
//!
//! Each entity comes with two input shapes:
//! - a **draft** (`New*`): all fields except `id`, used to create a record
//! - a **patch** (`*Patch`): every field optional, merged into an existing record. Patch fields
//!   for optional record fields are `Option<Option<T>>`: absent keeps the value, `null` clears it.
//!
//! Both input shapes reject unknown fields so a caller can never smuggle in an `id`.

pub mod ambulance;
pub mod inventory;
pub mod lab_result;
pub mod patient;
pub mod staff;

pub use ambulance::{AmbulanceStatus, AmbulanceUnit, AmbulanceUnitPatch, Coordinate, Crew, NewAmbulanceUnit};
pub use inventory::{InventoryCategory, InventoryItem, InventoryItemPatch, NewInventoryItem, StockStatus};
pub use lab_result::{LabPriority, LabResult, LabResultPatch, LabStatus, NewLabResult};
pub use patient::{Gender, NewPatient, PatientPatch, PatientRecord, PatientStatus, Vitals};
pub use staff::{NewStaffMember, StaffMember, StaffMemberPatch, StaffRole};

use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The five entity collections held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Patient,
    LabResult,
    StaffMember,
    InventoryItem,
    AmbulanceUnit,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Patient,
        EntityKind::LabResult,
        EntityKind::StaffMember,
        EntityKind::InventoryItem,
        EntityKind::AmbulanceUnit,
    ];

    /// Key under which a single record of this kind is returned to tool callers.
    pub fn wire_key(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patient",
            EntityKind::LabResult => "labResult",
            EntityKind::StaffMember => "staffMember",
            EntityKind::InventoryItem => "inventoryItem",
            EntityKind::AmbulanceUnit => "ambulanceUnit",
        }
    }

    /// Key under which a whole collection of this kind is returned to tool callers.
    pub fn collection_key(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patients",
            EntityKind::LabResult => "labResults",
            EntityKind::StaffMember => "staff",
            EntityKind::InventoryItem => "inventory",
            EntityKind::AmbulanceUnit => "ambulanceUnits",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Patient => "patient",
            EntityKind::LabResult => "lab result",
            EntityKind::StaffMember => "staff member",
            EntityKind::InventoryItem => "inventory item",
            EntityKind::AmbulanceUnit => "ambulance unit",
        };
        f.write_str(label)
    }
}

/// A stored record type.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    type Draft: Draft<Entity = Self>;
    type Patch: Patch<Entity = Self>;

    fn id(&self) -> &str;

    /// Builds the record from a validated draft and a freshly generated identifier.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Replaces every field present in `patch`; absent fields keep their current value.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Creation input for an entity.
pub trait Draft: Validate + fmt::Debug + Serialize + DeserializeOwned {
    type Entity: Entity<Draft = Self>;
}

/// Partial update input for an entity.
pub trait Patch: Validate + fmt::Debug + Serialize + DeserializeOwned {
    type Entity: Entity<Patch = Self>;

    /// True when the patch would not change any field.
    fn is_empty(&self) -> bool;
}

/// Overwrites `target` with the patched value when one is present.
pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Deserializes a clearable patch field. Pair with `#[serde(default)]` so an absent key stays
/// `None` while an explicit `null` becomes `Some(None)`.
pub(crate) fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_are_camel_case() {
        let keys: Vec<_> = EntityKind::ALL.iter().map(|k| k.wire_key()).collect();
        assert_eq!(
            keys,
            ["patient", "labResult", "staffMember", "inventoryItem", "ambulanceUnit"]
        );
    }

    #[test]
    fn test_display_is_human_readable() {
        assert_eq!(EntityKind::InventoryItem.to_string(), "inventory item");
    }
}
