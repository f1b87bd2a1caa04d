//! In-memory CRM repository.
//!
//! [`CrmStore`] owns the five entity collections and is the only place they are mutated.
//! Callers receive clones of records; no reference into a collection ever leaves the store
//! mutably.
//!
//! ## Execution model
//!
//! The store is single-writer and synchronous. Every operation runs to completion before the
//! next one starts, so mutations are applied in exactly the order their calls arrive. Code that
//! needs to reach the store without holding it directly shares a [`SharedStore`].
//!
//! ## Change notifications
//!
//! Consumers that mirror store state call [`CrmStore::subscribe`] and drain the returned
//! broadcast receiver. Each successful mutation publishes one [`StoreEvent`]; failed mutations
//! publish nothing. The channel holds at most `STORE_EVENT_CAPACITY` undelivered events; a
//! subscriber that falls further behind gets `RecvError::Lagged` and resumes at the oldest
//! retained event.

use crate::config::CoreConfig;
use crate::constants::{
    AMBULANCE_ID_PATTERN, INVENTORY_ID_PATTERN, LAB_RESULT_ID_PATTERN, PATIENT_ID_PATTERN,
    STAFF_ID_PATTERN, STORE_EVENT_CAPACITY,
};
use crate::error::{CrmError, CrmResult};
use crate::models::{
    AmbulanceUnit, Draft, Entity, EntityKind, InventoryItem, LabResult, Patch, PatientRecord,
    StaffMember,
};
use crate::seed;
use medcrm_ids::{IdGenerator, IdPattern, IdScheme};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Handle used by collaborators that reach the store without owning it.
pub type SharedStore = Rc<RefCell<CrmStore>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// Published after every successful mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEvent {
    pub kind: EntityKind,
    pub id: String,
    pub change: ChangeKind,
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Insertion-ordered records of one entity kind plus the generator for their identifiers.
#[derive(Clone, Debug)]
pub struct Collection<E> {
    records: Vec<E>,
    ids: IdGenerator,
}

impl<E: Entity> Collection<E> {
    fn new(pattern: IdPattern, scheme: IdScheme) -> Self {
        Self {
            records: Vec::new(),
            ids: IdGenerator::new(pattern, scheme),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> CrmResult<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CrmError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            })
    }

    /// Appends pre-built records, advancing the id generator past their identifiers.
    fn seed(&mut self, records: Vec<E>) {
        for record in records {
            self.ids.observe(record.id());
            self.records.push(record);
        }
    }

    fn insert(&mut self, draft: E::Draft) -> CrmResult<E> {
        let records = &self.records;
        let id = self
            .ids
            .next_id(|candidate| records.iter().any(|r| r.id() == candidate))?;
        let record = E::from_draft(id, draft);
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: E::Patch) -> CrmResult<E> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.apply_patch(patch);
        Ok(record.clone())
    }

    fn remove(&mut self, id: &str) -> CrmResult<E> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }
}

impl<'a, E: Entity> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Owner of all entity collections.
#[derive(Debug)]
pub struct CrmStore {
    cfg: Arc<CoreConfig>,
    patients: Collection<PatientRecord>,
    lab_results: Collection<LabResult>,
    staff: Collection<StaffMember>,
    inventory: Collection<InventoryItem>,
    ambulances: Collection<AmbulanceUnit>,
    events: broadcast::Sender<StoreEvent>,
}

/// Entities that have a collection in [`CrmStore`].
pub trait Stored: Entity {
    fn collection(store: &CrmStore) -> &Collection<Self>;
    fn collection_mut(store: &mut CrmStore) -> &mut Collection<Self>;
}

macro_rules! stored {
    ($entity:ty, $field:ident) => {
        impl Stored for $entity {
            fn collection(store: &CrmStore) -> &Collection<Self> {
                &store.$field
            }

            fn collection_mut(store: &mut CrmStore) -> &mut Collection<Self> {
                &mut store.$field
            }
        }
    };
}

stored!(PatientRecord, patients);
stored!(LabResult, lab_results);
stored!(StaffMember, staff);
stored!(InventoryItem, inventory);
stored!(AmbulanceUnit, ambulances);

impl CrmStore {
    /// Creates a store, seeded with the demo data set when the config asks for it.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let seed_demo_data = cfg.seed_demo_data();
        let mut store = Self::empty(cfg);
        if seed_demo_data {
            store.seed_demo_data();
        }
        store
    }

    /// Creates a store with no records regardless of configuration.
    pub fn empty(cfg: Arc<CoreConfig>) -> Self {
        let scheme = cfg.id_scheme();
        let (events, _) = broadcast::channel(STORE_EVENT_CAPACITY);
        Self {
            cfg,
            patients: Collection::new(PATIENT_ID_PATTERN, scheme),
            lab_results: Collection::new(LAB_RESULT_ID_PATTERN, scheme),
            staff: Collection::new(STAFF_ID_PATTERN, scheme),
            inventory: Collection::new(INVENTORY_ID_PATTERN, scheme),
            ambulances: Collection::new(AMBULANCE_ID_PATTERN, scheme),
            events,
        }
    }

    /// Wraps the store in the shared handle used by the bridge layer.
    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    fn seed_demo_data(&mut self) {
        self.patients.seed(seed::demo_patients());
        self.lab_results.seed(seed::demo_lab_results());
        self.staff.seed(seed::demo_staff());
        self.inventory.seed(seed::demo_inventory());
        self.ambulances.seed(seed::demo_ambulances());
        tracing::info!(
            patients = self.patients.len(),
            lab_results = self.lab_results.len(),
            staff = self.staff.len(),
            inventory = self.inventory.len(),
            ambulances = self.ambulances.len(),
            "seeded demo data"
        );
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn collection<E: Stored>(&self) -> &Collection<E> {
        E::collection(self)
    }

    pub fn get<E: Stored>(&self, id: &str) -> Option<&E> {
        E::collection(self).get(id)
    }

    /// Clones every record of one kind, in insertion order.
    pub fn list<E: Stored>(&self) -> Vec<E> {
        E::collection(self).as_slice().to_vec()
    }

    pub fn patients(&self) -> &[PatientRecord] {
        self.patients.as_slice()
    }

    pub fn lab_results(&self) -> &[LabResult] {
        self.lab_results.as_slice()
    }

    pub fn staff(&self) -> &[StaffMember] {
        self.staff.as_slice()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        self.inventory.as_slice()
    }

    pub fn ambulances(&self) -> &[AmbulanceUnit] {
        self.ambulances.as_slice()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Validates `draft`, assigns a fresh identifier and appends the new record.
    ///
    /// # Errors
    ///
    /// - `CrmError::InvalidInput` if the draft fails validation
    /// - `CrmError::Id` if no identifier can be generated
    pub fn add<D>(&mut self, draft: D) -> CrmResult<D::Entity>
    where
        D: Draft,
        D::Entity: Stored,
    {
        draft.validate()?;
        let kind = <D::Entity as Entity>::KIND;
        let record = <D::Entity as Stored>::collection_mut(self).insert(draft)?;
        tracing::info!(%kind, id = record.id(), "record added");
        self.publish(kind, record.id(), ChangeKind::Added);
        Ok(record)
    }

    /// Merges `patch` into the record with identifier `id` and returns the updated record.
    ///
    /// # Errors
    ///
    /// - `CrmError::InvalidInput` if the patch is empty or fails validation
    /// - `CrmError::NotFound` if no record has that identifier; nothing changes
    pub fn update<P>(&mut self, id: &str, patch: P) -> CrmResult<P::Entity>
    where
        P: Patch,
        P::Entity: Stored,
    {
        if patch.is_empty() {
            return Err(CrmError::InvalidInput(
                "update must change at least one field".into(),
            ));
        }
        patch.validate()?;
        let kind = <P::Entity as Entity>::KIND;
        let record = <P::Entity as Stored>::collection_mut(self).update(id, patch)?;
        tracing::info!(%kind, id, "record updated");
        self.publish(kind, id, ChangeKind::Updated);
        Ok(record)
    }

    /// Removes the record with identifier `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::NotFound` if no record has that identifier. The store is left
    /// unchanged, so deleting the same id twice removes exactly one record.
    pub fn delete<E: Stored>(&mut self, id: &str) -> CrmResult<E> {
        let record = E::collection_mut(self).remove(id)?;
        tracing::info!(kind = %E::KIND, id, "record deleted");
        self.publish(E::KIND, id, ChangeKind::Removed);
        Ok(record)
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    /// Registers a new consumer of change events published from now on.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn publish(&self, kind: EntityKind, id: &str, change: ChangeKind) {
        let event = StoreEvent {
            kind,
            id: id.to_string(),
            change,
        };
        // Err only means nobody is listening.
        if self.events.send(event).is_err() {
            tracing::trace!(%kind, id, "no store subscribers");
        }
    }
}
