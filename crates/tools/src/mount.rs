//! Publishing store and calendar operations onto a [`Bridge`].
//!
//! Mounting returns a guard that owns the registrations. The entries stay reachable for as
//! long as the guard lives; dropping it unmounts them.

use crate::args::{parse_args, DateArgs, IdArgs, NoArgs, UpdateArgs};
use crate::bridge::{Bridge, Registration};
use crate::error::{ToolError, ToolResult};
use crate::names::{
    entity_tools, CALENDAR_TARGET, GET_EVENTS_FOR_DATE, HANDLE_CALENDAR_CONTROL, STORE_TARGET,
};
use chrono::{Local, NaiveDate};
use medcrm_core::models::{AmbulanceUnit, InventoryItem, LabResult, PatientRecord, StaffMember};
use medcrm_core::{
    CalendarDirectives, CalendarState, CrmStore, SharedCalendar, SharedStore, Stored,
};
use std::cell::{Ref, RefMut};
use std::rc::Rc;

/// Source of "today" for calendar directives.
pub type Clock = Rc<dyn Fn() -> NaiveDate>;

/// Keeps the store's bridge entries registered.
#[derive(Debug)]
#[must_use = "dropping the mount immediately unregisters the store"]
pub struct StoreMount {
    registrations: Vec<Registration>,
}

impl StoreMount {
    pub fn entry_names(&self) -> Vec<&str> {
        self.registrations.iter().map(Registration::name).collect()
    }
}

/// Keeps the calendar's bridge entries registered.
#[derive(Debug)]
#[must_use = "dropping the mount immediately unregisters the calendar"]
pub struct CalendarMount {
    registrations: Vec<Registration>,
}

impl CalendarMount {
    pub fn entry_names(&self) -> Vec<&str> {
        self.registrations.iter().map(Registration::name).collect()
    }
}

fn read_store(store: &SharedStore) -> ToolResult<Ref<'_, CrmStore>> {
    store.try_borrow().map_err(|_| ToolError::Busy {
        target: STORE_TARGET,
    })
}

fn write_store(store: &SharedStore) -> ToolResult<RefMut<'_, CrmStore>> {
    store.try_borrow_mut().map_err(|_| ToolError::Busy {
        target: STORE_TARGET,
    })
}

fn read_calendar(calendar: &SharedCalendar) -> ToolResult<Ref<'_, CalendarState>> {
    calendar.try_borrow().map_err(|_| ToolError::Busy {
        target: CALENDAR_TARGET,
    })
}

fn write_calendar(calendar: &SharedCalendar) -> ToolResult<RefMut<'_, CalendarState>> {
    calendar.try_borrow_mut().map_err(|_| ToolError::Busy {
        target: CALENDAR_TARGET,
    })
}

/// Registers add, update, delete and list entries for every entity kind.
pub fn mount_store(bridge: &Bridge, store: SharedStore) -> StoreMount {
    let mut registrations = Vec::new();
    mount_entity::<PatientRecord>(bridge, &store, &mut registrations);
    mount_entity::<LabResult>(bridge, &store, &mut registrations);
    mount_entity::<StaffMember>(bridge, &store, &mut registrations);
    mount_entity::<InventoryItem>(bridge, &store, &mut registrations);
    mount_entity::<AmbulanceUnit>(bridge, &store, &mut registrations);
    tracing::info!(entries = registrations.len(), "store mounted");
    StoreMount { registrations }
}

fn mount_entity<E: Stored + 'static>(
    bridge: &Bridge,
    store: &SharedStore,
    registrations: &mut Vec<Registration>,
) {
    let names = entity_tools(E::KIND);

    let s = Rc::clone(store);
    registrations.push(bridge.register(names.add, move |args| {
        let draft: E::Draft = parse_args(args)?;
        let record = write_store(&s)?.add(draft)?;
        Ok(serde_json::to_value(record)?)
    }));

    let s = Rc::clone(store);
    registrations.push(bridge.register(names.update, move |args| {
        let UpdateArgs { id, changes } = parse_args::<UpdateArgs<E::Patch>>(args)?;
        let record = write_store(&s)?.update(&id, changes)?;
        Ok(serde_json::to_value(record)?)
    }));

    let s = Rc::clone(store);
    registrations.push(bridge.register(names.delete, move |args| {
        let IdArgs { id } = parse_args(args)?;
        let record = write_store(&s)?.delete::<E>(&id)?;
        Ok(serde_json::to_value(record)?)
    }));

    let s = Rc::clone(store);
    registrations.push(bridge.register(names.list, move |args| {
        parse_args::<NoArgs>(args)?;
        let records = read_store(&s)?.list::<E>();
        Ok(serde_json::to_value(records)?)
    }));
}

/// Registers the calendar entries, reading "today" from the local clock.
pub fn mount_calendar(bridge: &Bridge, calendar: SharedCalendar) -> CalendarMount {
    mount_calendar_with_clock(bridge, calendar, || Local::now().date_naive())
}

pub fn mount_calendar_with_clock<F>(
    bridge: &Bridge,
    calendar: SharedCalendar,
    clock: F,
) -> CalendarMount
where
    F: Fn() -> NaiveDate + 'static,
{
    let clock: Clock = Rc::new(clock);
    let mut registrations = Vec::with_capacity(2);

    let cal = Rc::clone(&calendar);
    registrations.push(bridge.register(HANDLE_CALENDAR_CONTROL, move |args| {
        let directives: CalendarDirectives = parse_args(args)?;
        let mut state = write_calendar(&cal)?;
        state.apply(&directives, clock())?;
        Ok(serde_json::to_value(&*state)?)
    }));

    let cal = calendar;
    registrations.push(bridge.register(GET_EVENTS_FOR_DATE, move |args| {
        let DateArgs { date } = parse_args(args)?;
        let state = read_calendar(&cal)?;
        Ok(serde_json::to_value(state.events_for_date(&date))?)
    }));

    tracing::info!("calendar mounted");
    CalendarMount { registrations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcrm_core::{CoreConfig, CrmError, IdScheme};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn shared_store() -> SharedStore {
        CrmStore::new(Arc::new(CoreConfig::new(true, IdScheme::Sequential))).into_shared()
    }

    #[test]
    fn test_mount_store_registers_every_entity_entry() {
        let bridge = Bridge::new();
        let mount = mount_store(&bridge, shared_store());

        assert_eq!(mount.entry_names().len(), 20);
        for name in ["addPatient", "addLabResult", "addStaffMember", "addInventoryItem"] {
            assert!(bridge.is_mounted(name), "{name} should be mounted");
        }
    }

    #[test]
    fn test_dropping_store_mount_unregisters() {
        let bridge = Bridge::new();
        let mount = mount_store(&bridge, shared_store());
        drop(mount);
        assert!(bridge.names().is_empty());
    }

    #[test]
    fn test_delete_entry_reports_not_found_for_unknown_id() {
        let bridge = Bridge::new();
        let _mount = mount_store(&bridge, shared_store());

        let err = bridge
            .invoke("deleteInventoryItem", json!({"id": "INV-999"}))
            .expect("entry should be mounted")
            .expect_err("unknown id should fail");
        assert!(matches!(err, ToolError::Core(CrmError::NotFound { .. })));
    }

    #[test]
    fn test_list_entry_returns_collection() {
        let bridge = Bridge::new();
        let _mount = mount_store(&bridge, shared_store());

        let staff = bridge.invoke("listStaff", Value::Null).unwrap().unwrap();
        assert_eq!(staff.as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn test_busy_store_is_reported_not_panicked() {
        let store = shared_store();
        let bridge = Bridge::new();
        let _mount = mount_store(&bridge, Rc::clone(&store));

        let _held = store.borrow_mut();
        let err = bridge
            .invoke("listPatients", Value::Null)
            .unwrap()
            .expect_err("store is borrowed");
        assert!(matches!(err, ToolError::Busy { .. }));
    }

    #[test]
    fn test_calendar_entries_use_injected_clock() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let calendar = CalendarState::new(today).into_shared();
        let bridge = Bridge::new();
        let _mount = mount_calendar_with_clock(&bridge, Rc::clone(&calendar), move || today);

        let view = bridge
            .invoke(HANDLE_CALENDAR_CONTROL, json!({"navigateToToday": true}))
            .unwrap()
            .unwrap();
        assert_eq!(view["selectedDate"], json!("2025-06-15"));
        assert_eq!(calendar.borrow().month(), 5);
    }
}
