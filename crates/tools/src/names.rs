//! Names of bridge entries and tools.
//!
//! Entity tools share their name with the bridge entry they call. The calendar tool is named
//! `calendarControl` on the tool surface and `handleCalendarControl` on the bridge.

use medcrm_core::EntityKind;

/// Target named in the failure message when no store is mounted.
pub const STORE_TARGET: &str = "CRM data store";

/// Target named in the failure message when no calendar is mounted.
pub const CALENDAR_TARGET: &str = "Calendar component";

pub const HANDLE_CALENDAR_CONTROL: &str = "handleCalendarControl";
pub const GET_EVENTS_FOR_DATE: &str = "getEventsForDate";
pub const CALENDAR_CONTROL_TOOL: &str = "calendarControl";

/// Bridge entry names for one entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityTools {
    pub add: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
    pub list: &'static str,
}

pub const fn entity_tools(kind: EntityKind) -> EntityTools {
    match kind {
        EntityKind::Patient => EntityTools {
            add: "addPatient",
            update: "updatePatient",
            delete: "deletePatient",
            list: "listPatients",
        },
        EntityKind::LabResult => EntityTools {
            add: "addLabResult",
            update: "updateLabResult",
            delete: "deleteLabResult",
            list: "listLabResults",
        },
        EntityKind::StaffMember => EntityTools {
            add: "addStaffMember",
            update: "updateStaffMember",
            delete: "deleteStaffMember",
            list: "listStaff",
        },
        EntityKind::InventoryItem => EntityTools {
            add: "addInventoryItem",
            update: "updateInventoryItem",
            delete: "deleteInventoryItem",
            list: "listInventory",
        },
        EntityKind::AmbulanceUnit => EntityTools {
            add: "addAmbulanceUnit",
            update: "updateAmbulanceUnit",
            delete: "deleteAmbulanceUnit",
            list: "listAmbulanceUnits",
        },
    }
}

/// Every operation reachable through the tool surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolOp {
    Add(EntityKind),
    Update(EntityKind),
    Delete(EntityKind),
    List(EntityKind),
    CalendarControl,
    EventsForDate,
}

impl ToolOp {
    /// All operations, entity tools first, in catalogue order.
    pub fn all() -> Vec<ToolOp> {
        let mut ops = Vec::with_capacity(EntityKind::ALL.len() * 4 + 2);
        for kind in EntityKind::ALL {
            ops.extend([
                ToolOp::Add(kind),
                ToolOp::Update(kind),
                ToolOp::Delete(kind),
                ToolOp::List(kind),
            ]);
        }
        ops.extend([ToolOp::CalendarControl, ToolOp::EventsForDate]);
        ops
    }

    pub fn from_name(name: &str) -> Option<ToolOp> {
        Self::all().into_iter().find(|op| op.name() == name)
    }

    /// Name on the tool surface.
    pub fn name(&self) -> &'static str {
        match self {
            ToolOp::Add(kind) => entity_tools(*kind).add,
            ToolOp::Update(kind) => entity_tools(*kind).update,
            ToolOp::Delete(kind) => entity_tools(*kind).delete,
            ToolOp::List(kind) => entity_tools(*kind).list,
            ToolOp::CalendarControl => CALENDAR_CONTROL_TOOL,
            ToolOp::EventsForDate => GET_EVENTS_FOR_DATE,
        }
    }

    /// Bridge entry the tool invokes.
    pub fn bridge_entry(&self) -> &'static str {
        match self {
            ToolOp::CalendarControl => HANDLE_CALENDAR_CONTROL,
            other => other.name(),
        }
    }

    /// Component that must be mounted for the tool to succeed.
    pub fn target(&self) -> &'static str {
        match self {
            ToolOp::CalendarControl | ToolOp::EventsForDate => CALENDAR_TARGET,
            _ => STORE_TARGET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_are_unique() {
        let ops = ToolOp::all();
        let names: HashSet<_> = ops.iter().map(ToolOp::name).collect();
        assert_eq!(names.len(), ops.len());
    }

    #[test]
    fn test_from_name_round_trips_every_op() {
        for op in ToolOp::all() {
            assert_eq!(ToolOp::from_name(op.name()), Some(op));
        }
        assert_eq!(ToolOp::from_name("dropTables"), None);
    }

    #[test]
    fn test_calendar_control_uses_handler_entry() {
        assert_eq!(ToolOp::CalendarControl.bridge_entry(), "handleCalendarControl");
        assert_eq!(ToolOp::Add(EntityKind::Patient).bridge_entry(), "addPatient");
        assert_eq!(ToolOp::EventsForDate.target(), "Calendar component");
    }
}
