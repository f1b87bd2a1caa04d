//! Tool functions.
//!
//! A [`Toolkit`] adapts named tool calls into bridge invocations:
//! 1. resolve the tool name
//! 2. look up the bridge entry, failing with "not mounted" when it is absent
//! 3. parse and validate the arguments against the typed input
//! 4. invoke the entry and wrap its result in a [`ToolResponse`]
//!
//! Errors never escape: every call produces a response.

use crate::args::{parse_args, DateArgs, IdArgs, NoArgs, UpdateArgs};
use crate::bridge::{Bridge, Handler};
use crate::catalogue::{self, ToolDefinition};
use crate::error::{ToolError, ToolResult};
use crate::names::ToolOp;
use crate::response::ToolResponse;
use medcrm_core::models::{AmbulanceUnit, InventoryItem, LabResult, PatientRecord, StaffMember};
use medcrm_core::{CalendarDirectives, Entity, EntityKind, Validate};
use serde::Serialize;
use serde_json::Value;

/// Calls the generic method `$method::<E>` with `E` bound to the entity type for `$kind`.
macro_rules! for_kind {
    ($self:ident . $method:ident :: <$kind:ident> ($($arg:expr),*)) => {
        match $kind {
            EntityKind::Patient => $self.$method::<PatientRecord>($($arg),*),
            EntityKind::LabResult => $self.$method::<LabResult>($($arg),*),
            EntityKind::StaffMember => $self.$method::<StaffMember>($($arg),*),
            EntityKind::InventoryItem => $self.$method::<InventoryItem>($($arg),*),
            EntityKind::AmbulanceUnit => $self.$method::<AmbulanceUnit>($($arg),*),
        }
    };
}

#[derive(Clone, Debug, Default)]
pub struct Toolkit {
    bridge: Bridge,
}

impl Toolkit {
    pub fn new(bridge: Bridge) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        catalogue::definitions()
    }

    /// Runs the tool named `name` with `args`.
    pub fn call(&self, name: &str, args: Value) -> ToolResponse {
        let result = ToolOp::from_name(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
            .and_then(|op| self.dispatch(op, args));

        match result {
            Ok(response) => {
                tracing::info!(tool = name, "tool call succeeded");
                response
            }
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                err.into()
            }
        }
    }

    fn dispatch(&self, op: ToolOp, args: Value) -> ToolResult<ToolResponse> {
        let handler = self.mounted(op)?;
        match op {
            ToolOp::Add(kind) => for_kind!(self.add::<kind>(&handler, args)),
            ToolOp::Update(kind) => for_kind!(self.update::<kind>(&handler, args)),
            ToolOp::Delete(kind) => for_kind!(self.delete::<kind>(&handler, args)),
            ToolOp::List(kind) => {
                parse_args::<NoArgs>(args)?;
                Ok(ToolResponse::ok(kind.collection_key(), handler(Value::Null)?))
            }
            ToolOp::CalendarControl => {
                let directives: CalendarDirectives = parse_args(args)?;
                directives.validate()?;
                Ok(ToolResponse::ok("calendar", handler(to_args(&directives)?)?))
            }
            ToolOp::EventsForDate => {
                let date_args: DateArgs = parse_args(args)?;
                Ok(ToolResponse::ok("events", handler(to_args(&date_args)?)?))
            }
        }
    }

    fn mounted(&self, op: ToolOp) -> ToolResult<Handler> {
        self.bridge
            .lookup(op.bridge_entry())
            .ok_or(ToolError::NotMounted { target: op.target() })
    }

    fn add<E: Entity>(&self, handler: &Handler, args: Value) -> ToolResult<ToolResponse> {
        let draft: E::Draft = parse_args(args)?;
        draft.validate()?;
        let record = handler(to_args(&draft)?)?;
        Ok(ToolResponse::ok(E::KIND.wire_key(), record))
    }

    fn update<E: Entity>(&self, handler: &Handler, args: Value) -> ToolResult<ToolResponse> {
        let update: UpdateArgs<E::Patch> = parse_args(args)?;
        update.changes.validate()?;
        let record = handler(to_args(&update)?)?;
        Ok(ToolResponse::ok(E::KIND.wire_key(), record))
    }

    fn delete<E: Entity>(&self, handler: &Handler, args: Value) -> ToolResult<ToolResponse> {
        let id: IdArgs = parse_args(args)?;
        let record = handler(to_args(&id)?)?;
        Ok(ToolResponse::ok(E::KIND.wire_key(), record))
    }
}

fn to_args<T: Serialize>(value: &T) -> ToolResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_tool_fails_without_panicking() {
        let toolkit = Toolkit::default();
        let resp = toolkit.call("launchRocket", json!({}));
        assert!(!resp.success());
        assert_eq!(resp.error(), Some("unknown tool 'launchRocket'"));
    }

    #[test]
    fn test_unmounted_store_reports_target() {
        let toolkit = Toolkit::default();
        let resp = toolkit.call("listPatients", json!({}));
        assert_eq!(resp.error(), Some("CRM data store not mounted."));
    }

    #[test]
    fn test_unmounted_calendar_reports_target() {
        let toolkit = Toolkit::default();
        let resp = toolkit.call("calendarControl", json!({"navigateToToday": true}));
        assert_eq!(resp.error(), Some("Calendar component not mounted."));
    }

    #[test]
    fn test_invalid_args_are_rejected_before_invoking_entry() {
        use std::cell::Cell;
        use std::rc::Rc;

        let bridge = Bridge::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let _reg = bridge.register("addStaffMember", move |args| {
            seen.set(seen.get() + 1);
            Ok(args)
        });

        let resp = Toolkit::new(bridge).call(
            "addStaffMember",
            json!({
                "name": "Dr. Who",
                "role": "Time Lord",
                "department": "Emergency",
                "email": "who@hospital.com",
                "phone": "555-0000"
            }),
        );

        assert!(!resp.success());
        assert!(resp.error().is_some_and(|e| e.starts_with("invalid arguments")));
        assert_eq!(calls.get(), 0);
    }
}
