//! # MedCRM Tools
//!
//! The externally invokable surface of the CRM.
//!
//! Contains:
//! - [`Bridge`]: a name-keyed registry of live handlers with drop-to-unregister guards
//! - Mounting of the store and calendar onto a bridge ([`mount_store`], [`mount_calendar`])
//! - [`Toolkit`]: tool functions that validate arguments, invoke bridge entries and return
//!   structured [`ToolResponse`]s
//! - The tool catalogue with JSON schemas for the external runtime
//!
//! The store and calendar themselves live in `medcrm-core`.

pub mod args;
pub mod bridge;
pub mod catalogue;
pub mod error;
pub mod mount;
pub mod names;
pub mod response;
pub mod toolkit;

pub use bridge::{Bridge, Handler, Registration};
pub use catalogue::ToolDefinition;
pub use error::{ToolError, ToolResult};
pub use mount::{
    mount_calendar, mount_calendar_with_clock, mount_store, CalendarMount, Clock, StoreMount,
};
pub use names::ToolOp;
pub use response::ToolResponse;
pub use toolkit::Toolkit;
