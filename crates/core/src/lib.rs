//! # MedCRM Core
//!
//! Core data logic for the healthcare CRM dashboard.
//!
//! This crate contains pure in-memory data operations:
//! - Entity models (patients, lab results, staff, inventory, ambulance units) with closed enums
//! - Input validation for everything that arrives from outside the process
//! - The [`CrmStore`] repository with create/read/update/delete and change notifications
//! - Fixed demo seed data
//! - The calendar widget state and its control directives
//!
//! **No tool concerns**: bridge registration, tool schemas and structured tool responses belong
//! in `medcrm-tools`.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod seed;
pub mod store;
pub mod validation;

pub use calendar::{
    CalendarDirectives, CalendarEvent, CalendarState, DateKey, EventColor, EventRef,
    NewCalendarEvent, SharedCalendar,
};
pub use config::CoreConfig;
pub use error::{CrmError, CrmResult};
pub use models::{Draft, Entity, EntityKind, Patch};
pub use store::{ChangeKind, Collection, CrmStore, SharedStore, StoreEvent, Stored};
pub use validation::Validate;

pub use medcrm_ids::IdScheme;
pub use medcrm_types::{EmailAddress, NonEmptyText, TextError};
