//! Name-keyed registry of live handlers.
//!
//! A [`Bridge`] lets code that only knows an operation's name reach state owned elsewhere. The
//! owner registers handlers and keeps the returned [`Registration`] guards alive for as long as
//! its state is mounted; dropping a guard removes its entry.
//!
//! Each name has at most one active handler. Registering a name again replaces the previous
//! handler, and the older guard then becomes inert: dropping it leaves the newer entry in place.
//!
//! Bridges are cheap to clone and every clone sees the same entries. They are single-threaded
//! (`Rc`), matching the store they front.

use crate::error::ToolResult;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// A registered operation: JSON arguments in, JSON result out.
pub type Handler = Rc<dyn Fn(Value) -> ToolResult<Value>>;

struct Entry {
    handler: Handler,
    generation: u64,
}

#[derive(Default)]
struct Entries {
    by_name: HashMap<String, Entry>,
    next_generation: u64,
}

#[derive(Clone, Default)]
pub struct Bridge {
    entries: Rc<RefCell<Entries>>,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("names", &self.names())
            .finish()
    }
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `handler` under `name`, replacing any handler already registered there.
    #[must_use = "dropping the registration immediately unregisters the handler"]
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> Registration
    where
        F: Fn(Value) -> ToolResult<Value> + 'static,
    {
        let name = name.into();
        let mut entries = self.entries.borrow_mut();
        let generation = entries.next_generation;
        entries.next_generation += 1;

        let replaced = entries
            .by_name
            .insert(
                name.clone(),
                Entry {
                    handler: Rc::new(handler),
                    generation,
                },
            )
            .is_some();
        tracing::debug!(name = %name, replaced, "bridge entry registered");

        Registration {
            entries: Rc::downgrade(&self.entries),
            name,
            generation,
        }
    }

    pub fn is_mounted(&self, name: &str) -> bool {
        self.entries.borrow().by_name.contains_key(name)
    }

    /// Returns the handler currently registered under `name`.
    ///
    /// The handler is cloned out so callers can invoke it without holding the registry borrow;
    /// a handler may itself register or drop entries.
    pub fn lookup(&self, name: &str) -> Option<Handler> {
        self.entries
            .borrow()
            .by_name
            .get(name)
            .map(|entry| Rc::clone(&entry.handler))
    }

    /// Invokes the handler registered under `name`, or returns `None` when there is none.
    pub fn invoke(&self, name: &str, args: Value) -> Option<ToolResult<Value>> {
        let handler = self.lookup(name)?;
        Some(handler(args))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.borrow().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Keeps one bridge entry alive. Dropping it unregisters the entry unless it was replaced.
#[must_use = "dropping the registration immediately unregisters the handler"]
pub struct Registration {
    entries: Weak<RefCell<Entries>>,
    name: String,
    generation: u64,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True while this registration's handler is the one published under its name.
    pub fn is_active(&self) -> bool {
        let Some(entries) = self.entries.upgrade() else {
            return false;
        };
        let entries = entries.borrow();
        entries
            .by_name
            .get(&self.name)
            .is_some_and(|entry| entry.generation == self.generation)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };
        let Ok(mut entries) = entries.try_borrow_mut() else {
            tracing::warn!(name = %self.name, "bridge busy, entry left registered");
            return;
        };
        let current = entries
            .by_name
            .get(&self.name)
            .is_some_and(|entry| entry.generation == self.generation);
        if current {
            entries.by_name.remove(&self.name);
            tracing::debug!(name = %self.name, "bridge entry unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constant(value: Value) -> impl Fn(Value) -> ToolResult<Value> {
        move |_| Ok(value.clone())
    }

    #[test]
    fn test_absent_name_is_not_invoked() {
        let bridge = Bridge::new();
        assert!(!bridge.is_mounted("addPatient"));
        assert!(bridge.invoke("addPatient", json!({})).is_none());
    }

    #[test]
    fn test_registered_handler_receives_args() {
        let bridge = Bridge::new();
        let _reg = bridge.register("echo", Ok);

        let result = bridge
            .invoke("echo", json!({"a": 1}))
            .expect("entry should be mounted")
            .expect("handler should succeed");
        assert_eq!(result, json!({"a": 1}));
    }

    #[test]
    fn test_dropping_registration_unregisters() {
        let bridge = Bridge::new();
        let reg = bridge.register("echo", Ok);
        assert!(bridge.is_mounted("echo"));

        drop(reg);
        assert!(!bridge.is_mounted("echo"));
    }

    #[test]
    fn test_last_writer_wins_and_stale_guard_is_inert() {
        let bridge = Bridge::new();
        let first = bridge.register("ping", constant(json!(1)));
        let second = bridge.register("ping", constant(json!(2)));

        assert!(!first.is_active());
        assert!(second.is_active());
        assert_eq!(bridge.invoke("ping", Value::Null).unwrap().unwrap(), json!(2));

        drop(first);
        assert_eq!(bridge.invoke("ping", Value::Null).unwrap().unwrap(), json!(2));

        drop(second);
        assert!(!bridge.is_mounted("ping"));
    }

    #[test]
    fn test_clones_share_entries() {
        let bridge = Bridge::new();
        let view = bridge.clone();
        let _reg = bridge.register("echo", Ok);
        assert_eq!(view.names(), ["echo"]);
    }

    #[test]
    fn test_registration_outliving_bridge_drops_cleanly() {
        let bridge = Bridge::new();
        let reg = bridge.register("echo", Ok);
        drop(bridge);
        assert!(!reg.is_active());
        drop(reg);
    }
}
