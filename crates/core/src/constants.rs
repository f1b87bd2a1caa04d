//! Constants used throughout the core crate.
//!
//! Identifier shapes and environment variable names live here so the store, the config loader
//! and the tests agree on them.

use medcrm_ids::IdPattern;

/// Patient identifiers: `P-1029`.
pub const PATIENT_ID_PATTERN: IdPattern = IdPattern::new("P-", 0).starting_at(1000);

/// Lab result identifiers: `LAB-2026-006`.
pub const LAB_RESULT_ID_PATTERN: IdPattern = IdPattern::new("LAB-", 3).with_year_segment();

/// Staff identifiers: `S007`.
pub const STAFF_ID_PATTERN: IdPattern = IdPattern::new("S", 3);

/// Inventory identifiers: `INV-007`.
pub const INVENTORY_ID_PATTERN: IdPattern = IdPattern::new("INV-", 3);

/// Ambulance identifiers: `AMB-05`.
pub const AMBULANCE_ID_PATTERN: IdPattern = IdPattern::new("AMB-", 2);

/// Change events buffered per subscriber before the oldest are dropped.
pub const STORE_EVENT_CAPACITY: usize = 256;

/// Whether the store starts with the fixed demo data.
pub const SEED_DEMO_DATA_ENV: &str = "MEDCRM_SEED_DEMO_DATA";

/// Identifier scheme: `sequential` or `uuid`.
pub const ID_SCHEME_ENV: &str = "MEDCRM_ID_SCHEME";

/// Canonical calendar date key format.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar event time format.
pub const EVENT_TIME_FORMAT: &str = "%H:%M";
