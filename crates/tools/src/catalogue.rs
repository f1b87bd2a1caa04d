//! Tool definitions published to the external runtime.
//!
//! Each definition pairs a tool name with a description and a JSON schema for its arguments.
//! Enum constraints list the exact wire strings the models accept.

use crate::names::ToolOp;
use medcrm_core::EntityKind;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: String,
    pub input_schema: Value,
}

/// Definitions for every tool, in catalogue order.
pub fn definitions() -> Vec<ToolDefinition> {
    ToolOp::all().into_iter().map(definition).collect()
}

pub fn definition(op: ToolOp) -> ToolDefinition {
    let (description, input_schema) = match op {
        ToolOp::Add(kind) => (
            format!("Add a new {kind} to the CRM. The identifier is assigned by the system."),
            object_schema(fields(kind), required(kind)),
        ),
        ToolOp::Update(kind) => (
            format!("Update fields of an existing {kind}. Only the fields in `changes` are replaced."),
            object_schema(
                props([
                    ("id", json!({"type": "string", "description": format!("Identifier of the {kind}")})),
                    ("changes", changes_schema(kind)),
                ]),
                &["id", "changes"],
            ),
        ),
        ToolOp::Delete(kind) => (
            format!("Remove a {kind} from the CRM by identifier."),
            object_schema(
                props([("id", json!({"type": "string", "description": format!("Identifier of the {kind}")}))]),
                &["id"],
            ),
        ),
        ToolOp::List(kind) => (
            format!("List every {kind} in the CRM, in insertion order."),
            object_schema(Map::new(), &[]),
        ),
        ToolOp::CalendarControl => (
            "Control the calendar: navigate to a month or to today, highlight or select dates, \
             add or remove events. Navigating to today ignores every other directive."
                .to_string(),
            calendar_schema(),
        ),
        ToolOp::EventsForDate => (
            "Return the calendar events scheduled on a date.".to_string(),
            object_schema(props([("date", date_schema())]), &["date"]),
        ),
    };

    ToolDefinition {
        name: op.name(),
        description,
        input_schema,
    }
}

fn object_schema(properties: Map<String, Value>, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Optional record fields; an update clears them when sent as `null`.
fn clearable(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Patient => &["vitals"],
        EntityKind::InventoryItem => &["expiryDate"],
        EntityKind::AmbulanceUnit => &[
            "destination",
            "eta",
            "dispatchTime",
            "callType",
            "triageLevel",
            "patientInfo",
        ],
        EntityKind::LabResult | EntityKind::StaffMember => &[],
    }
}

fn changes_schema(kind: EntityKind) -> Value {
    let mut properties = fields(kind);
    for name in clearable(kind) {
        if let Some(schema) = properties.get_mut(*name) {
            *schema = json!({"anyOf": [schema.take(), {"type": "null"}]});
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false,
        "minProperties": 1,
    })
}

fn props<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn text() -> Value {
    json!({"type": "string", "minLength": 1})
}

fn one_of(values: &[&str]) -> Value {
    json!({"type": "string", "enum": values})
}

fn date_schema() -> Value {
    json!({"type": "string", "pattern": r"^\d{4}-\d{2}-\d{2}$", "description": "YYYY-MM-DD"})
}

fn range(kind: &str, min: f64, max: f64) -> Value {
    json!({"type": kind, "minimum": min, "maximum": max})
}

fn required(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Patient => &[
            "name",
            "age",
            "gender",
            "diagnosis",
            "department",
            "status",
            "admissionDate",
        ],
        EntityKind::LabResult => &[
            "patientName",
            "testType",
            "date",
            "status",
            "doctor",
            "priority",
            "resultSummary",
        ],
        EntityKind::StaffMember => &["name", "role", "department", "email", "phone"],
        EntityKind::InventoryItem => &["name", "category", "quantity", "location", "status"],
        EntityKind::AmbulanceUnit => &[
            "status",
            "crew",
            "vehicle",
            "location",
            "radioChannel",
            "mileage",
            "coordinate",
        ],
    }
}

fn fields(kind: EntityKind) -> Map<String, Value> {
    match kind {
        EntityKind::Patient => props([
            ("name", text()),
            ("age", range("integer", 0.0, 150.0)),
            ("gender", one_of(&["Male", "Female", "Other"])),
            ("diagnosis", text()),
            ("department", text()),
            ("status", one_of(&["Admitted", "Outpatient", "Discharged", "Critical"])),
            ("admissionDate", date_schema()),
            ("vitals", vitals_schema()),
        ]),
        EntityKind::LabResult => props([
            ("patientName", text()),
            ("testType", text()),
            ("date", date_schema()),
            ("status", one_of(&["Completed", "Pending", "Processing"])),
            ("doctor", text()),
            ("priority", one_of(&["Routine", "High", "Critical"])),
            ("resultSummary", json!({"type": "string"})),
        ]),
        EntityKind::StaffMember => props([
            ("name", text()),
            (
                "role",
                one_of(&["Doctor", "Nurse", "Admin", "Pharmacist", "Technician", "Specialist"]),
            ),
            ("department", text()),
            ("email", json!({"type": "string", "format": "email"})),
            ("phone", text()),
        ]),
        EntityKind::InventoryItem => props([
            ("name", text()),
            (
                "category",
                one_of(&["Medical Device", "Pharmaceuticals", "Surgical", "General"]),
            ),
            ("quantity", json!({"type": "integer", "minimum": 0})),
            ("location", text()),
            ("status", one_of(&["In Stock", "Low Stock", "Out of Stock"])),
            ("expiryDate", date_schema()),
        ]),
        EntityKind::AmbulanceUnit => props([
            (
                "status",
                one_of(&[
                    "Available",
                    "Dispatched",
                    "En Route",
                    "On Scene",
                    "Transporting",
                    "Returning",
                ]),
            ),
            ("crew", crew_schema()),
            ("vehicle", text()),
            ("location", text()),
            ("destination", text()),
            ("eta", text()),
            ("dispatchTime", text()),
            ("callType", text()),
            ("triageLevel", range("integer", 1.0, 5.0)),
            ("patientInfo", text()),
            ("radioChannel", text()),
            ("mileage", json!({"type": "integer", "minimum": 0})),
            (
                "coordinate",
                object_schema(
                    props([("x", range("number", 0.0, 100.0)), ("y", range("number", 0.0, 100.0))]),
                    &["x", "y"],
                ),
            ),
        ]),
    }
}

fn vitals_schema() -> Value {
    object_schema(
        props([
            ("heartRate", range("integer", 1.0, 300.0)),
            ("bloodPressureSystolic", range("integer", 1.0, 300.0)),
            ("bloodPressureDiastolic", range("integer", 1.0, 300.0)),
            ("temperature", range("number", 25.0, 45.0)),
            ("oxygenSaturation", range("integer", 0.0, 100.0)),
            ("respiratoryRate", range("integer", 1.0, 80.0)),
            ("lastChecked", text()),
        ]),
        &[
            "heartRate",
            "bloodPressureSystolic",
            "bloodPressureDiastolic",
            "temperature",
            "oxygenSaturation",
            "respiratoryRate",
            "lastChecked",
        ],
    )
}

fn crew_schema() -> Value {
    object_schema(
        props([("driver", text()), ("paramedic", text()), ("emt", text())]),
        &["driver", "paramedic"],
    )
}

fn calendar_schema() -> Value {
    let color = one_of(&["blue", "green", "red", "purple", "orange", "teal"]);
    let time = json!({"type": "string", "pattern": r"^\d{2}:\d{2}$", "description": "HH:MM"});

    object_schema(
        props([
            ("year", range("integer", 1.0, 9999.0)),
            (
                "month",
                json!({"type": "integer", "minimum": 0, "maximum": 11, "description": "0 is January"}),
            ),
            ("highlightDates", json!({"type": "array", "items": date_schema()})),
            ("selectDate", date_schema()),
            (
                "addEvent",
                object_schema(
                    props([
                        ("date", date_schema()),
                        ("event", text()),
                        ("time", time),
                        ("color", color),
                    ]),
                    &["date", "event"],
                ),
            ),
            (
                "removeEvent",
                object_schema(props([("date", date_schema()), ("event", text())]), &["date", "event"]),
            ),
            ("navigateToToday", json!({"type": "boolean"})),
        ]),
        &[],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcrm_core::models::{
        AmbulanceStatus, Gender, InventoryCategory, PatientStatus, StaffRole, StockStatus,
    };
    use serde::de::DeserializeOwned;

    fn enum_values(kind: EntityKind, field: &str) -> Vec<Value> {
        fields(kind)[field]["enum"]
            .as_array()
            .cloned()
            .expect("field should have an enum constraint")
    }

    fn assert_all_parse<T: DeserializeOwned>(values: Vec<Value>) {
        for value in values {
            serde_json::from_value::<T>(value.clone())
                .unwrap_or_else(|e| panic!("schema value {value} should parse: {e}"));
        }
    }

    #[test]
    fn test_schema_enums_match_model_enums() {
        assert_all_parse::<Gender>(enum_values(EntityKind::Patient, "gender"));
        assert_all_parse::<PatientStatus>(enum_values(EntityKind::Patient, "status"));
        assert_all_parse::<StaffRole>(enum_values(EntityKind::StaffMember, "role"));
        assert_all_parse::<InventoryCategory>(enum_values(EntityKind::InventoryItem, "category"));
        assert_all_parse::<StockStatus>(enum_values(EntityKind::InventoryItem, "status"));
        assert_all_parse::<AmbulanceStatus>(enum_values(EntityKind::AmbulanceUnit, "status"));
    }

    #[test]
    fn test_update_schema_accepts_null_for_clearable_fields() {
        for kind in EntityKind::ALL {
            let changes = changes_schema(kind);
            for field in clearable(kind) {
                let any_of = changes["properties"][*field]["anyOf"]
                    .as_array()
                    .unwrap_or_else(|| panic!("{kind} {field} should be nullable"));
                assert_eq!(any_of[1], json!({"type": "null"}));
            }
        }
        assert!(changes_schema(EntityKind::AmbulanceUnit)["properties"]["status"]
            .get("anyOf")
            .is_none());
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for kind in EntityKind::ALL {
            let props = fields(kind);
            for field in required(kind) {
                assert!(props.contains_key(*field), "{kind} requires undeclared {field}");
            }
        }
    }

    #[test]
    fn test_catalogue_covers_every_tool() {
        let defs = definitions();
        assert_eq!(defs.len(), 22);

        let add_patient = defs
            .iter()
            .find(|d| d.name == "addPatient")
            .expect("addPatient should be listed");
        assert_eq!(add_patient.input_schema["required"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn test_definition_serializes_camel_case() {
        let value = serde_json::to_value(definition(ToolOp::EventsForDate)).unwrap();
        assert_eq!(value["name"], "getEventsForDate");
        assert!(value.get("inputSchema").is_some());
    }
}
