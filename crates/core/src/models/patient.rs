//! Patient records and vital signs.

use super::{clearable, merge, Draft, Entity, EntityKind, Patch};
use crate::validation::{if_present, if_set, require_text, validate_date, validate_range, Validate};
use crate::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Admitted,
    Outpatient,
    Discharged,
    Critical,
}

/// Snapshot of a patient's vital signs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vitals {
    /// Beats per minute.
    pub heart_rate: u16,
    /// mmHg.
    pub blood_pressure_systolic: u16,
    /// mmHg.
    pub blood_pressure_diastolic: u16,
    /// Degrees Celsius.
    pub temperature: f64,
    /// SpO2 percentage.
    pub oxygen_saturation: u8,
    /// Breaths per minute.
    pub respiratory_rate: u16,
    /// Free-form timestamp of the measurement.
    pub last_checked: String,
}

impl Validate for Vitals {
    fn validate(&self) -> CrmResult<()> {
        validate_range("vitals.heartRate", self.heart_rate, 1..=300)?;
        validate_range("vitals.bloodPressureSystolic", self.blood_pressure_systolic, 1..=300)?;
        validate_range("vitals.bloodPressureDiastolic", self.blood_pressure_diastolic, 1..=300)?;
        if self.blood_pressure_systolic <= self.blood_pressure_diastolic {
            return Err(CrmError::InvalidInput(
                "vitals.bloodPressureSystolic must be greater than bloodPressureDiastolic".into(),
            ));
        }
        validate_range("vitals.temperature", self.temperature, 25.0..=45.0)?;
        validate_range("vitals.oxygenSaturation", self.oxygen_saturation, 0..=100)?;
        validate_range("vitals.respiratoryRate", self.respiratory_rate, 1..=80)?;
        require_text("vitals.lastChecked", &self.last_checked)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diagnosis: String,
    pub department: String,
    pub status: PatientStatus,
    pub admission_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diagnosis: String,
    pub department: String,
    pub status: PatientStatus,
    pub admission_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Option<Vitals>>,
}

const MAX_AGE: u32 = 150;

impl Validate for NewPatient {
    fn validate(&self) -> CrmResult<()> {
        require_text("name", &self.name)?;
        validate_range("age", self.age, 0..=MAX_AGE)?;
        require_text("diagnosis", &self.diagnosis)?;
        require_text("department", &self.department)?;
        validate_date("admissionDate", &self.admission_date)?;
        if_present(&self.vitals, Vitals::validate)
    }
}

impl Validate for PatientPatch {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.name, |v| require_text("name", v))?;
        if_present(&self.age, |v| validate_range("age", *v, 0..=MAX_AGE))?;
        if_present(&self.diagnosis, |v| require_text("diagnosis", v))?;
        if_present(&self.department, |v| require_text("department", v))?;
        if_present(&self.admission_date, |v| validate_date("admissionDate", v))?;
        if_set(&self.vitals, Vitals::validate)
    }
}

impl Entity for PatientRecord {
    const KIND: EntityKind = EntityKind::Patient;

    type Draft = NewPatient;
    type Patch = PatientPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewPatient) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            diagnosis: draft.diagnosis,
            department: draft.department,
            status: draft.status,
            admission_date: draft.admission_date,
            vitals: draft.vitals,
        }
    }

    fn apply_patch(&mut self, patch: PatientPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.age, patch.age);
        merge(&mut self.gender, patch.gender);
        merge(&mut self.diagnosis, patch.diagnosis);
        merge(&mut self.department, patch.department);
        merge(&mut self.status, patch.status);
        merge(&mut self.admission_date, patch.admission_date);
        merge(&mut self.vitals, patch.vitals);
    }
}

impl Draft for NewPatient {
    type Entity = PatientRecord;
}

impl Patch for PatientPatch {
    type Entity = PatientRecord;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane() -> NewPatient {
        NewPatient {
            name: "Jane Roe".into(),
            age: 40,
            gender: Gender::Female,
            diagnosis: "Flu".into(),
            department: "General".into(),
            status: PatientStatus::Outpatient,
            admission_date: "2025-01-01".into(),
            vitals: None,
        }
    }

    fn normal_vitals() -> Vitals {
        Vitals {
            heart_rate: 72,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            temperature: 36.8,
            oxygen_saturation: 98,
            respiratory_rate: 16,
            last_checked: "2025-01-01T08:00".into(),
        }
    }

    #[test]
    fn test_draft_deserializes_from_camel_case() {
        let draft: NewPatient = serde_json::from_value(json!({
            "name": "Jane Roe",
            "age": 40,
            "gender": "Female",
            "diagnosis": "Flu",
            "department": "General",
            "status": "Outpatient",
            "admissionDate": "2025-01-01"
        }))
        .expect("draft should deserialize");

        assert_eq!(draft, jane());
    }

    #[test]
    fn test_draft_rejects_unknown_status() {
        let err = serde_json::from_value::<NewPatient>(json!({
            "name": "Jane Roe",
            "age": 40,
            "gender": "Female",
            "diagnosis": "Flu",
            "department": "General",
            "status": "Sleeping",
            "admissionDate": "2025-01-01"
        }))
        .expect_err("unknown status should be rejected");

        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_draft_rejects_caller_supplied_id() {
        let mut value = serde_json::to_value(jane()).unwrap();
        value["id"] = json!("P-1");

        assert!(serde_json::from_value::<NewPatient>(value).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_admission_date() {
        let mut draft = jane();
        draft.admission_date = "01/01/2025".into();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_checks_vitals() {
        let mut draft = jane();
        draft.vitals = Some(normal_vitals());
        assert!(draft.validate().is_ok());

        let mut inverted = normal_vitals();
        inverted.blood_pressure_diastolic = 130;
        draft.vitals = Some(inverted);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_apply_patch_replaces_only_present_fields() {
        let mut record = PatientRecord::from_draft("P-1".into(), jane());
        record.apply_patch(PatientPatch {
            status: Some(PatientStatus::Admitted),
            vitals: Some(Some(normal_vitals())),
            ..Default::default()
        });

        assert_eq!(record.status, PatientStatus::Admitted);
        assert_eq!(record.vitals, Some(normal_vitals()));
        assert_eq!(record.name, "Jane Roe");
        assert_eq!(record.age, 40);
        assert_eq!(record.id, "P-1");
    }

    #[test]
    fn test_empty_patch() {
        assert!(PatientPatch::default().is_empty());
        assert!(!PatientPatch {
            age: Some(41),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_null_vitals_clears_them() {
        let mut draft = jane();
        draft.vitals = Some(normal_vitals());
        let mut record = PatientRecord::from_draft("P-1".into(), draft);

        let patch: PatientPatch = serde_json::from_value(json!({"vitals": null})).unwrap();
        assert!(!patch.is_empty());
        record.apply_patch(patch);
        assert_eq!(record.vitals, None);
    }

    #[test]
    fn test_record_omits_missing_vitals_on_the_wire() {
        let record = PatientRecord::from_draft("P-1".into(), jane());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("vitals").is_none());
        assert_eq!(value["admissionDate"], "2025-01-01");
    }
}
