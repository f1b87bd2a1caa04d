//! Laboratory results.

use super::{merge, Draft, Entity, EntityKind, Patch};
use crate::validation::{if_present, require_text, validate_date, Validate};
use crate::CrmResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabStatus {
    Completed,
    Pending,
    Processing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabPriority {
    Routine,
    High,
    Critical,
}

/// A lab test and its outcome. `patient_name` is free text, not a patient identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub id: String,
    pub patient_name: String,
    pub test_type: String,
    pub date: String,
    pub status: LabStatus,
    pub doctor: String,
    pub priority: LabPriority,
    pub result_summary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewLabResult {
    pub patient_name: String,
    pub test_type: String,
    pub date: String,
    pub status: LabStatus,
    pub doctor: String,
    pub priority: LabPriority,
    pub result_summary: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabResultPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LabStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<LabPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,
}

// `result_summary` may be empty while a test is pending.
impl Validate for NewLabResult {
    fn validate(&self) -> CrmResult<()> {
        require_text("patientName", &self.patient_name)?;
        require_text("testType", &self.test_type)?;
        validate_date("date", &self.date)?;
        require_text("doctor", &self.doctor)
    }
}

impl Validate for LabResultPatch {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.patient_name, |v| require_text("patientName", v))?;
        if_present(&self.test_type, |v| require_text("testType", v))?;
        if_present(&self.date, |v| validate_date("date", v))?;
        if_present(&self.doctor, |v| require_text("doctor", v))
    }
}

impl Entity for LabResult {
    const KIND: EntityKind = EntityKind::LabResult;

    type Draft = NewLabResult;
    type Patch = LabResultPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewLabResult) -> Self {
        Self {
            id,
            patient_name: draft.patient_name,
            test_type: draft.test_type,
            date: draft.date,
            status: draft.status,
            doctor: draft.doctor,
            priority: draft.priority,
            result_summary: draft.result_summary,
        }
    }

    fn apply_patch(&mut self, patch: LabResultPatch) {
        merge(&mut self.patient_name, patch.patient_name);
        merge(&mut self.test_type, patch.test_type);
        merge(&mut self.date, patch.date);
        merge(&mut self.status, patch.status);
        merge(&mut self.doctor, patch.doctor);
        merge(&mut self.priority, patch.priority);
        merge(&mut self.result_summary, patch.result_summary);
    }
}

impl Draft for NewLabResult {
    type Entity = LabResult;
}

impl Patch for LabResultPatch {
    type Entity = LabResult;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
