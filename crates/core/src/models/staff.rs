//! Hospital staff directory.

use super::{merge, Draft, Entity, EntityKind, Patch};
use crate::validation::{if_present, require_text, validate_email, Validate};
use crate::CrmResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Doctor,
    Nurse,
    Admin,
    Pharmacist,
    Technician,
    Specialist,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub department: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewStaffMember {
    pub name: String,
    pub role: StaffRole,
    pub department: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaffMemberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for NewStaffMember {
    fn validate(&self) -> CrmResult<()> {
        require_text("name", &self.name)?;
        require_text("department", &self.department)?;
        validate_email("email", &self.email)?;
        require_text("phone", &self.phone)
    }
}

impl Validate for StaffMemberPatch {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.name, |v| require_text("name", v))?;
        if_present(&self.department, |v| require_text("department", v))?;
        if_present(&self.email, |v| validate_email("email", v))?;
        if_present(&self.phone, |v| require_text("phone", v))
    }
}

impl Entity for StaffMember {
    const KIND: EntityKind = EntityKind::StaffMember;

    type Draft = NewStaffMember;
    type Patch = StaffMemberPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewStaffMember) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            department: draft.department,
            email: draft.email,
            phone: draft.phone,
        }
    }

    fn apply_patch(&mut self, patch: StaffMemberPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.role, patch.role);
        merge(&mut self.department, patch.department);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
    }
}

impl Draft for NewStaffMember {
    type Entity = StaffMember;
}

impl Patch for StaffMemberPatch {
    type Entity = StaffMember;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pharmacist() -> NewStaffMember {
        NewStaffMember {
            name: "Dr. Allison Cameron".into(),
            role: StaffRole::Pharmacist,
            department: "Pharmacy".into(),
            email: "a.cameron@hospital.com".into(),
            phone: "555-0107".into(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_member() {
        assert!(pharmacist().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut draft = pharmacist();
        draft.email = "cameron-at-hospital".into();
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_role_names_match_wire_strings() {
        let value = serde_json::to_value(StaffRole::Technician).unwrap();
        assert_eq!(value, "Technician");
    }
}
