//! Ambulance fleet units.

use super::{clearable, merge, Draft, Entity, EntityKind, Patch};
use crate::validation::{if_present, if_set, require_text, validate_range, Validate};
use crate::CrmResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmbulanceStatus {
    Available,
    Dispatched,
    #[serde(rename = "En Route")]
    EnRoute,
    #[serde(rename = "On Scene")]
    OnScene,
    Transporting,
    Returning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Crew {
    pub driver: String,
    pub paramedic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emt: Option<String>,
}

/// Position on the dispatch map, in percent of the map's width and height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbulanceUnit {
    pub id: String,
    pub status: AmbulanceStatus,
    pub crew: Crew,
    pub vehicle: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    /// Emergency Severity Index, 1 (most urgent) to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<String>,
    pub radio_channel: String,
    pub mileage: u32,
    pub coordinate: Coordinate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAmbulanceUnit {
    pub status: AmbulanceStatus,
    pub crew: Crew,
    pub vehicle: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<String>,
    pub radio_channel: String,
    pub mileage: u32,
    pub coordinate: Coordinate,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AmbulanceUnitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AmbulanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<Crew>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub destination: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub eta: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub dispatch_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub call_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<Option<u8>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl Validate for Crew {
    fn validate(&self) -> CrmResult<()> {
        require_text("crew.driver", &self.driver)?;
        require_text("crew.paramedic", &self.paramedic)?;
        if_present(&self.emt, |v| require_text("crew.emt", v))
    }
}

impl Validate for Coordinate {
    fn validate(&self) -> CrmResult<()> {
        validate_range("coordinate.x", self.x, 0.0..=100.0)?;
        validate_range("coordinate.y", self.y, 0.0..=100.0)
    }
}

fn validate_triage(level: &u8) -> CrmResult<()> {
    validate_range("triageLevel", *level, 1..=5)
}

impl Validate for NewAmbulanceUnit {
    fn validate(&self) -> CrmResult<()> {
        self.crew.validate()?;
        require_text("vehicle", &self.vehicle)?;
        require_text("location", &self.location)?;
        if_present(&self.triage_level, validate_triage)?;
        require_text("radioChannel", &self.radio_channel)?;
        self.coordinate.validate()
    }
}

impl Validate for AmbulanceUnitPatch {
    fn validate(&self) -> CrmResult<()> {
        if_present(&self.crew, Crew::validate)?;
        if_present(&self.vehicle, |v| require_text("vehicle", v))?;
        if_present(&self.location, |v| require_text("location", v))?;
        if_set(&self.triage_level, validate_triage)?;
        if_present(&self.radio_channel, |v| require_text("radioChannel", v))?;
        if_present(&self.coordinate, Coordinate::validate)
    }
}

impl Entity for AmbulanceUnit {
    const KIND: EntityKind = EntityKind::AmbulanceUnit;

    type Draft = NewAmbulanceUnit;
    type Patch = AmbulanceUnitPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewAmbulanceUnit) -> Self {
        Self {
            id,
            status: draft.status,
            crew: draft.crew,
            vehicle: draft.vehicle,
            location: draft.location,
            destination: draft.destination,
            eta: draft.eta,
            dispatch_time: draft.dispatch_time,
            call_type: draft.call_type,
            triage_level: draft.triage_level,
            patient_info: draft.patient_info,
            radio_channel: draft.radio_channel,
            mileage: draft.mileage,
            coordinate: draft.coordinate,
        }
    }

    fn apply_patch(&mut self, patch: AmbulanceUnitPatch) {
        merge(&mut self.status, patch.status);
        merge(&mut self.crew, patch.crew);
        merge(&mut self.vehicle, patch.vehicle);
        merge(&mut self.location, patch.location);
        merge(&mut self.destination, patch.destination);
        merge(&mut self.eta, patch.eta);
        merge(&mut self.dispatch_time, patch.dispatch_time);
        merge(&mut self.call_type, patch.call_type);
        merge(&mut self.triage_level, patch.triage_level);
        merge(&mut self.patient_info, patch.patient_info);
        merge(&mut self.radio_channel, patch.radio_channel);
        merge(&mut self.mileage, patch.mileage);
        merge(&mut self.coordinate, patch.coordinate);
    }
}

impl Draft for NewAmbulanceUnit {
    type Entity = AmbulanceUnit;
}

impl Patch for AmbulanceUnitPatch {
    type Entity = AmbulanceUnit;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn standby_unit() -> NewAmbulanceUnit {
        NewAmbulanceUnit {
            status: AmbulanceStatus::Available,
            crew: Crew {
                driver: "Mike Ross".into(),
                paramedic: "Rachel Zane".into(),
                emt: None,
            },
            vehicle: "Ford E-450 Type III".into(),
            location: "Station 1".into(),
            destination: None,
            eta: None,
            dispatch_time: None,
            call_type: None,
            triage_level: None,
            patient_info: None,
            radio_channel: "CH-5".into(),
            mileage: 1200,
            coordinate: Coordinate { x: 50.0, y: 50.0 },
        }
    }

    #[test]
    fn test_status_uses_spaced_names() {
        let status: AmbulanceStatus = serde_json::from_value(json!("On Scene")).unwrap();
        assert_eq!(status, AmbulanceStatus::OnScene);
        assert_eq!(serde_json::to_value(AmbulanceStatus::EnRoute).unwrap(), "En Route");
    }

    #[test]
    fn test_validate_rejects_off_map_coordinate() {
        let mut draft = standby_unit();
        draft.coordinate = Coordinate { x: 120.0, y: 10.0 };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_triage() {
        let mut draft = standby_unit();
        draft.triage_level = Some(0);
        assert!(draft.validate().is_err());
        draft.triage_level = Some(2);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_dispatch_patch_sets_call_details() {
        let mut unit = AmbulanceUnit::from_draft("AMB-05".into(), standby_unit());
        unit.apply_patch(AmbulanceUnitPatch {
            status: Some(AmbulanceStatus::Dispatched),
            destination: Some(Some("12 Harbour Rd".into())),
            triage_level: Some(Some(1)),
            ..Default::default()
        });

        assert_eq!(unit.status, AmbulanceStatus::Dispatched);
        assert_eq!(unit.destination.as_deref(), Some("12 Harbour Rd"));
        assert_eq!(unit.triage_level, Some(1));
        assert_eq!(unit.crew.driver, "Mike Ross");
    }

    #[test]
    fn test_null_clears_call_details_and_absent_keeps_them() {
        let mut draft = standby_unit();
        draft.status = AmbulanceStatus::OnScene;
        draft.eta = Some("5 mins".into());
        draft.patient_info = Some("Critical (Cardiac Arrest)".into());
        draft.call_type = Some("Cardiac".into());
        let mut unit = AmbulanceUnit::from_draft("AMB-01".into(), draft);

        let patch: AmbulanceUnitPatch = serde_json::from_value(json!({
            "status": "Available",
            "eta": null,
            "patientInfo": null
        }))
        .expect("patch should deserialize");
        assert_eq!(patch.eta, Some(None));
        assert_eq!(patch.call_type, None);
        unit.apply_patch(patch);

        assert_eq!(unit.status, AmbulanceStatus::Available);
        assert_eq!(unit.eta, None);
        assert_eq!(unit.patient_info, None);
        assert_eq!(unit.call_type.as_deref(), Some("Cardiac"));
    }

    #[test]
    fn test_null_only_patch_is_a_change() {
        let patch: AmbulanceUnitPatch = serde_json::from_value(json!({"eta": null})).unwrap();
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
        assert!(AmbulanceUnitPatch::default().is_empty());
    }

    #[test]
    fn test_patch_still_validates_a_set_triage_level() {
        let patch: AmbulanceUnitPatch = serde_json::from_value(json!({"triageLevel": 9})).unwrap();
        assert!(patch.validate().is_err());
        let cleared: AmbulanceUnitPatch = serde_json::from_value(json!({"triageLevel": null})).unwrap();
        assert!(cleared.validate().is_ok());
    }
}
