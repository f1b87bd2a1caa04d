//! Fixed demo data set loaded into a fresh store.
//!
//! The records carry their identifiers already; the store advances each collection's id
//! generator past them so later additions never collide.

use crate::models::{
    AmbulanceStatus, AmbulanceUnit, Coordinate, Crew, Gender, InventoryCategory, InventoryItem,
    LabPriority, LabResult, LabStatus, PatientRecord, PatientStatus, StaffMember, StaffRole,
    StockStatus,
};

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    age: u32,
    gender: Gender,
    diagnosis: &str,
    department: &str,
    status: PatientStatus,
    admission_date: &str,
) -> PatientRecord {
    PatientRecord {
        id: id.into(),
        name: name.into(),
        age,
        gender,
        diagnosis: diagnosis.into(),
        department: department.into(),
        status,
        admission_date: admission_date.into(),
        vitals: None,
    }
}

pub fn demo_patients() -> Vec<PatientRecord> {
    use Gender::*;
    use PatientStatus::*;
    vec![
        patient("P-1024", "John Doe", 45, Male, "Hypertension", "Cardiology", Admitted, "2024-03-10"),
        patient("P-1025", "Jane Smith", 32, Female, "Migraine", "Neurology", Outpatient, "2024-03-12"),
        patient("P-1026", "Robert Chase", 28, Male, "Fractured Tibia", "Orthopedics", Admitted, "2024-03-14"),
        patient("P-1027", "Emily Rose", 67, Female, "Pneumonia", "Pulmonology", Critical, "2024-03-15"),
        patient("P-1028", "Michael Scott", 50, Male, "Gastritis", "Gastroenterology", Discharged, "2024-03-01"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn lab(
    id: &str,
    patient_name: &str,
    test_type: &str,
    date: &str,
    status: LabStatus,
    doctor: &str,
    priority: LabPriority,
    result_summary: &str,
) -> LabResult {
    LabResult {
        id: id.into(),
        patient_name: patient_name.into(),
        test_type: test_type.into(),
        date: date.into(),
        status,
        doctor: doctor.into(),
        priority,
        result_summary: result_summary.into(),
    }
}

pub fn demo_lab_results() -> Vec<LabResult> {
    use LabPriority::*;
    use LabStatus::*;
    vec![
        lab("LAB-2024-001", "John Doe", "Complete Blood Count (CBC)", "2024-03-15", Completed, "Dr. Gregory House", Routine, "Normal"),
        lab("LAB-2024-002", "Jane Smith", "Lipid Panel", "2024-03-14", Pending, "Dr. Lisa Cuddy", High, "-"),
        lab("LAB-2024-003", "Robert Chase", "MRI - Brain", "2024-03-14", Completed, "Dr. James Wilson", Critical, "Abnormalities Detected"),
        lab("LAB-2024-004", "Allison Cameron", "Urinalysis", "2024-03-13", Processing, "Dr. Eric Foreman", Routine, "-"),
        lab("LAB-2024-005", "Chris Taub", "Liver Function Test", "2024-03-12", Completed, "Dr. Remy Hadley", Routine, "Elevated Enzymes"),
    ]
}

fn staff_member(
    id: &str,
    name: &str,
    role: StaffRole,
    department: &str,
    email: &str,
    phone: &str,
) -> StaffMember {
    StaffMember {
        id: id.into(),
        name: name.into(),
        role,
        department: department.into(),
        email: email.into(),
        phone: phone.into(),
    }
}

pub fn demo_staff() -> Vec<StaffMember> {
    use StaffRole::*;
    vec![
        staff_member("S001", "Dr. Gregory House", Doctor, "Diagnostics", "g.house@hospital.com", "555-0101"),
        staff_member("S002", "Dr. Lisa Cuddy", Admin, "Administration", "l.cuddy@hospital.com", "555-0102"),
        staff_member("S003", "Nurse Ratched", Nurse, "Psychiatry", "m.ratched@hospital.com", "555-0103"),
        staff_member("S004", "Dr. James Wilson", Specialist, "Oncology", "j.wilson@hospital.com", "555-0104"),
        staff_member("S005", "Dr. Strange", Doctor, "Surgery", "s.strange@hospital.com", "555-0105"),
        staff_member("S006", "Nurse Joy", Nurse, "Emergency", "joy@hospital.com", "555-0106"),
    ]
}

fn item(
    id: &str,
    name: &str,
    category: InventoryCategory,
    quantity: u32,
    location: &str,
    status: StockStatus,
    expiry_date: Option<&str>,
) -> InventoryItem {
    InventoryItem {
        id: id.into(),
        name: name.into(),
        category,
        quantity,
        location: location.into(),
        status,
        expiry_date: expiry_date.map(Into::into),
    }
}

pub fn demo_inventory() -> Vec<InventoryItem> {
    use InventoryCategory::*;
    use StockStatus::*;
    vec![
        item("INV-001", "MRI Machine (Philips)", MedicalDevice, 2, "Radiology", InStock, None),
        item("INV-002", "Amoxicillin 500mg", Pharmaceuticals, 500, "Pharmacy A", InStock, Some("2025-12-01")),
        item("INV-003", "Surgical Scalpel #10", Surgical, 50, "OR Supply", LowStock, None),
        item("INV-004", "Paracetamol", Pharmaceuticals, 1000, "Pharmacy B", InStock, Some("2026-01-15")),
        item("INV-005", "Defibrillator", MedicalDevice, 10, "Emergency", InStock, None),
        item("INV-006", "Sterile Gloves (Box)", General, 0, "Storage 2", OutOfStock, None),
    ]
}

struct UnitSeed<'a> {
    id: &'a str,
    status: AmbulanceStatus,
    location: &'a str,
    eta: Option<&'a str>,
    patient_info: &'a str,
    driver: &'a str,
    paramedic: &'a str,
    vehicle: &'a str,
    radio_channel: &'a str,
    mileage: u32,
    coordinate: (f64, f64),
}

impl UnitSeed<'_> {
    fn build(self) -> AmbulanceUnit {
        AmbulanceUnit {
            id: self.id.into(),
            status: self.status,
            crew: Crew {
                driver: self.driver.into(),
                paramedic: self.paramedic.into(),
                emt: None,
            },
            vehicle: self.vehicle.into(),
            location: self.location.into(),
            destination: None,
            eta: self.eta.map(Into::into),
            dispatch_time: None,
            call_type: None,
            triage_level: None,
            patient_info: Some(self.patient_info.into()),
            radio_channel: self.radio_channel.into(),
            mileage: self.mileage,
            coordinate: Coordinate {
                x: self.coordinate.0,
                y: self.coordinate.1,
            },
        }
    }
}

pub fn demo_ambulances() -> Vec<AmbulanceUnit> {
    use AmbulanceStatus::*;
    [
        UnitSeed {
            id: "AMB-01",
            status: EnRoute,
            location: "4th Avenue & Main St",
            eta: Some("5 mins"),
            patient_info: "Critical (Cardiac Arrest)",
            driver: "Mike Ross",
            paramedic: "Rachel Zane",
            vehicle: "Ford F-450 Type I",
            radio_channel: "CH-1",
            mileage: 48_210,
            coordinate: (30.0, 40.0),
        },
        UnitSeed {
            id: "AMB-02",
            status: OnScene,
            location: "123 Elm Street",
            eta: None,
            patient_info: "Stable (Fracture)",
            driver: "Harvey Specter",
            paramedic: "Donna Paulsen",
            vehicle: "Mercedes Sprinter Type II",
            radio_channel: "CH-2",
            mileage: 31_877,
            coordinate: (60.0, 20.0),
        },
        UnitSeed {
            id: "AMB-03",
            status: Returning,
            location: "Highway 101",
            eta: Some("12 mins"),
            patient_info: "Transport Complete",
            driver: "Louis Litt",
            paramedic: "Katrina Bennett",
            vehicle: "Chevrolet G4500 Type III",
            radio_channel: "CH-3",
            mileage: 72_404,
            coordinate: (80.0, 70.0),
        },
        UnitSeed {
            id: "AMB-04",
            status: Dispatched,
            location: "789 Oak Road",
            eta: Some("8 mins"),
            patient_info: "Unconscious",
            driver: "Jessica Pearson",
            paramedic: "Jeff Malone",
            vehicle: "Ford F-450 Type I",
            radio_channel: "CH-4",
            mileage: 12_965,
            coordinate: (20.0, 80.0),
        },
    ]
    .into_iter()
    .map(UnitSeed::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;
    use crate::validation::Validate;
    use std::collections::HashSet;

    fn assert_unique_ids<E: Entity>(records: &[E]) {
        let ids: HashSet<_> = records.iter().map(Entity::id).collect();
        assert_eq!(ids.len(), records.len(), "duplicate {} id in seed data", E::KIND);
    }

    #[test]
    fn test_seed_ids_are_unique_per_collection() {
        assert_unique_ids(&demo_patients());
        assert_unique_ids(&demo_lab_results());
        assert_unique_ids(&demo_staff());
        assert_unique_ids(&demo_inventory());
        assert_unique_ids(&demo_ambulances());
    }

    #[test]
    fn test_seed_ambulances_pass_draft_validation() {
        for unit in demo_ambulances() {
            let mut value = serde_json::to_value(&unit).unwrap();
            value.as_object_mut().unwrap().remove("id");
            let draft: crate::models::NewAmbulanceUnit = serde_json::from_value(value).unwrap();
            draft.validate().expect("seed unit should be valid");
        }
    }

    #[test]
    fn test_seed_staff_emails_validate() {
        for member in demo_staff() {
            crate::validation::validate_email("email", &member.email)
                .expect("seed email should be valid");
        }
    }
}
