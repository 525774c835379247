//! Patient models.

use serde::{Deserialize, Serialize};

/// Admission status. Patients are discharged, never deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Discharged,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Discharged => "discharged",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(PatientStatus::Active),
            "discharged" => Some(PatientStatus::Discharged),
            _ => None,
        }
    }
}

/// Person to call about the patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmergencyContact {
    pub name: String,
    pub relation: String,
    pub contact: String,
}

/// A hospitalised patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Local UUID
    pub patient_id: String,
    /// Patient name
    pub name: String,
    /// Diagnosed conditions (drive the diet plan)
    pub diseases: Vec<String>,
    /// Food allergies
    pub allergies: Vec<String>,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
    pub age: u32,
    pub gender: String,
    /// Patient phone number
    pub contact_info: String,
    pub emergency_contact: EmergencyContact,
    pub status: PatientStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Admission input. Also used as the full replacement on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub diseases: Vec<String>,
    pub allergies: Vec<String>,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
    pub age: u32,
    pub gender: String,
    pub contact_info: String,
    pub emergency_contact: EmergencyContact,
}

impl Patient {
    /// Admit a patient; new records are always active.
    pub fn new(input: NewPatient) -> Self {
        let now = super::now_timestamp();
        Self {
            patient_id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            diseases: input.diseases,
            allergies: input.allergies,
            room_number: input.room_number,
            bed_number: input.bed_number,
            floor_number: input.floor_number,
            age: input.age,
            gender: input.gender,
            contact_info: input.contact_info,
            emergency_contact: input.emergency_contact,
            status: PatientStatus::Active,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Overwrite the editable fields, keeping identity and status.
    pub fn apply(&mut self, input: NewPatient) {
        self.name = input.name;
        self.diseases = input.diseases;
        self.allergies = input.allergies;
        self.room_number = input.room_number;
        self.bed_number = input.bed_number;
        self.floor_number = input.floor_number;
        self.age = input.age;
        self.gender = input.gender;
        self.contact_info = input.contact_info;
        self.emergency_contact = input.emergency_contact;
        self.touch();
    }

    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Active
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = super::now_timestamp();
    }
}

/// Where to find a patient: what delivery and pantry boards show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub patient_id: String,
    pub name: String,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
}

impl From<&Patient> for PatientSummary {
    fn from(patient: &Patient) -> Self {
        Self {
            patient_id: patient.patient_id.clone(),
            name: patient.name.clone(),
            room_number: patient.room_number.clone(),
            bed_number: patient.bed_number.clone(),
            floor_number: patient.floor_number.clone(),
        }
    }
}
