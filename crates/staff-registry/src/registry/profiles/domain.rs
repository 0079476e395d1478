use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::fields::{FieldId, COMPLETION_REQUIRED_BASIC, SECURITY_FIELDS};

/// Identifier wrapper for stored profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Identifier for an authenticated actor, issued by the identity boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

/// Identifier wrapper for notifications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

/// Access roles recognized by the registry. The role presented by the
/// identity boundary is trusted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    SecurityAdmin,
    SuperAdmin,
}

impl Role {
    pub const fn code(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::SecurityAdmin => "security_admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "security_admin" => Some(Role::SecurityAdmin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, Role::SecurityAdmin | Role::SuperAdmin)
    }
}

/// The acting identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub role: Role,
}

/// Agencies, projects, and clusters an employee can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agency {
    Undp,
    Unicef,
    Who,
    Unhcr,
    Sdg,
    Climate,
    Governance,
    Crisis,
    Health,
    Education,
    Protection,
    Shelter,
    Co,
    Ro,
    Hq,
    Liaison,
}

impl Agency {
    pub const fn code(self) -> &'static str {
        match self {
            Agency::Undp => "undp",
            Agency::Unicef => "unicef",
            Agency::Who => "who",
            Agency::Unhcr => "unhcr",
            Agency::Sdg => "sdg",
            Agency::Climate => "climate",
            Agency::Governance => "governance",
            Agency::Crisis => "crisis",
            Agency::Health => "health",
            Agency::Education => "education",
            Agency::Protection => "protection",
            Agency::Shelter => "shelter",
            Agency::Co => "co",
            Agency::Ro => "ro",
            Agency::Hq => "hq",
            Agency::Liaison => "liaison",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Agency::Undp => "UNDP",
            Agency::Unicef => "UNICEF",
            Agency::Who => "WHO",
            Agency::Unhcr => "UNHCR",
            Agency::Sdg => "SDG Project",
            Agency::Climate => "Climate Project",
            Agency::Governance => "Governance Cluster",
            Agency::Crisis => "Crisis Cluster",
            Agency::Health => "Health Cluster",
            Agency::Education => "Education Cluster",
            Agency::Protection => "Protection Cluster",
            Agency::Shelter => "Shelter Cluster",
            Agency::Co => "Country Office",
            Agency::Ro => "Regional Office",
            Agency::Hq => "Headquarters",
            Agency::Liaison => "Liaison Office",
        }
    }

    pub const fn ordered() -> [Agency; 16] {
        [
            Agency::Undp,
            Agency::Unicef,
            Agency::Who,
            Agency::Unhcr,
            Agency::Sdg,
            Agency::Climate,
            Agency::Governance,
            Agency::Crisis,
            Agency::Health,
            Agency::Education,
            Agency::Protection,
            Agency::Shelter,
            Agency::Co,
            Agency::Ro,
            Agency::Hq,
            Agency::Liaison,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn code(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Contract modality under which an employee is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Pa,
    Ca,
    Fta,
    Ta,
    Sc,
    Ic,
    Unv,
}

impl ContactType {
    pub const fn code(self) -> &'static str {
        match self {
            ContactType::Pa => "pa",
            ContactType::Ca => "ca",
            ContactType::Fta => "fta",
            ContactType::Ta => "ta",
            ContactType::Sc => "sc",
            ContactType::Ic => "ic",
            ContactType::Unv => "unv",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContactType::Pa => "Permanent Appointment",
            ContactType::Ca => "Continuing Appointment",
            ContactType::Fta => "Fixed-Term Appointment",
            ContactType::Ta => "Temporary Appointment",
            ContactType::Sc => "Service Contract",
            ContactType::Ic => "Individual Contractor",
            ContactType::Unv => "UN Volunteer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStation {
    Dhaka,
    Chittagong,
    Sylhet,
    Rajshahi,
    Khulna,
    Barisal,
    Rangpur,
    Mymensingh,
    Other,
}

impl DutyStation {
    pub const fn code(self) -> &'static str {
        match self {
            DutyStation::Dhaka => "dhaka",
            DutyStation::Chittagong => "chittagong",
            DutyStation::Sylhet => "sylhet",
            DutyStation::Rajshahi => "rajshahi",
            DutyStation::Khulna => "khulna",
            DutyStation::Barisal => "barisal",
            DutyStation::Rangpur => "rangpur",
            DutyStation::Mymensingh => "mymensingh",
            DutyStation::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DutyStation::Dhaka => "Dhaka",
            DutyStation::Chittagong => "Chittagong",
            DutyStation::Sylhet => "Sylhet",
            DutyStation::Rajshahi => "Rajshahi",
            DutyStation::Khulna => "Khulna",
            DutyStation::Barisal => "Barisal",
            DutyStation::Rangpur => "Rangpur",
            DutyStation::Mymensingh => "Mymensingh",
            DutyStation::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodGroup {
    APos,
    ANeg,
    BPos,
    BNeg,
    AbPos,
    AbNeg,
    OPos,
    ONeg,
}

impl BloodGroup {
    pub const fn label(self) -> &'static str {
        match self {
            BloodGroup::APos => "A+",
            BloodGroup::ANeg => "A-",
            BloodGroup::BPos => "B+",
            BloodGroup::BNeg => "B-",
            BloodGroup::AbPos => "AB+",
            BloodGroup::AbNeg => "AB-",
            BloodGroup::OPos => "O+",
            BloodGroup::ONeg => "O-",
        }
    }
}

/// Relationship of a dependent to the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Spouse,
    Son,
    Daughter,
}

impl Relationship {
    pub const fn label(self) -> &'static str {
        match self {
            Relationship::Spouse => "Spouse",
            Relationship::Son => "Son",
            Relationship::Daughter => "Daughter",
        }
    }
}

/// How far along a profile is, derived from its two field halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Complete,
    PartiallyCompleted,
    Incomplete,
}

impl CompletionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CompletionStatus::Complete => "complete",
            CompletionStatus::PartiallyCompleted => "partially_completed",
            CompletionStatus::Incomplete => "incomplete",
        }
    }
}

/// One employee record. The basic half belongs to the employee, the security
/// half to the security office; the field partition policy decides who may
/// write what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub id: ProfileId,
    // === Basic group ===
    pub agency: Agency,
    pub r_ser: u32,
    pub sl: u32,
    pub name: String,
    pub post_title: String,
    pub nationality: String,
    pub employee_id: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub contact_type: ContactType,
    pub duty_station: DutyStation,
    pub dependent_count: u32,
    pub residential_address: String,
    pub zone: String,
    pub police_station: String,
    pub cell_phone: String,
    pub emergency_contact: String,
    pub emergency_relation: String,
    pub passport_number: String,
    pub unlp_number: String,
    pub blood_group: BloodGroup,
    pub official_email: String,
    pub personal_email: String,
    // === Security group ===
    pub radio_call_sign: String,
    pub radio_serial: String,
    pub zone_appointment: String,
    pub office_address: String,
    pub unit_warden: String,
    pub unid_number: String,
    pub rfid_number: String,
    pub unid_issued: Option<NaiveDate>,
    pub id_expiry: Option<NaiveDate>,
    pub id_deposited: Option<NaiveDate>,
    pub bsafe_completed: Option<NaiveDate>,
    pub sat_completed: Option<NaiveDate>,
    pub sbfat_completed: Option<NaiveDate>,
    // === Metadata ===
    pub created_by: ActorId,
    pub created_by_role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Schema default for the date of birth when the submitter leaves it blank.
pub const DEFAULT_DATE_OF_BIRTH: (i32, u32, u32) = (2000, 1, 1);

impl EmployeeProfile {
    /// A record holding every schema default, used as the merge base for
    /// newly created profiles.
    pub fn with_defaults(
        id: ProfileId,
        created_by: ActorId,
        created_by_role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (year, month, day) = DEFAULT_DATE_OF_BIRTH;
        let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| created_at.date_naive());

        Self {
            id,
            agency: Agency::Undp,
            r_ser: 0,
            sl: 0,
            name: String::new(),
            post_title: String::new(),
            nationality: "bangladesh".to_string(),
            employee_id: String::new(),
            gender: Gender::Male,
            date_of_birth,
            contact_type: ContactType::Pa,
            duty_station: DutyStation::Dhaka,
            dependent_count: 0,
            residential_address: String::new(),
            zone: String::new(),
            police_station: String::new(),
            cell_phone: String::new(),
            emergency_contact: String::new(),
            emergency_relation: String::new(),
            passport_number: String::new(),
            unlp_number: String::new(),
            blood_group: BloodGroup::APos,
            official_email: String::new(),
            personal_email: String::new(),
            radio_call_sign: String::new(),
            radio_serial: String::new(),
            zone_appointment: String::new(),
            office_address: String::new(),
            unit_warden: String::new(),
            unid_number: String::new(),
            rfid_number: String::new(),
            unid_issued: None,
            id_expiry: None,
            id_deposited: None,
            bsafe_completed: None,
            sat_completed: None,
            sbfat_completed: None,
            created_by,
            created_by_role,
            created_at,
            updated_at: created_at,
        }
    }

    /// Whether a field currently holds a value. Choice and plain date fields
    /// always do; numeric fields count zero as empty, strings count "" as
    /// empty, optional dates count `None` as empty.
    pub fn field_is_populated(&self, field: FieldId) -> bool {
        match field {
            FieldId::Agency => true,
            FieldId::RSer => self.r_ser != 0,
            FieldId::Sl => self.sl != 0,
            FieldId::Name => !self.name.is_empty(),
            FieldId::PostTitle => !self.post_title.is_empty(),
            FieldId::Nationality => !self.nationality.is_empty(),
            FieldId::EmployeeId => !self.employee_id.is_empty(),
            FieldId::Gender => true,
            FieldId::DateOfBirth => true,
            FieldId::ContactType => true,
            FieldId::DutyStation => true,
            FieldId::DependentCount => self.dependent_count != 0,
            FieldId::ResidentialAddress => !self.residential_address.is_empty(),
            FieldId::Zone => !self.zone.is_empty(),
            FieldId::PoliceStation => !self.police_station.is_empty(),
            FieldId::CellPhone => !self.cell_phone.is_empty(),
            FieldId::EmergencyContact => !self.emergency_contact.is_empty(),
            FieldId::EmergencyRelation => !self.emergency_relation.is_empty(),
            FieldId::PassportNumber => !self.passport_number.is_empty(),
            FieldId::UnlpNumber => !self.unlp_number.is_empty(),
            FieldId::BloodGroup => true,
            FieldId::OfficialEmail => !self.official_email.is_empty(),
            FieldId::PersonalEmail => !self.personal_email.is_empty(),
            FieldId::RadioCallSign => !self.radio_call_sign.is_empty(),
            FieldId::RadioSerial => !self.radio_serial.is_empty(),
            FieldId::ZoneAppointment => !self.zone_appointment.is_empty(),
            FieldId::OfficeAddress => !self.office_address.is_empty(),
            FieldId::UnitWarden => !self.unit_warden.is_empty(),
            FieldId::UnidNumber => !self.unid_number.is_empty(),
            FieldId::RfidNumber => !self.rfid_number.is_empty(),
            FieldId::UnidIssued => self.unid_issued.is_some(),
            FieldId::IdExpiry => self.id_expiry.is_some(),
            FieldId::IdDeposited => self.id_deposited.is_some(),
            FieldId::BsafeCompleted => self.bsafe_completed.is_some(),
            FieldId::SatCompleted => self.sat_completed.is_some(),
            FieldId::SbfatCompleted => self.sbfat_completed.is_some(),
        }
    }

    pub fn basic_complete(&self) -> bool {
        COMPLETION_REQUIRED_BASIC
            .iter()
            .all(|field| self.field_is_populated(*field))
    }

    pub fn security_complete(&self) -> bool {
        SECURITY_FIELDS
            .iter()
            .all(|field| self.field_is_populated(*field))
    }

    /// Pure function of the stored fields. The basic half gates progress:
    /// security data without basic data still reads as `incomplete`.
    pub fn completion_status(&self) -> CompletionStatus {
        match (self.basic_complete(), self.security_complete()) {
            (true, true) => CompletionStatus::Complete,
            (true, false) => CompletionStatus::PartiallyCompleted,
            (false, _) => CompletionStatus::Incomplete,
        }
    }
}

/// Dependent family member attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub name: String,
    pub relationship: Relationship,
    pub date_of_birth: NaiveDate,
    pub residential_address: String,
}

/// Raw profile submission. Absent fields keep the stored value on edit and
/// take the schema default on create; fields outside the submitter's
/// partition are discarded before anything else happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub agency: Option<Agency>,
    pub r_ser: Option<u32>,
    pub sl: Option<u32>,
    pub name: Option<String>,
    pub post_title: Option<String>,
    pub nationality: Option<String>,
    pub employee_id: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub contact_type: Option<ContactType>,
    pub duty_station: Option<DutyStation>,
    pub dependent_count: Option<u32>,
    pub residential_address: Option<String>,
    pub zone: Option<String>,
    pub police_station: Option<String>,
    pub cell_phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_relation: Option<String>,
    pub passport_number: Option<String>,
    pub unlp_number: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub official_email: Option<String>,
    pub personal_email: Option<String>,
    pub radio_call_sign: Option<String>,
    pub radio_serial: Option<String>,
    pub zone_appointment: Option<String>,
    pub office_address: Option<String>,
    pub unit_warden: Option<String>,
    pub unid_number: Option<String>,
    pub rfid_number: Option<String>,
    pub unid_issued: Option<NaiveDate>,
    pub id_expiry: Option<NaiveDate>,
    pub id_deposited: Option<NaiveDate>,
    pub bsafe_completed: Option<NaiveDate>,
    pub sat_completed: Option<NaiveDate>,
    pub sbfat_completed: Option<NaiveDate>,
    pub dependents: Option<Vec<DependentDraft>>,
}

/// One row of the dependent batch as submitted. Fully empty rows are
/// skipped, mirroring untouched spare rows on the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependentDraft {
    pub name: String,
    pub relationship: Option<Relationship>,
    pub date_of_birth: Option<NaiveDate>,
    pub residential_address: Option<String>,
}

impl DependentDraft {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.relationship.is_none()
            && self.date_of_birth.is_none()
            && self
                .residential_address
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
    }
}

/// Notification event categories emitted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ProfileSubmitted,
    ProfileEdited,
    SecurityUpdate,
}

impl NotificationKind {
    pub const fn code(self) -> &'static str {
        match self {
            NotificationKind::ProfileSubmitted => "profile_submitted",
            NotificationKind::ProfileEdited => "profile_edited",
            NotificationKind::SecurityUpdate => "security_update",
        }
    }
}

/// In-app notification row. `is_read` only ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: ActorId,
    pub sender: Option<ActorId>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub profile: Option<ProfileId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
