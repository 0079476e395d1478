use serde::{Deserialize, Serialize};

/// Identifier for every editable field on an employee profile. Drafts,
/// validation errors, and the form-surface endpoint all speak in these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    // === Basic group ===
    Agency,
    RSer,
    Sl,
    Name,
    PostTitle,
    Nationality,
    EmployeeId,
    Gender,
    DateOfBirth,
    ContactType,
    DutyStation,
    DependentCount,
    ResidentialAddress,
    Zone,
    PoliceStation,
    CellPhone,
    EmergencyContact,
    EmergencyRelation,
    PassportNumber,
    UnlpNumber,
    BloodGroup,
    OfficialEmail,
    PersonalEmail,
    // === Security group ===
    RadioCallSign,
    RadioSerial,
    ZoneAppointment,
    OfficeAddress,
    UnitWarden,
    UnidNumber,
    RfidNumber,
    UnidIssued,
    IdExpiry,
    IdDeposited,
    BsafeCompleted,
    SatCompleted,
    SbfatCompleted,
}

impl FieldId {
    /// Wire name, matching the draft payload keys.
    pub const fn key(self) -> &'static str {
        match self {
            FieldId::Agency => "agency",
            FieldId::RSer => "r_ser",
            FieldId::Sl => "sl",
            FieldId::Name => "name",
            FieldId::PostTitle => "post_title",
            FieldId::Nationality => "nationality",
            FieldId::EmployeeId => "employee_id",
            FieldId::Gender => "gender",
            FieldId::DateOfBirth => "date_of_birth",
            FieldId::ContactType => "contact_type",
            FieldId::DutyStation => "duty_station",
            FieldId::DependentCount => "dependent_count",
            FieldId::ResidentialAddress => "residential_address",
            FieldId::Zone => "zone",
            FieldId::PoliceStation => "police_station",
            FieldId::CellPhone => "cell_phone",
            FieldId::EmergencyContact => "emergency_contact",
            FieldId::EmergencyRelation => "emergency_relation",
            FieldId::PassportNumber => "passport_number",
            FieldId::UnlpNumber => "unlp_number",
            FieldId::BloodGroup => "blood_group",
            FieldId::OfficialEmail => "official_email",
            FieldId::PersonalEmail => "personal_email",
            FieldId::RadioCallSign => "radio_call_sign",
            FieldId::RadioSerial => "radio_serial",
            FieldId::ZoneAppointment => "zone_appointment",
            FieldId::OfficeAddress => "office_address",
            FieldId::UnitWarden => "unit_warden",
            FieldId::UnidNumber => "unid_number",
            FieldId::RfidNumber => "rfid_number",
            FieldId::UnidIssued => "unid_issued",
            FieldId::IdExpiry => "id_expiry",
            FieldId::IdDeposited => "id_deposited",
            FieldId::BsafeCompleted => "bsafe_completed",
            FieldId::SatCompleted => "sat_completed",
            FieldId::SbfatCompleted => "sbfat_completed",
        }
    }
}

/// Fields an employee maintains about themselves.
pub const BASIC_FIELDS: [FieldId; 23] = [
    FieldId::Agency,
    FieldId::RSer,
    FieldId::Sl,
    FieldId::Name,
    FieldId::PostTitle,
    FieldId::Nationality,
    FieldId::EmployeeId,
    FieldId::Gender,
    FieldId::DateOfBirth,
    FieldId::ContactType,
    FieldId::DutyStation,
    FieldId::DependentCount,
    FieldId::ResidentialAddress,
    FieldId::Zone,
    FieldId::PoliceStation,
    FieldId::CellPhone,
    FieldId::EmergencyContact,
    FieldId::EmergencyRelation,
    FieldId::PassportNumber,
    FieldId::UnlpNumber,
    FieldId::BloodGroup,
    FieldId::OfficialEmail,
    FieldId::PersonalEmail,
];

/// Fields maintained by the security office.
pub const SECURITY_FIELDS: [FieldId; 13] = [
    FieldId::RadioCallSign,
    FieldId::RadioSerial,
    FieldId::ZoneAppointment,
    FieldId::OfficeAddress,
    FieldId::UnitWarden,
    FieldId::UnidNumber,
    FieldId::RfidNumber,
    FieldId::UnidIssued,
    FieldId::IdExpiry,
    FieldId::IdDeposited,
    FieldId::BsafeCompleted,
    FieldId::SatCompleted,
    FieldId::SbfatCompleted,
];

/// Every profile field, basic group first.
pub const ALL_FIELDS: [FieldId; 36] = [
    FieldId::Agency,
    FieldId::RSer,
    FieldId::Sl,
    FieldId::Name,
    FieldId::PostTitle,
    FieldId::Nationality,
    FieldId::EmployeeId,
    FieldId::Gender,
    FieldId::DateOfBirth,
    FieldId::ContactType,
    FieldId::DutyStation,
    FieldId::DependentCount,
    FieldId::ResidentialAddress,
    FieldId::Zone,
    FieldId::PoliceStation,
    FieldId::CellPhone,
    FieldId::EmergencyContact,
    FieldId::EmergencyRelation,
    FieldId::PassportNumber,
    FieldId::UnlpNumber,
    FieldId::BloodGroup,
    FieldId::OfficialEmail,
    FieldId::PersonalEmail,
    FieldId::RadioCallSign,
    FieldId::RadioSerial,
    FieldId::ZoneAppointment,
    FieldId::OfficeAddress,
    FieldId::UnitWarden,
    FieldId::UnidNumber,
    FieldId::RfidNumber,
    FieldId::UnidIssued,
    FieldId::IdExpiry,
    FieldId::IdDeposited,
    FieldId::BsafeCompleted,
    FieldId::SatCompleted,
    FieldId::SbfatCompleted,
];

/// Fields that must hold a value for any save to go through. Everything else
/// falls back to its schema default.
pub const VALIDATION_REQUIRED: [FieldId; 7] = [
    FieldId::Name,
    FieldId::EmployeeId,
    FieldId::ResidentialAddress,
    FieldId::CellPhone,
    FieldId::EmergencyContact,
    FieldId::EmergencyRelation,
    FieldId::OfficialEmail,
];

/// Basic fields counted toward the basic-half completeness check. A zero
/// numeric value or empty string counts as missing.
pub const COMPLETION_REQUIRED_BASIC: [FieldId; 16] = [
    FieldId::Agency,
    FieldId::RSer,
    FieldId::Sl,
    FieldId::Name,
    FieldId::PostTitle,
    FieldId::Nationality,
    FieldId::EmployeeId,
    FieldId::Gender,
    FieldId::DateOfBirth,
    FieldId::ContactType,
    FieldId::DutyStation,
    FieldId::ResidentialAddress,
    FieldId::CellPhone,
    FieldId::EmergencyContact,
    FieldId::EmergencyRelation,
    FieldId::OfficialEmail,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn groups_partition_the_catalog() {
        let basic: BTreeSet<_> = BASIC_FIELDS.iter().copied().collect();
        let security: BTreeSet<_> = SECURITY_FIELDS.iter().copied().collect();
        let all: BTreeSet<_> = ALL_FIELDS.iter().copied().collect();

        assert!(basic.is_disjoint(&security));
        assert_eq!(
            basic.union(&security).copied().collect::<BTreeSet<_>>(),
            all
        );
        assert_eq!(all.len(), BASIC_FIELDS.len() + SECURITY_FIELDS.len());
    }

    #[test]
    fn required_sets_stay_inside_the_basic_group() {
        let basic: BTreeSet<_> = BASIC_FIELDS.iter().copied().collect();
        assert!(VALIDATION_REQUIRED.iter().all(|f| basic.contains(f)));
        assert!(COMPLETION_REQUIRED_BASIC.iter().all(|f| basic.contains(f)));
    }

    #[test]
    fn keys_match_serde_names() {
        for field in ALL_FIELDS {
            let json = serde_json::to_string(&field).expect("field serializes");
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }
}
