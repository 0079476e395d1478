//! Field partition policy: which slice of a profile each role may touch.
//!
//! Both the presentation boundary (field listing endpoint) and the intake
//! validator consult these functions, so a role can neither see, write, nor
//! be blocked by fields outside its mandate.

use super::domain::{ProfileDraft, Role};
use super::fields::{FieldId, ALL_FIELDS, BASIC_FIELDS, SECURITY_FIELDS};
use super::intake::ValidationErrors;

/// The exact field subset a role may view and edit.
pub fn effective_fields(role: Role) -> &'static [FieldId] {
    match role {
        Role::User => &BASIC_FIELDS,
        Role::SecurityAdmin => &SECURITY_FIELDS,
        Role::SuperAdmin => &ALL_FIELDS,
    }
}

/// Whether `role` may write `field`.
pub fn may_edit(role: Role, field: FieldId) -> bool {
    effective_fields(role).contains(&field)
}

/// Drop validation errors raised against fields outside the role's
/// effective set. A restricted save must not fail over data the submitter
/// was never shown.
pub fn scope_errors(errors: ValidationErrors, role: Role) -> ValidationErrors {
    errors.retain_fields(effective_fields(role))
}

/// Discard draft values outside the role's effective set before any merge
/// or validation happens. Out-of-scope fields fall back to the stored value
/// on edit and to the schema default on create.
pub fn scrub_draft(mut draft: ProfileDraft, role: Role) -> ProfileDraft {
    for field in ALL_FIELDS {
        if may_edit(role, field) {
            continue;
        }
        match field {
            FieldId::Agency => draft.agency = None,
            FieldId::RSer => draft.r_ser = None,
            FieldId::Sl => draft.sl = None,
            FieldId::Name => draft.name = None,
            FieldId::PostTitle => draft.post_title = None,
            FieldId::Nationality => draft.nationality = None,
            FieldId::EmployeeId => draft.employee_id = None,
            FieldId::Gender => draft.gender = None,
            FieldId::DateOfBirth => draft.date_of_birth = None,
            FieldId::ContactType => draft.contact_type = None,
            FieldId::DutyStation => draft.duty_station = None,
            FieldId::DependentCount => draft.dependent_count = None,
            FieldId::ResidentialAddress => draft.residential_address = None,
            FieldId::Zone => draft.zone = None,
            FieldId::PoliceStation => draft.police_station = None,
            FieldId::CellPhone => draft.cell_phone = None,
            FieldId::EmergencyContact => draft.emergency_contact = None,
            FieldId::EmergencyRelation => draft.emergency_relation = None,
            FieldId::PassportNumber => draft.passport_number = None,
            FieldId::UnlpNumber => draft.unlp_number = None,
            FieldId::BloodGroup => draft.blood_group = None,
            FieldId::OfficialEmail => draft.official_email = None,
            FieldId::PersonalEmail => draft.personal_email = None,
            FieldId::RadioCallSign => draft.radio_call_sign = None,
            FieldId::RadioSerial => draft.radio_serial = None,
            FieldId::ZoneAppointment => draft.zone_appointment = None,
            FieldId::OfficeAddress => draft.office_address = None,
            FieldId::UnitWarden => draft.unit_warden = None,
            FieldId::UnidNumber => draft.unid_number = None,
            FieldId::RfidNumber => draft.rfid_number = None,
            FieldId::UnidIssued => draft.unid_issued = None,
            FieldId::IdExpiry => draft.id_expiry = None,
            FieldId::IdDeposited => draft.id_deposited = None,
            FieldId::BsafeCompleted => draft.bsafe_completed = None,
            FieldId::SatCompleted => draft.sat_completed = None,
            FieldId::SbfatCompleted => draft.sbfat_completed = None,
        }
    }

    // The dependent batch rides with the basic half of the form.
    if !may_edit(role, FieldId::DependentCount) {
        draft.dependents = None;
    }

    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn user_sees_exactly_the_basic_group() {
        let effective: BTreeSet<_> = effective_fields(Role::User).iter().copied().collect();
        let basic: BTreeSet<_> = BASIC_FIELDS.iter().copied().collect();
        assert_eq!(effective, basic);
    }

    #[test]
    fn security_admin_sees_exactly_the_security_group() {
        let effective: BTreeSet<_> = effective_fields(Role::SecurityAdmin)
            .iter()
            .copied()
            .collect();
        let security: BTreeSet<_> = SECURITY_FIELDS.iter().copied().collect();
        assert_eq!(effective, security);
    }

    #[test]
    fn super_admin_sees_every_field() {
        let effective: BTreeSet<_> = effective_fields(Role::SuperAdmin).iter().copied().collect();
        let all: BTreeSet<_> = ALL_FIELDS.iter().copied().collect();
        assert_eq!(effective, all);
    }

    #[test]
    fn scrub_strips_security_values_from_user_drafts() {
        let draft = ProfileDraft {
            name: Some("Rahim Uddin".to_string()),
            radio_call_sign: Some("ROMEO-7".to_string()),
            unid_number: Some("UN-99812".to_string()),
            ..ProfileDraft::default()
        };

        let scrubbed = scrub_draft(draft, Role::User);
        assert_eq!(scrubbed.name.as_deref(), Some("Rahim Uddin"));
        assert!(scrubbed.radio_call_sign.is_none());
        assert!(scrubbed.unid_number.is_none());
    }

    #[test]
    fn scrub_strips_basic_values_and_dependents_from_security_drafts() {
        let draft = ProfileDraft {
            name: Some("Overwritten".to_string()),
            employee_id: Some("EMP-X".to_string()),
            radio_call_sign: Some("ROMEO-7".to_string()),
            dependents: Some(Vec::new()),
            ..ProfileDraft::default()
        };

        let scrubbed = scrub_draft(draft, Role::SecurityAdmin);
        assert!(scrubbed.name.is_none());
        assert!(scrubbed.employee_id.is_none());
        assert!(scrubbed.dependents.is_none());
        assert_eq!(scrubbed.radio_call_sign.as_deref(), Some("ROMEO-7"));
    }

    #[test]
    fn scrub_leaves_super_admin_drafts_untouched() {
        let draft = ProfileDraft {
            name: Some("Full Access".to_string()),
            radio_call_sign: Some("ROMEO-7".to_string()),
            dependents: Some(Vec::new()),
            ..ProfileDraft::default()
        };

        let scrubbed = scrub_draft(draft.clone(), Role::SuperAdmin);
        assert_eq!(scrubbed, draft);
    }
}
