//! Profile intake: merge a scrubbed draft over its base record and run
//! field-keyed validation. Dependent rows are screened separately so a bad
//! batch never blocks the parent save.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Dependent, DependentDraft, EmployeeProfile, ProfileDraft};
use super::fields::{FieldId, VALIDATION_REQUIRED};

pub const MAX_DEPENDENT_COUNT: u32 = 10;
pub const MAX_EMPLOYEE_ID_LEN: usize = 20;

/// Field-keyed validation messages, ordered by field for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<FieldId, Vec<String>>);

impl ValidationErrors {
    pub fn push(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    /// Keep only errors raised against the given fields.
    pub fn retain_fields(mut self, allowed: &[FieldId]) -> Self {
        self.0.retain(|field, _| allowed.contains(field));
        self
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field.key(), message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Apply every present draft value onto the base record. The caller decides
/// what the base is: schema defaults on create, the stored record on edit.
pub fn merge(base: &EmployeeProfile, draft: &ProfileDraft) -> EmployeeProfile {
    let mut profile = base.clone();

    if let Some(value) = draft.agency {
        profile.agency = value;
    }
    if let Some(value) = draft.r_ser {
        profile.r_ser = value;
    }
    if let Some(value) = draft.sl {
        profile.sl = value;
    }
    if let Some(value) = &draft.name {
        profile.name = value.clone();
    }
    if let Some(value) = &draft.post_title {
        profile.post_title = value.clone();
    }
    if let Some(value) = &draft.nationality {
        profile.nationality = value.clone();
    }
    if let Some(value) = &draft.employee_id {
        profile.employee_id = value.clone();
    }
    if let Some(value) = draft.gender {
        profile.gender = value;
    }
    if let Some(value) = draft.date_of_birth {
        profile.date_of_birth = value;
    }
    if let Some(value) = draft.contact_type {
        profile.contact_type = value;
    }
    if let Some(value) = draft.duty_station {
        profile.duty_station = value;
    }
    if let Some(value) = draft.dependent_count {
        profile.dependent_count = value;
    }
    if let Some(value) = &draft.residential_address {
        profile.residential_address = value.clone();
    }
    if let Some(value) = &draft.zone {
        profile.zone = value.clone();
    }
    if let Some(value) = &draft.police_station {
        profile.police_station = value.clone();
    }
    if let Some(value) = &draft.cell_phone {
        profile.cell_phone = value.clone();
    }
    if let Some(value) = &draft.emergency_contact {
        profile.emergency_contact = value.clone();
    }
    if let Some(value) = &draft.emergency_relation {
        profile.emergency_relation = value.clone();
    }
    if let Some(value) = &draft.passport_number {
        profile.passport_number = value.clone();
    }
    if let Some(value) = &draft.unlp_number {
        profile.unlp_number = value.clone();
    }
    if let Some(value) = draft.blood_group {
        profile.blood_group = value;
    }
    if let Some(value) = &draft.official_email {
        profile.official_email = value.clone();
    }
    if let Some(value) = &draft.personal_email {
        profile.personal_email = value.clone();
    }
    if let Some(value) = &draft.radio_call_sign {
        profile.radio_call_sign = value.clone();
    }
    if let Some(value) = &draft.radio_serial {
        profile.radio_serial = value.clone();
    }
    if let Some(value) = &draft.zone_appointment {
        profile.zone_appointment = value.clone();
    }
    if let Some(value) = &draft.office_address {
        profile.office_address = value.clone();
    }
    if let Some(value) = &draft.unit_warden {
        profile.unit_warden = value.clone();
    }
    if let Some(value) = &draft.unid_number {
        profile.unid_number = value.clone();
    }
    if let Some(value) = &draft.rfid_number {
        profile.rfid_number = value.clone();
    }
    if let Some(value) = draft.unid_issued {
        profile.unid_issued = Some(value);
    }
    if let Some(value) = draft.id_expiry {
        profile.id_expiry = Some(value);
    }
    if let Some(value) = draft.id_deposited {
        profile.id_deposited = Some(value);
    }
    if let Some(value) = draft.bsafe_completed {
        profile.bsafe_completed = Some(value);
    }
    if let Some(value) = draft.sat_completed {
        profile.sat_completed = Some(value);
    }
    if let Some(value) = draft.sbfat_completed {
        profile.sbfat_completed = Some(value);
    }

    profile
}

fn required_value(profile: &EmployeeProfile, field: FieldId) -> &str {
    match field {
        FieldId::Name => &profile.name,
        FieldId::EmployeeId => &profile.employee_id,
        FieldId::ResidentialAddress => &profile.residential_address,
        FieldId::CellPhone => &profile.cell_phone,
        FieldId::EmergencyContact => &profile.emergency_contact,
        FieldId::EmergencyRelation => &profile.emergency_relation,
        FieldId::OfficialEmail => &profile.official_email,
        // VALIDATION_REQUIRED only names the string fields above.
        _ => "present",
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

/// Validate a fully merged record. Errors are keyed by field; the caller
/// scopes them to the submitter's partition before reporting failure.
pub fn validate(profile: &EmployeeProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for field in VALIDATION_REQUIRED {
        if required_value(profile, field).trim().is_empty() {
            errors.push(field, "This field is required.");
        }
    }

    if !profile.official_email.trim().is_empty() && !looks_like_email(&profile.official_email) {
        errors.push(FieldId::OfficialEmail, "Enter a valid email address.");
    }
    if !profile.personal_email.trim().is_empty() && !looks_like_email(&profile.personal_email) {
        errors.push(FieldId::PersonalEmail, "Enter a valid email address.");
    }

    if profile.dependent_count > MAX_DEPENDENT_COUNT {
        errors.push(
            FieldId::DependentCount,
            format!("At most {MAX_DEPENDENT_COUNT} dependents can be recorded."),
        );
    }

    if profile.employee_id.len() > MAX_EMPLOYEE_ID_LEN {
        errors.push(
            FieldId::EmployeeId,
            format!("Employee ID cannot exceed {MAX_EMPLOYEE_ID_LEN} characters."),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reasons a dependent batch is rejected as a whole.
#[derive(Debug, thiserror::Error)]
pub enum DependentBatchError {
    #[error("dependent row {row} is missing a name")]
    MissingName { row: usize },
    #[error("dependent row {row} is missing a relationship")]
    MissingRelationship { row: usize },
    #[error("dependent row {row} is missing a date of birth")]
    MissingDateOfBirth { row: usize },
}

/// Screen a submitted dependent batch into the stored set. Fully blank rows
/// are skipped (untouched spare rows on the form); any partially filled row
/// must carry a name, relationship, and date of birth. The result is
/// ordered by name.
pub fn screen_dependents(drafts: &[DependentDraft]) -> Result<Vec<Dependent>, DependentBatchError> {
    let mut dependents = Vec::new();

    for (row, draft) in drafts.iter().enumerate() {
        if draft.is_blank() {
            continue;
        }

        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DependentBatchError::MissingName { row });
        }
        let relationship = draft
            .relationship
            .ok_or(DependentBatchError::MissingRelationship { row })?;
        let date_of_birth = draft
            .date_of_birth
            .ok_or(DependentBatchError::MissingDateOfBirth { row })?;

        dependents.push(Dependent {
            name: name.to_string(),
            relationship,
            date_of_birth,
            residential_address: draft
                .residential_address
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
        });
    }

    dependents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dependents)
}
