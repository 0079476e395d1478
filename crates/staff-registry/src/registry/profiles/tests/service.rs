use super::common::*;

use crate::registry::profiles::domain::{
    CompletionStatus, NotificationId, NotificationKind, ProfileId, Relationship,
};
use crate::registry::profiles::fields::FieldId;
use crate::registry::profiles::repository::{ActorDirectory, ProfileRepository};
use crate::registry::profiles::service::ProfileServiceError;
use crate::registry::profiles::DependentDraft;
use crate::registry::report::ReportQuery;
use chrono::NaiveDate;

#[test]
fn user_submission_stores_a_record_and_notifies_the_security_office() {
    let (service, repository, sink, directory) = build_service();
    directory
        .record(&security_actor())
        .expect("directory accepts actors");

    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    assert_eq!(
        receipt.completion_status,
        CompletionStatus::PartiallyCompleted
    );
    assert_eq!(receipt.message, "Profile submitted successfully!");
    assert_eq!(repository.len(), 1);

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, security_actor().id);
    assert_eq!(sent[0].kind, NotificationKind::ProfileSubmitted);
    assert_eq!(sent[0].title, "New Profile Submitted by Rahim Uddin");
    assert_eq!(
        sent[0].message,
        "Profile for Rahim Uddin (ID: EMP-0042) has been submitted."
    );
}

#[test]
fn second_submission_by_the_same_user_is_rejected_without_writes() {
    let (service, repository, _, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("first submission succeeds");

    match service.submit(&user_actor(), basic_draft()) {
        Err(ProfileServiceError::DuplicateProfile(message)) => {
            assert!(message.contains("only edit your existing profile"));
        }
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(repository.len(), 1);
}

#[test]
fn security_admin_save_leaves_the_basic_half_unchanged() {
    let (service, repository, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    let mut draft = security_draft();
    draft.name = Some("Overwritten Name".to_string());
    draft.employee_id = Some("HIJACKED".to_string());

    let edited = service
        .edit(&security_actor(), &receipt.profile_id, draft)
        .expect("security edit succeeds");
    assert_eq!(edited.completion_status, CompletionStatus::Complete);
    assert_eq!(
        edited.message,
        "Security information updated successfully!"
    );

    let stored = repository
        .fetch(&receipt.profile_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.profile.name, "Rahim Uddin");
    assert_eq!(stored.profile.employee_id, "EMP-0042");
    assert_eq!(stored.profile.radio_call_sign, "ROMEO-7");
}

#[test]
fn user_save_cannot_touch_the_security_half() {
    let (service, repository, _, _) = build_service();

    let mut draft = basic_draft();
    draft.radio_call_sign = Some("SELF-ISSUED".to_string());
    draft.unid_number = Some("UN-00000".to_string());

    let receipt = service
        .submit(&user_actor(), draft)
        .expect("submission succeeds");

    let stored = repository
        .fetch(&receipt.profile_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.profile.radio_call_sign, "");
    assert_eq!(stored.profile.unid_number, "");
}

#[test]
fn users_cannot_edit_records_they_do_not_own() {
    let (service, _, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    match service.edit(&second_user_actor(), &receipt.profile_id, basic_draft()) {
        Err(ProfileServiceError::Forbidden(message)) => {
            assert_eq!(message, "You can only edit your own profile.");
        }
        other => panic!("expected forbidden, got {other:?}"),
    }
}

#[test]
fn validation_errors_are_scoped_to_the_submitters_partition() {
    let (service, _, _, _) = build_service();

    // An empty user draft trips the required basic fields.
    match service.submit(&user_actor(), Default::default()) {
        Err(ProfileServiceError::Validation(errors)) => {
            assert!(errors.contains(FieldId::Name));
            assert!(errors.contains(FieldId::OfficialEmail));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }

    // The same empty draft from the security office saves: every failing
    // field is outside its partition.
    let receipt = service
        .submit(&security_actor(), Default::default())
        .expect("security create succeeds");
    assert_eq!(receipt.completion_status, CompletionStatus::Incomplete);
}

#[test]
fn duplicate_employee_id_maps_to_a_field_error() {
    let (service, repository, sink, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("first submission succeeds");

    let mut draft = basic_draft();
    draft.name = Some("Farida Yasmin".to_string());
    draft.official_email = Some("farida.yasmin@undp.org".to_string());

    match service.submit(&second_user_actor(), draft) {
        Err(ProfileServiceError::Validation(errors)) => {
            assert!(errors.contains(FieldId::EmployeeId));
        }
        other => panic!("expected employee id conflict, got {other:?}"),
    }
    assert_eq!(repository.len(), 1);
    assert!(sink.sent().is_empty());
}

#[test]
fn storage_failure_surfaces_and_sends_no_notifications() {
    let (service, repository, sink, directory) = build_service();
    directory
        .record(&security_actor())
        .expect("directory accepts actors");
    repository.set_failing(true);

    match service.submit(&user_actor(), basic_draft()) {
        Err(ProfileServiceError::Repository(_)) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
    assert_eq!(repository.len(), 0);
    assert!(sink.sent().is_empty());

    // The same draft goes through once storage is back.
    repository.set_failing(false);
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds after recovery");
    assert_eq!(sink.sent().len(), 1);
}

#[test]
fn notification_sink_failure_never_fails_the_save() {
    let (service, repository, sink, directory) = build_service();
    directory
        .record(&security_actor())
        .expect("directory accepts actors");
    sink.set_failing(true);

    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("save succeeds despite sink failure");

    assert_eq!(repository.len(), 1);
    assert!(sink.sent().is_empty());

    // The record is fully usable afterwards.
    sink.set_failing(false);
    service
        .edit(&user_actor(), &receipt.profile_id, basic_draft())
        .expect("edit succeeds");
}

#[test]
fn security_edits_notify_the_record_owner() {
    let (service, _, sink, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    service
        .edit(&security_actor(), &receipt.profile_id, security_draft())
        .expect("security edit succeeds");

    let to_owner: Vec<_> = sink
        .sent()
        .into_iter()
        .filter(|n| n.recipient == user_actor().id)
        .collect();
    assert_eq!(to_owner.len(), 1);
    assert_eq!(to_owner[0].kind, NotificationKind::SecurityUpdate);
    assert_eq!(
        to_owner[0].title,
        "Security Information Updated by Karim Hossain"
    );
    assert_eq!(to_owner[0].profile, Some(receipt.profile_id));
}

#[test]
fn super_admin_saves_emit_no_notifications() {
    let (service, _, sink, directory) = build_service();
    directory
        .record(&security_actor())
        .expect("directory accepts actors");

    service
        .submit(&super_actor(), basic_draft())
        .expect("super admin create succeeds");

    assert!(sink.sent().is_empty());
}

#[test]
fn mark_read_is_owner_scoped_and_idempotent() {
    let (service, _, sink, directory) = build_service();
    directory
        .record(&security_actor())
        .expect("directory accepts actors");
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    let notification = sink.sent().pop().expect("one notification sent");

    // Another actor cannot mark it.
    assert!(matches!(
        service.mark_notification_read(&user_actor(), &notification.id),
        Err(ProfileServiceError::NotFound)
    ));

    service
        .mark_notification_read(&security_actor(), &notification.id)
        .expect("owner marks read");
    service
        .mark_notification_read(&security_actor(), &notification.id)
        .expect("second mark is a no-op");

    let feed = service
        .notifications(&security_actor())
        .expect("feed loads");
    assert_eq!(feed.unread_count, 0);
    assert_eq!(feed.notifications.len(), 1);
    assert!(feed.notifications[0].is_read);

    assert!(matches!(
        service.mark_notification_read(
            &security_actor(),
            &NotificationId("ntf-does-not-exist".to_string())
        ),
        Err(ProfileServiceError::NotFound)
    ));
}

#[test]
fn deletion_is_restricted_to_the_super_admin() {
    let (service, repository, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    match service.delete(&security_actor(), &receipt.profile_id) {
        Err(ProfileServiceError::Forbidden(message)) => {
            assert_eq!(message, "Only a super admin can delete profiles.");
        }
        other => panic!("expected forbidden, got {other:?}"),
    }

    service
        .delete(&super_actor(), &receipt.profile_id)
        .expect("super admin deletes");
    assert_eq!(repository.len(), 0);

    assert!(matches!(
        service.delete(&super_actor(), &receipt.profile_id),
        Err(ProfileServiceError::NotFound)
    ));
    assert!(matches!(
        service.delete(
            &super_actor(),
            &ProfileId("emp-does-not-exist".to_string())
        ),
        Err(ProfileServiceError::NotFound)
    ));
}

#[test]
fn dashboards_are_shaped_by_role() {
    let (service, _, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");
    service
        .submit(&security_actor(), security_draft())
        .expect("security create succeeds");

    let own = service.dashboard(&user_actor()).expect("user dashboard");
    let profile = own.profile.expect("user sees their own profile");
    assert_eq!(profile.profile.id, receipt.profile_id);
    assert!(own.profiles.is_empty());

    let none = service
        .dashboard(&second_user_actor())
        .expect("dashboard without a profile");
    assert!(none.profile.is_none());

    let listing = service.dashboard(&super_actor()).expect("admin dashboard");
    assert!(listing.profile.is_none());
    assert_eq!(listing.profiles.len(), 2);
}

#[test]
fn detail_view_requires_an_admin_role() {
    let (service, _, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    assert!(matches!(
        service.detail(&user_actor(), &receipt.profile_id),
        Err(ProfileServiceError::Forbidden(_))
    ));

    let detail = service
        .detail(&security_actor(), &receipt.profile_id)
        .expect("admin sees detail");
    assert_eq!(detail.profile.name, "Rahim Uddin");
}

#[test]
fn rejected_dependent_batches_keep_the_previous_set() {
    let (service, repository, _, _) = build_service();

    let dob = NaiveDate::from_ymd_opt(2015, 6, 1).expect("valid date");
    let mut draft = basic_draft();
    draft.dependents = Some(vec![DependentDraft {
        name: "Ayesha".to_string(),
        relationship: Some(Relationship::Daughter),
        date_of_birth: Some(dob),
        residential_address: None,
    }]);
    let receipt = service
        .submit(&user_actor(), draft)
        .expect("submission succeeds");

    // A partially filled row fails the whole batch; the stored set survives.
    let mut bad = basic_draft();
    bad.dependents = Some(vec![DependentDraft {
        name: "Zahid".to_string(),
        relationship: None,
        date_of_birth: None,
        residential_address: None,
    }]);
    service
        .edit(&user_actor(), &receipt.profile_id, bad)
        .expect("parent save still succeeds");

    let stored = repository
        .fetch(&receipt.profile_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.dependents.len(), 1);
    assert_eq!(stored.dependents[0].name, "Ayesha");
}

#[test]
fn reporting_is_restricted_to_the_super_admin() {
    let (service, _, _, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");

    assert!(matches!(
        service.report(&security_actor(), &ReportQuery::default()),
        Err(ProfileServiceError::Forbidden(_))
    ));

    let report = service
        .report(&super_actor(), &ReportQuery::default())
        .expect("super admin reports");
    assert_eq!(report.total_profiles, 1);
    assert_eq!(report.matched_profiles, 1);
    assert_eq!(report.rows[0].name, "Rahim Uddin");
    assert_eq!(report.options.agencies, vec!["undp".to_string()]);
}

#[test]
fn export_uses_the_same_selection_as_the_preview() {
    let (service, _, _, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");
    let mut other = basic_draft();
    other.name = Some("Farida Yasmin".to_string());
    other.employee_id = Some("EMP-0043".to_string());
    other.duty_station = Some(crate::registry::profiles::domain::DutyStation::Sylhet);
    service
        .submit(&second_user_actor(), other)
        .expect("second submission succeeds");

    let query = ReportQuery {
        duty_station: Some("sylhet".to_string()),
        ..ReportQuery::default()
    };
    let report = service
        .report(&super_actor(), &query)
        .expect("preview builds");
    assert_eq!(report.matched_profiles, 1);

    let generated_at = chrono::Utc::now();
    let bytes = service
        .export_report(&super_actor(), &query, generated_at)
        .expect("export renders");
    assert!(bytes.starts_with(b"%PDF-1.4"));
    let content = String::from_utf8_lossy(&bytes);
    assert!(content.contains("(Farida Yasmin) Tj"));
    assert!(!content.contains("(Rahim Uddin) Tj"));
    assert!(content.contains("Duty Station: sylhet"));

    let again = service
        .export_report(&super_actor(), &query, generated_at)
        .expect("export renders again");
    assert_eq!(bytes, again);
}
