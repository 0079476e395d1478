use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{
    Actor, EmployeeProfile, Notification, NotificationId, NotificationKind, ProfileDraft,
    ProfileId, Role,
};
use super::fields::FieldId;
use super::intake::{self, ValidationErrors};
use super::policy;
use super::repository::{
    ActorDirectory, NotificationError, NotificationSink, ProfileRecord, ProfileRepository,
    RepositoryError,
};
use super::views::{
    DashboardView, FieldListingView, NotificationFeedView, NotificationView, ProfileDetailView,
    ProfileSummaryView, SubmissionReceipt, UnreadCountView,
};
use crate::registry::report::export;
use crate::registry::report::filter::{ReportFilter, ReportQuery};
use crate::registry::report::summary;
use crate::registry::report::views::ReportView;

/// Orchestrates the per-submission pipeline: authorize, partition, validate,
/// persist atomically, then fan out best-effort notifications.
pub struct ProfileService<R, N, D> {
    repository: Arc<R>,
    notifications: Arc<N>,
    directory: Arc<D>,
}

static PROFILE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_profile_id() -> ProfileId {
    let id = PROFILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProfileId(format!("emp-{id:06}"))
}

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveAction {
    Created,
    Edited,
}

impl<R, N, D> ProfileService<R, N, D>
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, directory: Arc<D>) -> Self {
        Self {
            repository,
            notifications,
            directory,
        }
    }

    /// Create a profile for the submitting actor. A `user` may hold at most
    /// one; the duplicate check runs before anything is written.
    pub fn submit(
        &self,
        actor: &Actor,
        draft: ProfileDraft,
    ) -> Result<SubmissionReceipt, ProfileServiceError> {
        self.remember(actor);

        if actor.role == Role::User && self.repository.find_by_creator(&actor.id)?.is_some() {
            return Err(ProfileServiceError::DuplicateProfile(
                "You already have a profile. You can only edit your existing profile.".to_string(),
            ));
        }

        let now = Utc::now();
        let draft = policy::scrub_draft(draft, actor.role);
        let base = EmployeeProfile::with_defaults(
            next_profile_id(),
            actor.id.clone(),
            actor.role,
            now,
        );
        let profile = intake::merge(&base, &draft);

        if let Err(errors) = intake::validate(&profile) {
            let scoped = policy::scope_errors(errors, actor.role);
            if !scoped.is_empty() {
                return Err(ProfileServiceError::Validation(scoped));
            }
        }

        let dependents = self.screen_dependent_batch(&draft, Vec::new());
        let record = ProfileRecord {
            profile,
            dependents,
        };

        let stored = match self.repository.insert(record) {
            Ok(stored) => stored,
            Err(RepositoryError::DuplicateEmployeeId) => {
                return Err(duplicate_employee_id_error())
            }
            Err(other) => return Err(other.into()),
        };

        info!(profile = %stored.profile.id.0, actor = %actor.id.0, "profile created");
        self.notify_after_save(actor, &stored.profile, SaveAction::Created);

        Ok(SubmissionReceipt {
            profile_id: stored.profile.id.clone(),
            completion_status: stored.profile.completion_status(),
            message: match actor.role {
                Role::User => "Profile submitted successfully!".to_string(),
                Role::SecurityAdmin => "Security information submitted successfully!".to_string(),
                Role::SuperAdmin => "Profile created successfully!".to_string(),
            },
        })
    }

    /// Edit an existing profile. The draft is scrubbed to the actor's
    /// partition, so out-of-scope fields keep their stored values.
    pub fn edit(
        &self,
        actor: &Actor,
        id: &ProfileId,
        draft: ProfileDraft,
    ) -> Result<SubmissionReceipt, ProfileServiceError> {
        self.remember(actor);

        let stored = self
            .repository
            .fetch(id)?
            .ok_or(ProfileServiceError::NotFound)?;

        if actor.role == Role::User && stored.profile.created_by != actor.id {
            return Err(ProfileServiceError::Forbidden(
                "You can only edit your own profile.".to_string(),
            ));
        }

        let draft = policy::scrub_draft(draft, actor.role);
        let mut profile = intake::merge(&stored.profile, &draft);
        profile.updated_at = Utc::now();

        if let Err(errors) = intake::validate(&profile) {
            let scoped = policy::scope_errors(errors, actor.role);
            if !scoped.is_empty() {
                return Err(ProfileServiceError::Validation(scoped));
            }
        }

        let dependents = self.screen_dependent_batch(&draft, stored.dependents);
        let record = ProfileRecord {
            profile,
            dependents,
        };

        match self.repository.update(record.clone()) {
            Ok(()) => {}
            Err(RepositoryError::DuplicateEmployeeId) => {
                return Err(duplicate_employee_id_error())
            }
            Err(other) => return Err(other.into()),
        }

        info!(profile = %record.profile.id.0, actor = %actor.id.0, "profile updated");
        self.notify_after_save(actor, &record.profile, SaveAction::Edited);

        Ok(SubmissionReceipt {
            profile_id: record.profile.id.clone(),
            completion_status: record.profile.completion_status(),
            message: match actor.role {
                Role::SecurityAdmin => "Security information updated successfully!".to_string(),
                _ => "Profile updated successfully!".to_string(),
            },
        })
    }

    /// Role-shaped dashboard. A missing own profile is a valid state for a
    /// `user`, not an error.
    pub fn dashboard(&self, actor: &Actor) -> Result<DashboardView, ProfileServiceError> {
        self.remember(actor);

        if actor.role == Role::User {
            let own = self.repository.find_by_creator(&actor.id)?;
            return Ok(DashboardView {
                role: actor.role,
                profile: own.as_ref().map(ProfileDetailView::from_record),
                profiles: Vec::new(),
            });
        }

        let mut records = self.repository.list()?;
        records.sort_by(|a, b| {
            b.profile
                .created_at
                .cmp(&a.profile.created_at)
                .then_with(|| b.profile.id.cmp(&a.profile.id))
        });

        Ok(DashboardView {
            role: actor.role,
            profile: None,
            profiles: records
                .iter()
                .map(|record| ProfileSummaryView::from_profile(&record.profile))
                .collect(),
        })
    }

    /// Full record view, admins only.
    pub fn detail(
        &self,
        actor: &Actor,
        id: &ProfileId,
    ) -> Result<ProfileDetailView, ProfileServiceError> {
        if !actor.role.is_admin() {
            return Err(ProfileServiceError::Forbidden(
                "You do not have permission to view profile details.".to_string(),
            ));
        }

        let record = self
            .repository
            .fetch(id)?
            .ok_or(ProfileServiceError::NotFound)?;
        Ok(ProfileDetailView::from_record(&record))
    }

    /// Whole-record deletion, restricted to the top-level admin. Dependents
    /// go with the record.
    pub fn delete(&self, actor: &Actor, id: &ProfileId) -> Result<(), ProfileServiceError> {
        if actor.role != Role::SuperAdmin {
            return Err(ProfileServiceError::Forbidden(
                "Only a super admin can delete profiles.".to_string(),
            ));
        }

        if self.repository.fetch(id)?.is_none() {
            return Err(ProfileServiceError::NotFound);
        }

        self.repository.delete(id)?;
        info!(profile = %id.0, actor = %actor.id.0, "profile deleted");
        Ok(())
    }

    /// The editable surface for the calling actor's role.
    pub fn effective_fields(&self, actor: &Actor) -> FieldListingView {
        FieldListingView {
            role: actor.role,
            fields: policy::effective_fields(actor.role).to_vec(),
        }
    }

    /// Newest-first notification feed with the unread tally.
    pub fn notifications(&self, actor: &Actor) -> Result<NotificationFeedView, ProfileServiceError> {
        let mut notifications = self.notifications.for_recipient(&actor.id)?;
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let unread_count = notifications.iter().filter(|n| !n.is_read).count();
        Ok(NotificationFeedView {
            notifications: notifications
                .iter()
                .map(NotificationView::from_notification)
                .collect(),
            unread_count,
        })
    }

    /// Mark one of the caller's notifications read. Idempotent; a second
    /// call is a successful no-op.
    pub fn mark_notification_read(
        &self,
        actor: &Actor,
        id: &NotificationId,
    ) -> Result<(), ProfileServiceError> {
        if self.notifications.mark_read(id, &actor.id)? {
            Ok(())
        } else {
            Err(ProfileServiceError::NotFound)
        }
    }

    pub fn unread_count(&self, actor: &Actor) -> Result<UnreadCountView, ProfileServiceError> {
        let notifications = self.notifications.for_recipient(&actor.id)?;
        Ok(UnreadCountView {
            unread_count: notifications.iter().filter(|n| !n.is_read).count(),
        })
    }

    /// Filtered report preview with options and statistics, super admin only.
    pub fn report(
        &self,
        actor: &Actor,
        query: &ReportQuery,
    ) -> Result<ReportView, ProfileServiceError> {
        self.authorize_reporting(actor)?;

        let profiles = self.all_profiles()?;
        let filter = ReportFilter::from_query(query);
        Ok(summary::build_report(&profiles, &filter))
    }

    /// Render the filtered selection as a PDF. Uses the same selection and
    /// ordering as the preview; `generated_at` is an input so identical
    /// inputs produce identical bytes.
    pub fn export_report(
        &self,
        actor: &Actor,
        query: &ReportQuery,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ProfileServiceError> {
        self.authorize_reporting(actor)?;

        let profiles = self.all_profiles()?;
        let filter = ReportFilter::from_query(query);
        let selected = summary::select(&profiles, &filter);
        let rows = export::export_rows(&selected);
        Ok(export::render_report_pdf(
            &rows,
            &filter.describe(),
            generated_at,
        ))
    }

    fn authorize_reporting(&self, actor: &Actor) -> Result<(), ProfileServiceError> {
        if actor.role != Role::SuperAdmin {
            return Err(ProfileServiceError::Forbidden(
                "Only a super admin can generate reports.".to_string(),
            ));
        }
        Ok(())
    }

    fn all_profiles(&self) -> Result<Vec<EmployeeProfile>, ProfileServiceError> {
        Ok(self
            .repository
            .list()?
            .into_iter()
            .map(|record| record.profile)
            .collect())
    }

    /// Screen the submitted dependent batch. A failed batch is deliberately
    /// swallowed so the parent save proceeds with `fallback`.
    fn screen_dependent_batch(
        &self,
        draft: &ProfileDraft,
        fallback: Vec<super::domain::Dependent>,
    ) -> Vec<super::domain::Dependent> {
        match &draft.dependents {
            None => fallback,
            Some(rows) => match intake::screen_dependents(rows) {
                Ok(batch) => batch,
                Err(err) => {
                    warn!(error = %err, "dependent batch rejected, keeping previous set");
                    fallback
                }
            },
        }
    }

    fn remember(&self, actor: &Actor) {
        if let Err(err) = self.directory.record(actor) {
            warn!(error = %err, actor = %actor.id.0, "actor directory update failed");
        }
    }

    /// Post-commit notification fan-out. Any failure here is logged and
    /// dropped; the save already succeeded.
    fn notify_after_save(&self, actor: &Actor, profile: &EmployeeProfile, action: SaveAction) {
        let now = Utc::now();

        match actor.role {
            Role::SuperAdmin => {}
            Role::User => {
                let admins = match self.directory.with_role(Role::SecurityAdmin) {
                    Ok(admins) => admins,
                    Err(err) => {
                        warn!(error = %err, "security admin lookup failed, skipping notifications");
                        return;
                    }
                };

                let (kind, title, message) = match action {
                    SaveAction::Created => (
                        NotificationKind::ProfileSubmitted,
                        format!("New Profile Submitted by {}", actor.name),
                        format!(
                            "Profile for {} (ID: {}) has been submitted.",
                            profile.name, profile.employee_id
                        ),
                    ),
                    SaveAction::Edited => (
                        NotificationKind::ProfileEdited,
                        format!("Profile Edited by {}", actor.name),
                        format!(
                            "Profile for {} (ID: {}) has been edited.",
                            profile.name, profile.employee_id
                        ),
                    ),
                };

                for admin in admins {
                    if admin.id == actor.id {
                        continue;
                    }
                    self.publish(Notification {
                        id: next_notification_id(),
                        recipient: admin.id,
                        sender: Some(actor.id.clone()),
                        kind,
                        title: title.clone(),
                        message: message.clone(),
                        profile: Some(profile.id.clone()),
                        is_read: false,
                        created_at: now,
                    });
                }
            }
            Role::SecurityAdmin => {
                // Security writes go back to the record owner, unless the
                // owner is the writer or a super admin.
                if profile.created_by == actor.id || profile.created_by_role == Role::SuperAdmin {
                    return;
                }

                self.publish(Notification {
                    id: next_notification_id(),
                    recipient: profile.created_by.clone(),
                    sender: Some(actor.id.clone()),
                    kind: NotificationKind::SecurityUpdate,
                    title: format!("Security Information Updated by {}", actor.name),
                    message: format!(
                        "Security information for {} (ID: {}) has been updated.",
                        profile.name, profile.employee_id
                    ),
                    profile: Some(profile.id.clone()),
                    is_read: false,
                    created_at: now,
                });
            }
        }
    }

    fn publish(&self, notification: Notification) {
        if let Err(err) = self.notifications.publish(notification) {
            warn!(error = %err, "notification delivery failed");
        }
    }
}

fn duplicate_employee_id_error() -> ProfileServiceError {
    let mut errors = ValidationErrors::default();
    errors.push(
        FieldId::EmployeeId,
        "This employee ID is already registered.",
    );
    ProfileServiceError::Validation(errors)
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    DuplicateProfile(String),
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notifications(#[from] NotificationError),
}
