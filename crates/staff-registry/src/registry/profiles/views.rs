use serde::Serialize;

use chrono::{DateTime, Utc};

use super::domain::{
    ActorId, CompletionStatus, Dependent, EmployeeProfile, Notification, NotificationId,
    NotificationKind, ProfileId, Role,
};
use super::fields::FieldId;
use super::repository::ProfileRecord;

/// One row of an admin listing or report preview.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummaryView {
    pub id: ProfileId,
    pub name: String,
    pub employee_id: String,
    pub agency: &'static str,
    pub duty_station: &'static str,
    pub contact_type: &'static str,
    pub completion_status: CompletionStatus,
    pub created_at: DateTime<Utc>,
}

impl ProfileSummaryView {
    pub fn from_profile(profile: &EmployeeProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            employee_id: profile.employee_id.clone(),
            agency: profile.agency.label(),
            duty_station: profile.duty_station.label(),
            contact_type: profile.contact_type.label(),
            completion_status: profile.completion_status(),
            created_at: profile.created_at,
        }
    }
}

/// Full record view returned by detail and own-profile lookups.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetailView {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    pub dependents: Vec<Dependent>,
    pub completion_status: CompletionStatus,
}

impl ProfileDetailView {
    pub fn from_record(record: &ProfileRecord) -> Self {
        Self {
            completion_status: record.profile.completion_status(),
            profile: record.profile.clone(),
            dependents: record.dependents.clone(),
        }
    }
}

/// Role-shaped dashboard: a user sees their own (possibly absent) profile,
/// admins see the full newest-first listing.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetailView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<ProfileSummaryView>,
}

/// Acknowledgement returned after a successful create or edit.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub profile_id: ProfileId,
    pub completion_status: CompletionStatus,
    pub message: String,
}

/// The editable surface for one role, for form rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FieldListingView {
    pub role: Role,
    pub fields: Vec<FieldId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<ActorId>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationView {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id.clone(),
            sender: notification.sender.clone(),
            kind: notification.kind,
            title: notification.title.clone(),
            message: notification.message.clone(),
            profile: notification.profile.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// Newest-first notification feed with the unread tally.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationFeedView {
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountView {
    pub unread_count: usize,
}
