//! Employee profile intake under the field partition policy.
//!
//! One shared record type has two owners: employees maintain the basic half
//! of their own profile, the security office maintains the security half of
//! any profile, and the super admin sees everything. The policy module is
//! the single source of truth for that split; intake and the router both
//! consult it rather than mutating a shared schema.

pub mod domain;
pub mod fields;
pub(crate) mod intake;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Actor, ActorId, Agency, BloodGroup, CompletionStatus, ContactType, Dependent, DependentDraft,
    DutyStation, EmployeeProfile, Gender, Notification, NotificationId, NotificationKind,
    ProfileDraft, ProfileId, Relationship, Role,
};
pub use fields::{FieldId, ALL_FIELDS, BASIC_FIELDS, SECURITY_FIELDS};
pub use intake::{DependentBatchError, ValidationErrors};
pub use policy::{effective_fields, may_edit, scope_errors};
pub use repository::{
    ActorDirectory, DirectoryError, NotificationError, NotificationSink, ProfileRecord,
    ProfileRepository, RepositoryError,
};
pub use router::registry_router;
pub use service::{ProfileService, ProfileServiceError};
pub use views::{
    DashboardView, FieldListingView, NotificationFeedView, NotificationView, ProfileDetailView,
    ProfileSummaryView, SubmissionReceipt, UnreadCountView,
};
