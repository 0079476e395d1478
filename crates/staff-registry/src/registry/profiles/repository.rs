use serde::{Deserialize, Serialize};

use super::domain::{
    Actor, ActorId, Dependent, EmployeeProfile, Notification, NotificationId, ProfileId, Role,
};

/// Storage unit: a profile and its dependent set commit together. `insert`
/// and `update` replace the whole record atomically, so a storage fault
/// never leaves the parent and its dependents out of step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile: EmployeeProfile,
    pub dependents: Vec<Dependent>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ProfileRepository: Send + Sync {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError>;
    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError>;
    fn find_by_creator(&self, actor: &ActorId) -> Result<Option<ProfileRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ProfileRecord>, RepositoryError>;
    fn delete(&self, id: &ProfileId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("employee id already registered")]
    DuplicateEmployeeId,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook. Failures are catchable and must never roll
/// back the save that triggered them.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, NotificationError>;
    /// Flip the read flag. Returns `false` when no notification with this id
    /// belongs to the recipient; marking an already-read row is a no-op.
    fn mark_read(
        &self,
        id: &NotificationId,
        recipient: &ActorId,
    ) -> Result<bool, NotificationError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification sink unavailable: {0}")]
    Unavailable(String),
}

/// Directory of actors the service has seen, queryable by role for
/// notification fan-out.
pub trait ActorDirectory: Send + Sync {
    fn record(&self, actor: &Actor) -> Result<(), DirectoryError>;
    fn with_role(&self, role: Role) -> Result<Vec<Actor>, DirectoryError>;
}

/// Actor directory lookup error.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("actor directory unavailable: {0}")]
    Unavailable(String),
}
