use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use staff_registry::registry::profiles::{
    Actor, ActorDirectory, ActorId, DirectoryError, Notification, NotificationError,
    NotificationId, NotificationSink, ProfileId, ProfileRecord, ProfileRepository,
    RepositoryError, Role,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local profile store. Employee ids stay unique across records;
/// blank ids are exempt so partially filled security-created records can
/// coexist.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    records: Arc<Mutex<HashMap<ProfileId, ProfileRecord>>>,
}

fn employee_id_taken(records: &HashMap<ProfileId, ProfileRecord>, record: &ProfileRecord) -> bool {
    let employee_id = &record.profile.employee_id;
    !employee_id.is_empty()
        && records.values().any(|existing| {
            existing.profile.id != record.profile.id
                && existing.profile.employee_id == *employee_id
        })
}

impl ProfileRepository for InMemoryProfileStore {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("profile store mutex poisoned");
        if employee_id_taken(&guard, &record) {
            return Err(RepositoryError::DuplicateEmployeeId);
        }
        guard.insert(record.profile.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("profile store mutex poisoned");
        if !guard.contains_key(&record.profile.id) {
            return Err(RepositoryError::NotFound);
        }
        if employee_id_taken(&guard, &record) {
            return Err(RepositoryError::DuplicateEmployeeId);
        }
        guard.insert(record.profile.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("profile store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_creator(&self, actor: &ActorId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("profile store mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.profile.created_by == *actor)
            .cloned())
    }

    fn list(&self) -> Result<Vec<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("profile store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &ProfileId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("profile store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

/// Process-local notification center backing the in-app feed.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationCenter {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSink for InMemoryNotificationCenter {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.notifications
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .notifications
            .lock()
            .expect("notification mutex poisoned")
            .iter()
            .filter(|n| n.recipient == *recipient)
            .cloned()
            .collect())
    }

    fn mark_read(
        &self,
        id: &NotificationId,
        recipient: &ActorId,
    ) -> Result<bool, NotificationError> {
        let mut guard = self
            .notifications
            .lock()
            .expect("notification mutex poisoned");
        match guard
            .iter_mut()
            .find(|n| n.id == *id && n.recipient == *recipient)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Directory of actors seen by the service, queried during fan-out. The
/// newest role presented for an id wins.
#[derive(Default, Clone)]
pub(crate) struct InMemoryActorDirectory {
    actors: Arc<Mutex<HashMap<ActorId, Actor>>>,
}

impl ActorDirectory for InMemoryActorDirectory {
    fn record(&self, actor: &Actor) -> Result<(), DirectoryError> {
        self.actors
            .lock()
            .expect("directory mutex poisoned")
            .insert(actor.id.clone(), actor.clone());
        Ok(())
    }

    fn with_role(&self, role: Role) -> Result<Vec<Actor>, DirectoryError> {
        let mut actors: Vec<Actor> = self
            .actors
            .lock()
            .expect("directory mutex poisoned")
            .values()
            .filter(|actor| actor.role == role)
            .cloned()
            .collect();
        actors.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(actors)
    }
}
