use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::Value;

use crate::registry::profiles::domain::{
    Actor, ActorId, Notification, NotificationId, ProfileDraft, ProfileId, Role,
};
use crate::registry::profiles::repository::{
    ActorDirectory, DirectoryError, NotificationError, NotificationSink, ProfileRecord,
    ProfileRepository, RepositoryError,
};
use crate::registry::profiles::{registry_router, ProfileService};

pub(super) fn user_actor() -> Actor {
    Actor {
        id: ActorId("rahim.uddin".to_string()),
        name: "Rahim Uddin".to_string(),
        role: Role::User,
    }
}

pub(super) fn second_user_actor() -> Actor {
    Actor {
        id: ActorId("farida.yasmin".to_string()),
        name: "Farida Yasmin".to_string(),
        role: Role::User,
    }
}

pub(super) fn security_actor() -> Actor {
    Actor {
        id: ActorId("karim.hossain".to_string()),
        name: "Karim Hossain".to_string(),
        role: Role::SecurityAdmin,
    }
}

pub(super) fn super_actor() -> Actor {
    Actor {
        id: ActorId("nasrin.akter".to_string()),
        name: "Nasrin Akter".to_string(),
        role: Role::SuperAdmin,
    }
}

/// A draft that fills the whole basic half, enough to reach
/// `partially_completed` on its own.
pub(super) fn basic_draft() -> ProfileDraft {
    ProfileDraft {
        r_ser: Some(7),
        sl: Some(12),
        name: Some("Rahim Uddin".to_string()),
        post_title: Some("Programme Associate".to_string()),
        employee_id: Some("EMP-0042".to_string()),
        residential_address: Some("House 12, Road 5, Banani".to_string()),
        zone: Some("Dhaka North".to_string()),
        cell_phone: Some("+8801700000000".to_string()),
        emergency_contact: Some("+8801800000000".to_string()),
        emergency_relation: Some("Brother".to_string()),
        official_email: Some("rahim.uddin@undp.org".to_string()),
        ..ProfileDraft::default()
    }
}

/// A draft that fills the whole security half.
pub(super) fn security_draft() -> ProfileDraft {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    ProfileDraft {
        radio_call_sign: Some("ROMEO-7".to_string()),
        radio_serial: Some("RS-5521".to_string()),
        zone_appointment: Some("Zone 4 / Gulshan".to_string()),
        office_address: Some("IDB Bhaban, Agargaon".to_string()),
        unit_warden: Some("Floor 6 warden".to_string()),
        unid_number: Some("UN-99812".to_string()),
        rfid_number: Some("RF-8875".to_string()),
        unid_issued: Some(date(2024, 1, 15)),
        id_expiry: Some(date(2025, 1, 15)),
        id_deposited: Some(date(2024, 1, 20)),
        bsafe_completed: Some(date(2023, 11, 2)),
        sat_completed: Some(date(2023, 12, 9)),
        sbfat_completed: Some(date(2024, 2, 1)),
        ..ProfileDraft::default()
    }
}

pub(super) type TestService = ProfileService<MemoryRepository, MemorySink, MemoryDirectory>;

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryRepository>,
    Arc<MemorySink>,
    Arc<MemoryDirectory>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let sink = Arc::new(MemorySink::default());
    let directory = Arc::new(MemoryDirectory::default());
    let service = ProfileService::new(repository.clone(), sink.clone(), directory.clone());
    (service, repository, sink, directory)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ProfileId, ProfileRecord>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }
}

fn employee_id_taken(
    records: &HashMap<ProfileId, ProfileRecord>,
    record: &ProfileRecord,
) -> bool {
    let employee_id = &record.profile.employee_id;
    !employee_id.is_empty()
        && records.values().any(|existing| {
            existing.profile.id != record.profile.id
                && existing.profile.employee_id == *employee_id
        })
}

impl ProfileRepository for MemoryRepository {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        self.check_available()?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if employee_id_taken(&guard, &record) {
            return Err(RepositoryError::DuplicateEmployeeId);
        }
        guard.insert(record.profile.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if employee_id_taken(&guard, &record) {
            return Err(RepositoryError::DuplicateEmployeeId);
        }
        guard.insert(record.profile.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_creator(&self, actor: &ActorId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.profile.created_by == *actor)
            .cloned())
    }

    fn list(&self) -> Result<Vec<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &ProfileId) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    notifications: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl MemorySink {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("sink mutex poisoned")
            .clone()
    }

    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl NotificationSink for MemorySink {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Unavailable("sink offline".to_string()));
        }
        self.notifications
            .lock()
            .expect("sink mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn for_recipient(&self, recipient: &ActorId) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .notifications
            .lock()
            .expect("sink mutex poisoned")
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
        let mut guard = self.notifications.lock().expect("sink mutex poisoned");
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

#[derive(Default)]
pub(super) struct MemoryDirectory {
    actors: Mutex<HashMap<ActorId, Actor>>,
}

impl ActorDirectory for MemoryDirectory {
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

pub(super) fn registry_router_with_service(service: TestService) -> axum::Router {
    registry_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
