use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{Actor, ActorId, NotificationId, ProfileId, Role};
use super::repository::{ActorDirectory, NotificationSink, ProfileRepository};
use super::service::{ProfileService, ProfileServiceError};
use crate::registry::report::filter::ReportQuery;

/// Router builder exposing the registry HTTP surface. Identity arrives as
/// trusted `x-actor-*` headers from the session boundary in front of us.
pub fn registry_router<R, N, D>(service: Arc<ProfileService<R, N, D>>) -> Router
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/profiles",
            post(submit_handler::<R, N, D>).get(dashboard_handler::<R, N, D>),
        )
        .route("/api/v1/profiles/fields", get(fields_handler::<R, N, D>))
        .route(
            "/api/v1/profiles/:profile_id",
            get(detail_handler::<R, N, D>)
                .put(edit_handler::<R, N, D>)
                .delete(delete_handler::<R, N, D>),
        )
        .route(
            "/api/v1/notifications",
            get(notifications_handler::<R, N, D>),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(unread_count_handler::<R, N, D>),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(mark_read_handler::<R, N, D>),
        )
        .route("/api/v1/reports/profiles", get(report_handler::<R, N, D>))
        .route(
            "/api/v1/reports/profiles/export",
            get(export_handler::<R, N, D>),
        )
        .with_state(service)
}

/// The authenticated actor for this request, read from trusted headers.
pub struct RequestActor(pub Actor);

pub(crate) fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, Response> {
    let id = headers
        .get("x-actor-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let role = headers
        .get("x-actor-role")
        .and_then(|value| value.to_str().ok())
        .and_then(Role::parse);

    let (Some(id), Some(role)) = (id, role) else {
        let payload = json!({ "error": "missing or invalid actor identity" });
        return Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response());
    };

    let name = headers
        .get("x-actor-name")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(id)
        .to_string();

    Ok(Actor {
        id: ActorId(id.to_string()),
        name,
        role,
    })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(Self)
    }
}

fn error_response(error: ProfileServiceError) -> Response {
    match error {
        ProfileServiceError::Validation(errors) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ProfileServiceError::Forbidden(message) => {
            let payload = json!({ "error": message });
            (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
        }
        ProfileServiceError::DuplicateProfile(message) => {
            let payload = json!({ "error": message });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        ProfileServiceError::NotFound => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ProfileServiceError::Repository(_) | ProfileServiceError::Notifications(_) => {
            let payload = json!({ "error": "service temporarily unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    axum::Json(draft): axum::Json<super::domain::ProfileDraft>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.submit(&actor, draft) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Path(profile_id): Path<String>,
    axum::Json(draft): axum::Json<super::domain::ProfileDraft>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.edit(&actor, &ProfileId(profile_id), draft) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dashboard_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.dashboard(&actor) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.detail(&actor, &ProfileId(profile_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.delete(&actor, &ProfileId(profile_id)) {
        Ok(()) => {
            let payload = json!({ "message": "Profile deleted successfully!" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fields_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    let view = service.effective_fields(&actor);
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn notifications_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.notifications(&actor) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unread_count_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.unread_count(&actor) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mark_read_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Path(notification_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.mark_notification_read(&actor, &NotificationId(notification_id)) {
        Ok(()) => {
            let payload = json!({ "success": true });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.report(&actor, &query) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, N, D>(
    State(service): State<Arc<ProfileService<R, N, D>>>,
    RequestActor(actor): RequestActor,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationSink + 'static,
    D: ActorDirectory + 'static,
{
    match service.export_report(&actor, &query, Utc::now()) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"employee_profiles_report.pdf\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
