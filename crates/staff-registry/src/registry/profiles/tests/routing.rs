use super::common::*;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::registry::profiles::domain::Actor;

fn authed(builder: axum::http::request::Builder, actor: &Actor) -> axum::http::request::Builder {
    builder
        .header("x-actor-id", actor.id.0.clone())
        .header("x-actor-name", actor.name.clone())
        .header("x-actor-role", actor.role.code())
}

fn json_request(
    method: &str,
    uri: &str,
    actor: &Actor,
    payload: &Value,
) -> Request<Body> {
    authed(Request::builder().method(method).uri(uri), actor)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("payload")))
        .expect("request builds")
}

fn get_request(uri: &str, actor: &Actor) -> Request<Body> {
    authed(Request::builder().method("GET").uri(uri), actor)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn requests_without_identity_headers_are_unauthorized() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/profiles")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("missing or invalid actor identity"))
    );
}

#[tokio::test]
async fn unknown_roles_are_unauthorized() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/profiles")
                .header("x-actor-id", "rahim.uddin")
                .header("x-actor-role", "janitor")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submit_route_creates_a_profile() {
    let (service, repository, _, _) = build_service();
    let router = registry_router_with_service(service);

    let payload = serde_json::to_value(basic_draft()).expect("draft serializes");
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/profiles",
            &user_actor(),
            &payload,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("profile_id").is_some());
    assert_eq!(
        payload.get("completion_status"),
        Some(&json!("partially_completed"))
    );
    assert_eq!(
        payload.get("message"),
        Some(&json!("Profile submitted successfully!"))
    );
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn empty_user_drafts_fail_with_field_keyed_errors() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/profiles",
            &user_actor(),
            &json!({}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let errors = payload.get("errors").expect("errors object");
    assert!(errors.get("name").is_some());
    assert!(errors.get("official_email").is_some());
    assert!(errors.get("radio_call_sign").is_none());
}

#[tokio::test]
async fn second_submission_conflicts() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let payload = serde_json::to_value(basic_draft()).expect("draft serializes");
    let first = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/profiles",
            &user_actor(),
            &payload,
        ))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(json_request(
            "POST",
            "/api/v1/profiles",
            &user_actor(),
            &payload,
        ))
        .await
        .expect("route executes");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn fields_route_returns_the_role_surface() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/profiles/fields", &security_actor()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("role"), Some(&json!("security_admin")));
    let fields = payload
        .get("fields")
        .and_then(Value::as_array)
        .expect("fields array");
    assert_eq!(fields.len(), 13);
    assert!(fields.contains(&json!("radio_call_sign")));
    assert!(!fields.contains(&json!("name")));
}

#[tokio::test]
async fn report_route_is_forbidden_below_super_admin() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/reports/profiles", &security_actor()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Only a super admin can generate reports."))
    );
}

#[tokio::test]
async fn report_route_parses_query_filters() {
    let (service, _, _, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(get_request(
            "/api/v1/reports/profiles?agency=undp&zone=dhaka%20north",
            &super_actor(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("matched_profiles"), Some(&json!(1)));
    assert_eq!(
        payload.get("filter_description"),
        Some(&json!("Agency: undp, Zone: Dhaka North"))
    );
}

#[tokio::test]
async fn export_route_returns_a_pdf_attachment() {
    let (service, _, _, _) = build_service();
    service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(get_request(
            "/api/v1/reports/profiles/export",
            &super_actor(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"employee_profiles_report.pdf\"")
    );

    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    assert!(body.starts_with(b"%PDF-1.4"));
}

#[tokio::test]
async fn marking_an_unknown_notification_is_not_found() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(
            authed(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/notifications/ntf-000999/read"),
                &security_actor(),
            )
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_route_is_not_found_for_unknown_ids() {
    let (service, _, _, _) = build_service();
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(get_request(
            "/api/v1/profiles/emp-000999",
            &super_actor(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_route_confirms_and_removes() {
    let (service, repository, _, _) = build_service();
    let receipt = service
        .submit(&user_actor(), basic_draft())
        .expect("submission succeeds");
    let router = registry_router_with_service(service);

    let response = router
        .oneshot(
            authed(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/profiles/{}", receipt.profile_id.0)),
                &super_actor(),
            )
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message"),
        Some(&json!("Profile deleted successfully!"))
    );
    assert_eq!(repository.len(), 0);
}
