mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Datelike, Duration, Utc, Weekday};
use common::{AuthHeaders, TestApp, ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn next_monday() -> String {
    let mut next = Utc::now() + Duration::days(1);
    while next.weekday() != Weekday::Mon {
        next += Duration::days(1);
    }
    next.format("%Y-%m-%d").to_string()
}

fn previous_monday() -> String {
    let mut prev = Utc::now() - Duration::days(8);
    while prev.weekday() != Weekday::Mon {
        prev -= Duration::days(1);
    }
    prev.format("%Y-%m-%d").to_string()
}

async fn setup_vet_with_schedule(app: &TestApp, suffix: &str) -> (AuthHeaders, String) {
    let admin = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let payload = json!({
        "username": format!("vet-{}", suffix),
        "password": "vet-password-1",
        "full_name": "Dr. Marta Vidal",
        "specialty": "Surgery",
        "email": format!("vet-{}@clinic.test", suffix)
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vets")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let vet_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let entries = json!({ "entries": [{
        "day_of_week": "MONDAY",
        "active": true,
        "work_start": "09:00",
        "work_end": "12:00",
        "break_start": "10:00",
        "break_end": "10:30"
    }]});
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/vets/{}/schedule", vet_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(entries.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    (admin, vet_id)
}

async fn register_owner_with_pet(app: &TestApp, username: &str) -> (AuthHeaders, String) {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": username,
                "password": "owner-password-1",
                "full_name": "Ana Torres"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let owner = app.login(username, "owner-password-1").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/pets")
            .header(header::COOKIE, format!("access_token={}", owner.access_token))
            .header("X-CSRF-Token", &owner.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Nube",
                "species": "Cat",
                "breed": "European shorthair"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let pet_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    (owner, pet_id)
}

async fn book(
    app: &TestApp,
    auth: &AuthHeaders,
    vet_id: &str,
    pet_id: &str,
    date: &str,
    time: &str,
) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/appointments")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vet_id": vet_id,
                "pet_id": pet_id,
                "date": date,
                "time": time,
                "reason": "Vaccination"
            }).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn owner_books_a_free_slot() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "book").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-book").await;

    let res = book(&app, &owner, &vet_id, &pet_id, &next_monday(), "09:00").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["status"], json!("PENDING"));
    assert_eq!(body["status_label"], json!("Pending"));
    assert!(body["start_time"].as_str().unwrap().contains("T09:00:00"));
    assert!(body["end_time"].as_str().unwrap().contains("T09:30:00"));
}

#[tokio::test]
async fn booked_slot_is_flagged_occupied_and_double_booking_rejected() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "double").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-double").await;
    let date = next_monday();

    let res = book(&app, &owner, &vet_id, &pet_id, &date, "10:30").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Slot output keeps the slot, flagged occupied.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/vets/{}/slots?date={}", vet_id, date))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 5);
    let occupied: Vec<_> = slots.iter()
        .filter(|s| s["isOccupied"] == json!(true))
        .map(|s| s["start"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(occupied.len(), 1);
    assert!(occupied[0].contains("T10:30:00"));

    // Rebooking the same slot fails with the "already booked" cause.
    let (other_owner, other_pet) = register_owner_with_pet(&app, "owner-double-2").await;
    let res = book(&app, &other_owner, &vet_id, &other_pet, &date, "10:30").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("already been booked"));
}

#[tokio::test]
async fn past_slot_is_rejected_with_a_distinct_message() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "past").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-past").await;

    let res = book(&app, &owner, &vet_id, &pet_id, &previous_monday(), "09:00").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("in the past"));
}

#[tokio::test]
async fn off_grid_time_is_not_a_bookable_slot() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "grid").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-grid").await;

    let res = book(&app, &owner, &vet_id, &pet_id, &next_monday(), "09:15").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The break window itself is never bookable either.
    let res = book(&app, &owner, &vet_id, &pet_id, &next_monday(), "10:00").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancelling_frees_the_slot() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "cancel").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-cancel").await;
    let date = next_monday();

    let res = book(&app, &owner, &vet_id, &pet_id, &date, "11:00").await;
    let appointment_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/appointments/{}/cancel", appointment_id))
            .header(header::COOKIE, format!("access_token={}", owner.access_token))
            .header("X-CSRF-Token", &owner.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], json!("CANCELLED"));

    let res = book(&app, &owner, &vet_id, &pet_id, &date, "11:00").await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn only_the_assigned_vet_or_admin_changes_the_status() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "status").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-status").await;

    let res = book(&app, &owner, &vet_id, &pet_id, &next_monday(), "09:30").await;
    let appointment_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // The owner cannot move the clinical status.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/appointments/{}/status", appointment_id))
            .header(header::COOKIE, format!("access_token={}", owner.access_token))
            .header("X-CSRF-Token", &owner.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "CONFIRMED" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The assigned vet can.
    let vet_auth = app.login("vet-status", "vet-password-1").await;
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/appointments/{}/status", appointment_id))
            .header(header::COOKIE, format!("access_token={}", vet_auth.access_token))
            .header("X-CSRF-Token", &vet_auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "CONFIRMED" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], json!("CONFIRMED"));
    assert_eq!(body["status_label"], json!("Confirmed"));
}

#[tokio::test]
async fn appointment_lists_are_scoped_by_role() {
    let app = TestApp::new().await;
    let (admin, vet_id) = setup_vet_with_schedule(&app, "lists").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-lists").await;
    let (stranger, _) = register_owner_with_pet(&app, "owner-lists-2").await;

    book(&app, &owner, &vet_id, &pet_id, &next_monday(), "09:00").await;

    let list_as = |auth: &AuthHeaders| {
        let token = auth.access_token.clone();
        let router = app.router.clone();
        async move {
            let res = router.oneshot(
                Request::builder().method("GET").uri("/api/v1/appointments")
                    .header(header::COOKIE, format!("access_token={}", token))
                    .body(Body::empty()).unwrap()
            ).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            parse_body(res).await.as_array().unwrap().len()
        }
    };

    assert_eq!(list_as(&owner).await, 1);
    assert_eq!(list_as(&stranger).await, 0);
    assert_eq!(list_as(&admin).await, 1);

    let vet_auth = app.login("vet-lists", "vet-password-1").await;
    assert_eq!(list_as(&vet_auth).await, 1);
}

#[tokio::test]
async fn ics_export_contains_the_appointment() {
    let app = TestApp::new().await;
    let (_, vet_id) = setup_vet_with_schedule(&app, "ics").await;
    let (owner, pet_id) = register_owner_with_pet(&app, "owner-ics").await;

    let res = book(&app, &owner, &vet_id, &pet_id, &next_monday(), "11:30").await;
    let appointment_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/appointments/{}/ics", appointment_id))
            .header(header::COOKIE, format!("access_token={}", owner.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[header::CONTENT_TYPE].to_str().unwrap().contains("text/calendar"));

    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let ics = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains("Nube"));
}
