use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::AppointmentsService;
use shared_api::{AnonymousToken, ApiClient};
use shared_config::AppConfig;
use shared_models::{
    AppError, AppointmentCreateRequest, AppointmentStatus, AvailabilityCreateRequest,
    AvailabilityUpdateRequest,
};
use shared_utils::test_utils::MockApiResponses;

fn service_for(server: &MockServer) -> AppointmentsService {
    let config = AppConfig::with_base_url(&format!("{}/api/v1", server.uri()));
    AppointmentsService::new(ApiClient::new(&config, Arc::new(AnonymousToken)).unwrap())
}

fn utc(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
}

#[tokio::test]
async fn test_list_for_patient_accepts_naive_timestamps() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments/patients/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::appointment(1, 7, 3, "2025-10-20T13:00:00", "2025-10-20T14:00:00", "pending"),
            MockApiResponses::appointment(2, 7, 3, "2025-10-18T13:00:00Z", "2025-10-18T14:00:00Z", "canceled"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let appointments = service.list_for_patient(3).await.unwrap();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].start_at, utc("2025-10-20T13:00:00Z"));
    assert_eq!(appointments[1].status, AppointmentStatus::Canceled);
}

#[tokio::test]
async fn test_book_posts_snake_case_payload() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api/v1/appointments/"))
        .and(body_json(json!({
            "doctor_id": 7,
            "patient_id": 3,
            "start_at": "2025-10-20T13:00:00Z",
            "end_at": "2025-10-20T14:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::appointment(
            11,
            7,
            3,
            "2025-10-20T13:00:00Z",
            "2025-10-20T14:00:00Z",
            "pending",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let appointment = service
        .book(&AppointmentCreateRequest {
            doctor_id: 7,
            patient_id: 3,
            start_at: utc("2025-10-20T13:00:00Z"),
            end_at: utc("2025-10-20T14:00:00Z"),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(appointment.id, 11);
}

#[tokio::test]
async fn test_status_transitions_hit_action_endpoints() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    for (action, status) in [("cancel", "canceled"), ("confirm", "confirmed"), ("complete", "completed")] {
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/appointments/5/{}", action)))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::appointment(
                5,
                7,
                3,
                "2025-10-20T13:00:00Z",
                "2025-10-20T14:00:00Z",
                status,
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    assert_eq!(service.cancel(5).await.unwrap().status, AppointmentStatus::Canceled);
    assert_eq!(service.confirm(5).await.unwrap().status, AppointmentStatus::Confirmed);
    assert_eq!(service.complete(5).await.unwrap().status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_confirming_canceled_appointment_is_rejected() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api/v1/appointments/5/confirm"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Cannot confirm a canceled appointment" })),
        )
        .mount(&mock_server)
        .await;

    assert_matches!(
        service.confirm(5).await,
        Err(AppError::Validation(ref message)) if message == "Cannot confirm a canceled appointment"
    );
}

#[tokio::test]
async fn test_availability_round_trip() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let blocks = vec![
        MockApiResponses::block(1, 4, 1, "2025-10-20T12:00:00", "2025-10-20T13:00:00", false),
        MockApiResponses::block(2, 4, 2, "2025-10-20T13:00:00", "2025-10-20T14:00:00", true),
    ];

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments/doctor/7/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([MockApiResponses::availability(
            4,
            7,
            "2025-10-20T12:00:00",
            "2025-10-20T14:00:00",
            blocks.clone(),
        )])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/appointments/availability"))
        .and(body_json(json!({
            "doctor_id": 7,
            "start_at": "2025-10-20T12:00:00Z",
            "end_at": "2025-10-20T14:00:00Z",
            "slots": 2
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::availability(
            4,
            7,
            "2025-10-20T12:00:00",
            "2025-10-20T14:00:00",
            blocks,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/appointments/availability/4"))
        .and(body_json(json!({ "slots": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "doctor_id": 7,
            "start_at": "2025-10-20T12:00:00",
            "end_at": "2025-10-20T14:00:00",
            "slots": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let listed = service.list_doctor_availability(7).await.unwrap();
    assert_eq!(listed[0].booked_blocks(), 1);
    assert_eq!(listed[0].free_blocks(), 1);

    let created = service
        .create_availability(&AvailabilityCreateRequest {
            doctor_id: 7,
            start_at: utc("2025-10-20T12:00:00Z"),
            end_at: utc("2025-10-20T14:00:00Z"),
            slots: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(created.total_blocks(), 2);

    let updated = service
        .update_availability(
            4,
            &AvailabilityUpdateRequest {
                slots: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.slots, 3);
    assert!(updated.blocks.is_empty());
}

#[tokio::test]
async fn test_available_blocks_query() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/doctors/7/available-blocks"))
        .and(query_param("start_date", "2025-10-14T12:00:00Z"))
        .and(query_param("end_date", "2025-11-13T12:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([MockApiResponses::block(
            9,
            4,
            1,
            "2025-10-20T12:00:00",
            "2025-10-20T13:00:00",
            false,
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let blocks = service
        .get_available_blocks(7, utc("2025-10-14T12:00:00Z"), utc("2025-11-13T12:00:00Z"))
        .await
        .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].block_number, 1);
    assert!(!blocks[0].is_booked);
}

#[tokio::test]
async fn test_block_duration_read() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/settings/block-duration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "block_duration_minutes": 30 })))
        .mount(&mock_server)
        .await;

    assert_eq!(service.block_duration().await.unwrap().block_duration_minutes, 30);
}
