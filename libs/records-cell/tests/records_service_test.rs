use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use records_cell::MedicalRecordsService;
use shared_api::{AnonymousToken, ApiClient};
use shared_config::AppConfig;
use shared_models::{sort_by_updated_desc, AppError, MedicalRecordCreateRequest, MedicalRecordUpdateRequest};
use shared_utils::test_utils::MockApiResponses;

fn service_for(server: &MockServer) -> MedicalRecordsService {
    let config = AppConfig::with_base_url(&format!("{}/api/v1", server.uri()));
    MedicalRecordsService::new(ApiClient::new(&config, Arc::new(AnonymousToken)).unwrap())
}

#[tokio::test]
async fn test_doctor_records_sorted_by_update() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/medical-records/doctors/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::medical_record(1, 3, Some(7), Some("Gripe"), "2025-02-01T10:00:00"),
            MockApiResponses::medical_record(2, 4, Some(7), Some("Migraña"), "2025-03-01T10:00:00"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut records = service.list_for_doctor(7).await.unwrap();
    sort_by_updated_desc(&mut records);
    assert_eq!(records[0].id, 2);
    assert_eq!(records[1].diagnosis.as_deref(), Some("Gripe"));
}

#[tokio::test]
async fn test_patient_lists_and_history() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/medical-records/patients/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([MockApiResponses::medical_record(
            1,
            3,
            Some(7),
            None,
            "2025-02-01T10:00:00",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut history_entry = MockApiResponses::medical_record(5, 3, Some(8), Some("Control"), "2025-04-01T10:00:00");
    history_entry["doctor_name"] = json!("Dr. Pérez");
    Mock::given(method("GET"))
        .and(path("/api/v1/medical-records/patients/3/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([history_entry])))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_eq!(service.list_for_patient(3).await.unwrap().len(), 1);
    let history = service.patient_history(3).await.unwrap();
    assert_eq!(history[0].doctor_name.as_deref(), Some("Dr. Pérez"));
}

#[tokio::test]
async fn test_create_and_update() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api/v1/medical-records/"))
        .and(body_json(json!({
            "patient_id": 3,
            "doctor_id": 7,
            "diagnosis": "Faringitis",
            "treatment": null,
            "notes": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::medical_record(
            9,
            3,
            Some(7),
            Some("Faringitis"),
            "2025-05-01T10:00:00",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/medical-records/9"))
        .and(body_json(json!({ "diagnosis": null, "treatment": "Reposo", "notes": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::medical_record(
            9,
            3,
            Some(7),
            Some("Faringitis"),
            "2025-05-02T10:00:00",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = service
        .create(&MedicalRecordCreateRequest {
            patient_id: 3,
            doctor_id: Some(7),
            diagnosis: Some("Faringitis".into()),
            treatment: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 9);

    let updated = service
        .update(
            9,
            &MedicalRecordUpdateRequest {
                treatment: Some("Reposo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_missing_record() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/medical-records/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Medical record not found" })))
        .mount(&mock_server)
        .await;

    assert_matches!(service.get(404).await, Err(AppError::NotFound(_)));
}
