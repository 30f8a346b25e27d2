//! Paths, bodies and decoding of the role endpoint wrappers.

mod common;

use common::client_for;
use digital_eval_client::ClientError;
use digital_eval_core::api::{EvaluationRequestCreate, ReleasePayload, ServiceAction};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_examiner_upload_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/examiner/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "script_id": "SCR-1",
            "block_hash": "abc123",
            "pdf_cid": "bafy",
            "pdf_path": "/uploads/a.pdf",
            "metadata": {"USN": "4BD23AI104", "CourseID": "CS501"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    let response = client
        .examiner()
        .upload_script("script.pdf", &b"%PDF-1.4 test"[..])
        .await
        .unwrap();

    assert_eq!(response.usn(), Some("4BD23AI104"));
    let received = server.received_requests().await.unwrap();
    let content_type = received[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"script.pdf\""));
}

#[tokio::test]
async fn test_evaluator_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/evaluator/requests"))
        .and(body_json(json!({
            "evaluator_id": "evaluator_1",
            "course_id": "CS501",
            "semester": "5",
            "academic_year": "2025-26",
            "description": "mid-term",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"request_id": 12})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluator/script/SCR%201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usn": "4BD23AI104"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluator/requests/history"))
        .and(query_param("evaluator_id", "evaluator_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    let evaluator = client.evaluator();

    let created = evaluator
        .create_request(&EvaluationRequestCreate {
            evaluator_id: "evaluator_1".into(),
            course_id: "CS501".into(),
            semester: "5".into(),
            academic_year: "2025-26".into(),
            description: Some("mid-term".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.request_id, 12);

    let metadata = evaluator.script_metadata("SCR 1").await.unwrap();
    assert_eq!(metadata.get("usn").map(String::as_str), Some("4BD23AI104"));

    assert!(evaluator.request_history("evaluator_1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_authority_approve_and_release() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/authority/requests/4/approve"))
        .and(body_json(json!({"assign_num": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assigned": 3})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/authority/results/release"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"block_hash": "0xfeed"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    assert_eq!(client.authority().approve(4, 5).await.unwrap(), 3);

    let released = client
        .authority()
        .release_results(&ReleasePayload {
            semester: "5".into(),
            academic_year: "2025-26".into(),
            released_by: "authority_1".into(),
        })
        .await
        .unwrap();
    assert_eq!(released.block_hash, "0xfeed");
}

#[tokio::test]
async fn test_student_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/student/download"))
        .and(query_param("usn", "4BD23AI104"))
        .and(query_param("semester", "5"))
        .and(query_param("academic_year", "2025-26"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 result".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    let pdf = client
        .student()
        .download_pdf("4BD23AI104", "5", "2025-26")
        .await
        .unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_student_download_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/student/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "results not released"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    let err = client
        .student()
        .download_pdf("4BD23AI104", "5", "2025-26")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedResponse(msg) if msg.contains("results not released")));
}

#[tokio::test]
async fn test_admin_service_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/services/go-node/restart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "message": "restarted",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/services/go-node/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logs": ["started", "ready"]})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("tok"));
    let response = client
        .admin()
        .service_action("go-node", ServiceAction::Restart)
        .await
        .unwrap();
    assert_eq!(response.status, "running");

    let logs = client.admin().service_logs("go-node").await.unwrap();
    assert_eq!(logs, vec!["started".to_string(), "ready".to_string()]);
}
