//! Results API integration tests
//!
//! Starts the axum server on an ephemeral port and exercises it with reqwest.

use std::sync::Arc;

use gradebook::http_server::{HttpServer, HttpServerConfig};
use gradebook::store::{InMemoryResultRepository, ResultRepository};
use serde_json::{json, Value};

// =============================================================================
// Helpers
// =============================================================================

struct TestServer {
    base: String,
    client: reqwest::Client,
    repository: Arc<dyn ResultRepository>,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn patch(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self.client.patch(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn add(&self, regno: &str, subject: &str, marks: f64) -> Value {
        let (status, body) = self
            .post(
                "/api/results",
                json!({ "regno": regno, "subject": subject, "marks": marks }),
            )
            .await;
        assert_eq!(status, 201, "{body}");
        body["result"].clone()
    }
}

/// Bind to port 0 over `repository` and return a client for it.
async fn start_server(repository: Arc<dyn ResultRepository>) -> TestServer {
    let app = HttpServer::with_repository(HttpServerConfig::default(), repository.clone()).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        repository,
    }
}

async fn empty_server() -> TestServer {
    start_server(Arc::new(InMemoryResultRepository::new())).await
}

async fn seeded_server() -> TestServer {
    start_server(Arc::new(InMemoryResultRepository::seeded())).await
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_check() {
    let server = empty_server().await;

    let (status, body) = server.get("/api/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_result_assigns_id_grade_and_timestamp() {
    let server = empty_server().await;

    let (status, body) = server
        .post(
            "/api/results",
            json!({ "regno": " 2025IT07 ", "subject": "Physics", "marks": 78 }),
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(body["message"], "Result added successfully");
    let result = &body["result"];
    assert!(!result["id"].as_str().unwrap().is_empty());
    assert_eq!(result["regno"], "2025IT07");
    assert_eq!(result["grade"], "A");
    assert_eq!(result["marks"].as_f64(), Some(78.0));
    assert!(result["createdAt"].as_str().is_some());

    assert_eq!(server.repository.all().unwrap().len(), 1);
}

#[tokio::test]
async fn create_result_accepts_numeric_string_marks() {
    let server = empty_server().await;

    let (status, body) = server
        .post(
            "/api/results",
            json!({ "regno": "2025IT07", "subject": "Art", "marks": "39" }),
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(body["result"]["grade"], "F");
}

#[tokio::test]
async fn create_result_rejects_out_of_range_marks() {
    let server = empty_server().await;

    for marks in [json!(101), json!(-1), json!("ninety"), json!(null)] {
        let (status, body) = server
            .post(
                "/api/results",
                json!({ "regno": "2025IT01", "subject": "Math", "marks": marks }),
            )
            .await;

        assert_eq!(status, 400);
        assert_eq!(
            body["error"],
            "Invalid marks. Marks must be a number between 0 and 100"
        );
    }

    assert!(server.repository.all().unwrap().is_empty());
}

#[tokio::test]
async fn create_result_rejects_missing_fields() {
    let server = empty_server().await;

    let (status, body) = server
        .post("/api/results", json!({ "regno": "2025IT01", "marks": 50 }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Missing required fields: regno, subject, and marks are required"
    );
    assert!(server.repository.all().unwrap().is_empty());
}

#[tokio::test]
async fn create_result_from_form_body() {
    let server = empty_server().await;

    let resp = server
        .client
        .post(server.url("/api/results"))
        .form(&[("regno", "2025IT08"), ("subject", "Biology"), ("marks", "66")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["result"]["regno"], "2025IT08");
    assert_eq!(body["result"]["marks"].as_f64(), Some(66.0));
    assert_eq!(body["result"]["grade"], "B");
}

#[tokio::test]
async fn create_result_from_form_body_validates_marks() {
    let server = empty_server().await;

    let resp = server
        .client
        .post(server.url("/api/results"))
        .form(&[("regno", "2025IT08"), ("subject", "Biology"), ("marks", "abc")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid marks. Marks must be a number between 0 and 100"
    );
    assert!(server.repository.all().unwrap().is_empty());
}

#[tokio::test]
async fn create_result_rejects_malformed_json() {
    let server = empty_server().await;

    let resp = server
        .client
        .post(server.url("/api/results"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn list_results_in_insertion_order() {
    let server = seeded_server().await;

    let (status, body) = server.get("/api/results").await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 3);

    let ids: Vec<_> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn results_by_regno_is_case_insensitive() {
    let server = seeded_server().await;

    let (status, body) = server.get("/api/results/2025it01").await;
    assert_eq!(status, 200);
    assert_eq!(body["regno"], "2025it01");
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["regno"], "2025IT01");
}

#[tokio::test]
async fn results_by_unknown_regno_is_not_found() {
    let server = seeded_server().await;

    let (status, body) = server.get("/api/results/2025IT99").await;
    assert_eq!(status, 404);
    assert_eq!(
        body["error"],
        "No results found for the given registration number"
    );
    assert_eq!(body["regno"], "2025IT99");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn update_result_does_not_recompute_grade() {
    let server = seeded_server().await;

    let (status, body) = server
        .patch("/api/results/1", json!({ "marks": 30, "subject": "Algebra" }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"]["marks"].as_f64(), Some(30.0));
    assert_eq!(body["result"]["subject"], "Algebra");
    assert_eq!(body["result"]["grade"], "A+");
}

#[tokio::test]
async fn update_with_no_fields_is_rejected() {
    let server = seeded_server().await;
    let before = server.repository.all().unwrap();

    let (status, body) = server.patch("/api/results/1", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "No fields to update: provide regno, subject, or marks"
    );
    assert_eq!(server.repository.all().unwrap(), before);
}

#[tokio::test]
async fn update_unknown_result_is_not_found() {
    let server = seeded_server().await;

    let (status, body) = server.patch("/api/results/404", json!({ "marks": 30 })).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Result not found");
}

#[tokio::test]
async fn delete_result() {
    let server = seeded_server().await;

    let (status, body) = server.delete("/api/results/2").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Result deleted successfully");
    assert_eq!(server.repository.all().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_unknown_result_leaves_store_unchanged() {
    let server = seeded_server().await;
    let before = server.repository.all().unwrap();

    let (status, body) = server.delete("/api/results/does-not-exist").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Result not found");
    assert_eq!(server.repository.all().unwrap(), before);
}

// =============================================================================
// GPA / Dashboard
// =============================================================================

#[tokio::test]
async fn gpa_and_dashboard_scenario() {
    let server = seeded_server().await;
    server.repository.clear().unwrap();

    server.add("2025IT01", "Math", 85.0).await;
    server.add("2025IT01", "Sci", 72.0).await;
    server.add("2025IT02", "ICT", 61.0).await;

    let (status, gpa) = server.get("/api/gpa/2025IT01").await;
    assert_eq!(status, 200);
    assert_eq!(gpa["gpa"], "3.50");
    assert_eq!(gpa["totalSubjects"], 2);
    assert_eq!(gpa["gradePoints"][0]["point"].as_f64(), Some(4.0));
    assert_eq!(gpa["gradePoints"][1]["point"].as_f64(), Some(3.0));
    assert_eq!(gpa["gradePoints"][1]["grade"], "B");

    let (status, dashboard) = server.get("/api/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["totalStudents"], 2);
    assert_eq!(dashboard["totalSubjects"], 3);
    assert_eq!(dashboard["bestGrade"], "A+");
    assert_eq!(dashboard["averageGPA"].as_f64(), Some(2.75));
    assert_eq!(dashboard["recentResults"][0]["subject"], "ICT");
}

#[tokio::test]
async fn gpa_string_rounds_to_two_places() {
    let server = empty_server().await;

    server.add("2025IT05", "Math", 85.0).await;
    server.add("2025IT05", "Sci", 85.0).await;
    server.add("2025IT05", "ICT", 72.0).await;

    // (4.0 + 4.0 + 3.0) / 3
    let (status, gpa) = server.get("/api/gpa/2025IT05").await;
    assert_eq!(status, 200);
    assert_eq!(gpa["gpa"], "3.67");
}

#[tokio::test]
async fn gpa_string_rounds_exact_ties_up() {
    let server = empty_server().await;

    server.add("2025IT06", "Math", 85.0).await;
    server.add("2025IT06", "Sci", 40.0).await;
    for i in 0..6 {
        server.add("2025IT06", &format!("Elective {i}"), 0.0).await;
    }

    // (4.0 + 1.0) / 8 = 0.625
    let (status, gpa) = server.get("/api/gpa/2025IT06").await;
    assert_eq!(status, 200);
    assert_eq!(gpa["gpa"], "0.63");
    assert_eq!(gpa["totalSubjects"], 8);

    let (_, dashboard) = server.get("/api/dashboard").await;
    assert_eq!(dashboard["averageGPA"].as_f64(), Some(0.63));
}

#[tokio::test]
async fn gpa_for_unknown_regno_is_not_found() {
    let server = empty_server().await;

    let (status, body) = server.get("/api/gpa/nobody").await;
    assert_eq!(status, 404);
    assert_eq!(body["regno"], "nobody");
}

#[tokio::test]
async fn dashboard_recent_results_capped_at_five() {
    let server = empty_server().await;
    for i in 0..7 {
        server.add("2025IT01", &format!("Subject {i}"), 50.0).await;
    }

    let (_, dashboard) = server.get("/api/dashboard").await;
    let recent = dashboard["recentResults"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["subject"], "Subject 6");
    assert_eq!(recent[4]["subject"], "Subject 2");
}

#[tokio::test]
async fn empty_dashboard() {
    let server = empty_server().await;

    let (status, dashboard) = server.get("/api/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["totalStudents"], 0);
    assert_eq!(dashboard["bestGrade"], "N/A");
    assert_eq!(dashboard["averageGPA"].as_f64(), Some(0.0));
}
