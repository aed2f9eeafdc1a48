mod common;

use actix_web::{http::StatusCode, test, web, App, HttpServer};
use common::{sample_records, temp_db};
use gradelens::client::{GradesApi, ResultsRoute, ResultsView, SuggestionSource};
use gradelens::models::{SectionRecord, Suggestion};
use gradelens::server::{configure, AppState};
use gradelens::store::{import_sections, init_db};

fn seeded_state(name: &str) -> AppState {
    let db = temp_db(name);
    init_db(&db).expect("Debe crear la base");
    import_sections(&db, &sample_records(), "test").expect("Debe importar");
    AppState::new(db, 10)
}

#[actix_web::test]
async fn test_query_param_returns_suggestions() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state("srv-query")))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/courses/search?query=cse%201310").to_request();
    let body: Vec<Suggestion> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, vec![Suggestion::course("CSE 1310 - Intro to Programming")]);
}

#[actix_web::test]
async fn test_course_param_returns_sections() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state("srv-course")))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/courses/search?course=CSE%201310").to_request();
    let body: Vec<SectionRecord> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 3);
    assert!(body.iter().all(|r| r.course_code() == "CSE 1310"));
}

#[actix_web::test]
async fn test_professor_param_returns_sections() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state("srv-prof")))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/courses/search?professor=Jane%20Doe").to_request();
    let body: Vec<SectionRecord> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].subject_id, "MATH");
}

#[actix_web::test]
async fn test_missing_params_is_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state("srv-bad")))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/courses/search?query=").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[actix_web::test]
async fn test_health_reports_section_count() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state("srv-health")))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sections"], 5);
    assert_eq!(body["last_import"]["source"], "test");
}

#[actix_web::test]
async fn test_http_client_against_live_server() {
    let state = web::Data::new(seeded_state("srv-live"));
    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Debe enlazar un puerto libre");
    let addr = server.addrs()[0];
    let handle = server.run();
    let server_handle = handle.handle();
    actix_web::rt::spawn(handle);

    let api = GradesApi::new(format!("http://{}", addr));

    let suggestions = api.suggestions("marnim g").await.expect("Debe responder");
    assert_eq!(suggestions, vec![Suggestion::professor("Marnim Galib")]);

    let view = ResultsView::load(ResultsRoute::Course("CSE 1310".to_string()), &api).await;
    assert_eq!(view.aggregator().professors(), vec!["Smith", "Marnim Galib"]);

    server_handle.stop(true).await;
}
