/// Integration tests for the HTTP surface, driven through the router
use area_price_predictor::{
    config::Config,
    error::ModelLoadError,
    estimator::PriceEstimator,
    handlers::AppState,
    model::{LinearRegression, ModelState},
    server::create_router,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceExt;

fn app_with(model: ModelState) -> Router {
    let config = Config::default();
    let state = AppState {
        config: Arc::new(config.clone()),
        estimator: Arc::new(PriceEstimator::new(model)),
        banner: None,
    };
    create_router(&config, state, None)
}

fn flat_model(price: f64) -> ModelState {
    ModelState::loaded(LinearRegression::new(0.0, price))
}

fn unloaded() -> ModelState {
    ModelState::unloaded(ModelLoadError::Invalid {
        path: PathBuf::from("area_price_model.json"),
        reason: "truncated file".to_string(),
    })
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let response = app_with(flat_model(100.0))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<form method=\"post\" action=\"/predict\""));
    assert!(!body.contains("Model loading failed"));
}

#[tokio::test]
async fn test_form_submission_shows_price() {
    let response = app_with(flat_model(100.0))
        .oneshot(form_request("area_slider=1000&area_manual=1000&city=Mumbai"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("₹150.00 for 1000 sqft in Mumbai"));
}

#[tokio::test]
async fn test_form_without_model_shows_both_errors() {
    let response = app_with(unloaded())
        .oneshot(form_request("area_slider=1000&area_manual=1000&city=Chennai"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Model loading failed"));
    assert!(body.contains("Oops! Something went wrong"));
    assert!(body.contains("truncated file"));
    assert!(!body.contains("class=\"success\""));
}

#[tokio::test]
async fn test_api_predict() {
    let response = app_with(flat_model(100.0))
        .oneshot(json_request(serde_json::json!({ "area": 1000.0, "city": "Chennai" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["price"], 100.0);
    assert_eq!(body["formatted_price"], "₹100.00");
}

#[tokio::test]
async fn test_api_predict_unknown_city() {
    let response = app_with(flat_model(100.0))
        .oneshot(json_request(serde_json::json!({ "area": 1000.0, "city": "Paris" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["type"], "unknown_city");
}

#[tokio::test]
async fn test_api_predict_without_model() {
    let response = app_with(unloaded())
        .oneshot(json_request(serde_json::json!({ "area": 1000.0, "city": "Delhi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["type"], "model_unavailable");
}

#[tokio::test]
async fn test_cities_endpoint() {
    let response = app_with(flat_model(100.0))
        .oneshot(Request::get("/api/v1/cities").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata", "Ahmedabad", "Pune"]
    );
}

#[tokio::test]
async fn test_readiness_follows_model_state() {
    let ready = app_with(flat_model(1.0))
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let not_ready = app_with(unloaded())
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_metrics_route_absent_when_disabled() {
    let response = app_with(flat_model(1.0))
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_predict_missing_field_uses_error_envelope() {
    let response = app_with(flat_model(100.0))
        .oneshot(json_request(serde_json::json!({ "area": 1000 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["type"], "invalid_input");
    assert!(body["error"]["message"].as_str().unwrap().contains("city"));
}

#[tokio::test]
async fn test_api_predict_wrong_area_type_uses_error_envelope() {
    let response = app_with(flat_model(100.0))
        .oneshot(json_request(serde_json::json!({ "area": "big", "city": "Mumbai" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["type"], "invalid_input");
}

#[tokio::test]
async fn test_form_without_form_content_type_renders_warning() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from("area_manual=1000&city=Pune"))
        .unwrap();

    let response = app_with(flat_model(100.0)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("class=\"warning\""));
    assert!(body.contains("malformed request"));
    assert!(!body.contains("class=\"success\""));
}
