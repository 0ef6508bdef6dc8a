use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use georoute::config::environment::EnvironmentConfig;
use georoute::dto::ors_optimization_dto::{OrsOptimizationRequest, OrsOptimizationResponse};
use georoute::repositories::InMemoryRouteStore;
use georoute::routes::create_app_router;
use georoute::services::OptimizationTransport;
use georoute::state::AppState;
use georoute::utils::errors::OptimizationError;

/// Optimizador falso: siempre responde lo mismo y guarda los requests
struct FakeOptimizer {
    response: Value,
    requests: Mutex<Vec<Value>>,
}

#[async_trait]
impl OptimizationTransport for FakeOptimizer {
    async fn submit(
        &self,
        request: &OrsOptimizationRequest,
    ) -> Result<OrsOptimizationResponse, OptimizationError> {
        self.requests.lock().unwrap().push(serde_json::to_value(request)?);
        Ok(serde_json::from_value(self.response.clone())?)
    }
}

struct TestApp {
    router: Router,
    optimizer: Arc<FakeOptimizer>,
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }
}

fn create_test_app(optimizer_response: Value) -> TestApp {
    let optimizer = Arc::new(FakeOptimizer {
        response: optimizer_response,
        requests: Mutex::new(Vec::new()),
    });
    let state = AppState::new(
        EnvironmentConfig::default(),
        optimizer.clone(),
        Arc::new(InMemoryRouteStore::new()),
    );
    TestApp {
        router: create_app_router(state),
        optimizer,
    }
}

fn sample_stops() -> Value {
    json!([
        { "id": "dep", "lat": -34.92, "lng": -57.95, "address": "Fábrica, Ruta 2", "isDepot": true },
        { "id": "a", "lat": -34.90, "lng": -57.93, "address": "Calle 7 1234, La Plata", "type": "cliente" },
        {
            "id": "b", "lat": -34.88, "lng": -57.99, "address": "Av. 44 500, La Plata", "type": "proveedor",
            "timeWindow": { "start": "09:00", "end": "10:00" }
        },
        { "id": "c", "lat": -34.86, "lng": -57.91, "address": "Calle 12 800, La Plata" }
    ])
}

fn solved_response() -> Value {
    json!({
        "code": 0,
        "routes": [{
            "vehicle": 1,
            "distance": 18300.0,
            "duration": 3120.0,
            "geometry": "_p~iF~ps|U_ulLnnqC",
            "steps": [
                { "type": "start" },
                { "type": "job", "id": 3, "arrival": 29200 },
                { "type": "job", "id": 1, "arrival": 30100 },
                { "type": "job", "id": 2, "arrival": 32500 },
                { "type": "end" }
            ]
        }]
    })
}

fn order_of(stops: &Value, id: &str) -> Value {
    stops
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == id)
        .map(|s| s["order"].clone())
        .unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(solved_response());
    let (status, body) = app.get("/api/route/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["optimizer_configured"], false);
}

#[tokio::test]
async fn test_optimize_assigns_visit_order() {
    let app = create_test_app(solved_response());
    let (status, body) = app
        .post("/api/route/optimize", json!({ "stops": sample_stops(), "startTime": "08:00" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let stops = &body["data"]["stops"];
    assert_eq!(order_of(stops, "c"), json!(1));
    assert_eq!(order_of(stops, "a"), json!(2));
    assert_eq!(order_of(stops, "b"), json!(3));
    assert_eq!(order_of(stops, "dep"), Value::Null);

    let route = &body["data"]["route"];
    assert_eq!(route["distance"], 18300.0);
    assert_eq!(route["geometry"].as_array().unwrap().len(), 2);

    let sent = app.optimizer.requests.lock().unwrap()[0].clone();
    assert_eq!(sent["vehicles"][0]["time_window"], json!([28800, 79200]));
    assert_eq!(sent["vehicles"][0]["start"], json!([-57.95, -34.92]));
    assert_eq!(sent["jobs"][1]["time_windows"], json!([[32400, 36000]]));
    assert_eq!(sent["jobs"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_optimize_requires_two_stops() {
    let app = create_test_app(solved_response());
    let (status, body) = app
        .post(
            "/api/route/optimize",
            json!({ "stops": [{ "id": "dep", "lat": 0.0, "lng": 0.0, "isDepot": true }] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_ENOUGH_STOPS");
    assert!(app.optimizer.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_optimize_rejects_bad_start_time() {
    let app = create_test_app(solved_response());
    let (status, body) = app
        .post("/api/route/optimize", json!({ "stops": sample_stops(), "startTime": "8am" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TIME");
}

#[tokio::test]
async fn test_optimize_rejects_out_of_range_coordinates() {
    let app = create_test_app(solved_response());
    let (status, body) = app
        .post(
            "/api/route/optimize",
            json!({ "stops": [
                { "id": "dep", "lat": 0.0, "lng": 0.0, "isDepot": true },
                { "id": "x", "lat": 120.0, "lng": 0.0 }
            ] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_infeasible_schedule_is_unprocessable() {
    let app = create_test_app(json!({
        "code": 0,
        "routes": [],
        "unassigned": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
    }));
    let (status, body) = app
        .post("/api/route/optimize", json!({ "stops": sample_stops(), "startTime": "21:00" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INFEASIBLE_ROUTE");
}

#[tokio::test]
async fn test_route_sheet() {
    let app = create_test_app(solved_response());
    let (_, optimized) = app
        .post("/api/route/optimize", json!({ "stops": sample_stops() }))
        .await;

    let (status, body) = app
        .post(
            "/api/route/sheet",
            json!({
                "stops": optimized["data"]["stops"],
                "route": optimized["data"]["route"],
                "startTime": "08:00"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let text = body["data"]["text"].as_str().unwrap();
    assert!(text.contains("📏 Distancia: 18.3 km"));
    assert!(text.contains("*2.* 👤 Calle 12 800"));
    assert!(body["data"]["mapsLink"]
        .as_str()
        .unwrap()
        .starts_with("https://www.google.com/maps/dir/-34.92,-57.95/-34.86,-57.91/"));
    assert!(body["data"]["shareUrl"].as_str().unwrap().starts_with("https://wa.me/?text="));
}

#[tokio::test]
async fn test_saved_routes_lifecycle() {
    let app = create_test_app(solved_response());

    let (status, saved) = app
        .post(
            "/api/saved-routes",
            json!({
                "name": "Lunes zona norte",
                "stops": sample_stops(),
                "route": { "distance": 12000.0, "duration": 1800.0, "geometry": [], "steps": [] }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = saved["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(saved["data"]["stopCount"], 4);

    let (status, list) = app.get("/api/saved-routes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, stats) = app.get("/api/saved-routes/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["totalRoutes"], 1);
    assert_eq!(stats["data"]["clientsVisited"], 3);
    assert_eq!(stats["data"]["totalKm"], 12.0);

    let (status, fetched) = app.get(&format!("/api/saved-routes/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Lunes zona norte");

    let (status, _) = app.send("DELETE", &format!("/api/saved-routes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/saved-routes/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_save_route_requires_name() {
    let app = create_test_app(solved_response());
    let (status, _) = app
        .post("/api/saved-routes", json!({ "name": "", "stops": sample_stops() }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_optimize_rejects_duplicate_stop_ids() {
    let app = create_test_app(solved_response());
    let (status, body) = app
        .post(
            "/api/route/optimize",
            json!({ "stops": [
                { "id": "dep", "lat": -34.92, "lng": -57.95, "isDepot": true },
                { "id": "a", "lat": -34.90, "lng": -57.93 },
                { "id": "a", "lat": -34.88, "lng": -57.99 }
            ] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(app.optimizer.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_optimize_without_depot_flags_first_stop() {
    let app = create_test_app(solved_response());
    let mut stops = sample_stops();
    stops[0]["isDepot"] = json!(false);

    let (status, body) = app
        .post("/api/route/optimize", json!({ "stops": stops }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let returned = body["data"]["stops"].as_array().unwrap();
    assert_eq!(returned[0]["id"], "dep");
    assert_eq!(returned[0]["isDepot"], true);
    assert_eq!(returned.iter().filter(|s| s["isDepot"] == true).count(), 1);
}

#[tokio::test]
async fn test_optimize_tolerates_job_step_without_id() {
    let app = create_test_app(json!({
        "code": 0,
        "routes": [{
            "distance": 9000.0,
            "duration": 1500.0,
            "steps": [
                { "type": "start" },
                { "type": "job", "id": 2 },
                { "type": "job" },
                { "type": "job", "id": -1 },
                { "type": "job", "id": 1 },
                { "type": "end" }
            ]
        }]
    }));
    let (status, body) = app
        .post("/api/route/optimize", json!({ "stops": sample_stops() }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let stops = &body["data"]["stops"];
    assert_eq!(order_of(stops, "b"), json!(1));
    assert_eq!(order_of(stops, "a"), json!(2));
    assert_eq!(order_of(stops, "c"), Value::Null);
}

fn stop_ids(snapshot: &Value) -> Vec<String> {
    snapshot["data"]["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_planner_session_flow() {
    let app = create_test_app(solved_response());

    let (status, empty) = app.get("/api/planner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["data"]["stops"], json!([]));
    assert_eq!(empty["data"]["status"]["state"], "idle");

    let mut snapshot = Value::Null;
    for (lat, lng, address) in [
        (-34.92, -57.95, "Fábrica, Ruta 2"),
        (-34.90, -57.93, "Calle 7 1234, La Plata"),
        (-34.88, -57.99, "Av. 44 500, La Plata"),
        (-34.86, -57.91, "Calle 12 800, La Plata"),
    ] {
        let (status, body) = app
            .post("/api/planner/stops", json!({ "lat": lat, "lng": lng, "address": address }))
            .await;
        assert_eq!(status, StatusCode::OK);
        snapshot = body;
    }

    let ids = stop_ids(&snapshot);
    assert_eq!(ids.len(), 4);
    assert_eq!(snapshot["data"]["stops"][0]["isDepot"], true);
    assert_eq!(snapshot["data"]["stops"][1]["isDepot"], false);

    let (status, optimized) = app
        .post("/api/planner/optimize", json!({ "startTime": "08:00" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(optimized["data"]["status"]["state"], "succeeded");
    assert_eq!(optimized["data"]["route"]["distance"], 18300.0);
    assert_eq!(order_of(&optimized["data"]["stops"], &ids[3]), json!(1));

    // Editar una parada invalida la ruta calculada
    let (status, patched) = app
        .send(
            "PATCH",
            &format!("/api/planner/stops/{}", ids[1]),
            Some(json!({ "comment": "Tocar timbre", "type": "proveedor" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["data"]["route"], Value::Null);
    assert_eq!(patched["data"]["status"]["state"], "idle");
    assert_eq!(patched["data"]["stops"][1]["comment"], "Tocar timbre");
    assert_eq!(patched["data"]["stops"][1]["type"], "proveedor");
    assert_eq!(order_of(&patched["data"]["stops"], &ids[3]), Value::Null);

    let (status, moved) = app
        .send("PUT", &format!("/api/planner/stops/{}/depot", ids[2]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let depots: Vec<&Value> = moved["data"]["stops"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["isDepot"] == true)
        .collect();
    assert_eq!(depots.len(), 1);
    assert_eq!(depots[0]["id"], ids[2].as_str());

    let (status, removed) = app
        .send("DELETE", &format!("/api/planner/stops/{}", ids[0]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop_ids(&removed).len(), 3);

    let (status, body) = app
        .send("DELETE", &format!("/api/planner/stops/{}", ids[0]), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_planner_rejects_invalid_stop_edits() {
    let app = create_test_app(solved_response());

    let (status, body) = app
        .post("/api/planner/stops", json!({ "lat": 95.0, "lng": 0.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, added) = app
        .post("/api/planner/stops", json!({ "lat": -34.92, "lng": -57.95 }))
        .await;
    let id = stop_ids(&added)[0].clone();

    let (status, body) = app
        .send("PATCH", &format!("/api/planner/stops/{}", id), Some(json!({ "lng": 200.0 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, session) = app.get("/api/planner").await;
    assert_eq!(session["data"]["stops"][0]["lng"], -57.95);

    let (status, body) = app.post("/api/planner/optimize", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_ENOUGH_STOPS");
    assert!(app.optimizer.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_planner_loads_saved_route() {
    let app = create_test_app(solved_response());
    let (_, saved) = app
        .post("/api/saved-routes", json!({ "name": "Martes centro", "stops": sample_stops() }))
        .await;
    let id = saved["data"]["id"].as_str().unwrap().to_string();

    let (status, loaded) = app.post(&format!("/api/planner/load/{}", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop_ids(&loaded), vec!["dep", "a", "b", "c"]);
    assert_eq!(loaded["data"]["status"]["state"], "idle");

    let (status, _) = app.post("/api/planner/load/no-existe", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
