use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use serde_json::json;

use logidash_dashboard::{
    ApiError, Commit, DashboardConfig, DashboardController, DashboardError, DashboardSource,
    HttpDashboardSource, Session,
};

/// Canned response for one endpoint.
#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
}

impl Canned {
    fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct Backend {
    warehouses: Arc<Mutex<Canned>>,
    inventory: Arc<Mutex<Canned>>,
    authorization: Arc<Mutex<Vec<Option<String>>>>,
}

impl Backend {
    fn new() -> Self {
        Self {
            warehouses: Arc::new(Mutex::new(Canned::ok(json!([
                { "warehouseId": 1, "name": "North", "location": "Oslo", "capacity": 500 },
                { "warehouseId": 2, "name": "South", "location": "Malmo", "capacity": null },
                { "warehouseId": 3, "name": "East", "location": "Turku", "capacity": 1500.5 },
            ])))),
            inventory: Arc::new(Mutex::new(Canned::ok(json!([
                { "inventoryId": 10, "name": "Tape", "quantity": 2, "reorderLevel": 10 },
                { "inventoryId": 11, "name": "Boxes", "quantity": 20, "reorderLevel": 5 },
                { "inventoryId": 12, "name": "Labels", "quantity": 1, "reorderLevel": 3 },
            ])))),
            authorization: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn set_inventory(&self, canned: Canned) {
        *self.inventory.lock().unwrap() = canned;
    }

    fn set_warehouses(&self, canned: Canned) {
        *self.warehouses.lock().unwrap() = canned;
    }

    fn seen_authorization(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }

    fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorization.lock().unwrap().push(value);
    }
}

async fn warehouses(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, String) {
    backend.record(&headers);
    let canned = backend.warehouses.lock().unwrap().clone();
    (canned.status, canned.body)
}

async fn inventory(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, String) {
    backend.record(&headers);
    let canned = backend.inventory.lock().unwrap().clone();
    (canned.status, canned.body)
}

struct TestServer {
    base_url: String,
    backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let backend = Backend::new();
        let app = Router::new()
            .route("/api/warehouses", get(warehouses))
            .route("/api/inventory", get(inventory))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    fn source(&self) -> HttpDashboardSource {
        let source = HttpDashboardSource::new(&DashboardConfig::new(&self.base_url).unwrap());
        assert_eq!(source.api_url(), self.base_url);
        source
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn fetches_both_collections_with_bearer_token() {
    let srv = TestServer::spawn().await;
    let source = srv.source();
    let session = Session::authenticated("token-1");

    let warehouses = source.fetch_warehouses(session.token()).await.unwrap();
    let inventory = source.fetch_inventory(session.token()).await.unwrap();

    assert_eq!(warehouses.len(), 3);
    assert_eq!(warehouses[0].capacity, Some(serde_json::Number::from(500)));
    assert_eq!(warehouses[1].capacity, None);
    assert_eq!(
        warehouses[2].known_capacity().map(|c| c.to_string()),
        Some("1500.5".to_string())
    );
    assert_eq!(inventory.len(), 3);
    assert_eq!(
        srv.backend.seen_authorization(),
        vec![Some("Bearer token-1".to_string()), Some("Bearer token-1".to_string())]
    );
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() {
    let srv = TestServer::spawn().await;
    let source = srv.source();

    source.fetch_warehouses(None).await.unwrap();

    assert_eq!(srv.backend.seen_authorization(), vec![None]);
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let srv = TestServer::spawn().await;
    srv.backend
        .set_warehouses(Canned::status(StatusCode::UNAUTHORIZED, "missing token"));

    let err = srv.source().fetch_warehouses(None).await.unwrap_err();

    assert_eq!(err, ApiError::Api(401, "missing token".to_string()));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let srv = TestServer::spawn().await;
    srv.backend
        .set_inventory(Canned::ok(json!([{ "inventoryId": 1, "name": "x" }])));

    let err = srv.source().fetch_inventory(None).await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = DashboardConfig::new(format!("http://{}", addr)).unwrap();
    let err = HttpDashboardSource::new(&config)
        .fetch_warehouses(None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn controller_keeps_previous_data_when_inventory_endpoint_fails() {
    let srv = TestServer::spawn().await;
    let source = srv.source();
    let mut controller = DashboardController::new();

    let commit = controller
        .load(&source, &Session::authenticated("token-1"))
        .await;
    assert_eq!(commit, Some(Commit::Applied));
    let before = controller.state().snapshot().cloned().unwrap();
    assert_eq!(before.stats().total_warehouses, 3);
    assert_eq!(before.stats().low_stock_items, 2);

    srv.backend.set_warehouses(Canned::ok(json!([])));
    srv.backend
        .set_inventory(Canned::status(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
    controller
        .load(&source, &Session::authenticated("token-2"))
        .await;

    let state = controller.state();
    assert_eq!(
        state.error_message(),
        Some(DashboardError::FetchFailed.to_string().as_str())
    );
    assert_eq!(state.snapshot(), Some(&before));
}
