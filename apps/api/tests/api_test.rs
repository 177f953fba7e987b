//! End-to-end tests driving the router in-process.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use stockroom_api::{build_router, ApiConfig, AppState};
use stockroom_store::{Store, StoreConfig};
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    _dir: TempDir,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_auth(false).await
    }

    async fn with_auth(require_auth: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let config = ApiConfig {
            data_dir: dir.path().to_path_buf(),
            jwt_secret: "test-secret".to_string(),
            require_auth,
            ..ApiConfig::default()
        };

        TestApp {
            router: build_router(AppState::new(store, config)),
            _dir: dir,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// Registers and logs in, returning (user id, token).
    async fn account(&self, username: &str) -> (String, String) {
        let (status, _) = self
            .post("/api/register", json!({ "username": username, "password": "pw" }))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self
            .post("/api/login", json!({ "username": username, "password": "pw" }))
            .await;
        assert_eq!(status, StatusCode::OK);

        (
            body["userId"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn product(&self, user_id: &str, name: &str, quantity: i64, price: f64) -> String {
        let (status, body) = self
            .post(
                &format!("/api/inventory/{user_id}"),
                json!({ "name": name, "quantity": quantity, "price": price }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["product"]["id"].as_str().unwrap().to_string()
    }

    async fn client(&self, user_id: &str, name: &str) -> String {
        let (status, body) = self
            .post(
                &format!("/api/clients/{user_id}"),
                json!({ "name": name, "phone": "555-0100" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["client"]["id"].as_str().unwrap().to_string()
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_and_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/register", json!({ "username": "ana", "password": "pw" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");
    let user_id = body["userId"].as_str().unwrap().to_string();

    let (status, body) = app
        .post("/api/login", json!({ "username": "ana", "password": "pw" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["userId"], user_id.as_str());
    assert_eq!(body["username"], "ana");
    assert!(body["token"].as_str().is_some());
    assert!(body.get("password").is_none());

    // Fresh accounts start with empty collections
    let (status, body) = app.get(&format!("/api/inventory/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn register_rejects_duplicates_and_missing_fields() {
    let app = TestApp::new().await;
    app.account("ana").await;

    let (status, body) = app
        .post("/api/register", json!({ "username": "ana", "password": "other" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().is_some());

    let (status, body) = app.post("/api/register", json!({ "username": "bob" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.account("ana").await;

    let (status, body) = app
        .post("/api/login", json!({ "username": "ana", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.post("/api/login", json!({ "username": "ana" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_json_error() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().is_some());
}

// =============================================================================
// Products and Clients
// =============================================================================

#[tokio::test]
async fn product_crud() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;

    // Numeric strings are accepted
    let (status, body) = app
        .post(
            &format!("/api/inventory/{user_id}"),
            json!({ "name": "Widget", "quantity": "10", "price": "2.5" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(body["product"]["quantity"], 10);
    assert_eq!(body["product"]["price"], 2.5);
    let product_id = body["product"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/inventory/{user_id}/{product_id}");

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Widget XL", "quantity": 4, "price": 3 })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");
    assert_eq!(body["product"]["name"], "Widget XL");
    assert!(body["product"]["updatedAt"].as_str().is_some());

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 4);

    let (status, body) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_validation() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let uri = format!("/api/inventory/{user_id}");

    let (status, body) = app
        .post(&uri, json!({ "name": "Widget", "quantity": "abc", "price": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app.post(&uri, json!({ "name": "Widget", "price": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&uri, json!({ "name": "Widget", "quantity": -1, "price": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Update of a missing product
    let (status, _) = app
        .send(
            Method::PUT,
            &format!("{uri}/missing"),
            Some(json!({ "name": "W", "quantity": 1, "price": 1 })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_record_is_not_found_before_validation() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let product_id = app.product(&user_id, "Widget", 3, 1.0).await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/inventory/{user_id}/missing"),
            Some(json!({ "name": "W" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/clients/{user_id}/missing"),
            Some(json!({ "name": "Ana" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // An existing product with the same partial body is a validation error
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/inventory/{user_id}/{product_id}"),
            Some(json!({ "name": "W" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn deleting_a_product_twice_is_not_found() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let product_id = app.product(&user_id, "Widget", 3, 1.0).await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/inventory/{user_id}/unknown"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/inventory/{user_id}/{product_id}");
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn client_crud_defaults_optional_fields() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;

    let (status, body) = app
        .post(
            &format!("/api/clients/{user_id}"),
            json!({ "name": "Acme", "phone": "555" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Client added successfully");
    assert_eq!(body["client"]["email"], "");
    assert_eq!(body["client"]["address"], "");
    let client_id = body["client"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(&format!("/api/clients/{user_id}"), json!({ "name": "No Phone" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/clients/{user_id}/{client_id}");
    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Acme Ltd", "phone": "556", "email": "a@acme.example" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client"]["email"], "a@acme.example");

    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&format!("/api/clients/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn accounts_are_isolated() {
    let app = TestApp::new().await;
    let (ana, _) = app.account("ana").await;
    let (bob, _) = app.account("bob").await;
    let product_id = app.product(&ana, "Widget", 1, 1.0).await;

    let (status, _) = app.get(&format!("/api/inventory/{bob}/{product_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get(&format!("/api/inventory/{bob}")).await;
    assert_eq!(body, json!([]));

    // Unknown accounts list as empty but 404 on lookups
    let (status, body) = app.get("/api/inventory/nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    let (status, _) = app.get("/api/clients/nobody/c1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn invoice_decrements_stock() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let client_id = app.client(&user_id, "Acme").await;
    let product_id = app.product(&user_id, "Widget", 10, 2.0).await;

    let (status, body) = app
        .post(
            &format!("/api/invoices/{user_id}"),
            json!({ "clientId": client_id, "items": [{ "productId": product_id, "quantity": 3 }] }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invoice created successfully");
    assert_eq!(body["inventoryUpdated"], true);
    assert_eq!(body["invoice"]["items"][0]["total"], 6.0);
    assert_eq!(body["invoice"]["total"], 6.0);
    assert_eq!(body["invoice"]["subtotal"], 6.0);
    assert_eq!(body["invoice"]["client"]["name"], "Acme");
    assert!(body["invoice"]["invoiceNumber"]
        .as_str()
        .unwrap()
        .starts_with("INV-"));
    let invoice_id = body["invoice"]["id"].as_str().unwrap().to_string();

    let (_, product) = app.get(&format!("/api/inventory/{user_id}/{product_id}")).await;
    assert_eq!(product["quantity"], 7);

    let (status, invoice) = app.get(&format!("/api/invoices/{user_id}/{invoice_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["id"], invoice_id.as_str());

    let (_, list) = app.get(&format!("/api/invoices/{user_id}")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invoice_is_all_or_nothing() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let client_id = app.client(&user_id, "Acme").await;
    let a = app.product(&user_id, "Widget", 10, 2.0).await;
    let b = app.product(&user_id, "Gadget", 5, 1.0).await;

    let (status, body) = app
        .post(
            &format!("/api/invoices/{user_id}"),
            json!({
                "clientId": client_id,
                "items": [
                    { "productId": a, "quantity": 5 },
                    { "productId": b, "quantity": 999 }
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["error"].as_str().unwrap().contains("Gadget"));

    let (_, product) = app.get(&format!("/api/inventory/{user_id}/{a}")).await;
    assert_eq!(product["quantity"], 10);
    let (_, list) = app.get(&format!("/api/invoices/{user_id}")).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn invoice_validation_and_lookups() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let client_id = app.client(&user_id, "Acme").await;
    let product_id = app.product(&user_id, "Widget", 10, 2.0).await;
    let uri = format!("/api/invoices/{user_id}");

    let (status, _) = app.post(&uri, json!({ "clientId": client_id, "items": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&uri, json!({ "items": [{ "productId": product_id, "quantity": 1 }] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            &uri,
            json!({ "clientId": client_id, "items": [{ "productId": product_id, "quantity": 0 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            &uri,
            json!({ "clientId": "nobody", "items": [{ "productId": product_id, "quantity": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            &uri,
            json!({ "clientId": client_id, "items": [{ "productId": "missing", "quantity": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("{uri}/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn reports_aggregate_invoices() {
    let app = TestApp::new().await;
    let (user_id, _) = app.account("ana").await;
    let client_id = app.client(&user_id, "Acme").await;
    let widget = app.product(&user_id, "Widget", 10, 2.0).await;
    let gadget = app.product(&user_id, "Gadget", 10, 5.0).await;
    let uri = format!("/api/invoices/{user_id}");

    for (product_id, quantity) in [(&widget, 2), (&widget, 3), (&gadget, 1)] {
        let (status, _) = app
            .post(
                &uri,
                json!({ "clientId": client_id, "items": [{ "productId": product_id, "quantity": quantity }] }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, summary) = app.get(&format!("/api/reports/summary/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary[0]["productId"], widget.as_str());
    assert_eq!(summary[0]["totalQuantitySold"], 5);
    assert_eq!(summary[0]["salesCount"], 2);
    assert_eq!(summary[0]["totalRevenue"], 10.0);
    assert_eq!(summary[1]["productName"], "Gadget");

    let (status, sales) = app
        .get(&format!("/api/reports/sales/{user_id}?productName=WID"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 2);
    assert!(sales.iter().all(|s| s["productName"] == "Widget"));
    assert_eq!(sales[0]["clientName"], "Acme");

    let (_, all) = app.get(&format!("/api/reports/sales/{user_id}")).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn bearer_token_must_match_account() {
    let app = TestApp::new().await;
    let (ana, ana_token) = app.account("ana").await;
    let (bob, _) = app.account("bob").await;

    let (status, _) = app
        .send(Method::GET, &format!("/api/inventory/{ana}"), None, Some(&ana_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::GET, &format!("/api/inventory/{bob}"), None, Some(&ana_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app
        .send(Method::GET, &format!("/api/inventory/{ana}"), None, Some("garbage"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn require_auth_makes_token_mandatory() {
    let app = TestApp::with_auth(true).await;
    let (user_id, token) = app.account("ana").await;

    let (status, _) = app.get(&format!("/api/clients/{user_id}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, &format!("/api/clients/{user_id}"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
}
