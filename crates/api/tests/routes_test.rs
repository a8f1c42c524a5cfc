//! Router tests driving the full middleware stack with in-memory collaborators.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use ledgerlink_api::{AppState, create_router};
use ledgerlink_core::gateway::{CREATE_JOURNAL_ENTRY, GET_LEDGER_ACCOUNTS, GatewayError};
use ledgerlink_core::import::ImportSynchronizer;
use ledgerlink_core::testing::{
    InMemoryLedgerAccountStore, ScriptedGateway, ledger_accounts_page, tenant,
};
use ledgerlink_shared::{JwtConfig, JwtService, Tenant};

struct Harness {
    router: Router,
    gateway: Arc<ScriptedGateway>,
    store: Arc<InMemoryLedgerAccountStore>,
    jwt: Arc<JwtService>,
}

impl Harness {
    fn new(gateway: ScriptedGateway) -> Self {
        let gateway = Arc::new(gateway);
        let store = Arc::new(InMemoryLedgerAccountStore::new());
        let jwt = Arc::new(JwtService::new(JwtConfig {
            secret: "route-test-secret".to_string(),
            access_token_expires_minutes: 15,
        }));
        let state = AppState::new(gateway.clone(), store.clone(), jwt.clone());
        Self {
            router: create_router(state),
            gateway,
            store,
            jwt,
        }
    }

    fn token(&self, tenant: &Tenant) -> String {
        self.jwt.generate_access_token(tenant).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str, tenant: &Tenant) -> (StatusCode, Value) {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token(tenant)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post(&self, uri: &str, tenant: &Tenant, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token(tenant)))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn valid_entry() -> Value {
    json!({
        "lines": [
            {"amount": 100, "currency": "USD", "type": "Debit", "ledgerAccountId": "1"}
        ]
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let harness = Harness::new(ScriptedGateway::new());

    let (status, body) = harness
        .send(Request::get("/api/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));

    for (method, uri) in [
        ("GET", "/api/ledger-accounts"),
        ("POST", "/api/ledger-accounts/import"),
        ("POST", "/api/journal-entries"),
    ] {
        let (status, body) = harness
            .send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["code"], "MISSING_TOKEN");
    }

    assert_eq!(harness.gateway.connection_lookups(), 0);
    assert!(harness.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let harness = Harness::new(ScriptedGateway::new());

    let (status, body) = harness
        .send(
            Request::get("/api/ledger-accounts")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_import_then_list() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));
    harness.gateway.push_output(
        GET_LEDGER_ACCOUNTS,
        ledger_accounts_page(&[("1", "Cash")], Some("c1")),
    );
    harness.gateway.push_output(
        GET_LEDGER_ACCOUNTS,
        ledger_accounts_page(&[("2", "Revenue")], None),
    );
    let acme = tenant("acme");

    let (status, body) = harness.post("/api/ledger-accounts/import", &acme, "").await;

    assert_eq!(status, StatusCode::OK);
    let imported = body["ledgerAccounts"].as_array().unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0]["externalId"], "1");
    assert!(imported[0].get("tenantId").is_none());
    assert!(imported[0]["createdAt"].is_string());

    let (status, body) = harness.get("/api/ledger-accounts", &acme).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["ledgerAccounts"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["externalId"], "2");

    // Another tenant sees nothing.
    let (_, body) = harness.get("/api/ledger-accounts", &tenant("globex")).await;
    assert_eq!(body["ledgerAccounts"], json!([]));
}

#[tokio::test]
async fn test_import_without_connection_is_400() {
    let harness = Harness::new(ScriptedGateway::new());

    let (status, body) = harness
        .post("/api/ledger-accounts/import", &tenant("acme"), "")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_CONNECTION");
    assert_eq!(body["error"], "No apps connected to import ledger accounts from");
    assert_eq!(harness.store.replace_calls(), 0);
}

#[tokio::test]
async fn test_import_remote_failure_is_500_with_data() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));
    harness.gateway.push_error(
        GET_LEDGER_ACCOUNTS,
        GatewayError::new("Token expired")
            .with_status(401)
            .with_data(json!({"reason": "reauth"})),
    );

    let (status, body) = harness
        .post("/api/ledger-accounts/import", &tenant("acme"), "")
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "REMOTE_ACTION_FAILED");
    assert_eq!(body["data"], json!({"reason": "reauth"}));
}

#[tokio::test]
async fn test_import_honors_page_limit() {
    let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));
    let store = Arc::new(InMemoryLedgerAccountStore::new());
    let jwt = Arc::new(JwtService::new(JwtConfig::default()));
    let state = AppState::new(gateway.clone(), store.clone(), jwt.clone()).with_importer(
        ImportSynchronizer::new(gateway.clone(), store.clone()).with_max_pages(1),
    );
    gateway.push_output(
        GET_LEDGER_ACCOUNTS,
        ledger_accounts_page(&[("1", "Cash")], Some("more")),
    );
    let acme = tenant("acme");

    let response = create_router(state)
        .oneshot(
            Request::post("/api/ledger-accounts/import")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", jwt.generate_access_token(&acme).unwrap()),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.snapshot(&acme.id).is_empty());
}

#[tokio::test]
async fn test_submit_valid_entry() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));
    harness
        .gateway
        .push_output(CREATE_JOURNAL_ENTRY, json!({"id": "je-7", "status": "posted"}));

    let (status, body) = harness
        .post("/api/journal-entries", &tenant("acme"), &valid_entry().to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "je-7", "status": "posted"}));
    let calls = harness.gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].input, Some(valid_entry()));
}

#[tokio::test]
async fn test_submit_empty_lines_is_400_without_gateway_call() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));

    let (status, body) = harness
        .post("/api/journal-entries", &tenant("acme"), r#"{"lines": []}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_LINES");
    assert_eq!(harness.gateway.connection_lookups(), 0);
}

#[tokio::test]
async fn test_submit_invalid_json_is_400() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));

    let (status, body) = harness
        .post("/api/journal-entries", &tenant("acme"), "{not json")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_REQUEST");
}

#[tokio::test]
async fn test_submit_remote_fault_keeps_status() {
    let harness = Harness::new(ScriptedGateway::new().with_connection("conn-1"));
    let data = json!({"response": {"data": {"Fault": {"Error": [
        {"Message": "Invalid Reference Id", "Detail": "Account 1 does not exist"}
    ]}}}});
    harness.gateway.push_error(
        CREATE_JOURNAL_ENTRY,
        GatewayError::new("Request failed with status 422")
            .with_status(422)
            .with_data(data.clone()),
    );

    let (status, body) = harness
        .post("/api/journal-entries", &tenant("acme"), &valid_entry().to_string())
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], data);
    assert_eq!(body["fault"]["message"], "Invalid Reference Id");
    assert_eq!(body["fault"]["detail"], "Account 1 does not exist");
}

#[tokio::test]
async fn test_submit_without_connection_is_400() {
    let harness = Harness::new(ScriptedGateway::new());

    let (status, body) = harness
        .post("/api/journal-entries", &tenant("acme"), &valid_entry().to_string())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No apps connected to create journal entries");
}
