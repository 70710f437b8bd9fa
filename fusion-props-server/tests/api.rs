use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum_test::TestServer;
use fusion_props_server::{
    build_router,
    infra::{app_state::AppState, config::Config},
};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// In-memory stand-in for the GraphQL endpoint: remembers created
/// collections and which hubs they are linked to.
#[derive(Clone, Default)]
struct FakeFusion {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    collections: Vec<(String, String)>,
    links: Vec<(String, String)>,
}

fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .nth(1)
        .and_then(|name| name.split('(').next())
        .unwrap_or_default()
}

fn collection_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "description": "" })
}

impl Respond for FakeFusion {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = request.body_json().unwrap();
        let query = body["query"].as_str().unwrap_or_default();
        let vars = &body["variables"];
        let mut state = self.state.lock().unwrap();

        let data = match operation_name(query) {
            "CreatePropertyDefinitionCollection" => {
                let name = vars["name"].as_str().unwrap().to_string();
                if state.collections.iter().any(|(_, n)| *n == name) {
                    return ResponseTemplate::new(200).set_body_json(json!({
                        "data": null,
                        "errors": [{ "message": "code=409 message=Collection name already exists" }]
                    }));
                }
                let id = format!("C{}", state.collections.len() + 1);
                state.collections.push((id.clone(), name.clone()));
                json!({ "createPropertyDefinitionCollection": {
                    "propertyDefinitionCollection": collection_json(&id, &name)
                }})
            }
            "GetPropertyDefinitionCollections" => json!({ "application": {
                "propertyDefinitionCollections": {
                    "pagination": { "cursor": null, "pageSize": 50 },
                    "results": state.collections.iter()
                        .map(|(id, name)| collection_json(id, name))
                        .collect::<Vec<_>>()
                }
            }}),
            "LinkPropertyDefinitionCollection" | "UnlinkPropertyDefinitionCollection" => {
                let hub = vars["hubId"].as_str().unwrap().to_string();
                let collection = vars["propertyDefinitionCollectionId"]
                    .as_str()
                    .unwrap()
                    .to_string();
                let field = if operation_name(query).starts_with("Link") {
                    state.links.push((hub.clone(), collection));
                    "linkPropertyDefinitionCollection"
                } else {
                    state.links.retain(|link| *link != (hub.clone(), collection.clone()));
                    "unlinkPropertyDefinitionCollection"
                };
                json!({ field: { "hub": { "id": hub, "name": "Hub" } } })
            }
            "GetPropertyDefinitionCollectionsByHub" => {
                let hub = vars["hubId"].as_str().unwrap();
                let results: Vec<Value> = state
                    .links
                    .iter()
                    .filter(|(h, _)| h == hub)
                    .filter_map(|(_, c)| state.collections.iter().find(|(id, _)| id == c))
                    .map(|(id, name)| collection_json(id, name))
                    .collect();
                json!({ "nav": { "hub": { "propertyDefinitionCollections": {
                    "pagination": { "cursor": null, "pageSize": 50 },
                    "results": results
                }}}})
            }
            other => {
                return ResponseTemplate::new(200).set_body_json(json!({
                    "data": null,
                    "errors": [{ "message": format!("unknown operation {other}") }]
                }));
            }
        };

        ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
    }
}

fn config_for(upstream: &MockServer) -> Config {
    Config::for_endpoint(Url::parse(&format!("{}/graphql", upstream.uri())).unwrap())
}

fn test_server(config: Config) -> TestServer {
    TestServer::new(build_router(AppState::new(config))).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let upstream = MockServer::start().await;
    let server = test_server(config_for(&upstream));

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn collection_lifecycle_across_hub_links() {
    let upstream = MockServer::start().await;
    let fake = FakeFusion::default();
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(fake.clone())
        .mount(&upstream)
        .await;
    let server = test_server(config_for(&upstream));

    let created: Value = server
        .post("/api/fusiondata/collections")
        .authorization_bearer("user")
        .json(&json!({ "collectionName": "Weights", "collectionDescription": "" }))
        .await
        .json();
    let collection_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Weights");

    let listed: Vec<Value> = server
        .get("/api/fusiondata/collections")
        .authorization_bearer("user")
        .await
        .json();
    assert_eq!(
        listed.iter().filter(|c| c["name"] == "Weights").count(),
        1
    );

    let linked: String = server
        .post("/api/fusiondata/H1/collections")
        .authorization_bearer("user")
        .json(&json!({ "collectionId": collection_id }))
        .await
        .json();
    assert_eq!(linked, "H1");

    let in_hub: Vec<Value> = server
        .get("/api/fusiondata/H1/collections")
        .authorization_bearer("user")
        .await
        .json();
    assert_eq!(in_hub.len(), 1);
    assert_eq!(in_hub[0]["id"], collection_id.as_str());

    server
        .delete(&format!("/api/fusiondata/H1/collections/{collection_id}"))
        .authorization_bearer("user")
        .await
        .assert_status_ok();

    let in_hub: Vec<Value> = server
        .get("/api/fusiondata/H1/collections")
        .authorization_bearer("user")
        .await
        .json();
    assert!(in_hub.is_empty());
}

#[tokio::test]
async fn upstream_errors_become_bad_requests() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(FakeFusion::default())
        .mount(&upstream)
        .await;
    let server = test_server(config_for(&upstream));

    server
        .post("/api/fusiondata/collections")
        .authorization_bearer("user")
        .json(&json!({ "collectionName": "Weights" }))
        .await
        .assert_status_ok();
    let response = server
        .post("/api/fusiondata/collections")
        .authorization_bearer("user")
        .json(&json!({ "collectionName": "Weights" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Collection name already exists");
    assert_eq!(body["error"]["kind"], "remote_query");
}

#[tokio::test]
async fn user_routes_require_a_bearer_token() {
    let upstream = MockServer::start().await;
    let server = test_server(config_for(&upstream));

    let response = server.get("/api/fusiondata/H1/collections").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

fn config_with_service_token(upstream: &MockServer) -> Config {
    let mut config = config_for(upstream);
    config.fusion.service_token = Some("service-secret".to_string());
    config
}

#[tokio::test]
async fn service_routes_use_the_configured_credential() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer service-secret"))
        .respond_with(FakeFusion::default())
        .expect(1)
        .mount(&upstream)
        .await;
    let server = test_server(config_with_service_token(&upstream));

    let response = server
        .get("/api/fusiondata/collections")
        .authorization_bearer("user")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn service_routes_reject_anonymous_callers() {
    let upstream = MockServer::start().await;
    let server = test_server(config_with_service_token(&upstream));

    let response = server
        .post("/api/fusiondata/collections")
        .json(&json!({ "collectionName": "Anon" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "unauthorized");
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let upstream = MockServer::start().await;
    let server = test_server(config_for(&upstream));

    let response = server
        .post("/api/fusiondata/collections/C1/definitions")
        .authorization_bearer("user")
        .json(&json!({ "definitionName": "Weight", "definitionType": "FLOAT" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "bad_request");
    assert_eq!(body["error"]["status"], 400);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("propertyBehavior")
    );
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn numeric_minimal_flag_requests_one_small_page() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "hubId": "H1", "limit": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "nav": { "hub": { "propertyDefinitionCollections": {
                "pagination": { "cursor": "more", "pageSize": 1 },
                "results": [collection_json("C1", "Weights")]
            }}}}
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = test_server(config_for(&upstream));

    let response = server
        .get("/api/fusiondata/H1/collections?minimal=1")
        .authorization_bearer("user")
        .await;

    response.assert_status_ok();
    let collections: Vec<Value> = response.json();
    assert_eq!(collections.len(), 1);
    assert_eq!(upstream.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_version_thumbnail_falls_back_to_placeholder() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "nav": { "itemVersion": null } }
        })))
        .mount(&upstream)
        .await;
    let server = test_server(config_for(&upstream));

    let response = server
        .get("/api/fusiondata/P1/FV1/thumbnailUrl")
        .authorization_bearer("user")
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/images/box-200x200.png");
}

#[tokio::test]
async fn thumbnail_proxy_streams_bytes_with_caller_token() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/signed/thumb.png"))
        .and(header("authorization", "Bearer user"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/webp"),
        )
        .mount(&upstream)
        .await;
    let server = test_server(config_for(&upstream));
    let signed = format!("{}/signed/thumb.png", upstream.uri());
    let encoded: String = url::form_urlencoded::byte_serialize(signed.as_bytes()).collect();

    let response = server
        .get(&format!("/api/fusiondata/thumbnail/{encoded}"))
        .authorization_bearer("user")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/webp");
    assert_eq!(response.as_bytes().to_vec(), vec![0x89, b'P', b'N', b'G']);
}
