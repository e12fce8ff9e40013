//! FILENAME: tests/test_service.rs
//! Integration tests for sessions, paths, request decoding and entities.

mod common;

use common::{error_feed, feed, mock_service};
use serde_json::json;
use service::{Method, ServiceConfig, ServiceError};

// ============================================================================
// SESSION
// ============================================================================

#[test]
fn test_login_sets_token() {
    let (mut service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Post,
        "/services/auth/login",
        200,
        json!({"sessionKey": "192fd3e46a31246da7ea7f109e7f95fd"}),
    );

    service.login("admin", "changeme").unwrap();

    assert_eq!(service.token(), Some("Splunk 192fd3e46a31246da7ea7f109e7f95fd"));
    let request = transport.last_request();
    assert_eq!(request.form_value("username"), Some("admin"));
    assert_eq!(request.form_value("password"), Some("changeme"));
    assert_eq!(request.header("Authorization"), None);
}

#[test]
fn test_token_sent_until_logout() {
    let (mut service, transport) = mock_service(ServiceConfig::default());
    transport
        .route(Method::Post, "/services/auth/login", 200, json!({"sessionKey": "abc"}))
        .route(Method::Get, "/services/server/info", 200, feed(vec![json!({"name": "server-info"})]));

    service.login("admin", "changeme").unwrap();
    service.info().unwrap();
    assert_eq!(transport.last_request().header("authorization"), Some("Splunk abc"));

    service.logout();
    service.info().unwrap();
    assert_eq!(transport.last_request().header("Authorization"), None);
}

#[test]
fn test_login_failure() {
    let (mut service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Post,
        "/services/auth/login",
        401,
        error_feed("Login failed"),
    );

    let err = service.login("admin", "wrong").unwrap_err();
    assert!(matches!(err, ServiceError::Authentication(ref m) if m == "Login failed"));
    assert_eq!(service.token(), None);
}

#[test]
fn test_debug_output_hides_session_key() {
    let (mut service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Post,
        "/services/auth/login",
        200,
        json!({"sessionKey": "s3cr3t"}),
    );

    let debug = format!("{:?}", service.login("admin", "changeme").unwrap());
    assert!(debug.contains("authenticated: true"), "{}", debug);
    assert!(!debug.contains("s3cr3t"), "{}", debug);
}

#[test]
fn test_preissued_token_from_config() {
    let (service, transport) = mock_service(ServiceConfig::default().with_token("Bearer xyz"));
    transport.route(Method::Get, "/services/server/info", 200, feed(vec![json!({"name": "server-info"})]));

    service.info().unwrap();
    assert_eq!(transport.last_request().header("Authorization"), Some("Bearer xyz"));
}

// ============================================================================
// PATHS
// ============================================================================

#[test]
fn test_fullpath() {
    let (service, _) = mock_service(ServiceConfig::default());
    assert_eq!(service.fullpath("search/jobs"), "/services/search/jobs");
    assert_eq!(service.fullpath("/services/auth/login"), "/services/auth/login");

    let (service, _) = mock_service(ServiceConfig::default().with_namespace(Some("admin"), Some("search")));
    assert_eq!(service.fullpath("saved/searches"), "/servicesNS/admin/search/saved/searches");

    let (service, _) = mock_service(ServiceConfig::default().with_namespace(None, Some("search")));
    assert_eq!(service.fullpath("saved/searches"), "/servicesNS/-/search/saved/searches");

    let (service, _) = mock_service(ServiceConfig::default().with_namespace(Some("nobody"), None));
    assert_eq!(service.fullpath("data/indexes"), "/servicesNS/nobody/-/data/indexes");
}

#[test]
fn test_requests_ask_for_json() {
    let (service, transport) = mock_service(ServiceConfig::default());
    transport.route(Method::Get, "/services/apps/local", 200, feed(vec![]));

    service.applications().list().unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.query_value("output_mode"), Some("json"));
    assert_eq!(request.query_value("count"), Some("0"));
}

#[test]
fn test_http_error_carries_server_messages() {
    let (service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Get,
        "/services/search/jobs",
        403,
        error_feed("You do not have permission"),
    );

    let err = service.jobs().list().unwrap_err();
    match err {
        ServiceError::Http { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "You do not have permission");
        }
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

#[test]
fn test_collection_list_and_get() {
    let (service, transport) = mock_service(ServiceConfig::default());
    transport
        .route(
            Method::Get,
            "/services/data/indexes",
            200,
            feed(vec![
                json!({"name": "main", "content": {"disabled": false, "totalEventCount": "12"}}),
                json!({"name": "_internal", "content": {"disabled": "0", "isInternal": "1"}}),
            ]),
        )
        .route(
            Method::Get,
            "/services/data/indexes/main",
            200,
            feed(vec![json!({"name": "main", "content": {"totalEventCount": 12}})]),
        );

    let indexes = service.indexes().list().unwrap();
    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[1].name(), "_internal");
    assert!(indexes[1].get_bool("isInternal"));
    assert!(!indexes[0].get_bool("disabled"));

    let main = service.indexes().get("main").unwrap().unwrap();
    assert_eq!(main.get_i64("totalEventCount"), Some(12));

    // Unrouted paths answer 404.
    assert!(service.indexes().get("nope").unwrap().is_none());
    assert!(!service.indexes().contains("nope").unwrap());
}

#[test]
fn test_collection_create_and_remove() {
    let (service, transport) = mock_service(ServiceConfig::default().with_namespace(Some("admin"), Some("search")));
    transport
        .route(
            Method::Post,
            "/servicesNS/admin/search/saved/searches",
            201,
            feed(vec![json!({"name": "errors by host", "content": {"search": "error | stats count by host"}})]),
        )
        .route(
            Method::Delete,
            "/servicesNS/admin/search/saved/searches/errors%20by%20host",
            200,
            serde_json::Value::Null,
        );

    let saved = service
        .saved_searches()
        .create("errors by host", &[("search", "error | stats count by host")])
        .unwrap();
    assert_eq!(saved.get_str("search"), Some("error | stats count by host"));
    assert_eq!(saved.path(), "saved/searches/errors%20by%20host");
    let request = transport.last_request();
    assert_eq!(request.form_value("name"), Some("errors by host"));
    assert_eq!(request.form_value("search"), Some("error | stats count by host"));

    service.saved_searches().remove("errors by host").unwrap();
    assert_eq!(transport.last_request().method, Method::Delete);
}

#[test]
fn test_capabilities_and_resource_paths() {
    let (service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Get,
        "/services/authorization/capabilities",
        200,
        feed(vec![json!({
            "name": "capabilities",
            "content": {"capabilities": ["admin_all_objects", "search"]}
        })]),
    );

    assert_eq!(
        service.capabilities().unwrap(),
        vec!["admin_all_objects".to_string(), "search".to_string()]
    );

    assert_eq!(service.event_types().path(), "saved/eventtypes");
    assert_eq!(service.license_pools().path(), "licenser/pools");
    assert_eq!(service.license_messages().path(), "licenser/messages");
    assert_eq!(service.license_stacks().path(), "licenser/stacks");
    assert_eq!(service.license_groups().path(), "licenser/groups");
    assert_eq!(service.licenses().path(), "licenser/licenses");
    assert_eq!(service.loggers().path(), "server/logger");
    assert_eq!(service.messages().path(), "messages");
    assert_eq!(service.passwords().path(), "storage/passwords");
    assert_eq!(service.roles().path(), "authentication/roles");
    assert_eq!(service.users().path(), "authentication/users");
    assert_eq!(service.data_models().path(), "datamodel/model");
    assert_eq!(service.license_slaves().path(), "licenser/slaves");
    assert_eq!(service.deployment_servers().path(), "deployment/server");
    assert_eq!(service.deployment_server_classes().path(), "deployment/serverclass");
    assert_eq!(service.deployment_tenants().path(), "deployment/tenants");
}

#[test]
fn test_deployment_client_reads_single_entry() {
    let (service, transport) = mock_service(ServiceConfig::default());
    transport.route(
        Method::Get,
        "/services/deployment/client",
        200,
        feed(vec![json!({
            "name": "deployment-client",
            "content": {"disabled": "1", "serverClasses": ["web", "db"]}
        })]),
    );

    let client = service.deployment_client().unwrap();
    assert_eq!(client.name(), "deployment-client");
    assert!(client.get_bool("disabled"));
    assert_eq!(client.get_str_list("serverClasses"), vec!["web", "db"]);
    assert_eq!(transport.last_request().method, Method::Get);
}
