//! End-to-end tests for the blocking facade. The axum test server runs on
//! its own thread with its own runtime; the facade under test never touches
//! an event loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use xui_client::blocking::Api;
use xui_client::Error;

fn ok_envelope(obj: Value) -> Json<Value> {
    Json(json!({"success": true, "msg": "", "obj": obj}))
}

async fn login_with_cookie() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "3x-ui=test-session; Path=/")],
        ok_envelope(Value::Null),
    )
}

fn spawn(app: Router) -> SocketAddr {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

fn logged_in_api(addr: SocketAddr) -> Api {
    let mut api = Api::new(&format!("http://{addr}"), "admin", "secret").unwrap();
    api.set_retry_delay(Duration::from_millis(1));
    api.login().unwrap();
    api
}

#[test]
fn login_and_inbound_listing() {
    let app = Router::new()
        .route("/login", post(login_with_cookie))
        .route(
            "/panel/api/inbounds/list",
            get(|| async {
                ok_envelope(json!([{
                    "id": 1,
                    "enable": true,
                    "port": 8443,
                    "protocol": "vmess",
                    "settings": "{\"clients\":[],\"decryption\":\"\",\"fallbacks\":[]}",
                    "streamSettings": "{\"network\":\"ws\",\"security\":\"tls\"}",
                    "sniffing": "{\"enabled\":false}"
                }]))
            }),
        );
    let addr = spawn(app);

    let api = logged_in_api(addr);
    assert_eq!(api.session().unwrap().name, "3x-ui");

    let inbounds = api.inbound.get_list().unwrap();
    assert_eq!(inbounds.len(), 1);
    assert_eq!(inbounds[0].port, 8443);
    assert_eq!(inbounds[0].stream_settings.network, "ws");
}

#[test]
fn unauthenticated_calls_fail_before_any_network_io() {
    let _ = rustls::crypto::ring::default_provider().install_default();
    // No server at all: the check happens before the request is sent.
    let api = Api::new("http://127.0.0.1:9", "admin", "secret").unwrap();
    assert!(matches!(
        api.inbound.get_list(),
        Err(Error::Unauthenticated)
    ));
    assert!(matches!(
        api.client.get_by_email("alice"),
        Err(Error::Unauthenticated)
    ));
}

#[test]
fn retry_then_success_and_exhaustion() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/login", post(login_with_cookie))
        .route(
            "/panel/api/inbounds/onlines",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                if hits.fetch_add(1, Ordering::SeqCst) < 1 {
                    return (StatusCode::BAD_GATEWAY, Json(json!({}))).into_response();
                }
                ok_envelope(json!(["carol"])).into_response()
            }),
        )
        .with_state(hits.clone());
    let addr = spawn(app);

    let mut api = logged_in_api(addr);
    api.set_max_retries(2);
    assert_eq!(api.client.online().unwrap(), vec!["carol"]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // A dead port exhausts the attempts and surfaces the last error.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let mut api = Api::new(&format!("http://{dead}"), "admin", "secret").unwrap();
    api.set_max_retries(2);
    api.set_retry_delay(Duration::from_millis(1));
    match api.login() {
        Err(Error::Transport { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn client_lookup_and_update_round() {
    let app = Router::new()
        .route("/login", post(login_with_cookie))
        .route(
            "/panel/api/inbounds/getClientTraffics/{email}",
            get(|Path(email): Path<String>| async move {
                if email == "dave" {
                    ok_envelope(json!({
                        "id": 11, "inboundId": 2, "enable": true, "email": "dave",
                        "up": 10, "down": 20, "expiryTime": 0, "total": 0, "reset": 0
                    }))
                } else {
                    ok_envelope(Value::Null)
                }
            }),
        )
        .route(
            "/panel/api/inbounds/getClientTrafficsById/{uuid}",
            get(|Path(uuid): Path<String>| async move {
                if uuid == "client-uuid" {
                    ok_envelope(json!([{
                        "id": 11, "inboundId": 2, "enable": true, "email": "dave",
                        "up": 10, "down": 20, "expiryTime": 0, "total": 0, "reset": 0
                    }]))
                } else {
                    ok_envelope(Value::Null)
                }
            }),
        )
        .route(
            "/panel/api/inbounds/updateClient/{uuid}",
            post(|Path(uuid): Path<String>, Json(body): Json<Value>| async move {
                let settings_ok = body["settings"]
                    .as_str()
                    .and_then(|s| serde_json::from_str::<Value>(s).ok())
                    .map(|v| v["clients"][0]["email"] == json!("dave"))
                    .unwrap_or(false);
                if uuid != "client-uuid" || body["id"] != json!(2) || !settings_ok {
                    return (StatusCode::BAD_REQUEST, Json(json!({}))).into_response();
                }
                ok_envelope(Value::Null).into_response()
            }),
        );
    let addr = spawn(app);

    let api = logged_in_api(addr);
    let mut client = api.client.get_by_email("dave").unwrap().unwrap();
    assert!(api.client.get_by_email("nobody").unwrap().is_none());

    let records = api.client.get_traffic_by_id("client-uuid").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].email, "dave");
    assert!(api.client.get_traffic_by_id("other-uuid").unwrap().is_empty());

    client.limit_ip = 4;
    api.client.update("client-uuid", &client).unwrap();

    // An update without a known inbound is refused before hitting the wire.
    client.inbound_id = None;
    assert!(matches!(
        api.client.update("client-uuid", &client),
        Err(Error::Config(_))
    ));
}

#[test]
fn server_status_and_db_backup() {
    let app = Router::new()
        .route("/login", post(login_with_cookie))
        .route(
            "/server/status",
            post(|| async {
                ok_envelope(json!({
                    "cpu": 1.0, "cpuCores": 1, "logicalPro": 1, "cpuSpeedMhz": 1000.0,
                    "mem": {"current": 1, "total": 2},
                    "swap": {"current": 0, "total": 0},
                    "disk": {"current": 1, "total": 2},
                    "xray": {"state": "running", "errorMsg": "", "version": "1.8.4"},
                    "uptime": 1,
                    "loads": [0.0, 0.0, 0.0],
                    "tcpCount": 0, "udpCount": 0,
                    "netIO": {"up": 0, "down": 0},
                    "netTraffic": {"sent": 0, "recv": 0},
                    "publicIP": {"ipv4": "", "ipv6": ""},
                    "appStats": {"threads": 1, "mem": 1, "uptime": 1}
                }))
            }),
        )
        .route("/server/getDb", get(|| async { b"backup-bytes".to_vec() }));
    let addr = spawn(app);

    let api = logged_in_api(addr);
    let status = api.server.get_status().unwrap();
    assert_eq!(status.xray.version, "1.8.4");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x-ui.db");
    api.server.get_db(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"backup-bytes");
}
