//! Subscriptions over a real WebSocket connection (graphql-transport-ws).

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use medgraph_core::NewDoctor;
use medgraph_graphql::EventKind;
use medgraph_server::{AppConfig, AppState, build_router};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> (
    SocketAddr,
    AppState,
    tokio::sync::oneshot::Sender<()>,
    JoinHandle<()>,
) {
    let cfg = AppConfig::default();
    let state = AppState::new(&cfg).await.expect("app state");
    let app = build_router(&cfg, state.clone());

    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, state, tx, server)
}

/// Opens a socket on `path` and completes the connection handshake.
async fn connect(addr: SocketAddr, path: &str) -> Socket {
    let mut request = format!("ws://{addr}{path}")
        .into_client_request()
        .unwrap();
    request.headers_mut().insert(
        "sec-websocket-protocol",
        HeaderValue::from_static("graphql-transport-ws"),
    );
    let (mut socket, _) = connect_async(request).await.expect("connect");

    send(&mut socket, json!({ "type": "connection_init" })).await;
    let ack = receive(&mut socket).await;
    assert_eq!(ack["type"], "connection_ack");
    socket
}

async fn send(socket: &mut Socket, message: Value) {
    socket
        .send(Message::Text(message.to_string()))
        .await
        .expect("send");
}

async fn receive(socket: &mut Socket) -> Value {
    loop {
        let message = timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for a message")
            .expect("socket closed")
            .expect("socket error");
        match message {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

async fn subscribe(socket: &mut Socket, id: &str, field: &str) {
    send(
        socket,
        json!({
            "id": id,
            "type": "subscribe",
            "payload": { "query": format!("subscription {{ {field} }}") }
        }),
    )
    .await;
}

/// Registration happens on the server task, so poll until it shows up.
async fn wait_for_subscribers(state: &AppState, kind: EventKind, expected: usize) {
    let waited = timeout(Duration::from_secs(5), async {
        while state.notifier.subscriber_count(kind) != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(
        waited.is_ok(),
        "expected {expected} {kind} subscribers, found {}",
        state.notifier.subscriber_count(kind)
    );
}

#[tokio::test]
async fn subscribe_next_complete_and_disconnect() {
    let (addr, state, shutdown_tx, handle) = start_server().await;
    let mut socket = connect(addr, "/graphql/ws").await;

    subscribe(&mut socket, "1", "newDoctor").await;
    wait_for_subscribers(&state, EventKind::DoctorAdded, 1).await;

    state
        .store
        .create_doctor(NewDoctor::new("Grey", "Surgery", "Seattle Grace"))
        .await
        .unwrap();

    let next = receive(&mut socket).await;
    assert_eq!(next["type"], "next");
    assert_eq!(next["id"], "1");
    assert_eq!(
        next["payload"]["data"]["newDoctor"],
        "New doctor added: Grey"
    );

    // Client-side complete releases the queue
    send(&mut socket, json!({ "id": "1", "type": "complete" })).await;
    wait_for_subscribers(&state, EventKind::DoctorAdded, 0).await;

    // Dropping the socket releases any open subscription
    subscribe(&mut socket, "2", "newDoctor").await;
    wait_for_subscribers(&state, EventKind::DoctorAdded, 1).await;
    drop(socket);
    wait_for_subscribers(&state, EventKind::DoctorAdded, 0).await;

    let _ = shutdown_tx.send(());
    handle.abort();
}

#[tokio::test]
async fn graphql_path_accepts_websocket_upgrade() {
    let (addr, state, shutdown_tx, handle) = start_server().await;
    let mut socket = connect(addr, "/graphql").await;

    subscribe(&mut socket, "a", "deletedDoctor").await;
    wait_for_subscribers(&state, EventKind::DoctorDeleted, 1).await;

    let doctor = state
        .store
        .create_doctor(NewDoctor::new("House", "Diagnostics", "Princeton-Plainsboro"))
        .await
        .unwrap();
    state.store.delete_doctor(doctor.id).await.unwrap();

    let next = receive(&mut socket).await;
    assert_eq!(next["type"], "next");
    assert_eq!(
        next["payload"]["data"]["deletedDoctor"],
        "Doctor removed: House"
    );

    drop(socket);
    wait_for_subscribers(&state, EventKind::DoctorDeleted, 0).await;

    let _ = shutdown_tx.send(());
    handle.abort();
}
