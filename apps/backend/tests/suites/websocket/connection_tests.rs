// Connection lifecycle: registry bookkeeping, disconnect and shutdown

use std::sync::Arc;
use std::time::Duration;

use roshambo::ws::hub::WsRegistry;
use uuid::Uuid;

use crate::support::websocket::{
    labeled_state, quick_game, start_test_server, wait_for_connections,
};
use crate::support::websocket_client::WebSocketClient;

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn connections_are_registered_and_removed() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(labeled_state(quick_game(5))).await?;

    let mut first = WebSocketClient::connect_retry(&server.ws_url(), WAIT).await?;
    let mut second = WebSocketClient::connect_retry(&server.ws_url(), WAIT).await?;
    wait_for_connections(&server.registry, 2, WAIT).await?;

    first.close().await?;
    wait_for_connections(&server.registry, 1, WAIT).await?;
    second.close().await?;
    wait_for_connections(&server.registry, 0, WAIT).await?;

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn disconnect_mid_game_does_not_disturb_other_sessions(
) -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(labeled_state(quick_game(5))).await?;

    let mut leaving = WebSocketClient::connect_retry(&server.ws_url(), WAIT).await?;
    let mut staying = WebSocketClient::connect_retry(&server.ws_url(), WAIT).await?;

    leaving.start_game().await?;
    staying.start_game().await?;
    leaving.recv_until("countdown", WAIT).await?;
    leaving.close().await?;
    wait_for_connections(&server.registry, 1, WAIT).await?;

    // The remaining session still completes rounds on its own schedule.
    let update = staying.recv_until("game_update", WAIT).await?;
    assert_eq!(update["error"], "No hand detected");

    staying.close().await?;
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn close_all_connections_shuts_sockets() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(labeled_state(quick_game(5))).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url(), WAIT).await?;
    client.start_game().await?;
    client.recv_until("countdown", WAIT).await?;
    wait_for_connections(&server.registry, 1, WAIT).await?;

    let closed = server.registry.close_all_connections();
    assert_eq!(closed.len(), 1);
    wait_for_connections(&server.registry, 0, WAIT).await?;

    // Remaining queued messages may still arrive, but the socket ends.
    loop {
        match client.recv_json_timeout(WAIT).await? {
            None => break,
            Some(msg) => assert_ne!(msg["type"], "game_over"),
        }
    }

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn empty_registry_is_safe_to_use() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(WsRegistry::new());
    assert_eq!(registry.active_connections_count(), 0);
    registry.unregister_connection(Uuid::new_v4());
    assert!(registry.close_all_connections().is_empty());
    Ok(())
}
