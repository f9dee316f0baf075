use actix::prelude::*;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::ws::session::Shutdown;

/// Live websocket connections, keyed by connection id.
#[derive(Default)]
pub struct WsRegistry {
    connections: DashMap<Uuid, Recipient<Shutdown>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register_connection(&self, conn_id: Uuid, recipient: Recipient<Shutdown>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister_connection(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    pub fn active_connections_count(&self) -> usize {
        self.connections.len()
    }

    /// Ask every live connection to shut down; returns the ids that were asked.
    pub fn close_all_connections(&self) -> Vec<Uuid> {
        let targets: Vec<(Uuid, Recipient<Shutdown>)> = self
            .connections
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        if !targets.is_empty() {
            info!(count = targets.len(), "[WS HUB] closing all connections");
        }
        targets
            .into_iter()
            .map(|(conn_id, recipient)| {
                recipient.do_send(Shutdown);
                conn_id
            })
            .collect()
    }
}
