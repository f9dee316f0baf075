use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpMessage, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::game::{EventSink, GameEvent, Session};
use crate::middleware::RequestId;
use crate::state::app_state::AppState;
use crate::vision::Frame;
use crate::ws::hub::WsRegistry;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Shutdown;

impl actix::Message for GameEvent {
    type Result = ();
}

/// Round loop events go straight into the connection actor's mailbox.
impl EventSink for Recipient<GameEvent> {
    fn emit(&self, event: GameEvent) -> bool {
        if !self.connected() {
            return false;
        }
        self.do_send(event);
        true
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = Session::new(app_state.next_session_no(), app_state.session_deps());
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    info!(conn_id = %session.id(), %request_id, "[WS SESSION] upgrading");

    let ws_session = WsSession::new(session, app_state.websocket_registry());
    ws::start(ws_session, &req, stream)
}

/// One websocket connection and the game session it owns.
pub struct WsSession {
    conn_id: Uuid,
    session: Session,
    registry: Arc<WsRegistry>,

    last_heartbeat: Instant,
    heartbeat_handle: Option<actix::SpawnHandle>,
}

impl WsSession {
    fn new(session: Session, registry: Arc<WsRegistry>) -> Self {
        Self {
            conn_id: session.id(),
            session,
            registry,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    /// Report a protocol problem; the connection stays open.
    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        let message = message.into();
        debug!(conn_id = %self.conn_id, %message, "[WS SESSION] rejected client message");
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: ErrorCode::BadRequest,
                message,
            },
        );
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::StartGame => {
                let sink = ctx.address().recipient::<GameEvent>();
                if !self.session.start(sink) {
                    debug!(conn_id = %self.conn_id, "[WS SESSION] start_game while playing");
                }
            }
            ClientMsg::Frame { image } => {
                self.session.submit_frame(Frame::new(image));
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.registry
            .register_connection(self.conn_id, ctx.address().recipient::<Shutdown>());
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.session.cancel();
        self.registry.unregister_connection(self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(_) => self.send_error(ctx, "Malformed JSON"),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error(ctx, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<GameEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, event: GameEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &ServerMsg::from(event));
    }
}

impl Handler<Shutdown> for WsSession {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        self.session.cancel();
        self.registry.unregister_connection(self.conn_id);

        if let Some(handle) = self.heartbeat_handle.take() {
            ctx.cancel_future(handle);
        }

        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
        ctx.stop();
    }
}
