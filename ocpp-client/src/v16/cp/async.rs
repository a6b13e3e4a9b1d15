use std::task::Poll;

use futures::FutureExt;

use crate::v16::{
    drivers::{
        decision::{DecisionDriver, DecisionProvider},
        timers::{TimerDriver, TimerManager},
        websocket::{WebsocketClient, WebsocketResponse, WebsocketTransport},
    },
    state_machine::actions::CoreActions,
};

use super::{config::ChargePointConfig, core::ChargePointCore, error::EngineError};

/// Drives a [`ChargePointCore`] with a transport, a timer source and a decision provider.
pub struct ChargePointAsync<WS: WebsocketTransport, TI: TimerManager, DP: DecisionProvider> {
    configs: ChargePointConfig,
    ws: WebsocketClient<WS>,
    timer: TimerDriver<TI>,
    decisions: DecisionDriver<DP>,
}

impl<WS: WebsocketTransport, TI: TimerManager, DP: DecisionProvider> ChargePointAsync<WS, TI, DP> {
    pub fn new(ws: WS, timer: TI, decisions: DP, configs: ChargePointConfig) -> Self {
        Self {
            configs,
            ws: WebsocketClient::new(ws),
            timer: TimerDriver::new(timer),
            decisions: DecisionDriver::new(decisions),
        }
    }

    /// Runs one connection. Returns `Ok` once the transport closes and `Err` on a fatal engine error.
    pub async fn run(self) -> Result<(), EngineError> {
        let ChargePointAsync {
            configs,
            mut ws,
            mut timer,
            mut decisions,
        } = self;
        let mut cp = ChargePointCore::new(configs)?;
        let mut actions = cp.init();
        let mut closed = false;
        loop {
            for action in actions {
                match action {
                    CoreActions::Connect(cms_url) => {
                        log::debug!("connect, cms_url: {}", cms_url);
                        ws.connect(cms_url);
                    }
                    CoreActions::SendWsMsg(msg) => {
                        log::info!("[MSG_OUT] {}", msg);
                        ws.send_msg(msg).await;
                    }
                    CoreActions::AddTimeout(id, timeout) => {
                        log::trace!("add timeout, id: {:?}, timeout: {:?}", id, timeout);
                        timer.add_or_update(id, timeout);
                    }
                    CoreActions::RemoveTimeout(id) => {
                        log::trace!("remove timeout, id: {:?}", id);
                        timer.remove_timeout(id);
                    }
                    CoreActions::AskDecision(ticket, prompt) => {
                        log::debug!("ask decision {}: {}", ticket, prompt.question());
                        decisions.ask(ticket, prompt);
                    }
                    CoreActions::Fatal(err) => {
                        timer.remove_all_timeouts();
                        ws.close_connection().await;
                        return Err(err);
                    }
                }
            }
            if closed {
                timer.remove_all_timeouts();
                return Ok(());
            }
            (actions, closed) = futures::future::poll_fn(|cx| {
                if let Poll::Ready(msg) = ws.poll_unpin(cx) {
                    let actions = match msg {
                        WebsocketResponse::Connected => {
                            log::info!("ws connected");
                            cp.ws_connected()
                        }
                        WebsocketResponse::WsMsg(msg) => {
                            log::info!("[MSG_IN] {}", msg);
                            cp.got_ws_msg(&msg)
                        }
                        WebsocketResponse::Error(e) => cp.ws_error(&e),
                        WebsocketResponse::Disconnected { code, reason } => {
                            log::info!("ws disconnected");
                            return Poll::Ready((cp.ws_disconnected(code, &reason), true));
                        }
                    };
                    return Poll::Ready((actions, false));
                }
                if let Poll::Ready(id) = timer.poll_unpin(cx) {
                    log::trace!("id timedout: {:?}", id);
                    return Poll::Ready((cp.handle_timeout(id), false));
                }
                if let Poll::Ready((ticket, verdict)) = decisions.poll_unpin(cx) {
                    log::debug!("verdict {:?} for ticket {}", verdict, ticket);
                    return Poll::Ready((cp.handle_verdict(ticket, verdict), false));
                }
                Poll::Pending
            })
            .await;
        }
    }
}
