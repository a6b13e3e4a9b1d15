use std::{
    collections::BTreeMap,
    task::{Context, Poll},
    time::Duration,
};

use cpsim_client::v16::{TimerId, TimerManager, TransportEvent, WebsocketTransport};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// In-memory transport. The test plays the central system through [`MockWsHandle`].
pub struct MockWs {
    incoming: UnboundedReceiver<TransportEvent>,
    outgoing: UnboundedSender<String>,
    refuse_connect: bool,
}

pub struct MockWsHandle {
    pub to_cp: UnboundedSender<TransportEvent>,
    pub from_cp: UnboundedReceiver<String>,
}

impl MockWs {
    pub fn new() -> (Self, MockWsHandle) {
        let (to_cp, incoming) = unbounded_channel();
        let (outgoing, from_cp) = unbounded_channel();
        (
            Self {
                incoming,
                outgoing,
                refuse_connect: false,
            },
            MockWsHandle { to_cp, from_cp },
        )
    }

    pub fn refusing() -> (Self, MockWsHandle) {
        let (mut ws, handle) = Self::new();
        ws.refuse_connect = true;
        (ws, handle)
    }
}

#[async_trait::async_trait]
impl WebsocketTransport for MockWs {
    async fn connect(&mut self, url: String) -> Result<(), String> {
        if self.refuse_connect {
            return Err(format!("connection refused: {}", url));
        }
        Ok(())
    }

    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<TransportEvent> {
        match self.incoming.poll_recv(cx) {
            Poll::Ready(Some(event)) => Poll::Ready(event),
            Poll::Ready(None) => Poll::Ready(TransportEvent::Closed {
                code: 1000,
                reason: String::from("server gone"),
            }),
            Poll::Pending => Poll::Pending,
        }
    }

    async fn send(&mut self, msg: String) {
        let _ = self.outgoing.send(msg);
    }

    async fn close(&mut self) {}
}

/// Fires timers immediately in deadline order on a virtual clock.
#[derive(Default)]
pub struct InstantTimers {
    now: Duration,
    deadlines: BTreeMap<TimerId, Duration>,
}

impl TimerManager for InstantTimers {
    fn add_or_update_timeout(&mut self, id: TimerId, timeout: Duration) {
        self.deadlines.insert(id, self.now + timeout);
    }

    fn remove_timeout(&mut self, id: TimerId) {
        self.deadlines.remove(&id);
    }

    fn remove_all_timeouts(&mut self) {
        self.deadlines.clear();
    }

    fn poll_timeout(&mut self, _cx: &mut Context<'_>) -> Poll<TimerId> {
        let next = self
            .deadlines
            .iter()
            .map(|(id, at)| (*at, *id))
            .min();
        match next {
            Some((at, id)) => {
                self.deadlines.remove(&id);
                self.now = at;
                Poll::Ready(id)
            }
            None => Poll::Pending,
        }
    }
}
